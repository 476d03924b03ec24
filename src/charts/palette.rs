//! Chart colours shared by the interactive and static renderers.

/// Plain RGB triple; each renderer converts it to its own colour type.
pub type Rgb = (u8, u8, u8);

/// Bar colour, matching the default plotly trace colour.
pub const BAR: Rgb = (99, 110, 250);

pub const PALETTE: [Rgb; 10] = [
    (99, 110, 250),  // Indigo
    (239, 85, 59),   // Red
    (0, 204, 150),   // Green
    (171, 99, 250),  // Purple
    (255, 161, 90),  // Orange
    (25, 211, 243),  // Cyan
    (255, 102, 146), // Pink
    (182, 232, 128), // Lime
    (255, 151, 255), // Magenta
    (254, 203, 82),  // Yellow
];

/// Colour for the region at `index` on the x axis.
pub fn region_rgb(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}
