//! GUI module - User interface components

mod app;
mod callback;
mod chart_viewer;
mod control_panel;
mod year_slider;

pub use app::DashboardApp;
pub use callback::SliderCallback;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use year_slider::YearMarks;
