//! Charts module - Figure descriptions, interactive plotting and PNG export

mod export;
mod figure;
mod palette;
mod plotter;

pub use export::StaticChartRenderer;
pub use figure::DashboardFigures;
pub use plotter::ChartPlotter;
