//! HDB Dashboard - Resale Price Dashboard
//!
//! Loads HDB resale transactions once, then shows price distribution and
//! per-town mean and median charts for the year picked on a slider.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::Cli;
use data::ResaleTable;
use eframe::egui;
use gui::{DashboardApp, SliderCallback, YearMarks};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hdb_dashboard=debug"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();

    let table = ResaleTable::load(&cli.data)
        .with_context(|| format!("cannot start without data from {}", cli.data.display()))?;
    let table = Arc::new(table);

    if let Some(dir) = &cli.export_dir {
        return export_headless(table, &cli, dir);
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("HDB Resale data"),
        ..Default::default()
    };

    let year = cli.year;
    eframe::run_native(
        "HDB Resale data",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, table, year)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}

/// Render the three charts for the configured year without opening a window.
fn export_headless(table: Arc<ResaleTable>, cli: &Cli, dir: &std::path::Path) -> Result<()> {
    let marks = YearMarks::new(table.years());
    let year = marks
        .snap(cli.year)
        .ok_or_else(|| anyhow!("{} has no records to export", cli.data.display()))?;
    if year != cli.year {
        warn!(requested = cli.year, year, "year not in data, snapped to nearest");
    }

    let figures = SliderCallback::year_figures(table).dispatch(year)?;
    let paths = charts::StaticChartRenderer::export_all(&figures, dir, cli.width, cli.height)
        .with_context(|| format!("failed to export charts to {}", dir.display()))?;

    for path in paths {
        info!("wrote {}", path.display());
    }
    Ok(())
}
