//! HDB Dashboard Main Application
//! Main window with control panel and chart viewer.

use super::callback::SliderCallback;
use super::year_slider::YearMarks;
use crate::charts::{DashboardFigures, StaticChartRenderer};
use crate::data::ResaleTable;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Main application window.
pub struct DashboardApp {
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    marks: YearMarks,
    callback: SliderCallback,
    year: Option<i32>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, table: Arc<ResaleTable>, initial_year: i32) -> Self {
        let marks = YearMarks::new(table.years());
        let data_label = table
            .source()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "in-memory dataset".to_string());
        let year_range = marks.min().zip(marks.max());

        let mut app = Self {
            control_panel: ControlPanel::new(data_label, table.row_count(), year_range),
            chart_viewer: ChartViewer::new(),
            callback: SliderCallback::year_figures(Arc::clone(&table)),
            year: marks.snap(initial_year),
            marks,
        };

        match app.year {
            Some(year) => {
                if year != initial_year {
                    warn!(requested = initial_year, year, "year not in data, snapped to nearest");
                }
                app.select_year(year);
            }
            None => app.control_panel.set_status("Dataset has no records"),
        }
        app
    }

    /// Run the slider callback for `year` and keep its figures. On failure
    /// the previous charts stay on screen.
    fn select_year(&mut self, year: i32) {
        match self.callback.dispatch(year) {
            Ok(figures) => {
                self.year = Some(year);
                let status = Self::selection_status(&figures);
                self.chart_viewer.set_figures(figures);
                self.control_panel.set_status(&status);
            }
            Err(e) => {
                error!(input = self.callback.input_id(), year, "failed to update charts: {e}");
                self.control_panel.set_error(&e.to_string());
            }
        }
    }

    fn selection_status(figures: &DashboardFigures) -> String {
        format!(
            "{}: {} sales in {} towns",
            figures.year,
            figures.record_count,
            figures.mean_bar.bars.len()
        )
    }

    /// Handle PNG export - ask for a folder and write the three charts
    fn handle_export_png(&mut self) {
        let Some(figures) = self.chart_viewer.figures.as_ref() else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        let mut dialog = rfd::FileDialog::new();
        if let Some(dir) = &self.control_panel.export.last_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(dir) = dialog.pick_folder() else {
            return; // User cancelled
        };

        self.control_panel.export.clamp_to_limits();
        let settings = &self.control_panel.export;
        match StaticChartRenderer::export_all(figures, &dir, settings.width, settings.height) {
            Ok(paths) => {
                info!(count = paths.len(), dir = %dir.display(), "charts exported");
                if settings.open_after_export {
                    if let Err(e) = open::that(&dir) {
                        warn!("could not open {}: {e}", dir.display());
                    }
                }
                self.control_panel
                    .set_status(&format!("Exported {} charts", paths.len()));
                self.control_panel.export.last_dir = Some(dir);
            }
            Err(e) => {
                error!("export failed: {e}");
                self.control_panel.set_error(&e.to_string());
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                let has_charts = self
                    .chart_viewer
                    .figures
                    .as_ref()
                    .is_some_and(|f| !f.is_empty());
                let action = self.control_panel.show(ui, self.year, has_charts);

                match action {
                    ControlPanelAction::ExportPng => self.handle_export_png(),
                    ControlPanelAction::None => {}
                }
            });

        // Central panel - Chart Viewer
        let selected = egui::CentralPanel::default()
            .show(ctx, |ui| self.chart_viewer.show(ui, &self.marks, self.year))
            .inner;

        if let Some(year) = selected {
            self.select_year(year);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{aggregate, ResaleRecord};
    use chrono::NaiveDate;

    #[test]
    fn test_selection_status_counts_sales_and_towns() {
        let rec = |town: &str, month: u32| ResaleRecord {
            town: town.to_string(),
            month: NaiveDate::from_ymd_opt(2019, month, 1).unwrap(),
            floor_area_sqm: 90.0,
            lease_commence_date: NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
            resale_price: 480.0,
        };
        let table = ResaleTable::from_records(&[
            rec("SENGKANG", 1),
            rec("SENGKANG", 4),
            rec("WOODLANDS", 8),
        ])
        .unwrap();

        let figures = DashboardFigures::build(&aggregate(&table, 2019).unwrap());
        assert_eq!(
            DashboardApp::selection_status(&figures),
            "2019: 3 sales in 2 towns"
        );
    }
}
