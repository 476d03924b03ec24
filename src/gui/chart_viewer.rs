//! Chart Viewer Widget
//! Central scrollable panel: heading, year slider and the three charts.

use super::year_slider::YearMarks;
use crate::charts::{ChartPlotter, DashboardFigures};
use egui::{RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;

/// Holds the latest figures and draws them in the dashboard layout.
#[derive(Default)]
pub struct ChartViewer {
    pub figures: Option<DashboardFigures>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_figures(&mut self, figures: DashboardFigures) {
        self.figures = Some(figures);
    }

    /// Draw the dashboard. Returns a newly selected year, if any.
    pub fn show(&self, ui: &mut egui::Ui, marks: &YearMarks, year: Option<i32>) -> Option<i32> {
        let mut selected = None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("HDB Resale data").size(26.0));
                ui.label("Dashboard for HDB resale data");
                ui.add_space(CHART_SPACING);

                match year {
                    Some(year) if !marks.is_empty() => selected = marks.show(ui, year),
                    _ => {
                        ui.label(RichText::new("No years available").weak());
                    }
                }
                ui.add_space(CHART_SPACING);

                let Some(figures) = self.figures.as_ref().filter(|f| !f.is_empty()) else {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("No Data").size(20.0));
                    });
                    return;
                };

                ChartPlotter::draw_box_figure(ui, &figures.price_box);
                ui.add_space(CHART_SPACING);
                ChartPlotter::draw_bar_figure(ui, &figures.mean_bar);
                ui.add_space(CHART_SPACING);
                ChartPlotter::draw_bar_figure(ui, &figures.median_bar);
            });

        selected
    }
}
