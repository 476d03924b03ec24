//! Chart Plotter Module
//! Draws dashboard figures as interactive egui_plot charts.

use super::figure::{BarFigure, BoxFigure, X_LABEL};
use super::palette::{self, Rgb};
use egui::{Color32, RichText};
use crate::stats::BoxSummary;
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Plot, PlotPoints, Points};
use std::ops::RangeInclusive;

pub const CHART_HEIGHT: f32 = 320.0;

const BAR_COLOR: Color32 = to_color32(palette::BAR);

const fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for the region at `index` on the x axis.
    pub fn region_color(index: usize) -> Color32 {
        to_color32(palette::region_rgb(index))
    }

    /// Label integer x marks with region names; everything else stays blank.
    fn region_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
        move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        }
    }

    /// Hover label for one box: region, sample size and mean.
    fn box_label(region: &str, summary: &BoxSummary) -> String {
        format!("{region} (n={}, mean={:.1})", summary.count, summary.mean)
    }

    fn title(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(15.0).strong());
    }

    /// Draw the price box plot: one box per region plus its outlier points.
    pub fn draw_box_figure(ui: &mut egui::Ui, figure: &BoxFigure) {
        Self::title(ui, &figure.title);

        let labels: Vec<String> = figure.groups.iter().map(|(r, _)| r.clone()).collect();

        Plot::new(figure.id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(X_LABEL)
            .y_axis_label(figure.y_label)
            .x_axis_formatter(Self::region_formatter(labels))
            .show(ui, |plot_ui| {
                for (i, (region, summary)) in figure.groups.iter().enumerate() {
                    let color = Self::region_color(i);
                    let x = i as f64;

                    let elem = BoxElem::new(
                        x,
                        BoxSpread::new(
                            summary.whisker_low,
                            summary.q1,
                            summary.median,
                            summary.q3,
                            summary.whisker_high,
                        ),
                    )
                    .name(Self::box_label(region, summary))
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color));

                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(region));

                    if !summary.outliers.is_empty() {
                        let points: PlotPoints =
                            summary.outliers.iter().map(|&y| [x, y]).collect();
                        plot_ui.points(
                            Points::new(points)
                                .radius(2.5)
                                .color(color.gamma_multiply(0.7))
                                .name(format!("{} outliers", region)),
                        );
                    }
                }
            });
    }

    /// Draw one statistic per region as a bar chart.
    pub fn draw_bar_figure(ui: &mut egui::Ui, figure: &BarFigure) {
        Self::title(ui, &figure.title);

        let labels: Vec<String> = figure.bars.iter().map(|b| b.region.clone()).collect();
        let bars: Vec<Bar> = figure
            .bars
            .iter()
            .enumerate()
            .map(|(i, agg)| {
                Bar::new(i as f64, agg.value)
                    .name(&agg.region)
                    .width(0.7)
                    .fill(BAR_COLOR)
            })
            .collect();

        Plot::new(figure.id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label(X_LABEL)
            .y_axis_label(figure.y_label)
            .x_axis_formatter(Self::region_formatter(labels))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name(figure.y_label));
            });
    }
}
