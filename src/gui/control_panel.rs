//! Control Panel Widget
//! Left side panel with dataset info, export controls and status.

use crate::config::{
    DEFAULT_EXPORT_HEIGHT, DEFAULT_EXPORT_WIDTH, MAX_EXPORT_SIDE, MIN_EXPORT_HEIGHT,
    MIN_EXPORT_WIDTH,
};
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Export settings chosen in the panel.
#[derive(Clone)]
pub struct ExportSettings {
    pub width: u32,
    pub height: u32,
    pub open_after_export: bool,
    pub last_dir: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_EXPORT_WIDTH,
            height: DEFAULT_EXPORT_HEIGHT,
            open_after_export: true,
            last_dir: None,
        }
    }
}

impl ExportSettings {
    /// Keep the size within the limits the CLI accepts.
    pub fn clamp_to_limits(&mut self) {
        self.width = self.width.clamp(MIN_EXPORT_WIDTH, MAX_EXPORT_SIDE);
        self.height = self.height.clamp(MIN_EXPORT_HEIGHT, MAX_EXPORT_SIDE);
    }
}

/// Left side panel describing the loaded dataset.
pub struct ControlPanel {
    pub export: ExportSettings,
    pub data_label: String,
    pub row_count: usize,
    pub year_range: Option<(i32, i32)>,
    pub status: String,
    pub is_error: bool,
}

impl ControlPanel {
    pub fn new(data_label: String, row_count: usize, year_range: Option<(i32, i32)>) -> Self {
        Self {
            export: ExportSettings::default(),
            data_label,
            row_count,
            year_range,
            status: "Ready".to_string(),
            is_error: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, year: Option<i32>, has_charts: bool) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏠 HDB Resale")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📁 Dataset").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&self.data_label).size(12.0));
                ui.label(RichText::new(format!("{} records", self.row_count)).size(11.0));
                if let Some((lo, hi)) = self.year_range {
                    ui.label(RichText::new(format!("Years {lo}–{hi}")).size(11.0));
                }
                if let Some(year) = year {
                    ui.label(
                        RichText::new(format!("Selected: {year}"))
                            .size(12.0)
                            .strong(),
                    );
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.label(RichText::new("🖼 Export").size(14.0).strong());
        ui.add_space(5.0);

        egui::Grid::new("export_settings")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("Width:");
                ui.add(
                    egui::DragValue::new(&mut self.export.width)
                        .range(MIN_EXPORT_WIDTH..=MAX_EXPORT_SIDE),
                );
                ui.end_row();
                ui.label("Height:");
                ui.add(
                    egui::DragValue::new(&mut self.export.height)
                        .range(MIN_EXPORT_HEIGHT..=MAX_EXPORT_SIDE),
                );
                ui.end_row();
            });
        ui.checkbox(&mut self.export.open_after_export, "Open folder after export");

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(has_charts, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, status: &str) {
        self.status = format!("Error: {status}");
        self.is_error = true;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ExportPng,
}
