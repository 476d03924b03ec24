//! Year Slider
//! Discrete year marks derived from the data; the slider only lands on them.

use egui::{RichText, Slider};

/// Years present in the dataset, ascending and distinct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearMarks {
    years: Vec<i32>,
}

impl YearMarks {
    pub fn new(years: &[i32]) -> Self {
        let mut years = years.to_vec();
        years.sort_unstable();
        years.dedup();
        Self { years }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn min(&self) -> Option<i32> {
        self.years.first().copied()
    }

    pub fn max(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// Nearest available year; ties go to the earlier year.
    pub fn snap(&self, value: i32) -> Option<i32> {
        self.years
            .iter()
            .copied()
            .min_by_key(|&y| ((y as i64 - value as i64).abs(), y))
    }

    /// Resolve a raw slider value moved away from `current`. Snaps to the
    /// nearest mark; if that is still `current`, steps to the neighbouring
    /// mark in the direction of movement so small nudges are not swallowed.
    pub fn settle(&self, current: i32, value: i32) -> Option<i32> {
        let snapped = self.snap(value)?;
        if snapped != current || value == current {
            return Some(snapped);
        }

        if value > current {
            self.years.iter().copied().find(|&y| y > current)
        } else {
            self.years.iter().rev().copied().find(|&y| y < current)
        }
        .or(Some(current))
    }

    /// Draw the slider and its marks. Returns the new year when the user
    /// moved it onto a different mark.
    pub fn show(&self, ui: &mut egui::Ui, current: i32) -> Option<i32> {
        let (Some(min), Some(max)) = (self.min(), self.max()) else {
            return None;
        };

        let mut value = current;
        let response = ui.add(
            Slider::new(&mut value, min..=max)
                .step_by(1.0)
                .text("year"),
        );

        ui.horizontal_wrapped(|ui| {
            for &year in &self.years {
                let text = RichText::new(year.to_string()).size(11.0);
                let text = if year == current { text.strong() } else { text.weak() };
                ui.label(text);
            }
        });

        if !response.changed() {
            return None;
        }

        self.settle(current, value).filter(|&year| year != current)
    }
}
