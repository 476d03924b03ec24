//! Static Chart Renderer
//! Renders dashboard figures to PNG with plotters' bitmap backend.
//!
//! Each figure is drawn into an in-memory RGB buffer and encoded with the
//! `image` crate, so the same bytes can be written to disk or handed to
//! another consumer.

use super::figure::{BarFigure, BoxFigure, DashboardFigures, X_LABEL};
use super::palette::{self, Rgb};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const FONT: &str = "sans-serif";
const BAR_RGB: RGBColor = to_rgb_color(palette::BAR);

const fn to_rgb_color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No usable sans-serif font for chart text: {0}")]
    MissingFont(String),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Pixel buffer does not match {0}x{1}")]
    Buffer(u32, u32),
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

type DrawResult = Result<(), Box<dyn std::error::Error>>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the box plot figure to PNG bytes.
    pub fn render_box_png(figure: &BoxFigure, width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
        Self::render_png(width, height, |root| Self::draw_box(root, figure))
    }

    /// Render a bar chart figure to PNG bytes.
    pub fn render_bar_png(figure: &BarFigure, width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
        Self::render_png(width, height, |root| Self::draw_bars(root, figure))
    }

    /// Write all three figures into `dir` as `<chart id>-<year>.png`.
    pub fn export_all(
        figures: &DashboardFigures,
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let rendered = [
            (
                figures.price_box.id,
                Self::render_box_png(&figures.price_box, width, height)?,
            ),
            (
                figures.mean_bar.id,
                Self::render_bar_png(&figures.mean_bar, width, height)?,
            ),
            (
                figures.median_bar.id,
                Self::render_bar_png(&figures.median_bar, width, height)?,
            ),
        ];

        let mut written = Vec::with_capacity(rendered.len());
        for (id, bytes) in rendered {
            let path = Self::output_path(dir, id, figures.year);
            fs::write(&path, &bytes).map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), bytes = bytes.len(), "wrote chart");
            written.push(path);
        }

        info!(year = figures.year, dir = %dir.display(), "exported {} charts", written.len());
        Ok(written)
    }

    pub fn output_path(dir: &Path, id: &str, year: i32) -> PathBuf {
        dir.join(format!("{id}-{year}.png"))
    }

    fn render_png<F>(width: u32, height: u32, draw: F) -> Result<Vec<u8>, ExportError>
    where
        F: FnOnce(&DrawingArea<BitMapBackend, Shift>) -> DrawResult,
    {
        Self::check_font()?;

        let mut buf = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            draw(&root).map_err(|e| ExportError::Draw(e.to_string()))?;
            root.present()
                .map_err(|e| ExportError::Draw(e.to_string()))?;
        }
        Self::encode_png(buf, width, height)
    }

    /// Resolve the chart font before drawing, so a host without system fonts
    /// reports that instead of a generic draw failure.
    fn check_font() -> Result<(), ExportError> {
        (FONT, 12)
            .into_font()
            .box_size("0")
            .map(|_| ())
            .map_err(|e| ExportError::MissingFont(e.to_string()))
    }

    /// Encode a packed RGB buffer as PNG.
    pub fn encode_png(buf: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
        let img = RgbImage::from_raw(width, height, buf).ok_or(ExportError::Buffer(width, height))?;
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Y axis range for the box plot with 5% headroom on both ends.
    fn box_y_range(figure: &BoxFigure) -> (f64, f64) {
        match figure.value_range() {
            Some((lo, hi)) if hi > lo => {
                let pad = (hi - lo) * 0.05;
                (lo - pad, hi + pad)
            }
            Some((v, _)) => (v - 1.0, v + 1.0),
            None => (0.0, 1.0),
        }
    }

    fn bar_y_max(figure: &BarFigure) -> f64 {
        match figure.max_value() {
            Some(v) if v > 0.0 => v * 1.1,
            _ => 1.0,
        }
    }

    fn label_at(labels: &[String], x: f64) -> String {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }

    fn draw_box(root: &DrawingArea<BitMapBackend, Shift>, figure: &BoxFigure) -> DrawResult {
        root.fill(&WHITE)?;

        let n = figure.groups.len().max(1);
        let (y_lo, y_hi) = Self::box_y_range(figure);
        let labels: Vec<String> = figure.groups.iter().map(|(r, _)| r.clone()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&figure.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(110)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_lo..y_hi)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n + 1)
            .x_label_formatter(&|x| Self::label_at(&labels, *x))
            .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
            .x_desc(X_LABEL)
            .y_desc(figure.y_label)
            .draw()?;

        for (i, (_, s)) in figure.groups.iter().enumerate() {
            let color = to_rgb_color(palette::region_rgb(i));
            let x = i as f64;
            let half = 0.25;

            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - half, s.q1), (x + half, s.q3)],
                color.mix(0.3).filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - half, s.q1), (x + half, s.q3)],
                color.stroke_width(2),
            )))?;

            let segments = [
                vec![(x - half, s.median), (x + half, s.median)],
                vec![(x, s.whisker_low), (x, s.q1)],
                vec![(x, s.q3), (x, s.whisker_high)],
                vec![(x - half / 2.0, s.whisker_low), (x + half / 2.0, s.whisker_low)],
                vec![(x - half / 2.0, s.whisker_high), (x + half / 2.0, s.whisker_high)],
            ];
            chart.draw_series(
                segments
                    .into_iter()
                    .map(|points| PathElement::new(points, color.stroke_width(2))),
            )?;

            chart.draw_series(
                s.outliers
                    .iter()
                    .map(|&y| Circle::new((x, y), 3, color.mix(0.7).filled())),
            )?;
        }

        Ok(())
    }

    fn draw_bars(root: &DrawingArea<BitMapBackend, Shift>, figure: &BarFigure) -> DrawResult {
        root.fill(&WHITE)?;

        let n = figure.bars.len().max(1);
        let labels: Vec<String> = figure.bars.iter().map(|b| b.region.clone()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&figure.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(110)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..Self::bar_y_max(figure))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n + 1)
            .x_label_formatter(&|x| Self::label_at(&labels, *x))
            .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
            .x_desc(X_LABEL)
            .y_desc(figure.y_label)
            .draw()?;

        chart.draw_series(figure.bars.iter().enumerate().map(|(i, agg)| {
            let x = i as f64;
            Rectangle::new([(x - 0.35, 0.0), (x + 0.35, agg.value)], BAR_RGB.filled())
        }))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{aggregate, ResaleRecord, ResaleTable};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn figures(year: i32) -> DashboardFigures {
        let rec = |town: &str, price: f64| ResaleRecord {
            town: town.to_string(),
            month: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
            floor_area_sqm: 80.0,
            lease_commence_date: NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
            resale_price: price,
        };
        let table = ResaleTable::from_records(&[
            rec("PUNGGOL", 420.0),
            rec("PUNGGOL", 480.0),
            rec("QUEENSTOWN", 610.0),
            rec("QUEENSTOWN", 1020.0),
        ])
        .unwrap();
        DashboardFigures::build(&aggregate(&table, year).unwrap())
    }

    #[test]
    fn test_encode_png_roundtrip_size() {
        let bytes = StaticChartRenderer::encode_png(vec![255u8; 4 * 3 * 3], 4, 3).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        let err = StaticChartRenderer::encode_png(vec![0u8; 5], 4, 3).unwrap_err();
        assert!(matches!(err, ExportError::Buffer(4, 3)));
    }

    #[test]
    fn test_ranges() {
        let f = figures(2020);
        let (lo, hi) = StaticChartRenderer::box_y_range(&f.price_box);
        assert!(lo < 420.0 && hi > 1020.0);
        assert!(StaticChartRenderer::bar_y_max(&f.mean_bar) > 815.0);

        let empty = figures(1999);
        assert_eq!(StaticChartRenderer::box_y_range(&empty.price_box), (0.0, 1.0));
        assert_eq!(StaticChartRenderer::bar_y_max(&empty.median_bar), 1.0);
    }

    #[test]
    fn test_label_at() {
        let labels = vec!["A".to_string(), "B".to_string()];
        assert_eq!(StaticChartRenderer::label_at(&labels, 1.0), "B");
        assert_eq!(StaticChartRenderer::label_at(&labels, 0.5), "");
        assert_eq!(StaticChartRenderer::label_at(&labels, -0.0), "A");
    }

    #[test]
    fn test_draw_failure_is_not_reported_as_missing_font() {
        let result = StaticChartRenderer::render_png(16, 16, |_| Err("axis overflow".into()));
        match result {
            Err(ExportError::Draw(msg)) => assert_eq!(msg, "axis overflow"),
            Err(ExportError::MissingFont(msg)) => {
                assert!(StaticChartRenderer::check_font().is_err());
                eprintln!("no chart font on this host: {msg}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_export_all_writes_three_pngs() {
        let dir = tempdir().unwrap();
        let written = match StaticChartRenderer::export_all(&figures(2020), dir.path(), 640, 480) {
            Ok(paths) => paths,
            // Text rendering needs a system font; headless hosts may have none.
            Err(ExportError::MissingFont(msg)) => {
                eprintln!("skipping export test: {msg}");
                return;
            }
            Err(e) => panic!("export failed: {e}"),
        };

        assert_eq!(
            written,
            vec![
                dir.path().join("my-box-2020.png"),
                dir.path().join("my-mean-bar-2020.png"),
                dir.path().join("my-median-bar-2020.png"),
            ]
        );
        for path in written {
            let img = image::open(&path).unwrap();
            assert_eq!((img.width(), img.height()), (640, 480));
        }
    }
}
