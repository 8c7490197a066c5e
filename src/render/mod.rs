//! Off-screen chart rendering
//!
//! Charts draw into an in-memory RGB buffer through the plotters bitmap
//! backend; the buffer is then written as a PNG tagged with the figure DPI.

pub mod color;
pub mod heatmap;
pub mod legend;
pub mod png;

use crate::constants::figure::POINTS_PER_INCH;
use crate::error::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Root drawing area every chart draws on
pub type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Font family used for every text element
pub const FONT_FAMILY: &str = "sans-serif";

/// Physical figure size and resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Figure {
    pub fn new((width_in, height_in): (f64, f64), dpi: u32) -> Self {
        Self {
            width_in,
            height_in,
            dpi,
        }
    }

    /// Raster size in pixels
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }

    /// Convert a length in points to pixels
    pub fn px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / POINTS_PER_INCH
    }

    /// Same as [`px`](Self::px), rounded for integer pixel APIs
    pub fn px_i(&self, points: f64) -> i32 {
        self.px(points).round() as i32
    }

    /// Font of the given point size
    pub fn font(&self, points: f64) -> FontDesc<'static> {
        (FONT_FAMILY, self.px(points)).into_font()
    }

    /// Render a chart into an RGB buffer and write it to `path` as PNG.
    ///
    /// The canvas is cleared to white before `draw` runs.
    pub fn save<F>(&self, path: &Path, draw: F) -> Result<PathBuf>
    where
        F: FnOnce(&Canvas<'_>) -> Result<()>,
    {
        let (width, height) = self.pixels();
        let mut buffer = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;
            draw(&root)?;
            root.present()?;
        }

        let encoded = png::encode_rgb(&buffer, width, height, self.dpi)?;
        std::fs::write(path, encoded)?;

        tracing::debug!(path = %path.display(), width, height, dpi = self.dpi, "wrote chart");
        Ok(path.to_path_buf())
    }
}

/// Label for an integer tick on a categorical axis, empty elsewhere
pub fn category_label(labels: &[String], position: f64) -> String {
    let nearest = position.round();
    if (position - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

/// Pad a data range so points do not sit on the frame
pub fn padded_range(min: f64, max: f64, fraction: f64) -> (f64, f64) {
    let span = max - min;
    let pad = if span.abs() > 1e-9 { span * fraction } else { 1.0 };
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_pixels_and_points() {
        let fig = Figure::new((10.0, 4.0), 300);
        assert_eq!(fig.pixels(), (3000, 1200));
        assert_eq!(fig.px(72.0), 300.0);
        assert_eq!(fig.px_i(12.0), 50);
    }

    #[test]
    fn test_category_label() {
        let labels = vec!["Jan".to_string(), "Feb".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Jan");
        assert_eq!(category_label(&labels, 1.0000000001), "Feb");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(0.0, 10.0, 0.1), (-1.0, 11.0));
        assert_eq!(padded_range(5.0, 5.0, 0.1), (4.0, 6.0));
    }
}
