//! Global land–ocean temperature anomalies by year and month

use super::month_abbreviations;
use crate::constants::datasets::MONTH_NAMES;
use crate::constants::figure::GLOBAL_HEATMAP_SIZE;
use crate::constants::heatmap::ANOMALY_BOUNDS;
use crate::constants::paths::GLOBAL_HEATMAP_PNG;
use crate::data::{GlobalAnomalyRecord, MonthMatrix};
use crate::error::{PlotError, Result};
use crate::render::Figure;
use crate::render::color::ColorScale;
use crate::render::heatmap::{HeatmapStyle, draw_heatmap};
use std::path::{Path, PathBuf};

/// One (year, month) cell of the anomaly table in long form
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyObservation {
    pub year: i32,
    pub month_name: &'static str,
    pub anomaly: Option<f64>,
}

/// Calendar index (1..=12) of a month abbreviation
pub fn month_index(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

/// Unpivot the wide table into one observation per (year, month)
pub fn melt(records: &[GlobalAnomalyRecord]) -> Vec<AnomalyObservation> {
    records
        .iter()
        .flat_map(|record| {
            (0..MONTH_NAMES.len()).map(move |i| AnomalyObservation {
                year: record.year,
                month_name: MONTH_NAMES[i],
                anomaly: record.anomalies[i],
            })
        })
        .collect()
}

/// Pivot long-form observations into a year × month matrix, years ascending.
/// Missing anomalies stay blank.
pub fn anomaly_matrix(observations: &[AnomalyObservation]) -> Result<MonthMatrix> {
    let entries = observations
        .iter()
        .map(|obs| {
            let month = month_index(obs.month_name).ok_or_else(|| {
                PlotError::Validation(format!("unknown month column '{}'", obs.month_name))
            })?;
            Ok((obs.year, month, obs.anomaly))
        })
        .collect::<Result<Vec<_>>>()?;

    MonthMatrix::pivot(entries)
}

/// Render `global_temp_heatmap.png` into `out_dir`
pub fn render(records: &[GlobalAnomalyRecord], out_dir: &Path, dpi: u32) -> Result<PathBuf> {
    if records.is_empty() {
        return Err(PlotError::EmptyDataset);
    }

    let observations = melt(records);
    let matrix = anomaly_matrix(&observations)?;

    tracing::info!(
        years = matrix.n_rows(),
        blank = matrix.blank_cells(),
        "global anomaly matrix"
    );

    let title = match (matrix.row_labels.first(), matrix.row_labels.last()) {
        (Some(first), Some(last)) if first != last => {
            format!("Global land–ocean temperature anomalies ({}–{})", first, last)
        }
        _ => "Global land–ocean temperature anomalies".to_string(),
    };
    let labels = month_abbreviations(&matrix.months);
    let style = HeatmapStyle {
        title: &title,
        x_desc: "Month",
        y_desc: "Year",
        colorbar_desc: "Temperature anomaly (°C relative to 1951–1980)",
        scale: ColorScale::coolwarm(ANOMALY_BOUNDS.0, ANOMALY_BOUNDS.1),
        annotate: None,
    };

    let figure = Figure::new(GLOBAL_HEATMAP_SIZE, dpi);
    figure.save(&out_dir.join(GLOBAL_HEATMAP_PNG), |root| {
        draw_heatmap(root, &figure, &matrix, &labels, &style)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(year: i32, fill: f64) -> GlobalAnomalyRecord {
        let mut anomalies = [None; 12];
        for (i, slot) in anomalies.iter_mut().enumerate() {
            *slot = Some(fill + i as f64 / 100.0);
        }
        GlobalAnomalyRecord { year, anomalies }
    }

    #[test]
    fn test_month_index() {
        assert_eq!(month_index("Jan"), Some(1));
        assert_eq!(month_index("Dec"), Some(12));
        assert_eq!(month_index("J-D"), None);
    }

    #[test]
    fn test_melt_produces_twelve_rows_per_year() {
        let observations = melt(&[year(1880, -0.2), year(1881, -0.1)]);
        assert_eq!(observations.len(), 24);
        assert_eq!(observations[0].month_name, "Jan");
        assert_eq!(observations[13].year, 1881);
        assert_eq!(observations[13].month_name, "Feb");
    }

    #[test]
    fn test_sentinel_cell_stays_blank() {
        let mut records = vec![year(1880, -0.2), year(1881, -0.1), year(1882, 0.0)];
        // "***" for July 1881
        records[1].anomalies[6] = None;

        let matrix = anomaly_matrix(&melt(&records)).unwrap();

        assert_eq!(matrix.row_labels, vec!["1880", "1881", "1882"]);
        assert_eq!(matrix.months, (1..=12).collect::<Vec<u32>>());
        assert_eq!(matrix.get("1881", 7), None);
        for month in (1..=12).filter(|m| *m != 7) {
            assert!(matrix.get("1881", month).is_some(), "month {} blank", month);
        }
        assert_eq!(matrix.blank_cells(), 1);
    }

    #[test]
    fn test_round_trip_preserves_present_values() {
        let mut records = vec![year(1990, 0.3), year(1880, -0.2), year(2024, 1.2)];
        records[2].anomalies[11] = None;

        let matrix = anomaly_matrix(&melt(&records)).unwrap();

        // Rows come back sorted by year regardless of input order
        assert_eq!(matrix.row_labels, vec!["1880", "1990", "2024"]);
        for record in &records {
            let row = matrix
                .row_labels
                .iter()
                .position(|l| *l == record.year.to_string())
                .unwrap();
            let back: Vec<Option<f64>> = matrix.cells[row].clone();
            assert_eq!(back, record.anomalies.to_vec());
        }
    }

    #[test]
    fn test_unknown_month_name() {
        let observations = vec![AnomalyObservation {
            year: 1880,
            month_name: "J-D",
            anomaly: Some(0.1),
        }];
        assert!(matches!(
            anomaly_matrix(&observations),
            Err(PlotError::Validation(_))
        ));
    }
}
