//! Average monthly temperature by city

use super::month_numbers;
use crate::constants::figure::WEATHER_HEATMAP_SIZE;
use crate::constants::numeric::EPSILON;
use crate::constants::paths::WEATHER_HEATMAP_PNG;
use crate::data::{DataSource, MonthMatrix, WeatherRecord};
use crate::error::{PlotError, Result};
use crate::render::Figure;
use crate::render::color::ColorScale;
use crate::render::heatmap::{HeatmapStyle, draw_heatmap};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Mean `avg_temp` per (city, month), pivoted to a city × month matrix.
///
/// Cities are sorted alphabetically and months in calendar order. A city
/// without readings for a month gets a blank cell.
pub fn monthly_mean_matrix(records: &[WeatherRecord]) -> Result<MonthMatrix> {
    if records.is_empty() {
        return Err(PlotError::EmptyDataset);
    }

    let cities: Vec<&str> = records.iter().map(|r| r.city.as_str()).collect();
    let months: Vec<i64> = records.iter().map(|r| r.month as i64).collect();
    let temps: Vec<Option<f64>> = records.iter().map(|r| r.avg_temp).collect();

    let grouped = df!(
        "city" => cities,
        "month" => months,
        "avg_temp" => temps
    )?
    .lazy()
    .group_by([col("city"), col("month")])
    .agg([col("avg_temp").mean()])
    .collect()?;

    let means = DataSource::from_dataframe(grouped, None);
    let cities = means.column_as_string("city")?;
    let months = means.column_as_i64("month")?;
    let values = means.column_as_f64("avg_temp")?;

    let entries = cities
        .into_iter()
        .zip(months)
        .zip(values)
        .enumerate()
        .map(|(row, ((city, month), value))| {
            let city = city.ok_or_else(|| PlotError::Validation(format!("group {}: missing city", row)))?;
            let month = crate::data::records::checked_month(month, row)?;
            Ok((city, month, value))
        })
        .collect::<Result<Vec<_>>>()?;

    MonthMatrix::pivot(entries)
}

/// Render `weather_heatmap.png` into `out_dir`
pub fn render(records: &[WeatherRecord], out_dir: &Path, dpi: u32) -> Result<PathBuf> {
    let matrix = monthly_mean_matrix(records)?;
    let (lo, hi) = matrix.value_range().ok_or(PlotError::EmptyDataset)?;
    let (lo, hi) = if hi - lo < EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    };

    tracing::info!(
        cities = matrix.n_rows(),
        months = matrix.n_cols(),
        blank = matrix.blank_cells(),
        "weather heatmap matrix"
    );

    let labels = month_numbers(&matrix.months);
    let style = HeatmapStyle {
        title: "Average monthly temperature by city",
        x_desc: "Month",
        y_desc: "City",
        colorbar_desc: "Average temperature",
        scale: ColorScale::coolwarm(lo, hi),
        annotate: Some(1),
    };

    let figure = Figure::new(WEATHER_HEATMAP_SIZE, dpi);
    figure.save(&out_dir.join(WEATHER_HEATMAP_PNG), |root| {
        draw_heatmap(root, &figure, &matrix, &labels, &style)
    })
}
