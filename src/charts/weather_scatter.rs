//! Daily temperature vs humidity, sized by precipitation and colored by city

use crate::constants::figure::{LABEL_FONT_PT, TICK_FONT_PT, TITLE_FONT_PT, WEATHER_SCATTER_SIZE};
use crate::constants::paths::WEATHER_SCATTER_PNG;
use crate::constants::scatter::{LEGEND_STEPS, MARKER_ALPHA, SIZE_QUANTILE, SIZE_RANGE};
use crate::data::WeatherRecord;
use crate::data::stats::{calculate_stats_vec, quantile_linear};
use crate::error::{PlotError, Result};
use crate::render::color::categorical;
use crate::render::legend::{LegendGroup, Swatch, draw_legend};
use crate::render::{Figure, padded_range};
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

/// Precipitation per record with missing readings drawn as zero
pub fn fill_missing_precip(records: &[WeatherRecord]) -> Vec<f64> {
    records.iter().map(|r| r.precip.unwrap_or(0.0)).collect()
}

/// Maps precipitation onto marker area (points squared).
///
/// Values in [0, cutoff] interpolate linearly across the size range; values
/// above the cutoff get the largest marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecipSizeScale {
    pub cutoff: f64,
    pub min_size: f64,
    pub max_size: f64,
}

impl PrecipSizeScale {
    /// Scale whose cutoff is the 95th percentile of `values`
    pub fn from_values(values: &[f64]) -> Self {
        let cutoff = quantile_linear(values, SIZE_QUANTILE).unwrap_or(1.0);
        Self::with_cutoff(cutoff)
    }

    pub fn with_cutoff(cutoff: f64) -> Self {
        Self {
            cutoff,
            min_size: SIZE_RANGE.0,
            max_size: SIZE_RANGE.1,
        }
    }

    /// Marker area for a precipitation value
    pub fn size_for(&self, value: f64) -> f64 {
        if self.cutoff <= 0.0 {
            return if value > 0.0 { self.max_size } else { self.min_size };
        }
        let t = (value / self.cutoff).clamp(0.0, 1.0);
        self.min_size + t * (self.max_size - self.min_size)
    }

    /// Evenly spaced legend values over [0, cutoff], rounded to two decimals
    pub fn reference_values(&self) -> Vec<f64> {
        let last = (LEGEND_STEPS - 1) as f64;
        let mut values: Vec<f64> = (0..LEGEND_STEPS)
            .map(|i| (self.cutoff * i as f64 / last * 100.0).round() / 100.0)
            .collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values
    }
}

/// Marker radius in pixels for a marker area given in points squared
pub fn marker_radius(figure: &Figure, size: f64) -> u32 {
    figure.px((size / PI).sqrt()).round().max(1.0) as u32
}

/// One color per city, assigned in order of first appearance
pub fn city_palette(records: &[WeatherRecord]) -> Vec<(String, RGBColor)> {
    let mut cities: Vec<String> = Vec::new();
    for record in records {
        if !cities.contains(&record.city) {
            cities.push(record.city.clone());
        }
    }
    cities
        .into_iter()
        .enumerate()
        .map(|(i, city)| (city, categorical(i)))
        .collect()
}

/// A positioned marker ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub humidity: f64,
    pub temp: f64,
    pub size: f64,
    pub color: RGBColor,
}

/// Records with both coordinates present, with size and color resolved
pub fn scatter_points(
    records: &[WeatherRecord],
    precip: &[f64],
    scale: &PrecipSizeScale,
    palette: &[(String, RGBColor)],
) -> Vec<ScatterPoint> {
    records
        .iter()
        .zip(precip)
        .filter_map(|(record, &p)| {
            let humidity = record.avg_humidity?;
            let temp = record.avg_temp?;
            let color = palette
                .iter()
                .find(|(city, _)| *city == record.city)
                .map(|(_, c)| *c)?;
            Some(ScatterPoint {
                humidity,
                temp,
                size: scale.size_for(p),
                color,
            })
        })
        .collect()
}

/// Render `weather_scatter.png` into `out_dir`
pub fn render(records: &[WeatherRecord], out_dir: &Path, dpi: u32) -> Result<PathBuf> {
    let precip = fill_missing_precip(records);
    let scale = PrecipSizeScale::from_values(&precip);
    let palette = city_palette(records);
    let points = scatter_points(records, &precip, &scale, &palette);
    if points.is_empty() {
        return Err(PlotError::EmptyDataset);
    }

    let summary = calculate_stats_vec(&precip);
    tracing::info!(
        points = points.len(),
        cities = palette.len(),
        p95 = scale.cutoff,
        precip_mean = summary.mean,
        precip_max = summary.max,
        "weather scatter"
    );

    let (x_min, x_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.humidity), hi.max(p.humidity))
        });
    let (y_min, y_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.temp), hi.max(p.temp))
        });
    let x_range = padded_range(x_min, x_max, 0.05);
    let y_range = padded_range(y_min, y_max, 0.05);

    let figure = Figure::new(WEATHER_SCATTER_SIZE, dpi);
    figure.save(&out_dir.join(WEATHER_SCATTER_PNG), |root| {
        let (width, _) = root.dim_in_pixel();
        let titled = root.titled(
            "Daily weather: temperature vs humidity with precipitation (size)",
            figure.font(TITLE_FONT_PT),
        )?;
        let (plot_area, legend_area) = titled.split_horizontally(width * 78 / 100);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(figure.px_i(6.0))
            .x_label_area_size(figure.px_i(30.0))
            .y_label_area_size(figure.px_i(36.0))
            .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

        chart
            .configure_mesh()
            .x_desc("Average relative humidity (%)")
            .y_desc("Average temperature (°F)")
            .light_line_style(BLACK.mix(0.08))
            .label_style(figure.font(TICK_FONT_PT))
            .axis_desc_style(figure.font(LABEL_FONT_PT))
            .draw()?;

        chart.draw_series(points.iter().map(|p| {
            Circle::new(
                (p.humidity, p.temp),
                marker_radius(&figure, p.size),
                p.color.mix(MARKER_ALPHA).filled(),
            )
        }))?;

        let city_radius = figure.px_i(4.0) as u32;
        let cities = palette.iter().fold(LegendGroup::new("City"), |group, (city, color)| {
            group.entry(
                Swatch::Marker {
                    color: *color,
                    radius: city_radius,
                },
                city.as_str(),
            )
        });
        let sizes = scale
            .reference_values()
            .into_iter()
            .fold(LegendGroup::new("Precipitation"), |group, v| {
                group.entry(
                    Swatch::Marker {
                        color: RGBColor(128, 128, 128),
                        radius: marker_radius(&figure, scale.size_for(v)),
                    },
                    format!("{}", v),
                )
            });

        draw_legend(&legend_area, &figure, &[cities, sizes], figure.px_i(10.0))?;
        Ok(())
    })
}
