//! Monthly precipitation by Minnesota site over time

use crate::constants::figure::{LABEL_FONT_PT, MINNESOTA_LINE_SIZE, TICK_FONT_PT, TITLE_FONT_PT};
use crate::constants::paths::MINNESOTA_LINE_PNG;
use crate::data::MinnesotaRecord;
use crate::error::{PlotError, Result};
use crate::render::color::{CATEGORICAL, categorical};
use crate::render::legend::{LegendGroup, Swatch, draw_legend};
use crate::render::{Figure, padded_range};
use chrono::{Duration, NaiveDate};
use plotters::coord::types::RangedDate;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// First calendar day of `month` in `year`
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| PlotError::Validation(format!("no such month: {}-{:02}", year, month)))
}

/// Precipitation over time for one site
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSeries {
    pub site: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// One series per site in order of first appearance, points sorted by date.
///
/// Repeated dates for a site are averaged; records without precipitation
/// are left out.
pub fn site_series(records: &[MinnesotaRecord]) -> Result<Vec<SiteSeries>> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: BTreeMap<&str, BTreeMap<NaiveDate, (f64, usize)>> = BTreeMap::new();

    for record in records {
        let date = first_of_month(record.year, record.month)?;
        if !order.contains(&record.site.as_str()) {
            order.push(&record.site);
        }
        let Some(precip) = record.precip else {
            continue;
        };
        let slot = sums
            .entry(&record.site)
            .or_default()
            .entry(date)
            .or_insert((0.0, 0));
        slot.0 += precip;
        slot.1 += 1;
    }

    Ok(order
        .into_iter()
        .map(|site| SiteSeries {
            site: site.to_string(),
            points: sums
                .remove(site)
                .unwrap_or_default()
                .into_iter()
                .map(|(date, (sum, n))| (date, sum / n as f64))
                .collect(),
        })
        .collect())
}

/// Line identity for a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// Style of the `index`-th series. Colors cycle the categorical palette and
/// every full cycle draws wider, so no two indices share a style.
pub fn series_style(index: usize, base_width: u32) -> SeriesStyle {
    let base = base_width.max(1);
    let cycle = (index / CATEGORICAL.len()) as u32;
    SeriesStyle {
        color: categorical(index),
        stroke_width: base + cycle * (base / 2).max(1),
    }
}

/// Render `minnesota_precip_line.png` into `out_dir`
pub fn render(records: &[MinnesotaRecord], out_dir: &Path, dpi: u32) -> Result<PathBuf> {
    let series = site_series(records)?;
    let all_points = || series.iter().flat_map(|s| s.points.iter());

    let first = all_points().map(|(d, _)| *d).min().ok_or(PlotError::EmptyDataset)?;
    let last = all_points().map(|(d, _)| *d).max().ok_or(PlotError::EmptyDataset)?;
    let (lo, hi) = all_points().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| {
        (lo.min(*v), hi.max(*v))
    });
    let y_range = padded_range(lo.min(0.0), hi, 0.05);
    let x_range = (first - Duration::days(15))..(last + Duration::days(15));

    tracing::info!(
        sites = series.len(),
        from = %first,
        to = %last,
        "minnesota precipitation series"
    );

    let figure = Figure::new(MINNESOTA_LINE_SIZE, dpi);
    let base_width = figure.px(1.5).round() as u32;

    figure.save(&out_dir.join(MINNESOTA_LINE_PNG), |root| {
        let (width, _) = root.dim_in_pixel();
        let titled = root.titled(
            "Monthly precipitation by Minnesota site",
            figure.font(TITLE_FONT_PT),
        )?;
        let (plot_area, legend_area) = titled.split_horizontally(width * 84 / 100);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(figure.px_i(6.0))
            .x_label_area_size(figure.px_i(30.0))
            .y_label_area_size(figure.px_i(36.0))
            .build_cartesian_2d(RangedDate::from(x_range), y_range.0..y_range.1)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Precipitation (inches)")
            .x_labels(12)
            .x_label_formatter(&|d: &NaiveDate| d.format("%Y").to_string())
            .light_line_style(BLACK.mix(0.08))
            .label_style(figure.font(TICK_FONT_PT))
            .axis_desc_style(figure.font(LABEL_FONT_PT))
            .draw()?;

        let mut legend = LegendGroup::new("Site");
        for (i, s) in series.iter().enumerate() {
            let style = series_style(i, base_width);
            chart.draw_series(LineSeries::new(
                s.points.iter().copied(),
                style.color.stroke_width(style.stroke_width),
            ))?;
            legend = legend.entry(
                Swatch::Line {
                    color: style.color,
                    width: style.stroke_width,
                },
                s.site.as_str(),
            );
        }

        draw_legend(&legend_area, &figure, &[legend], figure.px_i(10.0))?;
        Ok(())
    })
}
