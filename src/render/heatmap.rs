//! Matrix heatmap with a colorbar

use super::color::{ColorScale, text_color_on};
use super::{Canvas, Figure, category_label};
use crate::constants::figure::{ANNOTATION_FONT_PT, LABEL_FONT_PT, TICK_FONT_PT, TITLE_FONT_PT};
use crate::constants::heatmap::COLORBAR_TICKS;
use crate::data::MonthMatrix;
use crate::error::{PlotError, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Number of bands used to draw the colorbar gradient
const COLORBAR_STEPS: usize = 256;

/// Fixed visual parameters of one heatmap
pub struct HeatmapStyle<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub colorbar_desc: &'a str,
    pub scale: ColorScale,
    /// Decimal places for per-cell annotation, `None` for no annotation
    pub annotate: Option<usize>,
}

/// Draw `matrix` with row 0 at the top. Blank cells stay background white.
pub fn draw_heatmap(
    root: &Canvas<'_>,
    figure: &Figure,
    matrix: &MonthMatrix,
    column_labels: &[String],
    style: &HeatmapStyle<'_>,
) -> Result<()> {
    if matrix.n_rows() == 0 || matrix.n_cols() == 0 {
        return Err(PlotError::EmptyDataset);
    }

    let (width, _) = root.dim_in_pixel();
    let titled = root.titled(style.title, figure.font(TITLE_FONT_PT))?;
    let (plot_area, bar_area) = titled.split_horizontally(width * 85 / 100);

    let n_rows = matrix.n_rows();
    let n_cols = matrix.n_cols();
    // Flip so the first row sits at the top of the plot
    let y_of = |row: usize| (n_rows - 1 - row) as f64;
    let row_labels: Vec<String> = matrix.row_labels.iter().rev().cloned().collect();

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(figure.px_i(4.0))
        .x_label_area_size(figure.px_i(30.0))
        .y_label_area_size(figure.px_i(50.0))
        .build_cartesian_2d(-0.5..(n_cols as f64 - 0.5), -0.5..(n_rows as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n_cols.max(1))
        .y_labels(n_rows.clamp(1, 30))
        .x_label_formatter(&|x| category_label(column_labels, *x))
        .y_label_formatter(&|y| category_label(&row_labels, *y))
        .x_desc(style.x_desc)
        .y_desc(style.y_desc)
        .label_style(figure.font(TICK_FONT_PT))
        .axis_desc_style(figure.font(LABEL_FONT_PT))
        .draw()?;

    chart.draw_series(matrix.present_cells().map(|(r, c, v)| {
        let (x, y) = (c as f64, y_of(r));
        Rectangle::new(
            [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
            style.scale.color(v).filled(),
        )
    }))?;

    if let Some(decimals) = style.annotate {
        let font = figure.font(ANNOTATION_FONT_PT);
        let centered = Pos::new(HPos::Center, VPos::Center);
        chart.draw_series(matrix.present_cells().map(|(r, c, v)| {
            let ink = text_color_on(style.scale.color(v));
            Text::new(
                format!("{:.*}", decimals, v),
                (c as f64, y_of(r)),
                font.color(&ink).pos(centered),
            )
        }))?;
    }

    draw_colorbar(&bar_area, figure, &style.scale, style.colorbar_desc)
}

/// Vertical gradient bar with value ticks on the right
pub fn draw_colorbar(
    area: &Canvas<'_>,
    figure: &Figure,
    scale: &ColorScale,
    desc: &str,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .margin_top(figure.px_i(8.0))
        .margin_bottom(figure.px_i(34.0))
        .margin_left(figure.px_i(6.0))
        .margin_right(figure.px_i(4.0))
        .right_y_label_area_size(figure.px_i(40.0))
        .build_cartesian_2d(0.0..1.0, scale.vmin..scale.vmax)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(COLORBAR_TICKS)
        .y_desc(desc)
        .label_style(figure.font(TICK_FONT_PT))
        .axis_desc_style(figure.font(LABEL_FONT_PT))
        .draw()?;

    let step = (scale.vmax - scale.vmin) / COLORBAR_STEPS as f64;
    chart.draw_series((0..COLORBAR_STEPS).map(|i| {
        let lo = scale.vmin + step * i as f64;
        let hi = lo + step;
        Rectangle::new([(0.0, lo), (1.0, hi)], scale.color((lo + hi) / 2.0).filled())
    }))?;

    Ok(())
}
