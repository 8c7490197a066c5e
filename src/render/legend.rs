//! Legends drawn in a side panel next to the plot area

use super::{Canvas, Figure};
use crate::constants::figure::{LABEL_FONT_PT, TICK_FONT_PT};
use crate::error::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Marker drawn beside a legend label
#[derive(Debug, Clone, Copy)]
pub enum Swatch {
    /// Filled circle with a radius in pixels
    Marker { color: RGBColor, radius: u32 },
    /// Short line segment with a stroke width in pixels
    Line { color: RGBColor, width: u32 },
}

/// A titled block of legend entries
#[derive(Debug, Clone)]
pub struct LegendGroup {
    pub title: String,
    pub entries: Vec<(Swatch, String)>,
}

impl LegendGroup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, swatch: Swatch, label: impl Into<String>) -> Self {
        self.entries.push((swatch, label.into()));
        self
    }
}

/// Stack `groups` top to bottom in `area`, starting `top` pixels down
pub fn draw_legend(area: &Canvas<'_>, figure: &Figure, groups: &[LegendGroup], top: i32) -> Result<()> {
    let title_font = figure.font(LABEL_FONT_PT);
    let label_font = figure.font(TICK_FONT_PT);
    let left_aligned = Pos::new(HPos::Left, VPos::Center);

    let swatch_width = figure.px_i(18.0);
    let gap = figure.px_i(6.0);
    let line_height = figure.px_i(TICK_FONT_PT * 1.8);
    let x0 = figure.px_i(6.0);

    let mut y = top;
    for group in groups {
        y += line_height / 2;
        area.draw(&Text::new(
            group.title.clone(),
            (x0, y),
            title_font.color(&BLACK).pos(left_aligned),
        ))?;
        y += line_height;

        for (swatch, label) in &group.entries {
            let row_height = match swatch {
                Swatch::Marker { radius, .. } => line_height.max(*radius as i32 * 2 + gap),
                Swatch::Line { .. } => line_height,
            };
            let cy = y + row_height / 2 - line_height / 2;
            let cx = x0 + swatch_width / 2;

            match *swatch {
                Swatch::Marker { color, radius } => {
                    area.draw(&Circle::new((cx, cy), radius, color.mix(0.8).filled()))?;
                    area.draw(&Circle::new((cx, cy), radius, BLACK.stroke_width(1)))?;
                }
                Swatch::Line { color, width } => {
                    area.draw(&PathElement::new(
                        vec![(x0, cy), (x0 + swatch_width, cy)],
                        color.stroke_width(width),
                    ))?;
                }
            }

            area.draw(&Text::new(
                label.clone(),
                (x0 + swatch_width + gap, cy),
                label_font.color(&BLACK).pos(left_aligned),
            ))?;
            y += row_height;
        }
        y += gap * 2;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_builder_keeps_order() {
        let group = LegendGroup::new("City")
            .entry(Swatch::Marker { color: RED, radius: 4 }, "Auckland")
            .entry(Swatch::Marker { color: BLUE, radius: 4 }, "Beijing");
        let labels: Vec<&str> = group.entries.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(group.title, "City");
        assert_eq!(labels, vec!["Auckland", "Beijing"]);
    }

    #[test]
    fn test_empty_legend_draws_nothing() {
        let figure = Figure::new((1.0, 1.0), 40);
        let mut buffer = vec![255u8; 40 * 40 * 3];
        {
            let area = BitMapBackend::with_buffer(&mut buffer, (40, 40)).into_drawing_area();
            draw_legend(&area, &figure, &[], 0).unwrap();
            area.present().unwrap();
        }
        assert!(buffer.iter().all(|&b| b == 255));
    }
}
