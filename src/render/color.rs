//! Color scales and categorical palettes

use plotters::style::RGBColor;

/// Diverging blue–white–red stops (position in [0, 1], color)
const COOLWARM: [(f64, (u8, u8, u8)); 5] = [
    (0.00, (59, 76, 192)),
    (0.25, (144, 178, 254)),
    (0.50, (221, 221, 221)),
    (0.75, (245, 156, 125)),
    (1.00, (180, 4, 38)),
];

/// Ten-color categorical palette
pub const CATEGORICAL: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Color for the i-th category, cycling the palette
pub fn categorical(index: usize) -> RGBColor {
    CATEGORICAL[index % CATEGORICAL.len()]
}

/// Linear mapping from a value range onto the diverging ramp.
/// Values outside the range are clamped to the end colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub vmin: f64,
    pub vmax: f64,
}

impl ColorScale {
    pub fn coolwarm(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Position of `value` on the ramp, in [0, 1]
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span.abs() < crate::constants::numeric::EPSILON {
            return 0.5;
        }
        ((value - self.vmin) / span).clamp(0.0, 1.0)
    }

    pub fn color(&self, value: f64) -> RGBColor {
        ramp(self.normalize(value))
    }
}

/// Interpolate the diverging ramp at `t` in [0, 1]
fn ramp(t: f64) -> RGBColor {
    let upper = COOLWARM
        .iter()
        .position(|(pos, _)| *pos >= t)
        .unwrap_or(COOLWARM.len() - 1)
        .max(1);
    let (p0, c0) = COOLWARM[upper - 1];
    let (p1, c1) = COOLWARM[upper];
    let f = ((t - p0) / (p1 - p0)).clamp(0.0, 1.0);

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    RGBColor(lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2))
}

/// Black or white, whichever reads better on `background`
pub fn text_color_on(background: RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = background;
    let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luminance > 140.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}
