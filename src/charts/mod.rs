//! The four chart renderers
//!
//! Each renderer takes its records plus the output directory and DPI, and
//! returns the path of the PNG it wrote.

pub mod global_anomaly;
pub mod minnesota_line;
pub mod weather_heatmap;
pub mod weather_scatter;

use crate::constants::datasets::MONTH_NAMES;

/// Month numbers as axis labels ("1".."12")
pub fn month_numbers(months: &[u32]) -> Vec<String> {
    months.iter().map(u32::to_string).collect()
}

/// Month abbreviations as axis labels ("Jan".."Dec")
pub fn month_abbreviations(months: &[u32]) -> Vec<String> {
    months
        .iter()
        .map(|&m| {
            MONTH_NAMES
                .get(m.wrapping_sub(1) as usize)
                .map(|s| s.to_string())
                .unwrap_or_else(|| m.to_string())
        })
        .collect()
}
