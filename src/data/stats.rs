use polars::prelude::*;

/// Statistics results
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub mean: f64,
    pub max: f64,
}

/// Calculate summary statistics from a Series using polars
pub fn calculate_stats(series: &Series) -> Stats {
    if series.is_empty() {
        return Stats::default();
    }

    // Cast to f64 for numeric operations
    let series_f64 = match series.cast(&DataType::Float64) {
        Ok(s) => s,
        Err(_) => return Stats::default(),
    };

    let chunked = match series_f64.f64() {
        Ok(c) => c,
        Err(_) => return Stats::default(),
    };

    Stats {
        mean: chunked.mean().unwrap_or(0.0),
        max: chunked.max().unwrap_or(0.0),
    }
}

/// Calculate summary statistics from a slice
pub fn calculate_stats_vec(values: &[f64]) -> Stats {
    let series = Series::new("values".into(), values);
    calculate_stats(&series)
}

/// Quantile with linear interpolation between the two closest ranks.
///
/// `q` is clamped to [0, 1]. NaNs are ignored; returns `None` when no
/// values remain.
pub fn quantile_linear(values: &[f64], q: f64) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    let series = Series::new("values".into(), finite);

    series
        .f64()
        .ok()?
        .quantile(q.clamp(0.0, 1.0), QuantileMethod::Linear)
        .ok()
        .flatten()
}
