//! Application-wide constants and default values
//!
//! Every fixed visual and I/O parameter of the chart pipeline lives here.

/// Input and output locations relative to the repository root
pub mod paths {
    pub const DATA_DIR: &str = "data";
    pub const OUTPUT_DIR: &str = "output";

    pub const WEATHER_CSV: &str = "weather_data.csv";
    pub const GLOBAL_TEMP_CSV: &str = "global_temp.csv";
    pub const MINNESOTA_CSV: &str = "minnesota_weather.csv";

    pub const WEATHER_HEATMAP_PNG: &str = "weather_heatmap.png";
    pub const WEATHER_SCATTER_PNG: &str = "weather_scatter.png";
    pub const GLOBAL_HEATMAP_PNG: &str = "global_temp_heatmap.png";
    pub const MINNESOTA_LINE_PNG: &str = "minnesota_precip_line.png";
}

/// Dataset parsing constants
pub mod datasets {
    /// Title line preceding the header row in the GISTEMP export
    pub const GLOBAL_TEMP_SKIP_ROWS: usize = 1;

    /// Marker GISTEMP uses for months without data
    pub const MISSING_MARKER: &str = "***";

    /// Calendar month abbreviations, January first
    pub const MONTH_NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
}

/// Output raster settings
pub mod figure {
    /// Output resolution in dots per inch
    pub const DPI: u32 = 300;

    /// Points per inch (font sizes are specified in points)
    pub const POINTS_PER_INCH: f64 = 72.0;

    /// Figure sizes in inches (width, height)
    pub const WEATHER_HEATMAP_SIZE: (f64, f64) = (10.0, 4.0);
    pub const WEATHER_SCATTER_SIZE: (f64, f64) = (9.0, 6.0);
    pub const GLOBAL_HEATMAP_SIZE: (f64, f64) = (10.0, 8.0);
    pub const MINNESOTA_LINE_SIZE: (f64, f64) = (10.0, 6.0);

    /// Font sizes in points
    pub const TITLE_FONT_PT: f64 = 12.0;
    pub const LABEL_FONT_PT: f64 = 10.0;
    pub const TICK_FONT_PT: f64 = 8.0;
    pub const ANNOTATION_FONT_PT: f64 = 7.0;
}

/// Scatter plot parameters
pub mod scatter {
    /// Marker area range in points squared
    pub const SIZE_RANGE: (f64, f64) = (20.0, 300.0);

    /// Quantile used as the upper bound of the size scale
    pub const SIZE_QUANTILE: f64 = 0.95;

    /// Number of reference entries in the precipitation legend
    pub const LEGEND_STEPS: usize = 4;

    /// Marker opacity
    pub const MARKER_ALPHA: f64 = 0.65;
}

/// Heatmap parameters
pub mod heatmap {
    /// Fixed color bounds for the anomaly heatmap (°C)
    pub const ANOMALY_BOUNDS: (f64, f64) = (-1.5, 1.5);

    /// Number of tick labels on the colorbar
    pub const COLORBAR_TICKS: usize = 7;
}

/// Numeric precision constants
pub mod numeric {
    /// Floating point comparison epsilon
    pub const EPSILON: f64 = 1e-12;
}
