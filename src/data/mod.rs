pub mod records;
pub mod reshape;
pub mod source;
pub mod stats;

// Re-export key types for convenience
pub use records::{GlobalAnomalyRecord, MinnesotaRecord, WeatherRecord};
pub use reshape::MonthMatrix;
pub use source::{CsvOptions, DataSource};
