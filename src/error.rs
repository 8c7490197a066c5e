//! Error types for climate-charts
//!
//! Every failure in the pipeline is fatal, so a single enum covers loading,
//! reshaping, drawing and encoding.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Main error type for chart generation
#[derive(Error, Debug)]
pub enum PlotError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Column not found in data
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Data validation error
    #[error("Data validation failed: {0}")]
    Validation(String),

    /// Two values landed in the same matrix cell while pivoting
    #[error("Duplicate cell while pivoting: row '{row}', month {month}")]
    DuplicateCell { row: String, month: u32 },

    /// Empty dataset error
    #[error("Dataset is empty or has no rows")]
    EmptyDataset,

    /// Drawing backend error
    #[error("Render error: {0}")]
    Render(String),

    /// PNG encoding error
    #[error("Encoding error: {0}")]
    Encode(String),
}

/// Result type alias for chart operations
pub type Result<T> = std::result::Result<T, PlotError>;

impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Render(err.to_string())
    }
}

impl PlotError {
    /// Get a user-friendly error message suitable for the console
    pub fn user_message(&self) -> String {
        match self {
            PlotError::FileIo(e) => format!("File error: {}", e),
            PlotError::Polars(e) => format!("Data error: {}", e),
            PlotError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            PlotError::ColumnNotFound { column } => {
                format!("Column '{}' not found", column)
            }
            PlotError::Validation(msg) => format!("Validation error: {}", msg),
            PlotError::DuplicateCell { row, month } => {
                format!("Duplicate value for '{}' in month {}", row, month)
            }
            PlotError::EmptyDataset => "Dataset is empty".to_string(),
            PlotError::Render(msg) => format!("Render error: {}", msg),
            PlotError::Encode(msg) => format!("Encoding error: {}", msg),
        }
    }

    /// Get a short title for the error
    pub fn title(&self) -> &'static str {
        match self {
            PlotError::FileIo(_) => "File Error",
            PlotError::Polars(_) => "Data Error",
            PlotError::UnsupportedFormat { .. } => "Unsupported Format",
            PlotError::ColumnNotFound { .. } => "Column Not Found",
            PlotError::Validation(_) => "Validation Error",
            PlotError::DuplicateCell { .. } => "Data Shape Error",
            PlotError::EmptyDataset => "Empty Dataset",
            PlotError::Render(_) => "Render Error",
            PlotError::Encode(_) => "Encoding Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PlotError::ColumnNotFound {
            column: "avg_temp".to_string(),
        };
        assert_eq!(err.user_message(), "Column 'avg_temp' not found");
        assert_eq!(err.title(), "Column Not Found");

        let err = PlotError::DuplicateCell {
            row: "Auckland".to_string(),
            month: 3,
        };
        assert_eq!(
            err.user_message(),
            "Duplicate value for 'Auckland' in month 3"
        );
        assert_eq!(err.title(), "Data Shape Error");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let plot_err: PlotError = io_err.into();
        assert!(matches!(plot_err, PlotError::FileIo(_)));
    }
}
