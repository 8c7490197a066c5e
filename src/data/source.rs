use crate::error::{PlotError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// CSV reading options that vary between the source tables
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvOptions {
    /// Raw lines to skip before the header row
    pub skip_rows: usize,
}

/// DataSource wraps a materialized Polars DataFrame loaded from a CSV file
pub struct DataSource {
    /// Materialized DataFrame
    materialized: DataFrame,
    /// Original file path
    file_path: Option<PathBuf>,
}

impl DataSource {
    /// Load a CSV file with the default options
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, CsvOptions::default())
    }

    /// Load a CSV file.
    ///
    /// The schema is inferred from every row so that a stray token late in a
    /// numeric column (`T`, `***`) widens the column to text instead of
    /// failing the parse. Numeric coercion happens in the column accessors.
    pub fn load_with(path: &Path, options: CsvOptions) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_lowercase();
        if extension != "csv" {
            return Err(PlotError::UnsupportedFormat { extension });
        }

        // Surface a missing file as an I/O error rather than a deferred scan error
        std::fs::metadata(path)?;

        let materialized = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_skip_rows(options.skip_rows)
            .with_infer_schema_length(None)
            .finish()?
            .collect()?;

        tracing::debug!(
            path = %path.display(),
            rows = materialized.height(),
            columns = materialized.width(),
            "loaded csv"
        );

        Ok(Self {
            materialized,
            file_path: Some(path.to_path_buf()),
        })
    }

    /// Create DataSource from an already-built DataFrame
    pub fn from_dataframe(df: DataFrame, path: Option<PathBuf>) -> Self {
        Self {
            materialized: df,
            file_path: path,
        }
    }

    /// Check whether a column exists
    pub fn has_column(&self, col: &str) -> bool {
        self.materialized.column(col).is_ok()
    }

    /// Return the first of `candidates` that exists in the frame
    pub fn first_present<'a>(&self, candidates: &[&'a str]) -> Result<&'a str> {
        candidates
            .iter()
            .copied()
            .find(|c| self.has_column(c))
            .ok_or_else(|| PlotError::ColumnNotFound {
                column: candidates.join("|"),
            })
    }

    /// Get the file path
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Get column values as a Series
    pub fn column_values(&self, col: &str) -> Result<Series> {
        self.materialized
            .column(col)
            .map(|c| c.as_materialized_series().clone())
            .map_err(|_| {
                tracing::debug!(column = col, file = ?self.file_path(), "column lookup failed");
                PlotError::ColumnNotFound {
                    column: col.to_string(),
                }
            })
    }

    /// Get a column's values as floats.
    /// Nulls, NaN and non-numeric text become `None`.
    pub fn column_as_f64(&self, col: &str) -> Result<Vec<Option<f64>>> {
        self.column_as_f64_with_missing(col, &[])
    }

    /// Like [`column_as_f64`](Self::column_as_f64), additionally treating any
    /// of `missing` as "no data".
    pub fn column_as_f64_with_missing(
        &self,
        col: &str,
        missing: &[&str],
    ) -> Result<Vec<Option<f64>>> {
        let series = self.column_values(col)?;

        if matches!(series.dtype(), DataType::String) {
            let ca = series.str()?;
            return Ok(ca
                .into_iter()
                .map(|opt| opt.and_then(|s| parse_lenient(s, missing)))
                .collect());
        }

        let cast = series.cast(&DataType::Float64)?;
        Ok(cast
            .f64()?
            .into_iter()
            .map(|opt| opt.filter(|v| v.is_finite()))
            .collect())
    }

    /// Get a column's values as integers.
    /// Text or floats that are not whole numbers become `None`.
    pub fn column_as_i64(&self, col: &str) -> Result<Vec<Option<i64>>> {
        let series = self.column_values(col)?;

        if matches!(series.dtype(), DataType::String) {
            let ca = series.str()?;
            return Ok(ca
                .into_iter()
                .map(|opt| {
                    opt.and_then(|s| parse_lenient(s, &[]))
                        .filter(|v| v.fract() == 0.0)
                        .map(|v| v as i64)
                })
                .collect());
        }

        if series.dtype().is_float() {
            let cast = series.cast(&DataType::Float64)?;
            return Ok(cast
                .f64()?
                .into_iter()
                .map(|opt| opt.filter(|v| v.is_finite() && v.fract() == 0.0).map(|v| v as i64))
                .collect());
        }

        let cast = series.cast(&DataType::Int64)?;
        Ok(cast.i64()?.into_iter().collect())
    }

    /// Get a column's values as strings
    pub fn column_as_string(&self, col: &str) -> Result<Vec<Option<String>>> {
        let series = self.column_values(col)?;
        let cast = if matches!(series.dtype(), DataType::String) {
            series
        } else {
            series.cast(&DataType::String)?
        };
        Ok(cast
            .str()?
            .into_iter()
            .map(|opt| opt.map(str::to_owned))
            .collect())
    }
}

/// Parse a numeric cell, mapping blanks, markers and junk to `None`
fn parse_lenient(raw: &str, missing: &[&str]) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || missing.contains(&s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
