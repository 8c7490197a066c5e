//! Typed rows for the three source tables
//!
//! Each loader reads the columns it needs from a [`DataSource`] and validates
//! the categorical keys. Numeric measurements are coerced leniently: anything
//! that is not a number becomes `None`.

use super::source::DataSource;
use crate::constants::datasets::{MISSING_MARKER, MONTH_NAMES};
use crate::error::{PlotError, Result};

/// One daily weather observation
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub city: String,
    pub month: u32,
    pub avg_temp: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub precip: Option<f64>,
}

/// One year of monthly global temperature anomalies, January first
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalAnomalyRecord {
    pub year: i32,
    pub anomalies: [Option<f64>; 12],
}

/// One monthly summary for a Minnesota site
#[derive(Debug, Clone, PartialEq)]
pub struct MinnesotaRecord {
    pub site: String,
    pub year: i32,
    pub month: u32,
    pub precip: Option<f64>,
}

/// Validate a month number, reporting the offending row
pub fn checked_month(value: Option<i64>, row: usize) -> Result<u32> {
    match value {
        Some(m @ 1..=12) => Ok(m as u32),
        Some(m) => Err(PlotError::Validation(format!(
            "row {}: month {} outside 1..=12",
            row, m
        ))),
        None => Err(PlotError::Validation(format!("row {}: missing month", row))),
    }
}

fn checked_year(value: Option<i64>, row: usize) -> Result<i32> {
    value
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| PlotError::Validation(format!("row {}: missing or invalid year", row)))
}

fn required_label(value: Option<String>, column: &str, row: usize) -> Result<String> {
    value
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PlotError::Validation(format!("row {}: missing {}", row, column)))
}

/// Read weather rows (`city`, `month`, `avg_temp`, `avg_humidity`, `precip`)
pub fn weather_records(ds: &DataSource) -> Result<Vec<WeatherRecord>> {
    let cities = ds.column_as_string("city")?;
    let months = ds.column_as_i64("month")?;
    let temps = ds.column_as_f64("avg_temp")?;
    let humidity = ds.column_as_f64("avg_humidity")?;
    let precip = ds.column_as_f64("precip")?;

    cities
        .into_iter()
        .zip(months)
        .zip(temps.into_iter().zip(humidity).zip(precip))
        .enumerate()
        .map(|(row, ((city, month), ((avg_temp, avg_humidity), precip)))| {
            Ok(WeatherRecord {
                city: required_label(city, "city", row)?,
                month: checked_month(month, row)?,
                avg_temp,
                avg_humidity,
                precip,
            })
        })
        .collect()
}

/// Read the wide GISTEMP table: a `Year` column plus one column per month.
/// Extra summary columns (`J-D`, `DJF`, ...) are ignored.
pub fn global_anomaly_records(ds: &DataSource) -> Result<Vec<GlobalAnomalyRecord>> {
    let years = ds.column_as_i64("Year")?;
    let columns = MONTH_NAMES
        .iter()
        .map(|name| ds.column_as_f64_with_missing(name, &[MISSING_MARKER]))
        .collect::<Result<Vec<_>>>()?;

    years
        .into_iter()
        .enumerate()
        .map(|(row, year)| {
            let mut anomalies = [None; 12];
            for (slot, column) in anomalies.iter_mut().zip(&columns) {
                *slot = column[row];
            }
            Ok(GlobalAnomalyRecord {
                year: checked_year(year, row)?,
                anomalies,
            })
        })
        .collect()
}

/// Read Minnesota rows (`site`, `year`, `mo` or `month`, `precip`)
pub fn minnesota_records(ds: &DataSource) -> Result<Vec<MinnesotaRecord>> {
    let month_column = ds.first_present(&["mo", "month"])?;

    let sites = ds.column_as_string("site")?;
    let years = ds.column_as_i64("year")?;
    let months = ds.column_as_i64(month_column)?;
    let precip = ds.column_as_f64("precip")?;

    sites
        .into_iter()
        .zip(years)
        .zip(months.into_iter().zip(precip))
        .enumerate()
        .map(|(row, ((site, year), (month, precip)))| {
            Ok(MinnesotaRecord {
                site: required_label(site, "site", row)?,
                year: checked_year(year, row)?,
                month: checked_month(month, row)?,
                precip,
            })
        })
        .collect()
}
