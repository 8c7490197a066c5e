//! Batch orchestration: load the three tables, render the four charts
//!
//! Every step is fatal on failure. Charts written before a failure stay on
//! disk.

use crate::charts::{global_anomaly, minnesota_line, weather_heatmap, weather_scatter};
use crate::constants::datasets::GLOBAL_TEMP_SKIP_ROWS;
use crate::constants::figure::DPI;
use crate::constants::paths::{
    DATA_DIR, GLOBAL_TEMP_CSV, MINNESOTA_CSV, OUTPUT_DIR, WEATHER_CSV,
};
use crate::data::records::{global_anomaly_records, minnesota_records, weather_records};
use crate::data::{CsvOptions, DataSource, GlobalAnomalyRecord, MinnesotaRecord, WeatherRecord};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Resolved input/output locations and raster resolution
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub dpi: u32,
}

impl PipelineConfig {
    /// `data/` and `output/` under the repository root, at the fixed DPI
    pub fn from_root(root: &Path) -> Self {
        Self {
            data_dir: root.join(DATA_DIR),
            output_dir: root.join(OUTPUT_DIR),
            dpi: DPI,
        }
    }
}

/// Nearest ancestor of `start`, itself included, that holds a `data/` directory
pub fn find_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(DATA_DIR).is_dir())
        .map(Path::to_path_buf)
}

/// Locate the project root at runtime.
///
/// Searches upward from the executable, then from the working directory,
/// and falls back to the working directory itself.
pub fn resolve_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let from_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(find_root));
    Ok(from_exe.or_else(|| find_root(&cwd)).unwrap_or(cwd))
}

/// Create the output directory if it does not exist
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Load `weather_data.csv`
pub fn load_weather(data_dir: &Path) -> Result<Vec<WeatherRecord>> {
    let ds = DataSource::load(&data_dir.join(WEATHER_CSV))?;
    let records = weather_records(&ds)?;
    tracing::info!(rows = records.len(), "loaded weather data");
    Ok(records)
}

/// Load `global_temp.csv`, skipping its title line
pub fn load_global_anomalies(data_dir: &Path) -> Result<Vec<GlobalAnomalyRecord>> {
    let options = CsvOptions {
        skip_rows: GLOBAL_TEMP_SKIP_ROWS,
    };
    let ds = DataSource::load_with(&data_dir.join(GLOBAL_TEMP_CSV), options)?;
    let records = global_anomaly_records(&ds)?;
    tracing::info!(years = records.len(), "loaded global anomalies");
    Ok(records)
}

/// Load `minnesota_weather.csv`
pub fn load_minnesota(data_dir: &Path) -> Result<Vec<MinnesotaRecord>> {
    let ds = DataSource::load(&data_dir.join(MINNESOTA_CSV))?;
    let records = minnesota_records(&ds)?;
    tracing::info!(rows = records.len(), "loaded minnesota data");
    Ok(records)
}

/// Run the whole pipeline, returning the generated paths in render order
pub fn run(config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    ensure_output_dir(&config.output_dir)?;
    let out = config.output_dir.as_path();
    let dpi = config.dpi;
    let mut figures = Vec::with_capacity(4);

    let weather = load_weather(&config.data_dir)?;
    figures.push(crate::timed!("weather_heatmap", weather_heatmap::render(&weather, out, dpi))?);
    figures.push(crate::timed!("weather_scatter", weather_scatter::render(&weather, out, dpi))?);

    let global = load_global_anomalies(&config.data_dir)?;
    figures.push(crate::timed!("global_anomaly", global_anomaly::render(&global, out, dpi))?);

    let minnesota = load_minnesota(&config.data_dir)?;
    figures.push(crate::timed!("minnesota_line", minnesota_line::render(&minnesota, out, dpi))?);

    for path in &figures {
        tracing::info!(path = %path.display(), "generated figure");
    }
    Ok(figures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::paths::{
        GLOBAL_HEATMAP_PNG, MINNESOTA_LINE_PNG, WEATHER_HEATMAP_PNG, WEATHER_SCATTER_PNG,
    };
    use crate::error::PlotError;
    use std::fmt::Write as _;

    fn write_inputs(data_dir: &Path) {
        std::fs::create_dir_all(data_dir).unwrap();

        let mut weather = String::from("city,date,month,avg_temp,avg_humidity,precip\n");
        for (city, base) in [("Auckland", 60.0), ("Chicago", 30.0)] {
            for month in 1..=12 {
                for day in 1..=3 {
                    let precip = if day == 2 { "T".to_string() } else { format!("{:.2}", day as f64 * 0.1) };
                    writeln!(
                        weather,
                        "{},2016-{:02}-{:02},{},{},{},{}",
                        city,
                        month,
                        day,
                        month,
                        base + month as f64,
                        55 + day * 5,
                        precip
                    )
                    .unwrap();
                }
            }
        }
        std::fs::write(data_dir.join(WEATHER_CSV), weather).unwrap();

        let mut global = String::from("Land-Ocean: Global Means\n");
        global.push_str("Year,Jan,Feb,Mar,Apr,May,Jun,Jul,Aug,Sep,Oct,Nov,Dec,J-D,D-N,DJF,MAM,JJA,SON\n");
        global.push_str("1880,-.18,-.24,-.09,-.16,-.10,-.21,-.18,-.10,-.14,-.23,-.22,-.18,-.17,***,***,-.12,-.16,-.19\n");
        global.push_str("1881,-.19,-.14,.03,.05,.06,-.19,***,-.03,-.15,-.22,-.18,-.07,-.09,-.10,-.17,.04,-.07,-.18\n");
        global.push_str("1882,.16,.14,.04,-.16,-.14,-.22,-.16,-.07,-.14,-.24,-.16,-.36,-.11,-.09,.08,-.09,-.15,-.18\n");
        std::fs::write(data_dir.join(GLOBAL_TEMP_CSV), global).unwrap();

        let mut minnesota = String::from("site,year,mo,cdd,hdd,precip,min,max\n");
        for site in ["Morris", "Waseca", "Crookston"] {
            for year in 1927..=1928 {
                for mo in 1..=12 {
                    writeln!(
                        minnesota,
                        "{},{},{},0,900,{:.2},10,40",
                        site,
                        year,
                        mo,
                        (mo as f64 * 0.3) % 4.0
                    )
                    .unwrap();
                }
            }
        }
        std::fs::write(data_dir.join(MINNESOTA_CSV), minnesota).unwrap();
    }

    #[test]
    fn test_from_root() {
        let config = PipelineConfig::from_root(Path::new("/repo"));
        assert_eq!(config.data_dir, Path::new("/repo/data"));
        assert_eq!(config.output_dir, Path::new("/repo/output"));
        assert_eq!(config.dpi, 300);
    }

    #[test]
    fn test_find_root_walks_up_to_data_dir() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("data")).unwrap();
        let bin_dir = root.path().join("target").join("release");
        std::fs::create_dir_all(&bin_dir).unwrap();

        assert_eq!(find_root(&bin_dir).as_deref(), Some(root.path()));
        assert_eq!(find_root(root.path()).as_deref(), Some(root.path()));
    }

    #[test]
    fn test_find_root_without_data_dir() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_root(&nested);
        assert!(found.map_or(true, |dir| !dir.starts_with(root.path())));
    }

    #[test]
    fn test_nan_temperature_is_left_out_of_the_mean() {
        let root = tempfile::tempdir().unwrap();
        let data_dir = root.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(
            data_dir.join(WEATHER_CSV),
            "city,month,avg_temp,avg_humidity,precip\n\
             Auckland,1,60.0,70,0.1\n\
             Auckland,1,NaN,71,0.2\n\
             Auckland,1,62.0,72,0.0\n",
        )
        .unwrap();

        let weather = load_weather(&data_dir).unwrap();
        assert_eq!(weather[1].avg_temp, None);

        let matrix = crate::charts::weather_heatmap::monthly_mean_matrix(&weather).unwrap();
        assert_eq!(matrix.get("Auckland", 1), Some(61.0));
    }

    #[test]
    fn test_fractional_month_fails_validation() {
        let root = tempfile::tempdir().unwrap();
        let data_dir = root.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(
            data_dir.join(WEATHER_CSV),
            "city,month,avg_temp,avg_humidity,precip\n\
             Auckland,1.0,60.0,70,0.1\n\
             Auckland,7.9,61.0,71,0.2\n",
        )
        .unwrap();

        assert!(matches!(
            load_weather(&data_dir),
            Err(PlotError::Validation(_))
        ));
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("nested").join("output");
        ensure_output_dir(&out).unwrap();
        ensure_output_dir(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn test_loaders_apply_dataset_rules() {
        let root = tempfile::tempdir().unwrap();
        let config = PipelineConfig::from_root(root.path());
        write_inputs(&config.data_dir);

        let weather = load_weather(&config.data_dir).unwrap();
        assert_eq!(weather.len(), 72);
        assert_eq!(weather[1].precip, None);

        let global = load_global_anomalies(&config.data_dir).unwrap();
        assert_eq!(global.len(), 3);
        assert_eq!(global[1].year, 1881);
        assert_eq!(global[1].anomalies[6], None);
        assert_eq!(global[1].anomalies[2], Some(0.03));

        let minnesota = load_minnesota(&config.data_dir).unwrap();
        assert_eq!(minnesota.len(), 72);
        assert_eq!(minnesota[0].month, 1);
    }

    #[test]
    fn test_run_writes_four_charts() {
        let root = tempfile::tempdir().unwrap();
        let mut config = PipelineConfig::from_root(root.path());
        // Small raster keeps the test fast
        config.dpi = 40;
        write_inputs(&config.data_dir);
        assert!(!config.output_dir.exists());

        let figures = run(&config).unwrap();

        assert!(config.output_dir.is_dir());
        let names: Vec<String> = figures
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                WEATHER_HEATMAP_PNG,
                WEATHER_SCATTER_PNG,
                GLOBAL_HEATMAP_PNG,
                MINNESOTA_LINE_PNG
            ]
        );
        for path in &figures {
            assert_eq!(path.parent().unwrap(), config.output_dir);
            let bytes = std::fs::read(path).unwrap();
            assert_eq!(&bytes[1..4], b"PNG");
        }
        assert_eq!(std::fs::read_dir(&config.output_dir).unwrap().count(), 4);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let config = PipelineConfig::from_root(root.path());

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PlotError::FileIo(_)));
        // The output directory is still created before loading starts
        assert!(config.output_dir.is_dir());
    }
}
