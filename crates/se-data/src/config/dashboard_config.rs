//! Dashboard configuration

use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use tracing::info;

use se_core::metrics::{MetricDef, default_metrics, find_metric};

use super::null_handling::NullConfig;
use crate::sources::{CsvSource, DataSource, JsonSource};
use crate::DataError;

/// Layout of the dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(SourceFormat::Json),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }
}

/// Years the views default to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearDefaults {
    /// Year selected when the statistics page opens
    pub current: i32,

    /// Year changes are measured from
    pub baseline: i32,

    /// Year used for exact globe name matches
    pub globe_preferred: i32,

    /// Year used for substring globe name matches
    pub globe_fallback: i32,

    /// Last year shown by the country comparison
    pub compare_until: i32,
}

impl Default for YearDefaults {
    fn default() -> Self {
        Self {
            current: 2020,
            baseline: 2000,
            globe_preferred: 2019,
            globe_fallback: 2020,
            compare_until: 2020,
        }
    }
}

/// Configuration for the whole dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path to the dataset
    pub data_path: PathBuf,

    /// Dataset layout; inferred from the extension when absent
    pub source_format: Option<SourceFormat>,

    /// Missing-value handling
    pub null_config: NullConfig,

    pub years: YearDefaults,

    /// Number of entries in top/bottom rankings
    pub ranking_limit: usize,

    /// Metrics offered by the views
    pub metrics: Vec<MetricDef>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/global-data-on-sustainable-energy.json"),
            source_format: None,
            null_config: NullConfig::default(),
            years: YearDefaults::default(),
            ranking_limit: 10,
            metrics: default_metrics(),
        }
    }
}

impl DashboardConfig {
    /// Read a configuration file (JSON). Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        info!("Loading dashboard configuration from {:?}", path);

        let text = std::fs::read_to_string(path)?;
        let config: DashboardConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no view can work with
    pub fn validate(&self) -> Result<(), DataError> {
        if self.ranking_limit == 0 {
            return Err(DataError::Config("ranking_limit must be at least 1".to_string()));
        }
        if self.metrics.is_empty() {
            return Err(DataError::Config("at least one metric must be configured".to_string()));
        }
        Ok(())
    }

    /// Effective dataset format
    pub fn format(&self) -> Result<SourceFormat, DataError> {
        self.source_format
            .or_else(|| SourceFormat::from_path(&self.data_path))
            .ok_or_else(|| DataError::Config(format!(
                "cannot tell the format of {:?}; set source_format", self.data_path
            )))
    }

    /// Build the data source described by this configuration
    pub fn source(&self) -> Result<Box<dyn DataSource>, DataError> {
        let source: Box<dyn DataSource> = match self.format()? {
            SourceFormat::Json => Box::new(JsonSource::new(self.data_path.clone(), self.null_config.clone())),
            SourceFormat::Csv => Box::new(CsvSource::new(self.data_path.clone(), self.null_config.clone())),
        };
        Ok(source)
    }

    /// Look up a configured metric by id or column name
    pub fn metric(&self, id_or_key: &str) -> Option<&MetricDef> {
        find_metric(&self.metrics, id_or_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_takes_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data_path": "energy.csv", "years": {{ "current": 2018 }} }}"#).unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("energy.csv"));
        assert_eq!(config.format().unwrap(), SourceFormat::Csv);
        assert_eq!(config.years.current, 2018);
        assert_eq!(config.years.baseline, 2000);
        assert_eq!(config.ranking_limit, 10);
        assert_eq!(config.metrics.len(), 4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "ranking_limit": 0 }}"#).unwrap();

        assert!(matches!(DashboardConfig::load(file.path()), Err(DataError::Config(_))));
    }

    #[test]
    fn test_unknown_extension_needs_explicit_format() {
        let mut config = DashboardConfig {
            data_path: PathBuf::from("energy.dat"),
            ..Default::default()
        };
        assert!(config.format().is_err());

        config.source_format = Some(SourceFormat::Json);
        assert_eq!(config.format().unwrap(), SourceFormat::Json);
    }
}
