//! Dataset configuration file
//!
//! The YAML configuration carries the per-dataset details, destination
//! name overrides for data variables, and optionally a metadata table that
//! replaces the built-in defaults:
//!
//! ```yaml
//! details:
//!   ubcSSg3DTracerFields1hV19-05:
//!     fileNameRegex: '.*SalishSea_1h_\d{8}_\d{8}_grid_T\.nc$'
//!     title: Green, Salish Sea, 3d Tracer Fields, Hourly
//!     summary: 3d salinity and water temperature field values
//!     type: grid
//! variables:
//!   votemper:
//!     destinationName: temperature
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use serde_yaml::Value;

use crate::config::metadata::MetadataTable;
use crate::descriptor::errors::{ErddapError, ErddapResult};
use crate::descriptor::tables;

/// Dataset type that triggers the longitude/latitude axis replacement
pub const TIDE_GAUGE_TYPE: &str = "tide gauge";

/// Per-dataset details
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetDetails {
    #[serde(rename = "fileNameRegex")]
    pub file_name_regex: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(rename = "type")]
    pub dataset_type: String,
}

impl DatasetDetails {
    pub fn is_tide_gauge(&self) -> bool {
        self.dataset_type == TIDE_GAUGE_TYPE
    }
}

/// Destination name override for a data variable
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariableOverride {
    #[serde(rename = "destinationName")]
    pub destination_name: String,
}

/// Dataset details keyed by dataset ID
pub type DatasetsDetails = HashMap<String, DatasetDetails>;

/// Variable overrides keyed by source variable name
pub type VariableOverrides = HashMap<String, VariableOverride>;

#[derive(Debug, Deserialize)]
struct RawDatasetConfig {
    details: Option<DatasetsDetails>,
    #[serde(default)]
    variables: VariableOverrides,
    #[serde(default)]
    metadata: Option<Value>,
}

/// Parsed dataset configuration
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub details: DatasetsDetails,
    pub variables: VariableOverrides,
    pub metadata: MetadataTable,
}

impl DatasetConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> ErddapResult<Self> {
        let raw: RawDatasetConfig = serde_yaml::from_str(yaml)?;

        let details = raw.details.ok_or_else(|| {
            ErddapError::ConfigError("configuration has no 'details' section".to_string())
        })?;

        let metadata = match raw.metadata {
            Some(value) => MetadataTable::from_yaml(&value)?,
            None => tables::default_metadata().clone(),
        };

        Ok(DatasetConfig { details, variables: raw.variables, metadata })
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ErddapResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ErddapError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml_str(&contents)?;
        debug!("Loaded configuration for {} dataset(s) from {}", config.details.len(), path.display());
        Ok(config)
    }

    /// Details for one dataset
    pub fn dataset(&self, dataset_id: &str) -> ErddapResult<&DatasetDetails> {
        self.details
            .get(dataset_id)
            .ok_or_else(|| ErddapError::UnknownDataset(dataset_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
details:
  ubcSSg3DTracerFields1hV19-05:
    fileNameRegex: '.*grid_T\.nc$'
    title: Salish Sea, 3d Tracer Fields, Hourly
    summary: 3d salinity and water temperature field values
    keywords: oceans, salinity
    type: grid
variables:
  votemper:
    destinationName: temperature
"#;

    #[test]
    fn test_parse_config_with_defaults() {
        let config = DatasetConfig::from_yaml_str(CONFIG).unwrap();
        let details = config.dataset("ubcSSg3DTracerFields1hV19-05").unwrap();
        assert_eq!(details.file_name_regex, r".*grid_T\.nc$");
        assert_eq!(details.keywords.as_deref(), Some("oceans, salinity"));
        assert!(!details.is_tide_gauge());
        assert_eq!(config.variables["votemper"].destination_name, "temperature");
        assert_eq!(config.metadata, *tables::default_metadata());
    }

    #[test]
    fn test_metadata_keeps_yaml_order() {
        let yaml = r#"
details: {}
metadata:
  title_extra:
    text: one
    after: title
  infoUrl:
    text: http://example.org
  aaa_last:
    text: three
    after: title_extra
"#;
        let config = DatasetConfig::from_yaml_str(yaml).unwrap();
        let names: Vec<&str> = config.metadata.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["title_extra", "infoUrl", "aaa_last"]);
        assert_eq!(config.metadata.get("infoUrl").unwrap().after, None);
        assert_eq!(config.metadata.get("aaa_last").unwrap().after.as_deref(), Some("title_extra"));
    }

    #[test]
    fn test_missing_details_is_an_error() {
        let result = DatasetConfig::from_yaml_str("variables: {}\n");
        assert!(matches!(result, Err(ErddapError::ConfigError(_))));
    }

    #[test]
    fn test_unknown_dataset_lookup() {
        let config = DatasetConfig::from_yaml_str(CONFIG).unwrap();
        assert!(matches!(config.dataset("nope"), Err(ErddapError::UnknownDataset(_))));
    }
}
