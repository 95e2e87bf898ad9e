//! Static lookup tables for descriptor enrichment
//!
//! IOOS categories, colorbar ranges and the default dataset metadata are
//! defined in `erddap_tables.toml`, embedded at build time and parsed once.

use std::collections::HashMap;
use lazy_static::lazy_static;

use crate::config::metadata::{MetadataEntry, MetadataTable};
use crate::descriptor::errors::{ErddapError, ErddapResult};

lazy_static! {
    // Parse the embedded TOML at first use
    static ref LOOKUP_TABLES: LookupTables = {
        let content = include_str!("../../erddap_tables.toml");
        LookupTables::from_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse lookup tables: {}", e);
            LookupTables::default()
        })
    };
}

/// Display bounds used by visualization clients
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBarRange {
    /// Text of the `colorBarMinimum` attribute
    pub minimum: String,
    /// Text of the `colorBarMaximum` attribute
    pub maximum: String,
}

/// Container for all lookup tables
#[derive(Debug, Default)]
pub struct LookupTables {
    // Maps variable names to IOOS categories
    pub ioos_categories: HashMap<String, String>,
    // Maps variable names to colorbar ranges
    pub colorbar_ranges: HashMap<String, ColorBarRange>,
    // Default metadata, in application order
    pub default_metadata: MetadataTable,
}

impl LookupTables {
    /// Parse lookup tables from a TOML string
    pub fn from_str(content: &str) -> ErddapResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(ErddapError::ConfigError(format!("Failed to parse TOML: {}", e))),
        };

        let mut tables = LookupTables::default();

        if let Some(table) = toml_value.get("ioos_categories").and_then(|v| v.as_table()) {
            for (name, category) in table {
                if let Some(category) = category.as_str() {
                    tables.ioos_categories.insert(name.clone(), category.to_string());
                }
            }
        }

        if let Some(table) = toml_value.get("colorbar").and_then(|v| v.as_table()) {
            for (name, range) in table {
                let minimum = range.get("minimum").and_then(|v| v.as_str());
                let maximum = range.get("maximum").and_then(|v| v.as_str());
                match (minimum, maximum) {
                    (Some(minimum), Some(maximum)) => {
                        tables.colorbar_ranges.insert(name.clone(), ColorBarRange {
                            minimum: minimum.to_string(),
                            maximum: maximum.to_string(),
                        });
                    }
                    _ => return Err(ErddapError::ConfigError(format!(
                        "colorbar.{} needs string minimum and maximum", name
                    ))),
                }
            }
        }

        if let Some(entries) = toml_value.get("metadata").and_then(|v| v.as_array()) {
            for entry in entries {
                let name = entry.get("name").and_then(|v| v.as_str());
                let text = entry.get("text").and_then(|v| v.as_str());
                let after = entry.get("after").and_then(|v| v.as_str());
                match (name, text) {
                    (Some(name), Some(text)) => tables.default_metadata.push(MetadataEntry {
                        name: name.to_string(),
                        text: text.to_string(),
                        after: after.map(str::to_string),
                    }),
                    _ => return Err(ErddapError::ConfigError(
                        "metadata entries need a name and a text".to_string()
                    )),
                }
            }
        }

        Ok(tables)
    }
}

/// IOOS category for a variable or axis name
pub fn ioos_category(name: &str) -> Option<&'static str> {
    LOOKUP_TABLES.ioos_categories.get(name).map(String::as_str)
}

/// Colorbar range for a variable name
pub fn colorbar_range(name: &str) -> Option<&'static ColorBarRange> {
    LOOKUP_TABLES.colorbar_ranges.get(name)
}

/// The built-in default metadata table
pub fn default_metadata() -> &'static MetadataTable {
    &LOOKUP_TABLES.default_metadata
}
