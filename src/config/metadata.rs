//! Ordered dataset metadata table
//!
//! Each entry either overwrites an attribute the generator already wrote,
//! or, when it names an `after` attribute, is inserted right behind it.

use serde::Deserialize;
use serde_yaml::Value;

use crate::descriptor::errors::{ErddapError, ErddapResult};

/// One metadata attribute to apply to a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    /// Attribute name
    pub name: String,
    /// Attribute text
    pub text: String,
    /// Attribute the new element must directly follow
    pub after: Option<String>,
}

impl MetadataEntry {
    /// Entry that overwrites an existing attribute
    pub fn overwrite(name: &str, text: &str) -> Self {
        MetadataEntry { name: name.to_string(), text: text.to_string(), after: None }
    }

    /// Entry inserted after another attribute
    pub fn inserted_after(name: &str, text: &str, after: &str) -> Self {
        MetadataEntry { name: name.to_string(), text: text.to_string(), after: Some(after.to_string()) }
    }
}

#[derive(Debug, Deserialize)]
struct RawMetadataEntry {
    text: String,
    #[serde(default)]
    after: Option<String>,
}

/// Metadata entries in application order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataTable {
    entries: Vec<MetadataEntry>,
}

impl MetadataTable {
    pub fn new(entries: Vec<MetadataEntry>) -> Self {
        MetadataTable { entries }
    }

    pub fn push(&mut self, entry: MetadataEntry) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetadataEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&MetadataEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Build a table from a YAML mapping of `name: {text, after?}`
    ///
    /// YAML mappings keep their key order, which becomes the application
    /// order.
    pub fn from_yaml(value: &Value) -> ErddapResult<Self> {
        let mapping = value.as_mapping().ok_or_else(|| {
            ErddapError::ConfigError("metadata must be a mapping of attribute names".to_string())
        })?;

        let mut table = MetadataTable::default();
        for (key, body) in mapping {
            let name = key.as_str().ok_or_else(|| {
                ErddapError::ConfigError(format!("metadata key {:?} is not a string", key))
            })?;
            let raw: RawMetadataEntry = serde_yaml::from_value(body.clone()).map_err(|e| {
                ErddapError::ConfigError(format!("metadata entry '{}': {}", name, e))
            })?;
            table.push(MetadataEntry { name: name.to_string(), text: raw.text, after: raw.after });
        }
        Ok(table)
    }
}

impl<'a> IntoIterator for &'a MetadataTable {
    type Item = &'a MetadataEntry;
    type IntoIter = std::slice::Iter<'a, MetadataEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
