//! Dataset configuration
//!
//! Loading of the YAML dataset configuration and the ordered metadata
//! table it can carry.

pub mod dataset_config;
pub mod metadata;

pub use dataset_config::{
    DatasetConfig, DatasetDetails, DatasetsDetails, VariableOverride, VariableOverrides,
};
pub use metadata::{MetadataEntry, MetadataTable};
