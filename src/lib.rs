pub mod descriptor;
pub mod config;
pub mod dataset;
pub mod utils;
pub mod commands;

pub use crate::dataset::ErddapDataset;

pub use descriptor::{DescriptorPatcher, Element, ErddapError, ErddapResult, XmlDocument, update_xml};
pub use config::{DatasetConfig, DatasetDetails, MetadataEntry, MetadataTable, VariableOverride};
