//! ERDDAP dataset lifecycle
//!
//! Generating a descriptor, patching it, exporting it, registering it in
//! `datasets.xml`, and feeding new files to an existing dataset.

pub mod generator;
pub mod registry;
pub mod updater;

pub use generator::{GeneratorRequest, GeneratorRunner};
pub use registry::{add_to_datasets_xml, merge_fragment, raise_flag, MergeOutcome};
pub use updater::DatasetUpdater;

use std::fmt;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::dataset_config::DatasetConfig;
use crate::descriptor::element::Element;
use crate::descriptor::errors::{ErddapError, ErddapResult};
use crate::descriptor::patcher::DescriptorPatcher;
use crate::descriptor::writer;

/// One ERDDAP dataset and its descriptor
pub struct ErddapDataset {
    dataset_id: String,
    config: DatasetConfig,
    /// Patched descriptor, once generated or loaded
    fragment: Option<Element>,
}

impl fmt::Debug for ErddapDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<ErddapDataset: {}>", self.dataset_id)
    }
}

impl ErddapDataset {
    pub fn new(dataset_id: &str, config: DatasetConfig) -> Self {
        ErddapDataset {
            dataset_id: dataset_id.to_string(),
            config,
            fragment: None,
        }
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// The patched descriptor, if there is one yet
    pub fn fragment(&self) -> Option<&Element> {
        self.fragment.as_ref()
    }

    /// Patch a freshly generated fragment and keep it
    pub fn load_fragment(&mut self, mut root: Element) -> ErddapResult<&Element> {
        let patcher = DescriptorPatcher::new(
            &self.config.metadata,
            &self.config.details,
            &self.config.variables,
        );
        patcher.patch(&mut root, &self.dataset_id)?;
        Ok(self.fragment.insert(root))
    }

    /// Run the generator for this dataset and patch its output
    pub fn generate_datasetxml(&mut self, runner: &GeneratorRunner, request: &GeneratorRequest) -> ErddapResult<&Element> {
        // Fail on an unknown ID before spending time in the generator
        self.config.dataset(&self.dataset_id)?;
        let root = runner.run(request)?;
        self.load_fragment(root)
    }

    fn require_fragment(&self) -> ErddapResult<&Element> {
        self.fragment.as_ref().ok_or_else(|| {
            ErddapError::GenericError(format!("no descriptor has been generated for {}", self.dataset_id))
        })
    }

    /// Write the descriptor to `<dir>/<datasetID>.xml`
    pub fn export_datasetxml<P: AsRef<Path>>(&self, dir: P) -> ErddapResult<PathBuf> {
        let fragment = self.require_fragment()?;
        let path = dir.as_ref().join(format!("{}.xml", self.dataset_id));
        writer::write_fragment(&path, fragment)?;
        info!("Exported {} descriptor to {}", self.dataset_id, path.display());
        Ok(path)
    }

    /// Add the descriptor to `datasets.xml` and flag the dataset for loading
    pub fn add_to_datasetsxml<P: AsRef<Path>, Q: AsRef<Path>>(&self, datasets_xml: P, big_parent_directory: Q) -> ErddapResult<MergeOutcome> {
        let fragment = self.require_fragment()?;
        let outcome = registry::add_to_datasets_xml(datasets_xml, fragment)?;
        registry::raise_flag(big_parent_directory, &self.dataset_id)?;
        info!("Dataset successfully added.");
        Ok(outcome)
    }

    /// Copy new data files into the dataset and flag it for reloading
    pub fn update_dataset<P: AsRef<Path>, Q: AsRef<Path>>(&self, data_dir: P, new_files: &[PathBuf], big_parent_directory: Q, show_progress: bool) -> ErddapResult<Vec<PathBuf>> {
        let mut updater = DatasetUpdater::new(&self.dataset_id, data_dir, big_parent_directory)
            .with_progress(show_progress);
        if let Some(details) = self.config.details.get(&self.dataset_id) {
            updater = updater.with_file_name_regex(&details.file_name_regex)?;
        }
        updater.update(new_files)
    }
}
