//! Dataset updates
//!
//! Copies newly arrived data files into the data directory of a dataset
//! that is already registered, then raises its reload flag.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use regex::Regex;

use crate::dataset::registry;
use crate::descriptor::errors::{ErddapError, ErddapResult};
use crate::utils::progress::ProgressTracker;

/// Merges new files into an existing dataset
pub struct DatasetUpdater {
    dataset_id: String,
    data_dir: PathBuf,
    big_parent_directory: PathBuf,
    /// Anchored form of the dataset's `fileNameRegex`
    file_name_regex: Option<Regex>,
    show_progress: bool,
}

impl DatasetUpdater {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(dataset_id: &str, data_dir: P, big_parent_directory: Q) -> Self {
        DatasetUpdater {
            dataset_id: dataset_id.to_string(),
            data_dir: data_dir.as_ref().to_path_buf(),
            big_parent_directory: big_parent_directory.as_ref().to_path_buf(),
            file_name_regex: None,
            show_progress: false,
        }
    }

    /// Only accept files whose name matches the dataset's `fileNameRegex`
    ///
    /// ERDDAP matches the pattern against the whole file name, so it is
    /// anchored at both ends here too.
    pub fn with_file_name_regex(mut self, pattern: &str) -> ErddapResult<Self> {
        let anchored = format!("^(?:{})$", pattern);
        let regex = Regex::new(&anchored).map_err(|e| {
            ErddapError::ConfigError(format!("invalid fileNameRegex '{}': {}", pattern, e))
        })?;
        self.file_name_regex = Some(regex);
        Ok(self)
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Check every file before anything is copied
    fn validate(&self, new_files: &[PathBuf]) -> ErddapResult<()> {
        if !self.data_dir.is_dir() {
            return Err(ErddapError::InvalidPath(format!(
                "data directory {} does not exist", self.data_dir.display()
            )));
        }
        if new_files.is_empty() {
            return Err(ErddapError::GenericError("no new files given".to_string()));
        }

        for file in new_files {
            if !file.is_file() {
                return Err(ErddapError::InvalidPath(format!("{} is not a file", file.display())));
            }
            let name = file_name(file)?;
            if let Some(regex) = &self.file_name_regex {
                if !regex.is_match(name) {
                    return Err(ErddapError::InvalidPath(format!(
                        "{} does not match fileNameRegex of {}", name, self.dataset_id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Copy `new_files` into the data directory and raise the reload flag
    ///
    /// Returns the paths of the copied files.
    pub fn update(&self, new_files: &[PathBuf]) -> ErddapResult<Vec<PathBuf>> {
        self.validate(new_files)?;

        let progress = if self.show_progress {
            ProgressTracker::new(new_files.len() as u64, "Copying data files")
        } else {
            ProgressTracker::hidden(new_files.len() as u64)
        };

        let mut copied = Vec::with_capacity(new_files.len());
        for file in new_files {
            let name = file_name(file)?;
            let target = self.data_dir.join(name);
            if target.exists() {
                warn!("Overwriting {}", target.display());
            }
            progress.set_message(name);
            let bytes = fs::copy(file, &target)?;
            debug!("Copied {} ({} bytes) to {}", file.display(), bytes, target.display());
            copied.push(target);
            progress.increment(1);
        }
        progress.finish();

        registry::raise_flag(&self.big_parent_directory, &self.dataset_id)?;
        info!("Dataset {} updated with {} file(s)", self.dataset_id, copied.len());
        Ok(copied)
    }
}

fn file_name(path: &Path) -> ErddapResult<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ErddapError::InvalidPath(format!("{} has no usable file name", path.display())))
}
