//! Dataset update command

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::required_arg;
use crate::config::DatasetConfig;
use crate::dataset::{DatasetUpdater, ErddapDataset};
use crate::descriptor::errors::ErddapResult;
use crate::utils::logger::Logger;

/// Command for adding new data files to a registered dataset
pub struct UpdateCommand<'a> {
    dataset_id: String,
    big_parent_directory: String,
    data_dir: String,
    new_files: Vec<PathBuf>,
    /// Optional configuration, used to check file names against `fileNameRegex`
    config_file: Option<String>,
    logger: &'a Logger,
}

impl<'a> UpdateCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ErddapResult<Self> {
        let new_files = args
            .get_many::<String>("newnc")
            .map(|files| files.map(PathBuf::from).collect())
            .unwrap_or_default();

        Ok(UpdateCommand {
            dataset_id: required_arg(args, "dsid")?,
            big_parent_directory: required_arg(args, "bpd")?,
            data_dir: required_arg(args, "datadir")?,
            new_files,
            config_file: args.get_one::<String>("config").cloned(),
            logger,
        })
    }
}

impl<'a> Command for UpdateCommand<'a> {
    fn execute(&self) -> ErddapResult<()> {
        let copied = match &self.config_file {
            Some(path) => {
                let dataset = ErddapDataset::new(&self.dataset_id, DatasetConfig::from_file(path)?);
                dataset.update_dataset(&self.data_dir, &self.new_files, &self.big_parent_directory, true)?
            }
            None => DatasetUpdater::new(&self.dataset_id, &self.data_dir, &self.big_parent_directory)
                .with_progress(true)
                .update(&self.new_files)?,
        };

        info!("Dataset {} now has {} new file(s)", self.dataset_id, copied.len());
        self.logger.log(&format!("update {}: {} file(s)", self.dataset_id, copied.len()))?;
        Ok(())
    }
}
