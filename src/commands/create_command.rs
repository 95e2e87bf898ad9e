//! Dataset creation command
//!
//! Runs GenerateDatasetsXml for a new dataset, patches the resulting
//! descriptor and adds it to `datasets.xml`.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::required_arg;
use crate::config::DatasetConfig;
use crate::dataset::{ErddapDataset, GeneratorRequest, GeneratorRunner};
use crate::descriptor::errors::ErddapResult;
use crate::utils::logger::Logger;

/// Command for creating and registering a new dataset
pub struct CreateCommand<'a> {
    /// Dataset ID
    dataset_id: String,
    /// Path to the YAML configuration
    config_file: String,
    /// Path to GenerateDatasetsXml.sh
    generator: String,
    /// Path to datasets.xml
    datasets_xml: String,
    /// ERDDAP big parent directory
    big_parent_directory: String,
    /// Data directory of the new dataset
    data_dir: String,
    dataset_type: String,
    info_url: String,
    institution: String,
    summary: String,
    title: String,
    /// Directory to export the patched fragment to
    export_dir: Option<String>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> CreateCommand<'a> {
    /// Create a new create command
    ///
    /// # Arguments
    /// * `args` - Matches of the `create` subcommand
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ErddapResult<Self> {
        Ok(CreateCommand {
            dataset_id: required_arg(args, "dsid")?,
            config_file: required_arg(args, "configfile")?,
            generator: required_arg(args, "gdsloc")?,
            datasets_xml: required_arg(args, "datasetsxml")?,
            big_parent_directory: required_arg(args, "bpd")?,
            data_dir: required_arg(args, "datadir")?,
            dataset_type: required_arg(args, "dataset-type")?,
            info_url: required_arg(args, "infourl")?,
            institution: required_arg(args, "institution")?,
            summary: required_arg(args, "summary")?,
            title: required_arg(args, "title")?,
            export_dir: args.get_one::<String>("export").cloned(),
            logger,
        })
    }
}

impl<'a> Command for CreateCommand<'a> {
    fn execute(&self) -> ErddapResult<()> {
        info!("Creating dataset {} from {}", self.dataset_id, self.data_dir);

        let config = DatasetConfig::from_file(&self.config_file)?;
        let file_name_regex = config.dataset(&self.dataset_id)?.file_name_regex.clone();

        let request = GeneratorRequest {
            dataset_type: self.dataset_type.clone(),
            info_url: self.info_url.clone(),
            institution: self.institution.clone(),
            summary: self.summary.clone(),
            title: self.title.clone(),
            ..GeneratorRequest::new(&self.data_dir, &file_name_regex)
        };
        let runner = GeneratorRunner::new(&self.generator, &self.big_parent_directory)?;

        let mut dataset = ErddapDataset::new(&self.dataset_id, config);
        dataset.generate_datasetxml(&runner, &request)?;

        if let Some(dir) = &self.export_dir {
            dataset.export_datasetxml(dir)?;
        }

        let outcome = dataset.add_to_datasetsxml(&self.datasets_xml, runner.big_parent_directory())?;
        self.logger.log(&format!(
            "create {}: {:?} in {}", self.dataset_id, outcome, self.datasets_xml
        ))?;

        Ok(())
    }
}
