//! Offline patch command
//!
//! Patches a fragment that GenerateDatasetsXml already produced, without
//! running the generator or touching `datasets.xml`.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::required_arg;
use crate::config::DatasetConfig;
use crate::dataset::ErddapDataset;
use crate::descriptor::errors::ErddapResult;
use crate::descriptor::{reader, writer};
use crate::utils::logger::Logger;

/// Command for patching an existing fragment file
pub struct PatchCommand<'a> {
    dataset_id: String,
    config_file: String,
    /// Fragment to patch
    fragment: String,
    /// Output file; stdout when absent
    output: Option<String>,
    logger: &'a Logger,
}

impl<'a> PatchCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ErddapResult<Self> {
        Ok(PatchCommand {
            dataset_id: required_arg(args, "dsid")?,
            config_file: required_arg(args, "configfile")?,
            fragment: required_arg(args, "fragment")?,
            output: args.get_one::<String>("output").cloned(),
            logger,
        })
    }
}

impl<'a> Command for PatchCommand<'a> {
    fn execute(&self) -> ErddapResult<()> {
        let config = DatasetConfig::from_file(&self.config_file)?;
        let root = reader::read_fragment(&self.fragment)?;

        let mut dataset = ErddapDataset::new(&self.dataset_id, config);
        let patched = dataset.load_fragment(root)?;

        match &self.output {
            Some(path) => {
                writer::write_fragment(path, patched)?;
                info!("Patched descriptor written to {}", path);
            }
            None => print!("{}", writer::to_fragment_string(patched)?),
        }

        self.logger.log(&format!("patch {}: {}", self.dataset_id, self.fragment))?;
        Ok(())
    }
}
