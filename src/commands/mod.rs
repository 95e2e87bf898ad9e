//! CLI command implementations
//!
//! One command per subcommand of the `erddapds` binary, dispatched by
//! [`ErddapdsCommandFactory`].

pub mod command_traits;
pub mod create_command;
pub mod patch_command;
pub mod update_command;

pub use command_traits::{Command, CommandFactory};
pub use create_command::CreateCommand;
pub use patch_command::PatchCommand;
pub use update_command::UpdateCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::descriptor::errors::{ErddapError, ErddapResult};

/// Fetch a required string argument
pub(crate) fn required_arg(args: &ArgMatches, name: &str) -> ErddapResult<String> {
    args.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| ErddapError::GenericError(format!("Missing argument: {}", name)))
}

/// Factory for creating command instances based on CLI arguments
pub struct ErddapdsCommandFactory;

impl ErddapdsCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ErddapdsCommandFactory
    }
}

impl Default for ErddapdsCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for ErddapdsCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> ErddapResult<Box<dyn Command + 'a>> {
        match args.subcommand() {
            Some(("create", sub)) => Ok(Box::new(CreateCommand::new(sub, logger)?)),
            Some(("patch", sub)) => Ok(Box::new(PatchCommand::new(sub, logger)?)),
            Some(("update", sub)) => Ok(Box::new(UpdateCommand::new(sub, logger)?)),
            Some((other, _)) => Err(ErddapError::GenericError(format!("Unknown command: {}", other))),
            None => Err(ErddapError::GenericError("No command given, see --help".to_string())),
        }
    }
}
