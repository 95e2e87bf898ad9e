//! Subcommand interfaces
//!
//! Each `erddapds` subcommand parses its arguments up front into a
//! [`Command`], so argument errors surface before any file is touched.

use crate::utils::logger::Logger;
use crate::descriptor::errors::ErddapResult;

/// A parsed subcommand, ready to run against an ERDDAP installation
pub trait Command {
    /// Run the dataset operation and record it in the operation log
    fn execute(&self) -> ErddapResult<()>;
}

/// Turns matched CLI arguments into a runnable subcommand
pub trait CommandFactory<'a> {
    /// Build the command for whichever subcommand `args` selected
    ///
    /// Fails when the subcommand is unknown or a required argument is
    /// missing. `logger` is the operation log the command appends its
    /// outcome to.
    fn create_command(&self, args: &clap::ArgMatches, logger: &'a Logger) -> ErddapResult<Box<dyn Command + 'a>>;
}
