//! Schema subcommands

use clap::Subcommand;
use std::path::PathBuf;

use crate::cli::AssignmentArgs;

#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// Show the allocation schema of an assignment
    Show(AssignmentArgs),

    /// Install an allocation file as an assignment's schema
    Set {
        #[command(flatten)]
        target: AssignmentArgs,

        /// Path to the allocation file to install
        file: PathBuf,
    },

    /// Delete an assignment's allocation schema
    Delete(AssignmentArgs),

    /// Validate an allocation file
    Check {
        /// Path to an allocation.json file
        file: PathBuf,
    },
}
