//! Config subcommands

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Move the base directory, copying existing subjects unless --no-copy
    SetBaseDir {
        /// New base directory
        dir: PathBuf,

        /// Do not copy existing subjects into the new directory
        #[arg(long)]
        no_copy: bool,
    },

    /// Change the gradebook header labels
    SetGradebook {
        /// First cell of the gradebook header row
        #[arg(long)]
        id_header: Option<String>,

        /// Header of the grade column
        #[arg(long)]
        grade_header: Option<String>,
    },
}
