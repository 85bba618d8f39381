//! CLI argument parsing for saiten
//!
//! Global flags: --base-dir, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod config;
pub mod format;
pub mod parse;
pub mod paths;
pub mod schema;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{AssignmentArgs, CommentArgs, ExportArgs, GradeArgs, StudentArgs};
pub use config::ConfigCommands;
pub use saiten_core::format::OutputFormat;
pub use schema::SchemaCommands;

/// Saiten - grading console for teaching assistants
#[derive(Parser, Debug)]
#[command(name = "saiten")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding <subject>/<assignment>/ trees (overrides config)
    #[arg(long, global = true, env = "SAITEN_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human", value_parser = parse::parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. info, saiten_core=trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level saiten commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List subjects in the base directory
    Subjects,

    /// List assignments of a subject
    Assignments {
        /// Subject directory name
        subject: String,
    },

    /// List students of an assignment with their grading state
    Students(AssignmentArgs),

    /// Show grading progress of an assignment
    Status(AssignmentArgs),

    /// Inspect allocation schemas
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },

    /// Show a student's submission, saved scores and comment
    Show(StudentArgs),

    /// Score a student and write the ledger and gradebook
    Grade(GradeArgs),

    /// Read or replace a student's feedback comment
    Comment(CommentArgs),

    /// Copy an assignment tree for upload
    Export(ExportArgs),

    /// Show or change global configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}
