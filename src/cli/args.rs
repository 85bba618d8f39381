//! Shared command argument structures

use clap::Args;
use std::path::PathBuf;

use crate::cli::parse::parse_score;
use saiten_core::scoring::LeafInput;

/// Selects one assignment
#[derive(Args, Debug, Clone)]
pub struct AssignmentArgs {
    /// Subject directory name
    pub subject: String,

    /// Assignment directory name
    pub assignment: String,
}

/// Selects one student of an assignment
#[derive(Args, Debug, Clone)]
pub struct StudentArgs {
    #[command(flatten)]
    pub target: AssignmentArgs,

    /// Student directory name, student ID or display name
    pub student: String,
}

/// Arguments for the grade command.
#[derive(Args, Debug)]
pub struct GradeArgs {
    #[command(flatten)]
    pub student: StudentArgs,

    /// Criterion score as KEY=VALUE (e.g. Q1=7, Q2_A=yes); repeatable
    #[arg(long = "score", short = 's', value_parser = parse_score, action = clap::ArgAction::Append)]
    pub scores: Vec<(String, LeafInput)>,

    /// Keep previously saved scores for criteria not given with --score
    #[arg(long)]
    pub amend: bool,
}

/// Arguments for the comment command.
#[derive(Args, Debug)]
pub struct CommentArgs {
    #[command(flatten)]
    pub student: StudentArgs,

    /// Replace the comment with this text
    #[arg(long)]
    pub set: Option<String>,
}

/// Arguments for the export command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub target: AssignmentArgs,

    /// Destination directory (default: ./grading_result_<MMDDHHMM>)
    pub dest: Option<PathBuf>,

    /// Also copy the ledger and allocation schema
    #[arg(long)]
    pub include_app_files: bool,
}
