//! `saiten export` - copy an assignment tree for upload

use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::print_json_status;
use crate::output_by_format_result;
use saiten_core::error::Result;
use saiten_core::store::Assignment;

/// `grading_result_<MMDDHHMM>` in the current directory
fn default_dest() -> PathBuf {
    PathBuf::from(format!(
        "grading_result_{}",
        Local::now().format("%m%d%H%M")
    ))
}

pub fn execute(
    cli: &Cli,
    assignment: &Assignment,
    dest: Option<&Path>,
    include_app_files: bool,
) -> Result<()> {
    let dest = dest.map(Path::to_path_buf).unwrap_or_else(default_dest);
    let copied = assignment.export(&dest, include_app_files)?;

    output_by_format_result!(cli.format,
        json => print_json_status(
            "exported",
            None,
            &[
                ("dest", json!(dest.display().to_string())),
                ("files", json!(copied)),
                ("include_app_files", json!(include_app_files)),
            ],
        ),
        human => {
            if !cli.quiet {
                println!("Exported {} files to {}", copied, dest.display());
            }
        }
    )
}
