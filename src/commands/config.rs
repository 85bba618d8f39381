//! `saiten config` - show or change global configuration

use std::path::Path;

use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::{print_json, print_json_status};
use crate::output_by_format_result;
use saiten_core::config::SaitenConfig;
use saiten_core::error::Result;
use saiten_core::store::Workspace;

pub fn execute_show(cli: &Cli, config: &SaitenConfig, base_dir: &Path) -> Result<()> {
    let path = SaitenConfig::config_path()?;

    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "path": path.display().to_string(),
            "base_dir": base_dir.display().to_string(),
            "store": config.store,
            "gradebook": config.gradebook,
        })),
        human => {
            println!("config: {} ({})", path.display(), SaitenConfig::source_display());
            println!("base dir: {}", base_dir.display());
            println!("gradebook id header: {}", config.gradebook.id_header);
            println!("gradebook grade header: {}", config.gradebook.grade_header);
        }
    )
}

/// Point the config at a new base directory, copying current subjects first
pub fn execute_set_base_dir(
    cli: &Cli,
    config: &SaitenConfig,
    current: &Path,
    dir: &Path,
    no_copy: bool,
) -> Result<()> {
    let copied = if !no_copy && current.is_dir() {
        Workspace::open(current)?.copy_into(dir)?
    } else {
        Workspace::create(dir)?;
        0
    };

    let mut updated = config.clone();
    updated.store.dir = dir.to_path_buf();
    updated.save()?;
    tracing::debug!(dir = %dir.display(), copied, "base_dir_changed");

    output_by_format_result!(cli.format,
        json => print_json_status(
            "updated",
            None,
            &[
                ("base_dir", json!(dir.display().to_string())),
                ("copied_files", json!(copied)),
            ],
        ),
        human => {
            if !cli.quiet {
                println!("Base directory set to {}", dir.display());
                if copied > 0 {
                    println!("Copied {} files from {}", copied, current.display());
                }
            }
        }
    )
}

pub fn execute_set_gradebook(
    cli: &Cli,
    config: &SaitenConfig,
    id_header: Option<&str>,
    grade_header: Option<&str>,
) -> Result<()> {
    let mut updated = config.clone();
    if let Some(header) = id_header {
        updated.gradebook.id_header = header.to_string();
    }
    if let Some(header) = grade_header {
        updated.gradebook.grade_header = header.to_string();
    }
    updated.save()?;

    output_by_format_result!(cli.format,
        json => print_json_status(
            "updated",
            None,
            &[("gradebook", json!(updated.gradebook))],
        ),
        human => {
            if !cli.quiet {
                println!(
                    "Gradebook headers: id={:?} grade={:?}",
                    updated.gradebook.id_header, updated.gradebook.grade_header
                );
            }
        }
    )
}
