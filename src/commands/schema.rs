//! `saiten schema` - inspect, install and validate allocation schemas

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use crate::cli::Cli;
use crate::commands::format::print_json;
use crate::output_by_format_result;
use saiten_core::allocation::AllocationSchema;
use saiten_core::bail_usage;
use saiten_core::error::{Result, SaitenError};
use saiten_core::store::Assignment;

/// Flattened criteria as JSON rows
fn criteria_json(schema: &AllocationSchema) -> Vec<Value> {
    schema
        .flatten()
        .map(|(path, criterion)| {
            json!({
                "key": path.flat_key(),
                "path": path.labels(),
                "type": criterion.mode.as_str(),
                "score": criterion.max_score,
                "answer": criterion.reference_answer,
            })
        })
        .collect()
}

fn print_human(schema: &AllocationSchema, verbose_answers: bool) {
    for (path, criterion) in schema.flatten() {
        println!(
            "{:<24} {:<12} {:>4}",
            path.to_string(),
            criterion.mode.as_str(),
            criterion.max_score
        );
        if verbose_answers {
            if let Some(answer) = &criterion.reference_answer {
                println!("    answer: {}", answer);
            }
        }
    }
    println!(
        "{} criteria, max total {}, depth {}",
        schema.len(),
        schema.max_total(),
        schema.depth()
    );
}

pub fn execute_show(cli: &Cli, assignment: &Assignment) -> Result<()> {
    let schema = AllocationSchema::load(&assignment.allocation_path())?;

    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "path": assignment.allocation_path().display().to_string(),
            "criteria": criteria_json(&schema),
            "max_total": schema.max_total(),
            "depth": schema.depth(),
            "schema": schema.to_value(),
        })),
        human => {
            if schema.is_empty() {
                println!("No allocation schema at {}", assignment.allocation_path().display());
            } else {
                print_human(&schema, !cli.quiet);
            }
        }
    )
}

fn read_schema_file(file: &Path) -> Result<AllocationSchema> {
    if !file.is_file() {
        return Err(SaitenError::not_found("allocation file", file.display()));
    }
    let content =
        fs::read_to_string(file).map_err(|e| SaitenError::io_operation("read", file.display(), e))?;
    AllocationSchema::parse_str(&content)
        .map_err(|e| e.chain(format!("{} is not a valid allocation schema", file.display())))
}

/// Validate `file` and write it as the assignment's `allocation.json`
pub fn execute_set(cli: &Cli, assignment: &Assignment, file: &Path) -> Result<()> {
    let schema = read_schema_file(file)?;
    if schema.is_empty() {
        bail_usage!(format!("{} has no criteria", file.display()));
    }
    let dest = assignment.allocation_path();
    schema.save(&dest)?;

    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "status": "saved",
            "path": dest.display().to_string(),
            "criteria": schema.len(),
            "max_total": schema.max_total(),
            "schema": schema.to_value(),
        })),
        human => {
            if !cli.quiet {
                print_human(&schema, false);
            }
            println!("Saved {}", dest.display());
        }
    )
}

pub fn execute_delete(cli: &Cli, assignment: &Assignment) -> Result<()> {
    let path = assignment.allocation_path();
    AllocationSchema::remove(&path)?;

    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "status": "deleted",
            "path": path.display().to_string(),
        })),
        human => {
            println!("Deleted {}", path.display());
        }
    )
}

/// Validate a schema file without touching any assignment
pub fn execute_check(cli: &Cli, file: &Path) -> Result<()> {
    let schema = read_schema_file(file)?;

    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "status": "ok",
            "path": file.display().to_string(),
            "criteria": schema.len(),
            "max_total": schema.max_total(),
            "depth": schema.depth(),
        })),
        human => {
            println!(
                "ok: {} criteria, max total {}, depth {}",
                schema.len(),
                schema.max_total(),
                schema.depth()
            );
        }
    )
}
