//! `saiten subjects`, `saiten assignments` and `saiten students`

use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::print_json;
use crate::output_by_format_result;
use saiten_core::error::Result;
use saiten_core::session::GradingSession;
use saiten_core::store::Workspace;

pub fn execute_subjects(cli: &Cli, workspace: &Workspace) -> Result<()> {
    let subjects = workspace.subjects()?;

    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "base_dir": workspace.base_dir().display().to_string(),
            "subjects": subjects,
        })),
        human => {
            if subjects.is_empty() && !cli.quiet {
                eprintln!("No subjects in {}", workspace.base_dir().display());
            }
            for subject in &subjects {
                println!("{}", subject);
            }
        }
    )
}

pub fn execute_assignments(cli: &Cli, workspace: &Workspace, subject: &str) -> Result<()> {
    let assignments = workspace.assignments(subject)?;

    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "subject": subject,
            "assignments": assignments,
        })),
        human => {
            if assignments.is_empty() && !cli.quiet {
                eprintln!("No assignments in {}", subject);
            }
            for assignment in &assignments {
                println!("{}", assignment);
            }
        }
    )
}

/// List students with a graded marker and their saved total
pub fn execute_students(cli: &Cli, session: &GradingSession) -> Result<()> {
    let rows: Vec<_> = session
        .students()
        .iter()
        .map(|student| {
            let total = session
                .ledger()
                .get(student.dir_name())
                .map(|scores| scores.values().map(|&v| u64::from(v)).sum::<u64>());
            (student, total)
        })
        .collect();

    output_by_format_result!(cli.format,
        json => {
            let students: Vec<_> = rows
                .iter()
                .map(|(student, total)| {
                    json!({
                        "dir": student.dir_name(),
                        "name": student.display_name(),
                        "id": student.id(),
                        "graded": total.is_some(),
                        "total": total,
                    })
                })
                .collect();
            print_json(&json!({ "students": students }))
        },
        human => {
            for (student, total) in &rows {
                let mark = if total.is_some() { "x" } else { " " };
                let suffix = total.map(|t| format!("  {}", t)).unwrap_or_default();
                println!("[{}] {}{}", mark, student.dir_name(), suffix);
            }
        }
    )
}
