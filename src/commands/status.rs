//! `saiten status` - grading progress of one assignment

use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::print_json;
use crate::output_by_format_result;
use saiten_core::error::Result;
use saiten_core::session::GradingSession;

pub fn execute(cli: &Cli, session: &GradingSession) -> Result<()> {
    let (graded, total) = session.progress();
    let assignment = session.assignment();
    let pending: Vec<&str> = session
        .students()
        .iter()
        .filter(|s| session.ledger().get(s.dir_name()).is_none())
        .map(|s| s.dir_name())
        .collect();
    let gradebook_present = assignment.gradebook_path().is_file();

    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "subject": assignment.subject(),
            "assignment": assignment.name(),
            "graded": graded,
            "total": total,
            "pending": pending,
            "criteria": session.schema().len(),
            "max_total": session.schema().max_total(),
            "gradebook": gradebook_present,
        })),
        human => {
            println!(
                "{}/{}: {}/{} graded",
                assignment.subject(),
                assignment.name(),
                graded,
                total
            );
            if session.schema().is_empty() {
                println!("warning: no allocation schema ({})", assignment.allocation_path().display());
            }
            if !gradebook_present {
                println!("warning: no gradebook ({})", assignment.gradebook_path().display());
            }
            if !cli.quiet {
                for dir in &pending {
                    println!("  pending: {}", dir);
                }
            }
        }
    )
}
