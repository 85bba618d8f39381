//! `saiten grade` - score a student and write the ledger and gradebook

use indexmap::IndexMap;
use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::print_json;
use crate::output_by_format_result;
use saiten_core::error::Result;
use saiten_core::gradebook::PatchOutcome;
use saiten_core::scoring::LeafInput;
use saiten_core::session::GradingSession;

pub fn execute(
    cli: &Cli,
    session: &mut GradingSession,
    scores: &[(String, LeafInput)],
    amend: bool,
) -> Result<()> {
    // Later occurrences of a key win
    let mut inputs: IndexMap<String, LeafInput> = IndexMap::new();
    for (key, input) in scores {
        inputs.insert(key.clone(), *input);
    }
    if amend {
        session.prefill(&mut inputs);
    }

    let report = session.commit(&inputs)?;
    let (graded, total) = session.progress();
    let next = session.advance().map(|s| s.dir_name().to_string());

    let gradebook = match &report.gradebook {
        PatchOutcome::Updated { row, previous } => {
            json!({ "status": "updated", "row": row, "previous": previous })
        }
        PatchOutcome::Unchanged { row } => json!({ "status": "unchanged", "row": row }),
    };

    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "student": report.student,
            "id": report.student_id,
            "scores": report.scores,
            "total": report.total,
            "gradebook": gradebook,
            "progress": { "graded": graded, "total": total },
            "next": next,
        })),
        human => {
            println!("{}: {}", report.student, report.total);
            if !cli.quiet {
                for (key, score) in &report.scores {
                    println!("  {} = {}", key, score);
                }
                match &report.gradebook {
                    PatchOutcome::Updated { previous, .. } if previous.is_empty() => {
                        println!("gradebook: set to {}", report.total)
                    }
                    PatchOutcome::Updated { previous, .. } => {
                        println!("gradebook: {} -> {}", previous, report.total)
                    }
                    PatchOutcome::Unchanged { .. } => println!("gradebook: unchanged"),
                }
                println!("progress: {}/{}", graded, total);
                if let Some(next) = &next {
                    println!("next: {}", next);
                }
            }
        }
    )
}
