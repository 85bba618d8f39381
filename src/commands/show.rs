//! `saiten show` - display one student's submission and grading state

use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::print_json;
use crate::output_by_format_result;
use saiten_core::error::{Result, SaitenError};
use saiten_core::session::GradingSession;
use saiten_core::store::Student;

/// Gradebook cell for the student; `None` when there is no gradebook yet
fn gradebook_cell(session: &GradingSession, student: &Student) -> Result<Option<Option<String>>> {
    match session
        .patcher()
        .read_grade(&session.assignment().gradebook_path(), student.id())
    {
        Ok(cell) => Ok(Some(cell)),
        Err(SaitenError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn execute(cli: &Cli, session: &GradingSession) -> Result<()> {
    let student = session
        .current()
        .ok_or_else(|| SaitenError::not_found("student", session.assignment().root().display()))?;
    let submissions = student.submissions()?;
    let saved = session.saved_scores();
    let comment = student.comment()?;
    let cell = gradebook_cell(session, student)?;

    let criteria: Vec<_> = session
        .schema()
        .flatten()
        .map(|(path, criterion)| {
            let score = saved.and_then(|s| s.get(&path.flat_key())).copied();
            (path, criterion, score)
        })
        .collect();

    output_by_format_result!(cli.format,
        json => {
            let paths = |files: &[std::path::PathBuf]| -> Vec<String> {
                files.iter().map(|p| p.display().to_string()).collect()
            };
            print_json(&json!({
                "dir": student.dir_name(),
                "name": student.display_name(),
                "id": student.id(),
                "submission": {
                    "text": submissions.text.as_ref().map(|p| p.display().to_string()),
                    "pdfs": paths(&submissions.pdfs),
                    "images": paths(&submissions.images),
                    "others": paths(&submissions.others),
                },
                "scores": saved,
                "total": saved.map(|s| s.values().map(|&v| u64::from(v)).sum::<u64>()),
                "gradebook": cell.clone().flatten(),
                "comment": comment,
            }))
        },
        human => {
            println!("{} ({})", student.display_name(), student.id());
            println!("  dir: {}", student.root().display());

            if submissions.is_empty() {
                println!("  submission: none");
            } else {
                if let Some(text) = &submissions.text {
                    println!("  text: {}", text.display());
                }
                for file in submissions
                    .pdfs
                    .iter()
                    .chain(&submissions.images)
                    .chain(&submissions.others)
                {
                    println!("  file: {}", file.display());
                }
            }

            println!();
            for (path, criterion, score) in &criteria {
                let shown = score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
                println!("  {:<24} {:>4} / {}", path.to_string(), shown, criterion.max_score);
            }
            match saved {
                Some(scores) => println!(
                    "  total: {}",
                    scores.values().map(|&v| u64::from(v)).sum::<u64>()
                ),
                None => println!("  not graded"),
            }
            match &cell {
                Some(Some(value)) => {
                    println!("  gradebook: {}", if value.is_empty() { "-" } else { value.as_str() })
                }
                Some(None) => println!("  gradebook: no row for {}", student.id()),
                None => println!("  gradebook: missing"),
            }

            if let Some(text) = &comment {
                println!();
                println!("{}", text);
            }
        }
    )
}
