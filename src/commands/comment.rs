//! `saiten comment` - read or replace a student's feedback comment

use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::print_json;
use crate::output_by_format_result;
use saiten_core::error::Result;
use saiten_core::store::Student;

pub fn execute(cli: &Cli, student: &Student, set: Option<&str>) -> Result<()> {
    if let Some(text) = set {
        student.set_comment(text)?;
        tracing::debug!(student = student.dir_name(), "comment_saved");
    }
    let comment = student.comment()?;

    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "student": student.dir_name(),
            "comment": comment,
        })),
        human => {
            match (&comment, set.is_some()) {
                (_, true) if cli.quiet => {}
                (_, true) => println!("Saved comment for {}", student.dir_name()),
                (Some(text), false) => println!("{}", text),
                (None, false) => {
                    if !cli.quiet {
                        eprintln!("No comment for {}", student.dir_name());
                    }
                }
            }
        }
    )
}
