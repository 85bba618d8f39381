//! Command implementations for all saiten commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use saiten_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        dispatch_command::execute(self, ctx)
    }
}

pub(super) mod dispatch_command {
    use super::*;

    use crate::cli::{
        AssignmentArgs, CommentArgs, ConfigCommands, ExportArgs, GradeArgs, SchemaCommands,
        StudentArgs,
    };
    use crate::commands::dispatch::trace_command;
    use crate::commands::{comment, config, export, grade, list, schema, show, status};

    pub(super) fn execute(cmd: &Commands, ctx: &CommandContext) -> Result<()> {
        match cmd {
            Commands::Subjects => execute_subjects(ctx),
            Commands::Assignments { subject } => execute_assignments(ctx, subject),
            Commands::Students(args) => execute_students(ctx, args),
            Commands::Status(args) => execute_status(ctx, args),
            Commands::Schema { command } => execute_schema(ctx, command),
            Commands::Show(args) => execute_show(ctx, args),
            Commands::Grade(args) => execute_grade(ctx, args),
            Commands::Comment(args) => execute_comment(ctx, args),
            Commands::Export(args) => execute_export(ctx, args),
            Commands::Config { command } => execute_config(ctx, command),
        }
    }

    fn execute_subjects(ctx: &CommandContext) -> Result<()> {
        let workspace = ctx.workspace()?;
        trace_command!(ctx.cli, ctx.start, "open_workspace");
        list::execute_subjects(ctx.cli, &workspace)
    }

    fn execute_assignments(ctx: &CommandContext, subject: &str) -> Result<()> {
        let workspace = ctx.workspace()?;
        trace_command!(ctx.cli, ctx.start, "open_workspace");
        list::execute_assignments(ctx.cli, &workspace, subject)
    }

    fn execute_students(ctx: &CommandContext, args: &AssignmentArgs) -> Result<()> {
        let session = ctx.session(args)?;
        trace_command!(ctx.cli, ctx.start, "open_session");
        list::execute_students(ctx.cli, &session)
    }

    fn execute_status(ctx: &CommandContext, args: &AssignmentArgs) -> Result<()> {
        let session = ctx.session(args)?;
        trace_command!(ctx.cli, ctx.start, "open_session");
        status::execute(ctx.cli, &session)
    }

    fn execute_schema(ctx: &CommandContext, command: &SchemaCommands) -> Result<()> {
        match command {
            SchemaCommands::Show(args) => {
                let assignment = ctx.assignment(args)?;
                schema::execute_show(ctx.cli, &assignment)
            }
            SchemaCommands::Set { target, file } => {
                let assignment = ctx.assignment(target)?;
                schema::execute_set(ctx.cli, &assignment, file)
            }
            SchemaCommands::Delete(args) => {
                let assignment = ctx.assignment(args)?;
                schema::execute_delete(ctx.cli, &assignment)
            }
            SchemaCommands::Check { file } => schema::execute_check(ctx.cli, file),
        }
    }

    fn execute_show(ctx: &CommandContext, args: &StudentArgs) -> Result<()> {
        let mut session = ctx.session(&args.target)?;
        trace_command!(ctx.cli, ctx.start, "open_session");
        session.select(&args.student)?;
        show::execute(ctx.cli, &session)
    }

    fn execute_grade(ctx: &CommandContext, args: &GradeArgs) -> Result<()> {
        let mut session = ctx.session(&args.student.target)?;
        trace_command!(ctx.cli, ctx.start, "open_session");
        session.select(&args.student.student)?;
        grade::execute(ctx.cli, &mut session, &args.scores, args.amend)?;
        trace_command!(ctx.cli, ctx.start, "commit");
        Ok(())
    }

    fn execute_comment(ctx: &CommandContext, args: &CommentArgs) -> Result<()> {
        let assignment = ctx.assignment(&args.student.target)?;
        let student = assignment.student(&args.student.student)?;
        comment::execute(ctx.cli, &student, args.set.as_deref())
    }

    fn execute_export(ctx: &CommandContext, args: &ExportArgs) -> Result<()> {
        let assignment = ctx.assignment(&args.target)?;
        export::execute(
            ctx.cli,
            &assignment,
            args.dest.as_deref(),
            args.include_app_files,
        )?;
        trace_command!(ctx.cli, ctx.start, "export");
        Ok(())
    }

    fn execute_config(ctx: &CommandContext, command: &ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Show => config::execute_show(ctx.cli, &ctx.config, &ctx.base_dir()),
            ConfigCommands::SetBaseDir { dir, no_copy } => {
                config::execute_set_base_dir(ctx.cli, &ctx.config, &ctx.base_dir(), dir, *no_copy)
            }
            ConfigCommands::SetGradebook {
                id_header,
                grade_header,
            } => config::execute_set_gradebook(
                ctx.cli,
                &ctx.config,
                id_header.as_deref(),
                grade_header.as_deref(),
            ),
        }
    }
}
