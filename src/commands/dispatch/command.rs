//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::paths::resolve_base_dir;
use crate::cli::{AssignmentArgs, Cli};
use saiten_core::config::SaitenConfig;
use saiten_core::error::Result;
use saiten_core::session::GradingSession;
use saiten_core::store::{Assignment, Workspace};

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: SaitenConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: SaitenConfig, start: Instant) -> Self {
        Self { cli, config, start }
    }

    pub fn base_dir(&self) -> PathBuf {
        resolve_base_dir(self.cli.base_dir.as_deref(), &self.config.store.dir)
    }

    pub fn workspace(&self) -> Result<Workspace> {
        Workspace::open(&self.base_dir())
    }

    pub fn assignment(&self, args: &AssignmentArgs) -> Result<Assignment> {
        self.workspace()?
            .assignment(&args.subject, &args.assignment)
    }

    pub fn session(&self, args: &AssignmentArgs) -> Result<GradingSession> {
        GradingSession::open(self.assignment(args)?, self.config.gradebook.clone())
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("saiten {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("A grading console for teaching assistants.");
        println!();
        println!("Run `saiten --help` for usage information.");
        Ok(())
    }
}
