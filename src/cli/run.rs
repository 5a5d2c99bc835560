use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, extract::extract, init::init},
};

/// Dispatch to the command handler.
///
/// `Err` means the command could not run at all (bad config, bad flags);
/// per-file failures are part of the returned [`CommandResult`].
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(args)) => extract(args),
        Some(Command::Check(args)) => check(args),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
