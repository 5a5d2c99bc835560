use anyhow::Result;

use super::{CommandKind, CommandResult, CommandSummary, helper};
use crate::{
    cli::args::{CheckArgs, overrides},
    core::{OutputPlan, ProjectContext},
};

pub fn check(args: CheckArgs) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&overrides(&args.common, &args.policy))?;

    let (summary, failures) = helper::run_project(&ctx, &OutputPlan::dry_run());
    Ok(CommandResult {
        kind: CommandKind::Check,
        summary: CommandSummary::Check(summary),
        failures,
    })
}
