use anyhow::Result;

use super::{CommandKind, CommandResult, CommandSummary, helper};
use crate::{
    cli::args::{ExtractArgs, overrides},
    core::{OutputPlan, ProjectContext},
};

pub fn extract(args: ExtractArgs) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&overrides(&args.common, &args.policy))?;
    let plan = OutputPlan {
        catalogs: Some(ctx.layout.clone()),
        write_sources: args.write,
    };

    let (summary, failures) = helper::run_project(&ctx, &plan);
    Ok(CommandResult {
        kind: CommandKind::Extract,
        summary: CommandSummary::Extract(summary),
        failures,
    })
}
