use rayon::prelude::*;
use tracing::debug;

use super::{ExtractSummary, FileFailure};
use crate::core::{FileIdentity, OutputPlan, ProjectContext, process_file};

/// Process every file of the project in parallel.
///
/// Files are independent: each gets its own registry and its outputs are
/// committed on their own, so one failing file does not stop the others.
pub fn run_project(ctx: &ProjectContext, plan: &OutputPlan) -> (ExtractSummary, Vec<FileFailure>) {
    let outcomes: Vec<_> = ctx
        .files
        .par_iter()
        .map(|path| {
            process_file(path, &ctx.source_root, &ctx.options, plan).map_err(|error| {
                let file = FileIdentity::relative_to(path.to_string_lossy(), &ctx.source_root);
                FileFailure {
                    path: path.clone(),
                    display_path: file.display_path,
                    error,
                }
            })
        })
        .collect();

    let mut summary = ExtractSummary {
        files: Vec::new(),
        write_sources: plan.write_sources,
    };
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(report) => summary.files.push(report),
            Err(failure) => failures.push(failure),
        }
    }
    summary
        .files
        .sort_by(|a, b| a.file.display_path.cmp(&b.file.display_path));
    failures.sort_by(|a, b| a.display_path.cmp(&b.display_path));

    debug!(
        processed = summary.files.len(),
        failed = failures.len(),
        "project done"
    );
    (summary, failures)
}
