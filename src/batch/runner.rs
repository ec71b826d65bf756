//! Batch orchestration across the whole hub

use crate::batch::processor::process_repository;
use crate::core::{discover_repos, BatchConfig, BatchReport};
use crate::error::HubError;
use crate::exec::CommandRunner;

/// Discovers the hub's repositories and processes each in turn, strictly
/// sequentially, returning the aggregate report.
///
/// Discovery failure (missing or unreadable hub directory) aborts the run
/// before any repository is touched. After that point nothing aborts the
/// batch: each repository's failures stay inside its own result.
pub async fn run_batch(
    config: &BatchConfig,
    runner: &dyn CommandRunner,
) -> Result<BatchReport, HubError> {
    let repos = discover_repos(&config.base_dir, &config.include, &config.exclude)?;

    let mut report = BatchReport::new();
    for repo in &repos {
        report.push(process_repository(repo, config, runner).await);
    }

    Ok(report)
}
