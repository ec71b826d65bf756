//! Per-repository workflow sequencing

use std::time::Instant;

use crate::batch::steps;
use crate::core::{BatchConfig, RepoRef, RepositoryResult};
use crate::exec::CommandRunner;

/// Runs the configured workflow steps against one repository and returns
/// the finalized result.
///
/// Step order is fixed: detect-branch, pull, normalize-ignore, purge-junk,
/// then the commit phase (external tool or local stage/commit, never both),
/// then push when the local phase actually committed. A failing fatal step
/// breaks the fatal chain for the repository; the informational steps have
/// no precondition beyond their config flag, so they still run.
///
/// Never returns an error and never panics: every failure is represented
/// inside the result.
pub async fn process_repository(
    repo: &RepoRef,
    config: &BatchConfig,
    runner: &dyn CommandRunner,
) -> RepositoryResult {
    let started = Instant::now();
    let mut result = RepositoryResult::new(repo.clone());

    let branch = steps::detect_branch(repo, runner).await;
    let mut chain_broken = !branch.succeeded;
    result.record(branch);

    if config.pull && !chain_broken {
        let outcome = steps::pull(repo, runner).await;
        chain_broken = !outcome.succeeded;
        result.record(outcome);
    }

    if config.normalize_ignore {
        result.record(steps::normalize_ignore(repo, runner).await);
    }
    if config.purge_junk {
        result.record(steps::purge_junk(repo, runner).await);
    }

    if !chain_broken {
        if config.use_commit_tool {
            result.record(steps::run_commit_tool(repo, config, runner).await);
        } else {
            let (outcome, committed) = steps::stage_and_commit(repo, config, runner).await;
            let commit_ok = outcome.succeeded;
            result.record(outcome);
            if committed && commit_ok {
                result.record(steps::push(repo, runner).await);
            }
        }
    }

    result.finish(started.elapsed());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::CommitMessage;
    use crate::core::StepKind;
    use crate::exec::scripted::ScriptedRunner;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir) -> (RepoRef, BatchConfig) {
        let repo = RepoRef {
            name: "fixture".to_string(),
            path: dir.path().to_path_buf(),
        };
        let mut config = BatchConfig::new(dir.path().parent().unwrap_or(dir.path()));
        config.message = CommitMessage::Literal("test commit".to_string());
        (repo, config)
    }

    fn step_names(result: &RepositoryResult) -> Vec<&'static str> {
        result.outcomes().iter().map(|o| o.kind.name()).collect()
    }

    #[tokio::test]
    async fn test_manual_commit_flow_runs_in_order() {
        let dir = TempDir::new().unwrap();
        let (repo, config) = fixture(&dir);
        let runner = ScriptedRunner::new()
            .on("git rev-parse --abbrev-ref HEAD", 0, "main", "")
            .on("git status --porcelain", 0, "M  file.txt", "");

        let result = process_repository(&repo, &config, &runner).await;
        assert!(result.overall_succeeded());
        assert_eq!(
            step_names(&result),
            vec!["detect-branch", "stage-and-commit", "push"]
        );
    }

    #[tokio::test]
    async fn test_pull_disabled_means_no_pull_outcome() {
        let dir = TempDir::new().unwrap();
        let (repo, config) = fixture(&dir);
        let runner = ScriptedRunner::new().on("git status --porcelain", 0, "", "");

        let result = process_repository(&repo, &config, &runner).await;
        assert!(result.outcome_of(StepKind::Pull).is_none());
    }

    #[tokio::test]
    async fn test_clean_tree_skips_push() {
        let dir = TempDir::new().unwrap();
        let (repo, config) = fixture(&dir);
        let runner = ScriptedRunner::new().on("git status --porcelain", 0, "", "");

        let result = process_repository(&repo, &config, &runner).await;
        assert!(result.overall_succeeded());

        let commit = result.outcome_of(StepKind::StageAndCommit).unwrap();
        assert_eq!(commit.message, "nothing to commit");
        assert!(result.outcome_of(StepKind::Push).is_none());
    }

    #[tokio::test]
    async fn test_pull_failure_breaks_fatal_chain_but_not_informational_steps() {
        let dir = TempDir::new().unwrap();
        let (repo, mut config) = fixture(&dir);
        config.pull = true;
        config.purge_junk = true;
        let runner = ScriptedRunner::new().on("git pull", 1, "", "could not resolve host");

        let result = process_repository(&repo, &config, &runner).await;
        assert!(!result.overall_succeeded());

        assert!(!result.outcome_of(StepKind::Pull).unwrap().succeeded);
        // Informational step still ran and was recorded
        assert!(result.outcome_of(StepKind::PurgeJunk).is_some());
        // The commit phase never started
        assert!(result.outcome_of(StepKind::StageAndCommit).is_none());
        assert!(result.outcome_of(StepKind::Push).is_none());
        assert!(!runner.recorded().contains(&"git add .".to_string()));
    }

    #[tokio::test]
    async fn test_unreadable_repo_aborts_everything_fatal() {
        let dir = TempDir::new().unwrap();
        let (repo, mut config) = fixture(&dir);
        config.normalize_ignore = true;
        let runner = ScriptedRunner::new().on(
            "git rev-parse",
            128,
            "",
            "fatal: not a git repository",
        );

        let result = process_repository(&repo, &config, &runner).await;
        assert!(!result.overall_succeeded());
        assert_eq!(
            step_names(&result),
            vec!["detect-branch", "normalize-ignore"]
        );
    }

    #[tokio::test]
    async fn test_commit_tool_phase_replaces_local_commit_and_push() {
        let dir = TempDir::new().unwrap();
        let (repo, mut config) = fixture(&dir);
        config.use_commit_tool = true;
        let runner = ScriptedRunner::new().on("git rev-parse --abbrev-ref HEAD", 0, "main", "");

        let result = process_repository(&repo, &config, &runner).await;
        assert!(result.overall_succeeded());
        assert_eq!(step_names(&result), vec!["detect-branch", "commit-tool"]);
        assert!(runner
            .recorded()
            .contains(&"ai_commit test commit".to_string()));
    }

    #[tokio::test]
    async fn test_commit_tool_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let (repo, mut config) = fixture(&dir);
        config.use_commit_tool = true;
        let runner = ScriptedRunner::new().on("ai_commit", 1, "", "tool exploded");

        let result = process_repository(&repo, &config, &runner).await;
        assert!(!result.overall_succeeded());
    }

    #[tokio::test]
    async fn test_elapsed_time_is_recorded() {
        let dir = TempDir::new().unwrap();
        let (repo, config) = fixture(&dir);
        let runner = ScriptedRunner::new().on("git status --porcelain", 0, "", "");

        let result = process_repository(&repo, &config, &runner).await;
        assert!(result.elapsed_seconds() >= 0.0);
    }
}
