//! Workflow steps executed against one repository
//!
//! Each step turns every failure mode (non-zero exit, timeout, spawn
//! failure, filesystem error) into a [`StepOutcome`]; nothing escapes a
//! step as a Rust error. Whether a failure is fatal for the repository is
//! declared on [`StepKind`], not decided here.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use ignore::WalkBuilder;

use crate::core::{
    BatchConfig, RepoRef, StepKind, StepOutcome, IGNORE_ENTRY, JUNK_FILE_NAMES,
};
use crate::exec::{CommandOutput, CommandRunner};

// Git command arguments
const GIT_REV_PARSE_HEAD_ARGS: &[&str] = &["rev-parse", "--abbrev-ref", "HEAD"];
const GIT_PULL_ARGS: &[&str] = &["pull"];
const GIT_ADD_ALL_ARGS: &[&str] = &["add", "."];
const GIT_ADD_IGNORE_ARGS: &[&str] = &["add", ".gitignore"];
const GIT_STATUS_PORCELAIN_ARGS: &[&str] = &["status", "--porcelain"];
const GIT_SHOW_LAST_ARGS: &[&str] = &["show", "--stat", "--oneline", "-1"];
const GIT_PUSH_ARGS: &[&str] = &["push"];

/// Runs a git command with the repository root as working directory
async fn run_git(
    runner: &dyn CommandRunner,
    repo: &RepoRef,
    args: &[&str],
) -> Result<CommandOutput> {
    runner.run("git", args, &repo.path).await
}

/// Reads the current branch name via `git rev-parse --abbrev-ref HEAD`
pub async fn detect_branch(repo: &RepoRef, runner: &dyn CommandRunner) -> StepOutcome {
    match run_git(runner, repo, GIT_REV_PARSE_HEAD_ARGS).await {
        Ok(output) if output.success() => {
            StepOutcome::ok(StepKind::DetectBranch, format!("on branch {}", output.stdout))
        }
        Ok(output) => StepOutcome::failed(StepKind::DetectBranch, output.detail().to_string()),
        Err(e) => StepOutcome::failed(StepKind::DetectBranch, e.to_string()),
    }
}

/// Runs `git pull`
pub async fn pull(repo: &RepoRef, runner: &dyn CommandRunner) -> StepOutcome {
    match run_git(runner, repo, GIT_PULL_ARGS).await {
        Ok(output) if output.success() => {
            let message = if output.stdout.is_empty() {
                "pulled".to_string()
            } else {
                output.stdout
            };
            StepOutcome::ok(StepKind::Pull, message)
        }
        Ok(output) => StepOutcome::failed(StepKind::Pull, output.detail().to_string()),
        Err(e) => StepOutcome::failed(StepKind::Pull, e.to_string()),
    }
}

/// Appends the ignore entry to `.gitignore` when missing, creating the file
/// if absent. Returns whether the file was modified.
fn ensure_ignore_entry(ignore_path: &Path) -> std::io::Result<bool> {
    if !ignore_path.exists() {
        fs::write(ignore_path, format!("{IGNORE_ENTRY}\n"))?;
        return Ok(true);
    }

    let contents = fs::read_to_string(ignore_path)?;
    if contents.lines().any(|line| line.trim() == IGNORE_ENTRY) {
        return Ok(false);
    }

    let mut file = fs::OpenOptions::new().append(true).open(ignore_path)?;
    file.write_all(format!("\n{IGNORE_ENTRY}\n").as_bytes())?;
    Ok(true)
}

/// Ensures `.gitignore` carries the conventional ignore entry and stages
/// the file when it was modified
pub async fn normalize_ignore(repo: &RepoRef, runner: &dyn CommandRunner) -> StepOutcome {
    let ignore_path = repo.path.join(".gitignore");
    let updated = match ensure_ignore_entry(&ignore_path) {
        Ok(updated) => updated,
        Err(e) => {
            return StepOutcome::failed(
                StepKind::NormalizeIgnore,
                format!("failed to update .gitignore: {e}"),
            )
        }
    };

    if !updated {
        return StepOutcome::ok(
            StepKind::NormalizeIgnore,
            format!("{IGNORE_ENTRY} already ignored"),
        );
    }

    match run_git(runner, repo, GIT_ADD_IGNORE_ARGS).await {
        Ok(output) if output.success() => StepOutcome::ok(
            StepKind::NormalizeIgnore,
            format!("added {IGNORE_ENTRY} to .gitignore"),
        ),
        Ok(output) => StepOutcome::failed(
            StepKind::NormalizeIgnore,
            format!("failed to stage .gitignore: {}", output.detail()),
        ),
        Err(e) => StepOutcome::failed(
            StepKind::NormalizeIgnore,
            format!("failed to stage .gitignore: {e}"),
        ),
    }
}

/// Walks the repository for junk artifact files, ignoring nothing but the
/// `.git` directory itself
fn find_junk_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkBuilder::new(root)
        .standard_filters(false) // junk files are hidden and usually gitignored
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    for entry in walker.flatten() {
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if let Some(name) = entry.path().file_name().and_then(|n| n.to_str()) {
            if JUNK_FILE_NAMES.contains(&name) {
                files.push(entry.path().to_path_buf());
            }
        }
    }

    files.sort();
    files
}

/// Removes junk artifacts from both the git index (best-effort) and the
/// filesystem
pub async fn purge_junk(repo: &RepoRef, runner: &dyn CommandRunner) -> StepOutcome {
    let junk = find_junk_files(&repo.path);
    if junk.is_empty() {
        return StepOutcome::ok(StepKind::PurgeJunk, "no junk files found");
    }

    let total = junk.len();
    let mut failed = 0usize;
    for file in &junk {
        let rel = file.strip_prefix(&repo.path).unwrap_or(file);
        let rel_str = rel.to_string_lossy();
        // The file may never have been tracked; an index miss is fine
        let _ = run_git(runner, repo, &["rm", "--cached", rel_str.as_ref()]).await;

        if fs::remove_file(file).is_err() {
            failed += 1;
        }
    }

    if failed > 0 {
        StepOutcome::failed(
            StepKind::PurgeJunk,
            format!("failed to remove {failed} of {total} junk files"),
        )
    } else {
        let file_word = if total == 1 { "file" } else { "files" };
        StepOutcome::ok(StepKind::PurgeJunk, format!("removed {total} junk {file_word}"))
    }
}

/// Delegates commit-message generation and committing to the configured
/// external tool
pub async fn run_commit_tool(
    repo: &RepoRef,
    config: &BatchConfig,
    runner: &dyn CommandRunner,
) -> StepOutcome {
    let message = config.message.resolve();
    match runner
        .run(&config.commit_tool, &[message.as_str()], &repo.path)
        .await
    {
        Ok(output) if output.success() => {
            let detail = if output.stdout.is_empty() {
                format!("{} completed", config.commit_tool)
            } else {
                output.stdout
            };
            StepOutcome::ok(StepKind::CommitTool, detail)
        }
        Ok(output) => StepOutcome::failed(StepKind::CommitTool, output.detail().to_string()),
        Err(e) => StepOutcome::failed(StepKind::CommitTool, e.to_string()),
    }
}

/// Stages all changes and commits them with the resolved message.
///
/// Returns the outcome plus whether a commit was actually created; an empty
/// porcelain status is a successful terminal state ("nothing to commit"),
/// not a failure, and must not be followed by a push.
pub async fn stage_and_commit(
    repo: &RepoRef,
    config: &BatchConfig,
    runner: &dyn CommandRunner,
) -> (StepOutcome, bool) {
    match run_git(runner, repo, GIT_ADD_ALL_ARGS).await {
        Ok(output) if output.success() => {}
        Ok(output) => {
            return (
                StepOutcome::failed(StepKind::StageAndCommit, output.detail().to_string()),
                false,
            )
        }
        Err(e) => return (StepOutcome::failed(StepKind::StageAndCommit, e.to_string()), false),
    }

    let status = match run_git(runner, repo, GIT_STATUS_PORCELAIN_ARGS).await {
        Ok(output) if output.success() => output.stdout,
        Ok(output) => {
            return (
                StepOutcome::failed(StepKind::StageAndCommit, output.detail().to_string()),
                false,
            )
        }
        Err(e) => return (StepOutcome::failed(StepKind::StageAndCommit, e.to_string()), false),
    };

    if status.trim().is_empty() {
        return (
            StepOutcome::ok(StepKind::StageAndCommit, "nothing to commit"),
            false,
        );
    }

    let message = config.message.resolve();
    match run_git(runner, repo, &["commit", "-m", &message]).await {
        Ok(output) if output.success() => {}
        Ok(output) => {
            return (
                StepOutcome::failed(StepKind::StageAndCommit, output.detail().to_string()),
                false,
            )
        }
        Err(e) => return (StepOutcome::failed(StepKind::StageAndCommit, e.to_string()), false),
    }

    // Commit summary is cosmetic; ignore failures
    let mut detail = format!("committed \"{message}\"");
    if let Ok(output) = run_git(runner, repo, GIT_SHOW_LAST_ARGS).await {
        if output.success() {
            if let Some(stat_line) = output.stdout.lines().last() {
                let stat_line = stat_line.trim();
                if !stat_line.is_empty() && stat_line.contains("changed") {
                    detail.push_str(&format!(" ({stat_line})"));
                }
            }
        }
    }

    (StepOutcome::ok(StepKind::StageAndCommit, detail), true)
}

/// Runs `git push`
pub async fn push(repo: &RepoRef, runner: &dyn CommandRunner) -> StepOutcome {
    match run_git(runner, repo, GIT_PUSH_ARGS).await {
        Ok(output) if output.success() => {
            let message = if output.stdout.is_empty() {
                "pushed to remote".to_string()
            } else {
                output.stdout
            };
            StepOutcome::ok(StepKind::Push, message)
        }
        Ok(output) => StepOutcome::failed(StepKind::Push, output.detail().to_string()),
        Err(e) => StepOutcome::failed(StepKind::Push, e.to_string()),
    }
}
