//! GitHub clone command implementation
//!
//! Fetches the authenticated user's repository list and clones whatever is
//! missing from the hub directory.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use indicatif::ProgressBar;

use crate::exec::SystemRunner;
use crate::github::{
    clone_missing, filter_remote_repos, list_remote_repos, CloneAction, CloneFilter,
};
use crate::utils::{set_terminal_title, set_terminal_title_and_flush};

const FETCHING_MESSAGE: &str = "🔍 Fetching repositories from GitHub...";

/// Handles the GitHub clone command
pub async fn handle_clone_command(
    base_dir: &Path,
    limit: u32,
    filter: CloneFilter,
) -> Result<()> {
    set_terminal_title("🚀 repohub");

    let runner = SystemRunner::new();

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(FETCHING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let listing = list_remote_repos(&runner, limit).await;
    spinner.finish_and_clear();

    let repos = match listing {
        Ok(repos) => filter_remote_repos(repos, &filter),
        Err(e) => {
            set_terminal_title_and_flush("✅ repohub");
            return Err(e);
        }
    };

    if repos.is_empty() {
        println!("No repositories to clone.");
        set_terminal_title_and_flush("✅ repohub");
        return Ok(());
    }

    let repo_word = if repos.len() == 1 {
        "repository"
    } else {
        "repositories"
    };
    println!(
        "🚀 Cloning {} {} into {}",
        repos.len(),
        repo_word,
        base_dir.display()
    );
    println!();

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("cloning...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let outcomes = clone_missing(&runner, base_dir, &repos).await?;
    spinner.finish_and_clear();

    let max_name_length = outcomes
        .iter()
        .map(|o| o.repo.name_with_owner.len())
        .max()
        .unwrap_or(0);

    let mut cloned = 0usize;
    let mut present = 0usize;
    let mut failed = 0usize;
    for outcome in &outcomes {
        let detail = match &outcome.action {
            CloneAction::Cloned => {
                cloned += 1;
                "cloned".to_string()
            }
            CloneAction::AlreadyPresent => {
                present += 1;
                "already present".to_string()
            }
            CloneAction::Failed(message) => {
                failed += 1;
                message.clone()
            }
        };
        println!(
            "{} {:width$}  {}",
            outcome.symbol(),
            outcome.repo.name_with_owner,
            detail,
            width = max_name_length
        );
    }

    println!();
    println!("✅ {cloned} cloned • {present} already present • {failed} failed");

    set_terminal_title_and_flush("✅ repohub");
    Ok(())
}
