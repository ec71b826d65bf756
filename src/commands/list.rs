//! Hub listing command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::core::{discover_repos, NO_REPOS_MESSAGE, PATH_DISPLAY_WIDTH};
use crate::exec::SystemRunner;
use crate::metadata::{MetadataProvider, OnefetchProvider};
use crate::utils::shorten_path;

/// Handles the hub listing command
pub async fn handle_list_command(base_dir: &Path, with_info: bool) -> Result<()> {
    let repos = discover_repos(base_dir, &[], &[])?;

    if repos.is_empty() {
        println!("{NO_REPOS_MESSAGE}");
        return Ok(());
    }

    let max_name_length = repos.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let provider = with_info.then(|| OnefetchProvider::new(Arc::new(SystemRunner::new())));

    println!();
    for repo in &repos {
        let path = repo.path.to_string_lossy();
        println!(
            "📁 {:width$}  {}",
            repo.name,
            shorten_path(&path, PATH_DISPLAY_WIDTH),
            width = max_name_length
        );

        if let Some(provider) = &provider {
            match provider.fetch(repo).await {
                Ok(info) => {
                    let license = if info.license.is_empty() {
                        "no license"
                    } else {
                        info.license.as_str()
                    };
                    println!(
                        "   {} commits • {} lines • {}",
                        info.commits, info.lines_of_code, license
                    );
                    if !info.pending.is_empty() {
                        println!("   pending: {}", info.pending);
                    }
                }
                Err(e) => println!("   (no metadata: {e})"),
            }
        }
    }

    println!();
    let repo_word = if repos.len() == 1 {
        "repository"
    } else {
        "repositories"
    };
    println!("📦 {} {} in {}", repos.len(), repo_word, base_dir.display());

    Ok(())
}
