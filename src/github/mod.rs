//! GitHub repository listing and cloning through the `gh` CLI

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::exec::CommandRunner;

/// Fields requested from `gh repo list --json`
const GH_REPO_FIELDS: &str = "nameWithOwner,name,description,isPrivate,isFork,stargazerCount,url";

/// Default number of repositories requested from GitHub
pub const DEFAULT_LIST_LIMIT: u32 = 1000;

/// One repository as reported by `gh repo list`
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRepo {
    pub name_with_owner: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_fork: bool,
    #[serde(default)]
    pub stargazer_count: u32,
    #[serde(default)]
    pub url: String,
}

/// Filters applied to the remote listing before cloning
#[derive(Clone, Debug, Default)]
pub struct CloneFilter {
    /// Drop forked repositories
    pub skip_forks: bool,
    /// Keep only repositories with at least this many stars
    pub min_stars: u32,
    /// Full `owner/name` identifiers to skip
    pub exclude: Vec<String>,
}

impl CloneFilter {
    fn keeps(&self, repo: &RemoteRepo) -> bool {
        if self.skip_forks && repo.is_fork {
            return false;
        }
        if repo.stargazer_count < self.min_stars {
            return false;
        }
        !self.exclude.iter().any(|e| e == &repo.name_with_owner)
    }
}

/// How one repository fared during a clone sweep
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CloneAction {
    Cloned,
    AlreadyPresent,
    Failed(String),
}

/// Per-repository outcome of [`clone_missing`]
#[derive(Clone, Debug)]
pub struct CloneOutcome {
    pub repo: RemoteRepo,
    pub action: CloneAction,
}

impl CloneOutcome {
    /// Returns the emoji symbol for this outcome
    pub fn symbol(&self) -> &str {
        match self.action {
            CloneAction::Cloned => "🟢",
            CloneAction::AlreadyPresent => "🟠",
            CloneAction::Failed(_) => "🔴",
        }
    }
}

/// Lists the authenticated user's repositories via `gh repo list`
pub async fn list_remote_repos(
    runner: &dyn CommandRunner,
    limit: u32,
) -> Result<Vec<RemoteRepo>> {
    let limit_str = limit.to_string();
    let args = [
        "repo",
        "list",
        "--limit",
        limit_str.as_str(),
        "--json",
        GH_REPO_FIELDS,
    ];

    let output = runner
        .run("gh", &args, Path::new("."))
        .await
        .context("failed to run gh")?;

    if !output.success() {
        anyhow::bail!("gh repo list failed: {}", output.detail());
    }

    let repos: Vec<RemoteRepo> =
        serde_json::from_str(&output.stdout).context("failed to parse gh repo list output")?;
    Ok(repos)
}

/// Applies the clone filter, keeping the listing order
pub fn filter_remote_repos(repos: Vec<RemoteRepo>, filter: &CloneFilter) -> Vec<RemoteRepo> {
    repos.into_iter().filter(|r| filter.keeps(r)).collect()
}

/// Clones every listed repository that is not already present under
/// `base_dir`, creating the directory if needed.
///
/// One repository's clone failure never aborts the sweep; each outcome is
/// reported individually.
pub async fn clone_missing(
    runner: &dyn CommandRunner,
    base_dir: &Path,
    repos: &[RemoteRepo],
) -> Result<Vec<CloneOutcome>> {
    if !base_dir.exists() {
        std::fs::create_dir_all(base_dir)
            .with_context(|| format!("failed to create {}", base_dir.display()))?;
    }

    let mut outcomes = Vec::with_capacity(repos.len());
    for repo in repos {
        let target = base_dir.join(&repo.name);
        if target.is_dir() {
            outcomes.push(CloneOutcome {
                repo: repo.clone(),
                action: CloneAction::AlreadyPresent,
            });
            continue;
        }

        let action = match runner
            .run("gh", &["repo", "clone", &repo.name_with_owner], base_dir)
            .await
        {
            Ok(output) if output.success() => CloneAction::Cloned,
            Ok(output) => CloneAction::Failed(output.detail().to_string()),
            Err(e) => CloneAction::Failed(e.to_string()),
        };

        outcomes.push(CloneOutcome {
            repo: repo.clone(),
            action,
        });
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::scripted::ScriptedRunner;
    use tempfile::TempDir;

    fn remote(name_with_owner: &str, is_fork: bool, stars: u32) -> RemoteRepo {
        let name = name_with_owner.split('/').next_back().unwrap().to_string();
        RemoteRepo {
            name_with_owner: name_with_owner.to_string(),
            name,
            description: None,
            is_private: false,
            is_fork,
            stargazer_count: stars,
            url: format!("https://github.com/{name_with_owner}"),
        }
    }

    #[test]
    fn test_parse_gh_repo_list_output() {
        let payload = r#"[
            {
                "nameWithOwner": "octo/widgets",
                "name": "widgets",
                "description": "A widget library",
                "isPrivate": false,
                "isFork": false,
                "stargazerCount": 42,
                "url": "https://github.com/octo/widgets"
            },
            {
                "nameWithOwner": "octo/secret",
                "name": "secret",
                "description": null,
                "isPrivate": true,
                "isFork": true,
                "stargazerCount": 0,
                "url": "https://github.com/octo/secret"
            }
        ]"#;

        let repos: Vec<RemoteRepo> = serde_json::from_str(payload).unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name_with_owner, "octo/widgets");
        assert_eq!(repos[0].stargazer_count, 42);
        assert!(repos[1].is_private);
        assert!(repos[1].description.is_none());
    }

    #[test]
    fn test_filter_drops_forks_low_stars_and_excluded() {
        let repos = vec![
            remote("octo/keep", false, 10),
            remote("octo/fork", true, 50),
            remote("octo/obscure", false, 1),
            remote("octo/banned", false, 99),
        ];
        let filter = CloneFilter {
            skip_forks: true,
            min_stars: 5,
            exclude: vec!["octo/banned".to_string()],
        };

        let kept = filter_remote_repos(repos, &filter);
        let names: Vec<_> = kept.iter().map(|r| r.name_with_owner.as_str()).collect();
        assert_eq!(names, vec!["octo/keep"]);
    }

    #[tokio::test]
    async fn test_clone_missing_skips_existing_directories() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("present")).unwrap();

        let repos = vec![remote("octo/present", false, 0), remote("octo/absent", false, 0)];
        let runner = ScriptedRunner::new();

        let outcomes = clone_missing(&runner, temp_dir.path(), &repos).await.unwrap();
        assert_eq!(outcomes[0].action, CloneAction::AlreadyPresent);
        assert_eq!(outcomes[1].action, CloneAction::Cloned);

        assert_eq!(runner.recorded(), vec!["gh repo clone octo/absent"]);
    }

    #[tokio::test]
    async fn test_clone_failure_does_not_abort_sweep() {
        let temp_dir = TempDir::new().unwrap();
        let repos = vec![remote("octo/bad", false, 0), remote("octo/good", false, 0)];
        let runner =
            ScriptedRunner::new().on("gh repo clone octo/bad", 1, "", "permission denied");

        let outcomes = clone_missing(&runner, temp_dir.path(), &repos).await.unwrap();
        assert!(matches!(outcomes[0].action, CloneAction::Failed(_)));
        assert_eq!(outcomes[1].action, CloneAction::Cloned);
    }

    #[tokio::test]
    async fn test_clone_creates_missing_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("hub");
        let runner = ScriptedRunner::new();

        clone_missing(&runner, &base, &[]).await.unwrap();
        assert!(base.is_dir());
    }
}
