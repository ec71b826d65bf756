//! Repository metadata for display purposes
//!
//! This capability is consumed by the presentation layer only; the batch
//! engine never depends on it. The default provider shells out to
//! `onefetch` and flattens its tagged JSON field list into a flat summary.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::core::RepoRef;
use crate::exec::CommandRunner;

/// Flat, display-ready summary of one repository
#[derive(Clone, Debug, Default)]
pub struct RepoMetadata {
    pub name: String,
    /// Short commit id of HEAD
    pub head: String,
    /// Pending working-tree changes, e.g. "added 1, modified 2, deleted 0"
    pub pending: String,
    pub authors: Vec<String>,
    pub url: String,
    pub commits: u64,
    pub lines_of_code: u64,
    pub license: String,
    pub last_change: String,
}

/// Source of per-repository metadata, queried by the UI layer
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch(&self, repo: &RepoRef) -> Result<RepoMetadata>;
}

/// Provider backed by `onefetch <path> -o json`
pub struct OnefetchProvider {
    runner: Arc<dyn CommandRunner>,
}

impl OnefetchProvider {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl MetadataProvider for OnefetchProvider {
    async fn fetch(&self, repo: &RepoRef) -> Result<RepoMetadata> {
        let path = repo.path.to_string_lossy();
        let output = self
            .runner
            .run("onefetch", &[path.as_ref(), "-o", "json"], &repo.path)
            .await
            .context("failed to run onefetch")?;

        if !output.success() {
            anyhow::bail!("onefetch failed: {}", output.detail());
        }

        parse_onefetch_json(&output.stdout)
    }
}

// onefetch's JSON is a list of single-variant objects; every field is
// optional and order is not guaranteed.
#[derive(Deserialize)]
struct OnefetchRoot {
    #[serde(default, rename = "infoFields")]
    info_fields: Vec<InfoField>,
}

#[derive(Deserialize, Default)]
struct InfoField {
    #[serde(rename = "ProjectInfo")]
    project: Option<ProjectInfo>,
    #[serde(rename = "HeadInfo")]
    head: Option<HeadInfo>,
    #[serde(rename = "PendingInfo")]
    pending: Option<PendingInfo>,
    #[serde(rename = "AuthorsInfo")]
    authors: Option<AuthorsInfo>,
    #[serde(rename = "UrlInfo")]
    url: Option<UrlInfo>,
    #[serde(rename = "CommitsInfo")]
    commits: Option<CommitsInfo>,
    #[serde(rename = "LocInfo")]
    loc: Option<LocInfo>,
    #[serde(rename = "LicenseInfo")]
    license: Option<LicenseInfo>,
    #[serde(rename = "LastChangeInfo")]
    last_change: Option<LastChangeInfo>,
}

#[derive(Deserialize)]
struct ProjectInfo {
    #[serde(rename = "repoName")]
    repo_name: String,
}

#[derive(Deserialize)]
struct HeadInfo {
    #[serde(rename = "headRefs")]
    head_refs: HeadRefs,
}

#[derive(Deserialize)]
struct HeadRefs {
    #[serde(rename = "shortCommitId")]
    short_commit_id: String,
}

#[derive(Deserialize)]
struct PendingInfo {
    #[serde(default)]
    added: u64,
    #[serde(default)]
    deleted: u64,
    #[serde(default)]
    modified: u64,
}

#[derive(Deserialize)]
struct AuthorsInfo {
    #[serde(default)]
    authors: Vec<AuthorInfo>,
}

#[derive(Deserialize)]
struct AuthorInfo {
    name: String,
}

#[derive(Deserialize)]
struct UrlInfo {
    #[serde(rename = "repoUrl")]
    repo_url: String,
}

#[derive(Deserialize)]
struct CommitsInfo {
    #[serde(rename = "numberOfCommits", default)]
    number_of_commits: u64,
}

#[derive(Deserialize)]
struct LocInfo {
    #[serde(rename = "linesOfCode", default)]
    lines_of_code: u64,
}

#[derive(Deserialize)]
struct LicenseInfo {
    #[serde(default)]
    license: String,
}

#[derive(Deserialize)]
struct LastChangeInfo {
    #[serde(rename = "lastChange", default)]
    last_change: String,
}

/// Flattens onefetch's tagged `infoFields` array into a [`RepoMetadata`]
fn parse_onefetch_json(payload: &str) -> Result<RepoMetadata> {
    let root: OnefetchRoot =
        serde_json::from_str(payload).context("failed to parse onefetch output")?;

    let mut metadata = RepoMetadata::default();
    for field in root.info_fields {
        if let Some(project) = field.project {
            metadata.name = project.repo_name;
        }
        if let Some(head) = field.head {
            metadata.head = head.head_refs.short_commit_id;
        }
        if let Some(pending) = field.pending {
            metadata.pending = format!(
                "added {}, modified {}, deleted {}",
                pending.added, pending.modified, pending.deleted
            );
        }
        if let Some(authors) = field.authors {
            metadata.authors = authors.authors.into_iter().map(|a| a.name).collect();
        }
        if let Some(url) = field.url {
            metadata.url = url.repo_url;
        }
        if let Some(commits) = field.commits {
            metadata.commits = commits.number_of_commits;
        }
        if let Some(loc) = field.loc {
            metadata.lines_of_code = loc.lines_of_code;
        }
        if let Some(license) = field.license {
            metadata.license = license.license;
        }
        if let Some(last_change) = field.last_change {
            metadata.last_change = last_change.last_change;
        }
    }

    Ok(metadata)
}
