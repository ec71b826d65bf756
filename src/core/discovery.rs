//! Repository discovery in the hub directory

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::HubError;

/// Identifies one repository in the hub
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoRef {
    /// Directory basename, used for filtering and display
    pub name: String,
    /// Absolute path of the repository root
    pub path: PathBuf,
}

/// Check if a .git file (for submodules/worktrees) contains gitdir reference
/// Only reads the first 5 lines for efficiency
fn is_git_file(path: &Path) -> bool {
    match fs::File::open(path) {
        Ok(file) => {
            let reader = BufReader::new(file);
            reader
                .lines()
                .take(5)
                .filter_map(Result::ok)
                .any(|line| line.trim_start().starts_with("gitdir:"))
        }
        Err(_) => false,
    }
}

/// Returns true when `path` is a repository root: it carries a `.git`
/// directory, or a `.git` file pointing at one
fn has_git_entry(path: &Path) -> bool {
    let git_path = path.join(".git");
    match fs::metadata(&git_path) {
        Ok(meta) if meta.is_dir() => true,
        Ok(meta) if meta.is_file() => is_git_file(&git_path),
        _ => false,
    }
}

/// Scans the immediate children of `base_dir` for git repositories,
/// applying include/exclude name filters.
///
/// `exclude` always wins; a non-empty `include` restricts the scan to the
/// named directories. The result is sorted case-insensitively by name (with
/// an exact-name tiebreak) so two scans over the same tree always agree.
///
/// A missing or unreadable `base_dir` is an error, never an empty list.
pub fn discover_repos(
    base_dir: &Path,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<RepoRef>, HubError> {
    let meta = fs::metadata(base_dir).map_err(|_| HubError::HubMissing(base_dir.to_path_buf()))?;
    if !meta.is_dir() {
        return Err(HubError::HubNotADirectory(base_dir.to_path_buf()));
    }

    let entries = fs::read_dir(base_dir).map_err(|source| HubError::HubUnreadable {
        path: base_dir.to_path_buf(),
        source,
    })?;

    let mut repos = Vec::new();
    for entry in entries.flatten() {
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue, // non-UTF-8 names cannot be filtered by name
        };

        if exclude.iter().any(|e| e == &name) {
            continue;
        }
        if !include.is_empty() && !include.iter().any(|i| i == &name) {
            continue;
        }

        let path = entry.path();
        if !path.is_dir() || !has_git_entry(&path) {
            continue;
        }

        // Absolute path so results stay valid wherever the caller runs from
        let path = fs::canonicalize(&path).unwrap_or(path);
        repos.push(RepoRef { name, path });
    }

    repos.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(repos)
}
