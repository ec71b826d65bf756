//! Test fixtures and builders

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git::{add_bare_remote, create_test_commit, setup_git_repo};

/// A temporary hub directory populated with git repositories, with
/// automatic cleanup. Bare remotes live in a sibling directory so they are
/// never discovered as hub members.
pub struct HubFixture {
    temp_dir: TempDir,
}

impl HubFixture {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        std::fs::create_dir(temp_dir.path().join("hub"))?;
        std::fs::create_dir(temp_dir.path().join("remotes"))?;
        Ok(Self { temp_dir })
    }

    /// Path of the hub directory repositories live under
    pub fn hub_dir(&self) -> PathBuf {
        self.temp_dir.path().join("hub")
    }

    /// Creates a repository with an initial commit
    pub fn add_repo(&self, name: &str) -> Result<PathBuf> {
        let path = self.hub_dir().join(name);
        std::fs::create_dir(&path)?;
        setup_git_repo(&path)?;
        create_test_commit(&path, "README.md", &format!("# {name}"), "Initial commit")?;
        Ok(path)
    }

    /// Creates a repository with an initial commit and a working bare
    /// remote with upstream tracking
    pub fn add_repo_with_remote(&self, name: &str) -> Result<PathBuf> {
        let path = self.add_repo(name)?;
        let bare = self.temp_dir.path().join("remotes").join(format!("{name}.git"));
        add_bare_remote(&path, &bare)?;
        Ok(path)
    }

    /// Creates a plain directory that is not a git repository
    pub fn add_plain_dir(&self, name: &str) -> Result<PathBuf> {
        let path = self.hub_dir().join(name);
        std::fs::create_dir(&path)?;
        Ok(path)
    }

    /// Writes a file inside one of the fixture's repositories
    pub fn write_file(&self, repo: &Path, name: &str, content: &str) -> Result<()> {
        std::fs::write(repo.join(name), content)?;
        Ok(())
    }
}
