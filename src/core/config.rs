//! Batch configuration and engine constants

use std::path::PathBuf;

use crate::batch::CommitMessage;

/// Entry the normalize-ignore step guarantees is present in `.gitignore`
pub const IGNORE_ENTRY: &str = ".DS_Store";

/// File names the purge-junk step removes from the working tree and index
pub const JUNK_FILE_NAMES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Default external commit tool invoked when the tool phase is enabled
pub const DEFAULT_COMMIT_TOOL: &str = "ai_commit";

/// Commit message sentinel the CLI maps to [`CommitMessage::Auto`]
pub const AUTO_MESSAGE_SENTINEL: &str = "auto-commit";

// User-facing messages
pub const NO_REPOS_MESSAGE: &str = "No git repositories found in hub directory.";

// Display formatting constants
pub const PATH_DISPLAY_WIDTH: usize = 30;
pub const ERROR_MESSAGE_MAX_LENGTH: usize = 40;
pub const ERROR_MESSAGE_TRUNCATE_LENGTH: usize = 37;

/// Configuration for one batch run, fully constructed by the caller before
/// the engine starts. The engine never reads ambient global state.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Hub directory whose immediate children are candidate repositories
    pub base_dir: PathBuf,
    /// Repository names to restrict the run to (empty = all)
    pub include: Vec<String>,
    /// Repository names to skip
    pub exclude: Vec<String>,
    /// Run `git pull` before the commit phase
    pub pull: bool,
    /// Ensure `.gitignore` carries the conventional ignore entry
    pub normalize_ignore: bool,
    /// Remove junk artifacts from working tree and index
    pub purge_junk: bool,
    /// Commit message, literal or auto-generated
    pub message: CommitMessage,
    /// Delegate the commit phase to the external commit tool instead of
    /// local add/commit/push
    pub use_commit_tool: bool,
    /// Executable invoked for the delegated commit phase
    pub commit_tool: String,
}

impl BatchConfig {
    /// Creates a configuration with every optional step disabled
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            include: Vec::new(),
            exclude: Vec::new(),
            pull: false,
            normalize_ignore: false,
            purge_junk: false,
            message: CommitMessage::Auto,
            use_commit_tool: false,
            commit_tool: DEFAULT_COMMIT_TOOL.to_string(),
        }
    }
}
