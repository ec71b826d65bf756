//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality:
//! - Repository discovery
//! - Batch configuration
//! - Step outcomes and the batch report
//!
//! Internal implementation details are not exposed through this API.

// Core types
pub use super::config::BatchConfig;
pub use super::discovery::{discover_repos, RepoRef};
pub use super::report::{BatchReport, RepositoryResult, StepKind, StepOutcome};

// Configuration constants
pub use super::config::{
    AUTO_MESSAGE_SENTINEL, DEFAULT_COMMIT_TOOL, IGNORE_ENTRY, JUNK_FILE_NAMES,
};

// User-facing messages
pub use super::config::NO_REPOS_MESSAGE;

// Internal helpers for command modules
pub(crate) use super::config::{
    ERROR_MESSAGE_MAX_LENGTH, ERROR_MESSAGE_TRUNCATE_LENGTH, PATH_DISPLAY_WIDTH,
};
