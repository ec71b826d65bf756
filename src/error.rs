//! Error types for the batch engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole batch run before any repository is touched.
///
/// Per-step failures are not errors at this level: they are recorded as
/// failing [`StepOutcome`](crate::core::StepOutcome)s inside the report so
/// that one repository can never take the rest of the batch down with it.
#[derive(Debug, Error)]
pub enum HubError {
    /// The configured hub directory does not exist
    #[error("hub directory does not exist: {0}")]
    HubMissing(PathBuf),

    /// The configured hub path exists but is not a directory
    #[error("hub path is not a directory: {0}")]
    HubNotADirectory(PathBuf),

    /// The hub directory could not be read
    #[error("failed to read hub directory {path}: {source}")]
    HubUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
