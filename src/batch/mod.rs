//! The repository batch-processing engine: workflow steps, per-repository
//! sequencing and whole-hub orchestration

pub mod message;
pub mod processor;
pub mod runner;
pub mod steps;

// Re-export commonly used items
pub use message::{generate_commit_message, CommitMessage};
pub use processor::process_repository;
pub use runner::run_batch;
