//! # repohub
//!
//! `repohub` is a library for managing a local hub of Git repositories:
//! discovering them, running a bulk commit workflow across them, and
//! cloning missing repositories from GitHub. It powers the `repohub` CLI
//! tool.
//!
//! ## Core Features
//!
//! - **Hub Discovery**: Deterministic scanning of the hub directory with
//!   include/exclude filters.
//! - **Batch Workflow**: Per-repository pull, ignore-file normalization,
//!   junk purging, commit and push, with per-step outcome capture.
//! - **GitHub Cloning**: Clone whatever is missing locally via the `gh` CLI.
//! - **Metadata**: Optional per-repository summaries for display layers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use repohub::batch::run_batch;
//! use repohub::core::BatchConfig;
//! use repohub::exec::SystemRunner;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = BatchConfig::new("/home/me/hub");
//!     let runner = SystemRunner::new();
//!     match run_batch(&config, &runner).await {
//!         Ok(report) => println!("{}/{} succeeded", report.success_count(), report.total()),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

pub mod batch;
pub mod commands;
pub mod core;
pub mod error;
pub mod exec;
pub mod github;
pub mod metadata;
pub mod utils;
