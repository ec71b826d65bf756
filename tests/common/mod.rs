//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;

pub use self::fixtures::HubFixture;
pub use self::git::{
    add_bare_remote, create_test_commit, is_git_available, setup_git_repo,
};
