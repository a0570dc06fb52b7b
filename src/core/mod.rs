//! Core engine for mvn-changes
//!
//! - **checkout**: Scoped switching of the checked-out revision
//! - **config**: Optional mvn-changes.toml settings
//! - **context**: Project context built once per run
//! - **error**: Error types with contextual help messages and exit codes
//! - **vcs**: Git operations (SystemGit) and the timed command runner

pub mod checkout;
pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
