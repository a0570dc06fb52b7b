//! CLI commands for mvn-changes
//!
//! - **changes**: List the artifact modules changed between two revisions,
//!   optionally widened to their dependencies or dependents
//!
//! Commands accept `&ProjectContext` so the root descriptor, config and git
//! backend are loaded once.

pub mod changes;

pub use changes::{ChangesOptions, run_changes};
