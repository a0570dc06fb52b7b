//! Module graph model and change analysis
//!
//! Built on system git + petgraph. Pipeline:
//! snapshot (baseline, target) → change set → optional closure → assemble.

pub mod assemble;
pub mod changes;
pub mod closure;
pub mod module;
pub mod registry;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testing;

pub use closure::{ClosureEngine, Expansion};
pub use registry::ModuleRegistry;
pub use snapshot::{Snapshot, SnapshotLoader};
