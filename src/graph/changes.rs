//! Change set: target snapshot minus baseline snapshot

use super::module::Module;
use super::snapshot::Snapshot;

/// Modules of `target` with no (identity, marker) match in `baseline`.
///
/// An empty baseline keeps every target module.
pub fn changed_modules(target: &Snapshot, baseline: &Snapshot) -> Vec<Module> {
  target
    .modules()
    .iter()
    .filter(|module| !baseline.contains(module.key()))
    .cloned()
    .collect()
}
