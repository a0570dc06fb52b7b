//! Final projection of a module set to reportable identities

use super::module::Module;
use std::collections::BTreeSet;

/// Drop modules without an artifact id and return the remaining identities.
///
/// Duplicates collapse; the sorted order is for stable output only.
pub fn assemble(modules: &[Module]) -> Vec<String> {
  modules
    .iter()
    .filter(|module| module.is_artifact())
    .map(|module| module.identity().to_string())
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}
