//! Transitive expansion of a module set over the registry's edges
//!
//! Algorithm: breadth-first worklist.
//! 1. Seed the FIFO worklist with the input modules
//! 2. Pop a module; skip it if its identity was already visited
//! 3. Mark it visited and look up its neighbors in the registry
//! 4. Queue each neighbor not seen before, re-resolved with a marker for the
//!    registry's revision (registry entries carry descriptors only)
//!
//! Terminates on cyclic graphs: the registry is finite and no identity is
//! queued twice.

use super::module::Module;
use super::registry::{ModuleRegistry, RegistryEntry};
use crate::core::error::ChangesResult;
use crate::core::vcs::RevisionHistory;
use std::collections::{HashSet, VecDeque};

/// Which edges to follow when expanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
  /// Follow declared dependencies (what a module uses)
  TowardDependencies,
  /// Follow reverse edges (what uses a module)
  TowardDependents,
}

impl Expansion {
  /// Pick the expansion requested by the include flags.
  ///
  /// Dependencies take precedence: with both flags set, dependents are not evaluated.
  pub fn from_flags(include_dependencies: bool, include_dependents: bool) -> Option<Self> {
    if include_dependencies {
      Some(Self::TowardDependencies)
    } else if include_dependents {
      Some(Self::TowardDependents)
    } else {
      None
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::TowardDependencies => "dependencies",
      Self::TowardDependents => "dependents",
    }
  }
}

/// Expands seed sets over a registry, resolving neighbor markers at the
/// revision the registry was built from
pub struct ClosureEngine<'a, H: RevisionHistory> {
  registry: &'a ModuleRegistry,
  history: &'a H,
  revision: &'a str,
}

impl<'a, H: RevisionHistory> ClosureEngine<'a, H> {
  pub fn new(registry: &'a ModuleRegistry, history: &'a H, revision: &'a str) -> Self {
    Self {
      registry,
      history,
      revision,
    }
  }

  /// Reflexive-transitive closure of `seeds` in the given direction
  pub fn expand(&self, seeds: Vec<Module>, expansion: Expansion) -> ChangesResult<Vec<Module>> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut queued: HashSet<String> = seeds.iter().map(|m| m.identity().to_string()).collect();
    let mut worklist: VecDeque<Module> = seeds.into();
    let mut closure = Vec::new();

    while let Some(module) = worklist.pop_front() {
      if !visited.insert(module.identity().to_string()) {
        continue;
      }

      for entry in self.neighbors(&module, expansion) {
        if queued.contains(&entry.identity) {
          continue;
        }
        queued.insert(entry.identity.clone());
        worklist.push_back(self.resolve(entry)?);
      }

      closure.push(module);
    }

    tracing::debug!(
      expansion = expansion.as_str(),
      modules = closure.len(),
      "expanded module set"
    );
    Ok(closure)
  }

  fn neighbors(&self, module: &Module, expansion: Expansion) -> Vec<&'a RegistryEntry> {
    match expansion {
      Expansion::TowardDependencies => self.registry.dependencies_of(&module.declared_dependencies()),
      Expansion::TowardDependents => self.registry.dependents_of(module.identity()),
    }
  }

  /// Turn a registry entry into a module with a fresh marker
  fn resolve(&self, entry: &RegistryEntry) -> ChangesResult<Module> {
    let last_modified = self.history.last_modified(self.revision, &entry.location)?;
    Ok(Module::new(
      entry.location.clone(),
      entry.descriptor.clone(),
      last_modified,
    ))
  }
}
