//! Module registry built from the current head
//!
//! # Graph Structure
//!
//! - **Directed Graph**: `A → B` means "A declares a dependency on B"
//! - **Nodes**: registry modules plus one placeholder per referenced identity
//!   that has no descriptor in the project (third-party artifacts)
//! - **Index**: identity → node
//!
//! The edge set always reflects the head of history and the current work
//! tree, whatever revisions are being compared. Historical dependency
//! structure is never consulted, so a module whose edges changed between the
//! compared revisions is expanded along today's edges.

use crate::core::error::ChangesResult;
use crate::core::vcs::RevisionHistory;
use crate::maven::Descriptor;
use crate::utils::is_readable_file;
use petgraph::Direction;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A module known to the registry
#[derive(Debug, Clone)]
pub struct RegistryEntry {
  pub identity: String,
  /// Module directory relative to the project root
  pub location: PathBuf,
  pub descriptor: Descriptor,
}

impl RegistryEntry {
  pub fn new(location: impl Into<PathBuf>, descriptor: Descriptor) -> Self {
    Self {
      identity: descriptor.identity(),
      location: location.into(),
      descriptor,
    }
  }
}

#[derive(Debug)]
enum RegistryNode {
  Module(RegistryEntry),
  /// Referenced identity with no descriptor in the project
  External(String),
}

impl RegistryNode {
  fn identity(&self) -> &str {
    match self {
      RegistryNode::Module(entry) => &entry.identity,
      RegistryNode::External(identity) => identity,
    }
  }

  fn entry(&self) -> Option<&RegistryEntry> {
    match self {
      RegistryNode::Module(entry) => Some(entry),
      RegistryNode::External(_) => None,
    }
  }
}

/// Identity → descriptor map with dependency edges
pub struct ModuleRegistry {
  graph: DiGraph<RegistryNode, ()>,
  index: HashMap<String, NodeIndex>,
}

impl ModuleRegistry {
  /// Build the registry from `head`'s tracked tree.
  ///
  /// The root descriptor is always included; every other descriptor only
  /// when it carries a non-blank artifact id.
  pub fn load<H: RevisionHistory>(
    history: &H,
    root: &Path,
    root_descriptor: &Path,
    descriptor_file: &str,
    head: &str,
  ) -> ChangesResult<Self> {
    let mut entries = vec![RegistryEntry::new(PathBuf::new(), Descriptor::load(root_descriptor)?)];

    for dir in history.tracked_directories(head)? {
      let path = root.join(&dir).join(descriptor_file);
      if !is_readable_file(&path) {
        continue;
      }
      let descriptor = Descriptor::load(&path)?;
      if descriptor.is_artifact() {
        entries.push(RegistryEntry::new(dir, descriptor));
      }
    }

    let registry = Self::from_entries(entries);
    tracing::debug!(modules = registry.len(), "built module registry");

    for cycle in registry.find_cycles() {
      tracing::warn!(cycle = %cycle.join(" → "), "dependency cycle between modules");
    }

    Ok(registry)
  }

  /// Build the registry from already-parsed entries.
  ///
  /// When two descriptors share an identity the first one wins.
  pub fn from_entries(entries: impl IntoIterator<Item = RegistryEntry>) -> Self {
    let mut graph = DiGraph::new();
    let mut index = HashMap::new();

    for entry in entries {
      if let Some(existing) = index.get(&entry.identity) {
        let kept: &RegistryNode = &graph[*existing];
        tracing::warn!(
          identity = %entry.identity,
          kept = %kept.entry().map(|e| e.location.display().to_string()).unwrap_or_default(),
          ignored = %entry.location.display(),
          "duplicate module identity"
        );
        continue;
      }
      let identity = entry.identity.clone();
      let idx = graph.add_node(RegistryNode::Module(entry));
      index.insert(identity, idx);
    }

    let modules: Vec<NodeIndex> = graph.node_indices().collect();
    for from in modules {
      let declared = match &graph[from] {
        RegistryNode::Module(entry) => entry.descriptor.declared_dependencies(),
        RegistryNode::External(_) => continue,
      };

      for identity in declared {
        let to = *index
          .entry(identity.clone())
          .or_insert_with(|| graph.add_node(RegistryNode::External(identity)));
        graph.update_edge(from, to, ());
      }
    }

    Self { graph, index }
  }

  /// Number of modules with descriptors
  pub fn len(&self) -> usize {
    self.graph.node_weights().filter(|n| n.entry().is_some()).count()
  }

  /// Look up a module by identity
  pub fn get(&self, identity: &str) -> Option<&RegistryEntry> {
    self.index.get(identity).and_then(|idx| self.graph[*idx].entry())
  }

  /// Registry modules whose identity appears in `declared`
  pub fn dependencies_of(&self, declared: &[String]) -> Vec<&RegistryEntry> {
    let mut found: Vec<&RegistryEntry> = Vec::new();
    for identity in declared {
      if let Some(entry) = self.get(identity)
        && !found.iter().any(|e| e.identity == entry.identity)
      {
        found.push(entry);
      }
    }
    found
  }

  /// Registry modules that declare `identity` among their dependencies
  pub fn dependents_of(&self, identity: &str) -> Vec<&RegistryEntry> {
    let Some(idx) = self.index.get(identity) else {
      return Vec::new();
    };

    let mut dependents: Vec<&RegistryEntry> = self
      .graph
      .neighbors_directed(*idx, Direction::Incoming)
      .filter_map(|n| self.graph[n].entry())
      .collect();
    dependents.sort_by(|a, b| a.identity.cmp(&b.identity));
    dependents
  }

  /// Dependency cycles among registry modules (Tarjan's SCC)
  pub fn find_cycles(&self) -> Vec<Vec<String>> {
    algo::tarjan_scc(&self.graph)
      .into_iter()
      .filter(|component| component.len() > 1)
      .map(|component| {
        let mut ids: Vec<String> = component
          .into_iter()
          .map(|idx| self.graph[idx].identity().to_string())
          .collect();
        ids.sort();
        ids
      })
      .collect()
  }
}
