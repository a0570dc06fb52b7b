//! Module model shared by snapshots, the registry and closure traversal

use crate::maven::Descriptor;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Identity plus revision-scoped marker.
///
/// Two modules are the same for change detection only when both fields match:
/// an unchanged identity with a different marker still counts as changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey {
  pub identity: String,
  pub last_modified: String,
}

/// One buildable unit as seen at a specific revision
#[derive(Debug, Clone)]
pub struct Module {
  key: ModuleKey,
  /// Module directory relative to the project root ("" for the root itself)
  location: PathBuf,
  descriptor: Descriptor,
}

impl Module {
  pub fn new(location: impl Into<PathBuf>, descriptor: Descriptor, last_modified: impl Into<String>) -> Self {
    Self {
      key: ModuleKey {
        identity: descriptor.identity(),
        last_modified: last_modified.into(),
      },
      location: location.into(),
      descriptor,
    }
  }

  pub fn key(&self) -> &ModuleKey {
    &self.key
  }

  pub fn identity(&self) -> &str {
    &self.key.identity
  }

  pub fn last_modified(&self) -> &str {
    &self.key.last_modified
  }

  pub fn location(&self) -> &Path {
    &self.location
  }

  /// Artifact-bearing modules are the only ones reported
  pub fn is_artifact(&self) -> bool {
    self.descriptor.is_artifact()
  }

  pub fn declared_dependencies(&self) -> Vec<String> {
    self.descriptor.declared_dependencies()
  }
}

impl PartialEq for Module {
  fn eq(&self, other: &Self) -> bool {
    self.key == other.key
  }
}

impl Eq for Module {}

impl Hash for Module {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.key.hash(state);
  }
}
