//! Revision snapshots: the modules that exist at one revision
//!
//! Candidate directories come from the revision's tracked tree, never from a
//! filesystem walk, so untracked build output (`target/` copies of pom.xml and
//! the like) is never picked up. Descriptors are read from the work tree.

use super::module::{Module, ModuleKey};
use crate::core::error::ChangesResult;
use crate::core::vcs::RevisionHistory;
use crate::maven::Descriptor;
use crate::ui::progress::ScanProgress;
use crate::utils::is_readable_file;
use std::collections::HashSet;
use std::path::Path;

/// Set of modules at one revision, each tagged with its last-modification marker
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
  revision: Option<String>,
  modules: Vec<Module>,
  keys: HashSet<ModuleKey>,
}

impl Snapshot {
  /// Snapshot for "no baseline": contains nothing
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn from_modules(revision: Option<String>, modules: Vec<Module>) -> Self {
    let keys = modules.iter().map(|m| m.key().clone()).collect();
    Self {
      revision,
      modules,
      keys,
    }
  }

  pub fn revision(&self) -> Option<&str> {
    self.revision.as_deref()
  }

  pub fn modules(&self) -> &[Module] {
    &self.modules
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }

  /// Membership by identity and marker
  pub fn contains(&self, key: &ModuleKey) -> bool {
    self.keys.contains(key)
  }
}

/// Loads snapshots from history plus the work tree's descriptor files
pub struct SnapshotLoader<'a, H: RevisionHistory> {
  history: &'a H,
  root: &'a Path,
  descriptor_file: &'a str,
  show_progress: bool,
}

impl<'a, H: RevisionHistory> SnapshotLoader<'a, H> {
  pub fn new(history: &'a H, root: &'a Path, descriptor_file: &'a str) -> Self {
    Self {
      history,
      root,
      descriptor_file,
      show_progress: false,
    }
  }

  /// Draw a progress bar on stderr while loading
  pub fn with_progress(mut self, show_progress: bool) -> Self {
    self.show_progress = show_progress;
    self
  }

  /// Load the snapshot for `revision`; `None` yields an empty snapshot without touching history.
  ///
  /// Every listed directory holding a readable descriptor gets a marker query;
  /// a missing marker or an unparsable descriptor aborts the load.
  pub fn load(&self, revision: Option<&str>) -> ChangesResult<Snapshot> {
    let Some(revision) = revision else {
      return Ok(Snapshot::empty());
    };

    let candidates: Vec<_> = self
      .history
      .tracked_directories(revision)?
      .into_iter()
      .filter(|dir| is_readable_file(&self.root.join(dir).join(self.descriptor_file)))
      .collect();

    let mut progress = self
      .show_progress
      .then(|| ScanProgress::new(candidates.len(), format!("Scanning modules at {}", short(revision))));

    let mut modules = Vec::with_capacity(candidates.len());
    for dir in candidates {
      let last_modified = self.history.last_modified(revision, &dir)?;
      let descriptor = Descriptor::load(&self.root.join(&dir).join(self.descriptor_file))?;
      modules.push(Module::new(dir, descriptor, last_modified));

      if let Some(progress) = progress.as_mut() {
        progress.inc();
      }
    }

    tracing::debug!(revision, modules = modules.len(), "loaded snapshot");
    Ok(Snapshot::from_modules(Some(revision.to_string()), modules))
  }
}

/// Abbreviate full hashes for display
fn short(revision: &str) -> &str {
  if revision.len() == 40 && revision.chars().all(|c| c.is_ascii_hexdigit()) {
    &revision[..12]
  } else {
    revision
  }
}
