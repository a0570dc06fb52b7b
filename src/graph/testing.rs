//! In-memory history and descriptor builders for unit tests

use crate::core::error::{ChangesResult, GitError};
use crate::core::vcs::RevisionHistory;
use crate::maven::Descriptor;
use crate::maven::descriptor::DependencyRef;
use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Build a descriptor with `deps` given as `group::artifact` identities
pub fn descriptor(group: &str, artifact: Option<&str>, deps: &[&str]) -> Descriptor {
  Descriptor {
    group_id: Some(group.to_string()),
    artifact_id: artifact.map(str::to_string),
    parent: None,
    dependencies: deps
      .iter()
      .map(|id| {
        let (group, artifact) = id.split_once("::").unwrap_or((id, ""));
        DependencyRef {
          group_id: Some(group.to_string()),
          artifact_id: (!artifact.is_empty()).then(|| artifact.to_string()),
        }
      })
      .collect(),
  }
}

/// Scripted history: per-revision directory listings and markers
#[derive(Default)]
pub struct FakeHistory {
  dirs: HashMap<String, Vec<PathBuf>>,
  markers: HashMap<(String, PathBuf), String>,
  queries: Cell<usize>,
}

impl FakeHistory {
  pub fn new() -> Self {
    Self::default()
  }

  /// Declare `dir` as tracked at `revision` with the given marker
  pub fn with_dir(mut self, revision: &str, dir: &str, marker: &str) -> Self {
    self
      .dirs
      .entry(revision.to_string())
      .or_default()
      .push(PathBuf::from(dir));
    self
      .markers
      .insert((revision.to_string(), PathBuf::from(dir)), marker.to_string());
    self
  }

  /// Number of history calls made so far
  pub fn queries(&self) -> usize {
    self.queries.get()
  }
}

impl RevisionHistory for FakeHistory {
  fn tracked_directories(&self, revision: &str) -> ChangesResult<Vec<PathBuf>> {
    self.queries.set(self.queries.get() + 1);
    self.dirs.get(revision).cloned().ok_or_else(|| {
      GitError::UnresolvedReference {
        reference: revision.to_string(),
        path: None,
      }
      .into()
    })
  }

  fn last_modified(&self, revision: &str, path: &Path) -> ChangesResult<String> {
    self.queries.set(self.queries.get() + 1);
    self
      .markers
      .get(&(revision.to_string(), path.to_path_buf()))
      .cloned()
      .ok_or_else(|| {
        GitError::UnresolvedReference {
          reference: revision.to_string(),
          path: Some(path.to_path_buf()),
        }
        .into()
      })
  }
}
