pub mod runner;
pub mod system_git;

pub use system_git::SystemGit;

use crate::core::error::ChangesResult;
use std::path::{Path, PathBuf};

/// Read-only view of project history needed to build snapshots and resolve markers.
///
/// Paths are relative to the root descriptor's directory.
pub trait RevisionHistory {
  /// Every tracked directory in `revision`'s tree (recursive, root excluded)
  fn tracked_directories(&self, revision: &str) -> ChangesResult<Vec<PathBuf>>;

  /// Last-modification marker of `path` as seen from `revision`.
  ///
  /// Fails with `GitError::UnresolvedReference` when history has no entry.
  fn last_modified(&self, revision: &str, path: &Path) -> ChangesResult<String>;
}
