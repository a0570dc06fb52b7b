//! Scoped ownership of the work tree's checked-out revision
//!
//! `CheckoutGuard` records what was checked out when it was acquired and puts
//! it back on `release()`. Callers release on success and on error; `Drop`
//! covers unwinding and early returns that skip `release()`.

use crate::core::error::{ChangesResult, PreconditionError};
use crate::core::vcs::SystemGit;

pub struct CheckoutGuard<'a> {
  git: &'a SystemGit,
  /// Branch name, or commit SHA when HEAD was detached
  original: String,
  restored: bool,
}

impl<'a> CheckoutGuard<'a> {
  /// Capture the current revision. Fails when tracked files have local changes.
  pub fn acquire(git: &'a SystemGit) -> ChangesResult<Self> {
    if git.has_uncommitted_changes()? {
      return Err(
        PreconditionError::DirtyWorkingTree {
          path: git.repo_path.clone(),
        }
        .into(),
      );
    }

    let branch = git.current_branch()?;
    let original = if branch == "HEAD" { git.head_commit()? } else { branch };

    tracing::debug!(original = %original, "acquired checkout");
    Ok(Self {
      git,
      original,
      restored: false,
    })
  }

  /// What the work tree will be restored to
  pub fn original(&self) -> &str {
    &self.original
  }

  /// Check out `revision` while the guard is held
  pub fn switch_to(&self, revision: &str) -> ChangesResult<()> {
    tracing::debug!(revision, "checking out");
    self.git.checkout(revision)
  }

  /// Restore the original revision
  pub fn release(mut self) -> ChangesResult<()> {
    self.restored = true;
    self.git.checkout(&self.original)
  }
}

impl Drop for CheckoutGuard<'_> {
  fn drop(&mut self) {
    if self.restored {
      return;
    }
    if let Err(e) = self.git.checkout(&self.original) {
      tracing::error!(original = %self.original, error = %e, "failed to restore checkout");
    }
  }
}
