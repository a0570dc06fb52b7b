//! Project context - build once, pass everywhere
//!
//! Validates the root descriptor, loads the optional config and opens the git
//! backend before any command logic runs, so precondition failures surface
//! before the first history query.

use crate::core::config::ChangesConfig;
use crate::core::error::{ChangesResult, PreconditionError};
use crate::core::vcs::SystemGit;
use crate::utils::is_readable_file;
use std::path::{Path, PathBuf};

/// Shared project-level state for one run
pub struct ProjectContext {
  /// Root descriptor (absolute path)
  pub root_descriptor: PathBuf,

  /// Directory holding the root descriptor; every module path is relative to it
  pub root: PathBuf,

  /// Project config (defaults when no mvn-changes.toml exists)
  pub config: ChangesConfig,

  /// Git backend rooted at `root`
  pub git: SystemGit,
}

impl ProjectContext {
  /// Build the context for the project whose top-level descriptor is `root_descriptor`.
  pub fn build(root_descriptor: &Path) -> ChangesResult<Self> {
    let missing = || PreconditionError::DescriptorMissing {
      path: root_descriptor.to_path_buf(),
    };

    if !is_readable_file(root_descriptor) {
      return Err(missing().into());
    }

    let root_descriptor = root_descriptor.canonicalize().map_err(|_| missing())?;
    let root = root_descriptor.parent().ok_or_else(missing)?.to_path_buf();

    let config = ChangesConfig::load_or_default(&root)?;
    let git = SystemGit::open(&root, config.command_timeout(), config.marker_format.clone())?;

    tracing::debug!(root = %root.display(), "project context ready");

    Ok(Self {
      root_descriptor,
      root,
      config,
      git,
    })
  }

  /// Project root as Path reference (convenience)
  pub fn project_root(&self) -> &Path {
    &self.root
  }
}
