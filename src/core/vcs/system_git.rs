//! System git backend
//!
//! Uses git plumbing and porcelain commands through the timed runner. Every
//! command runs from the root descriptor's directory, so tree listings and
//! pathspecs are relative to the project root rather than the repository root.

use super::RevisionHistory;
use super::runner::run_with_timeout;
use crate::core::error::{ChangesError, ChangesResult, GitError, PreconditionError};
use crate::utils::path_to_git_format;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// Git backend using system git
pub struct SystemGit {
  /// Directory git runs in (the root descriptor's directory)
  pub(crate) repo_path: PathBuf,

  /// Upper bound for each invocation
  timeout: Duration,

  /// `--format` placeholder for last-modification markers
  marker_format: String,
}

impl SystemGit {
  /// Open the work tree containing `path`.
  ///
  /// Fails with `PreconditionError::NotVersionControlled` before any history query
  /// when `path` is not inside a git work tree.
  pub fn open(path: &Path, timeout: Duration, marker_format: impl Into<String>) -> ChangesResult<Self> {
    let git = Self {
      repo_path: path.to_path_buf(),
      timeout,
      marker_format: marker_format.into(),
    };

    let not_versioned = || {
      ChangesError::Precondition(PreconditionError::NotVersionControlled {
        path: path.to_path_buf(),
      })
    };

    match git.run(&["rev-parse", "--is-inside-work-tree"]) {
      Ok(out) if out.trim() == "true" => Ok(git),
      Ok(_) => Err(not_versioned()),
      Err(ChangesError::Git(GitError::CommandFailed { .. })) => Err(not_versioned()),
      Err(e) => Err(e),
    }
  }

  /// Get HEAD commit SHA
  pub fn head_commit(&self) -> ChangesResult<String> {
    Ok(self.run(&["rev-parse", "HEAD"])?.trim().to_string())
  }

  /// Get current branch name ("HEAD" when detached)
  pub fn current_branch(&self) -> ChangesResult<String> {
    Ok(self.run(&["rev-parse", "--abbrev-ref", "HEAD"])?.trim().to_string())
  }

  /// Resolve a branch, tag, or abbreviated hash to a full commit SHA
  pub fn resolve_revision(&self, reference: &str) -> ChangesResult<String> {
    let revspec = format!("{}^{{commit}}", reference);
    let unresolved = || {
      ChangesError::Git(GitError::UnresolvedReference {
        reference: reference.to_string(),
        path: None,
      })
    };

    match self.run(&["rev-parse", "--verify", "--quiet", &revspec]) {
      Ok(out) if !out.trim().is_empty() => Ok(out.trim().to_string()),
      Ok(_) => Err(unresolved()),
      Err(ChangesError::Git(GitError::CommandFailed { .. })) => Err(unresolved()),
      Err(e) => Err(e),
    }
  }

  /// Switch the work tree to `revision`
  pub fn checkout(&self, revision: &str) -> ChangesResult<()> {
    self.run(&["checkout", "--quiet", revision])?;
    Ok(())
  }

  /// True when tracked files differ from HEAD (untracked files are ignored)
  pub fn has_uncommitted_changes(&self) -> ChangesResult<bool> {
    let out = self.run(&["status", "--porcelain", "--untracked-files=no"])?;
    Ok(!out.trim().is_empty())
  }

  /// Run git with `args` and return stdout
  fn run(&self, args: &[&str]) -> ChangesResult<String> {
    let mut cmd = self.git_cmd();
    cmd.args(args);
    run_with_timeout(cmd, &format!("git {}", args.join(" ")), self.timeout)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}

impl RevisionHistory for SystemGit {
  fn tracked_directories(&self, revision: &str) -> ChangesResult<Vec<PathBuf>> {
    let out = self.run(&["ls-tree", "-r", "-d", "-z", "--name-only", revision])?;
    Ok(parse_tree_listing(&out))
  }

  fn last_modified(&self, revision: &str, path: &Path) -> ChangesResult<String> {
    let pathspec = if path.as_os_str().is_empty() {
      ".".to_string()
    } else {
      path_to_git_format(path)
    };
    let format = format!("--format={}", self.marker_format);

    let out = self.run(&["log", "-1", &format, revision, "--", &pathspec])?;
    let marker = out.trim();
    if marker.is_empty() {
      return Err(
        GitError::UnresolvedReference {
          reference: revision.to_string(),
          path: Some(path.to_path_buf()),
        }
        .into(),
      );
    }

    Ok(marker.to_string())
  }
}

/// Split NUL-delimited `ls-tree -z` output into paths
fn parse_tree_listing(out: &str) -> Vec<PathBuf> {
  out
    .split('\0')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(PathBuf::from)
    .collect()
}
