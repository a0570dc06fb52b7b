//! Error types for mvn-changes with contextual messages and exit codes
//!
//! Every failure is fatal: the run either prints the full module list or
//! aborts with one of these errors and nothing on stdout.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Exit codes for mvn-changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (bad arguments, config, missing descriptor, not a repository)
  User = 1,
  /// System error (git, I/O, timeouts, unresolved references)
  System = 2,
  /// A build descriptor could not be parsed
  Descriptor = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for mvn-changes
#[derive(Debug)]
pub enum ChangesError {
  /// Preconditions checked before any history query
  Precondition(PreconditionError),

  /// Git invocation errors
  Git(GitError),

  /// Build descriptor errors
  Descriptor(DescriptorError),

  /// Configuration file errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ChangesError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ChangesError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ChangesError::Message { message, context, help } => ChangesError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ChangesError::Io(err) => ChangesError::Message {
        message: ctx_str,
        context: Some(format!("I/O error: {}", err)),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ChangesError::Precondition(_) => ExitCode::User,
      ChangesError::Git(_) => ExitCode::System,
      ChangesError::Descriptor(_) => ExitCode::Descriptor,
      ChangesError::Config(_) => ExitCode::User,
      ChangesError::Io(_) => ExitCode::System,
      ChangesError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ChangesError::Precondition(e) => e.help_message(),
      ChangesError::Git(e) => e.help_message(),
      ChangesError::Descriptor(e) => e.help_message(),
      ChangesError::Config(e) => e.help_message(),
      ChangesError::Message { help, .. } => help.clone(),
      ChangesError::Io(_) => None,
    }
  }
}

impl fmt::Display for ChangesError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChangesError::Precondition(e) => write!(f, "{}", e),
      ChangesError::Git(e) => write!(f, "{}", e),
      ChangesError::Descriptor(e) => write!(f, "{}", e),
      ChangesError::Config(e) => write!(f, "{}", e),
      ChangesError::Io(e) => write!(f, "I/O error: {}", e),
      ChangesError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ChangesError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ChangesError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ChangesError {
  fn from(err: io::Error) -> Self {
    ChangesError::Io(err)
  }
}

impl From<String> for ChangesError {
  fn from(msg: String) -> Self {
    ChangesError::message(msg)
  }
}

impl From<&str> for ChangesError {
  fn from(msg: &str) -> Self {
    ChangesError::message(msg)
  }
}

impl From<serde_json::Error> for ChangesError {
  fn from(err: serde_json::Error) -> Self {
    ChangesError::message(format!("JSON error: {}", err))
  }
}

impl From<PreconditionError> for ChangesError {
  fn from(err: PreconditionError) -> Self {
    ChangesError::Precondition(err)
  }
}

impl From<GitError> for ChangesError {
  fn from(err: GitError) -> Self {
    ChangesError::Git(err)
  }
}

impl From<DescriptorError> for ChangesError {
  fn from(err: DescriptorError) -> Self {
    ChangesError::Descriptor(err)
  }
}

impl From<ConfigError> for ChangesError {
  fn from(err: ConfigError) -> Self {
    ChangesError::Config(err)
  }
}

/// Conditions that must hold before any history is queried
#[derive(Debug)]
pub enum PreconditionError {
  /// The root descriptor's directory is not inside a git work tree
  NotVersionControlled { path: PathBuf },

  /// The root descriptor does not exist or cannot be read
  DescriptorMissing { path: PathBuf },

  /// Checkout mode needs a clean set of tracked files
  DirtyWorkingTree { path: PathBuf },
}

impl PreconditionError {
  fn help_message(&self) -> Option<String> {
    match self {
      PreconditionError::NotVersionControlled { path } => Some(format!(
        "Point --root-pom at a pom.xml inside a git checkout (run `git status` in {} to confirm)",
        path.display()
      )),
      PreconditionError::DescriptorMissing { .. } => {
        Some("Pass the top-level pom.xml of the project with --root-pom".to_string())
      }
      PreconditionError::DirtyWorkingTree { .. } => {
        Some("Commit or stash local changes, or run without --use-checkout".to_string())
      }
    }
  }
}

impl fmt::Display for PreconditionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PreconditionError::NotVersionControlled { path } => {
        write!(f, "The directory {} is not part of a git repository", path.display())
      }
      PreconditionError::DescriptorMissing { path } => {
        write!(f, "Root descriptor not found or not readable: {}", path.display())
      }
      PreconditionError::DirtyWorkingTree { path } => {
        write!(
          f,
          "Refusing to switch revisions: tracked files in {} have uncommitted changes",
          path.display()
        )
      }
    }
  }
}

/// Git invocation errors
#[derive(Debug)]
pub enum GitError {
  /// Git exited unsuccessfully
  CommandFailed { command: String, stderr: String },

  /// Git did not finish within the configured timeout
  TimedOut { command: String, timeout: Duration },

  /// A revision or history lookup produced no commit
  UnresolvedReference { reference: String, path: Option<PathBuf> },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::TimedOut { .. } => {
        Some("Raise `command_timeout_secs` in mvn-changes.toml if the repository is very large".to_string())
      }
      GitError::UnresolvedReference { reference, .. } => Some(format!(
        "Check that '{}' names a commit, branch or tag in this repository (`git rev-parse {}`)",
        reference, reference
      )),
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr.trim_end())
      }
      GitError::TimedOut { command, timeout } => {
        write!(f, "Git command timed out after {}s: {}", timeout.as_secs(), command)
      }
      GitError::UnresolvedReference { reference, path } => match path {
        Some(path) => write!(f, "Invalid reference '{}' for {}", reference, path.display()),
        None => write!(f, "Invalid reference '{}'", reference),
      },
    }
  }
}

/// Build descriptor errors
#[derive(Debug)]
pub enum DescriptorError {
  /// The descriptor is not well-formed
  Malformed { path: PathBuf, reason: String },
}

impl DescriptorError {
  fn help_message(&self) -> Option<String> {
    match self {
      DescriptorError::Malformed { path, .. } => Some(format!(
        "Fix the XML in {} (every module descriptor must parse)",
        path.display()
      )),
    }
  }
}

impl fmt::Display for DescriptorError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DescriptorError::Malformed { path, reason } => {
        write!(f, "Malformed descriptor {}: {}", path.display(), reason)
      }
    }
  }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file is not valid TOML or does not match the schema
  Malformed { path: PathBuf, reason: String },

  /// A field holds an unusable value
  Invalid { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Malformed { .. } => {
        Some("Known keys: descriptor_file, command_timeout_secs, marker_format".to_string())
      }
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Malformed { path, reason } => {
        write!(f, "Failed to parse config {}: {}", path.display(), reason)
      }
      ConfigError::Invalid { field, reason } => {
        write!(f, "Invalid config value for '{}': {}", field, reason)
      }
    }
  }
}

/// Result type alias for mvn-changes
pub type ChangesResult<T> = Result<T, ChangesError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ChangesResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ChangesError>,
{
  fn with_context<F>(self, f: F) -> ChangesResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ChangesError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
