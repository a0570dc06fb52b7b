//! `mvn-changes` - list the modules changed between two revisions
//!
//! Pipeline:
//! 1. Resolve baseline/target references to commits (before any checkout)
//! 2. Build the registry from the original head when an expansion is requested
//! 3. Load baseline and target snapshots, optionally under a scoped checkout
//! 4. Diff the snapshots on (identity, marker)
//! 5. Expand toward dependencies or dependents
//! 6. Drop non-artifact modules and print identities

use crate::core::checkout::CheckoutGuard;
use crate::core::context::ProjectContext;
use crate::core::error::{ChangesError, ChangesResult};
use crate::core::vcs::SystemGit;
use crate::graph::assemble::assemble;
use crate::graph::changes::changed_modules;
use crate::graph::{ClosureEngine, Expansion, ModuleRegistry, Snapshot, SnapshotLoader};
use crate::ui::timer::StepTimer;

/// Output format for the changes command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  /// One identity per line
  Names,
  Json,
}

impl OutputFormat {
  pub fn from_str(s: &str) -> ChangesResult<Self> {
    match s.to_lowercase().as_str() {
      "names" | "names-only" | "text" => Ok(Self::Names),
      "json" => Ok(Self::Json),
      _ => Err(ChangesError::message(format!(
        "Unknown format '{}'. Valid formats: names, json",
        s
      ))),
    }
  }
}

/// Options for one run, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct ChangesOptions {
  pub baseline: Option<String>,
  pub target: Option<String>,
  pub include_dependents: bool,
  pub include_dependencies: bool,
  pub use_checkout: bool,
  pub time_execution: bool,
  pub progress: bool,
}

/// Result of one run
#[derive(Debug, Clone)]
pub struct ChangesReport {
  /// Resolved baseline commit, if a comparison was requested
  pub baseline: Option<String>,
  /// Resolved target commit
  pub target: String,
  pub expansion: Option<Expansion>,
  /// Identities of affected artifact modules
  pub modules: Vec<String>,
}

/// Run the changes command and print the result
pub fn run_changes(ctx: &ProjectContext, options: ChangesOptions, format: &str) -> ChangesResult<()> {
  let format = OutputFormat::from_str(format)?;
  let report = compute_changes(ctx, &options)?;
  display_results(&report, format)
}

/// Compute the affected module identities without printing anything
pub fn compute_changes(ctx: &ProjectContext, options: &ChangesOptions) -> ChangesResult<ChangesReport> {
  let mut timer = StepTimer::new(options.time_execution);
  let git = &ctx.git;
  let root = ctx.project_root();
  let descriptor_file = ctx.config.descriptor_file.as_str();
  timer.step("setup");

  let head = git.head_commit()?;
  let target = match options.target.as_deref() {
    Some(reference) => git.resolve_revision(reference)?,
    None => head.clone(),
  };
  let baseline = options
    .baseline
    .as_deref()
    .map(|reference| git.resolve_revision(reference))
    .transpose()?;
  timer.step("resolving revisions");

  // Edges always come from the original head and work tree, before any checkout
  let expansion = Expansion::from_flags(options.include_dependencies, options.include_dependents);
  let closure = match expansion {
    Some(expansion) => {
      let registry = ModuleRegistry::load(git, root, &ctx.root_descriptor, descriptor_file, &head)?;
      timer.step("building registry");
      Some((expansion, registry))
    }
    None => None,
  };

  let loader = SnapshotLoader::new(git, root, descriptor_file).with_progress(options.progress);
  let (baseline_snapshot, target_snapshot) = if options.use_checkout {
    let guard = CheckoutGuard::acquire(git)?;
    let loaded = load_checked_out(&guard, &loader, baseline.as_deref(), &target, &mut timer);
    tracing::debug!(original = guard.original(), "restoring checkout");
    let restored = guard.release();
    if let (Err(_), Err(e)) = (&loaded, &restored) {
      tracing::error!(error = %e, "failed to restore checkout after an earlier error");
    }
    timer.step("restoring checkout");
    let snapshots = loaded?;
    restored?;
    snapshots
  } else {
    let baseline_snapshot = loader.load(baseline.as_deref())?;
    timer.step("baseline snapshot");
    let target_snapshot = loader.load(Some(&target))?;
    timer.step("target snapshot");
    (baseline_snapshot, target_snapshot)
  };

  if target_snapshot.is_empty() {
    tracing::warn!(revision = %target, "no module descriptors found at target revision");
  }

  let changed = changed_modules(&target_snapshot, &baseline_snapshot);
  tracing::debug!(
    baseline = ?baseline_snapshot.revision(),
    baseline_modules = baseline_snapshot.len(),
    target_modules = target_snapshot.len(),
    changed = changed.len(),
    "computed change set"
  );
  for module in &changed {
    tracing::debug!(
      module = module.identity(),
      location = %module.location().display(),
      marker = module.last_modified(),
      "changed"
    );
  }
  timer.step("change set");

  let modules = match &closure {
    Some((expansion, registry)) => {
      // Neighbors come from the head registry and may not exist at the target
      let expanded = ClosureEngine::new(registry, git, &head).expand(changed, *expansion)?;
      timer.step("closure expansion");
      expanded
    }
    None => changed,
  };

  let modules = assemble(&modules);
  timer.step("result assembly");

  Ok(ChangesReport {
    baseline,
    target,
    expansion,
    modules,
  })
}

/// Load both snapshots with the work tree switched to each revision in turn
fn load_checked_out(
  guard: &CheckoutGuard<'_>,
  loader: &SnapshotLoader<'_, SystemGit>,
  baseline: Option<&str>,
  target: &str,
  timer: &mut StepTimer,
) -> ChangesResult<(Snapshot, Snapshot)> {
  let baseline_snapshot = match baseline {
    Some(revision) => {
      guard.switch_to(revision)?;
      timer.step("checkout of baseline");
      loader.load(Some(revision))?
    }
    None => Snapshot::empty(),
  };
  timer.step("baseline snapshot");

  guard.switch_to(target)?;
  timer.step("checkout of target");
  let target_snapshot = loader.load(Some(target))?;
  timer.step("target snapshot");

  Ok((baseline_snapshot, target_snapshot))
}

/// Display results in the requested format
fn display_results(report: &ChangesReport, format: OutputFormat) -> ChangesResult<()> {
  match format {
    OutputFormat::Names => display_names(report),
    OutputFormat::Json => display_json(report),
  }
}

/// One identity per line
fn display_names(report: &ChangesReport) -> ChangesResult<()> {
  for identity in &report.modules {
    println!("{}", identity);
  }
  Ok(())
}

fn display_json(report: &ChangesReport) -> ChangesResult<()> {
  use serde_json::json;

  let output = json!({
      "baseline": report.baseline,
      "target": report.target,
      "expansion": report.expansion.map(Expansion::as_str),
      "modules": report.modules,
  });

  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}
