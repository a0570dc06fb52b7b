//! Integration tests for `--use-checkout`

use crate::helpers::{TestProject, git, id, lines};
use anyhow::Result;

#[test]
fn test_checkout_restores_branch_after_success() -> Result<()> {
  let project = TestProject::new()?;
  project.add_module("a", &[])?;
  project.add_module("b", &["a"])?;
  let base = project.commit("Add modules")?;
  project.touch("b", "changed")?;
  project.commit("Change b")?;

  let output = project.changes(&["--baseline", &base, "--use-checkout"])?;
  assert_eq!(lines(&output), vec![id("b")]);
  assert_eq!(project.current_branch()?, "main");

  Ok(())
}

#[test]
fn test_checkout_reads_descriptors_of_each_revision() -> Result<()> {
  let project = TestProject::new()?;
  project.add_module("a", &[])?;
  let base = project.commit("Add a")?;
  project.add_module("b", &[])?;
  project.commit("Add b")?;

  let output = project.changes(&["--baseline", &base, "--use-checkout"])?;
  assert_eq!(lines(&output), vec![id("b")]);
  assert_eq!(project.current_branch()?, "main");

  Ok(())
}

#[test]
fn test_checkout_restores_branch_after_failure() -> Result<()> {
  let project = TestProject::new()?;
  project.write_pom("a", "<project><artifactId>a</artifactId>\n")?;
  let base = project.commit("Add broken a")?;
  project.add_module("a", &[])?;
  project.commit("Fix a")?;

  let output = project.changes_unchecked(&["--baseline", &base, "--use-checkout"])?;
  assert_eq!(output.status.code(), Some(3), "malformed descriptor should fail the run");
  assert!(output.stdout.is_empty());
  assert_eq!(project.current_branch()?, "main");

  // Without checkout the work tree's fixed descriptor is read for both revisions
  let output = project.changes(&["--baseline", &base])?;
  assert_eq!(lines(&output), vec![id("a")]);

  Ok(())
}

#[test]
fn test_checkout_restores_detached_head() -> Result<()> {
  let project = TestProject::new()?;
  project.add_module("a", &[])?;
  let base = project.commit("Add a")?;
  project.touch("a", "changed")?;
  let head = project.commit("Change a")?;
  git(&project.path, &["checkout", "--quiet", "--detach", &head])?;

  let output = project.changes(&["--baseline", &base, "--use-checkout"])?;
  assert_eq!(lines(&output), vec![id("a")]);

  let restored = git(&project.path, &["rev-parse", "HEAD"])?;
  assert_eq!(String::from_utf8_lossy(&restored.stdout).trim(), head);
  assert_eq!(project.current_branch()?, "HEAD");

  Ok(())
}

#[test]
fn test_checkout_refuses_dirty_tree() -> Result<()> {
  let project = TestProject::new()?;
  project.add_module("a", &[])?;
  let base = project.commit("Add a")?;
  project.touch("a", "uncommitted")?;

  let output = project.changes_unchecked(&["--baseline", &base, "--use-checkout"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(output.stdout.is_empty());

  let source = std::fs::read_to_string(project.path.join("a/src/main/java/Main.java"))?;
  assert!(source.contains("uncommitted"), "local changes must survive");

  Ok(())
}
