//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const GROUP: &str = "com.example";

/// A multi-module project with git history
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create a repository with an aggregator pom and one initial commit
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(
      path.join("pom.xml"),
      format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>{}</groupId>
  <artifactId>parent</artifactId>
  <version>1.0.0</version>
  <packaging>pom</packaging>
</project>
"#,
        GROUP
      ),
    )?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial project setup"])?;

    Ok(Self { _root: root, path })
  }

  /// Path to the aggregator pom
  pub fn root_pom(&self) -> PathBuf {
    self.path.join("pom.xml")
  }

  /// Add a module inheriting the group from the aggregator, with sibling dependencies
  pub fn add_module(&self, name: &str, deps: &[&str]) -> Result<PathBuf> {
    let module_path = self.path.join(name);
    std::fs::create_dir_all(module_path.join("src/main/java"))?;

    let mut dependencies = String::new();
    if !deps.is_empty() {
      dependencies.push_str("  <dependencies>\n");
      for dep in deps {
        dependencies.push_str(&format!(
          r#"    <dependency>
      <groupId>${{project.groupId}}</groupId>
      <artifactId>{}</artifactId>
      <version>${{project.version}}</version>
    </dependency>
"#,
          dep
        ));
      }
      dependencies.push_str("  </dependencies>\n");
    }

    std::fs::write(
      module_path.join("pom.xml"),
      format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>{}</groupId>
    <artifactId>parent</artifactId>
    <version>1.0.0</version>
  </parent>
  <artifactId>{}</artifactId>
{}</project>
"#,
        GROUP, name, dependencies
      ),
    )?;

    self.touch(name, "1")?;
    Ok(module_path)
  }

  /// Write a raw descriptor into a module directory
  pub fn write_pom(&self, name: &str, content: &str) -> Result<()> {
    let module_path = self.path.join(name);
    std::fs::create_dir_all(&module_path)?;
    std::fs::write(module_path.join("pom.xml"), content)?;
    Ok(())
  }

  /// Change a source file of a module without touching its pom
  pub fn touch(&self, name: &str, content: &str) -> Result<()> {
    let file = self.path.join(name).join("src/main/java/Main.java");
    std::fs::create_dir_all(file.parent().context("source file has no parent")?)?;
    std::fs::write(file, format!("class Main {{ /* {} */ }}\n", content))?;
    Ok(())
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Name of the checked-out branch, or `HEAD` when detached
  pub fn current_branch(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Run the binary against this project's root pom
  pub fn changes(&self, args: &[&str]) -> Result<Output> {
    let root_pom = self.root_pom();
    let mut full = vec!["--root-pom", root_pom.to_str().context("non-UTF-8 temp path")?];
    full.extend_from_slice(args);
    run_mvn_changes(&self.path, &full)
  }

  /// Like `changes`, returning the raw output even on failure
  pub fn changes_unchecked(&self, args: &[&str]) -> Result<Output> {
    let root_pom = self.root_pom();
    let mut full = vec!["--root-pom", root_pom.to_str().context("non-UTF-8 temp path")?];
    full.extend_from_slice(args);
    run_mvn_changes_unchecked(&self.path, &full)
  }
}

/// Identity of a module in the test group
pub fn id(artifact: &str) -> String {
  format!("{}::{}", GROUP, artifact)
}

/// Stdout split into lines
pub fn lines(output: &Output) -> Vec<String> {
  String::from_utf8_lossy(&output.stdout)
    .lines()
    .map(String::from)
    .collect()
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run mvn-changes and fail unless it exits successfully
pub fn run_mvn_changes(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_mvn_changes_unchecked(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "mvn-changes command failed: mvn-changes {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run mvn-changes and return its output whatever the exit status
pub fn run_mvn_changes_unchecked(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_mvn-changes");

  Command::new(bin)
    .current_dir(cwd)
    .env_remove("RUST_LOG")
    .args(args)
    .output()
    .context("Failed to run mvn-changes")
}
