//! `pom.xml` parsing
//!
//! Only the fields that decide a module's identity and its direct dependency
//! edges are read. Namespaces, `dependencyManagement`, plugins and profiles are
//! ignored; their nested `dependencies` blocks are not direct dependencies.

use crate::core::error::{ChangesResult, DescriptorError, ResultExt};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Property references Maven modules use to point at a sibling's group
const OWN_GROUP_PROPERTIES: [&str; 2] = ["${project.groupId}", "${pom.groupId}"];
const PARENT_GROUP_PROPERTY: &str = "${project.parent.groupId}";

/// Parsed build descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
  pub group_id: Option<String>,
  pub artifact_id: Option<String>,
  pub parent: Option<ParentRef>,
  /// Direct dependencies in declaration order
  pub dependencies: Vec<DependencyRef>,
}

/// `<parent>` linkage, used for group id inheritance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentRef {
  pub group_id: Option<String>,
}

/// One `<dependency>` entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyRef {
  pub group_id: Option<String>,
  pub artifact_id: Option<String>,
}

impl DependencyRef {
  /// Identity string this dependency refers to
  pub fn identity(&self) -> String {
    join_identity(self.group_id.as_deref(), self.artifact_id.as_deref())
  }
}

impl Descriptor {
  /// Read and parse a descriptor file
  pub fn load(path: &Path) -> ChangesResult<Self> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Self::from_xml(&content, path)
  }

  /// Parse descriptor XML; `path` is only used for error reporting
  pub fn from_xml(content: &str, path: &Path) -> ChangesResult<Self> {
    let raw: RawProject = quick_xml::de::from_str(content).map_err(|e| DescriptorError::Malformed {
      path: path.to_path_buf(),
      reason: e.to_string(),
    })?;

    let parent = raw.parent.map(|p| ParentRef {
      group_id: non_blank(p.group_id),
    });

    let mut descriptor = Descriptor {
      group_id: non_blank(raw.group_id),
      artifact_id: non_blank(raw.artifact_id),
      parent,
      dependencies: Vec::new(),
    };

    let declared = raw.dependencies.map(|d| d.dependency).unwrap_or_default();
    let dependencies = declared
      .into_iter()
      .map(|dep| DependencyRef {
        group_id: non_blank(dep.group_id).map(|g| descriptor.expand_group(g)),
        artifact_id: non_blank(dep.artifact_id),
      })
      .collect();
    descriptor.dependencies = dependencies;

    Ok(descriptor)
  }

  /// Own group id, or the parent's when the module declares none
  pub fn effective_group_id(&self) -> Option<&str> {
    self
      .group_id
      .as_deref()
      .or_else(|| self.parent.as_ref().and_then(|p| p.group_id.as_deref()))
  }

  /// Canonical identity: `group::artifact`, or just the group without an artifact id
  pub fn identity(&self) -> String {
    join_identity(self.effective_group_id(), self.artifact_id.as_deref())
  }

  /// True when the descriptor produces an artifact (non-blank artifact id)
  pub fn is_artifact(&self) -> bool {
    self.artifact_id.is_some()
  }

  /// Identities of declared dependencies, in declaration order
  pub fn declared_dependencies(&self) -> Vec<String> {
    self.dependencies.iter().map(DependencyRef::identity).collect()
  }

  fn expand_group(&self, group: String) -> String {
    if OWN_GROUP_PROPERTIES.contains(&group.as_str()) {
      if let Some(own) = self.effective_group_id() {
        return own.to_string();
      }
    } else if group == PARENT_GROUP_PROPERTY
      && let Some(parent) = self.parent.as_ref().and_then(|p| p.group_id.as_deref())
    {
      return parent.to_string();
    }
    group
  }
}

fn join_identity(group: Option<&str>, artifact: Option<&str>) -> String {
  let group = group.unwrap_or_default();
  match artifact {
    Some(artifact) => format!("{}::{}", group, artifact),
    None => group.to_string(),
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
  #[serde(default)]
  group_id: Option<String>,
  #[serde(default)]
  artifact_id: Option<String>,
  #[serde(default)]
  parent: Option<RawCoordinates>,
  #[serde(default)]
  dependencies: Option<RawDependencies>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCoordinates {
  #[serde(default)]
  group_id: Option<String>,
  #[serde(default)]
  artifact_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDependencies {
  #[serde(default)]
  dependency: Vec<RawCoordinates>,
}
