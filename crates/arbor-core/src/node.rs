//! File and directory node types.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Type of tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Directory.
    Directory,
    /// Regular file.
    File,
}

/// Optional per-node details. Each field is present only when it was both
/// requested and readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Length in bytes (files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Last write time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Permission string such as `rwxr-xr-x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl NodeMetadata {
    /// Metadata with every field absent.
    pub const fn empty() -> Self {
        Self {
            size_bytes: None,
            last_modified: None,
            permissions: None,
            owner: None,
            group: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size_bytes.is_none()
            && self.last_modified.is_none()
            && self.permissions.is_none()
            && self.owner.is_none()
            && self.group.is_none()
    }
}

/// A single file or directory in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Entry name. The root holds its resolved absolute path instead.
    pub name: CompactString,

    pub kind: NodeKind,

    /// Path from the root using `/`; empty for the root.
    pub relative_path: String,

    #[serde(default, skip_serializing_if = "NodeMetadata::is_empty")]
    pub metadata: NodeMetadata,

    /// Directories first, then files, each sorted by name ignoring case.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a directory node.
    pub fn directory(
        name: impl Into<CompactString>,
        relative_path: impl Into<String>,
        metadata: NodeMetadata,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            relative_path: relative_path.into(),
            metadata,
            children,
        }
    }

    /// Create a file node.
    pub fn file(
        name: impl Into<CompactString>,
        relative_path: impl Into<String>,
        metadata: NodeMetadata,
    ) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            relative_path: relative_path.into(),
            metadata,
            children: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_root(&self) -> bool {
        self.relative_path.is_empty()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Find a descendant (or this node) by relative path.
    pub fn find(&self, relative_path: &str) -> Option<&TreeNode> {
        if self.relative_path == relative_path {
            return Some(self);
        }
        self.children
            .iter()
            .filter(|child| {
                child.relative_path == relative_path
                    || (child.is_dir()
                        && relative_path
                            .strip_prefix(child.relative_path.as_str())
                            .is_some_and(|rest| rest.starts_with('/')))
            })
            .find_map(|child| child.find(relative_path))
    }

    /// Relative paths of every non-root directory in this subtree.
    pub fn directory_paths(&self) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        self.collect_directory_paths(&mut paths);
        paths
    }

    fn collect_directory_paths(&self, paths: &mut BTreeSet<String>) {
        if !self.is_dir() {
            return;
        }
        if !self.relative_path.is_empty() {
            paths.insert(self.relative_path.clone());
        }
        for child in &self.children {
            child.collect_directory_paths(paths);
        }
    }

    /// Number of (files, directories) below this node, excluding itself.
    pub fn descendant_counts(&self) -> (u64, u64) {
        self.children.iter().fold((0, 0), |(files, dirs), child| {
            if child.is_dir() {
                let (f, d) = child.descendant_counts();
                (files + f, dirs + d + 1)
            } else {
                (files + 1, dirs)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        TreeNode::directory(
            "/work",
            "",
            NodeMetadata::empty(),
            vec![
                TreeNode::directory(
                    "src",
                    "src",
                    NodeMetadata::empty(),
                    vec![
                        TreeNode::directory("nested", "src/nested", NodeMetadata::empty(), vec![]),
                        TreeNode::file("lib.rs", "src/lib.rs", NodeMetadata::empty()),
                    ],
                ),
                TreeNode::directory("srcgen", "srcgen", NodeMetadata::empty(), vec![]),
                TreeNode::file("README.md", "README.md", NodeMetadata::empty()),
            ],
        )
    }

    #[test]
    fn test_node_creation() {
        let node = TreeNode::file("test.txt", "test.txt", NodeMetadata::empty());
        assert!(node.is_file());
        assert!(!node.is_dir());
        assert!(node.children.is_empty());

        let node = TreeNode::directory("dir", "dir", NodeMetadata::empty(), vec![]);
        assert!(node.is_dir());
        assert!(!node.is_root());
    }

    #[test]
    fn test_find() {
        let root = sample();
        assert_eq!(root.find("").map(|n| n.name.as_str()), Some("/work"));
        assert_eq!(root.find("src/lib.rs").map(|n| n.name.as_str()), Some("lib.rs"));
        assert_eq!(root.find("srcgen").map(|n| n.name.as_str()), Some("srcgen"));
        assert!(root.find("src/missing").is_none());
    }

    #[test]
    fn test_directory_paths() {
        let paths: Vec<_> = sample().directory_paths().into_iter().collect();
        assert_eq!(paths, vec!["src", "src/nested", "srcgen"]);
    }

    #[test]
    fn test_descendant_counts() {
        assert_eq!(sample().descendant_counts(), (2, 3));
    }

    #[test]
    fn test_metadata_skipped_when_empty() {
        let node = TreeNode::file("a.txt", "a.txt", NodeMetadata::empty());
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("metadata"));
        assert!(json.contains("\"kind\":\"file\""));
    }
}
