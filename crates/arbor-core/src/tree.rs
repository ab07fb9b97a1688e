//! Tree container and statistics.

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;
use crate::node::TreeNode;

/// Summary counts for a built tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Files below the root.
    pub total_files: u64,
    /// Directories below the root.
    pub total_dirs: u64,
    /// Warnings collected while building.
    pub total_warnings: usize,
}

/// A built tree plus the warnings collected while building it, in the order
/// they occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryTree {
    pub root: TreeNode,
    #[serde(default)]
    pub warnings: Vec<ScanWarning>,
}

impl DirectoryTree {
    pub fn new(root: TreeNode, warnings: Vec<ScanWarning>) -> Self {
        Self { root, warnings }
    }

    /// Check if there were any warnings during building.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Warning messages in order.
    pub fn warning_messages(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().map(|w| w.message.as_str())
    }

    pub fn stats(&self) -> TreeStats {
        let (total_files, total_dirs) = self.root.descendant_counts();
        TreeStats {
            total_files,
            total_dirs,
            total_warnings: self.warnings.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarningKind;
    use crate::node::NodeMetadata;

    #[test]
    fn test_tree_stats() {
        let root = TreeNode::directory(
            "/root",
            "",
            NodeMetadata::empty(),
            vec![
                TreeNode::directory("a", "a", NodeMetadata::empty(), vec![]),
                TreeNode::file("b.txt", "b.txt", NodeMetadata::empty()),
            ],
        );
        let tree = DirectoryTree::new(
            root,
            vec![ScanWarning::directory_skipped("/root/a", WarningKind::PermissionDenied)],
        );

        let stats = tree.stats();
        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.total_dirs, 1);
        assert_eq!(stats.total_warnings, 1);
        assert!(tree.has_warnings());
        assert_eq!(
            tree.warning_messages().collect::<Vec<_>>(),
            vec!["Skipping /root/a (access denied)."]
        );
    }
}
