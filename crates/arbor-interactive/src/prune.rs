//! Reduce a tree to a selection.

use std::collections::BTreeSet;

use arbor_core::path::normalize_relative_path;
use arbor_core::{DirectoryTree, TreeNode};

/// Build a new tree holding only the selected nodes and the directories
/// needed to reach them.
///
/// A selected node keeps its whole subtree. Selecting the root (empty path)
/// keeps everything. The root is always present, and warnings carry over
/// unchanged. Applying the same selection twice gives the same tree.
pub fn prune<I, S>(tree: &DirectoryTree, selected: I) -> DirectoryTree
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let selected: BTreeSet<String> = selected
        .into_iter()
        .map(|path| normalize_relative_path(path.as_ref()))
        .collect();

    if selected.contains("") {
        return tree.clone();
    }

    let root = &tree.root;
    let children = prune_children(root, &selected);
    DirectoryTree::new(
        TreeNode::directory(
            root.name.clone(),
            root.relative_path.clone(),
            root.metadata.clone(),
            children,
        ),
        tree.warnings.clone(),
    )
}

fn prune_children(node: &TreeNode, selected: &BTreeSet<String>) -> Vec<TreeNode> {
    node.children
        .iter()
        .filter_map(|child| prune_node(child, selected))
        .collect()
}

fn prune_node(node: &TreeNode, selected: &BTreeSet<String>) -> Option<TreeNode> {
    if selected.contains(&node.relative_path) {
        return Some(node.clone());
    }

    if node.is_file() {
        return None;
    }

    let children = prune_children(node, selected);
    if children.is_empty() {
        return None;
    }

    Some(TreeNode::directory(
        node.name.clone(),
        node.relative_path.clone(),
        node.metadata.clone(),
        children,
    ))
}
