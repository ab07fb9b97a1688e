//! Depth-first tree building under a filter policy.

use std::path::Path;
use std::time::Instant;

use arbor_core::path::join_relative;
use arbor_core::{
    DirectoryTree, FilterPolicy, NodeMetadata, ScanError, ScanWarning, TreeNode, WarningKind,
};

use crate::fs::{Entry, FileSystem, LocalFileSystem};

/// Builds a [`DirectoryTree`] from a filesystem.
#[derive(Debug, Clone, Default)]
pub struct DirectoryTreeBuilder<F = LocalFileSystem> {
    fs: F,
}

impl DirectoryTreeBuilder<LocalFileSystem> {
    /// Create a builder over the host filesystem.
    pub fn new() -> Self {
        Self {
            fs: LocalFileSystem,
        }
    }
}

impl<F: FileSystem> DirectoryTreeBuilder<F> {
    /// Create a builder over a custom filesystem.
    pub fn with_file_system(fs: F) -> Self {
        Self { fs }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Build the tree rooted at `root_path`.
    ///
    /// Fails only when the root cannot be resolved to a directory. Listing
    /// failures further down become warnings on the result.
    pub fn build(
        &self,
        root_path: impl AsRef<Path>,
        policy: &FilterPolicy,
    ) -> Result<DirectoryTree, ScanError> {
        let start = Instant::now();
        let requested = root_path.as_ref();
        let full_path = self
            .fs
            .resolve_full_path(requested)
            .map_err(|e| ScanError::io(requested, e))?;

        if !self.fs.directory_exists(&full_path) {
            return Err(ScanError::NotADirectory { path: full_path });
        }

        let mut warnings = Vec::new();
        let root_name = full_path.display().to_string();
        let root = self
            .build_directory(policy, &full_path, &root_name, "", 0, &mut warnings)
            .unwrap_or_else(|| {
                TreeNode::directory(
                    root_name.as_str(),
                    "",
                    self.directory_metadata(policy, &full_path),
                    Vec::new(),
                )
            });

        let tree = DirectoryTree::new(root, warnings);
        let stats = tree.stats();
        tracing::info!(
            target: "arbor::scan",
            root = %full_path.display(),
            files = stats.total_files,
            dirs = stats.total_dirs,
            warnings = stats.total_warnings,
            elapsed = ?start.elapsed(),
            "tree built"
        );

        Ok(tree)
    }

    fn build_directory(
        &self,
        policy: &FilterPolicy,
        full_path: &Path,
        name: &str,
        relative_path: &str,
        depth: u32,
        warnings: &mut Vec<ScanWarning>,
    ) -> Option<TreeNode> {
        let is_root = depth == 0;

        if !is_root && !policy.should_include_directory(relative_path) {
            tracing::debug!(target: "arbor::scan", path = relative_path, "directory filtered out");
            return None;
        }

        let metadata = self.directory_metadata(policy, full_path);

        if !policy.should_include_level(depth) {
            return Some(TreeNode::directory(name, relative_path, metadata, Vec::new()));
        }

        tracing::debug!(target: "arbor::scan", path = %full_path.display(), depth, "visiting directory");

        let has_depth_budget = policy.should_include_level(depth + 1);
        let mut children = Vec::new();

        if has_depth_budget {
            let subdirectories = self.list_sorted(full_path, ListKind::Directories, warnings);
            for entry in subdirectories {
                let child_relative = join_relative(relative_path, &entry.name);
                if let Some(child) = self.build_directory(
                    policy,
                    &entry.path,
                    &entry.name,
                    &child_relative,
                    depth + 1,
                    warnings,
                ) {
                    children.push(child);
                }
            }
        }

        if policy.options().include_files && has_depth_budget {
            let files = self.list_sorted(full_path, ListKind::Files, warnings);
            for entry in files {
                let file_relative = join_relative(relative_path, &entry.name);
                if !policy.should_include_file(&file_relative) {
                    continue;
                }
                let metadata = self
                    .fs
                    .lookup_metadata(&entry.path, policy.options().metadata);
                children.push(TreeNode::file(entry.name, file_relative, metadata));
            }
        }

        if children.is_empty()
            && !is_exempt_from_empty_pruning(policy, relative_path, is_root, has_depth_budget)
        {
            tracing::debug!(target: "arbor::scan", path = relative_path, "empty directory pruned");
            return None;
        }

        Some(TreeNode::directory(name, relative_path, metadata, children))
    }

    fn directory_metadata(&self, policy: &FilterPolicy, path: &Path) -> NodeMetadata {
        let fields = policy.options().metadata;
        if fields.is_empty() {
            return NodeMetadata::empty();
        }
        let mut metadata = self.fs.lookup_metadata(path, fields);
        metadata.size_bytes = None;
        metadata
    }

    /// List entries sorted by name ignoring case. A failed listing records a
    /// warning and yields nothing.
    fn list_sorted(
        &self,
        path: &Path,
        kind: ListKind,
        warnings: &mut Vec<ScanWarning>,
    ) -> Vec<Entry> {
        let listed = match kind {
            ListKind::Directories => self.fs.list_subdirectories(path),
            ListKind::Files => self.fs.list_files(path),
        };

        match listed {
            Ok(mut entries) => {
                entries.sort_by(|a, b| {
                    a.name
                        .to_lowercase()
                        .cmp(&b.name.to_lowercase())
                        .then_with(|| a.name.cmp(&b.name))
                });
                entries
            }
            Err(err) => {
                let full = path.display().to_string();
                let warning_kind = WarningKind::from_io(&err);
                let warning = match kind {
                    ListKind::Directories => ScanWarning::directory_skipped(full, warning_kind),
                    ListKind::Files => ScanWarning::files_skipped(full, warning_kind),
                };
                tracing::warn!(target: "arbor::scan", %err, "{}", warning.message);
                warnings.push(warning);
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ListKind {
    Directories,
    Files,
}

/// Whether a directory with no surviving children is still emitted.
///
/// It is when it is the root, when the depth limit stopped enumeration, when
/// files are not listed at all, or when an include-directory pattern names it.
pub fn is_exempt_from_empty_pruning(
    policy: &FilterPolicy,
    relative_path: &str,
    is_root: bool,
    has_depth_budget: bool,
) -> bool {
    is_root
        || !has_depth_budget
        || !policy.options().include_files
        || policy.is_explicitly_included_directory(relative_path)
}
