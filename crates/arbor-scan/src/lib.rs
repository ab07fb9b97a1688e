//! Directory tree building for arbor.
//!
//! This crate walks a directory depth-first and builds the filtered
//! [`DirectoryTree`] described by a [`FilterPolicy`].
//!
//! - **Filtering** by file and directory wildcards, extensions and depth
//! - **Warnings** instead of failures for unreadable directories
//! - **Pluggable filesystem** via the [`FileSystem`] trait
//!
//! # Example
//!
//! ```rust,no_run
//! use arbor_scan::{DirectoryTreeBuilder, FilterPolicy, TreeOptions};
//!
//! let options = TreeOptions::builder()
//!     .include_files(true)
//!     .max_depth(2u32)
//!     .build()
//!     .unwrap();
//! let tree = DirectoryTreeBuilder::new()
//!     .build(".", &FilterPolicy::new(&options))
//!     .unwrap();
//!
//! println!("{} entries under the root", tree.root.child_count());
//! for warning in &tree.warnings {
//!     eprintln!("{warning}");
//! }
//! ```

mod builder;
mod fs;
mod metadata;

pub use builder::{DirectoryTreeBuilder, is_exempt_from_empty_pruning};
pub use fs::{Entry, FileSystem, LocalFileSystem, MemoryFileSystem};
pub use metadata::permission_string;

// Re-export core types for convenience
pub use arbor_core::{
    DirectoryTree, FilterPolicy, NodeKind, NodeMetadata, ScanError, ScanWarning, TreeNode,
    TreeOptions, WarningKind,
};
