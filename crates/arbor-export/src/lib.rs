//! Tree exporters for arbor.
//!
//! A [`DirectoryTree`](arbor_core::DirectoryTree) can be written as an
//! indented text tree, pretty JSON or a Markdown outline. [`export_to`]
//! sends the output to a file or to standard output.
//!
//! # Example
//!
//! ```rust
//! use arbor_core::{DirectoryTree, NodeMetadata, TreeNode, TreeOptions};
//! use arbor_export::{ExportFormat, export_to};
//!
//! let root = TreeNode::directory(
//!     "/work",
//!     "",
//!     NodeMetadata::empty(),
//!     vec![TreeNode::directory("src", "src", NodeMetadata::empty(), vec![])],
//! );
//! let tree = DirectoryTree::new(root, vec![]);
//!
//! let mut out = Vec::new();
//! let exporter = ExportFormat::Text.exporter();
//! export_to(exporter.as_ref(), &tree, &TreeOptions::default(), None, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "/work\n└── src\n");
//! ```

mod error;
mod executor;
mod exporter;
mod format;
mod json;
mod markdown;
mod text;

pub use error::{ExportError, ExportResult};
pub use executor::export_to;
pub use exporter::{ExportFormat, TreeExporter};
pub use format::{MetadataFormatter, format_size, format_timestamp, metadata_segments, metadata_suffix};
pub use json::JsonExporter;
pub use markdown::MarkdownExporter;
pub use text::TextExporter;
