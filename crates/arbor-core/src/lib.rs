//! Core types for arbor.
//!
//! This crate provides the data model shared by the other arbor crates: tree
//! nodes, tree options and the filter policy built from them, wildcard
//! matching and relative path helpers.

mod config;
mod error;
mod filter;
mod metadata;
mod node;
pub mod path;
mod tree;
pub mod wildcard;

pub use config::{ConnectorStyle, TreeOptions, TreeOptionsBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use filter::FilterPolicy;
pub use metadata::{MetadataField, MetadataFields};
pub use node::{NodeKind, NodeMetadata, TreeNode};
pub use tree::{DirectoryTree, TreeStats};
pub use wildcard::{WildcardPattern, WildcardSet};
