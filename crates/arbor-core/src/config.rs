//! Tree building options.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::metadata::MetadataFields;
use crate::path::normalize_separators;

/// Connector glyphs used when rendering a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStyle {
    /// Box-drawing characters.
    #[default]
    Unicode,
    /// Plain ASCII connectors.
    Ascii,
}

/// Options controlling which entries a tree contains and how it is shown.
///
/// Pattern lists are kept as given; [`TreeOptions::normalized`] produces the
/// canonical form that filtering runs against.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct TreeOptions {
    /// Include files (directories are always listed).
    #[builder(default = "false")]
    #[serde(default)]
    pub include_files: bool,

    /// Maximum depth to traverse (None = unlimited). The root is depth 0.
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Connector glyphs for rendering.
    #[builder(default)]
    #[serde(default)]
    pub connector_style: ConnectorStyle,

    /// Metadata to collect per node.
    #[builder(default)]
    #[serde(default)]
    pub metadata: MetadataFields,

    /// Only files matching one of these globs are kept.
    #[builder(default)]
    #[serde(default)]
    pub include_file_patterns: Vec<String>,

    /// Files matching any of these globs are dropped.
    #[builder(default)]
    #[serde(default)]
    pub exclude_file_patterns: Vec<String>,

    /// Only files with one of these extensions are kept.
    #[builder(default)]
    #[serde(default)]
    pub include_extensions: Vec<String>,

    /// Only directories matching one of these globs are kept.
    #[builder(default)]
    #[serde(default)]
    pub include_directory_patterns: Vec<String>,

    /// Directories matching any of these globs are dropped with their contents.
    #[builder(default)]
    #[serde(default)]
    pub exclude_directory_patterns: Vec<String>,
}

impl TreeOptions {
    /// Create a new options builder.
    pub fn builder() -> TreeOptionsBuilder {
        TreeOptionsBuilder::default()
    }

    /// Canonical form of these options. Pure and idempotent.
    ///
    /// Patterns are trimmed and use `/` separators; extensions are lower-case
    /// with a leading dot. Blank entries are dropped.
    pub fn normalized(&self) -> Self {
        Self {
            include_files: self.include_files,
            max_depth: self.max_depth,
            connector_style: self.connector_style,
            metadata: self.metadata,
            include_file_patterns: normalize_patterns(&self.include_file_patterns),
            exclude_file_patterns: normalize_patterns(&self.exclude_file_patterns),
            include_extensions: normalize_extensions(&self.include_extensions),
            include_directory_patterns: normalize_patterns(&self.include_directory_patterns),
            exclude_directory_patterns: normalize_patterns(&self.exclude_directory_patterns),
        }
    }

    /// Check whether a depth is within the configured limit.
    pub fn should_include_level(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            include_files: false,
            max_depth: None,
            connector_style: ConnectorStyle::Unicode,
            metadata: MetadataFields::NONE,
            include_file_patterns: Vec::new(),
            exclude_file_patterns: Vec::new(),
            include_extensions: Vec::new(),
            include_directory_patterns: Vec::new(),
            exclude_directory_patterns: Vec::new(),
        }
    }
}

fn normalize_patterns(patterns: &[String]) -> Vec<String> {
    patterns
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| normalize_separators(p))
        .collect()
}

fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .map(|e| if e.starts_with('.') { e } else { format!(".{e}") })
        .collect()
}
