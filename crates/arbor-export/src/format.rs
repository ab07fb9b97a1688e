//! Metadata labels.

use chrono::{DateTime, Utc};

use arbor_core::{MetadataField, MetadataFields, NodeMetadata, TreeNode};

/// Format a byte count with 1024-based `KB`/`MB`/`GB` units.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::WINDOWS)
}

/// Format a timestamp as `YYYY-MM-DD HH:MM UTC`.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Label segments for the requested fields that are present.
pub fn metadata_segments(metadata: &NodeMetadata, fields: MetadataFields) -> Vec<String> {
    let mut segments = Vec::new();

    for field in fields.iter() {
        let segment = match field {
            MetadataField::Size => metadata.size_bytes.map(format_size),
            MetadataField::Modified => metadata.last_modified.as_ref().map(format_timestamp),
            MetadataField::Permissions => present(&metadata.permissions).map(|p| format!("perm={p}")),
            MetadataField::Owner => present(&metadata.owner).map(|o| format!("owner={o}")),
            MetadataField::Group => present(&metadata.group).map(|g| format!("group={g}")),
        };
        segments.extend(segment);
    }

    segments
}

/// ` (seg, seg)` suffix, or an empty string when there is nothing to show.
pub fn metadata_suffix(metadata: &NodeMetadata, fields: MetadataFields) -> String {
    let segments = metadata_segments(metadata, fields);
    if segments.is_empty() {
        String::new()
    } else {
        format!(" ({})", segments.join(", "))
    }
}

/// Node labels for a fixed set of metadata fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataFormatter {
    fields: MetadataFields,
}

impl MetadataFormatter {
    pub fn new(fields: MetadataFields) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> MetadataFields {
        self.fields
    }

    /// Node name followed by its metadata suffix.
    pub fn label(&self, node: &TreeNode) -> String {
        format!("{}{}", node.name, metadata_suffix(&node.metadata, self.fields))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
