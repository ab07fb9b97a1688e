//! Metadata collection from host filesystem entries.

use std::fs::Metadata;

use chrono::{DateTime, Utc};

use arbor_core::{MetadataField, MetadataFields, NodeMetadata};

/// Read the requested fields from `metadata`. Size is reported for files only.
pub(crate) fn read_metadata(metadata: &Metadata, fields: MetadataFields) -> NodeMetadata {
    let mut result = NodeMetadata::empty();

    if fields.contains(MetadataField::Size) && metadata.is_file() {
        result.size_bytes = Some(metadata.len());
    }

    if fields.contains(MetadataField::Modified) {
        result.last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);
    }

    if fields.needs_ownership() {
        read_ownership(metadata, fields, &mut result);
    }

    result
}

#[cfg(unix)]
fn read_ownership(metadata: &Metadata, fields: MetadataFields, result: &mut NodeMetadata) {
    use std::os::unix::fs::{MetadataExt, PermissionsExt};

    if fields.contains(MetadataField::Permissions) {
        result.permissions = Some(permission_string(metadata.permissions().mode()));
    }
    if fields.contains(MetadataField::Owner) {
        result.owner = Some(metadata.uid().to_string());
    }
    if fields.contains(MetadataField::Group) {
        result.group = Some(metadata.gid().to_string());
    }
}

#[cfg(not(unix))]
fn read_ownership(_metadata: &Metadata, _fields: MetadataFields, _result: &mut NodeMetadata) {}

/// Render the low nine mode bits as `rwxr-xr-x`.
pub fn permission_string(mode: u32) -> String {
    const FLAGS: [(u32, char); 9] = [
        (0o400, 'r'),
        (0o200, 'w'),
        (0o100, 'x'),
        (0o040, 'r'),
        (0o020, 'w'),
        (0o010, 'x'),
        (0o004, 'r'),
        (0o002, 'w'),
        (0o001, 'x'),
    ];

    FLAGS
        .iter()
        .map(|&(bit, ch)| if mode & bit != 0 { ch } else { '-' })
        .collect()
}
