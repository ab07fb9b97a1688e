//! Routing an export to a file or to standard output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use arbor_core::{DirectoryTree, TreeOptions};

use crate::error::{ExportError, ExportResult};
use crate::exporter::TreeExporter;

/// Export `tree` to `output` when given, otherwise to `stdout`.
///
/// Missing parent directories of `output` are created and an existing file
/// is replaced. Returns the absolute path written, if any.
pub fn export_to(
    exporter: &dyn TreeExporter,
    tree: &DirectoryTree,
    options: &TreeOptions,
    output: Option<&Path>,
    stdout: &mut dyn Write,
) -> ExportResult<Option<PathBuf>> {
    let Some(output) = output else {
        exporter.export(tree, options, stdout)?;
        return Ok(None);
    };

    let full_path = std::path::absolute(output).map_err(|source| ExportError::Output {
        path: output.to_path_buf(),
        source,
    })?;

    let missing_parent = full_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty() && !parent.exists());
    if let Some(parent) = missing_parent {
        fs::create_dir_all(parent).map_err(|source| ExportError::Output {
            path: parent.to_path_buf(),
            source,
        })?;
        tracing::debug!(target: "arbor::export", path = %parent.display(), "created output directory");
    }

    let file = File::create(&full_path).map_err(|source| ExportError::Output {
        path: full_path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    exporter.export(tree, options, &mut writer)?;
    writer.flush()?;

    tracing::info!(target: "arbor::export", path = %full_path.display(), "tree exported");
    Ok(Some(full_path))
}
