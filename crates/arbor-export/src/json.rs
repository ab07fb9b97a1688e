//! JSON tree export.

use std::io::Write;

use arbor_core::{DirectoryTree, TreeOptions};

use crate::error::ExportResult;
use crate::exporter::TreeExporter;

/// Writes the whole [`DirectoryTree`], warnings included, as pretty JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }
}

impl TreeExporter for JsonExporter {
    fn export(
        &self,
        tree: &DirectoryTree,
        _options: &TreeOptions,
        out: &mut dyn Write,
    ) -> ExportResult<()> {
        serde_json::to_writer_pretty(&mut *out, tree)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
