//! Markdown tree export.

use std::io::Write;

use arbor_core::{DirectoryTree, TreeNode, TreeOptions};

use crate::error::ExportResult;
use crate::exporter::TreeExporter;
use crate::format::MetadataFormatter;

/// Heading for the root followed by a nested bullet list.
///
/// Warnings, if any, follow under a `## Warnings` heading.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownExporter;

impl MarkdownExporter {
    pub fn new() -> Self {
        Self
    }

    fn write_nodes(
        out: &mut dyn Write,
        nodes: &[TreeNode],
        level: usize,
        formatter: MetadataFormatter,
    ) -> ExportResult<()> {
        for node in nodes {
            writeln!(out, "{:indent$}- {}", "", formatter.label(node), indent = level * 2)?;
            Self::write_nodes(out, &node.children, level + 1, formatter)?;
        }
        Ok(())
    }
}

impl TreeExporter for MarkdownExporter {
    fn export(
        &self,
        tree: &DirectoryTree,
        options: &TreeOptions,
        out: &mut dyn Write,
    ) -> ExportResult<()> {
        let formatter = MetadataFormatter::new(options.metadata);

        writeln!(out, "# {}", tree.root.name)?;
        Self::write_nodes(out, &tree.root.children, 0, formatter)?;

        if tree.has_warnings() {
            writeln!(out)?;
            writeln!(out, "## Warnings")?;
            for warning in tree.warning_messages() {
                writeln!(out, "- {warning}")?;
            }
        }

        out.flush()?;
        Ok(())
    }
}
