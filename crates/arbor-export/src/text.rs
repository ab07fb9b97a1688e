//! Plain-text tree export.

use std::io::Write;

use arbor_core::{ConnectorStyle, DirectoryTree, TreeNode, TreeOptions};

use crate::error::ExportResult;
use crate::exporter::TreeExporter;
use crate::format::MetadataFormatter;

/// Branch and indent strings for one connector style.
#[derive(Debug, Clone, Copy)]
struct Connectors {
    branch: &'static str,
    last_branch: &'static str,
    indent: &'static str,
    last_indent: &'static str,
}

impl Connectors {
    fn for_style(style: ConnectorStyle) -> Self {
        match style {
            ConnectorStyle::Unicode => Self {
                branch: "├── ",
                last_branch: "└── ",
                indent: "│   ",
                last_indent: "    ",
            },
            ConnectorStyle::Ascii => Self {
                branch: "|-- ",
                last_branch: "`-- ",
                indent: "|   ",
                last_indent: "    ",
            },
        }
    }
}

/// Renders the tree with box-drawing (or ASCII) connectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl TextExporter {
    pub fn new() -> Self {
        Self
    }

    fn write_node(
        out: &mut dyn Write,
        node: &TreeNode,
        prefix: &str,
        is_last: bool,
        connectors: Connectors,
        formatter: MetadataFormatter,
    ) -> ExportResult<()> {
        let (branch, indent) = if is_last {
            (connectors.last_branch, connectors.last_indent)
        } else {
            (connectors.branch, connectors.indent)
        };
        writeln!(out, "{prefix}{branch}{}", formatter.label(node))?;

        let child_prefix = format!("{prefix}{indent}");
        Self::write_children(out, node, &child_prefix, connectors, formatter)
    }

    fn write_children(
        out: &mut dyn Write,
        node: &TreeNode,
        prefix: &str,
        connectors: Connectors,
        formatter: MetadataFormatter,
    ) -> ExportResult<()> {
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            Self::write_node(out, child, prefix, i + 1 == count, connectors, formatter)?;
        }
        Ok(())
    }
}

impl TreeExporter for TextExporter {
    fn export(
        &self,
        tree: &DirectoryTree,
        options: &TreeOptions,
        out: &mut dyn Write,
    ) -> ExportResult<()> {
        let connectors = Connectors::for_style(options.connector_style);
        let formatter = MetadataFormatter::new(options.metadata);

        writeln!(out, "{}", formatter.label(&tree.root))?;
        Self::write_children(out, &tree.root, "", connectors, formatter)?;
        out.flush()?;
        Ok(())
    }
}
