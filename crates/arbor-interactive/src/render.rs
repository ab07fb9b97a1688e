//! Plain-text session view.

use std::collections::BTreeSet;
use std::io::{self, Write};

use itertools::Itertools;

use arbor_core::{ConnectorStyle, TreeNode, TreeOptions};

/// One line per command, shown in the status block.
pub const KEYBINDINGS: &[&str] = &[
    "select <idx>[,<idx>...]  toggle entries",
    "open <idx>               enter directory",
    "up                       go to parent",
    "select-all               select visible entries",
    "clear                    clear all selections",
    "export                   export selection",
    "quit                     exit session",
];

const HELP: &[&str] = &[
    "select <index> - toggle selection for an entry",
    "open <index>|cd <index> - enter a directory",
    "up - move to the parent directory",
    "select-all - select all visible entries",
    "clear - clear all selections",
    "ls - show the current listing again",
    "export - export the current selection",
    "quit - exit without exporting",
];

/// Draws the status block and listing for a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionRenderer<'a> {
    options: &'a TreeOptions,
}

impl<'a> SessionRenderer<'a> {
    pub fn new(options: &'a TreeOptions) -> Self {
        Self { options }
    }

    fn marks(&self) -> (&'static str, &'static str) {
        match self.options.connector_style {
            ConnectorStyle::Unicode => ("✔", "·"),
            ConnectorStyle::Ascii => ("x", "."),
        }
    }

    /// Status block followed by the numbered children of `current`.
    pub fn render(
        &self,
        out: &mut dyn Write,
        current: &TreeNode,
        selected: &BTreeSet<String>,
    ) -> io::Result<()> {
        self.render_status(out, current, selected.len())?;
        self.render_children(out, current, selected)
    }

    fn render_status(&self, out: &mut dyn Write, current: &TreeNode, selected: usize) -> io::Result<()> {
        let rule = match self.options.connector_style {
            ConnectorStyle::Unicode => "─",
            ConnectorStyle::Ascii => "-",
        };
        let path = if current.is_root() {
            current.name.as_str()
        } else {
            current.relative_path.as_str()
        };

        writeln!(out, "{0}{0} Interactive Mode {0}{0}", rule)?;
        writeln!(out, "Path: {path}")?;
        writeln!(out, "Selected: {selected}")?;
        writeln!(out, "Filters: {}", filter_summary(self.options))?;
        writeln!(out, "Commands:")?;
        for line in KEYBINDINGS {
            writeln!(out, "  {line}")?;
        }
        writeln!(out)
    }

    fn render_children(
        &self,
        out: &mut dyn Write,
        current: &TreeNode,
        selected: &BTreeSet<String>,
    ) -> io::Result<()> {
        if current.children.is_empty() {
            return writeln!(out, "(no children)");
        }

        let (selected_mark, unselected_mark) = self.marks();
        for (index, child) in current.children.iter().enumerate() {
            let mark = if selected.contains(&child.relative_path) {
                selected_mark
            } else {
                unselected_mark
            };
            let suffix = if child.is_dir() { "/" } else { "" };
            writeln!(out, "{index:>2}. {mark} {}{suffix}", child.name)?;
        }
        Ok(())
    }

    pub fn render_help(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Commands:")?;
        for line in HELP {
            writeln!(out, "  {line}")?;
        }
        Ok(())
    }
}

/// One-line description of the active filters, or `(none)`.
pub fn filter_summary(options: &TreeOptions) -> String {
    let options = options.normalized();
    let mut parts = Vec::new();

    if options.include_files {
        parts.push("files=on".to_string());
    }

    let (use_default, extra) = options.metadata.describe();
    let details: Vec<&str> = use_default
        .then_some("size,time")
        .into_iter()
        .chain(extra)
        .collect();
    if !details.is_empty() {
        parts.push(format!("details={}", details.join(",")));
    }

    if options.connector_style == ConnectorStyle::Ascii {
        parts.push("ascii".to_string());
    }
    if let Some(depth) = options.max_depth {
        parts.push(format!("depth={depth}"));
    }

    let lists = [
        ("include-dir", &options.include_directory_patterns),
        ("exclude-dir", &options.exclude_directory_patterns),
        ("include", &options.include_file_patterns),
        ("exclude", &options.exclude_file_patterns),
        ("ext", &options.include_extensions),
    ];
    for (label, values) in lists {
        if !values.is_empty() {
            parts.push(format!("{label}={}", values.iter().join(",")));
        }
    }

    if parts.is_empty() {
        "(none)".to_string()
    } else {
        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::{MetadataField, MetadataFields, NodeMetadata};

    fn render(options: &TreeOptions, node: &TreeNode, selected: &[&str]) -> String {
        let selected: BTreeSet<String> = selected.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        SessionRenderer::new(options)
            .render(&mut out, node, &selected)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_empty_directory_in_ascii() {
        let options = TreeOptions {
            connector_style: ConnectorStyle::Ascii,
            ..TreeOptions::default()
        };
        let node = TreeNode::directory("root", "", NodeMetadata::empty(), vec![]);

        let output = render(&options, &node, &[]);
        assert!(output.contains("Interactive Mode"));
        assert!(output.contains("Path: root"));
        assert!(output.contains("Commands:"));
        assert!(output.contains("(no children)"));
        assert!(output.is_ascii());
    }

    #[test]
    fn test_render_marks_selected_children() {
        let node = TreeNode::directory(
            "/workspace",
            "",
            NodeMetadata::empty(),
            vec![
                TreeNode::directory("src", "src", NodeMetadata::empty(), vec![]),
                TreeNode::file("README.md", "README.md", NodeMetadata::empty()),
            ],
        );

        let output = render(&TreeOptions::default(), &node, &["src"]);
        assert!(output.contains(" 0. ✔ src/"));
        assert!(output.contains(" 1. · README.md"));
        assert!(output.contains("Selected: 1"));
    }

    #[test]
    fn test_filter_summary() {
        assert_eq!(filter_summary(&TreeOptions::default()), "(none)");

        let options = TreeOptions {
            include_files: true,
            max_depth: Some(2),
            metadata: MetadataFields::DEFAULT.with(MetadataField::Owner),
            include_extensions: vec!["CS".into()],
            exclude_directory_patterns: vec!["bin".into(), "obj".into()],
            ..TreeOptions::default()
        };
        assert_eq!(
            filter_summary(&options),
            "files=on | details=size,time,owner | depth=2 | exclude-dir=bin,obj | ext=.cs"
        );
    }
}
