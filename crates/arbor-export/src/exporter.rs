//! The exporter trait and format selection.

use std::io::Write;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use arbor_core::{DirectoryTree, TreeOptions};

use crate::error::ExportResult;
use crate::json::JsonExporter;
use crate::markdown::MarkdownExporter;
use crate::text::TextExporter;

/// Writes a built tree in some output format.
pub trait TreeExporter {
    /// Write `tree` to `out`, honoring the connector style and metadata
    /// fields in `options`.
    fn export(
        &self,
        tree: &DirectoryTree,
        options: &TreeOptions,
        out: &mut dyn Write,
    ) -> ExportResult<()>;
}

/// Available output formats.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl ExportFormat {
    /// Exporter for this format.
    pub fn exporter(self) -> Box<dyn TreeExporter> {
        match self {
            ExportFormat::Text => Box::new(TextExporter::new()),
            ExportFormat::Json => Box::new(JsonExporter::new()),
            ExportFormat::Markdown => Box::new(MarkdownExporter::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_format_names() {
        let names: Vec<String> = ExportFormat::iter().map(|f| f.to_string()).collect();
        assert_eq!(names, vec!["text", "json", "markdown"]);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("yaml".parse::<ExportFormat>().is_err());
    }
}
