//! Rebuild a non-interactive command line from a selection.
//!
//! The mapping is lossy: different selections can produce the same flags,
//! and the command may match more than was selected when patterns overlap.

use std::collections::BTreeMap;

use itertools::Itertools;

use arbor_core::path::{normalize_relative_path, parent_relative, path_prefixes};
use arbor_core::{ConnectorStyle, FilterPolicy, TreeNode};

/// Program and subcommand every suggested command starts with.
pub const BASE_COMMAND: &str = "arbor tree";

/// Build the `arbor tree ...` command that reproduces `selected`.
///
/// Selected directories (looked up in `root`) add themselves and their
/// ancestors as `--include-dir`; selected files add an `--include` plus their
/// parent chain. Returns `None` when no non-blank selection is left.
pub fn emit_filter_command<I, S>(
    selected: I,
    policy: &FilterPolicy,
    root: &TreeNode,
    root_path: &str,
) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let selected: Vec<String> = selected
        .into_iter()
        .map(|path| normalize_relative_path(path.as_ref()))
        .filter(|path| !path.trim().is_empty())
        .collect();

    if selected.is_empty() {
        return None;
    }

    let options = policy.options();
    let directories = root.directory_paths();

    let mut include_dirs = PatternSet::from_patterns(&options.include_directory_patterns);
    let mut include_files = PatternSet::from_patterns(&options.include_file_patterns);

    for path in &selected {
        if directories.contains(path) {
            include_dirs.extend(path_prefixes(path));
            continue;
        }

        include_files.insert(path.clone());
        if let Some(parent) = parent_relative(path) {
            include_dirs.extend(path_prefixes(parent));
        }
    }

    let mut arguments = vec![BASE_COMMAND.to_string()];
    if !root_path.trim().is_empty() {
        arguments.push(quote(root_path));
    }

    if options.include_files {
        arguments.push("--files".to_string());
    }

    let (use_default_details, extra_details) = options.metadata.describe();
    if use_default_details {
        arguments.push("--details".to_string());
    }
    for detail in extra_details {
        arguments.push("--details-field".to_string());
        arguments.push(detail.to_string());
    }

    if options.connector_style == ConnectorStyle::Ascii {
        arguments.push("--ascii".to_string());
    }

    if let Some(depth) = options.max_depth {
        arguments.push("--depth".to_string());
        arguments.push(depth.to_string());
    }

    push_flag(&mut arguments, "--include", include_files.values());
    push_flag(&mut arguments, "--exclude", sorted(&options.exclude_file_patterns));
    push_flag(&mut arguments, "--include-dir", include_dirs.values());
    push_flag(
        &mut arguments,
        "--exclude-dir",
        sorted(&options.exclude_directory_patterns),
    );
    push_flag(&mut arguments, "--ext", sorted(&options.include_extensions));

    tracing::debug!(target: "arbor::interactive", selected = selected.len(), "emitted filter command");

    Some(arguments.join(" "))
}

/// Patterns de-duplicated ignoring case, iterated in case-insensitive order.
/// The first spelling of a pattern wins.
#[derive(Debug, Default)]
struct PatternSet {
    by_key: BTreeMap<String, String>,
}

impl PatternSet {
    fn from_patterns(patterns: &[String]) -> Self {
        let mut set = Self::default();
        set.extend(patterns.iter().cloned());
        set
    }

    fn insert(&mut self, pattern: String) {
        self.by_key.entry(pattern.to_lowercase()).or_insert(pattern);
    }

    fn extend(&mut self, patterns: impl IntoIterator<Item = String>) {
        for pattern in patterns {
            self.insert(pattern);
        }
    }

    fn values(&self) -> impl Iterator<Item = &str> {
        self.by_key.values().map(String::as_str)
    }
}

fn sorted(values: &[String]) -> impl Iterator<Item = &str> {
    values
        .iter()
        .map(String::as_str)
        .sorted_by_key(|value| value.to_lowercase())
}

fn push_flag<'a>(arguments: &mut Vec<String>, flag: &str, values: impl Iterator<Item = &'a str>) {
    for value in values {
        arguments.push(flag.to_string());
        arguments.push(quote(value));
    }
}

/// Wrap values containing whitespace or `"` in double quotes, escaping
/// embedded quotes as `\"`. Backslashes are left alone so Windows paths
/// survive; other shell expansions (`$`, backticks) are not escaped.
fn quote(value: &str) -> String {
    if !value.chars().any(|c| c.is_whitespace() || c == '"') {
        return value.to_string();
    }
    format!("\"{}\"", value.replace('"', "\\\""))
}
