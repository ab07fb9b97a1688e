//! Helpers for tree-relative paths.
//!
//! Relative paths always use `/` regardless of the host separator and the
//! tree root is the empty string.

/// Replace backslashes with `/` and trim surrounding whitespace.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/").trim().to_string()
}

/// Normalize a selection key: `/` separators, no leading or trailing `/`.
///
/// Whitespace is kept, since entry names may start or end with spaces. The
/// root maps to the empty string.
pub fn normalize_relative_path(path: &str) -> String {
    path.replace('\\', "/").trim_matches('/').to_string()
}

/// Join a parent relative path and a child name with `/`.
pub fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Parent of a relative path, or `None` for entries directly under the root.
pub fn parent_relative(path: &str) -> Option<&str> {
    match path.rfind('/') {
        Some(idx) if idx > 0 => Some(&path[..idx]),
        _ => None,
    }
}

/// Every prefix of `path`, shortest first: `a/b/c` gives `a`, `a/b`, `a/b/c`.
pub fn path_prefixes(path: &str) -> Vec<String> {
    let mut prefixes = Vec::new();
    let mut current = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);
        prefixes.push(current.clone());
    }
    prefixes
}
