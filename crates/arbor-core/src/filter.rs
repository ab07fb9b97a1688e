//! Inclusion decisions for files, directories and depth levels.

use crate::config::TreeOptions;
use crate::path::normalize_separators;
use crate::wildcard::WildcardSet;

/// Normalized [`TreeOptions`] with compiled patterns.
///
/// These predicates are the only filtering primitives; traversal and command
/// reconstruction are built from them.
#[derive(Debug, Clone)]
pub struct FilterPolicy {
    options: TreeOptions,
    include_files: WildcardSet,
    exclude_files: WildcardSet,
    include_dirs: WildcardSet,
    exclude_dirs: WildcardSet,
}

impl FilterPolicy {
    /// Normalize the options and compile their patterns.
    pub fn new(options: &TreeOptions) -> Self {
        let options = options.normalized();
        Self {
            include_files: WildcardSet::new(&options.include_file_patterns),
            exclude_files: WildcardSet::new(&options.exclude_file_patterns),
            include_dirs: WildcardSet::new(&options.include_directory_patterns),
            exclude_dirs: WildcardSet::new(&options.exclude_directory_patterns),
            options,
        }
    }

    /// The normalized options.
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Decide whether a file at `relative_path` is kept.
    ///
    /// Exclusions and extension checks run before include patterns, so an
    /// excluded file stays out even when an include pattern matches it.
    pub fn should_include_file(&self, relative_path: &str) -> bool {
        let normalized = normalize_separators(relative_path);

        if self.exclude_files.any_match(&normalized) {
            return false;
        }

        if !self.options.include_extensions.is_empty() {
            let lowered = normalized.to_lowercase();
            if !self
                .options
                .include_extensions
                .iter()
                .any(|ext| lowered.ends_with(ext.as_str()))
            {
                return false;
            }
        }

        self.include_files.is_empty() || self.include_files.any_match(&normalized)
    }

    /// Decide whether a directory at `relative_path` is kept. The root (empty
    /// path) always is.
    pub fn should_include_directory(&self, relative_path: &str) -> bool {
        if relative_path.is_empty() {
            return true;
        }

        let normalized = normalize_separators(relative_path);

        if self.exclude_dirs.any_match(&normalized) {
            return false;
        }

        self.include_dirs.is_empty() || self.include_dirs.any_match(&normalized)
    }

    /// Check whether a depth is within the configured limit.
    pub fn should_include_level(&self, depth: u32) -> bool {
        self.options.should_include_level(depth)
    }

    /// True when include-directory patterns exist and this directory passes them.
    pub fn is_explicitly_included_directory(&self, relative_path: &str) -> bool {
        !relative_path.is_empty()
            && !self.include_dirs.is_empty()
            && self.should_include_directory(relative_path)
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::new(&TreeOptions::default())
    }
}

impl From<TreeOptions> for FilterPolicy {
    fn from(options: TreeOptions) -> Self {
        Self::new(&options)
    }
}
