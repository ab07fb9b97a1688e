use std::fs;

use arbor_core::{MetadataField, MetadataFields};
use arbor_scan::{
    DirectoryTreeBuilder, FilterPolicy, MemoryFileSystem, NodeKind, ScanError, TreeNode,
    TreeOptions, WarningKind,
};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

const ROOT: &str = "/workspace";

fn workspace() -> MemoryFileSystem {
    let mut fs = MemoryFileSystem::new();
    fs.add_directory("/workspace/src")
        .add_directory("/workspace/tests/Nested")
        .add_file("/workspace/README.md", 0)
        .add_file("/workspace/src/Program.cs", 0)
        .add_file("/workspace/tests/UnitTest.cs", 0);
    fs
}

fn build(fs: MemoryFileSystem, options: TreeOptions) -> arbor_scan::DirectoryTree {
    DirectoryTreeBuilder::with_file_system(fs)
        .build(ROOT, &FilterPolicy::new(&options))
        .unwrap()
}

fn child<'a>(node: &'a TreeNode, name: &str) -> Option<&'a TreeNode> {
    node.children.iter().find(|c| c.name == name)
}

fn names(node: &TreeNode) -> Vec<&str> {
    node.children.iter().map(|c| c.name.as_str()).collect()
}

fn with_files() -> TreeOptions {
    TreeOptions {
        include_files: true,
        ..TreeOptions::default()
    }
}

#[test]
fn test_root_named_by_full_path() {
    let tree = build(workspace(), TreeOptions::default());

    assert_eq!(tree.root.name, ROOT);
    assert_eq!(tree.root.relative_path, "");
    assert!(tree.root.is_dir());
}

#[test]
fn test_relative_root_resolves_against_current_dir() {
    let fs = workspace().with_current_dir("/workspace/src");
    let tree = DirectoryTreeBuilder::with_file_system(fs)
        .build("..", &FilterPolicy::default())
        .unwrap();

    assert_eq!(tree.root.name, ROOT);
}

#[test]
fn test_directories_only_by_default() {
    let tree = build(workspace(), TreeOptions::default());

    assert_eq!(names(&tree.root), vec!["src", "tests"]);
    let tests = child(&tree.root, "tests").unwrap();
    assert_eq!(names(tests), vec!["Nested"]);
    // Without files every directory is kept even when empty.
    assert!(child(&tree.root, "src").unwrap().children.is_empty());
}

#[test]
fn test_files_listed_after_directories() {
    let tree = build(workspace(), with_files());

    assert_eq!(names(&tree.root), vec!["src", "tests", "README.md"]);
    let readme = child(&tree.root, "README.md").unwrap();
    assert_eq!(readme.kind, NodeKind::File);
    assert_eq!(readme.relative_path, "README.md");

    let program = child(child(&tree.root, "src").unwrap(), "Program.cs").unwrap();
    assert_eq!(program.relative_path, "src/Program.cs");
}

#[test]
fn test_max_depth_one_hides_grandchildren() {
    let tree = build(
        workspace(),
        TreeOptions {
            include_files: true,
            max_depth: Some(1),
            ..TreeOptions::default()
        },
    );

    assert_eq!(names(&tree.root), vec!["src", "tests", "README.md"]);
    let tests = child(&tree.root, "tests").unwrap();
    assert!(tests.is_dir());
    assert!(child(tests, "Nested").is_none());
    assert!(child(&tree.root, "src").unwrap().is_dir());
}

#[test]
fn test_max_depth_zero_keeps_bare_root() {
    let tree = build(
        workspace(),
        TreeOptions {
            include_files: true,
            max_depth: Some(0),
            ..TreeOptions::default()
        },
    );

    assert!(tree.root.children.is_empty());
    assert!(tree.warnings.is_empty());
}

#[test]
fn test_children_sorted_ignoring_case() {
    let mut fs = MemoryFileSystem::new();
    fs.add_directory("/workspace/beta")
        .add_directory("/workspace/Alpha")
        .add_file("/workspace/zeta.txt", 1)
        .add_file("/workspace/Beta.txt", 1)
        .add_file("/workspace/alpha.txt", 1);

    let tree = build(
        fs,
        TreeOptions {
            include_files: true,
            include_directory_patterns: vec!["*".into()],
            ..TreeOptions::default()
        },
    );

    assert_eq!(
        names(&tree.root),
        vec!["Alpha", "beta", "alpha.txt", "Beta.txt", "zeta.txt"]
    );
}

#[test]
fn test_excluded_directory_dropped_with_contents() {
    let tree = build(
        workspace(),
        TreeOptions {
            include_files: true,
            exclude_directory_patterns: vec!["tests**".into()],
            ..TreeOptions::default()
        },
    );

    assert!(child(&tree.root, "tests").is_none());
    assert!(child(&tree.root, "src").is_some());
}

#[test]
fn test_include_directory_patterns() {
    let tree = build(
        workspace(),
        TreeOptions {
            include_files: true,
            include_directory_patterns: vec!["tests".into()],
            ..TreeOptions::default()
        },
    );

    assert_eq!(names(&tree.root), vec!["tests", "README.md"]);
    // Nested fails the include pattern and is dropped.
    assert_eq!(names(child(&tree.root, "tests").unwrap()), vec!["UnitTest.cs"]);
}

#[test]
fn test_empty_branches_pruned_after_filtering() {
    let tree = build(
        workspace(),
        TreeOptions {
            include_files: true,
            include_file_patterns: vec!["src/*.cs".into()],
            exclude_directory_patterns: vec!["tests".into()],
            ..TreeOptions::default()
        },
    );

    assert_eq!(names(&tree.root), vec!["src"]);
    assert_eq!(names(child(&tree.root, "src").unwrap()), vec!["Program.cs"]);
}

#[test]
fn test_explicitly_included_empty_directory_kept() {
    let tree = build(
        workspace(),
        TreeOptions {
            include_files: true,
            include_file_patterns: vec!["nothing".into()],
            include_directory_patterns: vec!["tests*".into()],
            ..TreeOptions::default()
        },
    );

    let tests = child(&tree.root, "tests").unwrap();
    assert_eq!(names(tests), vec!["Nested"]);
    assert!(child(&tree.root, "src").is_none());
}

#[test]
fn test_extension_filter() {
    let tree = build(
        workspace(),
        TreeOptions {
            include_files: true,
            include_extensions: vec!["MD".into()],
            ..TreeOptions::default()
        },
    );

    assert_eq!(names(&tree.root), vec!["README.md"]);
}

#[test]
fn test_metadata_populated_when_requested() {
    let modified = Utc.with_ymd_and_hms(2024, 2, 1, 8, 30, 0).unwrap();
    let mut fs = workspace();
    fs.set_modified("/workspace/README.md", modified)
        .set_ownership("/workspace/README.md", "rw-r--r--", "1000", "1000");

    let tree = build(
        fs,
        TreeOptions {
            include_files: true,
            metadata: MetadataFields::DEFAULT,
            ..TreeOptions::default()
        },
    );

    let readme = child(&tree.root, "README.md").unwrap();
    assert_eq!(readme.metadata.size_bytes, Some(0));
    assert_eq!(readme.metadata.last_modified, Some(modified));
    assert!(readme.metadata.owner.is_none());

    let src = child(&tree.root, "src").unwrap();
    assert!(src.metadata.size_bytes.is_none());
    assert!(src.metadata.last_modified.is_some());
}

#[test]
fn test_metadata_absent_when_not_requested() {
    let tree = build(workspace(), with_files());
    let readme = child(&tree.root, "README.md").unwrap();
    assert!(readme.metadata.is_empty());
}

#[test]
fn test_ownership_fields() {
    let mut fs = workspace();
    fs.set_ownership("/workspace/src/Program.cs", "rwxr-x---", "501", "20");

    let tree = build(
        fs,
        TreeOptions {
            include_files: true,
            metadata: MetadataFields::NONE
                .with(MetadataField::Permissions)
                .with(MetadataField::Group),
            ..TreeOptions::default()
        },
    );

    let program = tree.root.find("src/Program.cs").unwrap();
    assert_eq!(program.metadata.permissions.as_deref(), Some("rwxr-x---"));
    assert_eq!(program.metadata.group.as_deref(), Some("20"));
    assert!(program.metadata.owner.is_none());
}

#[test]
fn test_denied_directory_becomes_warning() {
    let mut fs = workspace();
    fs.add_file("/workspace/private/key.pem", 10)
        .deny("/workspace/private");

    let tree = build(fs, TreeOptions::default());

    assert_eq!(
        tree.warning_messages().collect::<Vec<_>>(),
        vec!["Skipping /workspace/private (access denied)."]
    );
    assert_eq!(tree.warnings[0].kind, WarningKind::PermissionDenied);
    // Directory-only listing keeps the unreadable directory as a leaf.
    assert!(child(&tree.root, "private").unwrap().children.is_empty());
}

#[test]
fn test_denied_directory_warns_for_both_listings() {
    let mut fs = workspace();
    fs.add_file("/workspace/private/key.pem", 10)
        .deny("/workspace/private");

    let tree = build(fs, with_files());

    assert_eq!(
        tree.warning_messages().collect::<Vec<_>>(),
        vec![
            "Skipping /workspace/private (access denied).",
            "Skipping files in /workspace/private (access denied).",
        ]
    );
    assert!(child(&tree.root, "private").is_none());
    assert!(child(&tree.root, "src").is_some());
}

#[test]
fn test_missing_root_is_not_found() {
    let result = DirectoryTreeBuilder::with_file_system(workspace())
        .build("/elsewhere", &FilterPolicy::default());

    assert!(matches!(result, Err(ScanError::NotFound { .. })));
}

#[test]
fn test_file_root_is_not_a_directory() {
    let result = DirectoryTreeBuilder::with_file_system(workspace())
        .build("/workspace/README.md", &FilterPolicy::default());

    assert!(matches!(result, Err(ScanError::NotADirectory { .. })));
}

#[test]
fn test_local_filesystem_build() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("tests/Nested")).unwrap();
    fs::write(root.join("README.md"), "").unwrap();
    fs::write(root.join("src/Program.cs"), "class Program {}").unwrap();
    fs::write(root.join("tests/UnitTest.cs"), "").unwrap();

    let options = TreeOptions::builder()
        .include_files(true)
        .metadata(MetadataFields::DEFAULT)
        .build()
        .unwrap();
    let tree = DirectoryTreeBuilder::new()
        .build(root, &FilterPolicy::new(&options))
        .unwrap();

    let canonical = root.canonicalize().unwrap();
    assert_eq!(tree.root.name, canonical.display().to_string());
    assert_eq!(names(&tree.root), vec!["src", "tests", "README.md"]);

    let program = tree.root.find("src/Program.cs").unwrap();
    assert_eq!(program.metadata.size_bytes, Some(16));
    assert!(program.metadata.last_modified.is_some());

    // tests/Nested is empty and files are listed, so it is pruned.
    let tests = child(&tree.root, "tests").unwrap();
    assert_eq!(names(tests), vec!["UnitTest.cs"]);
}

#[test]
fn test_local_missing_root() {
    let temp = TempDir::new().unwrap();
    let result = DirectoryTreeBuilder::new()
        .build(temp.path().join("missing"), &FilterPolicy::default());

    assert!(matches!(result, Err(ScanError::NotFound { .. })));
}
