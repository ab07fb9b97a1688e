//! Filesystem access used by the tree builder.
//!
//! [`LocalFileSystem`] reads the host filesystem. [`MemoryFileSystem`] holds
//! an in-memory tree so builds can be tested without touching disk.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Component, Path, PathBuf, Prefix};

use chrono::{DateTime, Utc};

use arbor_core::{MetadataField, MetadataFields, NodeMetadata};

use crate::metadata::read_metadata;

/// A named entry inside a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Leaf name.
    pub name: String,
    /// Full path to the entry.
    pub path: PathBuf,
}

impl Entry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Directory listing and metadata lookup.
pub trait FileSystem {
    /// Resolve `path` to an absolute path.
    fn resolve_full_path(&self, path: &Path) -> io::Result<PathBuf>;

    fn directory_exists(&self, path: &Path) -> bool;

    /// Immediate subdirectories of `path`, in no particular order.
    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<Entry>>;

    /// Immediate files of `path`, in no particular order.
    fn list_files(&self, path: &Path) -> io::Result<Vec<Entry>>;

    /// Requested metadata for `path`. Never fails; unreadable fields are absent.
    fn lookup_metadata(&self, _path: &Path, _fields: MetadataFields) -> NodeMetadata {
        NodeMetadata::empty()
    }
}

/// The host filesystem.
///
/// Entries are classified without following symbolic links, except that a
/// link to a regular file is listed as a file. Links to directories are
/// never descended.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }

    fn list(&self, path: &Path, want_dirs: bool) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let is_match = if file_type.is_symlink() {
                !want_dirs && std::fs::metadata(entry.path()).is_ok_and(|m| m.is_file())
            } else if want_dirs {
                file_type.is_dir()
            } else {
                file_type.is_file()
            };

            if is_match {
                entries.push(Entry::new(
                    entry.file_name().to_string_lossy().into_owned(),
                    entry.path(),
                ));
            }
        }
        Ok(entries)
    }
}

impl FileSystem for LocalFileSystem {
    fn resolve_full_path(&self, path: &Path) -> io::Result<PathBuf> {
        path.canonicalize().map(without_verbatim_prefix)
    }

    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<Entry>> {
        self.list(path, true)
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<Entry>> {
        self.list(path, false)
    }

    fn lookup_metadata(&self, path: &Path, fields: MetadataFields) -> NodeMetadata {
        if fields.is_empty() {
            return NodeMetadata::empty();
        }
        match std::fs::metadata(path) {
            Ok(metadata) => read_metadata(&metadata, fields),
            Err(err) => {
                tracing::debug!(target: "arbor::scan", path = %path.display(), %err, "metadata unavailable");
                NodeMetadata::empty()
            }
        }
    }
}

/// Rewrite Windows `\\?\C:\...` and `\\?\UNC\...` paths, as returned by
/// `canonicalize`, into their familiar `C:\...` and `\\server\share` forms.
/// Other paths are returned unchanged.
fn without_verbatim_prefix(path: PathBuf) -> PathBuf {
    let mut components = path.components();
    let simplified = match components.next() {
        Some(Component::Prefix(prefix)) => match prefix.kind() {
            Prefix::VerbatimDisk(drive) => Some(PathBuf::from(format!("{}:\\", drive as char))),
            Prefix::VerbatimUNC(server, share) => Some(PathBuf::from(format!(
                "\\\\{}\\{}\\",
                server.to_string_lossy(),
                share.to_string_lossy()
            ))),
            _ => None,
        },
        _ => None,
    };

    match simplified {
        Some(mut base) => {
            base.extend(components.filter(|c| !matches!(c, Component::RootDir)));
            base
        }
        None => path,
    }
}

#[derive(Debug, Clone)]
enum MemoryNode {
    Directory,
    File { len: u64 },
}

#[derive(Debug, Clone, Default)]
struct Ownership {
    permissions: Option<String>,
    owner: Option<String>,
    group: Option<String>,
}

/// An in-memory filesystem.
///
/// Paths are absolute and use `/`. Adding an entry creates its missing parent
/// directories. Listing a path marked with [`deny`](Self::deny) fails with
/// [`io::ErrorKind::PermissionDenied`].
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    current_dir: PathBuf,
    nodes: BTreeMap<PathBuf, MemoryNode>,
    modified: BTreeMap<PathBuf, DateTime<Utc>>,
    ownership: BTreeMap<PathBuf, Ownership>,
    denied: BTreeSet<PathBuf>,
}

impl MemoryFileSystem {
    /// An empty filesystem holding only `/`.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), MemoryNode::Directory);
        Self {
            current_dir: PathBuf::from("/"),
            nodes,
            modified: BTreeMap::new(),
            ownership: BTreeMap::new(),
            denied: BTreeSet::new(),
        }
    }

    /// Directory that relative paths resolve against.
    pub fn with_current_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = self.absolute(path.as_ref());
        self.add_directory(&path);
        self.current_dir = path;
        self
    }

    pub fn add_directory(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = self.absolute(path.as_ref());
        self.add_parents(&path);
        self.nodes.insert(path, MemoryNode::Directory);
        self
    }

    /// Add a file of `len` bytes.
    pub fn add_file(&mut self, path: impl AsRef<Path>, len: u64) -> &mut Self {
        let path = self.absolute(path.as_ref());
        self.add_parents(&path);
        self.nodes.insert(path, MemoryNode::File { len });
        self
    }

    pub fn set_modified(&mut self, path: impl AsRef<Path>, modified: DateTime<Utc>) -> &mut Self {
        let path = self.absolute(path.as_ref());
        self.modified.insert(path, modified);
        self
    }

    /// Set the permission string, owner and group reported for `path`.
    pub fn set_ownership(
        &mut self,
        path: impl AsRef<Path>,
        permissions: impl Into<String>,
        owner: impl Into<String>,
        group: impl Into<String>,
    ) -> &mut Self {
        let path = self.absolute(path.as_ref());
        self.ownership.insert(
            path,
            Ownership {
                permissions: Some(permissions.into()),
                owner: Some(owner.into()),
                group: Some(group.into()),
            },
        );
        self
    }

    /// Make listing `path` fail with a permission error.
    pub fn deny(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = self.absolute(path.as_ref());
        self.denied.insert(path);
        self
    }

    fn add_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(MemoryNode::Directory);
        }
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        let joined = if path.has_root() {
            path.to_path_buf()
        } else {
            self.current_dir.join(path)
        };

        let mut normalized = PathBuf::from("/");
        for component in joined.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::ParentDir => {
                    normalized.pop();
                }
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            }
        }
        normalized
    }

    fn list(&self, path: &Path, want_dirs: bool) -> io::Result<Vec<Entry>> {
        let path = self.absolute(path);
        match self.nodes.get(&path) {
            Some(MemoryNode::Directory) => {}
            Some(MemoryNode::File { .. }) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", path.display()),
                ));
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", path.display()),
                ));
            }
        }

        if self.denied.contains(&path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("access denied: {}", path.display()),
            ));
        }

        Ok(self
            .nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(path.as_path()))
            .filter(|(_, node)| matches!(node, MemoryNode::Directory) == want_dirs)
            .filter_map(|(child, _)| {
                let name = child.file_name()?.to_string_lossy().into_owned();
                Some(Entry::new(name, child.clone()))
            })
            .collect())
    }
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MemoryFileSystem {
    fn resolve_full_path(&self, path: &Path) -> io::Result<PathBuf> {
        let path = self.absolute(path);
        if self.nodes.contains_key(&path) {
            Ok(path)
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such path: {}", path.display()),
            ))
        }
    }

    fn directory_exists(&self, path: &Path) -> bool {
        matches!(
            self.nodes.get(&self.absolute(path)),
            Some(MemoryNode::Directory)
        )
    }

    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<Entry>> {
        self.list(path, true)
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<Entry>> {
        self.list(path, false)
    }

    fn lookup_metadata(&self, path: &Path, fields: MetadataFields) -> NodeMetadata {
        let path = self.absolute(path);
        let Some(node) = self.nodes.get(&path) else {
            return NodeMetadata::empty();
        };
        let ownership = self.ownership.get(&path).cloned().unwrap_or_default();

        NodeMetadata {
            size_bytes: match node {
                MemoryNode::File { len } if fields.contains(MetadataField::Size) => Some(*len),
                _ => None,
            },
            last_modified: fields
                .contains(MetadataField::Modified)
                .then(|| self.modified.get(&path).copied().unwrap_or_default()),
            permissions: ownership
                .permissions
                .filter(|_| fields.contains(MetadataField::Permissions)),
            owner: ownership
                .owner
                .filter(|_| fields.contains(MetadataField::Owner)),
            group: ownership
                .group
                .filter(|_| fields.contains(MetadataField::Group)),
        }
    }
}
