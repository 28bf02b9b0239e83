//! Access to the local note tree.
//!
//! The core never touches the filesystem directly; it goes through the
//! [`Vault`] trait so the batch driver can be exercised against mocks.
//! [`FsVault`] is the real implementation, rooted at a local directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension that marks a note as eligible for syncing.
pub const MARKDOWN_EXTENSION: &str = "md";

/// A file in the vault. `path` is relative to the vault root and uses `/`
/// separators; `basename` is the file name without its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub path: String,
    pub basename: String,
    pub extension: String,
}

impl Note {
    /// Builds a note identity from a vault-relative path.
    pub fn from_rel_path(path: &str) -> Note {
        let file = Path::new(path);
        let basename = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());
        let extension = file
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Note {
            path: path.to_string(),
            basename,
            extension,
        }
    }

    pub fn is_markdown(&self) -> bool {
        self.extension == MARKDOWN_EXTENSION
    }
}

/// One entry of a vault folder listing. Folders are distinguished from
/// notes by carrying children (listed on demand), never by extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEntry {
    Note(Note),
    Folder { path: String },
}

/// Read access to the host note tree.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
pub trait Vault: Send + Sync {
    /// Reads the full text of the note at the vault-relative `path`.
    fn read_note(&self, path: &str) -> io::Result<String>;

    /// Lists the children of the folder at the vault-relative `path`
    /// (empty string for the root), in the order the tree reports them.
    fn list_children(&self, path: &str) -> io::Result<Vec<VaultEntry>>;
}

/// Filesystem-backed vault rooted at a local directory.
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl Vault for FsVault {
    fn read_note(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    fn list_children(&self, path: &str) -> io::Result<Vec<VaultEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let child_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}/{name}")
            };
            if entry.file_type()?.is_dir() {
                entries.push(VaultEntry::Folder { path: child_path });
            } else {
                let mut note = Note::from_rel_path(&name);
                note.path = child_path;
                entries.push(VaultEntry::Note(note));
            }
        }
        Ok(entries)
    }
}
