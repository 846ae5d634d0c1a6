//! Enumerating directory contents.
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

use thiserror::Error;

mod dirlist;
mod options;

pub use dirlist::list_dir;
pub use options::WalkOptions;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("IO error: {0}")]
    IO(#[from] io::Error),
}

/// The kind of a directory entry, with symlinks resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    SymlinkFile,
    SymlinkDirectory,
    /// Symlink whose target does not exist or cannot be resolved.
    BrokenSymlink,
}

impl EntryKind {
    /// Whether this entry lists as a directory (symlinks by their target).
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory | EntryKind::SymlinkDirectory)
    }

    pub fn is_symlink(&self) -> bool {
        matches!(
            self,
            EntryKind::SymlinkFile | EntryKind::SymlinkDirectory | EntryKind::BrokenSymlink
        )
    }
}

/// Single entry in a directory listing.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    name: String,
    raw_name: OsString,
    path: PathBuf,
    kind: EntryKind,
    size: u64,
    modified: Option<SystemTime>,
}

impl WalkEntry {
    pub(crate) fn new(
        raw_name: OsString,
        path: PathBuf,
        kind: EntryKind,
        meta: &fs::Metadata,
    ) -> WalkEntry {
        WalkEntry {
            name: raw_name.to_string_lossy().into_owned(),
            raw_name,
            path,
            kind,
            size: if kind.is_dir() { 0 } else { meta.len() },
            modified: meta.modified().ok(),
        }
    }

    /// Display name (lossily decoded).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name exactly as stored on disk.
    pub fn raw_name(&self) -> &OsStr {
        &self.raw_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Size in bytes (of the link target for symlinks); zero for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn is_directory(&self) -> bool {
        self.kind.is_dir()
    }
}
