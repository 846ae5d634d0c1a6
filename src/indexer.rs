//! Write listings for a directory tree.
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use globset::{Glob, GlobMatcher};
use log::*;
use thiserror::Error;

use crate::listing::{sort_entries, Listing};
use crate::options::IndexOptions;
use crate::stack::Stack;
use crate::walk::{list_dir, EntryKind, WalkEntry, WalkError};

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] globset::Error),
    #[error("cannot read directory {}: {source}", .dir.display())]
    Walk {
        dir: PathBuf,
        #[source]
        source: WalkError,
    },
    #[error("cannot create file {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
        /// Subdirectories found before the listing failed.
        subdirs: Vec<PathBuf>,
    },
    #[error("cannot write file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
        subdirs: Vec<PathBuf>,
    },
}

impl IndexError {
    /// Subdirectories that can still be visited after this failure.
    pub fn into_subdirs(self) -> Vec<PathBuf> {
        match self {
            IndexError::Create { subdirs, .. } | IndexError::Write { subdirs, .. } => subdirs,
            _ => Vec::new(),
        }
    }
}

/// Result of scanning one directory.
#[derive(Debug)]
struct DirScan {
    dir: PathBuf,
    /// Entries to display.
    shown: Vec<WalkEntry>,
    /// Subdirectories eligible for traversal, in display order.
    subdirs: Vec<PathBuf>,
}

/// Result of indexing one directory.
#[derive(Debug)]
pub struct ListingSummary {
    pub output: PathBuf,
    pub entries: usize,
    pub subdirs: Vec<PathBuf>,
}

/// Result of indexing a tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub indexed: usize,
    pub failed: usize,
}

/// Directory indexer.
pub struct Indexer {
    root: PathBuf,
    options: IndexOptions,
    filter: GlobMatcher,
}

impl Indexer {
    /// Create an indexer for a tree, compiling the name filter.
    pub fn new<P: AsRef<Path>>(root: P, options: IndexOptions) -> Result<Indexer, IndexError> {
        let filter = Glob::new(&options.filter)?.compile_matcher();
        Ok(Indexer {
            root: root.as_ref().to_path_buf(),
            options,
            filter,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write the listing for a single directory.
    ///
    /// If the directory was read but its listing could not be written, the
    /// error still carries the subdirectories found.
    pub fn process_dir(&self, dir: &Path) -> Result<ListingSummary, IndexError> {
        let scan = self.scan_dir(dir)?;
        let entries = scan.shown.len();
        match self.write_listing(&scan) {
            Ok(output) => Ok(ListingSummary {
                output,
                entries,
                subdirs: scan.subdirs,
            }),
            Err(mut e) => {
                if let IndexError::Create { subdirs, .. } | IndexError::Write { subdirs, .. } =
                    &mut e
                {
                    *subdirs = scan.subdirs;
                }
                Err(e)
            }
        }
    }

    /// Index the whole tree, visiting subdirectories if the options are recursive.
    ///
    /// Directories whose listing cannot be produced are logged and counted,
    /// and the walk carries on with the rest of the tree. Each directory is
    /// visited at most once, so symlink cycles terminate.
    pub fn run(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        let mut pending = Stack::new();
        let mut visited = HashSet::new();
        pending.push(self.root.clone());

        while !pending.is_empty() {
            let Some(dir) = pending.pop() else { break };
            trace!("{}: visiting ({} pending)", dir.display(), pending.len());
            let real = fs::canonicalize(&dir).unwrap_or_else(|_| dir.clone());
            if !visited.insert(real) {
                debug!("{}: already visited, skipping", dir.display());
                continue;
            }

            let subdirs = match self.process_dir(&dir) {
                Ok(listing) => {
                    debug!(
                        "{}: listed {} entries",
                        listing.output.display(),
                        listing.entries
                    );
                    summary.indexed += 1;
                    listing.subdirs
                }
                Err(e) => {
                    error!("{}", e);
                    summary.failed += 1;
                    e.into_subdirs()
                }
            };

            if self.options.recursive {
                // reversed so the stack pops them in display order
                pending.extend(subdirs.into_iter().rev());
            }
        }

        info!(
            "{}: indexed {} directories, {} failed",
            self.root.display(),
            summary.indexed,
            summary.failed
        );
        summary
    }

    fn scan_dir(&self, dir: &Path) -> Result<DirScan, IndexError> {
        if self.options.verbose {
            println!("Traversing dir {}", dir.display());
        }
        let entries = list_dir(dir, &self.options.walk).map_err(|source| IndexError::Walk {
            dir: dir.to_path_buf(),
            source,
        })?;
        debug!("{}: found {} entries", dir.display(), entries.len());

        let mut shown = Vec::new();
        let mut subdirs = Vec::new();
        for entry in entries {
            if entry.name() == self.options.output_file {
                continue;
            }
            if self.should_descend(&entry) {
                subdirs.push(entry.clone());
            }
            if self.filter.is_match(entry.name()) {
                shown.push(entry);
            } else {
                trace!("{}: filtered out", entry.path().display());
            }
        }
        sort_entries(&mut subdirs);

        Ok(DirScan {
            dir: dir.to_path_buf(),
            shown,
            subdirs: subdirs.into_iter().map(|e| e.path().to_path_buf()).collect(),
        })
    }

    fn should_descend(&self, entry: &WalkEntry) -> bool {
        match entry.kind() {
            EntryKind::Directory => true,
            EntryKind::SymlinkDirectory => !self.options.walk.no_follow,
            _ => false,
        }
    }

    fn write_listing(&self, scan: &DirScan) -> Result<PathBuf, IndexError> {
        let listing = Listing::new(self.location(&scan.dir), scan.shown.clone());
        let path = scan.dir.join(&self.options.output_file);

        let file = File::create(&path).map_err(|source| IndexError::Create {
            path: path.clone(),
            source,
            subdirs: Vec::new(),
        })?;
        let mut out = BufWriter::new(file);
        listing
            .write_html(&mut out, &Local::now())
            .and_then(|_| out.flush())
            .map_err(|source| IndexError::Write {
                path: path.clone(),
                source,
                subdirs: Vec::new(),
            })?;

        debug!(
            "{}: wrote {} entries ({} directories, {} files)",
            path.display(),
            listing.entries().len(),
            listing.dir_count(),
            listing.file_count()
        );
        Ok(path)
    }

    /// Display location of a directory: root name, then segments below the root.
    fn location(&self, dir: &Path) -> Vec<String> {
        let mut loc = vec![display_name(&self.root)];
        match dir.strip_prefix(&self.root) {
            Ok(rel) => {
                for seg in rel.iter() {
                    loc.push(seg.to_string_lossy().into_owned());
                }
            }
            Err(_) => {
                loc = vec![display_name(dir)];
            }
        }
        loc
    }
}

fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}
