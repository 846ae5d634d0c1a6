//! Single-level directory enumeration with [ignore].
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use log::*;

use crate::fsutil::{is_hidden, stat};
use crate::walk::{EntryKind, WalkEntry, WalkError, WalkOptions};

/// List the direct children of a directory.
///
/// Hidden entries are dropped unless the options include them. Entries are
/// returned in file-system order; callers sort them. Failing to read the
/// directory itself is an error, but a child that cannot be examined is
/// logged and left out.
pub fn list_dir<P: AsRef<Path>>(
    dir: P,
    options: &WalkOptions,
) -> Result<Vec<WalkEntry>, WalkError> {
    let dir = dir.as_ref();
    // the directory itself must be readable; individual children may not be
    fs::read_dir(dir)?;

    let mut wb = WalkBuilder::new(dir);
    // we do our own hidden-file handling, and ignore files are not relevant to listings
    wb.standard_filters(false);
    wb.follow_links(false);
    wb.max_depth(Some(1));

    let mut entries = Vec::new();
    for e in wb.build() {
        let e = match e {
            Ok(e) => e,
            Err(err) => {
                warn!("{}: skipping unreadable entry: {}", dir.display(), err);
                continue;
            }
        };
        if e.depth() == 0 {
            continue;
        }
        let name = e.file_name();
        if !options.include_hidden && is_hidden(name, e.path()) {
            trace!("{}: skipping hidden entry", e.path().display());
            continue;
        }
        push_entry(&mut entries, name.to_os_string(), e.path().to_path_buf());
    }

    Ok(entries)
}

/// Examine one child and add it to the list, skipping it if it cannot be examined.
fn push_entry(entries: &mut Vec<WalkEntry>, name: OsString, path: PathBuf) {
    match examine(name, path.clone()) {
        Ok(entry) => entries.push(entry),
        Err(err) => warn!("{}: skipping entry: {}", path.display(), err),
    }
}

fn examine(name: OsString, path: PathBuf) -> io::Result<WalkEntry> {
    let lmeta = fs::symlink_metadata(&path)?;

    let entry = if lmeta.file_type().is_symlink() {
        match stat(&path) {
            Ok(Some(tmeta)) if tmeta.is_dir() => {
                WalkEntry::new(name, path, EntryKind::SymlinkDirectory, &tmeta)
            }
            Ok(Some(tmeta)) => WalkEntry::new(name, path, EntryKind::SymlinkFile, &tmeta),
            Ok(None) => {
                debug!("{}: dangling symlink", path.display());
                WalkEntry::new(name, path, EntryKind::BrokenSymlink, &lmeta)
            }
            Err(err) => {
                warn!("{}: cannot resolve symlink: {}", path.display(), err);
                WalkEntry::new(name, path, EntryKind::BrokenSymlink, &lmeta)
            }
        }
    } else if lmeta.is_dir() {
        WalkEntry::new(name, path, EntryKind::Directory, &lmeta)
    } else {
        WalkEntry::new(name, path, EntryKind::File, &lmeta)
    };
    Ok(entry)
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn names(entries: &[WalkEntry]) -> Vec<String> {
        let mut names: Vec<String> = entries.iter().map(|e| e.name().to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_list_direct_children() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("a.txt"), "hello").expect("write");
        fs::create_dir(dir.path().join("sub")).expect("mkdir");
        fs::write(dir.path().join("sub").join("deep.txt"), "x").expect("write");

        let entries = list_dir(dir.path(), &WalkOptions::default()).expect("list");
        assert_eq!(names(&entries), vec!["a.txt", "sub"]);

        let file = entries.iter().find(|e| e.name() == "a.txt").unwrap();
        assert_eq!(file.kind(), EntryKind::File);
        assert_eq!(file.size(), 5);
        assert!(file.modified().is_some());

        let sub = entries.iter().find(|e| e.name() == "sub").unwrap();
        assert_eq!(sub.kind(), EntryKind::Directory);
        assert_eq!(sub.size(), 0);
    }

    #[test]
    fn test_hidden_entries() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join(".secret"), "").expect("write");
        fs::create_dir(dir.path().join(".git")).expect("mkdir");
        fs::write(dir.path().join("shown"), "").expect("write");

        let entries = list_dir(dir.path(), &WalkOptions::default()).expect("list");
        assert_eq!(names(&entries), vec!["shown"]);

        let opts = WalkOptions {
            include_hidden: true,
            ..WalkOptions::default()
        };
        let entries = list_dir(dir.path(), &opts).expect("list");
        assert_eq!(names(&entries), vec![".git", ".secret", "shown"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().expect("tempdir");
        let res = list_dir(dir.path().join("missing"), &WalkOptions::default());
        assert!(res.is_err());
    }

    #[test]
    fn test_vanished_entry_skipped() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("kept"), "").expect("write");
        let mut entries = list_dir(dir.path(), &WalkOptions::default()).expect("list");

        // an entry that disappeared between enumeration and stat
        let gone = dir.path().join("gone");
        push_entry(&mut entries, OsString::from("gone"), gone);
        assert_eq!(names(&entries), vec!["kept"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_kept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().expect("tempdir");
        let raw = OsStr::from_bytes(b"caf\xe9.txt");
        fs::write(dir.path().join(raw), "").expect("write");

        let entries = list_dir(dir.path(), &WalkOptions::default()).expect("list");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].raw_name(), raw);
        assert_eq!(entries[0].name(), "caf\u{fffd}.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_kinds() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("target.txt"), "0123456789").expect("write");
        fs::create_dir(dir.path().join("tdir")).expect("mkdir");
        symlink(dir.path().join("target.txt"), dir.path().join("flink")).expect("symlink");
        symlink(dir.path().join("tdir"), dir.path().join("dlink")).expect("symlink");
        symlink(dir.path().join("gone"), dir.path().join("broken")).expect("symlink");

        let entries = list_dir(dir.path(), &WalkOptions::default()).expect("list");
        let kind = |n: &str| entries.iter().find(|e| e.name() == n).unwrap().kind();
        assert_eq!(kind("flink"), EntryKind::SymlinkFile);
        assert_eq!(kind("dlink"), EntryKind::SymlinkDirectory);
        assert_eq!(kind("broken"), EntryKind::BrokenSymlink);

        let flink = entries.iter().find(|e| e.name() == "flink").unwrap();
        assert_eq!(flink.size(), 10);
    }
}
