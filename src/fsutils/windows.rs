use std::ffi::OsStr;
use std::fs;
use std::os::windows::fs::MetadataExt;
use std::path::Path;
use winapi::um::winnt::FILE_ATTRIBUTE_HIDDEN;

/// Dotfiles and files carrying the hidden attribute are hidden.
pub fn is_hidden(name: &OsStr, path: &Path) -> bool {
    if name.to_string_lossy().starts_with('.') {
        return true;
    }
    match fs::symlink_metadata(path) {
        Ok(meta) => meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0,
        Err(_) => false,
    }
}
