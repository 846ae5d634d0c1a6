use std::ffi::OsStr;
use std::path::Path;

/// Dotfiles are hidden.
pub fn is_hidden(name: &OsStr, _path: &Path) -> bool {
    name.to_string_lossy().starts_with('.')
}

#[test]
fn test_dotfile_hidden() {
    assert!(is_hidden(OsStr::new(".git"), Path::new("/x/.git")));
    assert!(!is_hidden(OsStr::new("a.txt"), Path::new("/x/a.txt")));
    assert!(!is_hidden(OsStr::new("a.b"), Path::new("/x/a.b")));
}
