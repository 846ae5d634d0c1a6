//! Formatting helpers for listing cells.
use std::borrow::Cow;
use std::ffi::OsStr;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};

/// Placeholder for cells with no meaningful value (directory sizes etc.).
pub const PLACEHOLDER: &str = "&mdash;";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable size with binary units.
pub fn human_size(size: u64) -> String {
    friendly::bytes(size as f64).to_string()
}

/// Local wall-clock rendering of a timestamp.
pub fn local_time(time: SystemTime) -> String {
    let time: DateTime<Local> = time.into();
    time.format(TIME_FORMAT).to_string()
}

/// Seconds since the Unix epoch, for sort keys; pre-epoch times are negative.
pub fn epoch_secs(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(&['&', '<', '>', '"', '\''][..]) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Relative link target for an entry name; directories get a trailing slash.
///
/// The on-disk bytes are percent-encoded, so names that are not valid UTF-8
/// still link to the right file.
pub fn entry_href(name: &OsStr, is_dir: bool) -> String {
    let mut href = encode_name(name);
    if is_dir {
        href.push('/');
    }
    href
}

#[cfg(unix)]
fn encode_name(name: &OsStr) -> String {
    use std::os::unix::ffi::OsStrExt;
    urlencoding::encode_binary(name.as_bytes()).into_owned()
}

#[cfg(not(unix))]
fn encode_name(name: &OsStr) -> String {
    urlencoding::encode(&name.to_string_lossy()).into_owned()
}

#[test]
fn test_escape_plain() {
    assert!(matches!(escape_html("file.txt"), Cow::Borrowed("file.txt")));
}

#[test]
fn test_escape_markup() {
    assert_eq!(
        escape_html("<b>\"Tom\" & 'Jerry'</b>"),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
}

#[test]
fn test_href_encoding() {
    assert_eq!(entry_href(OsStr::new("my file.txt"), false), "my%20file.txt");
    assert_eq!(entry_href(OsStr::new("a&b"), true), "a%26b/");
    assert_eq!(entry_href(OsStr::new("plain-name_1.2~"), false), "plain-name_1.2~");
}

#[cfg(unix)]
#[test]
fn test_href_raw_bytes() {
    use std::os::unix::ffi::OsStrExt;
    let name = OsStr::from_bytes(b"caf\xe9.txt");
    assert_eq!(entry_href(name, false), "caf%E9.txt");
}

#[test]
fn test_epoch_secs() {
    use std::time::Duration;
    assert_eq!(epoch_secs(UNIX_EPOCH + Duration::from_secs(90)), 90);
    assert_eq!(epoch_secs(UNIX_EPOCH - Duration::from_secs(5)), -5);
}

#[test]
fn test_local_time_shape() {
    let text = local_time(SystemTime::now());
    assert_eq!(text.len(), 19);
    assert_eq!(&text[4..5], "-");
    assert_eq!(&text[13..14], ":");
}

#[test]
fn test_human_size_nonempty() {
    assert!(!human_size(0).is_empty());
    assert_ne!(human_size(1024), human_size(1024 * 1024 * 3));
}
