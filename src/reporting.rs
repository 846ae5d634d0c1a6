//! Error reporting.

use std::{fmt::Display, path::Path};

pub use anyhow::{anyhow, Result};

pub trait ResultNote<R> {
    fn with_path_action<P: AsRef<Path>>(self, action: &str, path: P) -> Result<R>;
}

impl<R, E> ResultNote<R> for std::result::Result<R, E>
where
    E: Into<anyhow::Error> + Display,
{
    fn with_path_action<P: AsRef<Path>>(self, action: &str, path: P) -> Result<R> {
        self.map_err(|e| anyhow!("{} {}: {}", action, path.as_ref().display(), e))
    }
}

#[test]
fn test_path_action_message() {
    let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "no such thing",
    ));
    let err = res.with_path_action("cannot index", "/tmp/missing").unwrap_err();
    assert_eq!(err.to_string(), "cannot index /tmp/missing: no such thing");
}
