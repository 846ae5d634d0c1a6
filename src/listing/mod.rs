//! HTML listing documents.
//!
//! A [Listing] is the rendered description of a single directory: a fixed
//! prologue (styles, icons), a breadcrumb header, a sortable table with one
//! row per entry plus the parent row, and a footer carrying the generation
//! time. Everything except the footer is a pure function of the entries, so
//! regenerating an unchanged directory reproduces the same document.
use std::cmp::Ordering;
use std::io::{self, Write};

use chrono::{DateTime, Local};

use crate::walk::{EntryKind, WalkEntry};

mod format;

use format::{entry_href, epoch_secs, escape_html, human_size, local_time, PLACEHOLDER};

const STYLE: &str = include_str!("assets/style.css");
const ICONS: &str = include_str!("assets/icons.svg");
const SCRIPT: &str = include_str!("assets/sort.js");

/// Listing document for one directory.
#[derive(Debug, Clone)]
pub struct Listing {
    location: Vec<String>,
    entries: Vec<WalkEntry>,
}

/// Order entries for display: directories first, then case-insensitive name.
pub fn sort_entries(entries: &mut [WalkEntry]) {
    entries.sort_by(compare_entries);
}

fn compare_entries(a: &WalkEntry, b: &WalkEntry) -> Ordering {
    b.is_directory()
        .cmp(&a.is_directory())
        .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
        .then_with(|| a.name().cmp(b.name()))
}

fn icon_id(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Directory => "folder",
        EntryKind::SymlinkDirectory => "folder-shortcut",
        EntryKind::File => "file",
        EntryKind::SymlinkFile => "file-shortcut",
        EntryKind::BrokenSymlink => "file-broken",
    }
}

impl Listing {
    /// Create a listing.
    ///
    /// `location` is the path of the directory as displayed: the root's
    /// name followed by each path segment below the root.
    pub fn new(location: Vec<String>, mut entries: Vec<WalkEntry>) -> Listing {
        sort_entries(&mut entries);
        Listing { location, entries }
    }

    /// The entries, in display order.
    pub fn entries(&self) -> &[WalkEntry] {
        &self.entries
    }

    pub fn dir_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_directory()).count()
    }

    pub fn file_count(&self) -> usize {
        self.entries.len() - self.dir_count()
    }

    fn title(&self) -> String {
        format!("Index of {}", self.location.join("/"))
    }

    /// Write the HTML document.
    pub fn write_html<W: Write>(
        &self,
        out: &mut W,
        generated: &DateTime<Local>,
    ) -> io::Result<()> {
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "    <meta charset=\"utf-8\">")?;
        writeln!(out, "    <meta http-equiv=\"Pragma\" content=\"no-cache\">")?;
        writeln!(
            out,
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(out, "    <title>{}</title>", escape_html(&self.title()))?;
        write!(out, "{}", STYLE)?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        write!(out, "{}", ICONS)?;
        self.write_header(out)?;
        writeln!(out, "<main>")?;
        self.write_summary(out)?;
        self.write_table(out)?;
        writeln!(out, "</main>")?;
        writeln!(
            out,
            "<footer>Generated by dirindex on <time datetime=\"{}\">{}</time></footer>",
            generated.to_rfc3339(),
            generated.format("%Y-%m-%d %H:%M:%S")
        )?;
        write!(out, "{}", SCRIPT)?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(())
    }

    /// Render the document to a string.
    #[cfg(test)]
    pub fn render(&self, generated: &DateTime<Local>) -> String {
        let mut buf = Vec::new();
        // writing to a Vec cannot fail
        let _ = self.write_html(&mut buf, generated);
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "<header>\n    <h1>")?;
        let n = self.location.len();
        for (i, seg) in self.location.iter().enumerate() {
            if i > 0 {
                write!(out, " / ")?;
            }
            let ups = n - 1 - i;
            if ups > 0 {
                write!(out, "<a href=\"{}\">{}</a>", "../".repeat(ups), escape_html(seg))?;
            } else {
                write!(out, "{}", escape_html(seg))?;
            }
        }
        writeln!(out, "</h1>\n</header>")?;
        Ok(())
    }

    fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "<div class=\"meta\">")?;
        writeln!(out, "    <div id=\"summary\">")?;
        writeln!(
            out,
            "        <span class=\"meta-item\"><b>{}</b> directories</span>",
            self.dir_count()
        )?;
        writeln!(
            out,
            "        <span class=\"meta-item\"><b>{}</b> files</span>",
            self.file_count()
        )?;
        writeln!(
            out,
            "        <span class=\"meta-item\"><input type=\"text\" placeholder=\"filter\" id=\"filter\"></span>"
        )?;
        writeln!(out, "    </div>")?;
        writeln!(out, "</div>")?;
        Ok(())
    }

    fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "<div class=\"listing\">")?;
        writeln!(out, "<table class=\"listing\" aria-describedby=\"summary\">")?;
        writeln!(out, "<thead>")?;
        writeln!(
            out,
            "<tr><th></th><th data-sort=\"text\">Name</th><th data-sort=\"number\">Modified</th><th data-sort=\"number\">Size</th></tr>"
        )?;
        writeln!(out, "</thead>")?;
        writeln!(out, "<tbody>")?;
        writeln!(
            out,
            "<tr class=\"clickable parent\"><td><svg width=\"1.5em\" height=\"1em\" viewBox=\"0 0 24 24\"><use href=\"#go-up\"></use></svg></td><td><a href=\"../\"><span class=\"goup\">..</span></a></td><td>{p}</td><td>{p}</td></tr>",
            p = PLACEHOLDER
        )?;
        for entry in &self.entries {
            write_row(out, entry)?;
        }
        writeln!(out, "</tbody>")?;
        writeln!(out, "</table>")?;
        writeln!(out, "</div>")?;
        Ok(())
    }
}

fn write_row<W: Write>(out: &mut W, entry: &WalkEntry) -> io::Result<()> {
    let kind = entry.kind();
    let class = if kind == EntryKind::BrokenSymlink {
        "clickable broken"
    } else if kind.is_symlink() {
        "clickable symlink"
    } else {
        "clickable"
    };
    let name = escape_html(entry.name());
    let sort_name = format!(
        "{}{}",
        if entry.is_directory() { 0 } else { 1 },
        entry.name().to_lowercase()
    );
    write!(out, "<tr class=\"{}\">", class)?;
    write!(
        out,
        "<td><svg width=\"1.5em\" height=\"1em\" viewBox=\"0 0 317 310\"><use href=\"#{}\"></use></svg></td>",
        icon_id(kind)
    )?;
    write!(
        out,
        "<td data-value=\"{}\"><a href=\"{}\"><span class=\"name\">{}</span></a></td>",
        escape_html(&sort_name),
        entry_href(entry.raw_name(), entry.is_directory()),
        name
    )?;
    match entry.modified() {
        Some(t) => write!(out, "<td data-value=\"{}\">{}</td>", epoch_secs(t), local_time(t))?,
        None => write!(out, "<td data-value=\"0\">{}</td>", PLACEHOLDER)?,
    }
    if entry.is_directory() || kind == EntryKind::BrokenSymlink {
        write!(out, "<td data-value=\"-1\">{}</td>", PLACEHOLDER)?;
    } else {
        write!(
            out,
            "<td data-value=\"{}\">{}</td>",
            entry.size(),
            human_size(entry.size())
        )?;
    }
    writeln!(out, "</tr>")?;
    Ok(())
}
