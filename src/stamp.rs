//! Version stamps embedded in downloaded files.
//!
//! A stamped file begins with a marker line holding the version id, then a
//! blank line, then the payload. Files without the marker are treated as
//! unversioned rather than invalid, so hand-edited or legacy files keep
//! working.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const STAMP_MARKER: &str = "#build:";

/// Reads the version id from the first line of `path`.
///
/// Returns `None` when the file is missing, unreadable, or its first line
/// does not carry the marker.
#[must_use]
pub fn read_stamp(path: &Path) -> Option<i64> {
    let file = fs::File::open(path).ok()?;
    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line).ok()?;
    first_line
        .trim_end_matches(['\r', '\n'])
        .trim_start_matches('\u{feff}')
        .strip_prefix(STAMP_MARKER)?
        .trim()
        .parse()
        .ok()
}

/// Writes `payload` to `path`, prefixed with a stamp header when `stamp` is
/// set.
///
/// The content lands in a temporary sibling first and is renamed into place,
/// so a crash mid-write never leaves a truncated file behind.
pub fn write_stamped(path: &Path, stamp: Option<i64>, payload: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = match stamp {
        Some(id) => format!("{STAMP_MARKER}{id}\n\n{payload}"),
        None => payload.to_owned(),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("destination has no file name"))?;
    let mut tmp_name = file_name.to_owned();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)
}
