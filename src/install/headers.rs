//! Plugin and theme file headers.
//!
//! WordPress identifies plugins and themes by `Name: value` lines in a
//! comment near the top of the main file. Only the first 8 KiB are looked
//! at, the same window WordPress itself reads.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use regex::Regex;

/// How much of a file is searched for headers.
pub const HEADER_WINDOW: usize = 8 * 1024;

/// Read the header window of a file as text.
pub fn read_header_block(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut buf = Vec::with_capacity(HEADER_WINDOW);
    file.take(HEADER_WINDOW as u64).read_to_end(&mut buf).ok()?;
    Some(String::from_utf8_lossy(&buf).into_owned())
}

/// Extract the value of header `name` from a header block.
///
/// Matching is case-insensitive and tolerates comment decoration
/// (`*`, `#`, `//`, `@`) before the name. Empty values count as absent.
pub fn header_value(block: &str, name: &str) -> Option<String> {
    let pattern = format!(
        r"(?mi)^(?:[ \t]*<\?php)?[ \t/*#@]*{}:(.*)$",
        regex::escape(name)
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(block)?;
    let value = caps[1].trim().trim_end_matches("*/").trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Read header `name` straight from a file.
pub fn file_header(path: &Path, name: &str) -> Option<String> {
    header_value(&read_header_block(path)?, name)
}
