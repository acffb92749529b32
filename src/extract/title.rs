// src/extract/title.rs

//! Record title: the PKK number and the vessel name.

use crate::extract::document::Document;

/// Substring every record number carries.
pub const RECORD_MARKER: &str = "PKK.";

/// Characters of full text kept after the marker in the fallback search.
const TITLE_WINDOW: usize = 120;

/// Find the record title.
///
/// Headings are tried first. Failing that, the first line of a bounded
/// window starting at the marker in the full text is used.
pub fn extract_title(doc: &Document) -> Option<String> {
    if let Some(heading) = doc
        .headings
        .iter()
        .find(|h| !h.is_empty() && h.contains(RECORD_MARKER))
    {
        return Some(heading.clone());
    }

    let start = doc.text.find(RECORD_MARKER)?;
    let window: String = doc.text[start..].chars().take(TITLE_WINDOW).collect();
    window.lines().next().map(str::to_string)
}

/// Split `"<record number> - <vessel name>"` on the first separator.
pub fn split_title(title: &str) -> (String, String) {
    match title.split_once(" - ") {
        Some((number, vessel)) => (number.to_string(), vessel.to_string()),
        None => (title.to_string(), String::new()),
    }
}
