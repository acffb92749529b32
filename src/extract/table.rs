// src/extract/table.rs

//! Key/value tables.

use crate::extract::document::Table;
use crate::models::FieldGroup;

/// Convert a layout table into a [`FieldGroup`].
///
/// Each row is scanned for `key, ":", value` triples (an empty middle cell
/// counts as the colon). A row of exactly two cells is read as `key, value`.
/// Later occurrences of a key overwrite earlier ones.
pub fn table_to_group(table: &Table) -> FieldGroup {
    let mut group = FieldGroup::new();

    for row in &table.rows {
        let cells = &row.cells;

        let mut i = 0;
        while i + 2 < cells.len() {
            let separator = cells[i + 1].trim();
            if separator == ":" || separator.is_empty() {
                let key = clean_key(&cells[i]);
                if !key.is_empty() {
                    group.insert(key, cells[i + 2].trim());
                }
                i += 3;
            } else {
                i += 1;
            }
        }

        if let [key, value] = cells.as_slice() {
            let key = clean_key(key);
            if !key.is_empty() {
                group.insert(key, value.as_str());
            }
        }
    }

    group
}

fn clean_key(raw: &str) -> &str {
    raw.trim_matches(|c| c == ':' || c == ' ')
}
