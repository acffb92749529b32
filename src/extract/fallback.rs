// src/extract/fallback.rs

//! Best-effort scans over the piped full text (`a | b | c`) for fields the
//! tables did not provide. Values that cannot be found stay empty.

use crate::extract::fields::{ETA, ETD};
use crate::models::FieldGroup;

const DATE_WINDOW: usize = 80;
const STATUS_WINDOW: usize = 200;
const ROLE_STATUS_WINDOW: usize = 100;

pub const STATUS_MARKER: &str = "STATUS PELAYANAN";
pub const ARRIVAL_TOKEN: &str = "KEDATANGAN";
pub const DEPARTURE_TOKEN: &str = "KEBERANGKATAN";

/// Up to `chars` characters of `text` starting at byte `start`.
fn window(text: &str, start: usize, chars: usize) -> &str {
    let tail = &text[start..];
    let end = tail
        .char_indices()
        .nth(chars)
        .map_or(tail.len(), |(idx, _)| idx);
    &tail[..end]
}

/// Text following `token` within a window, up to the next `|`.
fn value_after(text: &str, token: &str, chars: usize) -> Option<String> {
    let start = text.find(token)?;
    let snippet = window(text, start, chars);
    let after = snippet.get(token.len()..).unwrap_or_default();
    let after = after.trim_start_matches([' ', ':', '|', '-']);
    Some(after.split('|').next().unwrap_or_default().trim().to_string())
}

/// Fill ETA/ETD from the full text when the tables did not supply them.
pub fn fill_dates(dates: &mut FieldGroup, piped_text: &str) {
    for token in [ETA, ETD] {
        if dates.contains_key(token) {
            continue;
        }
        if let Some(value) = value_after(piped_text, token, DATE_WINDOW) {
            dates.insert(token, value);
        }
    }
}

/// Fill empty arrival/departure statuses from the full text.
///
/// The `STATUS PELAYANAN` marker (any case) is followed by both statuses as
/// whitespace-separated words; the role tokens are tried afterwards for
/// whatever is still empty.
pub fn fill_statuses(arrival: &mut String, departure: &mut String, piped_text: &str) {
    if !arrival.is_empty() && !departure.is_empty() {
        return;
    }

    if let Some(start) = piped_text.to_ascii_uppercase().find(STATUS_MARKER) {
        let snippet = window(piped_text, start, STATUS_WINDOW);
        let after = snippet
            .get(STATUS_MARKER.len()..)
            .unwrap_or_default()
            .trim_start_matches([' ', ':', '|', '-']);
        let words: Vec<&str> = after
            .split('|')
            .next()
            .unwrap_or_default()
            .split_whitespace()
            .collect();
        if let [first, second, ..] = words.as_slice() {
            if arrival.is_empty() {
                *arrival = first.to_string();
            }
            if departure.is_empty() {
                *departure = second.to_string();
            }
        }
    }

    for (token, status) in [(ARRIVAL_TOKEN, arrival), (DEPARTURE_TOKEN, departure)] {
        if status.is_empty() {
            if let Some(value) = value_after(piped_text, token, ROLE_STATUS_WINDOW) {
                *status = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_counts_characters() {
        assert_eq!(window("abcdef", 2, 3), "cde");
        assert_eq!(window("abc", 0, 10), "abc");
        assert_eq!(window("ééé", 0, 2), "éé");
    }

    #[test]
    fn test_dates_from_text() {
        let mut dates = FieldGroup::new();
        fill_dates(
            &mut dates,
            "Detail | ETA | : 01-02-2025 08:00 | ETD : 03-02-2025 | Singgah",
        );
        assert_eq!(dates.get(ETA), Some("01-02-2025 08:00"));
        assert_eq!(dates.get(ETD), Some("03-02-2025"));
    }

    #[test]
    fn test_dates_present_are_kept() {
        let mut dates: FieldGroup = [(ETA, "tabled")].into_iter().collect();
        fill_dates(&mut dates, "ETA | other");
        assert_eq!(dates.get(ETA), Some("tabled"));
        assert!(dates.get(ETD).is_none());
    }

    #[test]
    fn test_statuses_from_marker() {
        let mut arrival = String::new();
        let mut departure = String::new();
        fill_statuses(
            &mut arrival,
            &mut departure,
            "Info | Status Pelayanan | : SELESAI PROSES | lain",
        );
        assert_eq!(arrival, "SELESAI");
        assert_eq!(departure, "PROSES");
    }

    #[test]
    fn test_statuses_from_role_tokens() {
        let mut arrival = "DISETUJUI".to_string();
        let mut departure = String::new();
        fill_statuses(
            &mut arrival,
            &mut departure,
            "KEDATANGAN | X | KEBERANGKATAN : MENUNGGU | Y",
        );
        assert_eq!(arrival, "DISETUJUI");
        assert_eq!(departure, "MENUNGGU");
    }

    #[test]
    fn test_statuses_stay_empty_without_markers() {
        let mut arrival = String::new();
        let mut departure = String::new();
        fill_statuses(&mut arrival, &mut departure, "nothing here");
        assert!(arrival.is_empty() && departure.is_empty());
    }
}
