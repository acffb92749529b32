// src/extract/fields.rs

//! Header-info and dates groups.

use crate::extract::document::Table;
use crate::extract::table::table_to_group;
use crate::models::{FieldGroup, VesselHeader};

pub const OPERATOR_NAME: &str = "Nama Perusahaan";
pub const FLAG_CALL_SIGN_IMO: &str = "Bendera / Call Sign / IMO";
pub const GROSS_DEADWEIGHT: &str = "GT / DWT";
pub const DRAFT_FORE_AFT_MAX: &str = "Draft Depan / Belakang / Max";
pub const LENGTH_BREADTH: &str = "Panjang / Lebar";

pub const ETA: &str = "ETA";
pub const ETD: &str = "ETD";
pub const ROUTE_TYPE: &str = "Jenis Trayek";
pub const PORT_OF_CALL: &str = "Singgah";

/// Separator inside compound header values.
const COMPOUND_SEPARATOR: &str = " / ";

/// Slot `index` of a compound value such as `"IDN / ABC1234 / 9123456"`.
pub fn compound_slot(value: &str, index: usize) -> String {
    value
        .split(COMPOUND_SEPARATOR)
        .nth(index)
        .map(|part| part.trim().to_string())
        .unwrap_or_default()
}

/// Keep the header particulars used downstream; the other compound slots
/// (call sign, IMO, deadweight, fore/aft draft, length) are dropped.
pub fn vessel_header(ship_info: &FieldGroup) -> VesselHeader {
    VesselHeader {
        operator_name: ship_info.text(OPERATOR_NAME),
        flag: compound_slot(&ship_info.text(FLAG_CALL_SIGN_IMO), 0),
        gross_tonnage: compound_slot(&ship_info.text(GROSS_DEADWEIGHT), 0),
        max_draft: compound_slot(&ship_info.text(DRAFT_FORE_AFT_MAX), 2),
        breadth: compound_slot(&ship_info.text(LENGTH_BREADTH), 1),
    }
}

/// Build the dates group from the second table.
///
/// ETA/ETD are located by key (case-insensitive substring), then by value.
/// Every other key of the table is carried over as is.
pub fn dates_group(table: &Table) -> FieldGroup {
    let second = table_to_group(table);
    let mut dates = FieldGroup::new();

    for (key, value) in second.iter() {
        let key = key.to_uppercase();
        if key.contains(ETA) {
            dates.insert(ETA, value);
        }
        if key.contains(ETD) {
            dates.insert(ETD, value);
        }
    }

    for token in [ETA, ETD] {
        if dates.contains_key(token) {
            continue;
        }
        if let Some((_, value)) = second
            .iter()
            .find(|(_, value)| value.to_uppercase().contains(token))
        {
            dates.insert(token, value);
        }
    }

    for (key, value) in second.iter() {
        if key != ETA && key != ETD {
            dates.insert(key, value);
        }
    }

    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_slots() {
        assert_eq!(compound_slot("IDN / ABC1234 / 9123456", 0), "IDN");
        assert_eq!(compound_slot("12345 / 6789", 0), "12345");
        assert_eq!(compound_slot("12345 / 6789", 1), "6789");
        assert_eq!(compound_slot("12345", 1), "");
        assert_eq!(compound_slot("", 0), "");
    }

    #[test]
    fn test_vessel_header_keeps_selected_slots() {
        let ship_info: FieldGroup = [
            (OPERATOR_NAME, "PT ACME"),
            (FLAG_CALL_SIGN_IMO, "IDN / ABC1234 / 9123456"),
            (GROSS_DEADWEIGHT, "12345 / 6789"),
            (DRAFT_FORE_AFT_MAX, "5.1 / 5.3 / 6.0"),
            (LENGTH_BREADTH, "120 / 22"),
        ]
        .into_iter()
        .collect();

        let header = vessel_header(&ship_info);
        assert_eq!(header.operator_name, "PT ACME");
        assert_eq!(header.flag, "IDN");
        assert_eq!(header.gross_tonnage, "12345");
        assert_eq!(header.max_draft, "6.0");
        assert_eq!(header.breadth, "22");
    }

    #[test]
    fn test_vessel_header_missing_fields_are_empty() {
        let header = vessel_header(&FieldGroup::new());
        assert_eq!(header, VesselHeader::default());
    }

    #[test]
    fn test_dates_by_key() {
        let table = Table::from_rows([
            vec!["Tanggal ETA", ":", "01-02-2025 08:00"],
            vec!["Tanggal ETD", ":", "03-02-2025 17:00"],
            vec!["Jenis Trayek", ":", "Tetap"],
        ]);

        let dates = dates_group(&table);
        assert_eq!(dates.get(ETA), Some("01-02-2025 08:00"));
        assert_eq!(dates.get(ETD), Some("03-02-2025 17:00"));
        assert_eq!(dates.get(ROUTE_TYPE), Some("Tetap"));
        assert_eq!(dates.get("Tanggal ETA"), Some("01-02-2025 08:00"));
    }

    #[test]
    fn test_dates_by_value_when_key_misses() {
        let table = Table::from_rows([
            vec!["Waktu", ":", "ETA 01-02-2025"],
            vec!["Singgah", ":", "Merak"],
        ]);

        let dates = dates_group(&table);
        assert_eq!(dates.get(ETA), Some("ETA 01-02-2025"));
        assert!(dates.get(ETD).is_none());
        assert_eq!(dates.get(PORT_OF_CALL), Some("Merak"));
    }
}
