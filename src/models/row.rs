// src/models/row.rs

//! Normalized output rows.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which service event a row was unpivoted from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowType {
    Arrival,
    Departure,
    /// Service label of an event outside the arrival/departure sets
    Other(String),
}

impl RowType {
    pub fn label(&self) -> &str {
        match self {
            RowType::Arrival => "Kedatangan",
            RowType::Departure => "Keberangkatan",
            RowType::Other(label) => label,
        }
    }
}

impl fmt::Display for RowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RowType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RowType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(match label.as_str() {
            "Kedatangan" => RowType::Arrival,
            "Keberangkatan" => RowType::Departure,
            _ => RowType::Other(label),
        })
    }
}

/// Whether a pilotage order was verified by the state port authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "PELINDO")]
    Pelindo,
    #[serde(rename = "NON-PELINDO")]
    NonPelindo,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Pelindo => f.write_str("PELINDO"),
            Category::NonPelindo => f.write_str("NON-PELINDO"),
        }
    }
}

/// One service event of one vessel, joined with the vessel's common fields.
///
/// Field order is the column order handed to writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    #[serde(rename = "No PKK")]
    pub record_number: String,
    #[serde(rename = "Nama Kapal")]
    pub vessel_name: String,
    #[serde(rename = "ETA")]
    pub eta: String,
    #[serde(rename = "ETD")]
    pub etd: String,
    #[serde(rename = "Nama Perusahaan")]
    pub operator_name: String,
    #[serde(rename = "GT")]
    pub gross_tonnage: String,
    #[serde(rename = "Jenis Trayek")]
    pub route_type: String,
    #[serde(rename = "Singgah")]
    pub port_of_call: String,
    #[serde(rename = "Tipe")]
    pub row_type: RowType,
    #[serde(rename = "Layanan")]
    pub service_label: String,
    #[serde(rename = "Verifikator")]
    pub verifier_name: String,
    #[serde(rename = "Nomor Produk")]
    pub product_number: String,
    #[serde(rename = "Lokasi Sandar")]
    pub berth_location: String,
    #[serde(rename = "Nomor SPK")]
    pub spk_number: String,
    #[serde(rename = "Waktu SPK")]
    pub spk_time: String,
    #[serde(
        rename = "Kategori SPK",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Category>,
}
