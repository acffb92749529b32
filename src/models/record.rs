// src/models/record.rs

//! Typed field groups extracted from one PKK detail document.

use serde::{Deserialize, Serialize};

/// Ordered label → text mapping for one section of a detail document.
///
/// Keys are unique. Inserting an existing key replaces its value in place,
/// so the last occurrence wins while the first position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    entries: Vec<(String, String)>,
}

impl FieldGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Field value, or the empty string when absent.
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldGroup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut group = FieldGroup::new();
        for (k, v) in iter {
            group.insert(k, v);
        }
        group
    }
}

/// Role of a service event within a clearance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceRole {
    Arrival,
    Departure,
    Other,
}

impl ServiceRole {
    const ARRIVAL_SERVICES: [&'static str; 4] = ["RPKRO", "PPK", "PKK", "SPM"];
    const DEPARTURE_SERVICES: [&'static str; 3] = ["SPOG", "SPB", "SPK PANDU"];

    /// Classify a service label by exact membership in the fixed code sets.
    pub fn classify(service_label: &str) -> Self {
        if Self::ARRIVAL_SERVICES.contains(&service_label) {
            ServiceRole::Arrival
        } else if Self::DEPARTURE_SERVICES.contains(&service_label) {
            ServiceRole::Departure
        } else {
            ServiceRole::Other
        }
    }
}

/// One row of a service table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEvent {
    pub service_label: String,
    pub request_time: String,
    pub approval_time: String,
    pub process_state: String,
    pub status: String,
    pub verifier_name: String,
    pub product_number: String,
    pub berth_location: String,
    pub integration_status: String,
}

impl ServiceEvent {
    /// Build an event from a row's cell texts. Rows with fewer than five
    /// cells do not describe an event.
    pub fn from_cells(cells: &[String]) -> Option<Self> {
        if cells.len() < 5 {
            return None;
        }
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Some(Self {
            service_label: cell(0),
            request_time: cell(1),
            approval_time: cell(2),
            process_state: cell(3),
            status: cell(4),
            verifier_name: cell(5),
            product_number: cell(6),
            berth_location: cell(7),
            integration_status: cell(8),
        })
    }

    pub fn role(&self) -> ServiceRole {
        ServiceRole::classify(&self.service_label)
    }
}

/// Status digest for the arrival or departure role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSummary {
    /// Statuses of every event of this role joined with `"; "`
    pub status: String,
    /// First event of this role, standing in for the whole role
    pub representative: Option<ServiceEvent>,
}

/// Vessel particulars retained from the header-info table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VesselHeader {
    pub operator_name: String,
    pub flag: String,
    pub gross_tonnage: String,
    pub max_draft: String,
    pub breadth: String,
}

/// Everything extracted from one detail document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub record_number: String,
    pub vessel_name: String,
    pub header: VesselHeader,
    /// Raw header-info group (first table)
    pub ship_info: FieldGroup,
    /// ETA/ETD plus every other second-table field
    pub dates: FieldGroup,
    pub arrival: RoleSummary,
    pub departure: RoleSummary,
    /// Events of the other role, each surfaced individually
    pub others: Vec<ServiceEvent>,
}
