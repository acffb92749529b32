// src/transform.rs

//! Unpivot extracted records into service-event rows.

use std::collections::HashSet;

use crate::extract::fields::{ETA, ETD, PORT_OF_CALL, ROUTE_TYPE};
use crate::models::{Category, Config, ExtractedRecord, NormalizedRow, RowType, ServiceEvent};

/// Pilotage work order, the only service kept in the output.
pub const PILOTAGE_SERVICE: &str = "SPK PANDU";

/// Turns [`ExtractedRecord`]s into [`NormalizedRow`]s.
#[derive(Debug, Clone, Default)]
pub struct RowTransformer {
    authorities: HashSet<String>,
}

impl RowTransformer {
    pub fn new(authorities: impl IntoIterator<Item = String>) -> Self {
        Self {
            authorities: authorities.into_iter().collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            authorities: config.authority_set(),
        }
    }

    /// Exact, case-sensitive lookup of the verifier in the authority list.
    pub fn categorize(&self, verifier_name: &str) -> Category {
        if self.authorities.contains(verifier_name) {
            Category::Pelindo
        } else {
            Category::NonPelindo
        }
    }

    /// Rows for one record.
    ///
    /// Candidates are the arrival representative, the departure
    /// representative, then every other-role event. A candidate becomes a row
    /// only when its service label is exactly [`PILOTAGE_SERVICE`].
    pub fn rows(&self, record: &ExtractedRecord) -> Vec<NormalizedRow> {
        let arrival = record
            .arrival
            .representative
            .iter()
            .map(|event| (RowType::Arrival, event));
        let departure = record
            .departure
            .representative
            .iter()
            .map(|event| (RowType::Departure, event));
        let others = record
            .others
            .iter()
            .map(|event| (RowType::Other(event.service_label.clone()), event));

        arrival
            .chain(departure)
            .chain(others)
            .filter(|(_, event)| event.service_label == PILOTAGE_SERVICE)
            .map(|(row_type, event)| self.row(record, row_type, event))
            .collect()
    }

    fn row(
        &self,
        record: &ExtractedRecord,
        row_type: RowType,
        event: &ServiceEvent,
    ) -> NormalizedRow {
        let spk_number = if event.service_label.contains("SPK") {
            event.product_number.clone()
        } else {
            String::new()
        };
        let spk_time = if spk_number.is_empty() {
            String::new()
        } else {
            event.request_time.clone()
        };

        NormalizedRow {
            record_number: record.record_number.clone(),
            vessel_name: record.vessel_name.clone(),
            eta: record.dates.text(ETA),
            etd: record.dates.text(ETD),
            operator_name: record.header.operator_name.clone(),
            gross_tonnage: record.header.gross_tonnage.clone(),
            route_type: record.dates.text(ROUTE_TYPE),
            port_of_call: record.dates.text(PORT_OF_CALL),
            row_type,
            service_label: event.service_label.clone(),
            verifier_name: event.verifier_name.clone(),
            product_number: event.product_number.clone(),
            berth_location: event.berth_location.clone(),
            spk_number,
            spk_time,
            category: Some(self.categorize(&event.verifier_name)),
        }
    }
}
