// src/extract/services.rs

//! Service-event tables ("Layanan").

use crate::extract::document::Table;
use crate::extract::table::table_to_group;
use crate::models::{RoleSummary, ServiceEvent, ServiceRole};

/// Column label marking a service table.
pub const SERVICE_KEY: &str = "Layanan";

/// Joiner for a role's statuses.
const STATUS_JOINER: &str = "; ";

/// Service events of one document, split by role in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleEvents {
    pub arrival: Vec<ServiceEvent>,
    pub departure: Vec<ServiceEvent>,
    pub other: Vec<ServiceEvent>,
}

impl RoleEvents {
    fn push(&mut self, event: ServiceEvent) {
        match event.role() {
            ServiceRole::Arrival => self.arrival.push(event),
            ServiceRole::Departure => self.departure.push(event),
            ServiceRole::Other => self.other.push(event),
        }
    }
}

/// Whether a table plausibly lists service events.
pub fn is_service_table(table: &Table) -> bool {
    table_to_group(table).contains_key(SERVICE_KEY)
        || table.rows.iter().any(|row| row.text.contains(SERVICE_KEY))
}

/// Collect events from every service table after the first table.
///
/// The first row of each service table is its header. Rows with fewer than
/// five cells are skipped.
pub fn collect_events(tables: &[Table]) -> RoleEvents {
    let mut events = RoleEvents::default();

    for table in tables.iter().skip(1).filter(|t| is_service_table(t)) {
        table
            .rows
            .iter()
            .skip(1)
            .filter_map(|row| ServiceEvent::from_cells(&row.cells))
            .for_each(|event| events.push(event));
    }

    events
}

/// Joined statuses plus the first event as the role's representative.
pub fn summarize(events: &[ServiceEvent]) -> RoleSummary {
    RoleSummary {
        status: events
            .iter()
            .map(|e| e.status.as_str())
            .collect::<Vec<_>>()
            .join(STATUS_JOINER),
        representative: events.first().cloned(),
    }
}
