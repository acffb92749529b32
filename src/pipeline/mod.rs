// src/pipeline/mod.rs

//! Pipeline entry points for harvesting.
//!
//! - `enumerate`: resolve ports, months and directions into fetch units
//! - `worker`: one port's units over its own connection pool
//! - `run_harvest`: every port as an independent task, rows aggregated

pub mod enumerate;
pub mod run;
pub mod worker;

pub use enumerate::Scope;
pub use run::{RunOutcome, RunStats, fetch_record, run_harvest, run_scope};
pub use worker::{PortOutcome, PortStats, PortWorker};
