// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod record;
mod row;
mod unit;

// Re-export all public types
pub use config::{Config, CrawlerConfig, RunConfig};
pub use record::{
    ExtractedRecord, FieldGroup, RoleSummary, ServiceEvent, ServiceRole, VesselHeader,
};
pub use row::{Category, NormalizedRow, RowType};
pub use unit::{Direction, FetchUnit};
