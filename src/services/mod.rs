// src/services/mod.rs

//! Service layer for talking to the monitoring site.
//!
//! - List fetching (`ListFetcher`): record identifiers per fetch unit
//! - Detail fetching (`DetailFetcher`): raw detail page per identifier

mod detail;
mod list;

pub use detail::DetailFetcher;
pub use list::ListFetcher;
