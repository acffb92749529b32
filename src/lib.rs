// src/lib.rs

//! PKK Crawler Library
//!
//! Harvests vessel clearance (PKK) records from the INAPORTNET monitoring
//! service and unpivots them into pilotage service rows.

pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod transform;
pub mod utils;
