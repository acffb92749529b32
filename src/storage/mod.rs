// src/storage/mod.rs

//! Storage abstractions for harvested rows.
//!
//! ## Directory Structure
//!
//! ```text
//! output/
//! ├── ina.json                # full harvest
//! └── test_{PKK}.json         # single-record lookup
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::NormalizedRow;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Number of rows written
    pub row_count: usize,
    /// Where the document ended up
    pub location: String,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// On-disk shape of a row document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowDocument {
    /// ISO 8601 timestamp of the write
    pub generated_at: DateTime<Utc>,
    /// Row count
    pub count: usize,
    /// The rows, in aggregation order
    pub rows: Vec<NormalizedRow>,
}

impl RowDocument {
    pub fn new(rows: Vec<NormalizedRow>) -> Self {
        Self {
            generated_at: Utc::now(),
            count: rows.len(),
            rows,
        }
    }
}

/// Trait for row storage backends.
#[async_trait]
pub trait RowStorage: Send + Sync {
    /// Persist `rows` under `name`, replacing any previous document.
    async fn write_rows(&self, name: &str, rows: &[NormalizedRow]) -> Result<WriteSummary>;

    /// Load a previously written document, if any.
    async fn load_rows(&self, name: &str) -> Result<Option<RowDocument>>;
}
