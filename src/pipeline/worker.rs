// src/pipeline/worker.rs

//! One port's harvest: sequential list fetches, bounded detail fan-out.

use std::collections::HashSet;
use std::sync::Arc;

use futures::{StreamExt, stream};

use crate::error::Result;
use crate::extract::extract_html;
use crate::models::{CrawlerConfig, FetchUnit, NormalizedRow};
use crate::services::{DetailFetcher, ListFetcher};
use crate::transform::RowTransformer;
use crate::utils::http::HttpTransport;
use crate::utils::retry::RetryPolicy;

/// Counters for one port (or, summed, for a whole run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortStats {
    pub units_attempted: usize,
    pub units_failed: usize,
    pub identifiers_found: usize,
    pub duplicates_skipped: usize,
    pub details_fetched: usize,
    pub details_failed: usize,
    pub records_discarded: usize,
    pub rows_emitted: usize,
}

impl PortStats {
    pub fn merge(&mut self, other: &PortStats) {
        self.units_attempted += other.units_attempted;
        self.units_failed += other.units_failed;
        self.identifiers_found += other.identifiers_found;
        self.duplicates_skipped += other.duplicates_skipped;
        self.details_fetched += other.details_fetched;
        self.details_failed += other.details_failed;
        self.records_discarded += other.records_discarded;
        self.rows_emitted += other.rows_emitted;
    }
}

/// Rows and counters produced by one port worker.
#[derive(Debug, Clone, Default)]
pub struct PortOutcome {
    pub port_code: String,
    pub rows: Vec<NormalizedRow>,
    pub stats: PortStats,
}

/// What became of one identifier.
enum DetailResult {
    Failed,
    Discarded,
    Rows(Vec<NormalizedRow>),
}

/// Harvests the units of a single port over its own transport.
pub struct PortWorker {
    port_code: String,
    list: ListFetcher,
    detail: DetailFetcher,
    transformer: Arc<RowTransformer>,
    max_concurrent: usize,
}

impl PortWorker {
    pub fn new(
        port_code: &str,
        transport: Arc<dyn HttpTransport>,
        config: &CrawlerConfig,
        transformer: Arc<RowTransformer>,
    ) -> Result<Self> {
        let list = ListFetcher::new(
            Arc::clone(&transport),
            &config.base_url,
            RetryPolicy::from_config(config),
        );
        let detail = DetailFetcher::new(transport, &config.base_url)?;

        Ok(Self {
            port_code: port_code.to_string(),
            list,
            detail,
            transformer,
            max_concurrent: config.max_concurrent_details.max(1),
        })
    }

    /// Process `units` in order. Never fails: a unit whose list fetch fails
    /// contributes nothing and the next unit runs.
    pub async fn run(&self, units: &[FetchUnit]) -> PortOutcome {
        let mut outcome = PortOutcome {
            port_code: self.port_code.clone(),
            ..PortOutcome::default()
        };
        let mut seen: HashSet<String> = HashSet::new();

        for unit in units {
            outcome.stats.units_attempted += 1;
            log::info!("Fetching {}", unit);

            let identifiers = match self.list.fetch(unit).await {
                Ok(identifiers) => identifiers,
                Err(e) => {
                    log::warn!("List fetch failed for {}: {}", unit, e);
                    outcome.stats.units_failed += 1;
                    continue;
                }
            };

            if identifiers.is_empty() {
                log::info!("No records for {}", unit);
                continue;
            }

            // Only identifiers from earlier units are skipped; a list is taken as is
            let listed = identifiers.len();
            let fresh: Vec<String> = identifiers
                .into_iter()
                .filter(|id| !seen.contains(id))
                .collect();
            seen.extend(fresh.iter().cloned());
            outcome.stats.identifiers_found += listed;
            outcome.stats.duplicates_skipped += listed - fresh.len();
            log::info!("Found {} records for {} ({} new)", listed, unit, fresh.len());

            let results: Vec<DetailResult> = stream::iter(fresh)
                .map(|id| self.process(id))
                .buffer_unordered(self.max_concurrent)
                .collect()
                .await;

            for result in results {
                match result {
                    DetailResult::Failed => outcome.stats.details_failed += 1,
                    DetailResult::Discarded => {
                        outcome.stats.details_fetched += 1;
                        outcome.stats.records_discarded += 1;
                    }
                    DetailResult::Rows(rows) => {
                        outcome.stats.details_fetched += 1;
                        outcome.stats.rows_emitted += rows.len();
                        outcome.rows.extend(rows);
                    }
                }
            }
        }

        log::info!(
            "Port {} done: {} rows from {} records ({} units, {} failed)",
            self.port_code,
            outcome.stats.rows_emitted,
            outcome.stats.details_fetched,
            outcome.stats.units_attempted,
            outcome.stats.units_failed
        );
        outcome
    }

    /// Fetch, extract and transform one record.
    async fn process(&self, identifier: String) -> DetailResult {
        let Some(body) = self.detail.fetch(&identifier).await else {
            return DetailResult::Failed;
        };

        match extract_html(&body) {
            Some(record) => DetailResult::Rows(self.transformer.rows(&record)),
            None => {
                log::debug!("No title in detail {}, record discarded", identifier);
                DetailResult::Discarded
            }
        }
    }
}
