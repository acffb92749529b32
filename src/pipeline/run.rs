// src/pipeline/run.rs

//! Harvest entry point: independent port workers, aggregated rows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::{StreamExt, stream};

use crate::error::{AppError, Result};
use crate::extract::extract_html;
use crate::models::{Config, ExtractedRecord, NormalizedRow};
use crate::pipeline::enumerate::Scope;
use crate::pipeline::worker::{PortOutcome, PortStats, PortWorker};
use crate::services::DetailFetcher;
use crate::transform::RowTransformer;
use crate::utils::http::TransportFactory;

/// Statistics for a whole run.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub ports_attempted: usize,
    pub ports_failed: usize,
    /// Sum of the per-port counters
    pub totals: PortStats,
}

impl RunStats {
    pub fn elapsed(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }
}

/// Every row of the run plus its statistics.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub rows: Vec<NormalizedRow>,
    pub stats: RunStats,
}

/// Harvest the configured scope.
///
/// Only an unresolvable scope is an error, and it is reported before any
/// request is made. Failures inside a port stay inside that port.
pub async fn run_harvest(config: &Config, factory: Arc<dyn TransportFactory>) -> Result<RunOutcome> {
    let scope = Scope::resolve(config)?;
    Ok(run_scope(config, &scope, factory).await)
}

/// Harvest an already resolved scope.
pub async fn run_scope(
    config: &Config,
    scope: &Scope,
    factory: Arc<dyn TransportFactory>,
) -> RunOutcome {
    let start_time = Utc::now();
    log::info!(
        "Harvesting {} ports, {} {:?}, directions {:?}",
        scope.ports.len(),
        scope.year,
        scope.months,
        scope.directions
    );

    let transformer = Arc::new(RowTransformer::from_config(config));

    // Each port owns its transport and runs as its own task
    let mut results: Vec<(usize, String, Result<PortOutcome>)> =
        stream::iter(scope.ports.iter().cloned().enumerate())
            .map(|(index, port)| {
                let units = scope.units_for(&port);
                let factory = Arc::clone(&factory);
                let transformer = Arc::clone(&transformer);
                let crawler = config.crawler.clone();
                let task_port = port.clone();

                let handle = tokio::spawn(async move {
                    let transport = factory.create()?;
                    let worker = PortWorker::new(&task_port, transport, &crawler, transformer)?;
                    Ok::<_, AppError>(worker.run(&units).await)
                });

                async move {
                    let result = handle.await.map_err(AppError::from).and_then(|r| r);
                    (index, port, result)
                }
            })
            .buffer_unordered(config.crawler.port_workers.max(1))
            .collect()
            .await;

    results.sort_by_key(|(index, _, _)| *index);

    let mut rows = Vec::new();
    let mut totals = PortStats::default();
    let mut ports_failed = 0;

    for (_, port, result) in results {
        match result {
            Ok(outcome) => {
                totals.merge(&outcome.stats);
                rows.extend(outcome.rows);
            }
            Err(e) => {
                log::error!("Port {} failed: {}", port, e);
                ports_failed += 1;
            }
        }
    }

    let stats = RunStats {
        start_time,
        end_time: Utc::now(),
        ports_attempted: scope.ports.len(),
        ports_failed,
        totals,
    };
    log_summary(&stats);

    RunOutcome { rows, stats }
}

/// Fetch, extract and transform a single record.
///
/// `Ok(None)` when the page could not be fetched or has no title.
pub async fn fetch_record(
    config: &Config,
    factory: &dyn TransportFactory,
    identifier: &str,
) -> Result<Option<(ExtractedRecord, Vec<NormalizedRow>)>> {
    let detail = DetailFetcher::new(factory.create()?, &config.crawler.base_url)?;

    let Some(body) = detail.fetch(identifier).await else {
        log::warn!("Detail {} could not be fetched", identifier);
        return Ok(None);
    };
    let Some(record) = extract_html(&body) else {
        log::warn!("Detail {} has no record title", identifier);
        return Ok(None);
    };

    let rows = RowTransformer::from_config(config).rows(&record);
    Ok(Some((record, rows)))
}

fn log_summary(stats: &RunStats) {
    let t = &stats.totals;
    log::info!("[SUMMARY] Harvest Results");
    log::info!(
        "    Ports: {} ({} failed)",
        stats.ports_attempted,
        stats.ports_failed
    );
    log::info!("    Units: {} ({} failed)", t.units_attempted, t.units_failed);
    log::info!(
        "    Identifiers: {} ({} duplicates)",
        t.identifiers_found,
        t.duplicates_skipped
    );
    log::info!(
        "    Details: {} fetched, {} failed, {} without title",
        t.details_fetched,
        t.details_failed,
        t.records_discarded
    );
    log::info!("    Rows: {}", t.rows_emitted);
    log::info!("    Elapsed: {}s", stats.elapsed().num_seconds());
}
