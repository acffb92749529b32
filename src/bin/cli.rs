//! PKK Crawler CLI
//!
//! Local execution entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use pkk_crawler::{
    error::Result,
    models::Config,
    pipeline::{self, Scope},
    storage::{LocalStorage, RowStorage},
    utils::http::{ReqwestFactory, TransportFactory},
};

/// PKK Crawler - INAPORTNET vessel clearance harvester
#[derive(Parser, Debug)]
#[command(
    name = "pkk-crawler",
    version,
    about = "Harvest INAPORTNET PKK records into pilotage service rows"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Harvest ports × months × directions and write every row
    Harvest {
        /// Port codes, or `all`
        #[arg(long, num_args = 1..)]
        ports: Option<Vec<String>>,

        /// Target year (default: config, then current year)
        #[arg(long)]
        year: Option<i32>,

        /// Target months (default: January through the current month)
        #[arg(long, num_args = 1..)]
        months: Option<Vec<u32>>,

        /// Directions: dn, ln
        #[arg(long, num_args = 1..)]
        directions: Option<Vec<String>>,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Document name inside the output directory
        #[arg(long, default_value = "ina")]
        name: String,
    },

    /// Fetch one record, print it and write its rows
    Detail {
        /// Record identifier (nomor PKK)
        pkk: String,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("PKK Crawler starting...");

    let mut config = Config::load_or_default(&cli.config)?;
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Harvest {
            ports,
            year,
            months,
            directions,
            output,
            name,
        } => {
            if let Some(ports) = ports {
                config.run.ports = ports;
            }
            if year.is_some() {
                config.run.year = year;
            }
            if let Some(months) = months {
                config.run.months = months;
            }
            if let Some(directions) = directions {
                config.run.directions = directions;
            }
            config.validate()?;

            let scope = Scope::resolve(&config)?;
            let factory: Arc<dyn TransportFactory> = Arc::new(ReqwestFactory::new(&config.crawler));
            let outcome = pipeline::run_scope(&config, &scope, factory).await;

            if outcome.rows.is_empty() {
                log::warn!("No data to save.");
                return Ok(());
            }

            let storage = LocalStorage::new(&output);
            let summary = storage.write_rows(&name, &outcome.rows).await?;
            log::info!(
                "Saved {} rows to {}",
                summary.row_count,
                summary.location
            );
        }

        Command::Detail { pkk, output } => {
            let factory = ReqwestFactory::new(&config.crawler);

            let Some((record, rows)) = pipeline::fetch_record(&config, &factory, &pkk).await?
            else {
                log::warn!("No data found.");
                return Ok(());
            };

            log::info!("No PKK: {}", record.record_number);
            log::info!("Nama Kapal: {}", record.vessel_name);
            log::info!("Nama Perusahaan: {}", record.header.operator_name);
            log::info!(
                "Status Kedatangan: {} / Keberangkatan: {}",
                record.arrival.status,
                record.departure.status
            );
            for row in &rows {
                log::info!(
                    "  Tipe: {}, Layanan: {}, Verifikator: {}, Kategori: {}",
                    row.row_type,
                    row.service_label,
                    row.verifier_name,
                    row.category.map(|c| c.to_string()).unwrap_or_default()
                );
            }

            if rows.is_empty() {
                log::warn!("No SPK PANDU service in {}", pkk);
                return Ok(());
            }

            let storage = LocalStorage::new(&output);
            let name = format!("test_{}", pkk.replace(['/', '\\'], "_"));
            let summary = storage.write_rows(&name, &rows).await?;
            log::info!("Saved {} rows to {}", summary.row_count, summary.location);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            let scope = Scope::resolve(&config)?;
            log::info!(
                "✓ Config OK ({} ports, {} units, {} authorities)",
                scope.ports.len(),
                scope.units().len(),
                config.authorities.len()
            );

            log::info!("All validations passed!");
        }
    }

    log::info!("Done!");

    Ok(())
}
