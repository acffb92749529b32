//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// What to harvest
    #[serde(default)]
    pub run: RunConfig,

    /// Port codes the `all` sentinel expands to
    #[serde(default = "defaults::known_ports")]
    pub known_ports: Vec<String>,

    /// Verifier names that denote the state port authority (exact match)
    #[serde(default = "defaults::authorities")]
    pub authorities: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, or the defaults when the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(&path) {
            Ok(config) => Ok(config),
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No config at {:?}. Using defaults.", path.as_ref());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_attempts == 0 {
            return Err(AppError::validation("crawler.max_attempts must be > 0"));
        }
        if self.crawler.max_concurrent_details == 0 {
            return Err(AppError::validation(
                "crawler.max_concurrent_details must be > 0",
            ));
        }
        if self.crawler.port_workers == 0 {
            return Err(AppError::validation("crawler.port_workers must be > 0"));
        }
        Url::parse(&self.crawler.base_url)
            .map_err(|e| AppError::validation(format!("crawler.base_url is invalid: {e}")))?;
        if let Some(month) = self.run.months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(AppError::validation(format!(
                "run.months contains {month}, expected 1-12"
            )));
        }
        if self.authorities.is_empty() {
            return Err(AppError::validation("No authorities defined"));
        }
        Ok(())
    }

    /// Authority names as a lookup set.
    pub fn authority_set(&self) -> HashSet<String> {
        self.authorities.iter().cloned().collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            run: RunConfig::default(),
            known_ports: defaults::known_ports(),
            authorities: defaults::authorities(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Monitoring service root, without trailing path
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Attempts per list request, including the first one
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,

    /// Upper bound for a single backoff sleep
    #[serde(default = "defaults::max_backoff")]
    pub max_backoff_secs: u64,

    /// Detail fetches in flight at once within one port worker
    #[serde(default = "defaults::max_concurrent_details")]
    pub max_concurrent_details: usize,

    /// Port workers running at once
    #[serde(default = "defaults::port_workers")]
    pub port_workers: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_attempts: defaults::max_attempts(),
            max_backoff_secs: defaults::max_backoff(),
            max_concurrent_details: defaults::max_concurrent_details(),
            port_workers: defaults::port_workers(),
        }
    }
}

/// Harvest scope: which ports, year, months and directions to query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Port codes, or `all`
    #[serde(default = "defaults::ports")]
    pub ports: Vec<String>,

    /// Target year (defaults to the current year)
    #[serde(default)]
    pub year: Option<i32>,

    /// Target months; empty means January through the current month
    #[serde(default)]
    pub months: Vec<u32>,

    /// Direction codes (`dn`, `ln`)
    #[serde(default = "defaults::directions")]
    pub directions: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ports: defaults::ports(),
            year: None,
            months: Vec::new(),
            directions: defaults::directions(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://monitoring-inaportnet.dephub.go.id".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; Scraper/1.0; +https://example.org/bot)".into()
    }
    pub fn timeout() -> u64 {
        20
    }
    pub fn max_attempts() -> u32 {
        3
    }
    pub fn max_backoff() -> u64 {
        10
    }
    pub fn max_concurrent_details() -> usize {
        100
    }
    pub fn port_workers() -> usize {
        4
    }

    pub fn ports() -> Vec<String> {
        vec!["all".into()]
    }
    pub fn directions() -> Vec<String> {
        vec!["dn".into(), "ln".into()]
    }

    pub fn known_ports() -> Vec<String> {
        [
            "IDGRE", "IDJKT", "IDSUB", "IDPNK", "IDSRG", "IDMES", "IDBPN", "IDMAK", "IDPLM",
            "IDBJM", "IDTGR", "IDBTH", "IDBLW", "IDKOE", "IDAMI", "IDTRK", "IDBDO", "IDPBL",
            "IDTTE", "IDBTJ", "IDKDI", "IDKBR", "IDPDG", "IDUPG", "IDMDC", "IDBJW", "IDTKG",
            "IDBKS", "IDSWQ", "IDTIM", "IDAMQ", "IDFKQ", "IDNAH", "IDMEQ", "IDWMU", "IDJBR",
            "IDSIQ", "IDTJQ", "IDGTO", "IDKAU", "IDKBU", "IDDUM", "IDBTN", "IDCXP", "IDBJU",
            "IDCEB", "IDLBR", "IDKUM", "IDSMQ", "IDSTU",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    pub fn authorities() -> Vec<String> {
        [
            "PT. PELABUHAN INDONESIA (Persero)",
            "PT PELABUHAN INDONESIA (PERSERO) REGIONAL 2 PONTIANAK",
            "PT. PELABUHAN INDONESIA (PERSERO) REGIONAL 2 BANTEN",
            "PT. PELABUHAN INDONESIA (PERSERO) REGIONAL 3 Tj. Emas",
            "PT. PELABUHAN INDONESIA (Persero) Cab. Gresik",
            "PT. PELABUHAN INDONESIA (PERSERO) REGIONAL 4 CAB. MAKASSAR",
            "PT. PELABUHAN INDONESIA (PERSERO) REGIONAL 4 CAB. BALIKPAPAN",
            "PT PELINDO JASA MARITIM",
            "PT. PELABUHAN INDONESIA (Persero) CABANG KUPANG",
            "PT. PELABUHAN INDONESIA (Persero) Cab. Belawan",
            "PT. PELABUHAN INDONESIA (Persero) Cab. Palembang",
            "PT. PELABUHAN INDONESIA (PERSERO) REGIONAL 4 CAB. TERNATE",
            "PT. PELABUHAN INDONESIA (PERSERO) REGIONAL 4 CAB. KENDARI",
            "PT. PELABUHAN INDONESIA (Persero) Cab. Pulau Ba'ai",
            "PT. PELABUHAN INDONESIA (PERSERO) REGIONAL 4 CAB. TARAKAN",
            "PELABUHAN INDONESIA",
            "PT. PELABUHAN INDONESIA (Persero) Cab. Tanjung Pandan",
            "PT. PELABUHAN INDONESIA (PERSERO) REGIONAL 4 CAB. AMBON",
            "PT. PELABUHAN INDONESIA (PERSERO) REGIONAL 4 CAB. GORONTALO",
            "KANTOR KESYAHBANDARAN DAN OTORITAS PELABUHAN UTAMA TANJUNG PRIOK",
            "PT. PELABUHAN INDONESIA (Persero) Batulicin",
            "PT. Pelabuhan Indonesia (Persero) Regional 1 Cabang Dumai",
            "PT. PELABUHAN INDONESIA (Persero) CABANG SATUI",
            "PT. PELABUHAN INDONESIA (Persero) CABANG SAMPIT",
            "PT Pelabuhan Indonesia",
            "PT. PELABUHAN INDONESIA (Persero) CABANG LEMBAR",
            "PT. PELABUHAN INDONESIA (Persero) Cab. Cilacap",
            "PT. PELABUHAN INDONESIA (Persero) CABANG TANJUNG WANGI",
            "PT PELABUHAN INDONESIA (PERSERO)",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.crawler.max_concurrent_details = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_month() {
        let mut config = Config::default();
        config.run.months = vec![1, 13];
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_carry_built_in_lists() {
        let config = Config::default();
        assert_eq!(config.known_ports.len(), 50);
        assert_eq!(config.known_ports[0], "IDGRE");
        assert_eq!(config.authorities.len(), 29);
        assert_eq!(config.crawler.max_concurrent_details, 100);
        assert_eq!(config.crawler.max_attempts, 3);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            authorities = ["ACME PORT"]

            [run]
            ports = ["IDJKT"]
            months = [2]
            "#,
        )
        .unwrap();

        assert_eq!(config.run.ports, vec!["IDJKT"]);
        assert_eq!(config.run.directions, vec!["dn", "ln"]);
        assert_eq!(config.authorities, vec!["ACME PORT"]);
        assert_eq!(config.crawler.timeout_secs, 20);
        assert!(!config.known_ports.is_empty());
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/config.toml").unwrap();
        assert_eq!(config.crawler.port_workers, 4);
    }

    #[test]
    fn load_or_default_rejects_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[run]\nports = \"IDJKT\"\n").unwrap();

        let err = Config::load_or_default(&path).unwrap_err();
        assert!(matches!(err, AppError::Toml(_)));
    }

    #[test]
    fn load_or_default_reads_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[run]\nports = [\"IDJKT\"]\n").unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.run.ports, vec!["IDJKT"]);
    }
}
