// src/pipeline/enumerate.rs

//! Harvest scope resolution and fetch-unit enumeration.

use chrono::{Datelike, NaiveDate, Utc};

use crate::error::{AppError, Result};
use crate::models::{Config, Direction, FetchUnit};

/// Sentinel in `run.ports` meaning every known port.
pub const ALL_PORTS: &str = "all";

/// Concrete harvest scope after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub ports: Vec<String>,
    pub year: i32,
    pub months: Vec<u32>,
    pub directions: Vec<Direction>,
}

impl Scope {
    /// Resolve the run section of `config` against today's date.
    pub fn resolve(config: &Config) -> Result<Self> {
        Self::resolve_at(config, Utc::now().date_naive())
    }

    /// Resolve against a fixed date.
    pub fn resolve_at(config: &Config, today: NaiveDate) -> Result<Self> {
        let ports = resolve_ports(&config.run.ports, &config.known_ports);
        if ports.is_empty() {
            return Err(AppError::config("No ports to harvest"));
        }

        let year = config.run.year.unwrap_or(today.year());
        let months = if config.run.months.is_empty() {
            (1..=today.month()).collect()
        } else {
            config.run.months.clone()
        };
        if let Some(month) = months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(AppError::config(format!("Invalid month {month}")));
        }

        let directions = if config.run.directions.is_empty() {
            Direction::all()
        } else {
            config
                .run
                .directions
                .iter()
                .map(|d| d.parse())
                .collect::<Result<Vec<Direction>>>()?
        };

        Ok(Self {
            ports,
            year,
            months,
            directions,
        })
    }

    /// Units for one port, months outer and directions inner.
    pub fn units_for(&self, port_code: &str) -> Vec<FetchUnit> {
        self.months
            .iter()
            .flat_map(|&month| {
                self.directions.iter().map(move |&direction| FetchUnit {
                    port_code: port_code.to_string(),
                    year: self.year,
                    month,
                    direction,
                })
            })
            .collect()
    }

    /// Every unit of the scope, grouped by port in port order.
    pub fn units(&self) -> Vec<FetchUnit> {
        self.ports
            .iter()
            .flat_map(|port| self.units_for(port))
            .collect()
    }
}

/// Expand `all` to the known ports; keep other codes as given.
///
/// Codes are trimmed and upper-cased. Duplicates keep their first position.
pub fn resolve_ports(requested: &[String], known: &[String]) -> Vec<String> {
    let mut ports: Vec<String> = Vec::new();
    for code in requested {
        let code = code.trim();
        let expanded: Vec<String> = if code.eq_ignore_ascii_case(ALL_PORTS) {
            known.to_vec()
        } else if code.is_empty() {
            Vec::new()
        } else {
            vec![code.to_uppercase()]
        };
        for port in expanded {
            if !ports.contains(&port) {
                ports.push(port);
            }
        }
    }
    ports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_all_expands_to_known_ports() {
        let config = Config::default();
        let scope = Scope::resolve_at(&config, today()).unwrap();
        assert_eq!(scope.ports.len(), 50);
        assert_eq!(scope.ports[0], "IDGRE");
    }

    #[test]
    fn test_defaults_cover_year_to_date() {
        let scope = Scope::resolve_at(&Config::default(), today()).unwrap();
        assert_eq!(scope.year, 2025);
        assert_eq!(scope.months, vec![1, 2, 3]);
        assert_eq!(scope.directions, Direction::all());
    }

    #[test]
    fn test_unit_count_is_cross_product() {
        let mut config = Config::default();
        config.run.ports = vec!["idjkt".into(), "IDSUB".into(), "IDJKT".into()];
        config.run.year = Some(2024);
        config.run.months = vec![11, 12];

        let scope = Scope::resolve_at(&config, today()).unwrap();
        let units = scope.units();
        assert_eq!(scope.ports, vec!["IDJKT", "IDSUB"]);
        assert_eq!(units.len(), 2 * 2 * 2);
        assert_eq!(units[0].to_string(), "IDJKT 2024-11 dn");
        assert_eq!(units[1].to_string(), "IDJKT 2024-11 ln");
        assert_eq!(units[4].port_code, "IDSUB");
    }

    #[test]
    fn test_single_direction() {
        let mut config = Config::default();
        config.run.ports = vec!["IDBLW".into()];
        config.run.directions = vec!["ln".into()];
        let scope = Scope::resolve_at(&config, today()).unwrap();
        assert!(
            scope
                .units()
                .iter()
                .all(|u| u.direction == Direction::International)
        );
    }

    #[test]
    fn test_rejects_bad_scope() {
        let mut config = Config::default();
        config.run.ports = vec![" ".into()];
        assert!(Scope::resolve_at(&config, today()).is_err());

        let mut config = Config::default();
        config.run.directions = vec!["north".into()];
        assert!(Scope::resolve_at(&config, today()).is_err());

        let mut config = Config::default();
        config.run.months = vec![0];
        assert!(Scope::resolve_at(&config, today()).is_err());
    }
}
