// src/models/unit.rs

//! Fetch units: one list request per (port, year, month, direction).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Voyage routing of a clearance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Domestic routing (`dn`)
    #[serde(rename = "dn")]
    Domestic,
    /// International routing (`ln`)
    #[serde(rename = "ln")]
    International,
}

impl Direction {
    /// Path segment used by the list endpoint.
    pub fn code(&self) -> &'static str {
        match self {
            Direction::Domestic => "dn",
            Direction::International => "ln",
        }
    }

    /// Both directions, domestic first.
    pub fn all() -> Vec<Direction> {
        vec![Direction::Domestic, Direction::International]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Direction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dn" => Ok(Direction::Domestic),
            "ln" => Ok(Direction::International),
            other => Err(AppError::config(format!(
                "Unknown direction '{other}', expected 'dn' or 'ln'"
            ))),
        }
    }
}

/// Identifies one list-fetch call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchUnit {
    pub port_code: String,
    pub year: i32,
    pub month: u32,
    pub direction: Direction,
}

impl FetchUnit {
    /// Relative path of the list endpoint for this unit.
    pub fn list_path(&self) -> String {
        format!(
            "monitoring/byPort/list/{}/{}/{}/{:02}",
            self.port_code, self.direction, self.year, self.month
        )
    }
}

impl fmt::Display for FetchUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{:02} {}",
            self.port_code, self.year, self.month, self.direction
        )
    }
}
