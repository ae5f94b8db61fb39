use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}, {:.3}", self.latitude, self.longitude)
    }
}

/// Where the satellite was at the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SatellitePosition {
    pub coordinates: Coordinates,
    /// Provider timestamp, when the response carried one.
    pub reported_at: Option<DateTime<Utc>>,
}

/// What a single tick of the monitor decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TickOutcome {
    /// Satellite outside the tolerance box; daylight was not checked.
    NotOverhead,
    /// Overhead, but the sun is up.
    Daylight,
    /// Overhead and dark, but a notification went out too recently.
    CoolingDown,
    /// Overhead and dark; one email sent.
    Notified,
}

impl TickOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickOutcome::NotOverhead => "not_overhead",
            TickOutcome::Daylight => "daylight",
            TickOutcome::CoolingDown => "cooling_down",
            TickOutcome::Notified => "notified",
        }
    }
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
