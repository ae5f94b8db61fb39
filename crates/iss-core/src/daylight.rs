//! Sunrise/sunset lookup and the "is it dark" decision.
//!
//! All instants are UTC. The date sent to the provider is the observer's
//! local solar date (UTC shifted by longitude / 15 hours), so the returned
//! sunrise/sunset pair is the one that brackets the observer's current day.
//! They are compared against the current instant directly (no hour
//! truncation).

use crate::error::{NotifierError, Result};
use crate::http;
use crate::types::Coordinates;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sunrise and sunset for one day at one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl SunTimes {
    /// Night if `now` is at or before sunrise, or at or after sunset.
    pub fn is_dark(&self, now: DateTime<Utc>) -> bool {
        now <= self.sunrise || now >= self.sunset
    }
}

/// Calendar date at the observer's mean solar time. The provider reports
/// sunrise and sunset in UTC for the local day containing this date, which
/// for western longitudes puts sunset on the next UTC day and for eastern
/// ones puts sunrise on the previous UTC day.
pub fn local_solar_date(observer: Coordinates, now: DateTime<Utc>) -> NaiveDate {
    let offset = Duration::seconds((observer.longitude * 240.0).round() as i64);
    (now + offset).date_naive()
}

// ---------------------------------------------------------------------------
// Wire format (sunrise-sunset.org with `formatted=0`)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SunResponse {
    status: String,
    /// An object on success; the provider sends `""` on errors.
    #[serde(default)]
    results: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SunResults {
    sunrise: String,
    sunset: String,
}

fn parse_instant(url: &str, field: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| NotifierError::parse(url, format!("{field} '{raw}': {e}")))
}

impl SunResponse {
    fn into_sun_times(self, url: &str) -> Result<SunTimes> {
        if self.status != "OK" {
            return Err(NotifierError::parse(
                url,
                format!("provider status '{}'", self.status),
            ));
        }
        let results: SunResults = serde_json::from_value(self.results)
            .map_err(|e| NotifierError::parse(url, format!("results: {e}")))?;
        Ok(SunTimes {
            sunrise: parse_instant(url, "sunrise", &results.sunrise)?,
            sunset: parse_instant(url, "sunset", &results.sunset)?,
        })
    }
}

// ---------------------------------------------------------------------------
// DaylightChecker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DaylightChecker {
    client: reqwest::Client,
    url: String,
}

impl DaylightChecker {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub async fn sun_times(&self, observer: Coordinates, date: NaiveDate) -> Result<SunTimes> {
        let query = [
            ("lat", observer.latitude.to_string()),
            ("lng", observer.longitude.to_string()),
            ("date", date.format("%Y-%m-%d").to_string()),
            ("formatted", "0".to_string()),
        ];
        let body: SunResponse = http::get_json(&self.client, &self.url, &query).await?;
        body.into_sun_times(&self.url)
    }

    /// Fetch the sun times for the observer's current local day and decide
    /// whether `now` is night.
    pub async fn is_dark(&self, observer: Coordinates, now: DateTime<Utc>) -> Result<bool> {
        let times = self.sun_times(observer, local_solar_date(observer, now)).await?;
        let dark = times.is_dark(now);
        debug!(
            sunrise = %times.sunrise,
            sunset = %times.sunset,
            now = %now,
            dark,
            "daylight check"
        );
        Ok(dark)
    }
}
