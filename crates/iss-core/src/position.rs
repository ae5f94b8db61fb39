use crate::error::{NotifierError, Result};
use crate::http;
use crate::types::{Coordinates, SatellitePosition};
use chrono::DateTime;
use serde::{Deserialize, Deserializer};
use tracing::debug;

// ---------------------------------------------------------------------------
// Wire format (open-notify `iss-now.json`)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct IssNowResponse {
    message: String,
    #[serde(default)]
    timestamp: Option<i64>,
    iss_position: RawPosition,
}

#[derive(Debug, Deserialize)]
struct RawPosition {
    #[serde(deserialize_with = "degrees")]
    latitude: f64,
    #[serde(deserialize_with = "degrees")]
    longitude: f64,
}

/// The provider sends coordinates as strings; accept numbers too.
fn degrees<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Degrees {
        Number(f64),
        Text(String),
    }

    match Degrees::deserialize(de)? {
        Degrees::Number(n) => Ok(n),
        Degrees::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("'{s}' is not a number of degrees"))),
    }
}

impl IssNowResponse {
    fn into_position(self, url: &str) -> Result<SatellitePosition> {
        if self.message != "success" {
            return Err(NotifierError::parse(
                url,
                format!("provider reported '{}'", self.message),
            ));
        }
        let coordinates = Coordinates::new(self.iss_position.latitude, self.iss_position.longitude);
        if !coordinates.is_valid() {
            return Err(NotifierError::parse(
                url,
                format!("position ({coordinates}) is out of range"),
            ));
        }
        Ok(SatellitePosition {
            coordinates,
            reported_at: self.timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }
}

// ---------------------------------------------------------------------------
// PositionFetcher
// ---------------------------------------------------------------------------

/// Fetches the satellite's current sub-point from a fixed URL.
#[derive(Debug, Clone)]
pub struct PositionFetcher {
    client: reqwest::Client,
    url: String,
}

impl PositionFetcher {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<SatellitePosition> {
        let body: IssNowResponse = http::get_json(&self.client, &self.url, &[]).await?;
        let position = body.into_position(&self.url)?;
        debug!(
            lat = position.coordinates.latitude,
            lon = position.coordinates.longitude,
            "satellite position"
        );
        Ok(position)
    }
}
