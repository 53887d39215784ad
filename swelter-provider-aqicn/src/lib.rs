//! Air-quality provider backed by the AQICN (waqi.info) city feed.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use swelter_core::{
    model::{AirQualityReading, CityId, CityMeta},
    ports::{AirQualityPort, PortError},
};

const BASE_URL: &str = "https://api.waqi.info/feed";

/// Top-level envelope from /feed/{city}/
#[derive(Debug, Deserialize)]
struct FeedResponse {
    status: String,

    #[serde(default)]
    data: Option<FeedData>,
}

/// Payload of a successful feed response.
#[derive(Debug, Deserialize)]
struct FeedData {
    #[serde(default)]
    aqi: Option<AqiField>,

    #[serde(default)]
    iaqi: Option<Iaqi>,
}

/// The feed reports `"-"` instead of a number when a station is offline,
/// so the AQI field cannot be a plain f64.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AqiField {
    Value(f64),
    Placeholder(String),
}

impl AqiField {
    fn as_f64(&self) -> Option<f64> {
        match self {
            AqiField::Value(value) => Some(*value),
            AqiField::Placeholder(raw) => raw.parse().ok(),
        }
    }
}

/// Per-pollutant readings; we only need fine particulates.
#[derive(Debug, Deserialize)]
struct Iaqi {
    #[serde(default)]
    pm25: Option<IaqiValue>,
}

/// Single instantaneous pollutant value.
#[derive(Debug, Deserialize)]
struct IaqiValue {
    #[serde(rename = "v")]
    value: f64,
}

/// City-wide air quality implementation over the AQICN feed.
pub struct AqicnAirQualityPort {
    client: Client,
    token: Option<String>,
    meta: CityMeta,
}

impl AqicnAirQualityPort {
    /// Create a port bound to the given HTTP client and API token.
    ///
    /// Without a token the port reports "no reading" instead of calling the
    /// feed, so a missing credential degrades the analysis rather than
    /// failing it.
    #[must_use]
    pub fn new(client: Client, token: Option<String>, meta: CityMeta) -> Self {
        Self {
            client,
            token,
            meta,
        }
    }
}

#[async_trait]
impl AirQualityPort for AqicnAirQualityPort {
    fn city(&self) -> &CityMeta {
        &self.meta
    }

    async fn current(&self, city: &CityId) -> Result<Option<AirQualityReading>, PortError> {
        let Some(token) = self.token.as_deref() else {
            return Ok(None);
        };

        let response = self
            .client
            .get(format!("{BASE_URL}/{}/", city.0))
            .query(&[("token", token)])
            .send()
            .await
            .map_err(PortError::from)?
            .error_for_status()
            .map_err(PortError::from)?
            .json::<FeedResponse>()
            .await
            .map_err(PortError::from)?;

        Ok(reading_from_feed(&response))
    }
}

/// Build a plugin-ready port for the given city.
#[must_use]
pub fn port(client: Client, token: Option<String>, meta: CityMeta) -> Arc<AqicnAirQualityPort> {
    Arc::new(AqicnAirQualityPort::new(client, token, meta))
}

/// Extract a usable reading from a feed envelope.
///
/// Anything short of a complete reading (error status, offline station,
/// missing PM2.5) collapses to `None`: absence of data, not failure.
fn reading_from_feed(response: &FeedResponse) -> Option<AirQualityReading> {
    if response.status != "ok" {
        return None;
    }
    let data = response.data.as_ref()?;
    let aqi = data.aqi.as_ref().and_then(AqiField::as_f64)?;
    let pm25 = data.iaqi.as_ref()?.pm25.as_ref()?.value;

    Some(AirQualityReading { aqi, pm25 })
}
