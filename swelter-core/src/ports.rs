//! Traits describing data-source capabilities and shared helper types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{AirQualityReading, AnalysisWindow, CityId, CityMeta, GridSample};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to data-source backends.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Reading a local snapshot export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The backend returned a payload the provider could not interpret.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    /// The city has no registered plugin or export.
    #[error("Unsupported city")]
    UnsupportedCity,
    /// Internal provider error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone)]
/// One grid snapshot as delivered by the aggregator boundary.
pub struct GridSnapshot {
    /// Compositing window of the underlying imagery, when reported.
    pub window: Option<AnalysisWindow>,
    /// Raw per-cell records, order as delivered.
    pub samples: Vec<GridSample>,
}

#[async_trait]
/// Trait for grid-aggregator backends delivering per-cell band averages.
pub trait GridPort: Send + Sync {
    /// Metadata describing the city handled by this port.
    fn city(&self) -> &CityMeta;

    /// Fetch the current grid snapshot for the city.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the snapshot cannot be loaded or parsed.
    async fn snapshot(&self, city: &CityId) -> Result<GridSnapshot, PortError>;
}

#[async_trait]
/// Trait for ground air-quality backends.
pub trait AirQualityPort: Send + Sync {
    /// Metadata describing the city handled by this port.
    fn city(&self) -> &CityMeta;

    /// Fetch the current city-wide reading.
    ///
    /// `Ok(None)` means the network answered but has no usable reading for
    /// the city right now; the pipeline then falls back to scoring without
    /// a pollution term.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request itself fails.
    async fn current(&self, city: &CityId) -> Result<Option<AirQualityReading>, PortError>;
}
