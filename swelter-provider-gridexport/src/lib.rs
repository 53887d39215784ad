//! Grid-snapshot provider reading per-city JSON tables exported by the
//! upstream satellite aggregation job.
//!
//! The export is one record per grid cell with the spatially averaged bands
//! under their instrument names (`ST_B10`, `NDVI`, `NDBI`, `NO2`). The
//! provider only parses; rows with missing bands pass through untouched for
//! the scoring engine to drop.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use swelter_core::{
    model::{AnalysisWindow, CityId, CityMeta, GridSample},
    ports::{GridPort, GridSnapshot, PortError},
};

/// Top-level structure of one export file.
#[derive(Debug, Deserialize)]
struct ExportFile {
    #[serde(default)]
    window: Option<WindowEntry>,

    cells: Vec<CellEntry>,
}

/// Compositing window of the underlying imagery.
#[derive(Debug, Deserialize)]
struct WindowEntry {
    start: NaiveDate,
    end: NaiveDate,
}

/// One exported cell, bands under their instrument names.
#[derive(Debug, Deserialize)]
struct CellEntry {
    latitude: f64,
    longitude: f64,

    #[serde(rename = "ST_B10", default)]
    surface_temp: Option<f64>,

    #[serde(rename = "NDVI", default)]
    vegetation_index: Option<f64>,

    #[serde(rename = "NDBI", default)]
    built_up_index: Option<f64>,

    #[serde(rename = "NO2", default)]
    no2_column: Option<f64>,
}

/// Grid snapshot implementation over one city's export file.
pub struct GridExportPort {
    meta: CityMeta,
    path: PathBuf,
}

impl GridExportPort {
    /// Create a port serving the given city from the given export file.
    #[must_use]
    pub fn new(meta: CityMeta, path: impl Into<PathBuf>) -> Self {
        Self {
            meta,
            path: path.into(),
        }
    }
}

#[async_trait]
impl GridPort for GridExportPort {
    fn city(&self) -> &CityMeta {
        &self.meta
    }

    async fn snapshot(&self, city: &CityId) -> Result<GridSnapshot, PortError> {
        if *city != self.meta.id {
            return Err(PortError::UnsupportedCity);
        }

        let raw = tokio::fs::read_to_string(&self.path).await?;
        snapshot_from_str(&raw)
    }
}

/// Build a plugin-ready port for the given city.
#[must_use]
pub fn port(meta: CityMeta, path: impl Into<PathBuf>) -> Arc<GridExportPort> {
    Arc::new(GridExportPort::new(meta, path))
}

/// Parse an export file into a snapshot.
fn snapshot_from_str(raw: &str) -> Result<GridSnapshot, PortError> {
    let export: ExportFile =
        serde_json::from_str(raw).map_err(|err| PortError::MalformedPayload(err.to_string()))?;

    let window = match export.window {
        Some(entry) if entry.start > entry.end => {
            return Err(PortError::MalformedPayload(format!(
                "window starts {} after it ends {}",
                entry.start, entry.end
            )));
        }
        Some(entry) => Some(AnalysisWindow {
            start: entry.start,
            end: entry.end,
        }),
        None => None,
    };

    let samples = export
        .cells
        .into_iter()
        .map(|cell| GridSample {
            latitude: cell.latitude,
            longitude: cell.longitude,
            surface_temp: cell.surface_temp,
            vegetation_index: cell.vegetation_index,
            built_up_index: cell.built_up_index,
            no2_column: cell.no2_column,
        })
        .collect();

    Ok(GridSnapshot { window, samples })
}
