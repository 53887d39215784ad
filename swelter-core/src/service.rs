//! High-level service facade running the full analysis pipeline.

use std::sync::Arc;

use crate::budget::{AllocationOrder, allocate};
use crate::config::{AnalysisConfig, ConfigError};
use crate::model::{CityAnalysis, CityId, CityMeta, MitigationPlan};
use crate::plugin::PluginRegistry;
use crate::ports::PortError;
use crate::risk::{ScoreError, score_grid};
use crate::simulate::apply_plan;
use crate::summary::summarize;

#[derive(thiserror::Error, Debug)]
/// Errors surfaced by an analysis run.
pub enum AnalysisError {
    /// The configuration violated an invariant.
    #[error("Configuration rejected: {0}")]
    Config(#[from] ConfigError),
    /// A data source failed.
    #[error(transparent)]
    Port(#[from] PortError),
    /// The snapshot had no scoreable cells.
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Public entry point for running city analyses.
pub struct SwelterService {
    registry: Arc<PluginRegistry>,
    config: AnalysisConfig,
}

impl SwelterService {
    /// Create a service bound to the provided registry and configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration violates an
    /// invariant; a rejected configuration never reaches the pipeline.
    pub fn new(registry: Arc<PluginRegistry>, config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// List all cities with a registered plugin.
    #[must_use]
    pub fn cities(&self) -> Vec<CityMeta> {
        self.registry.cities()
    }

    /// The validated configuration this service runs with.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full pipeline for one city and plan: fetch the grid snapshot
    /// and air-quality reading, score, simulate, allocate, summarize.
    ///
    /// A failed air-quality fetch is recovered as "no reading": the
    /// pollution term falls back to zero and the analysis proceeds.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalysisError`] if the city is unsupported, the grid
    /// snapshot cannot be loaded, or no row has all required bands.
    pub async fn analyze(
        &self,
        city: CityId,
        plan: &MitigationPlan,
        order: AllocationOrder,
    ) -> Result<CityAnalysis, AnalysisError> {
        let plugin = self.registry.plugin(&city)?;

        let snapshot = plugin.grid_port.snapshot(&city).await?;
        let air_quality = plugin
            .air_quality_port
            .current(&city)
            .await
            .unwrap_or(None);

        let cells = score_grid(&snapshot.samples, air_quality.as_ref(), &self.config)?;
        let cells = apply_plan(cells, plan, &self.config);
        let selection = allocate(plan, &self.config, order);
        let summary = summarize(&cells, air_quality.as_ref());

        Ok(CityAnalysis {
            city: plugin.meta.clone(),
            window: snapshot.window,
            cells,
            selection,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::model::{AirQualityReading, GridSample, InterventionId, PollutionLevel};
    use crate::ports::{AirQualityPort, GridPort, GridSnapshot};
    use crate::plugin::CityPlugin;

    fn meta() -> CityMeta {
        CityMeta {
            id: CityId(String::from("pune")),
            name: String::from("Pune"),
            latitude: 18.5204,
            longitude: 73.8567,
        }
    }

    struct StubGrid {
        meta: CityMeta,
        samples: Vec<GridSample>,
    }

    #[async_trait]
    impl GridPort for StubGrid {
        fn city(&self) -> &CityMeta {
            &self.meta
        }

        async fn snapshot(&self, _city: &CityId) -> Result<GridSnapshot, PortError> {
            Ok(GridSnapshot {
                window: None,
                samples: self.samples.clone(),
            })
        }
    }

    struct StubAir {
        meta: CityMeta,
        reading: Option<AirQualityReading>,
        fail: bool,
    }

    #[async_trait]
    impl AirQualityPort for StubAir {
        fn city(&self) -> &CityMeta {
            &self.meta
        }

        async fn current(&self, _city: &CityId) -> Result<Option<AirQualityReading>, PortError> {
            if self.fail {
                return Err(PortError::Internal(String::from("feed down")));
            }
            Ok(self.reading)
        }
    }

    fn samples() -> Vec<GridSample> {
        vec![
            GridSample {
                latitude: 18.52,
                longitude: 73.85,
                surface_temp: Some(30.0),
                vegetation_index: Some(0.5),
                built_up_index: Some(0.2),
                no2_column: None,
            },
            GridSample {
                latitude: 18.53,
                longitude: 73.86,
                surface_temp: Some(34.0),
                vegetation_index: Some(0.1),
                built_up_index: Some(0.6),
                no2_column: Some(1.2e-4),
            },
        ]
    }

    fn service(reading: Option<AirQualityReading>, fail_air: bool) -> SwelterService {
        let plugin = CityPlugin {
            meta: meta(),
            grid_port: Arc::new(StubGrid {
                meta: meta(),
                samples: samples(),
            }),
            air_quality_port: Arc::new(StubAir {
                meta: meta(),
                reading,
                fail: fail_air,
            }),
        };
        let registry = Arc::new(PluginRegistry::new(vec![plugin]));
        SwelterService::new(registry, AnalysisConfig::default()).expect("default config is valid")
    }

    fn plan() -> MitigationPlan {
        MitigationPlan {
            green_cover_pct: 20.0,
            cool_roof: true,
            green_roof: false,
            water_bodies: false,
            cool_pavement: false,
            budget_cap: 5.0,
        }
    }

    #[tokio::test]
    async fn runs_the_full_pipeline() {
        let reading = AirQualityReading {
            aqi: 160.0,
            pm25: 70.0,
        };
        let service = service(Some(reading), false);

        let analysis = service
            .analyze(CityId(String::from("pune")), &plan(), AllocationOrder::Declaration)
            .await
            .expect("analysis succeeds");

        assert_eq!(analysis.cells.len(), 2);
        assert!(analysis.cells.iter().all(|cell| cell.outcome.is_some()));
        assert_eq!(
            analysis.selection.chosen,
            vec![InterventionId::GreenCover10, InterventionId::CoolRoof]
        );
        assert!((analysis.selection.used_budget - 3.0).abs() < 1e-12);
        assert_eq!(analysis.summary.cell_count, 2);
        assert!(analysis.summary.air_quality.is_some());
    }

    #[tokio::test]
    async fn air_quality_failure_degrades_to_no_reading() {
        let service = service(None, true);

        let analysis = service
            .analyze(CityId(String::from("pune")), &plan(), AllocationOrder::Declaration)
            .await
            .expect("analysis still succeeds");

        assert!(analysis.summary.air_quality.is_none());
        assert!(
            analysis
                .cells
                .iter()
                .all(|cell| cell.pollution_level == PollutionLevel::Unknown)
        );
    }

    #[tokio::test]
    async fn unknown_city_is_rejected() {
        let service = service(None, false);

        let result = service
            .analyze(
                CityId(String::from("atlantis")),
                &plan(),
                AllocationOrder::Declaration,
            )
            .await;

        assert!(matches!(
            result,
            Err(AnalysisError::Port(PortError::UnsupportedCity))
        ));
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let registry = Arc::new(PluginRegistry::new(Vec::new()));
        let mut config = AnalysisConfig::default();
        config.weights.temperature = 0.9;

        assert!(SwelterService::new(registry, config).is_err());
    }
}
