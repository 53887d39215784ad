//! Heat, health, and pollution risk scoring over one grid snapshot.

use crate::config::{AnalysisConfig, PollutionBands, RiskThresholds};
use crate::model::{
    AirQualityReading, GridCell, GridSample, HealthRiskLevel, PollutionLevel, RiskLevel,
};

#[derive(thiserror::Error, Debug)]
/// Errors produced by the scoring engine.
pub enum ScoreError {
    /// Every row was missing a required band.
    #[error("No grid cells with complete temperature, vegetation, and built-up bands")]
    EmptyGrid,
}

/// Bucket a composite heat risk score.
///
/// Boundaries are strict-greater: a score exactly on a threshold classifies
/// into the lower bucket.
#[must_use]
pub fn classify_heat_risk(score: f64, thresholds: &RiskThresholds) -> RiskLevel {
    if score > thresholds.high_risk {
        RiskLevel::High
    } else if score > thresholds.moderate_risk {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Bucket a composite health risk score.
#[must_use]
pub fn classify_health_risk(score: f64, thresholds: &RiskThresholds) -> HealthRiskLevel {
    if score > thresholds.severe_health {
        HealthRiskLevel::Severe
    } else if score > thresholds.high_health {
        HealthRiskLevel::High
    } else if score > thresholds.moderate_health {
        HealthRiskLevel::Moderate
    } else {
        HealthRiskLevel::Low
    }
}

/// Bucket the city-wide PM2.5 reading, `Unknown` when there is none.
#[must_use]
pub fn classify_pm25(pm25: Option<f64>, bands: &PollutionBands) -> PollutionLevel {
    match pm25 {
        None => PollutionLevel::Unknown,
        Some(value) if value <= bands.low_max => PollutionLevel::Low,
        Some(value) if value <= bands.moderate_max => PollutionLevel::Moderate,
        Some(_) => PollutionLevel::High,
    }
}

/// Score a raw snapshot into fully derived grid cells.
///
/// Rows missing surface temperature, vegetation index, or built-up index are
/// dropped, never imputed. The pollution term comes from the single
/// city-wide reading; without one it contributes zero. Pure function of its
/// arguments: identical input and configuration reproduce identical output.
///
/// # Errors
///
/// Returns [`ScoreError::EmptyGrid`] when no row survives filtering.
pub fn score_grid(
    samples: &[GridSample],
    air_quality: Option<&AirQualityReading>,
    config: &AnalysisConfig,
) -> Result<Vec<GridCell>, ScoreError> {
    let complete: Vec<(&GridSample, f64, f64, f64)> = samples
        .iter()
        .filter_map(|sample| {
            let surface_temp = sample.surface_temp?;
            let vegetation = sample.vegetation_index?;
            let built_up = sample.built_up_index?;
            Some((sample, surface_temp, vegetation, built_up))
        })
        .collect();

    if complete.is_empty() {
        return Err(ScoreError::EmptyGrid);
    }

    let min_temp = complete
        .iter()
        .map(|(_, surface_temp, _, _)| *surface_temp)
        .fold(f64::INFINITY, f64::min);
    let max_temp = complete
        .iter()
        .map(|(_, surface_temp, _, _)| *surface_temp)
        .fold(f64::NEG_INFINITY, f64::max);
    let temp_range = max_temp - min_temp;

    let pm25 = air_quality.map(|reading| reading.pm25);
    let pollution_norm = pm25.map_or(0.0, |value| {
        (value / config.pollution.norm_ceiling).min(1.0)
    });
    let pollution_level = classify_pm25(pm25, &config.pollution);

    let cells = complete
        .into_iter()
        .map(|(sample, surface_temp, vegetation, built_up)| {
            // Degenerate snapshot: every cell at the same temperature
            // normalizes to zero instead of dividing by zero.
            let temp_norm = if temp_range > 0.0 {
                (surface_temp - min_temp) / temp_range
            } else {
                0.0
            };
            let ndvi_norm = 1.0 - vegetation;
            let ndbi_norm = built_up;

            let heat_risk = config.weights.temperature * temp_norm
                + config.weights.built_up * ndbi_norm
                + config.weights.vegetation_deficit * ndvi_norm;

            let health_risk = config.health_weights.heat * heat_risk
                + config.health_weights.pollution * pollution_norm;

            GridCell {
                latitude: sample.latitude,
                longitude: sample.longitude,
                surface_temp,
                vegetation_index: vegetation,
                built_up_index: built_up,
                no2_column: sample.no2_column,
                temp_norm,
                ndvi_norm,
                ndbi_norm,
                heat_risk,
                risk_level: classify_heat_risk(heat_risk, &config.thresholds),
                health_risk,
                health_risk_level: classify_health_risk(health_risk, &config.thresholds),
                pollution_level,
                outcome: None,
            }
        })
        .collect();

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(
        surface_temp: Option<f64>,
        vegetation_index: Option<f64>,
        built_up_index: Option<f64>,
    ) -> GridSample {
        GridSample {
            latitude: 18.52,
            longitude: 73.85,
            surface_temp,
            vegetation_index,
            built_up_index,
            no2_column: None,
        }
    }

    fn three_cell_grid() -> Vec<GridSample> {
        vec![
            sample(Some(30.0), Some(0.5), Some(0.2)),
            sample(Some(32.0), Some(0.3), Some(0.4)),
            sample(Some(34.0), Some(0.1), Some(0.6)),
        ]
    }

    #[test]
    fn scores_reference_grid() {
        let config = AnalysisConfig::default();
        let cells = score_grid(&three_cell_grid(), None, &config).expect("non-empty grid");

        assert_eq!(cells.len(), 3);
        let norms: Vec<f64> = cells.iter().map(|cell| cell.temp_norm).collect();
        assert_eq!(norms, vec![0.0, 0.5, 1.0]);

        let hottest = cells.last().expect("three cells");
        assert!((hottest.heat_risk - 0.86).abs() < 1e-12);
        assert_eq!(hottest.risk_level, RiskLevel::High);
    }

    #[test]
    fn derived_scores_stay_in_unit_interval() {
        let config = AnalysisConfig::default();
        let reading = AirQualityReading {
            aqi: 180.0,
            pm25: 95.0,
        };
        let cells = score_grid(&three_cell_grid(), Some(&reading), &config).expect("non-empty");

        for cell in &cells {
            for score in [
                cell.temp_norm,
                cell.ndvi_norm,
                cell.ndbi_norm,
                cell.heat_risk,
                cell.health_risk,
            ] {
                assert!((0.0..=1.0).contains(&score), "score out of range: {score}");
            }
        }
    }

    #[test]
    fn drops_rows_missing_required_bands() {
        let config = AnalysisConfig::default();
        let mut samples = three_cell_grid();
        samples.push(sample(None, Some(0.2), Some(0.1)));
        samples.push(sample(Some(31.0), None, Some(0.1)));
        samples.push(sample(Some(31.0), Some(0.2), None));

        let cells = score_grid(&samples, None, &config).expect("non-empty");
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn empty_grid_is_an_error() {
        let config = AnalysisConfig::default();
        let samples = vec![sample(None, None, None)];
        assert!(matches!(
            score_grid(&samples, None, &config),
            Err(ScoreError::EmptyGrid)
        ));
        assert!(matches!(
            score_grid(&[], None, &config),
            Err(ScoreError::EmptyGrid)
        ));
    }

    #[test]
    fn uniform_temperature_normalizes_to_zero() {
        let config = AnalysisConfig::default();
        let samples = vec![
            sample(Some(31.0), Some(0.5), Some(0.2)),
            sample(Some(31.0), Some(0.3), Some(0.4)),
        ];
        let cells = score_grid(&samples, None, &config).expect("non-empty");
        assert!(cells.iter().all(|cell| cell.temp_norm == 0.0));
        assert!(cells.iter().all(|cell| cell.heat_risk.is_finite()));
    }

    #[test]
    fn heat_boundaries_classify_into_lower_bucket() {
        let thresholds = RiskThresholds::default();
        assert_eq!(classify_heat_risk(0.4, &thresholds), RiskLevel::Low);
        assert_eq!(classify_heat_risk(0.41, &thresholds), RiskLevel::Moderate);
        assert_eq!(classify_heat_risk(0.7, &thresholds), RiskLevel::Moderate);
        assert_eq!(classify_heat_risk(0.71, &thresholds), RiskLevel::High);
    }

    #[test]
    fn health_boundaries_classify_into_lower_bucket() {
        let thresholds = RiskThresholds::default();
        assert_eq!(classify_health_risk(0.35, &thresholds), HealthRiskLevel::Low);
        assert_eq!(
            classify_health_risk(0.55, &thresholds),
            HealthRiskLevel::Moderate
        );
        assert_eq!(classify_health_risk(0.75, &thresholds), HealthRiskLevel::High);
        assert_eq!(
            classify_health_risk(0.76, &thresholds),
            HealthRiskLevel::Severe
        );
    }

    #[test]
    fn pollution_term_raises_health_risk() {
        let config = AnalysisConfig::default();
        let reading = AirQualityReading {
            aqi: 320.0,
            pm25: 250.0,
        };

        let without = score_grid(&three_cell_grid(), None, &config).expect("non-empty");
        let with = score_grid(&three_cell_grid(), Some(&reading), &config).expect("non-empty");

        for (dry, polluted) in without.iter().zip(&with) {
            assert!((polluted.health_risk - dry.health_risk - 0.4).abs() < 1e-12);
        }
        assert!(with.iter().all(|cell| cell.pollution_level == PollutionLevel::High));
        assert!(
            without
                .iter()
                .all(|cell| cell.pollution_level == PollutionLevel::Unknown)
        );
    }

    #[test]
    fn pollution_norm_is_capped_at_one() {
        let config = AnalysisConfig::default();
        let extreme = AirQualityReading {
            aqi: 500.0,
            pm25: 900.0,
        };
        let capped = AirQualityReading {
            aqi: 320.0,
            pm25: 250.0,
        };

        let extreme_cells =
            score_grid(&three_cell_grid(), Some(&extreme), &config).expect("non-empty");
        let capped_cells =
            score_grid(&three_cell_grid(), Some(&capped), &config).expect("non-empty");

        for (lhs, rhs) in extreme_cells.iter().zip(&capped_cells) {
            assert_eq!(lhs.health_risk.to_bits(), rhs.health_risk.to_bits());
        }
    }

    #[test]
    fn pm25_bands_include_their_upper_bound() {
        let bands = PollutionBands::default();
        assert_eq!(classify_pm25(None, &bands), PollutionLevel::Unknown);
        assert_eq!(classify_pm25(Some(30.0), &bands), PollutionLevel::Low);
        assert_eq!(classify_pm25(Some(60.0), &bands), PollutionLevel::Moderate);
        assert_eq!(classify_pm25(Some(60.1), &bands), PollutionLevel::High);
    }

    #[test]
    fn scoring_is_deterministic() {
        let config = AnalysisConfig::default();
        let reading = AirQualityReading {
            aqi: 140.0,
            pm25: 55.0,
        };

        let first = score_grid(&three_cell_grid(), Some(&reading), &config).expect("non-empty");
        let second = score_grid(&three_cell_grid(), Some(&reading), &config).expect("non-empty");

        for (lhs, rhs) in first.iter().zip(&second) {
            assert_eq!(lhs.heat_risk.to_bits(), rhs.heat_risk.to_bits());
            assert_eq!(lhs.health_risk.to_bits(), rhs.health_risk.to_bits());
            assert_eq!(lhs.temp_norm.to_bits(), rhs.temp_norm.to_bits());
        }
    }
}
