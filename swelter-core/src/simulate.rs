//! Post-intervention temperature simulation.
//!
//! Planning-level estimates: every enabled measure subtracts a fixed
//! city-wide offset uniformly from each cell, with no interaction or
//! diminishing-returns term.

use crate::config::{AnalysisConfig, SimulationParams};
use crate::model::{GridCell, MitigationPlan, SdgImpact, SimulatedOutcome};

/// Total uniform cooling of a plan, °C.
///
/// Green cover contributes proportionally to the requested increase; a
/// negative request is treated as zero.
#[must_use]
pub fn total_reduction(plan: &MitigationPlan, params: &SimulationParams) -> f64 {
    let mut reduction = plan.green_cover_pct.max(0.0) * params.green_cover_rate;
    if plan.cool_roof {
        reduction += params.cool_roof_offset;
    }
    if plan.green_roof {
        reduction += params.green_roof_offset;
    }
    if plan.water_bodies {
        reduction += params.water_body_offset;
    }
    if plan.cool_pavement {
        reduction += params.cool_pavement_offset;
    }
    reduction
}

/// Bucket a projected temperature reduction against the SDG thresholds.
///
/// Both boundaries are inclusive: a reduction exactly at a threshold counts
/// as the higher bucket.
#[must_use]
pub fn classify_sdg(temp_change: f64, params: &SimulationParams) -> SdgImpact {
    if temp_change >= params.sdg_high_impact {
        SdgImpact::High
    } else if temp_change >= params.sdg_moderate_impact {
        SdgImpact::Moderate
    } else {
        SdgImpact::Low
    }
}

/// Apply a mitigation plan to scored cells, filling in their outcomes.
///
/// The simulated temperature is clamped at the configured floor, but the
/// floor never raises a cell above its measured temperature: a cell that
/// already sits below the floor keeps its measured value and records zero
/// change. Enabling an additional measure therefore never increases any
/// cell's simulated temperature.
#[must_use]
pub fn apply_plan(
    mut cells: Vec<GridCell>,
    plan: &MitigationPlan,
    config: &AnalysisConfig,
) -> Vec<GridCell> {
    let reduction = total_reduction(plan, &config.simulation);

    for cell in &mut cells {
        let floor = config.simulation.temperature_floor.min(cell.surface_temp);
        let temp_after = (cell.surface_temp - reduction).max(floor);
        let temp_change = cell.surface_temp - temp_after;
        cell.outcome = Some(SimulatedOutcome {
            temp_after,
            temp_change,
            sdg_impact: classify_sdg(temp_change, &config.simulation),
        });
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AirQualityReading, GridSample};
    use crate::risk::score_grid;

    fn scored_cells(temps: &[f64]) -> Vec<GridCell> {
        let samples: Vec<GridSample> = temps
            .iter()
            .map(|&surface_temp| GridSample {
                latitude: 19.07,
                longitude: 72.87,
                surface_temp: Some(surface_temp),
                vegetation_index: Some(0.3),
                built_up_index: Some(0.4),
                no2_column: None,
            })
            .collect();
        let reading = AirQualityReading {
            aqi: 90.0,
            pm25: 40.0,
        };
        score_grid(&samples, Some(&reading), &AnalysisConfig::default()).expect("non-empty grid")
    }

    fn plan_with(green_cover_pct: f64) -> MitigationPlan {
        MitigationPlan {
            green_cover_pct,
            cool_roof: false,
            green_roof: false,
            water_bodies: false,
            cool_pavement: false,
            budget_cap: 5.0,
        }
    }

    #[test]
    fn green_cover_only_scales_with_percentage() {
        let config = AnalysisConfig::default();
        let cells = apply_plan(scored_cells(&[30.0, 32.0, 34.0]), &plan_with(20.0), &config);

        for cell in &cells {
            let outcome = cell.outcome.expect("simulated");
            assert!((outcome.temp_after - (cell.surface_temp - 1.6)).abs() < 1e-12);
            assert!((outcome.temp_change - 1.6).abs() < 1e-12);
        }
    }

    #[test]
    fn all_measures_stack_additively() {
        let config = AnalysisConfig::default();
        let plan = MitigationPlan {
            green_cover_pct: 20.0,
            cool_roof: true,
            green_roof: true,
            water_bodies: true,
            cool_pavement: true,
            budget_cap: 10.0,
        };

        // 1.6 + 1.2 + 0.6 + 1.0 + 0.7
        assert!((total_reduction(&plan, &config.simulation) - 5.1).abs() < 1e-12);
    }

    #[test]
    fn enabling_a_measure_never_raises_any_cell() {
        let config = AnalysisConfig::default();
        let base_cells = scored_cells(&[28.0, 31.0, 35.5]);

        let mut plan = plan_with(15.0);
        let mut previous = apply_plan(base_cells.clone(), &plan, &config);

        let toggles: [fn(&mut MitigationPlan); 4] = [
            |current| current.cool_roof = true,
            |current| current.green_roof = true,
            |current| current.water_bodies = true,
            |current| current.cool_pavement = true,
        ];

        for toggle in toggles {
            toggle(&mut plan);
            let next = apply_plan(base_cells.clone(), &plan, &config);
            for (before, after) in previous.iter().zip(&next) {
                let before_temp = before.outcome.expect("simulated").temp_after;
                let after_temp = after.outcome.expect("simulated").temp_after;
                assert!(after_temp <= before_temp);
            }
            previous = next;
        }
    }

    #[test]
    fn floor_caps_stacked_measures() {
        let config = AnalysisConfig::default();
        let plan = MitigationPlan {
            green_cover_pct: 50.0,
            cool_roof: true,
            green_roof: true,
            water_bodies: true,
            cool_pavement: true,
            budget_cap: 10.0,
        };

        let cells = apply_plan(scored_cells(&[1.0, 30.0]), &plan, &config);
        let cold = cells.first().expect("two cells").outcome.expect("simulated");
        assert!((cold.temp_after - config.simulation.temperature_floor).abs() < 1e-12);
        assert!((cold.temp_change - 1.0).abs() < 1e-12);
    }

    #[test]
    fn floor_never_raises_a_cell_above_its_measurement() {
        let mut config = AnalysisConfig::default();
        config.simulation.temperature_floor = 10.0;
        let cells = apply_plan(scored_cells(&[5.0, 30.0]), &plan_with(20.0), &config);

        let already_cold = cells.first().expect("two cells").outcome.expect("simulated");
        assert!((already_cold.temp_after - 5.0).abs() < 1e-12);
        assert!(already_cold.temp_change.abs() < 1e-12);
    }

    #[test]
    fn sdg_thresholds_are_inclusive() {
        let params = SimulationParams::default();
        assert_eq!(classify_sdg(1.5, &params), SdgImpact::High);
        assert_eq!(classify_sdg(1.49, &params), SdgImpact::Moderate);
        assert_eq!(classify_sdg(0.7, &params), SdgImpact::Moderate);
        assert_eq!(classify_sdg(0.69, &params), SdgImpact::Low);
        assert_eq!(classify_sdg(0.0, &params), SdgImpact::Low);
    }

    #[test]
    fn empty_plan_changes_nothing() {
        let config = AnalysisConfig::default();
        let cells = apply_plan(scored_cells(&[30.0, 32.0]), &plan_with(0.0), &config);

        for cell in &cells {
            let outcome = cell.outcome.expect("simulated");
            assert_eq!(outcome.temp_after.to_bits(), cell.surface_temp.to_bits());
            assert_eq!(outcome.sdg_impact, SdgImpact::Low);
        }
    }
}
