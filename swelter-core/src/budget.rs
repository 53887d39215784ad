//! Budget-constrained selection of cooling interventions.
//!
//! The allocator is first-fit greedy, not a knapsack solver: candidates are
//! visited in a fixed order and committed whenever they still fit under the
//! cap. A cheaper, higher-impact candidate later in the order can lose out
//! to an earlier one. That trade of optimality for determinism is part of
//! the contract; the iteration order is the only pluggable piece.

use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, InterventionOption};
use crate::model::{InterventionSelection, MitigationPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Order in which the allocator visits enabled candidates.
pub enum AllocationOrder {
    /// Cost-model declaration order. The behavior of record.
    #[default]
    Declaration,
    /// Descending expected cooling per unit cost, ties kept in declaration
    /// order so runs stay deterministic.
    ImpactPerCost,
}

/// Select the interventions that fit under the plan's budget cap.
///
/// Visits the enabled cost-model candidates in the given order; a candidate
/// that no longer fits is skipped and scanning continues, so a later,
/// cheaper candidate can still be committed. A candidate whose cost alone
/// exceeds the cap is simply never selected. Never fails: a zero or
/// negative cap yields an empty selection.
#[must_use]
pub fn allocate(
    plan: &MitigationPlan,
    config: &AnalysisConfig,
    order: AllocationOrder,
) -> InterventionSelection {
    let mut candidates: Vec<&InterventionOption> = config
        .cost_model
        .iter()
        .filter(|option| plan.enables(option.id))
        .collect();

    if order == AllocationOrder::ImpactPerCost {
        // Stable sort: equal ratios keep their declaration order.
        candidates.sort_by(|lhs, rhs| {
            let lhs_ratio = lhs.impact / lhs.cost;
            let rhs_ratio = rhs.impact / rhs.cost;
            rhs_ratio.total_cmp(&lhs_ratio)
        });
    }

    let mut selection = InterventionSelection {
        chosen: Vec::new(),
        used_budget: 0.0,
        total_impact: 0.0,
    };

    for option in candidates {
        if selection.used_budget + option.cost <= plan.budget_cap {
            selection.used_budget += option.cost;
            selection.total_impact += option.impact;
            selection.chosen.push(option.id);
        }
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InterventionId;

    fn plan_all_enabled(budget_cap: f64) -> MitigationPlan {
        MitigationPlan {
            green_cover_pct: 10.0,
            cool_roof: true,
            green_roof: true,
            water_bodies: true,
            cool_pavement: true,
            budget_cap,
        }
    }

    fn option(id: InterventionId, cost: f64, impact: f64) -> InterventionOption {
        InterventionOption {
            id,
            label: id.to_string(),
            cost,
            impact,
        }
    }

    #[test]
    fn first_fit_commits_the_first_candidate_that_fits() {
        let mut config = AnalysisConfig::default();
        config.cost_model = vec![
            option(InterventionId::GreenCover10, 1.2, 0.8),
            option(InterventionId::CoolRoof, 1.8, 1.2),
            option(InterventionId::GreenRoof, 2.0, 0.6),
        ];

        let selection = allocate(
            &plan_all_enabled(2.0),
            &config,
            AllocationOrder::Declaration,
        );

        assert_eq!(selection.chosen, vec![InterventionId::GreenCover10]);
        assert!((selection.used_budget - 1.2).abs() < 1e-12);
        assert!((selection.total_impact - 0.8).abs() < 1e-12);
    }

    #[test]
    fn skipping_a_candidate_does_not_stop_the_scan() {
        let mut config = AnalysisConfig::default();
        config.cost_model = vec![
            option(InterventionId::WaterBodies, 4.0, 1.0),
            option(InterventionId::CoolPavement, 1.5, 0.7),
        ];

        let selection = allocate(
            &plan_all_enabled(2.0),
            &config,
            AllocationOrder::Declaration,
        );

        assert_eq!(selection.chosen, vec![InterventionId::CoolPavement]);
        assert!((selection.used_budget - 1.5).abs() < 1e-12);
    }

    #[test]
    fn declaration_order_beats_cost_order() {
        let config = AnalysisConfig::default();
        let selection = allocate(
            &plan_all_enabled(3.5),
            &config,
            AllocationOrder::Declaration,
        );

        // Green cover (1.2) then cool roofs (1.8) exhaust the cap before
        // the cheaper cool pavement entry is reached.
        assert_eq!(
            selection.chosen,
            vec![InterventionId::GreenCover10, InterventionId::CoolRoof]
        );
        assert!((selection.used_budget - 3.0).abs() < 1e-12);
        assert!((selection.total_impact - 2.0).abs() < 1e-12);
    }

    #[test]
    fn impact_per_cost_reorders_candidates() {
        let mut config = AnalysisConfig::default();
        config.cost_model = vec![
            option(InterventionId::GreenRoof, 2.0, 0.2),
            option(InterventionId::CoolRoof, 2.0, 1.0),
        ];
        let plan = plan_all_enabled(2.0);

        let declaration = allocate(&plan, &config, AllocationOrder::Declaration);
        assert_eq!(declaration.chosen, vec![InterventionId::GreenRoof]);

        let ranked = allocate(&plan, &config, AllocationOrder::ImpactPerCost);
        assert_eq!(ranked.chosen, vec![InterventionId::CoolRoof]);
    }

    #[test]
    fn used_budget_never_exceeds_the_cap() {
        let config = AnalysisConfig::default();
        for cap in [0.0, 0.5, 1.2, 2.9, 5.0, 7.3, 100.0] {
            let selection = allocate(&plan_all_enabled(cap), &config, AllocationOrder::Declaration);
            assert!(selection.used_budget <= cap);

            let recomputed: f64 = selection
                .chosen
                .iter()
                .map(|id| {
                    config
                        .cost_model
                        .iter()
                        .find(|entry| entry.id == *id)
                        .map_or(0.0, |entry| entry.cost)
                })
                .sum();
            assert!((selection.used_budget - recomputed).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_or_negative_cap_selects_nothing() {
        let config = AnalysisConfig::default();
        for cap in [0.0, -1.0] {
            let selection = allocate(&plan_all_enabled(cap), &config, AllocationOrder::Declaration);
            assert!(selection.chosen.is_empty());
            assert!(selection.used_budget.abs() < 1e-12);
            assert!(selection.total_impact.abs() < 1e-12);
        }
    }

    #[test]
    fn disabled_measures_are_not_candidates() {
        let config = AnalysisConfig::default();
        let plan = MitigationPlan {
            green_cover_pct: 5.0, // below the ten-point threshold
            cool_roof: false,
            green_roof: true,
            water_bodies: false,
            cool_pavement: false,
            budget_cap: 10.0,
        };

        let selection = allocate(&plan, &config, AllocationOrder::Declaration);
        assert_eq!(selection.chosen, vec![InterventionId::GreenRoof]);
    }
}
