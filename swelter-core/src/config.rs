//! Analysis configuration: weights, thresholds, simulation constants, and
//! the intervention cost model.
//!
//! Every component of the pipeline takes an [`AnalysisConfig`] explicitly
//! instead of reading module-level constants, so tests and deployments can
//! override single values. A config is validated once, before any analysis
//! runs; a config that fails validation never reaches the pipeline.

use serde::{Deserialize, Serialize};

use crate::model::InterventionId;

/// Tolerance when checking that weight groups sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(thiserror::Error, Debug)]
/// Violations of the configuration invariants, fatal at load time.
pub enum ConfigError {
    /// The override file was not valid TOML.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    /// The heat risk weights do not sum to 1.0.
    #[error("Heat risk weights sum to {sum}, expected 1.0")]
    WeightSum {
        /// Actual sum of the three weights.
        sum: f64,
    },
    /// The health risk weights do not sum to 1.0.
    #[error("Health risk weights sum to {sum}, expected 1.0")]
    HealthWeightSum {
        /// Actual sum of the two weights.
        sum: f64,
    },
    /// A weight or threshold fell outside the unit interval.
    #[error("{name} must lie in [0, 1], got {value}")]
    UnitRange {
        /// Name of the offending field.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A rate or offset that must be non-negative was negative.
    #[error("{name} must be non-negative, got {value}")]
    Negative {
        /// Name of the offending field.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A scale that must be strictly positive was zero or negative.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A threshold pair is ordered the wrong way round.
    #[error("Thresholds out of order: {0}")]
    ThresholdOrder(&'static str),
    /// A cost model entry carries a negative cost.
    #[error("Negative cost for {id}: {cost}")]
    NegativeCost {
        /// Offending intervention.
        id: InterventionId,
        /// Offending cost.
        cost: f64,
    },
    /// A cost model entry carries a negative impact.
    #[error("Negative impact for {id}: {impact}")]
    NegativeImpact {
        /// Offending intervention.
        id: InterventionId,
        /// Offending impact.
        impact: f64,
    },
    /// The same intervention appears twice in the cost model.
    #[error("Duplicate cost model entry: {0}")]
    DuplicateIntervention(InterventionId),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
/// Blend weights for the composite heat risk score. Must sum to 1.0.
pub struct RiskWeights {
    /// Weight of the normalized surface temperature.
    pub temperature: f64,
    /// Weight of the built-up index.
    pub built_up: f64,
    /// Weight of the vegetation deficit.
    pub vegetation_deficit: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            built_up: 0.3,
            vegetation_deficit: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
/// Blend weights for the composite health risk score. Must sum to 1.0.
pub struct HealthWeights {
    /// Weight of the composite heat risk.
    pub heat: f64,
    /// Weight of the normalized ground pollution.
    pub pollution: f64,
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            heat: 0.6,
            pollution: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
/// Classification boundaries for the discrete risk buckets.
///
/// All boundaries are strict-greater: a score exactly on a boundary falls
/// into the lower bucket.
pub struct RiskThresholds {
    /// Heat risk above this is High.
    pub high_risk: f64,
    /// Heat risk above this is Moderate.
    pub moderate_risk: f64,
    /// Health risk above this is Severe.
    pub severe_health: f64,
    /// Health risk above this is High.
    pub high_health: f64,
    /// Health risk above this is Moderate.
    pub moderate_health: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_risk: 0.7,
            moderate_risk: 0.4,
            severe_health: 0.75,
            high_health: 0.55,
            moderate_health: 0.35,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
/// Scaling and banding of the city-wide PM2.5 reading.
pub struct PollutionBands {
    /// PM2.5 value that maps to a normalized pollution of 1.0, µg/m³.
    pub norm_ceiling: f64,
    /// PM2.5 at or below this is Low, µg/m³.
    pub low_max: f64,
    /// PM2.5 at or below this is Moderate, µg/m³.
    pub moderate_max: f64,
}

impl Default for PollutionBands {
    fn default() -> Self {
        Self {
            norm_ceiling: 250.0,
            low_max: 30.0,
            moderate_max: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
/// Planning-level cooling estimates for the simulation model.
pub struct SimulationParams {
    /// Cooling per percentage point of added green cover, °C.
    pub green_cover_rate: f64,
    /// Uniform cooling from reflective roofing, °C.
    pub cool_roof_offset: f64,
    /// Uniform cooling from vegetated roofs, °C.
    pub green_roof_offset: f64,
    /// Uniform cooling from restored water bodies, °C.
    pub water_body_offset: f64,
    /// Uniform cooling from cool pavements, °C.
    pub cool_pavement_offset: f64,
    /// Lower clamp on the simulated temperature, °C. Stacked measures are
    /// additive with no diminishing-returns term, so the floor keeps the
    /// projection physically plausible.
    pub temperature_floor: f64,
    /// Temperature reduction that counts as high SDG impact, °C.
    pub sdg_high_impact: f64,
    /// Temperature reduction that counts as moderate SDG impact, °C.
    pub sdg_moderate_impact: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            // 10 points of green cover ≈ 0.8 °C
            green_cover_rate: 0.08,
            cool_roof_offset: 1.2,
            green_roof_offset: 0.6,
            water_body_offset: 1.0,
            cool_pavement_offset: 0.7,
            temperature_floor: 0.0,
            sdg_high_impact: 1.5,
            sdg_moderate_impact: 0.7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One candidate measure in the cost model.
pub struct InterventionOption {
    /// Intervention this entry prices.
    pub id: InterventionId,
    /// Human-friendly label for reports.
    pub label: String,
    /// Unit cost, ₹ crore.
    pub cost: f64,
    /// Expected cooling contribution, °C.
    pub impact: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
/// Immutable configuration for one analysis process.
pub struct AnalysisConfig {
    /// Heat risk blend weights.
    pub weights: RiskWeights,
    /// Health risk blend weights.
    pub health_weights: HealthWeights,
    /// Discrete bucket boundaries.
    pub thresholds: RiskThresholds,
    /// PM2.5 scaling and banding.
    pub pollution: PollutionBands,
    /// Cooling simulation constants.
    pub simulation: SimulationParams,
    /// Priced intervention candidates. Declaration order here is the
    /// allocator's default iteration order, so this stays a list.
    pub cost_model: Vec<InterventionOption>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            weights: RiskWeights::default(),
            health_weights: HealthWeights::default(),
            thresholds: RiskThresholds::default(),
            pollution: PollutionBands::default(),
            simulation: SimulationParams::default(),
            cost_model: default_cost_model(),
        }
    }
}

/// The cost model of record, calibrated against Indian urban cooling
/// programmes (urban forestry, cool roof pilots in Ahmedabad and Hyderabad,
/// lake rejuvenation, shaded corridors).
#[must_use]
pub fn default_cost_model() -> Vec<InterventionOption> {
    vec![
        InterventionOption {
            id: InterventionId::GreenCover10,
            label: String::from("Green cover expansion (+10 pts)"),
            cost: 1.2,
            impact: 0.8,
        },
        InterventionOption {
            id: InterventionId::CoolRoof,
            label: String::from("Cool roofs"),
            cost: 1.8,
            impact: 1.2,
        },
        InterventionOption {
            id: InterventionId::GreenRoof,
            label: String::from("Green roofs on public buildings"),
            cost: 2.0,
            impact: 0.6,
        },
        InterventionOption {
            id: InterventionId::WaterBodies,
            label: String::from("Water body rejuvenation"),
            cost: 4.0,
            impact: 1.0,
        },
        InterventionOption {
            id: InterventionId::CoolPavement,
            label: String::from("Cool pavements and shaded corridors"),
            cost: 1.5,
            impact: 0.7,
        },
    ]
}

impl AnalysisConfig {
    /// Parse a TOML override file and validate the result.
    ///
    /// Absent keys keep their defaults, so a file can override a single
    /// weight or the whole cost model.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the TOML is malformed or the merged
    /// configuration violates an invariant.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every configuration invariant.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_fields = [
            ("weights.temperature", self.weights.temperature),
            ("weights.built_up", self.weights.built_up),
            ("weights.vegetation_deficit", self.weights.vegetation_deficit),
            ("health_weights.heat", self.health_weights.heat),
            ("health_weights.pollution", self.health_weights.pollution),
            ("thresholds.high_risk", self.thresholds.high_risk),
            ("thresholds.moderate_risk", self.thresholds.moderate_risk),
            ("thresholds.severe_health", self.thresholds.severe_health),
            ("thresholds.high_health", self.thresholds.high_health),
            ("thresholds.moderate_health", self.thresholds.moderate_health),
        ];
        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::UnitRange { name, value });
            }
        }

        let weight_sum =
            self.weights.temperature + self.weights.built_up + self.weights.vegetation_deficit;
        if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum: weight_sum });
        }

        let health_sum = self.health_weights.heat + self.health_weights.pollution;
        if (health_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::HealthWeightSum { sum: health_sum });
        }

        if self.thresholds.moderate_risk > self.thresholds.high_risk {
            return Err(ConfigError::ThresholdOrder(
                "moderate_risk above high_risk",
            ));
        }
        if self.thresholds.moderate_health > self.thresholds.high_health
            || self.thresholds.high_health > self.thresholds.severe_health
        {
            return Err(ConfigError::ThresholdOrder(
                "health thresholds must rise from moderate to severe",
            ));
        }

        if self.pollution.norm_ceiling <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "pollution.norm_ceiling",
                value: self.pollution.norm_ceiling,
            });
        }
        if self.pollution.low_max > self.pollution.moderate_max {
            return Err(ConfigError::ThresholdOrder(
                "pollution.low_max above pollution.moderate_max",
            ));
        }

        let rate_fields = [
            ("simulation.green_cover_rate", self.simulation.green_cover_rate),
            ("simulation.cool_roof_offset", self.simulation.cool_roof_offset),
            ("simulation.green_roof_offset", self.simulation.green_roof_offset),
            ("simulation.water_body_offset", self.simulation.water_body_offset),
            (
                "simulation.cool_pavement_offset",
                self.simulation.cool_pavement_offset,
            ),
            ("simulation.sdg_high_impact", self.simulation.sdg_high_impact),
            (
                "simulation.sdg_moderate_impact",
                self.simulation.sdg_moderate_impact,
            ),
        ];
        for (name, value) in rate_fields {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.simulation.sdg_moderate_impact > self.simulation.sdg_high_impact {
            return Err(ConfigError::ThresholdOrder(
                "sdg_moderate_impact above sdg_high_impact",
            ));
        }

        let mut seen: Vec<InterventionId> = Vec::new();
        for option in &self.cost_model {
            if option.cost < 0.0 {
                return Err(ConfigError::NegativeCost {
                    id: option.id,
                    cost: option.cost,
                });
            }
            if option.impact < 0.0 {
                return Err(ConfigError::NegativeImpact {
                    id: option.id,
                    impact: option.impact,
                });
            }
            if seen.contains(&option.id) {
                return Err(ConfigError::DuplicateIntervention(option.id));
            }
            seen.push(option.id);
        }

        Ok(())
    }
}
