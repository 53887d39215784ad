//! Domain data structures for cities, grid cells, and intervention plans.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Built-in cities supported by the application.
pub enum Cities {
    /// Pune, India.
    Pune,
    /// Mumbai, India.
    Mumbai,
    /// Delhi, India.
    Delhi,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a city known to swelter.
pub struct CityId(pub String);

impl fmt::Display for Cities {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            Cities::Pune => "pune",
            Cities::Mumbai => "mumbai",
            Cities::Delhi => "delhi",
        };
        write!(formatter, "{slug}")
    }
}

impl From<Cities> for CityId {
    fn from(city: Cities) -> Self {
        CityId(city.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a city and the centre of its region of interest.
pub struct CityMeta {
    /// Unique identifier.
    pub id: CityId,
    /// Localized display name.
    pub name: String,
    /// Latitude of the region-of-interest centre, degrees north.
    pub latitude: f64,
    /// Longitude of the region-of-interest centre, degrees east.
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// Inclusive date range a grid snapshot was composited over.
pub struct AnalysisWindow {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// One raw row from the grid aggregator, before any validation.
///
/// The aggregator averages satellite bands over a fixed-size tile; a band can
/// come back empty for a tile, so every measurement is optional here. Rows
/// missing a required band are dropped by the scoring engine, never imputed.
pub struct GridSample {
    /// Latitude of the cell centroid, degrees north.
    pub latitude: f64,
    /// Longitude of the cell centroid, degrees east.
    pub longitude: f64,
    /// Land surface temperature, degrees Celsius.
    pub surface_temp: Option<f64>,
    /// Normalized difference vegetation index, roughly [-1, 1].
    pub vegetation_index: Option<f64>,
    /// Normalized difference built-up index, roughly [-1, 1].
    pub built_up_index: Option<f64>,
    /// Tropospheric NO2 column density, mol/m². Carried through for
    /// downstream consumers; the scoring engine does not read it.
    pub no2_column: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Discrete heat risk bucket.
pub enum RiskLevel {
    /// Composite heat risk at or below the moderate threshold.
    Low,
    /// Composite heat risk above the moderate threshold.
    Moderate,
    /// Composite heat risk above the high threshold.
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Discrete combined heat + pollution health risk bucket.
pub enum HealthRiskLevel {
    /// Health risk at or below the moderate threshold.
    Low,
    /// Health risk above the moderate threshold.
    Moderate,
    /// Health risk above the high threshold.
    High,
    /// Health risk above the severe threshold.
    Severe,
}

impl fmt::Display for HealthRiskLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthRiskLevel::Low => "Low",
            HealthRiskLevel::Moderate => "Moderate",
            HealthRiskLevel::High => "High",
            HealthRiskLevel::Severe => "Severe",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Ground-level PM2.5 pollution bucket, derived from the city-wide reading.
pub enum PollutionLevel {
    /// No ground reading was available for the run.
    Unknown,
    /// PM2.5 at or below 30 µg/m³.
    Low,
    /// PM2.5 at or below 60 µg/m³.
    Moderate,
    /// PM2.5 above 60 µg/m³.
    High,
}

impl fmt::Display for PollutionLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PollutionLevel::Unknown => "Unknown",
            PollutionLevel::Low => "Low",
            PollutionLevel::Moderate => "Moderate",
            PollutionLevel::High => "High",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Projected temperature reduction bucketed against SDG-aligned thresholds.
pub enum SdgImpact {
    /// Reduction below the moderate-impact threshold.
    Low,
    /// Reduction of at least the moderate-impact threshold.
    Moderate,
    /// Reduction of at least the high-impact threshold.
    High,
}

impl fmt::Display for SdgImpact {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SdgImpact::Low => "Low",
            SdgImpact::Moderate => "Moderate",
            SdgImpact::High => "High",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// Post-simulation outcome for one cell.
pub struct SimulatedOutcome {
    /// Projected surface temperature after the selected measures, °C.
    pub temp_after: f64,
    /// `surface_temp - temp_after`, °C.
    pub temp_change: f64,
    /// SDG-aligned impact bucket of the temperature change.
    pub sdg_impact: SdgImpact,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// One fully scored grid cell.
///
/// All derived fields are pure functions of the raw snapshot and the analysis
/// configuration; `outcome` is filled in by the cooling simulation and is the
/// only field written after scoring.
pub struct GridCell {
    /// Latitude of the cell centroid, degrees north.
    pub latitude: f64,
    /// Longitude of the cell centroid, degrees east.
    pub longitude: f64,
    /// Land surface temperature, degrees Celsius.
    pub surface_temp: f64,
    /// Normalized difference vegetation index.
    pub vegetation_index: f64,
    /// Normalized difference built-up index.
    pub built_up_index: f64,
    /// Tropospheric NO2 column density, mol/m², when the band was present.
    pub no2_column: Option<f64>,
    /// Min-max normalized surface temperature over the snapshot, [0, 1].
    pub temp_norm: f64,
    /// Vegetation deficit, `1 - vegetation_index`.
    pub ndvi_norm: f64,
    /// Built-up index, passed through unscaled.
    pub ndbi_norm: f64,
    /// Composite heat risk score, [0, 1].
    pub heat_risk: f64,
    /// Discrete heat risk bucket.
    pub risk_level: RiskLevel,
    /// Composite heat + pollution health risk score, [0, 1].
    pub health_risk: f64,
    /// Discrete health risk bucket.
    pub health_risk_level: HealthRiskLevel,
    /// Ground pollution bucket shared by all cells in the run.
    pub pollution_level: PollutionLevel,
    /// Cooling simulation result, present once a plan has been applied.
    pub outcome: Option<SimulatedOutcome>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// City-wide ground air quality reading.
pub struct AirQualityReading {
    /// Composite air quality index reported by the ground network.
    pub aqi: f64,
    /// PM2.5 concentration, µg/m³.
    pub pm25: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Indian AQI banner category for a composite AQI value.
pub enum AqiCategory {
    /// AQI at or below 50.
    Good,
    /// AQI at or below 100.
    Moderate,
    /// AQI at or below 200.
    Poor,
    /// AQI at or below 300.
    VeryPoor,
    /// AQI above 300.
    Severe,
}

impl AqiCategory {
    /// Bucket a composite AQI value.
    #[must_use]
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            AqiCategory::Good
        } else if aqi <= 100.0 {
            AqiCategory::Moderate
        } else if aqi <= 200.0 {
            AqiCategory::Poor
        } else if aqi <= 300.0 {
            AqiCategory::VeryPoor
        } else {
            AqiCategory::Severe
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Candidate cooling measures in the cost model.
pub enum InterventionId {
    /// Expanding urban green cover by at least ten percentage points.
    GreenCover10,
    /// Reflective roofing programmes.
    CoolRoof,
    /// Vegetated roofs on public buildings.
    GreenRoof,
    /// Lake and water body rejuvenation.
    WaterBodies,
    /// Cool pavements and shaded corridors.
    CoolPavement,
}

impl fmt::Display for InterventionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            InterventionId::GreenCover10 => "green_cover_10",
            InterventionId::CoolRoof => "cool_roof",
            InterventionId::GreenRoof => "green_roof",
            InterventionId::WaterBodies => "water_bodies",
            InterventionId::CoolPavement => "cool_pavement",
        };
        write!(formatter, "{slug}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// Requested mitigation measures plus the available budget for one run.
pub struct MitigationPlan {
    /// Targeted increase in green cover, percentage points.
    pub green_cover_pct: f64,
    /// Deploy reflective roofing.
    pub cool_roof: bool,
    /// Deploy vegetated roofs.
    pub green_roof: bool,
    /// Restore water bodies.
    pub water_bodies: bool,
    /// Deploy cool pavements.
    pub cool_pavement: bool,
    /// Available budget, ₹ crore.
    pub budget_cap: f64,
}

impl MitigationPlan {
    /// Whether the plan enables a cost-model candidate.
    ///
    /// The green-cover line item only becomes a candidate once the plan asks
    /// for at least a ten-point increase.
    #[must_use]
    pub fn enables(&self, id: InterventionId) -> bool {
        match id {
            InterventionId::GreenCover10 => self.green_cover_pct >= 10.0,
            InterventionId::CoolRoof => self.cool_roof,
            InterventionId::GreenRoof => self.green_roof,
            InterventionId::WaterBodies => self.water_bodies,
            InterventionId::CoolPavement => self.cool_pavement,
        }
    }
}

impl Default for MitigationPlan {
    fn default() -> Self {
        Self {
            green_cover_pct: 20.0,
            cool_roof: false,
            green_roof: false,
            water_bodies: false,
            cool_pavement: false,
            budget_cap: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Interventions committed by the budget allocator.
pub struct InterventionSelection {
    /// Committed interventions, in commit order.
    pub chosen: Vec<InterventionId>,
    /// Budget consumed by the committed interventions, ₹ crore.
    pub used_budget: f64,
    /// Aggregate expected cooling of the committed interventions, °C.
    pub total_impact: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// City-wide air quality aggregates for reporting.
pub struct AirQualitySummary {
    /// The reading the run was scored against.
    pub reading: AirQualityReading,
    /// Banner category for the AQI value.
    pub category: AqiCategory,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// Headline aggregates handed to reporting consumers.
pub struct CitySummary {
    /// Number of cells that survived row filtering.
    pub cell_count: usize,
    /// Mean surface temperature over the snapshot, °C.
    pub mean_surface_temp: f64,
    /// Share of cells classified as high heat risk, [0, 1].
    pub high_risk_share: f64,
    /// Mean projected temperature reduction, °C, once simulated.
    pub mean_temp_change: Option<f64>,
    /// Ground air quality, when a reading was available.
    pub air_quality: Option<AirQualitySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Everything one analysis run produces.
pub struct CityAnalysis {
    /// The analyzed city.
    pub city: CityMeta,
    /// Snapshot compositing window, when the source reported one.
    pub window: Option<AnalysisWindow>,
    /// Scored and simulated grid cells.
    pub cells: Vec<GridCell>,
    /// Outcome of the budget allocation.
    pub selection: InterventionSelection,
    /// Headline aggregates.
    pub summary: CitySummary,
}
