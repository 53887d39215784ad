//! City-level reporting aggregates.

use crate::model::{
    AirQualityReading, AirQualitySummary, AqiCategory, CitySummary, GridCell, RiskLevel,
};

/// Condense a scored grid into the headline numbers reports lead with.
///
/// `mean_temp_change` is only present once every cell carries a simulated
/// outcome. An empty cell list yields a zeroed summary.
#[must_use]
pub fn summarize(cells: &[GridCell], air_quality: Option<&AirQualityReading>) -> CitySummary {
    let cell_count = cells.len();
    let divisor = cell_count.max(1) as f64;

    let mean_surface_temp = cells.iter().map(|cell| cell.surface_temp).sum::<f64>() / divisor;

    let high_risk = cells
        .iter()
        .filter(|cell| cell.risk_level == RiskLevel::High)
        .count();
    let high_risk_share = high_risk as f64 / divisor;

    let mean_temp_change = cells
        .iter()
        .map(|cell| cell.outcome.map(|outcome| outcome.temp_change))
        .collect::<Option<Vec<f64>>>()
        .filter(|changes| !changes.is_empty())
        .map(|changes| changes.iter().sum::<f64>() / divisor);

    let air_quality = air_quality.map(|reading| AirQualitySummary {
        reading: *reading,
        category: AqiCategory::from_aqi(reading.aqi),
    });

    CitySummary {
        cell_count,
        mean_surface_temp,
        high_risk_share,
        mean_temp_change,
        air_quality,
    }
}
