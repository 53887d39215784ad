//! Core types and analysis pipeline for the swelter urban heat analyzer.

/// Budget-constrained selection of cooling interventions.
pub mod budget;
/// Analysis configuration: weights, thresholds, and the intervention cost model.
pub mod config;
/// Domain models and identifiers shared by all providers.
pub mod model;
/// Registry and helpers for plugging city data sources into the service.
pub mod plugin;
/// Traits describing the data-source interfaces.
pub mod ports;
/// Heat, health, and pollution risk scoring over a grid snapshot.
pub mod risk;
/// High-level service facade used by clients.
pub mod service;
/// Post-intervention temperature simulation.
pub mod simulate;
/// City-level reporting aggregates.
pub mod summary;

pub use budget::*;
pub use config::*;
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use risk::*;
pub use service::*;
pub use simulate::*;
pub use summary::*;
