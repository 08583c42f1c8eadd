//! Fixed-step scenario drivers.
//!
//! Each driver owns one simulated body (and, for descent, its controller),
//! advances it strictly sequentially on a single thread, and records a
//! per-tick telemetry history. The drivers terminate deterministically on
//! ground contact or stage completion plus a settle margin.

pub mod descent;
pub mod transfer;

use thiserror::Error;

/// Longest raw frame delta fed to the integrators. Larger deltas (after a
/// pause or a slow frame) are capped here to bound integration error.
pub const MAX_FRAME_STEP: f64 = 0.1;

/// Cap a raw frame delta before it reaches the physics.
pub fn clamp_step(raw: f64) -> f64 {
    raw.min(MAX_FRAME_STEP)
}

/// Driver-level failures. All variants wrap contract violations surfaced by
/// the core crates or unusable manifest entries.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("maneuver planning failed: {0}")]
    Plan(#[from] orbitfall_impulsive::PlanError),
    #[error("orbital propagation failed: {0}")]
    Orbital(#[from] orbitfall_orbital::OrbitalError),
    #[error("descent dynamics failed: {0}")]
    Descent(#[from] orbitfall_descent::DescentError),
    #[error("guidance configuration is not supported")]
    UnsupportedGuidance,
}

/// UTC timestamp recorded in exported summaries.
pub fn timestamp_utc() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
