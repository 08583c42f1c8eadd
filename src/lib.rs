//! Orbitfall: two related spaceflight simulators behind one façade.
//!
//! The workspace crates hold the numerical core — two-body propagation,
//! impulsive maneuver planning and sequencing, powered-descent dynamics, and
//! PID regulation. This library re-exports them and adds the `scenario`
//! drivers that advance a simulation tick-by-tick and collect telemetry, so
//! multiple front-ends (CLI, plots) share the same logic.

pub mod scenario;

pub use orbitfall_config as config;
pub use orbitfall_control as control;
pub use orbitfall_core::{constants, orbit, vector};
pub use orbitfall_descent as descent;
pub use orbitfall_export as export;
pub use orbitfall_impulsive as impulsive;
pub use orbitfall_orbital as orbital;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
