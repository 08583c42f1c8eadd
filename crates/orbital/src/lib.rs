//! Planar two-body propagation and impulsive maneuver sequencing.
//!
//! A [`Spacecraft`] owns its position/velocity state and is advanced strictly
//! sequentially, one tick at a time, by an external driver. A
//! [`MissionSequencer`] inspects the propagated state after each tick and
//! decides when to fire the two burns of a planned Hohmann transfer.

use orbitfall_core::vector::{self, Vector2};
use thiserror::Error;

mod sequencer;

pub use sequencer::{ApsisDetector, AutoSequencer, Burn, BurnEvent, ManualSequencer, MissionSequencer};

/// Position/velocity state vector relative to the fixed central body at the
/// origin. The radius stays strictly positive for the life of a simulation;
/// collision with the center is excluded by the orbit geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalState {
    pub position: Vector2,
    pub velocity: Vector2,
}

impl OrbitalState {
    pub fn new(position: Vector2, velocity: Vector2) -> Self {
        Self { position, velocity }
    }

    /// Distance from the central body.
    pub fn radius(&self) -> f64 {
        vector::norm(&self.position)
    }

    /// Magnitude of the velocity vector.
    pub fn speed(&self) -> f64 {
        vector::norm(&self.velocity)
    }
}

/// Contract violations surfaced by the propagator. Normal mission outcomes
/// (terminal stage reached) are not errors.
#[derive(Debug, Error, PartialEq)]
pub enum OrbitalError {
    #[error("time step must be strictly positive (got {0})")]
    NonPositiveStep(f64),
    #[error("cannot apply a prograde impulse to a body at rest")]
    ZeroVelocityImpulse,
}

/// A point mass under inverse-square central gravity.
#[derive(Debug, Clone)]
pub struct Spacecraft {
    mu: f64,
    pub state: OrbitalState,
}

impl Spacecraft {
    pub fn new(mu: f64, state: OrbitalState) -> Self {
        Self { mu, state }
    }

    /// Place the craft on an exact circular orbit of the given radius,
    /// starting on the +x axis with velocity along +y.
    pub fn in_circular_orbit(mu: f64, radius: f64) -> Self {
        let speed = orbitfall_core::orbit::circular_speed(mu, radius);
        Self::new(mu, OrbitalState::new([radius, 0.0], [0.0, speed]))
    }

    /// Gravitational parameter of the central body.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Advance the state by `dt` under gravity alone.
    ///
    /// Integration is semi-implicit Euler: velocity is updated from the
    /// acceleration first, then position from the already-updated velocity.
    /// Over the multi-orbit horizons this simulator runs, that ordering keeps
    /// the orbital energy near-constant where explicit Euler would visibly
    /// spiral.
    pub fn step(&mut self, dt: f64) -> Result<(), OrbitalError> {
        if dt <= 0.0 {
            return Err(OrbitalError::NonPositiveStep(dt));
        }

        let r = self.state.radius();
        // a = -(mu / r^3) * position: inverse-square, directed at the origin.
        let accel = vector::scale(&self.state.position, -self.mu / (r * r * r));

        self.state.velocity = vector::add(&self.state.velocity, &vector::scale(&accel, dt));
        self.state.position = vector::add(
            &self.state.position,
            &vector::scale(&self.state.velocity, dt),
        );
        Ok(())
    }

    /// Apply a prograde impulse: add `dv` along the current velocity's unit
    /// vector, changing speed but not direction. Requires a nonzero velocity.
    pub fn apply_impulse(&mut self, dv: f64) -> Result<(), OrbitalError> {
        let along = vector::unit(&self.state.velocity).ok_or(OrbitalError::ZeroVelocityImpulse)?;
        self.state.velocity = vector::add(&self.state.velocity, &vector::scale(&along, dv));
        Ok(())
    }
}

/// Mission phase of a two-impulse transfer. Transitions are one-directional
/// and terminal at [`MissionStage::TargetOrbit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionStage {
    Parked,
    Transferring,
    TargetOrbit,
}

impl MissionStage {
    /// Whether any burns remain.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MissionStage::TargetOrbit)
    }

    /// Telemetry label, stable across exports.
    pub fn label(&self) -> &'static str {
        match self {
            MissionStage::Parked => "PARKED",
            MissionStage::Transferring => "TRANSFERRING",
            MissionStage::TargetOrbit => "TARGET_ORBIT",
        }
    }
}

impl std::fmt::Display for MissionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

