//! One-dimensional powered-descent dynamics.
//!
//! A [`Lander`] falls vertically under constant surface gravity and quadratic
//! aerodynamic drag, opposed by a bounded engine thrust that depletes
//! propellant at the Tsiolkovsky rate `thrust / (isp * g0)`. Ground contact
//! is inelastic and terminal: once down, the state no longer changes.

use log::info;
use orbitfall_core::constants::G0;
use thiserror::Error;

/// Fixed airframe and engine properties, supplied once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanderVehicle {
    /// Structure mass without propellant (kg). Must be strictly positive so
    /// the total mass never reaches zero even on dry tanks.
    pub dry_mass_kg: f64,
    /// Dimensionless drag coefficient.
    pub drag_coefficient: f64,
    /// Cross-sectional reference area (m²).
    pub reference_area_m2: f64,
    /// Engine thrust ceiling (N); commands are clamped to `[0, max]`.
    pub max_thrust_n: f64,
    /// Specific impulse (s) relating thrust to propellant mass flow.
    pub isp_s: f64,
}

/// Fixed properties of the body being landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentEnvironment {
    /// Surface gravitational acceleration (m/s²), constant over the descent.
    pub surface_gravity_m_s2: f64,
    /// Atmospheric density (kg/m³), treated as uniform.
    pub atmosphere_density_kg_m3: f64,
}

/// Latched record of the ground-contact event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touchdown {
    /// Signed vertical velocity at the start of the contact tick, before the
    /// inelastic clamp zeroes it. Negative means downward.
    pub impact_velocity_m_s: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum DescentError {
    #[error("time step must be strictly positive (got {0})")]
    NonPositiveStep(f64),
    #[error("dry mass must be strictly positive (got {0})")]
    NonPositiveDryMass(f64),
}

/// Mutable descent state advanced in place tick-by-tick.
#[derive(Debug, Clone)]
pub struct Lander {
    vehicle: LanderVehicle,
    environment: DescentEnvironment,
    /// Height above the surface (m), floored at zero.
    pub altitude_m: f64,
    /// Signed vertical velocity (m/s), negative downward.
    pub velocity_m_s: f64,
    /// Remaining propellant (kg), monotonically non-increasing.
    pub fuel_kg: f64,
    /// Thrust actually delivered on the last tick, after saturation and the
    /// empty-tank cutoff (N).
    pub thrust_n: f64,
    touchdown: Option<Touchdown>,
}

impl Lander {
    pub fn new(
        vehicle: LanderVehicle,
        environment: DescentEnvironment,
        altitude_m: f64,
        velocity_m_s: f64,
        fuel_kg: f64,
    ) -> Result<Self, DescentError> {
        if vehicle.dry_mass_kg <= 0.0 {
            return Err(DescentError::NonPositiveDryMass(vehicle.dry_mass_kg));
        }
        Ok(Self {
            vehicle,
            environment,
            altitude_m,
            velocity_m_s,
            fuel_kg: fuel_kg.max(0.0),
            thrust_n: 0.0,
            touchdown: None,
        })
    }

    pub fn vehicle(&self) -> &LanderVehicle {
        &self.vehicle
    }

    pub fn environment(&self) -> &DescentEnvironment {
        &self.environment
    }

    /// Dry mass plus remaining propellant (kg). Strictly positive by the
    /// construction-time dry-mass check.
    pub fn total_mass_kg(&self) -> f64 {
        self.vehicle.dry_mass_kg + self.fuel_kg
    }

    /// Instantaneous weight (N), the gravity feed-forward term used by the
    /// closed-loop descent guidance.
    pub fn weight_n(&self) -> f64 {
        self.total_mass_kg() * self.environment.surface_gravity_m_s2
    }

    /// Ground-contact record, present once the lander is down.
    pub fn touchdown(&self) -> Option<Touchdown> {
        self.touchdown
    }

    /// Advance the descent by `dt` under the commanded thrust.
    ///
    /// Returns `Ok(true)` while airborne and `Ok(false)` once on the ground.
    /// Calls after ground contact leave the state untouched and keep
    /// returning `Ok(false)`.
    pub fn step(&mut self, thrust_cmd_n: f64, dt: f64) -> Result<bool, DescentError> {
        if dt <= 0.0 {
            return Err(DescentError::NonPositiveStep(dt));
        }
        if self.touchdown.is_some() || self.altitude_m <= 0.0 {
            return Ok(false);
        }

        // Saturate before computing mass flow so the burn rate never exceeds
        // the engine's physical maximum, and cut the engine on empty tanks.
        let mut thrust = thrust_cmd_n.clamp(0.0, self.vehicle.max_thrust_n);
        if self.fuel_kg <= 0.0 {
            thrust = 0.0;
        }

        let mass = self.total_mass_kg();
        let burn_kg = thrust / (self.vehicle.isp_s * G0) * dt;
        self.fuel_kg = (self.fuel_kg - burn_kg).max(0.0);
        self.thrust_n = thrust;

        let weight = -mass * self.environment.surface_gravity_m_s2;
        // v * |v| rather than v² so drag flips sign with the velocity.
        let drag = -0.5
            * self.environment.atmosphere_density_kg_m3
            * self.velocity_m_s
            * self.velocity_m_s.abs()
            * self.vehicle.drag_coefficient
            * self.vehicle.reference_area_m2;
        let accel = (weight + drag + thrust) / mass;

        // Semi-implicit Euler, same ordering as the orbital propagator.
        self.velocity_m_s += accel * dt;
        self.altitude_m += self.velocity_m_s * dt;

        if self.altitude_m <= 0.0 {
            let impact = self.velocity_m_s;
            self.altitude_m = 0.0;
            self.velocity_m_s = 0.0;
            self.touchdown = Some(Touchdown {
                impact_velocity_m_s: impact,
            });
            info!("ground contact: impact velocity {impact:.2} m/s");
            return Ok(false);
        }
        Ok(true)
    }
}
