//! Driver for the powered-descent scenario.

use orbitfall_config::{DescentScenarioConfig, GuidanceConfig};
use orbitfall_control::{PidConfig, PidController};
use orbitfall_descent::{DescentEnvironment, Lander, LanderVehicle, Touchdown};

use super::{ScenarioError, clamp_step};

/// Thrust policy evaluated once per tick, before the dynamics step.
#[derive(Debug, Clone)]
pub enum GuidancePolicy {
    /// The open-loop baseline: command full thrust below the arming altitude,
    /// nothing above it.
    BangBang { arm_altitude_m: f64 },
    /// Closed-loop velocity regulation. The PID corrects the residual
    /// velocity error; the instantaneous vehicle weight is added as a
    /// feed-forward term so the controller does not have to fight gravity
    /// from zero.
    VelocityPid { controller: PidController },
}

impl GuidancePolicy {
    pub fn from_config(config: &GuidanceConfig) -> Result<Self, ScenarioError> {
        match config {
            GuidanceConfig::BangBang { arm_altitude_m } => Ok(Self::BangBang {
                arm_altitude_m: *arm_altitude_m,
            }),
            GuidanceConfig::VelocityPid {
                kp,
                ki,
                kd,
                target_velocity_m_s,
                integral_limit,
            } => Ok(Self::VelocityPid {
                controller: PidController::new(PidConfig {
                    kp: *kp,
                    ki: *ki,
                    kd: *kd,
                    setpoint: *target_velocity_m_s,
                    integral_limit: *integral_limit,
                }),
            }),
            GuidanceConfig::Unsupported => Err(ScenarioError::UnsupportedGuidance),
        }
    }

    /// Thrust command for the coming tick, in newtons. The dynamics clamp it
    /// to the engine's envelope.
    pub fn thrust_command(&mut self, lander: &Lander, dt: f64) -> f64 {
        match self {
            Self::BangBang { arm_altitude_m } => {
                if lander.altitude_m < *arm_altitude_m {
                    lander.vehicle().max_thrust_n
                } else {
                    0.0
                }
            }
            Self::VelocityPid { controller } => {
                controller.update(lander.velocity_m_s, dt) + lander.weight_n()
            }
        }
    }
}

/// One telemetry sample per tick, taken at the start of the tick with the
/// thrust the dynamics delivered over it.
#[derive(Debug, Clone, Copy)]
pub struct DescentSample {
    pub time_s: f64,
    pub altitude_m: f64,
    pub velocity_m_s: f64,
    pub thrust_n: f64,
    pub fuel_kg: f64,
}

/// Complete record of a descent run.
#[derive(Debug)]
pub struct DescentRun {
    pub samples: Vec<DescentSample>,
    pub touchdown: Option<Touchdown>,
    pub fuel_remaining_kg: f64,
    pub elapsed_s: f64,
}

impl DescentRun {
    pub fn landed(&self) -> bool {
        self.touchdown.is_some()
    }
}

/// Run the descent scenario until ground contact or the manifest's time cap.
pub fn run(config: &DescentScenarioConfig) -> Result<DescentRun, ScenarioError> {
    let vehicle = LanderVehicle {
        dry_mass_kg: config.vehicle.dry_mass_kg,
        drag_coefficient: config.vehicle.drag_coefficient,
        reference_area_m2: config.vehicle.reference_area_m2,
        max_thrust_n: config.vehicle.max_thrust_n,
        isp_s: config.vehicle.isp_s,
    };
    let environment = DescentEnvironment {
        surface_gravity_m_s2: config.body.surface_gravity_m_s2,
        atmosphere_density_kg_m3: config.body.atmosphere_density_kg_m3,
    };
    let mut lander = Lander::new(
        vehicle,
        environment,
        config.initial.altitude_m,
        config.initial.velocity_m_s,
        config.initial.fuel_kg,
    )?;
    let mut guidance = GuidancePolicy::from_config(&config.guidance)?;

    let dt = clamp_step(config.time_step_s);
    if dt <= 0.0 {
        // Reject here rather than letting the controller hit its assert.
        return Err(orbitfall_descent::DescentError::NonPositiveStep(dt).into());
    }
    let mut samples = Vec::new();
    let mut time_s = 0.0;

    while time_s < config.max_duration_s {
        let command = guidance.thrust_command(&lander, dt);
        let (altitude, velocity, fuel) = (lander.altitude_m, lander.velocity_m_s, lander.fuel_kg);
        let flying = lander.step(command, dt)?;
        samples.push(DescentSample {
            time_s,
            altitude_m: altitude,
            velocity_m_s: velocity,
            thrust_n: lander.thrust_n,
            fuel_kg: fuel,
        });
        time_s += dt;
        if !flying {
            break;
        }
    }

    Ok(DescentRun {
        samples,
        touchdown: lander.touchdown(),
        fuel_remaining_kg: lander.fuel_kg,
        elapsed_s: time_s,
    })
}
