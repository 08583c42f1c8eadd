//! Driver for the autonomous two-impulse transfer scenario.

use orbitfall_config::TransferScenarioConfig;
use orbitfall_core::orbit;
use orbitfall_core::vector::Vector2;
use orbitfall_impulsive::{HohmannTransfer, plan_hohmann};
use orbitfall_orbital::{ApsisDetector, AutoSequencer, MissionSequencer, MissionStage, Spacecraft};

use super::{ScenarioError, clamp_step};

/// Tuning knobs the manifest does not carry.
#[derive(Debug, Clone, Copy)]
pub struct TransferOptions {
    /// Apoapsis detection policy for the autonomous sequencer.
    pub detector: ApsisDetector,
    /// How many target-orbit periods to keep coasting after circularization,
    /// so the telemetry shows the final orbit closing on itself.
    pub settle_orbits: f64,
    /// Hard cap on simulated time; the default is generous enough for any
    /// transfer that actually circularizes.
    pub max_duration_s: Option<f64>,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            detector: ApsisDetector::default(),
            settle_orbits: 1.0,
            max_duration_s: None,
        }
    }
}

/// One telemetry sample per driver frame.
#[derive(Debug, Clone, Copy)]
pub struct OrbitSample {
    pub time_s: f64,
    pub position: Vector2,
    pub radius: f64,
    pub speed: f64,
    pub stage: MissionStage,
}

/// A burn with the simulated time it fired at.
#[derive(Debug, Clone, Copy)]
pub struct TimedBurn {
    pub time_s: f64,
    pub dv: f64,
    pub radius: f64,
    pub stage: MissionStage,
}

/// Complete record of a transfer run.
#[derive(Debug)]
pub struct TransferRun {
    pub plan: HohmannTransfer,
    pub samples: Vec<OrbitSample>,
    pub burns: Vec<TimedBurn>,
    pub final_stage: MissionStage,
    pub elapsed_s: f64,
}

impl TransferRun {
    /// State at the last recorded sample.
    pub fn final_sample(&self) -> &OrbitSample {
        self.samples.last().expect("a run records at least one sample")
    }
}

/// Run the transfer scenario to completion.
///
/// Each frame advances `time_scale` sub-steps of the clamped manifest step,
/// letting the sequencer inspect every tick, and records one sample. The run
/// ends once the mission is terminal and the settle margin has elapsed, or
/// at the duration cap.
pub fn run(
    config: &TransferScenarioConfig,
    options: &TransferOptions,
) -> Result<TransferRun, ScenarioError> {
    let plan = plan_hohmann(config.mu, config.parking_radius, config.target_radius)?;
    let mut craft = Spacecraft::in_circular_orbit(config.mu, config.parking_radius);
    let mut sequencer = AutoSequencer::with_detector(plan, options.detector);

    let dt = clamp_step(config.time_step_s);
    let substeps = (config.time_scale.max(1.0)).round() as usize;

    let target_period = orbit::period(config.mu, config.target_radius);
    let settle_s = options.settle_orbits * target_period;
    let max_duration = options
        .max_duration_s
        .unwrap_or(4.0 * (plan.time_of_flight + target_period));

    let mut samples = Vec::new();
    let mut burns = Vec::new();
    let mut time_s = 0.0;
    let mut terminal_at: Option<f64> = None;

    samples.push(sample(time_s, &craft, sequencer.stage()));

    while time_s < max_duration {
        for _ in 0..substeps {
            craft.step(dt)?;
            time_s += dt;
            if let Some(event) = sequencer.update(&mut craft)? {
                burns.push(TimedBurn {
                    time_s,
                    dv: event.dv,
                    radius: event.radius,
                    stage: event.new_stage,
                });
            }
        }
        samples.push(sample(time_s, &craft, sequencer.stage()));

        if sequencer.stage().is_terminal() {
            let done_at = *terminal_at.get_or_insert(time_s);
            if time_s - done_at >= settle_s {
                break;
            }
        }
    }

    Ok(TransferRun {
        plan,
        samples,
        burns,
        final_stage: sequencer.stage(),
        elapsed_s: time_s,
    })
}

fn sample(time_s: f64, craft: &Spacecraft, stage: MissionStage) -> OrbitSample {
    OrbitSample {
        time_s,
        position: craft.state.position,
        radius: craft.state.radius(),
        speed: craft.state.speed(),
        stage,
    }
}
