//! Maneuver triggering for the two-impulse transfer.

use log::info;
use orbitfall_impulsive::HohmannTransfer;

use crate::{MissionStage, OrbitalError, Spacecraft};

/// A burn applied by a sequencer, reported back to the driver for telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnEvent {
    /// Signed prograde delta-v that was applied.
    pub dv: f64,
    /// Radius at the instant of the burn.
    pub radius: f64,
    /// Stage entered as a result of the burn.
    pub new_stage: MissionStage,
}

/// Common interface over the autonomous and manual triggering policies; the
/// surrounding propagation and telemetry logic is identical for both.
pub trait MissionSequencer {
    /// Inspect the craft after a propagation tick and fire a burn if this
    /// sequencer's policy calls for one.
    fn update(&mut self, craft: &mut Spacecraft) -> Result<Option<BurnEvent>, OrbitalError>;

    /// Current mission phase.
    fn stage(&self) -> MissionStage;
}

/// Apoapsis-crossing detection policy for [`AutoSequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApsisDetector {
    /// Fire once the craft has crossed into the x < 0 half-plane and the
    /// radius has just started decreasing. Cheap, but assumes the transfer
    /// ellipse's major axis is aligned with the injection point's radial
    /// direction, which holds under this sequencer's own injection geometry
    /// (departure on the +x axis).
    #[default]
    HalfPlane,
    /// Fire on the sign change of the radial rate: the radius was growing on
    /// the previous tick and is shrinking now. Independent of the injection
    /// geometry.
    RadialRate,
}

/// Autonomous triggering: injection fires on the first update while parked,
/// circularization fires when the configured detector reports the apoapsis
/// crossing. Each burn fires exactly once; updates after the terminal stage
/// are no-ops.
#[derive(Debug, Clone)]
pub struct AutoSequencer {
    plan: HohmannTransfer,
    detector: ApsisDetector,
    stage: MissionStage,
    last_radius: Option<f64>,
    radius_was_growing: bool,
}

impl AutoSequencer {
    pub fn new(plan: HohmannTransfer) -> Self {
        Self::with_detector(plan, ApsisDetector::default())
    }

    pub fn with_detector(plan: HohmannTransfer, detector: ApsisDetector) -> Self {
        Self {
            plan,
            detector,
            stage: MissionStage::Parked,
            last_radius: None,
            radius_was_growing: false,
        }
    }

    pub fn plan(&self) -> &HohmannTransfer {
        &self.plan
    }

    fn apoapsis_crossed(&self, craft: &Spacecraft, radius: f64) -> bool {
        let Some(last) = self.last_radius else {
            return false;
        };
        let shrinking = radius < last;
        match self.detector {
            ApsisDetector::HalfPlane => craft.state.position[0] < 0.0 && shrinking,
            ApsisDetector::RadialRate => self.radius_was_growing && shrinking,
        }
    }
}

impl MissionSequencer for AutoSequencer {
    fn update(&mut self, craft: &mut Spacecraft) -> Result<Option<BurnEvent>, OrbitalError> {
        let radius = craft.state.radius();

        let fired = match self.stage {
            MissionStage::Parked => {
                craft.apply_impulse(self.plan.dv1)?;
                self.stage = MissionStage::Transferring;
                info!("injection burn executed: dv={:.3} at r={radius:.2}", self.plan.dv1);
                Some(BurnEvent {
                    dv: self.plan.dv1,
                    radius,
                    new_stage: self.stage,
                })
            }
            MissionStage::Transferring if self.apoapsis_crossed(craft, radius) => {
                craft.apply_impulse(self.plan.dv2)?;
                self.stage = MissionStage::TargetOrbit;
                info!(
                    "circularization burn executed: dv={:.3} at r={radius:.2}",
                    self.plan.dv2
                );
                Some(BurnEvent {
                    dv: self.plan.dv2,
                    radius,
                    new_stage: self.stage,
                })
            }
            _ => None,
        };

        if let Some(last) = self.last_radius {
            self.radius_was_growing = radius > last;
        }
        self.last_radius = Some(radius);
        Ok(fired)
    }

    fn stage(&self) -> MissionStage {
        self.stage
    }
}

/// Discrete burn commands accepted by [`ManualSequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burn {
    Injection,
    Circularization,
}

/// Manual triggering: burns fire only in response to an explicit external
/// command, and only while the mission is in the matching stage. A command
/// received in the wrong stage is a no-op.
#[derive(Debug, Clone)]
pub struct ManualSequencer {
    plan: HohmannTransfer,
    stage: MissionStage,
}

impl ManualSequencer {
    pub fn new(plan: HohmannTransfer) -> Self {
        Self {
            plan,
            stage: MissionStage::Parked,
        }
    }

    pub fn plan(&self) -> &HohmannTransfer {
        &self.plan
    }

    /// Execute a commanded burn. Returns `Ok(None)` without touching the
    /// craft when the command does not match the current stage.
    pub fn fire(
        &mut self,
        craft: &mut Spacecraft,
        burn: Burn,
    ) -> Result<Option<BurnEvent>, OrbitalError> {
        let (dv, next) = match (self.stage, burn) {
            (MissionStage::Parked, Burn::Injection) => {
                (self.plan.dv1, MissionStage::Transferring)
            }
            (MissionStage::Transferring, Burn::Circularization) => {
                (self.plan.dv2, MissionStage::TargetOrbit)
            }
            _ => return Ok(None),
        };

        let radius = craft.state.radius();
        craft.apply_impulse(dv)?;
        self.stage = next;
        info!("commanded {burn:?} burn executed: dv={dv:.3} at r={radius:.2}");
        Ok(Some(BurnEvent {
            dv,
            radius,
            new_stage: next,
        }))
    }
}

impl MissionSequencer for ManualSequencer {
    /// Manual mode never fires on its own; the craft just coasts.
    fn update(&mut self, _craft: &mut Spacecraft) -> Result<Option<BurnEvent>, OrbitalError> {
        Ok(None)
    }

    fn stage(&self) -> MissionStage {
        self.stage
    }
}
