//! Closed-form two-impulse (Hohmann) transfer planning in the coplanar,
//! circular limit.
//!
//! Speeds come straight from the vis-viva equation for two-body Keplerian
//! motion with a specified central gravitational parameter; no numerical
//! iteration is involved. Units are whatever consistent system the caller
//! picked for `mu` and the radii.

use thiserror::Error;

/// The two signed burns for a Hohmann transfer between circular, coplanar
/// orbits, computed once per mission and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HohmannTransfer {
    /// Injection burn at the departure radius. Negative for an inward
    /// (retrograde) transfer.
    pub dv1: f64,
    /// Circularization burn at the arrival radius. Same sign convention.
    pub dv2: f64,
    /// |dv1| + |dv2|.
    pub dv_total: f64,
    /// Semi-major axis of the elliptical transfer orbit.
    pub transfer_semi_major_axis: f64,
    /// Half the transfer ellipse's period: time from the first burn to the
    /// second.
    pub time_of_flight: f64,
}

/// Rejected planner inputs. Every variant is a caller contract violation,
/// not a condition to recover from.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("gravitational parameter must be strictly positive (got {0})")]
    NonPositiveMu(f64),
    #[error("orbit radius must be strictly positive (got {0})")]
    NonPositiveRadius(f64),
    #[error("departure and arrival radii must be distinct (both {0})")]
    DegenerateRadii(f64),
}

/// Compute the classical Hohmann transfer between two circular coplanar
/// orbits of radii `r_from` and `r_to` about a body with gravitational
/// parameter `mu`.
///
/// Outward transfers (`r_from < r_to`) yield two positive (prograde) burns;
/// inward transfers yield two negative (retrograde) burns.
pub fn plan_hohmann(mu: f64, r_from: f64, r_to: f64) -> Result<HohmannTransfer, PlanError> {
    if mu <= 0.0 {
        return Err(PlanError::NonPositiveMu(mu));
    }
    for r in [r_from, r_to] {
        if r <= 0.0 {
            return Err(PlanError::NonPositiveRadius(r));
        }
    }
    if r_from == r_to {
        return Err(PlanError::DegenerateRadii(r_from));
    }

    let v_from = (mu / r_from).sqrt();
    let v_to = (mu / r_to).sqrt();
    let a_t = 0.5 * (r_from + r_to);

    // Transfer-ellipse speeds at the departure and arrival radii (vis-viva).
    let v_depart = (mu * (2.0 / r_from - 1.0 / a_t)).sqrt();
    let v_arrive = (mu * (2.0 / r_to - 1.0 / a_t)).sqrt();

    let dv1 = v_depart - v_from;
    let dv2 = v_to - v_arrive;
    let tof = std::f64::consts::PI * (a_t.powi(3) / mu).sqrt();

    Ok(HohmannTransfer {
        dv1,
        dv2,
        dv_total: dv1.abs() + dv2.abs(),
        transfer_semi_major_axis: a_t,
        time_of_flight: tof,
    })
}
