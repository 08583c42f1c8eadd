use orbitfall::orbit;
use orbitfall::orbital::{OrbitalError, OrbitalState, Spacecraft};

const MU: f64 = 1_000_000.0;
const RADIUS: f64 = 100.0;

fn specific_energy(craft: &Spacecraft) -> f64 {
    let v = craft.state.speed();
    0.5 * v * v - MU / craft.state.radius()
}

#[test]
fn circular_orbit_closes_after_one_period() {
    let mut craft = Spacecraft::in_circular_orbit(MU, RADIUS);
    let start = craft.state;

    let period = orbit::period(MU, RADIUS);
    let steps = 100_000usize;
    let dt = period / steps as f64;
    for _ in 0..steps {
        craft.step(dt).expect("step");
    }

    // Symplectic integration keeps the orbit closed; allow a small phase
    // drift after 100k first-order steps.
    let dx = craft.state.position[0] - start.position[0];
    let dy = craft.state.position[1] - start.position[1];
    let position_error = (dx * dx + dy * dy).sqrt();
    assert!(position_error < 0.01 * RADIUS, "position error = {position_error}");

    let speed_error = (craft.state.speed() - start.speed()).abs();
    assert!(speed_error < 0.005 * start.speed(), "speed error = {speed_error}");
}

#[test]
fn orbital_energy_stays_bounded_over_many_orbits() {
    let mut craft = Spacecraft::in_circular_orbit(MU, RADIUS);
    let initial = specific_energy(&craft);

    let period = orbit::period(MU, RADIUS);
    let dt = 1.0e-3;
    let steps = (3.0 * period / dt) as usize;
    let mut worst = 0.0f64;
    for _ in 0..steps {
        craft.step(dt).expect("step");
        worst = worst.max(((specific_energy(&craft) - initial) / initial).abs());
    }
    assert!(worst < 1.0e-2, "relative energy drift = {worst}");
}

#[test]
fn non_positive_steps_are_rejected() {
    let mut craft = Spacecraft::in_circular_orbit(MU, RADIUS);
    assert_eq!(craft.step(0.0), Err(OrbitalError::NonPositiveStep(0.0)));
    assert_eq!(craft.step(-0.5), Err(OrbitalError::NonPositiveStep(-0.5)));
}

#[test]
fn prograde_impulse_scales_speed_without_turning() {
    let mut craft = Spacecraft::new(MU, OrbitalState::new([RADIUS, 0.0], [0.0, 40.0]));
    craft.apply_impulse(5.0).expect("impulse");
    assert_eq!(craft.state.velocity, [0.0, 45.0]);

    craft.apply_impulse(-10.0).expect("impulse");
    assert_eq!(craft.state.velocity, [0.0, 35.0]);
}

#[test]
fn impulse_on_a_body_at_rest_is_rejected() {
    let mut craft = Spacecraft::new(MU, OrbitalState::new([RADIUS, 0.0], [0.0, 0.0]));
    assert_eq!(
        craft.apply_impulse(5.0),
        Err(OrbitalError::ZeroVelocityImpulse)
    );
}
