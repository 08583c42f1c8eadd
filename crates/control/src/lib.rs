//! Proportional-integral-derivative regulation with integral clamping.

/// Gains, setpoint, and anti-windup bound for a [`PidController`].
/// Immutable for the life of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidConfig {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Regulated target for the measured quantity.
    pub setpoint: f64,
    /// Symmetric clamp applied to the integral accumulator immediately after
    /// accumulation, so it cannot keep growing while the actuator saturates.
    pub integral_limit: f64,
}

/// A generic single-axis PID controller.
///
/// The accumulator and the previous error persist across calls and are reset
/// only by constructing a new controller.
#[derive(Debug, Clone)]
pub struct PidController {
    config: PidConfig,
    integral: f64,
    previous_error: f64,
}

impl PidController {
    pub fn new(config: PidConfig) -> Self {
        Self {
            config,
            integral: 0.0,
            previous_error: 0.0,
        }
    }

    /// Compute the control output for the current measurement over a step of
    /// `dt`. The finite-difference derivative requires `dt > 0`; passing a
    /// zero or negative step is a caller error.
    pub fn update(&mut self, measurement: f64, dt: f64) -> f64 {
        assert!(dt > 0.0, "PID update requires a positive time step");

        let error = self.config.setpoint - measurement;
        let limit = self.config.integral_limit.abs();
        self.integral = (self.integral + error * dt).clamp(-limit, limit);
        let derivative = (error - self.previous_error) / dt;
        self.previous_error = error;

        self.config.kp * error + self.config.ki * self.integral + self.config.kd * derivative
    }

    /// Current value of the clamped integral accumulator.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn config(&self) -> &PidConfig {
        &self.config
    }
}
