//! Core constants and shared planar-vector primitives for the Orbitfall workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²), the reference constant in the
    /// thrust / specific-impulse mass-flow relation.
    pub const G0: f64 = 9.80665;
    /// Mars surface gravity (m/s²).
    pub const MARS_SURFACE_GRAVITY: f64 = 3.71;
    /// Mars surface atmospheric density (kg/m³).
    pub const MARS_ATMOSPHERE_DENSITY: f64 = 0.020;
}

/// Circular-orbit helpers for two-body Keplerian motion.
pub mod orbit {
    /// Speed of a circular orbit of radius `r` about a body with gravitational
    /// parameter `mu`.
    #[inline]
    pub fn circular_speed(mu: f64, r: f64) -> f64 {
        (mu / r).sqrt()
    }

    /// Period of an orbit with semi-major axis `a` about a body with
    /// gravitational parameter `mu`.
    #[inline]
    pub fn period(mu: f64, a: f64) -> f64 {
        std::f64::consts::TAU * (a.powi(3) / mu).sqrt()
    }
}

/// Minimal planar vector helpers to avoid ad-hoc `[f64; 2]` math everywhere.
pub mod vector {
    /// Alias for a 2D vector in position or velocity units depending on context.
    pub type Vector2 = [f64; 2];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector2) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector2, b: &Vector2) -> f64 {
        a[0] * b[0] + a[1] * b[1]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] + b[0], a[1] + b[1]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] - b[0], a[1] - b[1]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector2, s: f64) -> Vector2 {
        [v[0] * s, v[1] * s]
    }

    /// Unit vector along `v`, or `None` for the zero vector.
    #[inline]
    pub fn unit(v: &Vector2) -> Option<Vector2> {
        let n = norm(v);
        if n > 0.0 { Some(scale(v, 1.0 / n)) } else { None }
    }
}
