//! Scenario manifest models and loaders for the Orbitfall workspace.
//!
//! Manifests are plain data; conversion into runtime simulation types lives
//! with the scenario drivers so this crate stays serde-only.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Two-impulse transfer scenario parsed from a manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct TransferScenarioConfig {
    pub name: String,
    /// Gravitational parameter of the central body.
    pub mu: f64,
    /// Departure (parking) circular orbit radius.
    pub parking_radius: f64,
    /// Arrival circular orbit radius.
    pub target_radius: f64,
    /// Raw driver step before time scaling.
    #[serde(default = "default_transfer_step")]
    pub time_step_s: f64,
    /// Simulated-seconds-per-wall-second multiplier applied by the driver.
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
}

/// Powered-descent scenario parsed from a manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct DescentScenarioConfig {
    pub name: String,
    pub body: BodyConfig,
    pub vehicle: LanderConfig,
    pub initial: DescentInitialConfig,
    pub guidance: GuidanceConfig,
    #[serde(default = "default_descent_step")]
    pub time_step_s: f64,
    /// Abort horizon if the lander never reaches the ground.
    #[serde(default = "default_descent_duration")]
    pub max_duration_s: f64,
}

/// Surface and atmosphere of the body being landed on.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub surface_gravity_m_s2: f64,
    pub atmosphere_density_kg_m3: f64,
}

/// Airframe and engine parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct LanderConfig {
    pub dry_mass_kg: f64,
    pub drag_coefficient: f64,
    pub reference_area_m2: f64,
    pub max_thrust_n: f64,
    pub isp_s: f64,
}

/// Release state at the start of the descent.
#[derive(Debug, Deserialize, Clone)]
pub struct DescentInitialConfig {
    pub altitude_m: f64,
    #[serde(default)]
    pub velocity_m_s: f64,
    pub fuel_kg: f64,
}

/// Guidance policy selection in descent manifests.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum GuidanceConfig {
    /// Full thrust below the arming altitude, nothing above it.
    #[serde(rename = "bang_bang")]
    BangBang { arm_altitude_m: f64 },
    /// PID on vertical velocity with gravity feed-forward.
    #[serde(rename = "velocity_pid")]
    VelocityPid {
        kp: f64,
        ki: f64,
        kd: f64,
        target_velocity_m_s: f64,
        integral_limit: f64,
    },
    #[serde(other)]
    Unsupported,
}

/// Errors that can occur while loading manifest files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load a transfer scenario from a YAML or TOML manifest.
pub fn load_transfer_scenario<P: AsRef<Path>>(
    path: P,
) -> Result<TransferScenarioConfig, ConfigError> {
    load_manifest(path)
}

/// Load a descent scenario from a YAML or TOML manifest.
pub fn load_descent_scenario<P: AsRef<Path>>(
    path: P,
) -> Result<DescentScenarioConfig, ConfigError> {
    load_manifest(path)
}

fn load_manifest<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        Ok(toml::from_str(&contents)?)
    } else {
        Ok(serde_yaml::from_str(&contents)?)
    }
}

fn default_transfer_step() -> f64 {
    1.0 / 60.0
}

fn default_time_scale() -> f64 {
    10.0
}

fn default_descent_step() -> f64 {
    0.1
}

fn default_descent_duration() -> f64 {
    50.0
}
