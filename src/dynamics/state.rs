use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{FlybyError, Result};
use crate::sim::integrator::Method;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11; // m^3 kg^-1 s^-2
pub const EARTH_MASS: f64 = 5.972e24; // kg
pub const EARTH_RADIUS: f64 = 6.371e6; // mean Earth radius, m
pub const MU_EARTH: f64 = GRAVITATIONAL_CONSTANT * EARTH_MASS; // m^3/s^2

// ---------------------------------------------------------------------------
// Planar two-body state: position, velocity
// ---------------------------------------------------------------------------

/// Spacecraft state relative to the central body.
/// Frame: planet-centred, x along the incoming asymptote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub time: f64,          // s
    pub pos: Vector2<f64>,  // m
    pub vel: Vector2<f64>,  // m/s
}

impl State {
    /// Advance state by a derivative scaled by dt (used inside RK4).
    pub fn apply(&self, d: &Deriv, dt: f64) -> State {
        State {
            time: self.time + dt,
            pos: self.pos + d.dpos * dt,
            vel: self.vel + d.dvel * dt,
        }
    }

    pub fn radius(&self) -> f64 {
        self.pos.norm()
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    /// Radial velocity component, negative while approaching the body.
    pub fn radial_velocity(&self) -> f64 {
        let r = self.radius();
        if r == 0.0 {
            return 0.0;
        }
        self.pos.dot(&self.vel) / r
    }

    /// Specific orbital energy (kinetic + potential), J/kg.
    pub fn specific_energy(&self, mu: f64) -> f64 {
        0.5 * self.vel.norm_squared() - mu / self.radius()
    }
}

// ---------------------------------------------------------------------------
// State derivative
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Deriv {
    pub dpos: Vector2<f64>, // velocity
    pub dvel: Vector2<f64>, // acceleration
}

// ---------------------------------------------------------------------------
// Encounter definition
// ---------------------------------------------------------------------------

/// Asymptotic approach geometry. Fully determines the flyby for a given
/// central body and start offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalParameters {
    pub impact_parameter: f64, // b, m
    pub approach_speed: f64,   // v_inf, m/s
}

impl OrbitalParameters {
    pub fn new(impact_parameter: f64, approach_speed: f64) -> Self {
        Self { impact_parameter, approach_speed }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.impact_parameter > 0.0) || !self.impact_parameter.is_finite() {
            return Err(FlybyError::input(format!(
                "impact parameter b must be positive, got {}",
                self.impact_parameter
            )));
        }
        if !(self.approach_speed > 0.0) || !self.approach_speed.is_finite() {
            return Err(FlybyError::input(format!(
                "approach speed v_inf must be positive, got {}",
                self.approach_speed
            )));
        }
        Ok(())
    }
}

/// Point-mass planet. The radius is informational only: it is never
/// treated as a collision boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralBody {
    pub mu: f64,     // G*M, m^3/s^2
    pub radius: f64, // m
}

impl CentralBody {
    pub fn new(mu: f64, radius: f64) -> Self {
        Self { mu, radius }
    }

    /// Body from a mass and the universal gravitational constant.
    pub fn from_mass(mass: f64, radius: f64) -> Self {
        Self { mu: GRAVITATIONAL_CONSTANT * mass, radius }
    }

    pub fn earth() -> Self {
        Self { mu: MU_EARTH, radius: EARTH_RADIUS }
    }
}

impl Default for CentralBody {
    fn default() -> Self {
        Self::earth()
    }
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub method: Method,
    pub dt: f64,          // s
    pub max_steps: usize, // safety ceiling
    pub x0: f64,          // start offset along x, m (negative = upstream)
    pub escape: bool,     // stop once past 2*|x0| on the outbound leg
}

impl SimConfig {
    /// Long RK4 run: 100 Hz stepping from 500,000 km upstream.
    pub fn rk4_mission() -> Self {
        Self {
            method: Method::Rk4,
            dt: 0.01,
            max_steps: 8_000_000,
            x0: -5e8,
            escape: true,
        }
    }

    /// Short Euler run at 1 Hz from 50,000 km upstream, fixed step count.
    pub fn euler_mission() -> Self {
        Self {
            method: Method::Euler,
            dt: 1.0,
            max_steps: 10_000,
            x0: -5e7,
            escape: false,
        }
    }

    /// Step size check shared by every run.
    pub fn validate_dt(&self) -> Result<()> {
        if !(self.dt > 0.0) || !self.dt.is_finite() {
            return Err(FlybyError::config(format!(
                "time step dt must be positive, got {}",
                self.dt
            )));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_dt()?;
        if !(self.x0 < 0.0) || !self.x0.is_finite() {
            return Err(FlybyError::config(format!(
                "start offset x0 must be negative (upstream of the body), got {}",
                self.x0
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 1.0, // RK4 is still well resolved at 1 s near periapsis
            max_steps: 500_000,
            ..Self::rk4_mission()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_mu_matches_g_times_m() {
        let earth = CentralBody::from_mass(EARTH_MASS, EARTH_RADIUS);
        assert_eq!(earth, CentralBody::earth());
        assert!((MU_EARTH - 3.9857e14).abs() / 3.9857e14 < 1e-4);
    }

    #[test]
    fn radial_velocity_sign() {
        let inbound = State {
            time: 0.0,
            pos: Vector2::new(-1e7, 1e6),
            vel: Vector2::new(1e4, 0.0),
        };
        assert!(inbound.radial_velocity() < 0.0);

        let outbound = State { pos: Vector2::new(1e7, 1e6), ..inbound };
        assert!(outbound.radial_velocity() > 0.0);
    }

    #[test]
    fn config_validation() {
        assert!(SimConfig::default().validate().is_ok());
        assert!(SimConfig::euler_mission().validate().is_ok());

        let bad_dt = SimConfig { dt: 0.0, ..SimConfig::default() };
        assert!(matches!(bad_dt.validate(), Err(FlybyError::InvalidConfiguration { .. })));

        let nan_dt = SimConfig { dt: f64::NAN, ..SimConfig::default() };
        assert!(nan_dt.validate().is_err());

        let downstream = SimConfig { x0: 1e8, ..SimConfig::default() };
        assert!(downstream.validate().is_err());
    }

    #[test]
    fn parameters_validation() {
        assert!(OrbitalParameters::new(8.973e6, 16.01e3).validate().is_ok());
        let err = OrbitalParameters::new(0.0, 16.01e3).validate().unwrap_err();
        assert!(err.to_string().contains("impact parameter"));
        let err = OrbitalParameters::new(8.973e6, -1.0).validate().unwrap_err();
        assert!(err.to_string().contains("approach speed"));
    }
}
