use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dynamics;
use crate::dynamics::state::State;
use crate::error::{FlybyError, Result};
use crate::physics::gravity::gravity_accel;

// ---------------------------------------------------------------------------
// Semi-implicit Euler (first order)
// ---------------------------------------------------------------------------

/// Single Euler step: velocity is updated first, then the new velocity
/// moves the position.
pub fn euler_step(state: &State, mu: f64, dt: f64) -> Result<State> {
    let accel = gravity_accel(&state.pos, mu)?;
    let vel = state.vel + accel * dt;

    Ok(State {
        time: state.time + dt,
        pos: state.pos + vel * dt,
        vel,
    })
}

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta
// ---------------------------------------------------------------------------

/// Single RK4 step: advance state by dt.
pub fn rk4_step(state: &State, mu: f64, dt: f64) -> Result<State> {
    let k1 = dynamics::derivatives(state, mu)?;
    let k2 = dynamics::derivatives(&state.apply(&k1, dt * 0.5), mu)?;
    let k3 = dynamics::derivatives(&state.apply(&k2, dt * 0.5), mu)?;
    let k4 = dynamics::derivatives(&state.apply(&k3, dt), mu)?;

    Ok(State {
        time: state.time + dt,
        pos: state.pos + (k1.dpos + 2.0 * k2.dpos + 2.0 * k3.dpos + k4.dpos) * (dt / 6.0),
        vel: state.vel + (k1.dvel + 2.0 * k2.dvel + 2.0 * k3.dvel + k4.dvel) * (dt / 6.0),
    })
}

// ---------------------------------------------------------------------------
// Stepping policy selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Euler,
    #[default]
    Rk4,
}

impl Method {
    pub fn step(&self, state: &State, mu: f64, dt: f64) -> Result<State> {
        match self {
            Method::Euler => euler_step(state, mu, dt),
            Method::Rk4 => rk4_step(state, mu, dt),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::Euler => "euler",
            Method::Rk4 => "rk4",
        }
    }

    /// Global order of accuracy.
    pub fn order(&self) -> usize {
        match self {
            Method::Euler => 1,
            Method::Rk4 => 4,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = FlybyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euler" => Ok(Method::Euler),
            "rk4" | "runge-kutta" => Ok(Method::Rk4),
            other => Err(FlybyError::config(format!(
                "unknown integration method '{}' (expected euler or rk4)",
                other
            ))),
        }
    }
}
