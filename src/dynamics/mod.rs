pub mod state;

use crate::error::Result;
use crate::physics::gravity::gravity_accel;
use state::{Deriv, State};

// ---------------------------------------------------------------------------
// Equations of motion (planar two-body, point mass)
// ---------------------------------------------------------------------------

/// State derivatives under a single central point mass.
pub fn derivatives(state: &State, mu: f64) -> Result<Deriv> {
    Ok(Deriv {
        dpos: state.vel,
        dvel: gravity_accel(&state.pos, mu)?,
    })
}
