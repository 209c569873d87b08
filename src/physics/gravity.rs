use nalgebra::Vector2;

use crate::error::{FlybyError, Result};

/// Point-mass gravitational acceleration at `pos` (relative to the body).
///
/// a = -mu * r_vec / |r|^3. Fails at the origin, where the field is singular.
pub fn gravity_accel(pos: &Vector2<f64>, mu: f64) -> Result<Vector2<f64>> {
    let r = pos.norm();
    if r == 0.0 {
        return Err(FlybyError::UndefinedAcceleration { x: pos.x, y: pos.y });
    }
    Ok(-mu / (r * r * r) * pos)
}

/// Component form of [`gravity_accel`]: `(ax, ay)`.
pub fn gravity_accel_xy(x: f64, y: f64, mu: f64) -> Result<(f64, f64)> {
    let a = gravity_accel(&Vector2::new(x, y), mu)?;
    Ok((a.x, a.y))
}
