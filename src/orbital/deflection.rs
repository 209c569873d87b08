use crate::dynamics::state::{CentralBody, OrbitalParameters, State};
use crate::error::{FlybyError, Result};
use super::hyperbolic::alpha;

// ---------------------------------------------------------------------------
// Closed-form deflection
// ---------------------------------------------------------------------------

/// Analytic deflection angle delta = 2 asin(alpha), degrees.
pub fn theoretical_deflection(b: f64, v_inf: f64, mu: f64) -> Result<f64> {
    Ok((2.0 * alpha(b, v_inf, mu)?.asin()).to_degrees())
}

/// Speed change imparted by the encounter: dv = 2 v_inf alpha, m/s.
pub fn velocity_gain(v_inf: f64, alpha: f64) -> f64 {
    2.0 * v_inf * alpha
}

// ---------------------------------------------------------------------------
// Numerical estimate
// ---------------------------------------------------------------------------

/// Outbound heading from the last two samples, degrees:
/// atan2(|dy|, |dx|). Only as good as how far past periapsis the run got.
pub fn numerical_deflection(states: &[State]) -> Result<f64> {
    let [.., prev, last] = states else {
        return Err(FlybyError::InsufficientData { samples: states.len() });
    };
    let d = last.pos - prev.pos;
    Ok(d.y.abs().atan2(d.x.abs()).to_degrees())
}

/// |theoretical - numerical| / theoretical * 100.
pub fn percent_difference(theoretical: f64, numerical: f64) -> Result<f64> {
    if theoretical == 0.0 {
        return Err(FlybyError::DivisionByZero {
            message: "theoretical deflection is zero".into(),
        });
    }
    Ok((theoretical - numerical).abs() / theoretical * 100.0)
}

// ---------------------------------------------------------------------------
// Combined diagnostic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeflectionResult {
    pub theoretical_deg: f64,
    pub numerical_deg: f64,
    pub percent_difference: f64,
}

impl DeflectionResult {
    /// Compare the analytic deflection against the trajectory's final heading.
    pub fn evaluate(params: &OrbitalParameters, body: &CentralBody, states: &[State]) -> Result<Self> {
        let theoretical_deg =
            theoretical_deflection(params.impact_parameter, params.approach_speed, body.mu)?;
        let numerical_deg = numerical_deflection(states)?;

        Ok(Self {
            theoretical_deg,
            numerical_deg,
            percent_difference: percent_difference(theoretical_deg, numerical_deg)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::MU_EARTH;
    use nalgebra::Vector2;

    fn at(x: f64, y: f64) -> State {
        State {
            time: 0.0,
            pos: Vector2::new(x, y),
            vel: Vector2::zeros(),
        }
    }

    #[test]
    fn cassini_theoretical_angle() {
        let delta = theoretical_deflection(8.973e6, 16.01e3, MU_EARTH).unwrap();
        assert!((delta - 19.6628).abs() < 1e-3, "got {}", delta);
    }

    #[test]
    fn deflection_bounded_and_monotone() {
        let mut prev_b = 180.0;
        for b in [1e5, 1e6, 5e6, 1e7, 5e7, 1e8] {
            let d = theoretical_deflection(b, 16.01e3, MU_EARTH).unwrap();
            assert!(d > 0.0 && d < 180.0);
            assert!(d < prev_b, "not decreasing in b at {}", b);
            prev_b = d;
        }

        let mut prev_v = 180.0;
        for v in [1e3, 5e3, 1e4, 2e4, 5e4] {
            let d = theoretical_deflection(8.973e6, v, MU_EARTH).unwrap();
            assert!(d < prev_v, "not decreasing in v_inf at {}", v);
            prev_v = d;
        }
    }

    #[test]
    fn velocity_gain_bounded() {
        for b in [1e5, 8.973e6, 1e9] {
            let a = alpha(b, 16.01e3, MU_EARTH).unwrap();
            let dv = velocity_gain(16.01e3, a);
            assert!(dv > 0.0 && dv <= 2.0 * 16.01e3);
        }
    }

    #[test]
    fn heading_from_last_two_samples() {
        // 45 deg heading regardless of direction signs
        let states = [at(0.0, 0.0), at(5.0, 5.0), at(4.0, 6.0)];
        let d = numerical_deflection(&states).unwrap();
        assert!((d - 45.0).abs() < 1e-12);
    }

    #[test]
    fn single_sample_is_insufficient() {
        assert_eq!(
            numerical_deflection(&[at(1.0, 1.0)]),
            Err(FlybyError::InsufficientData { samples: 1 })
        );
        assert!(numerical_deflection(&[]).is_err());
    }

    #[test]
    fn percent_difference_cases() {
        assert!((percent_difference(20.0, 19.0).unwrap() - 5.0).abs() < 1e-12);
        assert!((percent_difference(20.0, 21.0).unwrap() - 5.0).abs() < 1e-12);
        assert!(matches!(
            percent_difference(0.0, 1.0),
            Err(FlybyError::DivisionByZero { .. })
        ));
    }
}
