use nalgebra::Vector2;

use crate::dynamics::state::OrbitalParameters;
use crate::error::{FlybyError, Result};

/// Check the three encounter inputs shared by every closed-form formula.
pub(crate) fn check_encounter(b: f64, v_inf: f64, mu: f64) -> Result<()> {
    for (name, value) in [("impact parameter b", b), ("approach speed v_inf", v_inf), ("mu", mu)] {
        if !(value > 0.0) || !value.is_finite() {
            return Err(FlybyError::input(format!("{} must be positive, got {}", name, value)));
        }
    }
    Ok(())
}

/// alpha = 1 / sqrt(1 + b^2 v_inf^4 / mu^2) = sin(delta / 2), in (0, 1].
pub fn alpha(b: f64, v_inf: f64, mu: f64) -> Result<f64> {
    check_encounter(b, v_inf, mu)?;
    let q = b * v_inf * v_inf / mu;
    Ok(1.0 / (1.0 + q * q).sqrt())
}

/// Closed-form hyperbola of a flyby encounter.
#[derive(Debug, Clone, Copy)]
pub struct HyperbolicFlyby {
    pub alpha: f64,          // sin(delta / 2)
    pub eccentricity: f64,   // 1 / alpha
    pub sma: f64,            // m, negative for a hyperbola
    pub periapsis: f64,      // m, closest approach radius
    pub v_periapsis: f64,    // m/s
    pub turn_angle: f64,     // rad, full deflection
}

impl HyperbolicFlyby {
    pub fn new(params: &OrbitalParameters, mu: f64) -> Result<Self> {
        let v_inf = params.approach_speed;
        let alpha = alpha(params.impact_parameter, v_inf, mu)?;
        let eccentricity = 1.0 / alpha;
        let sma = -mu / (v_inf * v_inf);
        let periapsis = sma * (1.0 - eccentricity);
        let v_periapsis = (v_inf * v_inf + 2.0 * mu / periapsis).sqrt();

        Ok(Self {
            alpha,
            eccentricity,
            sma,
            periapsis,
            v_periapsis,
            turn_angle: 2.0 * alpha.asin(),
        })
    }

    /// Semi-latus rectum p = a (1 - e^2), m.
    pub fn semi_latus_rectum(&self) -> f64 {
        self.sma * (1.0 - self.eccentricity * self.eccentricity)
    }
}

// ---------------------------------------------------------------------------
// Conic sampling
// ---------------------------------------------------------------------------

/// Polar conic r = l / (1 + e cos theta). `None` past the asymptotes.
pub fn conic_radius(l: f64, e: f64, theta: f64) -> Option<f64> {
    let denom = 1.0 + e * theta.cos();
    if denom <= 0.0 {
        return None;
    }
    Some(l / denom)
}

/// Cartesian points of the conic, focus at the origin, periapsis on +x.
pub fn conic_points(l: f64, e: f64, theta_min: f64, theta_max: f64, samples: usize) -> Vec<Vector2<f64>> {
    if samples == 0 {
        return Vec::new();
    }
    let span = theta_max - theta_min;
    let divisor = (samples.max(2) - 1) as f64;

    (0..samples)
        .filter_map(|i| {
            let theta = theta_min + span * i as f64 / divisor;
            conic_radius(l, e, theta).map(|r| Vector2::new(r * theta.cos(), r * theta.sin()))
        })
        .collect()
}

/// Unit-scale hyperbola: e = 1.5, l = 1, theta in [-2pi/3, 2pi/3].
pub fn reference_hyperbola(samples: usize) -> Vec<Vector2<f64>> {
    let limit = 2.0 * std::f64::consts::PI / 3.0;
    conic_points(1.0, 1.5, -limit, limit, samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::MU_EARTH;

    #[test]
    fn cassini_geometry() {
        let flyby = HyperbolicFlyby::new(&OrbitalParameters::new(8.973e6, 16.01e3), MU_EARTH).unwrap();
        assert!(flyby.eccentricity > 5.8 && flyby.eccentricity < 5.9, "e = {}", flyby.eccentricity);
        // ~7,550 km closest approach, above the surface
        assert!(
            flyby.periapsis > 7.4e6 && flyby.periapsis < 7.7e6,
            "rp = {:.0} m",
            flyby.periapsis
        );
        assert!((flyby.turn_angle.to_degrees() - 19.66).abs() < 0.01);
        // vis-viva at periapsis
        let energy = 0.5 * flyby.v_periapsis.powi(2) - MU_EARTH / flyby.periapsis;
        assert!((energy - 0.5 * 16.01e3_f64.powi(2)).abs() < 1e-3);
    }

    #[test]
    fn sampled_conic_reaches_periapsis() {
        let flyby = HyperbolicFlyby::new(&OrbitalParameters::new(11.261e6, 8.949e3), MU_EARTH).unwrap();
        let l = flyby.semi_latus_rectum();
        assert!((l - flyby.periapsis * (1.0 + flyby.eccentricity)).abs() / l < 1e-12);

        let pts = conic_points(l, flyby.eccentricity, -1.0, 1.0, 201);
        let rp = pts.iter().map(|p| p.norm()).fold(f64::INFINITY, f64::min);
        assert!((rp - flyby.periapsis).abs() / flyby.periapsis < 1e-9);
    }

    #[test]
    fn alpha_rejects_non_positive() {
        assert!(alpha(0.0, 1.0, 1.0).is_err());
        assert!(alpha(1.0, 0.0, 1.0).is_err());
        let err = alpha(1.0, 1.0, -1.0).unwrap_err();
        assert!(err.to_string().contains("mu"));
    }

    #[test]
    fn conic_skips_points_beyond_asymptotes() {
        // e = 1.5: asymptote at cos(theta) = -2/3, about 131.8 deg
        assert!(conic_radius(1.0, 1.5, 0.0).is_some());
        assert!(conic_radius(1.0, 1.5, std::f64::consts::PI).is_none());

        let pts = reference_hyperbola(1000);
        assert_eq!(pts.len(), 1000);
        // periapsis at r = l / (1 + e)
        let rp = pts.iter().map(|p| p.norm()).fold(f64::INFINITY, f64::min);
        assert!((rp - 0.4).abs() < 1e-4);
    }
}
