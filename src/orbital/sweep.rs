use crate::error::{FlybyError, Result};
use super::deflection::theoretical_deflection;
use super::hyperbolic::check_encounter;

/// Inclusive, evenly spaced sample range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl SweepRange {
    pub fn new(min: f64, max: f64, samples: usize) -> Self {
        Self { min, max, samples }
    }

    /// Impact parameters 2,000 .. 20,000 km.
    pub fn impact_default() -> Self {
        Self::new(2e6, 2e7, 500)
    }

    /// Approach speeds 5 .. 25 km/s.
    pub fn speed_default() -> Self {
        Self::new(5e3, 25e3, 1000)
    }

    fn validate(&self, what: &str) -> Result<()> {
        if self.samples < 2 {
            return Err(FlybyError::input(format!(
                "{} sweep needs at least 2 samples, got {}",
                what, self.samples
            )));
        }
        if !(self.min > 0.0) || !self.max.is_finite() || self.min >= self.max {
            return Err(FlybyError::input(format!(
                "{} sweep range must satisfy 0 < min < max, got {}..{}",
                what, self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        let step = match self.samples {
            0 | 1 => 0.0,
            n => (self.max - self.min) / (n - 1) as f64,
        };
        (0..self.samples).map(move |i| self.min + step * i as f64)
    }
}

/// (b, delta deg) for fixed approach speed.
pub fn deflection_vs_impact(range: &SweepRange, v_inf: f64, mu: f64) -> Result<Vec<(f64, f64)>> {
    range.validate("impact parameter")?;
    check_encounter(range.min, v_inf, mu)?;
    range
        .values()
        .map(|b| Ok((b, theoretical_deflection(b, v_inf, mu)?)))
        .collect()
}

/// (v_inf, delta deg) for fixed impact parameter.
pub fn deflection_vs_speed(range: &SweepRange, b: f64, mu: f64) -> Result<Vec<(f64, f64)>> {
    range.validate("approach speed")?;
    check_encounter(b, range.min, mu)?;
    range
        .values()
        .map(|v| Ok((v, theoretical_deflection(b, v, mu)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::MU_EARTH;

    #[test]
    fn impact_sweep_endpoints() {
        let series = deflection_vs_impact(&SweepRange::impact_default(), 16.01e3, MU_EARTH).unwrap();
        assert_eq!(series.len(), 500);
        assert_eq!(series[0].0, 2e6);
        assert!((series[499].0 - 2e7).abs() < 1e-6);
        assert!(series.windows(2).all(|w| w[1].1 < w[0].1), "deflection should fall with b");
    }

    #[test]
    fn speed_sweep_decreasing() {
        let series = deflection_vs_speed(&SweepRange::speed_default(), 8.973e6, MU_EARTH).unwrap();
        assert_eq!(series.len(), 1000);
        assert!(series.windows(2).all(|w| w[1].1 < w[0].1));
    }

    #[test]
    fn bad_ranges_rejected() {
        assert!(deflection_vs_impact(&SweepRange::new(2e6, 2e7, 1), 16.01e3, MU_EARTH).is_err());
        assert!(deflection_vs_impact(&SweepRange::new(2e7, 2e6, 10), 16.01e3, MU_EARTH).is_err());
        assert!(deflection_vs_speed(&SweepRange::new(0.0, 1e4, 10), 8.973e6, MU_EARTH).is_err());
    }
}
