pub mod deflection;
pub mod hyperbolic;
pub mod sweep;

pub use deflection::{
    numerical_deflection, percent_difference, theoretical_deflection, velocity_gain,
    DeflectionResult,
};
pub use hyperbolic::{alpha, conic_points, HyperbolicFlyby};
pub use sweep::{deflection_vs_impact, deflection_vs_speed, SweepRange};
