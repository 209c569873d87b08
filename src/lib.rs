pub mod error;
pub mod physics;
pub mod dynamics;
pub mod sim;
pub mod orbital;
pub mod scenario;
pub mod io;

pub use error::{FlybyError, Result};

pub mod types {
    pub use crate::dynamics::state::{
        CentralBody, Deriv, OrbitalParameters, SimConfig, State, EARTH_MASS, EARTH_RADIUS,
        GRAVITATIONAL_CONSTANT, MU_EARTH,
    };
    pub use crate::scenario::Scenario;
    pub use crate::sim::{Method, Termination, Trajectory};
}
