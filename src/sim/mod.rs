pub mod integrator;
pub mod runner;
pub mod event;

pub use runner::{initial_state, integrate, simulate_flyby, Termination, Trajectory};
pub use integrator::{euler_step, rk4_step, Method};
