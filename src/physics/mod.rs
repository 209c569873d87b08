pub mod gravity;

pub use gravity::{gravity_accel, gravity_accel_xy};
