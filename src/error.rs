use std::fmt;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by the integrator, the diagnostics and scenario loading.
/// All of them are fatal to the current run.
#[derive(Debug, Clone, PartialEq)]
pub enum FlybyError {
    /// Non-positive time step, non-finite step or bad start offset
    InvalidConfiguration {
        /// Which parameter violated its precondition
        message: String,
    },
    /// Non-positive impact parameter, approach speed or mu
    InvalidInput {
        message: String,
    },
    /// A trajectory too short to estimate a heading from
    InsufficientData {
        /// Number of samples actually present
        samples: usize,
    },
    DivisionByZero {
        message: String,
    },
    /// Position coincides with the point mass
    UndefinedAcceleration {
        x: f64,
        y: f64,
    },
    /// Scenario file could not be read or parsed
    ConfigLoad {
        message: String,
    },
}

impl FlybyError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        FlybyError::InvalidConfiguration { message: message.into() }
    }

    pub(crate) fn input(message: impl Into<String>) -> Self {
        FlybyError::InvalidInput { message: message.into() }
    }
}

impl fmt::Display for FlybyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlybyError::InvalidConfiguration { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
            FlybyError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FlybyError::InsufficientData { samples } => write!(
                f,
                "Insufficient data: need at least 2 trajectory samples, got {}",
                samples
            ),
            FlybyError::DivisionByZero { message } => write!(f, "Division by zero: {}", message),
            FlybyError::UndefinedAcceleration { x, y } => write!(
                f,
                "Undefined acceleration at ({}, {}): position coincides with the central body",
                x, y
            ),
            FlybyError::ConfigLoad { message } => {
                write!(f, "Failed to load scenario: {}", message)
            }
        }
    }
}

impl std::error::Error for FlybyError {}

pub type Result<T> = std::result::Result<T, FlybyError>;
