//! Named flyby scenarios and their TOML representation.
//!
//! ```toml
//! name = "Cassini"
//!
//! [orbit]
//! impact_parameter = 8.973e6
//! approach_speed = 16.01e3
//!
//! [body]            # optional, defaults to Earth
//! mu = 3.98571e14
//! radius = 6.371e6
//!
//! [sim]             # optional, any field may be omitted
//! method = "rk4"
//! dt = 1.0
//! max_steps = 500000
//! x0 = -5.0e8
//! escape = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dynamics::state::{CentralBody, OrbitalParameters, SimConfig};
use crate::error::{FlybyError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub orbit: OrbitalParameters,
    #[serde(default)]
    pub body: CentralBody,
    #[serde(default)]
    pub sim: SimConfig,
}

impl Scenario {
    pub fn new(name: impl Into<String>, orbit: OrbitalParameters) -> Self {
        Self {
            name: name.into(),
            orbit,
            body: CentralBody::earth(),
            sim: SimConfig::default(),
        }
    }

    pub fn with_sim(mut self, sim: SimConfig) -> Self {
        self.sim = sim;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FlybyError::ConfigLoad { message: e.to_string() })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FlybyError::ConfigLoad {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FlybyError::ConfigLoad { message: e.to_string() })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(|e| FlybyError::ConfigLoad {
            message: format!("{}: {}", path.display(), e),
        })
    }
}

// ---------------------------------------------------------------------------
// Preset scenarios
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Cassini Earth flyby, August 1999.
    pub fn cassini() -> Scenario {
        Scenario::new("Cassini", OrbitalParameters::new(8.973e6, 16.01e3))
    }

    /// Galileo first Earth flyby, December 1990.
    pub fn galileo_i() -> Scenario {
        Scenario::new("Galileo I", OrbitalParameters::new(11.261e6, 8.949e3))
    }

    pub fn all() -> Vec<Scenario> {
        vec![cassini(), galileo_i()]
    }

    /// Case-insensitive lookup; accepts "galileo" for Galileo I.
    pub fn by_name(name: &str) -> Option<Scenario> {
        match name.to_ascii_lowercase().replace([' ', '_', '-'], "").as_str() {
            "cassini" => Some(cassini()),
            "galileo" | "galileoi" | "galileo1" => Some(galileo_i()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::integrator::Method;

    #[test]
    fn minimal_file_uses_defaults() {
        let s = Scenario::from_toml_str(
            r#"
            name = "Test"

            [orbit]
            impact_parameter = 1.0e7
            approach_speed = 9.0e3
            "#,
        )
        .unwrap();
        assert_eq!(s.orbit, OrbitalParameters::new(1e7, 9e3));
        assert_eq!(s.body, CentralBody::earth());
        assert_eq!(s.sim, SimConfig::default());
    }

    #[test]
    fn partial_sim_section() {
        let s = Scenario::from_toml_str(
            r#"
            name = "Euler"
            [orbit]
            impact_parameter = 1.0e7
            approach_speed = 9.0e3
            [sim]
            method = "euler"
            escape = false
            "#,
        )
        .unwrap();
        assert_eq!(s.sim.method, Method::Euler);
        assert!(!s.sim.escape);
        assert_eq!(s.sim.dt, SimConfig::default().dt);
    }

    #[test]
    fn toml_roundtrip() {
        let s = presets::galileo_i().with_sim(SimConfig::euler_mission());
        let text = s.to_toml_string().unwrap();
        assert_eq!(Scenario::from_toml_str(&text).unwrap(), s);
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("flyby-scenario-{}.toml", std::process::id()));
        let s = presets::cassini().with_sim(SimConfig::rk4_mission());
        s.save(&path).unwrap();
        let loaded = Scenario::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), s);
    }

    #[test]
    fn bad_file_reports_config_error() {
        let err = Scenario::from_toml_str("name = 3").unwrap_err();
        assert!(matches!(err, FlybyError::ConfigLoad { .. }));
        assert!(Scenario::load("/nonexistent/flyby.toml").is_err());
    }

    #[test]
    fn preset_lookup() {
        assert_eq!(presets::by_name("CASSINI").unwrap().name, "Cassini");
        assert_eq!(presets::by_name("galileo-i").unwrap().name, "Galileo I");
        assert!(presets::by_name("voyager").is_none());
    }
}
