use std::io::{self, Write};

use crate::error::Result;
use crate::orbital::{velocity_gain, DeflectionResult, HyperbolicFlyby};
use crate::scenario::Scenario;
use crate::sim::runner::{Termination, Trajectory};

/// Summary statistics computed from a flyby trajectory.
#[derive(Debug, Clone)]
pub struct FlybySummary {
    pub termination: Termination,
    pub steps: usize,
    pub flight_time: f64,
    pub deflection: DeflectionResult,
    pub velocity_gain: f64,       // m/s
    pub periapsis_analytic: f64,  // m
    pub closest_approach: f64,    // m, observed
    pub final_speed: f64,         // m/s
}

impl FlybySummary {
    /// Compute summary from a scenario and its trajectory.
    pub fn from_trajectory(scenario: &Scenario, trajectory: &Trajectory) -> Result<Self> {
        let deflection = DeflectionResult::evaluate(&scenario.orbit, &scenario.body, &trajectory.states)?;
        let hyperbola = HyperbolicFlyby::new(&scenario.orbit, scenario.body.mu)?;

        let closest_approach = trajectory
            .closest_approach()
            .map_or(f64::NAN, |s| s.radius());
        let (flight_time, final_speed) = trajectory
            .last()
            .map_or((0.0, 0.0), |s| (s.time, s.speed()));

        Ok(FlybySummary {
            termination: trajectory.termination,
            steps: trajectory.steps_taken(),
            flight_time,
            deflection,
            velocity_gain: velocity_gain(scenario.orbit.approach_speed, hyperbola.alpha),
            periapsis_analytic: hyperbola.periapsis,
            closest_approach,
            final_speed,
        })
    }
}

fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Write flyby summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    scenario: &Scenario,
    summary: &FlybySummary,
) -> io::Result<()> {
    let sim = &scenario.sim;
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"scenario\": {{")?;
    writeln!(writer, "    \"name\": \"{}\",", escape_json(&scenario.name))?;
    writeln!(writer, "    \"impact_parameter_m\": {:.3},", scenario.orbit.impact_parameter)?;
    writeln!(writer, "    \"approach_speed_ms\": {:.3},", scenario.orbit.approach_speed)?;
    writeln!(writer, "    \"mu_m3s2\": {:.6e},", scenario.body.mu)?;
    writeln!(writer, "    \"body_radius_m\": {:.1}", scenario.body.radius)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"config\": {{")?;
    writeln!(writer, "    \"method\": \"{}\",", sim.method)?;
    writeln!(writer, "    \"dt_s\": {},", sim.dt)?;
    writeln!(writer, "    \"max_steps\": {},", sim.max_steps)?;
    writeln!(writer, "    \"x0_m\": {:.1},", sim.x0)?;
    writeln!(writer, "    \"escape\": {}", sim.escape)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"run\": {{")?;
    writeln!(writer, "    \"termination\": \"{}\",", summary.termination.as_str())?;
    writeln!(writer, "    \"steps\": {},", summary.steps)?;
    writeln!(writer, "    \"flight_time_s\": {:.2},", summary.flight_time)?;
    writeln!(writer, "    \"final_speed_ms\": {:.3}", summary.final_speed)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"deflection\": {{")?;
    writeln!(writer, "    \"theoretical_deg\": {:.6},", summary.deflection.theoretical_deg)?;
    writeln!(writer, "    \"numerical_deg\": {:.6},", summary.deflection.numerical_deg)?;
    writeln!(writer, "    \"percent_difference\": {:.6},", summary.deflection.percent_difference)?;
    writeln!(writer, "    \"velocity_gain_ms\": {:.3},", summary.velocity_gain)?;
    writeln!(writer, "    \"periapsis_analytic_m\": {:.1},", summary.periapsis_analytic)?;
    writeln!(writer, "    \"closest_approach_m\": {:.1}", summary.closest_approach)?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write flyby summary JSON to a file.
pub fn write_summary_file(
    path: &str,
    scenario: &Scenario,
    summary: &FlybySummary,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, scenario, summary)
}
