use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use flyby_sim::dynamics::state::SimConfig;
use flyby_sim::io::{csv, json};
use flyby_sim::orbital::{self, HyperbolicFlyby, SweepRange};
use flyby_sim::scenario::{presets, Scenario};
use flyby_sim::sim::{self, Method, Trajectory};

/// Gravity-assist flyby simulator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Integrate one flyby and compare its deflection with the analytic value
    Run(RunArgs),
    /// Integrate several scenarios with the same settings
    Compare(CompareArgs),
    /// Tabulate the analytic deflection over a parameter range
    Sweep(SweepArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Profile {
    /// RK4, dt = 1 s, escape on
    Default,
    /// RK4, dt = 0.01 s, 8,000,000 steps, x0 = -500,000 km, escape on
    Rk4Mission,
    /// Euler, dt = 1 s, 10,000 steps, x0 = -50,000 km, escape off
    EulerMission,
}

impl Profile {
    fn config(self) -> SimConfig {
        match self {
            Profile::Default => SimConfig::default(),
            Profile::Rk4Mission => SimConfig::rk4_mission(),
            Profile::EulerMission => SimConfig::euler_mission(),
        }
    }
}

#[derive(Args, Debug)]
struct SimArgs {
    /// Start from a named step configuration instead of the scenario's
    #[arg(long, value_enum)]
    profile: Option<Profile>,

    /// Integration method (euler, rk4)
    #[arg(short = 'm', long, value_name = "METHOD")]
    method: Option<Method>,

    /// Time step, s
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    dt: Option<f64>,

    /// Step ceiling
    #[arg(short = 'n', long, value_name = "COUNT")]
    max_steps: Option<usize>,

    /// Start offset along x, m (negative)
    #[arg(long, value_name = "METERS", allow_negative_numbers = true)]
    x0: Option<f64>,

    /// Stop once the outbound leg passes 2*|x0|
    #[arg(long, conflicts_with = "no_escape")]
    escape: bool,

    /// Run the full step count
    #[arg(long)]
    no_escape: bool,
}

impl SimArgs {
    fn apply(&self, base: &SimConfig) -> SimConfig {
        let mut config = self.profile.map_or_else(|| base.clone(), Profile::config);
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(dt) = self.dt {
            config.dt = dt;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(x0) = self.x0 {
            config.x0 = x0;
        }
        if self.escape {
            config.escape = true;
        } else if self.no_escape {
            config.escape = false;
        }
        config
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Preset scenario (cassini, galileo)
    #[arg(short = 'p', long, value_name = "NAME", default_value = "cassini")]
    preset: String,

    /// Scenario file (TOML), takes precedence over --preset
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Impact parameter b, m
    #[arg(short = 'b', long, value_name = "METERS", allow_negative_numbers = true)]
    impact_parameter: Option<f64>,

    /// Asymptotic approach speed, m/s
    #[arg(long, value_name = "M/S", allow_negative_numbers = true)]
    vinf: Option<f64>,

    #[command(flatten)]
    sim: SimArgs,

    /// Write the trajectory as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<String>,

    /// Write a JSON summary
    #[arg(long, value_name = "FILE")]
    json: Option<String>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Scenario files (TOML); defaults to all presets
    #[arg(value_name = "FILE")]
    configs: Vec<PathBuf>,

    #[command(flatten)]
    sim: SimArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum SweepKind {
    /// Deflection vs impact parameter
    Impact,
    /// Deflection vs approach speed
    Speed,
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[arg(value_enum)]
    kind: SweepKind,

    /// Range start (m for impact, m/s for speed)
    #[arg(long, allow_negative_numbers = true)]
    min: Option<f64>,

    /// Range end
    #[arg(long, allow_negative_numbers = true)]
    max: Option<f64>,

    /// Number of samples
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Fixed impact parameter for a speed sweep, m
    #[arg(short = 'b', long, default_value_t = 8.973e6, allow_negative_numbers = true)]
    impact_parameter: f64,

    /// Fixed approach speed for an impact sweep, m/s
    #[arg(long, default_value_t = 16.01e3, allow_negative_numbers = true)]
    vinf: f64,

    /// Write the series as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Run(args) => run(args),
        Command::Compare(args) => compare(args),
        Command::Sweep(args) => sweep(args),
    }
}

fn load_scenario(config: Option<&PathBuf>, preset: &str) -> Result<Scenario> {
    match config {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display())),
        None => presets::by_name(preset)
            .ok_or_else(|| anyhow!("unknown preset '{}' (expected cassini or galileo)", preset)),
    }
}

fn simulate(scenario: &Scenario) -> Result<Trajectory> {
    sim::simulate_flyby(&scenario.orbit, &scenario.body, &scenario.sim)
        .with_context(|| format!("flyby '{}' failed", scenario.name))
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

impl RunArgs {
    /// Scenario with the command-line overrides applied.
    fn scenario(&self) -> Result<Scenario> {
        let mut scenario = load_scenario(self.config.as_ref(), &self.preset)?;
        if let Some(b) = self.impact_parameter {
            scenario.orbit.impact_parameter = b;
        }
        if let Some(v) = self.vinf {
            scenario.orbit.approach_speed = v;
        }
        scenario.sim = self.sim.apply(&scenario.sim);
        Ok(scenario)
    }
}

fn run(args: RunArgs) -> Result<()> {
    let scenario = args.scenario()?;
    let trajectory = simulate(&scenario)?;
    let summary = json::FlybySummary::from_trajectory(&scenario, &trajectory)?;
    let hyperbola = HyperbolicFlyby::new(&scenario.orbit, scenario.body.mu)?;

    println!();
    println!("====================================================================");
    println!("  GRAVITY-ASSIST FLYBY — {}", scenario.name);
    println!("====================================================================");
    println!();
    println!("  Encounter");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Impact param:  {:>10.1} km    v_inf:        {:>8.3} km/s",
        scenario.orbit.impact_parameter / 1000.0,
        scenario.orbit.approach_speed / 1000.0
    );
    println!(
        "  Eccentricity:  {:>10.4}       Periapsis:    {:>8.1} km",
        hyperbola.eccentricity,
        hyperbola.periapsis / 1000.0
    );
    println!(
        "  Body radius:   {:>10.1} km    v_periapsis:  {:>8.3} km/s",
        scenario.body.radius / 1000.0,
        hyperbola.v_periapsis / 1000.0
    );
    println!();

    let sim = &scenario.sim;
    println!("  Integration");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Method:        {:>10}       dt:           {:>8} s",
        sim.method, sim.dt
    );
    println!(
        "  Steps:         {:>10} / {}  ({})",
        summary.steps,
        sim.max_steps,
        summary.termination.as_str()
    );
    println!(
        "  Flight time:   {:>10.1} s     Closest:      {:>8.1} km",
        summary.flight_time,
        summary.closest_approach / 1000.0
    );
    println!();

    println!("  Deflection");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Theoretical angle:   {:>10.4} deg", summary.deflection.theoretical_deg);
    println!("  Numerical angle:     {:>10.4} deg", summary.deflection.numerical_deg);
    println!("  Percent difference:  {:>10.4} %", summary.deflection.percent_difference);
    println!("  Velocity gain:       {:>10.3} km/s", summary.velocity_gain / 1000.0);
    println!("====================================================================");
    println!();

    if let Some(path) = &args.csv {
        csv::write_trajectory_file(path, &trajectory.states)
            .with_context(|| format!("failed to write {}", path))?;
        println!("  Trajectory written to {}", path);
    }
    if let Some(path) = &args.json {
        json::write_summary_file(path, &scenario, &summary)
            .with_context(|| format!("failed to write {}", path))?;
        println!("  Summary written to {}", path);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// compare
// ---------------------------------------------------------------------------

fn compare(args: CompareArgs) -> Result<()> {
    let scenarios = if args.configs.is_empty() {
        presets::all()
    } else {
        args.configs
            .iter()
            .map(|path| load_scenario(Some(path), ""))
            .collect::<Result<Vec<_>>>()?
    };

    println!(
        "  {:<14}  {:>10}  {:>8}  {:>9}  {:>9}  {:>7}  {:>9}",
        "scenario", "b (km)", "v_inf", "theo (°)", "num (°)", "diff %", "steps"
    );
    println!("  {}", "─".repeat(80));

    for mut scenario in scenarios {
        scenario.sim = args.sim.apply(&scenario.sim);
        let trajectory = simulate(&scenario)?;
        let result = orbital::DeflectionResult::evaluate(&scenario.orbit, &scenario.body, &trajectory.states)?;

        println!(
            "  {:<14}  {:>10.1}  {:>8.3}  {:>9.4}  {:>9.4}  {:>7.3}  {:>9}",
            scenario.name,
            scenario.orbit.impact_parameter / 1000.0,
            scenario.orbit.approach_speed / 1000.0,
            result.theoretical_deg,
            result.numerical_deg,
            result.percent_difference,
            trajectory.steps_taken(),
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// sweep
// ---------------------------------------------------------------------------

fn sweep(args: SweepArgs) -> Result<()> {
    let mu = flyby_sim::types::MU_EARTH;
    let (defaults, label, unit) = match args.kind {
        SweepKind::Impact => (SweepRange::impact_default(), "impact_parameter_m", "b (km)"),
        SweepKind::Speed => (SweepRange::speed_default(), "approach_speed_ms", "v_inf (km/s)"),
    };
    let range = SweepRange::new(
        args.min.unwrap_or(defaults.min),
        args.max.unwrap_or(defaults.max),
        args.samples.unwrap_or(defaults.samples),
    );

    let series = match args.kind {
        SweepKind::Impact => orbital::deflection_vs_impact(&range, args.vinf, mu)?,
        SweepKind::Speed => orbital::deflection_vs_speed(&range, args.impact_parameter, mu)?,
    };

    if let Some(path) = &args.csv {
        csv::write_series_file(path, label, &series)
            .with_context(|| format!("failed to write {}", path))?;
        println!("  {} samples written to {}", series.len(), path);
        return Ok(());
    }

    println!("  {:>14}  {:>12}", unit, "delta (deg)");
    println!("  {}", "─".repeat(30));
    let interval = (series.len() / 25).max(1);
    for (i, (x, delta)) in series.iter().enumerate() {
        if i % interval == 0 || i == series.len() - 1 {
            println!("  {:>14.3}  {:>12.4}", x / 1000.0, delta);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyby_sim::FlybyError;

    fn run_args(argv: &[&str]) -> RunArgs {
        let cli = Cli::try_parse_from(std::iter::once("flyby-sim").chain(argv.iter().copied()))
            .unwrap();
        match cli.command {
            Command::Run(args) => args,
            other => panic!("expected run, got {:?}", other),
        }
    }

    fn flyby_error(argv: &[&str]) -> FlybyError {
        let scenario = run_args(argv).scenario().unwrap();
        sim::simulate_flyby(&scenario.orbit, &scenario.body, &scenario.sim).unwrap_err()
    }

    #[test]
    fn negative_dt_reaches_validation() {
        let err = flyby_error(&["run", "--dt", "-1"]);
        assert!(matches!(err, FlybyError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("time step dt"), "{}", err);
    }

    #[test]
    fn negative_encounter_values_reach_validation() {
        let err = flyby_error(&["run", "-b", "-5"]);
        assert!(matches!(err, FlybyError::InvalidInput { .. }));
        assert!(err.to_string().contains("impact parameter b"), "{}", err);

        let err = flyby_error(&["run", "--vinf", "-16010"]);
        assert!(matches!(err, FlybyError::InvalidInput { .. }));
        assert!(err.to_string().contains("approach speed v_inf"), "{}", err);
    }

    #[test]
    fn overrides_apply_over_preset() {
        let scenario = run_args(&["run", "-p", "galileo", "--profile", "euler-mission", "-n", "42"])
            .scenario()
            .unwrap();
        assert_eq!(scenario.name, "Galileo I");
        assert_eq!(scenario.sim.method, Method::Euler);
        assert_eq!(scenario.sim.max_steps, 42);
        assert!(!scenario.sim.escape);
    }

    #[test]
    fn sweep_accepts_negative_bounds() {
        let cli = Cli::try_parse_from(["flyby-sim", "sweep", "impact", "--min", "-1000000"]).unwrap();
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.min, Some(-1e6));
        assert!(sweep(args).is_err());
    }
}
