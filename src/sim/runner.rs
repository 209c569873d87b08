use log::{debug, info, warn};
use nalgebra::Vector2;

use crate::dynamics::state::{CentralBody, OrbitalParameters, SimConfig, State};
use crate::error::{FlybyError, Result};
use super::event::{EscapeDetector, EventDetector, EventKind, PeriapsisDetector, SimEvent};

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

/// How a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Escape condition met before the step ceiling
    Escaped,
    /// `max_steps` reached
    Exhausted,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::Escaped => "escaped",
            Termination::Exhausted => "exhausted",
        }
    }
}

/// Ordered state samples of one run, index = step number.
/// Always holds `steps_taken() + 1` samples.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub states: Vec<State>,
    pub termination: Termination,
    pub events: Vec<SimEvent>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn steps_taken(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector2<f64>> + '_ {
        self.states.iter().map(|s| s.pos)
    }

    /// Sample nearest to the central body.
    pub fn closest_approach(&self) -> Option<&State> {
        self.states
            .iter()
            .min_by(|a, b| a.radius().total_cmp(&b.radius()))
    }

    /// Periapsis event, if the run got past closest approach.
    pub fn periapsis(&self) -> Option<&SimEvent> {
        self.events.iter().find(|e| e.kind == EventKind::Periapsis)
    }
}

// ---------------------------------------------------------------------------
// Initial conditions
// ---------------------------------------------------------------------------

/// Start state at `x0` upstream, offset by the impact parameter, moving along
/// +x with the speed that matches `v_inf` at infinity (energy conservation).
pub fn initial_state(params: &OrbitalParameters, body: &CentralBody, x0: f64) -> State {
    let y0 = params.impact_parameter;
    let r0 = (x0 * x0 + y0 * y0).sqrt();
    let v_inf = params.approach_speed;
    let vx0 = (v_inf * v_inf + 2.0 * body.mu / r0).sqrt();

    State {
        time: 0.0,
        pos: Vector2::new(x0, y0),
        vel: Vector2::new(vx0, 0.0),
    }
}

// ---------------------------------------------------------------------------
// Run driver
// ---------------------------------------------------------------------------

/// Integrate from `initial` with the configured stepping method.
///
/// Stops after `config.max_steps` steps, or earlier when `config.escape` is
/// set and the escape condition (x > 0, r > 2*|x of initial|) holds after a
/// step; the terminating sample is kept. `config.x0` is not used here.
pub fn integrate(initial: &State, config: &SimConfig, mu: f64) -> Result<Trajectory> {
    config.validate_dt()?;
    if !(mu > 0.0) {
        return Err(FlybyError::input(format!(
            "gravitational parameter mu must be positive, got {}",
            mu
        )));
    }

    debug!(
        "integrating with {} (dt={} s, max_steps={}, escape={})",
        config.method, config.dt, config.max_steps, config.escape
    );

    let capacity = config.max_steps.saturating_add(1);
    let mut states = Vec::with_capacity(capacity.min(100_000));
    let mut events = Vec::new();
    states.push(*initial);

    let mut escape = config.escape.then(|| EscapeDetector::from_start(initial.pos.x));
    let mut periapsis = PeriapsisDetector::new();
    let mut termination = Termination::Exhausted;
    let mut state = *initial;

    for step in 1..=config.max_steps {
        let next = config.method.step(&state, mu, config.dt)?;

        if let Some(kind) = periapsis.check(&state, &next) {
            events.push(SimEvent { step, kind, state: next });
        }

        let escaped = escape
            .as_mut()
            .and_then(|det| det.check(&state, &next));

        states.push(next);
        state = next;

        if let Some(kind) = escaped {
            events.push(SimEvent { step, kind, state: next });
            termination = Termination::Escaped;
            break;
        }
    }

    info!(
        "run {} after {} steps (t={:.1} s, r={:.0} km)",
        termination.as_str(),
        states.len() - 1,
        state.time,
        state.radius() / 1000.0
    );

    Ok(Trajectory { states, termination, events })
}

/// Validate the encounter, build the initial state and integrate it.
pub fn simulate_flyby(
    params: &OrbitalParameters,
    body: &CentralBody,
    config: &SimConfig,
) -> Result<Trajectory> {
    params.validate()?;
    config.validate()?;

    let initial = initial_state(params, body, config.x0);
    let trajectory = integrate(&initial, config, body.mu)?;

    if let Some(closest) = trajectory.closest_approach() {
        if closest.radius() < body.radius {
            warn!(
                "closest approach {:.0} km is inside the central body (radius {:.0} km)",
                closest.radius() / 1000.0,
                body.radius / 1000.0
            );
        }
    }

    Ok(trajectory)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
