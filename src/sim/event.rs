use crate::dynamics::state::State;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of flyby events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Closest approach to the central body
    Periapsis,
    /// Outbound leg has receded past the escape radius
    Escape,
}

/// A discrete event that occurred during a run.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub step: usize,
    pub kind: EventKind,
    pub state: State,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive states and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind>;
}

/// Fires once the spacecraft is downstream of the body (x > 0) and farther
/// than `radius` from it.
pub struct EscapeDetector {
    pub radius: f64,
}

impl EscapeDetector {
    /// Escape radius of twice the upstream start distance.
    pub fn from_start(x0: f64) -> Self {
        Self { radius: 2.0 * x0.abs() }
    }

    pub fn escaped(&self, state: &State) -> bool {
        state.pos.x > 0.0 && state.radius() > self.radius
    }
}

impl EventDetector for EscapeDetector {
    fn check(&mut self, _prev: &State, current: &State) -> Option<EventKind> {
        if self.escaped(current) {
            Some(EventKind::Escape)
        } else {
            None
        }
    }
}

/// Detects closest approach (radial velocity going from negative to
/// non-negative).
#[derive(Default)]
pub struct PeriapsisDetector {
    fired: bool,
}

impl PeriapsisDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventDetector for PeriapsisDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.radial_velocity() < 0.0 && current.radial_velocity() >= 0.0 {
            self.fired = true;
            Some(EventKind::Periapsis)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn make_state(x: f64, y: f64, vx: f64, vy: f64) -> State {
        State {
            time: 0.0,
            pos: Vector2::new(x, y),
            vel: Vector2::new(vx, vy),
        }
    }

    #[test]
    fn escape_requires_positive_x_and_range() {
        let mut det = EscapeDetector::from_start(-5e8);
        assert_eq!(det.radius, 1e9);

        let prev = make_state(9e8, -3e8, 1e4, -3e3);
        // r > 1e9 but still upstream
        let upstream = make_state(-1.1e9, 0.0, 1e4, 0.0);
        assert!(det.check(&prev, &upstream).is_none());
        // downstream but inside the radius
        let inside = make_state(9e8, -3e8, 1e4, -3e3);
        assert!(det.check(&prev, &inside).is_none());

        let out = make_state(9.6e8, -3.2e8, 1e4, -3e3);
        assert_eq!(det.check(&prev, &out), Some(EventKind::Escape));
    }

    #[test]
    fn periapsis_detected_once() {
        let mut det = PeriapsisDetector::new();
        let before = make_state(-1e5, 7.6e6, 19e3, 0.0);
        let after = make_state(1e5, 7.6e6, 19e3, 0.0);
        assert_eq!(det.check(&before, &after), Some(EventKind::Periapsis));
        // Should not fire again
        assert!(det.check(&before, &after).is_none());
    }
}
