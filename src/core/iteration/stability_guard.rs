use crate::core::functions::evaluable::RealFunction;

/// Maximum number of times a rejected step is halved before giving up.
pub const MAX_HALVINGS: u32 = 20;

/// Result of bounding a proposed move.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GuardedMove {
    pub value: f64,
    pub accepted: bool,
}

/// Keeps raw Newton/secant steps from jumping further than `max(1, bound_scale)`
/// or into points where `f` is not finite, by geometric back-off towards the
/// current point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StabilityGuard {
    max_step: f64,
}

impl StabilityGuard {
    #[must_use]
    pub fn new(bound_scale: f64) -> Self {
        Self {
            max_step: bound_scale.max(1.0),
        }
    }

    #[must_use]
    pub fn max_step(&self) -> f64 {
        self.max_step
    }

    pub fn attempt_move(&self, function: &RealFunction, current: f64, target: f64) -> GuardedMove {
        let admissible = |step: f64, t: f64| {
            t.is_finite() && step.abs() <= self.max_step && function.value_at(t).is_finite()
        };

        let mut step = target - current;
        let mut value = target;
        let mut halvings = 0;

        while !admissible(step, value) && halvings < MAX_HALVINGS {
            step *= 0.5;
            value = current + step;
            halvings += 1;
        }

        GuardedMove {
            value,
            accepted: admissible(step, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic() -> RealFunction {
        RealFunction::new(|x: f64| x.powi(3) - 2.0 * x - 5.0)
    }

    #[test]
    fn test_max_step_is_at_least_one() {
        assert_eq!(StabilityGuard::new(0.25).max_step(), 1.0);
        assert_eq!(StabilityGuard::new(10.0).max_step(), 10.0);
    }

    #[test]
    fn test_accepts_small_finite_step_unchanged() {
        let guard = StabilityGuard::new(10.0);
        let moved = guard.attempt_move(&cubic(), 10.0, 6.73);

        assert_eq!(
            moved,
            GuardedMove {
                value: 6.73,
                accepted: true
            }
        );
    }

    #[test]
    fn test_halves_oversized_step_until_within_bound() {
        let guard = StabilityGuard::new(1.0);
        let moved = guard.attempt_move(&cubic(), 0.0, 3.0);

        // 3 -> 1.5 -> 0.75
        assert!(moved.accepted);
        assert_eq!(moved.value, 0.75);
    }

    #[test]
    fn test_backs_off_from_undefined_region() {
        let log = RealFunction::new(f64::ln);
        let guard = StabilityGuard::new(10.0);
        let moved = guard.attempt_move(&log, 1.0, -3.0);

        // -3 -> -1 -> 0 (ln 0 = -inf) -> 0.5
        assert!(moved.accepted);
        assert_eq!(moved.value, 0.5);
    }

    #[test]
    fn test_rejects_when_back_off_is_exhausted() {
        let nowhere_finite = RealFunction::new(|_x: f64| f64::NAN);
        let guard = StabilityGuard::new(10.0);
        let moved = guard.attempt_move(&nowhere_finite, 1.0, 2.0);

        assert!(!moved.accepted);
    }

    #[test]
    fn test_rejects_non_finite_target() {
        let guard = StabilityGuard::new(10.0);
        let moved = guard.attempt_move(&cubic(), 1.0, f64::INFINITY);

        assert!(!moved.accepted);
    }
}
