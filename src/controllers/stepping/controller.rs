use std::ops::ControlFlow;
use std::thread;

use log::{debug, info};

use crate::core::data::method::Method;
use crate::core::iteration::engine::RootIterationEngine;
use crate::core::iteration::outcome::{FailureReason, StepOutcome};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunState {
    Idle,
    Running,
    Paused,
    Converged,
    Failed(FailureReason),
    /// The step budget ran out before the error fell below the threshold.
    BudgetExhausted,
}

impl RunState {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            Self::Converged | Self::Failed(_) | Self::BudgetExhausted
        )
    }
}

pub struct IterationController {
    engine: RootIterationEngine,
    state: RunState,
}

impl IterationController {
    #[must_use]
    pub fn new(engine: RootIterationEngine) -> Self {
        Self {
            engine,
            state: RunState::Idle,
        }
    }

    /// Resets the run and begins stepping.
    pub fn start(&mut self) {
        self.engine.reset();
        self.state = RunState::Running;
        debug!("started {} run", self.engine.method());
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == RunState::Paused {
            self.state = RunState::Running;
        }
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.state = RunState::Idle;
    }

    pub fn select_method(&mut self, method: Method) {
        self.engine.set_method(method);
        self.state = RunState::Idle;
    }

    /// Takes one step if the run is active. Returns `None` when nothing was
    /// attempted.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.state != RunState::Running {
            return None;
        }

        let outcome = self.engine.step();
        self.state = match outcome {
            StepOutcome::Converged(_) => RunState::Converged,
            StepOutcome::Failed(reason) => RunState::Failed(reason),
            StepOutcome::Continued(_) if self.budget_spent() => RunState::BudgetExhausted,
            StepOutcome::Continued(_) => RunState::Running,
        };

        if self.state.is_finished() {
            info!(
                "{} run finished after {} steps: {:?}",
                self.engine.method(),
                self.engine.history().len(),
                self.state
            );
        }

        Some(outcome)
    }

    /// Steps on the configured cadence until the run finishes or `on_step`
    /// breaks, which pauses the run. An idle run is started first.
    pub fn run_with_cadence<F>(&mut self, mut on_step: F) -> RunState
    where
        F: FnMut(&StepOutcome) -> ControlFlow<()>,
    {
        if self.state == RunState::Idle {
            self.start();
        }

        let cadence = self.engine.config().cadence;

        while let Some(outcome) = self.tick() {
            if on_step(&outcome).is_break() {
                self.pause();
                break;
            }
            if self.state != RunState::Running {
                break;
            }
            if !cadence.is_zero() {
                thread::sleep(cadence);
            }
        }

        self.state
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn engine(&self) -> &RootIterationEngine {
        &self.engine
    }

    fn budget_spent(&self) -> bool {
        self.engine
            .config()
            .max_steps
            .is_some_and(|max| self.engine.history().len() >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::iteration_step::Bracket;
    use crate::core::functions::evaluable::RealFunction;
    use crate::core::iteration::config::IterationConfig;
    use std::time::Duration;

    fn controller(config: IterationConfig) -> IterationController {
        let f = RealFunction::new(|x: f64| x.powi(3) - 2.0 * x - 5.0)
            .with_derivative(|x: f64| 3.0 * x * x - 2.0);
        let config = IterationConfig {
            cadence: Duration::ZERO,
            ..config
        };
        IterationController::new(RootIterationEngine::new(f, config).unwrap())
    }

    #[test]
    fn test_tick_does_nothing_until_started() {
        let mut controller = controller(IterationConfig::default());

        assert_eq!(controller.tick(), None);
        assert_eq!(controller.state(), RunState::Idle);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut controller = controller(IterationConfig::default());
        controller.start();
        controller.tick();

        controller.pause();
        assert_eq!(controller.tick(), None);
        assert_eq!(controller.engine().history().len(), 1);

        controller.resume();
        assert!(controller.tick().is_some());
        assert_eq!(controller.engine().history().len(), 2);
    }

    #[test]
    fn test_run_until_converged() {
        let mut controller = controller(IterationConfig::default());

        let state = controller.run_with_cadence(|_| ControlFlow::Continue(()));

        assert_eq!(state, RunState::Converged);
        assert!(controller.engine().last_step().unwrap().err < 1e-6);
    }

    #[test]
    fn test_failure_ends_the_run() {
        let mut controller = controller(IterationConfig {
            method: Method::Bisection,
            bracket: Bracket::new(10.0, 20.0),
            ..IterationConfig::default()
        });

        let state = controller.run_with_cadence(|_| ControlFlow::Continue(()));

        assert!(matches!(
            state,
            RunState::Failed(FailureReason::BracketInvalid { .. })
        ));
        assert!(controller.engine().history().is_empty());
    }

    #[test]
    fn test_budget_is_reported() {
        let mut controller = controller(IterationConfig {
            method: Method::Bisection,
            max_steps: Some(3),
            ..IterationConfig::default()
        });

        let state = controller.run_with_cadence(|_| ControlFlow::Continue(()));

        assert_eq!(state, RunState::BudgetExhausted);
        assert_eq!(controller.engine().history().len(), 3);
    }

    #[test]
    fn test_break_pauses_the_run() {
        let mut controller = controller(IterationConfig::default());
        let mut seen = 0;

        let state = controller.run_with_cadence(|_| {
            seen += 1;
            if seen == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(state, RunState::Paused);
        assert_eq!(controller.engine().history().len(), 2);
    }

    #[test]
    fn test_select_method_returns_to_idle() {
        let mut controller = controller(IterationConfig::default());
        controller.start();
        controller.tick();

        controller.select_method(Method::Picard);

        assert_eq!(controller.state(), RunState::Idle);
        assert!(controller.engine().history().is_empty());
    }
}
