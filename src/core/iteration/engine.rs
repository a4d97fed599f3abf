use log::debug;

use crate::core::data::iteration_step::{Bracket, IterationStep};
use crate::core::data::method::Method;
use crate::core::functions::evaluable::RealFunction;
use crate::core::iteration::config::{ConfigError, IterationConfig};
use crate::core::iteration::methods::{IterationMethod, StepContext, method_for};
use crate::core::iteration::outcome::{FailureReason, StepOutcome};
use crate::core::iteration::stability_guard::StabilityGuard;

/// Stateful real root-finding run, advanced one step per call.
///
/// The engine has no clock of its own; whoever drives it decides when to
/// call [`step`](Self::step) and when to stop.
#[derive(Debug)]
pub struct RootIterationEngine {
    function: RealFunction,
    fixed_point_map: Option<RealFunction>,
    config: IterationConfig,
    method: Box<dyn IterationMethod>,
    guard: StabilityGuard,
    history: Vec<IterationStep>,
    bracket: Bracket,
}

impl RootIterationEngine {
    /// # Errors
    ///
    /// Returns an error if `config` does not validate.
    pub fn new(function: RealFunction, config: IterationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            function,
            fixed_point_map: None,
            method: method_for(config.method, config.lambda),
            guard: StabilityGuard::new(config.range.half_width()),
            history: Vec::new(),
            bracket: config.bracket,
            config,
        })
    }

    /// Sets `φ` for Picard and Aitken. Without one they iterate `x - f(x)`.
    #[must_use]
    pub fn with_fixed_point_map(mut self, phi: RealFunction) -> Self {
        self.fixed_point_map = Some(phi);
        self
    }

    pub fn set_fixed_point_map(&mut self, phi: Option<RealFunction>) {
        self.fixed_point_map = phi;
    }

    pub fn step(&mut self) -> StepOutcome {
        let ctx = StepContext {
            function: &self.function,
            fixed_point_map: self.fixed_point_map.as_ref(),
            history: &self.history,
            bracket: self.bracket,
            x0: self.config.x0,
            x1: self.config.x1,
            guard: self.guard,
        };

        let proposal = match self.method.propose(&ctx) {
            Ok(proposal) => proposal,
            Err(reason) => {
                debug!("{} failed after {} steps: {reason}", self.method(), self.history.len());
                return StepOutcome::Failed(reason);
            }
        };

        let x = proposal.next;
        let fx = self.function.value_at(x);
        if !x.is_finite() || !fx.is_finite() {
            let reason = FailureReason::Divergence { x, fx };
            debug!("{} failed after {} steps: {reason}", self.method(), self.history.len());
            return StepOutcome::Failed(reason);
        }

        let step = IterationStep {
            x,
            fx,
            err: proposal.err,
        };
        self.history.push(step);
        if let Some(bracket) = proposal.bracket {
            self.bracket = bracket;
        }

        debug!(
            "{} step {}: x={} f(x)={} err={}",
            self.method(),
            self.history.len(),
            step.x,
            step.fx,
            step.err
        );

        if proposal.can_converge && step.err < self.config.epsilon {
            StepOutcome::Converged(step)
        } else {
            StepOutcome::Continued(step)
        }
    }

    /// Clears the history and restores the configured bracket.
    pub fn reset(&mut self) {
        self.history.clear();
        self.bracket = self.config.bracket;
    }

    /// Switches method, which also resets the run.
    pub fn set_method(&mut self, method: Method) {
        self.config.method = method;
        self.method = method_for(method, self.config.lambda);
        self.reset();
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method.method()
    }

    #[must_use]
    pub fn config(&self) -> &IterationConfig {
        &self.config
    }

    #[must_use]
    pub fn history(&self) -> &[IterationStep] {
        &self.history
    }

    #[must_use]
    pub fn last_step(&self) -> Option<IterationStep> {
        self.history.last().copied()
    }

    #[must_use]
    pub fn bracket(&self) -> Bracket {
        self.bracket
    }

    #[must_use]
    pub fn function(&self) -> &RealFunction {
        &self.function
    }
}
