use std::time::Duration;

use thiserror::Error;

use crate::core::data::iteration_step::{Bracket, PlotRange};
use crate::core::data::method::Method;

pub const DEFAULT_EPSILON: f64 = 1e-6;
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("stop threshold must be finite and positive, got {0}")]
    Epsilon(f64),
    #[error("damping factor must lie in (0, 1], got {0}")]
    Damping(f64),
    #[error("plot range [{a}, {b}] with step {step} is empty or not finite")]
    Range { a: f64, b: f64, step: f64 },
    #[error("bracket [{a}, {b}] is not finite")]
    Bracket { a: f64, b: f64 },
    #[error("seeds must be finite, got x0={x0}, x1={x1}")]
    Seeds { x0: f64, x1: f64 },
    #[error("step budget must be at least one")]
    StepBudget,
}

/// Inputs of one real root-finding run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationConfig {
    pub method: Method,
    pub x0: f64,
    pub x1: f64,
    pub bracket: Bracket,
    /// Damping factor of [`Method::NewtonDamped`].
    pub lambda: f64,
    pub epsilon: f64,
    pub range: PlotRange,
    pub max_steps: Option<usize>,
    /// Delay between steps of a paced run.
    pub cadence: Duration,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            x0: 10.0,
            x1: 9.0,
            bracket: Bracket::new(1.0, 8.0),
            lambda: 1.0,
            epsilon: DEFAULT_EPSILON,
            range: PlotRange::default(),
            max_steps: None,
            cadence: DEFAULT_CADENCE,
        }
    }
}

impl IterationConfig {
    /// # Errors
    ///
    /// Returns the first setting that cannot start a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConfigError::Epsilon(self.epsilon));
        }
        if !self.lambda.is_finite() || self.lambda <= 0.0 || self.lambda > 1.0 {
            return Err(ConfigError::Damping(self.lambda));
        }

        let PlotRange { a, b, step } = self.range;
        if !(a.is_finite() && b.is_finite() && step.is_finite()) || a >= b || step <= 0.0 {
            return Err(ConfigError::Range { a, b, step });
        }

        if !self.bracket.is_finite() {
            return Err(ConfigError::Bracket {
                a: self.bracket.a,
                b: self.bracket.b,
            });
        }
        if !self.x0.is_finite() || !self.x1.is_finite() {
            return Err(ConfigError::Seeds {
                x0: self.x0,
                x1: self.x1,
            });
        }
        if self.max_steps == Some(0) {
            return Err(ConfigError::StepBudget);
        }

        Ok(())
    }
}
