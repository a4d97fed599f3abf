use thiserror::Error;

use crate::core::data::iteration_step::IterationStep;

/// Why a step could not be taken. Each of these ends the run; the history
/// recorded so far stays available.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FailureReason {
    #[error("bracket [{a}, {b}] does not enclose a sign change: f(a)={fa}, f(b)={fb}")]
    BracketInvalid { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("numerically unstable: {detail}")]
    NumericInstability { detail: &'static str },

    #[error("iteration diverged: x={x}, f(x)={fx}")]
    Divergence { x: f64, fx: f64 },
}

impl FailureReason {
    pub(crate) fn instability(detail: &'static str) -> Self {
        Self::NumericInstability { detail }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// A step was recorded and its error is still above the threshold.
    Continued(IterationStep),
    /// A step was recorded and its error fell below the threshold.
    Converged(IterationStep),
    /// No step was recorded.
    Failed(FailureReason),
}

impl StepOutcome {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Continued(_))
    }

    #[must_use]
    pub fn step(&self) -> Option<IterationStep> {
        match self {
            Self::Continued(step) | Self::Converged(step) => Some(*step),
            Self::Failed(_) => None,
        }
    }
}
