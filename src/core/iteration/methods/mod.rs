//! One [`IterationMethod`] per root-finding scheme.
//!
//! A method only proposes the next iterate from the state it is shown; the
//! engine owns the state and decides whether the proposal is recorded.

mod aitken;
mod bisection;
mod newton;
mod picard;
mod regula_falsi;
mod secant;

use std::fmt;

pub use aitken::Aitken;
pub use bisection::Bisection;
pub use newton::{DampedNewton, Newton};
pub use picard::Picard;
pub use regula_falsi::RegulaFalsi;
pub use secant::Secant;

use crate::core::data::iteration_step::{Bracket, IterationStep};
use crate::core::data::method::Method;
use crate::core::functions::evaluable::RealFunction;
use crate::core::iteration::outcome::FailureReason;
use crate::core::iteration::stability_guard::StabilityGuard;

/// Denominators and derivatives smaller than this are treated as zero.
pub const DENOMINATOR_FLOOR: f64 = 1e-14;

/// Read-only view of the engine state handed to a method for one step.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub function: &'a RealFunction,
    pub fixed_point_map: Option<&'a RealFunction>,
    pub history: &'a [IterationStep],
    pub bracket: Bracket,
    pub x0: f64,
    pub x1: f64,
    pub guard: StabilityGuard,
}

impl StepContext<'_> {
    /// `x_n`: the last recorded iterate, or the first seed.
    #[must_use]
    pub fn current_point(&self) -> f64 {
        self.history.last().map_or(self.x0, |step| step.x)
    }

    /// `x_{n-1}`: the iterate before the last one, or the first seed.
    #[must_use]
    pub fn previous_point(&self) -> f64 {
        match self.history.len() {
            0 | 1 => self.x0,
            n => self.history[n - 2].x,
        }
    }

    /// `φ(x)`, defaulting to `x - f(x)` when no map was supplied.
    #[must_use]
    pub fn fixed_point(&self, x: f64) -> f64 {
        match self.fixed_point_map {
            Some(phi) => phi.value_at(x),
            None => x - self.function.value_at(x),
        }
    }

    /// Runs a candidate through the stability guard.
    pub fn guarded(&self, current: f64, candidate: f64, detail: &'static str) -> Result<f64, FailureReason> {
        let moved = self.guard.attempt_move(self.function, current, candidate);
        if moved.accepted {
            Ok(moved.value)
        } else {
            Err(FailureReason::instability(detail))
        }
    }

    /// Error of a bisection step: distance from the previous iterate, or
    /// half the bracket width on the first step.
    #[must_use]
    pub fn bracket_error(&self, c: f64) -> f64 {
        self.history
            .last()
            .map_or(self.bracket.width() / 2.0, |step| (c - step.x).abs())
    }

    /// `(f(a), f(b))` after checking that the bracket can be stepped.
    pub fn checked_bracket(&self) -> Result<(f64, f64), FailureReason> {
        let Bracket { a, b } = self.bracket;
        let fa = self.function.value_at(a);
        let fb = self.function.value_at(b);

        if !fa.is_finite() || !fb.is_finite() {
            return Err(FailureReason::instability("f is not finite at a bracket endpoint"));
        }

        if fa * fb > 0.0 {
            return Err(FailureReason::BracketInvalid { a, b, fa, fb });
        }

        Ok((fa, fb))
    }
}

/// Next iterate proposed by a method.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Proposal {
    pub next: f64,
    pub err: f64,
    /// Replacement bracket for bracketing methods.
    pub bracket: Option<Bracket>,
    /// Whether `err` below the threshold ends the run. False for a first
    /// bisection step, whose `err` is only half the bracket.
    pub can_converge: bool,
}

impl Proposal {
    #[must_use]
    pub fn from_point(next: f64, current: f64) -> Self {
        Self {
            next,
            err: (next - current).abs(),
            bracket: None,
            can_converge: true,
        }
    }
}

pub trait IterationMethod: Send + Sync + fmt::Debug {
    fn method(&self) -> Method;

    /// Proposes the next iterate. Must not have side effects: a failure
    /// leaves the run exactly as it was.
    fn propose(&self, ctx: &StepContext<'_>) -> Result<Proposal, FailureReason>;
}

/// Builds the implementation for `method`. `damping` only affects
/// [`Method::NewtonDamped`].
#[must_use]
pub fn method_for(method: Method, damping: f64) -> Box<dyn IterationMethod> {
    match method {
        Method::Bisection => Box::new(Bisection),
        Method::RegulaFalsi => Box::new(RegulaFalsi),
        Method::Secant => Box::new(Secant),
        Method::Newton => Box::new(Newton),
        Method::NewtonDamped => Box::new(DampedNewton::new(damping)),
        Method::Picard => Box::new(Picard),
        Method::Aitken => Box::new(Aitken),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn cubic() -> RealFunction {
        RealFunction::new(|x: f64| x.powi(3) - 2.0 * x - 5.0).with_derivative(|x: f64| 3.0 * x * x - 2.0)
    }

    pub fn context<'a>(function: &'a RealFunction, history: &'a [IterationStep]) -> StepContext<'a> {
        StepContext {
            function,
            fixed_point_map: None,
            history,
            bracket: Bracket::new(1.0, 8.0),
            x0: 10.0,
            x1: 9.0,
            guard: StabilityGuard::new(10.0),
        }
    }

    pub fn step_at(x: f64) -> IterationStep {
        IterationStep { x, fx: 0.0, err: 1.0 }
    }
}
