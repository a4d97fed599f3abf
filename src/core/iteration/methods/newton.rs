use crate::core::data::method::Method;
use crate::core::iteration::methods::{DENOMINATOR_FLOOR, IterationMethod, Proposal, StepContext};
use crate::core::iteration::outcome::FailureReason;

#[derive(Debug, Copy, Clone, Default)]
pub struct Newton;

/// Newton with the step scaled by `λ ∈ (0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DampedNewton {
    damping: f64,
}

impl DampedNewton {
    #[must_use]
    pub fn new(damping: f64) -> Self {
        Self { damping }
    }

    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }
}

impl IterationMethod for Newton {
    fn method(&self) -> Method {
        Method::Newton
    }

    fn propose(&self, ctx: &StepContext<'_>) -> Result<Proposal, FailureReason> {
        newton_step(ctx, None)
    }
}

impl IterationMethod for DampedNewton {
    fn method(&self) -> Method {
        Method::NewtonDamped
    }

    fn propose(&self, ctx: &StepContext<'_>) -> Result<Proposal, FailureReason> {
        newton_step(ctx, Some(self.damping))
    }
}

fn newton_step(ctx: &StepContext<'_>, damping: Option<f64>) -> Result<Proposal, FailureReason> {
    let xn = ctx.current_point();
    let fx = ctx.function.value_at(xn);
    let dfx = ctx.function.slope_at(xn);

    let raw = if fx.is_finite() && dfx.is_finite() && dfx.abs() >= DENOMINATOR_FLOOR {
        xn - fx / dfx
    } else {
        secant_fallback(ctx, xn, fx)?
    };

    let candidate = match damping {
        Some(lambda) => xn + lambda * (raw - xn),
        None => raw,
    };
    let next = ctx.guarded(xn, candidate, "newton step could not be stabilised")?;

    Ok(Proposal::from_point(next, xn))
}

/// Secant through `x_{n-1}` and `x_n` when the derivative is unusable.
fn secant_fallback(ctx: &StepContext<'_>, xn: f64, fx: f64) -> Result<f64, FailureReason> {
    if ctx.history.is_empty() {
        return Err(FailureReason::instability("derivative vanished at the seed"));
    }

    let xn_1 = ctx.previous_point();
    let fxn_1 = ctx.function.value_at(xn_1);
    let denom = fx - fxn_1;

    if !fxn_1.is_finite() || !denom.is_finite() || denom.abs() < DENOMINATOR_FLOOR {
        return Err(FailureReason::instability("derivative vanished and secant fallback failed"));
    }

    Ok(xn - fx * (xn - xn_1) / denom)
}
