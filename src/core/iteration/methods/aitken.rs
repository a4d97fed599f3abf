use crate::core::data::method::Method;
use crate::core::iteration::methods::{DENOMINATOR_FLOOR, IterationMethod, Proposal, StepContext};
use crate::core::iteration::outcome::FailureReason;

/// Fixed-point iteration accelerated with Aitken's Δ².
#[derive(Debug, Copy, Clone, Default)]
pub struct Aitken;

impl IterationMethod for Aitken {
    fn method(&self) -> Method {
        Method::Aitken
    }

    fn propose(&self, ctx: &StepContext<'_>) -> Result<Proposal, FailureReason> {
        let xn = ctx.current_point();
        let s1 = ctx.fixed_point(xn);
        if !s1.is_finite() {
            return Err(FailureReason::instability("fixed-point map is not finite"));
        }

        let s2 = ctx.fixed_point(s1);
        let s3 = ctx.fixed_point(s2);
        let denom = s3 - 2.0 * s2 + s1;
        if !denom.is_finite() || denom.abs() < DENOMINATOR_FLOOR {
            return Err(FailureReason::instability("aitken denominator vanished"));
        }

        let next = s1 - (s2 - s1).powi(2) / denom;

        Ok(Proposal::from_point(next, xn))
    }
}
