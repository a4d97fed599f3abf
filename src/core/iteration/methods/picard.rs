use crate::core::data::method::Method;
use crate::core::iteration::methods::{IterationMethod, Proposal, StepContext};
use crate::core::iteration::outcome::FailureReason;

/// Fixed-point iteration `x_{n+1} = φ(x_n)`.
#[derive(Debug, Copy, Clone, Default)]
pub struct Picard;

impl IterationMethod for Picard {
    fn method(&self) -> Method {
        Method::Picard
    }

    fn propose(&self, ctx: &StepContext<'_>) -> Result<Proposal, FailureReason> {
        let xn = ctx.current_point();
        let next = ctx.fixed_point(xn);

        if !next.is_finite() {
            return Err(FailureReason::instability("fixed-point map is not finite"));
        }

        Ok(Proposal::from_point(next, xn))
    }
}
