use crate::core::data::method::Method;
use crate::core::iteration::methods::{IterationMethod, Proposal, StepContext};
use crate::core::iteration::outcome::FailureReason;

/// False position: the secant through the bracket endpoints.
#[derive(Debug, Copy, Clone, Default)]
pub struct RegulaFalsi;

impl IterationMethod for RegulaFalsi {
    fn method(&self) -> Method {
        Method::RegulaFalsi
    }

    fn propose(&self, ctx: &StepContext<'_>) -> Result<Proposal, FailureReason> {
        let (fa, fb) = ctx.checked_bracket()?;
        let bracket = ctx.bracket;

        // fa == fb here only if both are zero; c comes out NaN and the engine
        // reports it as divergence.
        let c = bracket.b - fb * (bracket.b - bracket.a) / (fb - fa);
        let fc = ctx.function.value_at(c);

        Ok(Proposal {
            next: c,
            err: (c - ctx.current_point()).abs(),
            bracket: Some(bracket.narrowed(c, fa, fc)),
            can_converge: true,
        })
    }
}
