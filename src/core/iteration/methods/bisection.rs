use crate::core::data::method::Method;
use crate::core::iteration::methods::{IterationMethod, Proposal, StepContext};
use crate::core::iteration::outcome::FailureReason;

/// Halves the bracket around its sign change.
#[derive(Debug, Copy, Clone, Default)]
pub struct Bisection;

impl IterationMethod for Bisection {
    fn method(&self) -> Method {
        Method::Bisection
    }

    fn propose(&self, ctx: &StepContext<'_>) -> Result<Proposal, FailureReason> {
        let (fa, _fb) = ctx.checked_bracket()?;
        let bracket = ctx.bracket;

        let c = (bracket.a + bracket.b) / 2.0;
        let fc = ctx.function.value_at(c);

        Ok(Proposal {
            next: c,
            err: ctx.bracket_error(c),
            bracket: Some(bracket.narrowed(c, fa, fc)),
            can_converge: !ctx.history.is_empty(),
        })
    }
}
