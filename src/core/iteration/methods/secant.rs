use crate::core::data::method::Method;
use crate::core::iteration::methods::{DENOMINATOR_FLOOR, IterationMethod, Proposal, StepContext};
use crate::core::iteration::outcome::FailureReason;

/// Secant through the two most recent points. The seeds `(x1, x0)` start
/// the run; after one recorded iterate the chord runs from it back to `x0`.
#[derive(Debug, Copy, Clone, Default)]
pub struct Secant;

impl Secant {
    /// `(x_n, x_{n-1})` for the next step.
    fn pair(ctx: &StepContext<'_>) -> (f64, f64) {
        match ctx.history {
            [] => (ctx.x1, ctx.x0),
            [only] => (only.x, ctx.x0),
            [.., before, last] => (last.x, before.x),
        }
    }
}

impl IterationMethod for Secant {
    fn method(&self) -> Method {
        Method::Secant
    }

    fn propose(&self, ctx: &StepContext<'_>) -> Result<Proposal, FailureReason> {
        let (xn, xn_1) = Self::pair(ctx);
        let fxn = ctx.function.value_at(xn);
        let fxn_1 = ctx.function.value_at(xn_1);

        let denom = fxn - fxn_1;
        if !denom.is_finite() || denom.abs() < DENOMINATOR_FLOOR {
            return Err(FailureReason::instability("secant denominator vanished"));
        }

        let raw = xn - fxn * (xn - xn_1) / denom;
        let next = ctx.guarded(xn, raw, "secant step could not be stabilised")?;

        Ok(Proposal::from_point(next, xn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::functions::evaluable::RealFunction;
    use crate::core::iteration::methods::test_support::{context, cubic, step_at};

    #[test]
    fn test_first_step_uses_both_seeds() {
        let f = cubic();
        let ctx = context(&f, &[]);

        let proposal = Secant.propose(&ctx).unwrap();

        let (f10, f9) = (f.value_at(10.0), f.value_at(9.0));
        let expected = 9.0 - f9 * (9.0 - 10.0) / (f9 - f10);
        assert_eq!(proposal.next, expected);
        assert_eq!(proposal.err, (expected - 9.0).abs());
    }

    #[test]
    fn test_pair_walks_the_sequence() {
        let f = cubic();

        assert_eq!(Secant::pair(&context(&f, &[])), (9.0, 10.0));
        assert_eq!(Secant::pair(&context(&f, &[step_at(7.0)])), (7.0, 10.0));
        assert_eq!(
            Secant::pair(&context(&f, &[step_at(7.0), step_at(5.0), step_at(4.0)])),
            (4.0, 5.0)
        );
    }

    #[test]
    fn test_second_step_chords_back_to_first_seed() {
        let f = cubic();
        let history = [step_at(6.0)];
        let ctx = context(&f, &history);

        let proposal = Secant.propose(&ctx).unwrap();

        let (f6, f10) = (f.value_at(6.0), f.value_at(10.0));
        let expected = 6.0 - f6 * (6.0 - 10.0) / (f6 - f10);
        assert_eq!(proposal.next, expected);
        assert_eq!(proposal.err, (expected - 6.0).abs());
    }

    #[test]
    fn test_identical_seeds_are_instability() {
        let f = cubic();
        let mut ctx = context(&f, &[]);
        ctx.x1 = ctx.x0;

        assert!(matches!(
            Secant.propose(&ctx),
            Err(FailureReason::NumericInstability { .. })
        ));
    }

    #[test]
    fn test_flat_function_is_instability() {
        let f = RealFunction::new(|_x: f64| 1.0);

        assert!(matches!(
            Secant.propose(&context(&f, &[])),
            Err(FailureReason::NumericInstability { .. })
        ));
    }
}
