use crate::core::data::iteration_step::{Bracket, PlotRange};
use crate::core::functions::evaluable::RealFunction;

/// Walks `a, a + step, ...` up to `b` and returns every sub-interval whose
/// endpoints touch zero or have opposite signs. Points where `f` is not
/// finite break the walk until the next finite value.
#[must_use]
pub fn scan_sign_changes(function: &RealFunction, range: PlotRange) -> Vec<Bracket> {
    let mut brackets = Vec::new();
    if !(range.step > 0.0) || range.a > range.b {
        return brackets;
    }

    let mut previous: Option<(f64, f64)> = None;
    let mut index = 0u64;

    loop {
        let x = range.a + index as f64 * range.step;
        if x > range.b {
            break;
        }
        index += 1;

        let fx = function.value_at(x);
        if !fx.is_finite() {
            previous = None;
            continue;
        }

        if let Some((x_prev, f_prev)) = previous {
            if f_prev == 0.0 || fx == 0.0 || f_prev * fx < 0.0 {
                brackets.push(Bracket::new(x_prev, x));
            }
        }
        previous = Some((x, fx));
    }

    brackets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_the_single_root_of_the_cubic() {
        let f = RealFunction::new(|x: f64| x.powi(3) - 2.0 * x - 5.0);

        let brackets = scan_sign_changes(&f, PlotRange::default());

        assert_eq!(brackets.len(), 1);
        assert!(brackets[0].a < 2.0945515 && 2.0945515 < brackets[0].b);
    }

    #[test]
    fn test_exact_zero_on_grid_is_reported_on_both_sides() {
        let f = RealFunction::new(|x: f64| x);
        let range = PlotRange {
            a: -1.0,
            b: 1.0,
            step: 0.5,
        };

        assert_eq!(
            scan_sign_changes(&f, range),
            vec![Bracket::new(-0.5, 0.0), Bracket::new(0.0, 0.5)]
        );
    }

    #[test]
    fn test_skips_undefined_points() {
        let f = RealFunction::new(|x: f64| x.ln());
        let range = PlotRange {
            a: -1.0,
            b: 2.0,
            step: 0.5,
        };

        // ln is undefined at -1, -0.5 and -inf at 0; the crossing is at 1.
        assert_eq!(
            scan_sign_changes(&f, range),
            vec![Bracket::new(0.5, 1.0), Bracket::new(1.0, 1.5)]
        );
    }

    #[test]
    fn test_degenerate_step_yields_nothing() {
        let f = RealFunction::new(|x: f64| x);
        let range = PlotRange {
            a: -1.0,
            b: 1.0,
            step: 0.0,
        };

        assert!(scan_sign_changes(&f, range).is_empty());
    }
}
