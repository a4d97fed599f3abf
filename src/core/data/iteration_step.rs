use serde::{Deserialize, Serialize};

/// One recorded iterate of a root-finding run.
///
/// `err` is the distance from the previous iterate (half the bracket width
/// on the first bracketing step) and is what gets compared against the stop
/// threshold.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationStep {
    pub x: f64,
    pub fx: f64,
    pub err: f64,
}

/// Interval expected to contain a sign change of `f`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub a: f64,
    pub b: f64,
}

impl Bracket {
    #[must_use]
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        (self.b - self.a).abs()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite()
    }

    /// Keeps the half of `[a, b]` split at `c` that still straddles the sign
    /// change, given the function values at `a` and `c`.
    #[must_use]
    pub fn narrowed(&self, c: f64, fa: f64, fc: f64) -> Self {
        if fa * fc < 0.0 {
            Self { a: self.a, b: c }
        } else {
            Self { a: c, b: self.b }
        }
    }
}

/// Plotting interval of the real view. Half its width bounds a single
/// iteration step, and it is walked by the sign-change scan.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRange {
    pub a: f64,
    pub b: f64,
    pub step: f64,
}

impl Default for PlotRange {
    fn default() -> Self {
        Self {
            a: -10.0,
            b: 10.0,
            step: 0.2,
        }
    }
}

impl PlotRange {
    #[must_use]
    pub fn half_width(&self) -> f64 {
        (self.b - self.a) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowed_keeps_left_half_on_sign_change() {
        let bracket = Bracket::new(1.0, 8.0);

        assert_eq!(bracket.narrowed(4.5, -6.0, 77.0), Bracket::new(1.0, 4.5));
    }

    #[test]
    fn test_narrowed_keeps_right_half_without_sign_change() {
        let bracket = Bracket::new(1.0, 8.0);

        assert_eq!(bracket.narrowed(2.0, -6.0, -1.0), Bracket::new(2.0, 8.0));
    }

    #[test]
    fn test_narrowed_treats_exact_root_at_midpoint_as_right_half() {
        let bracket = Bracket::new(-1.0, 3.0);

        assert_eq!(bracket.narrowed(1.0, -2.0, 0.0), Bracket::new(1.0, 3.0));
    }

    #[test]
    fn test_plot_range_half_width() {
        assert_eq!(PlotRange::default().half_width(), 10.0);
    }
}
