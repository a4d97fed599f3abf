use crate::core::data::complex::Complex;

/// Step of the central-difference derivative estimate.
pub const DIFFERENCE_STEP: f64 = 1e-6;

/// `(f(x + h) - f(x - h)) / 2h`, or NaN when either sample is non-finite.
pub fn central_difference(f: impl Fn(f64) -> f64, x: f64) -> f64 {
    let forward = f(x + DIFFERENCE_STEP);
    let backward = f(x - DIFFERENCE_STEP);

    if !forward.is_finite() || !backward.is_finite() {
        return f64::NAN;
    }

    (forward - backward) / (2.0 * DIFFERENCE_STEP)
}

/// Complex counterpart of [`central_difference`], stepping along the real
/// axis. Valid for holomorphic `f`.
pub fn central_difference_complex(f: impl Fn(Complex) -> Complex, z: Complex) -> Complex {
    let h = Complex::from(DIFFERENCE_STEP);
    let forward = f(z + h);
    let backward = f(z - h);

    if !forward.is_finite() || !backward.is_finite() {
        return Complex::nan();
    }

    (forward - backward).scale(1.0 / (2.0 * DIFFERENCE_STEP))
}
