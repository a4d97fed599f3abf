use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::core::data::complex::Complex;
use crate::core::functions::differencing::{central_difference, central_difference_complex};

/// Failure reported by an evaluator for a particular argument, e.g. a domain
/// error. The iteration core reads it as NaN.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("evaluation failed: {0}")]
pub struct EvalError(pub String);

/// Real-valued expression compiled by an external evaluator.
pub trait RealEvaluable: Send + Sync {
    fn eval(&self, x: f64) -> Result<f64, EvalError>;
}

/// Complex-valued expression compiled by an external evaluator.
pub trait ComplexEvaluable: Send + Sync {
    fn eval(&self, z: Complex) -> Result<Complex, EvalError>;
}

impl<F> RealEvaluable for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    #[inline]
    fn eval(&self, x: f64) -> Result<f64, EvalError> {
        Ok(self(x))
    }
}

impl<F> ComplexEvaluable for F
where
    F: Fn(Complex) -> Complex + Send + Sync,
{
    #[inline]
    fn eval(&self, z: Complex) -> Result<Complex, EvalError> {
        Ok(self(z))
    }
}

/// Objective `f` on the real line with an optional analytic derivative.
///
/// Evaluation errors surface as NaN so that the iteration methods only ever
/// have to reason about non-finite values.
#[derive(Clone)]
pub struct RealFunction {
    value: Arc<dyn RealEvaluable>,
    derivative: Option<Arc<dyn RealEvaluable>>,
}

impl RealFunction {
    pub fn new(value: impl RealEvaluable + 'static) -> Self {
        Self {
            value: Arc::new(value),
            derivative: None,
        }
    }

    pub fn from_shared(
        value: Arc<dyn RealEvaluable>,
        derivative: Option<Arc<dyn RealEvaluable>>,
    ) -> Self {
        Self { value, derivative }
    }

    #[must_use]
    pub fn with_derivative(mut self, derivative: impl RealEvaluable + 'static) -> Self {
        self.derivative = Some(Arc::new(derivative));
        self
    }

    #[must_use]
    pub fn has_derivative(&self) -> bool {
        self.derivative.is_some()
    }

    #[must_use]
    pub fn value_at(&self, x: f64) -> f64 {
        self.value.eval(x).unwrap_or(f64::NAN)
    }

    /// `f'(x)` from the analytic derivative when one was supplied and it
    /// evaluates, otherwise from a central difference.
    #[must_use]
    pub fn slope_at(&self, x: f64) -> f64 {
        match self.derivative.as_ref().map(|d| d.eval(x)) {
            Some(Ok(slope)) => slope,
            _ => central_difference(|t| self.value_at(t), x),
        }
    }
}

impl fmt::Debug for RealFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealFunction")
            .field("has_derivative", &self.has_derivative())
            .finish()
    }
}

/// Objective `f` on the complex plane with an optional analytic derivative.
#[derive(Clone)]
pub struct ComplexFunction {
    value: Arc<dyn ComplexEvaluable>,
    derivative: Option<Arc<dyn ComplexEvaluable>>,
}

impl ComplexFunction {
    pub fn new(value: impl ComplexEvaluable + 'static) -> Self {
        Self {
            value: Arc::new(value),
            derivative: None,
        }
    }

    pub fn from_shared(
        value: Arc<dyn ComplexEvaluable>,
        derivative: Option<Arc<dyn ComplexEvaluable>>,
    ) -> Self {
        Self { value, derivative }
    }

    #[must_use]
    pub fn with_derivative(mut self, derivative: impl ComplexEvaluable + 'static) -> Self {
        self.derivative = Some(Arc::new(derivative));
        self
    }

    #[must_use]
    pub fn value_at(&self, z: Complex) -> Complex {
        self.value.eval(z).unwrap_or_else(|_| Complex::nan())
    }

    #[must_use]
    pub fn slope_at(&self, z: Complex) -> Complex {
        match self.derivative.as_ref().map(|d| d.eval(z)) {
            Some(Ok(slope)) => slope,
            _ => central_difference_complex(|t| self.value_at(t), z),
        }
    }
}

impl fmt::Debug for ComplexFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplexFunction")
            .field("has_derivative", &self.derivative.is_some())
            .finish()
    }
}
