use std::sync::Arc;

use thiserror::Error;

use crate::core::functions::evaluable::{
    ComplexEvaluable, ComplexFunction, RealEvaluable, RealFunction,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,
    #[error("cannot compile expression {expr:?}: {reason}")]
    Unsupported { expr: String, reason: String },
    #[error("no derivative of {expr:?} with respect to {var:?}")]
    NoDerivative { expr: String, var: String },
}

/// Turns expression text into evaluable functions.
///
/// Parsing and the numeric function library live behind this trait; the
/// iteration core only composes the evaluables it returns.
pub trait ExpressionCompiler: Send + Sync {
    fn compile_real(&self, expr: &str) -> Result<Arc<dyn RealEvaluable>, ParseError>;

    fn derivative_real(&self, expr: &str, var: &str) -> Result<Arc<dyn RealEvaluable>, ParseError>;

    fn compile_complex(&self, expr: &str) -> Result<Arc<dyn ComplexEvaluable>, ParseError>;

    fn derivative_complex(
        &self,
        expr: &str,
        var: &str,
    ) -> Result<Arc<dyn ComplexEvaluable>, ParseError>;

    /// Compiles `f` of `x` together with its derivative when available. A
    /// missing derivative is not an error: slopes then come from differencing.
    fn real_function(&self, expr: &str) -> Result<RealFunction, ParseError> {
        let value = self.compile_real(expr)?;
        let derivative = self.derivative_real(expr, "x").ok();
        Ok(RealFunction::from_shared(value, derivative))
    }

    fn complex_function(&self, expr: &str) -> Result<ComplexFunction, ParseError> {
        let value = self.compile_complex(expr)?;
        let derivative = self.derivative_complex(expr, "z").ok();
        Ok(ComplexFunction::from_shared(value, derivative))
    }
}
