use log::warn;
use thiserror::Error;

use crate::core::functions::catalog::real_preset_for_expr;
use crate::core::functions::compiler::{ExpressionCompiler, ParseError};
use crate::core::functions::evaluable::RealFunction;
use crate::core::iteration::config::{ConfigError, IterationConfig};
use crate::core::iteration::engine::RootIterationEngine;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IterationRequestError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Function text plus the run configuration, before compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRequest {
    pub expr: String,
    /// `φ` for Picard and Aitken. When absent, the matching preset's map is
    /// used, then `x - f(x)`.
    pub phi_expr: Option<String>,
    pub config: IterationConfig,
}

impl IterationRequest {
    #[must_use]
    pub fn new(expr: impl Into<String>, config: IterationConfig) -> Self {
        Self {
            expr: expr.into(),
            phi_expr: None,
            config,
        }
    }

    #[must_use]
    pub fn with_phi(mut self, phi_expr: impl Into<String>) -> Self {
        self.phi_expr = Some(phi_expr.into());
        self
    }

    /// Compiles `f` and builds a ready engine.
    ///
    /// # Errors
    ///
    /// Fails when `f` does not compile or the configuration is invalid. A
    /// `φ` that does not compile only logs a warning.
    pub fn build(&self, compiler: &dyn ExpressionCompiler) -> Result<RootIterationEngine, IterationRequestError> {
        let function = compiler.real_function(&self.expr)?;
        let mut engine = RootIterationEngine::new(function, self.config)?;

        if self.config.method.uses_fixed_point_map() {
            engine.set_fixed_point_map(self.fixed_point_map(compiler));
        }

        Ok(engine)
    }

    fn fixed_point_map(&self, compiler: &dyn ExpressionCompiler) -> Option<RealFunction> {
        let phi = self
            .phi_expr
            .as_deref()
            .map(str::trim)
            .filter(|phi| !phi.is_empty())
            .or_else(|| real_preset_for_expr(&self.expr).and_then(|preset| preset.phi))?;

        match compiler.compile_real(phi) {
            Ok(value) => Some(RealFunction::from_shared(value, None)),
            Err(err) => {
                warn!("ignoring fixed-point map {phi:?}: {err}; iterating x - f(x)");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::method::Method;
    use crate::core::functions::catalog::FunctionCatalog;
    use crate::core::iteration::outcome::StepOutcome;
    use approx::assert_relative_eq;

    fn picard_config() -> IterationConfig {
        IterationConfig {
            method: Method::Picard,
            x0: 1.0,
            ..IterationConfig::default()
        }
    }

    #[test]
    fn test_unknown_function_is_a_parse_error() {
        let request = IterationRequest::new("tan(x) +", IterationConfig::default());

        assert!(matches!(
            request.build(&FunctionCatalog::new()),
            Err(IterationRequestError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = IterationConfig {
            epsilon: 0.0,
            ..IterationConfig::default()
        };
        let request = IterationRequest::new("x^2 - 2", config);

        assert_eq!(
            request.build(&FunctionCatalog::new()).err(),
            Some(IterationRequestError::Config(ConfigError::Epsilon(0.0)))
        );
    }

    #[test]
    fn test_picard_uses_preset_map_by_default() {
        let mut engine = IterationRequest::new("cos(x) - x", picard_config())
            .build(&FunctionCatalog::new())
            .unwrap();

        // φ = cos: cos(1)
        let outcome = engine.step();
        assert_relative_eq!(outcome.step().unwrap().x, 1f64.cos());
    }

    #[test]
    fn test_explicit_map_wins_over_preset() {
        let mut engine = IterationRequest::new("cos(x) - x", picard_config())
            .with_phi("x^2 - 2")
            .build(&FunctionCatalog::new())
            .unwrap();

        // φ(1) = 1 - 2
        assert_eq!(engine.step().step().unwrap().x, -1.0);
    }

    #[test]
    fn test_bad_map_falls_back_to_default() {
        let mut engine = IterationRequest::new("cos(x) - x", picard_config())
            .with_phi("not a map")
            .build(&FunctionCatalog::new())
            .unwrap();

        // x - f(x) = cos(x), same as the preset here, but reached via the default
        let outcome = engine.step();
        assert!(matches!(outcome, StepOutcome::Continued(_)));
        assert_relative_eq!(outcome.step().unwrap().x, 1f64.cos());
    }

    #[test]
    fn test_without_preset_or_map_default_is_used() {
        let mut engine = IterationRequest::new("x^2 - 2", picard_config())
            .build(&FunctionCatalog::new())
            .unwrap();

        // 1 - (1 - 2)
        assert_eq!(engine.step().step().unwrap().x, 2.0);
    }
}
