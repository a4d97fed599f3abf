use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::data::method::Method;
use crate::core::data::pixel_grid::{PixelGrid, PixelGridError};
use crate::core::data::view_window::{ViewWindow, ViewWindowError};
use crate::core::fractals::basin::algorithm::{BasinAlgorithm, BasinAlgorithmError};
use crate::core::functions::compiler::{ExpressionCompiler, ParseError};
use crate::core::functions::evaluable::ComplexFunction;

/// Smallest iteration budget of a preview render.
pub const PREVIEW_MIN_ITERATIONS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BasinRequestError {
    #[error(transparent)]
    Grid(#[from] PixelGridError),
    #[error(transparent)]
    View(#[from] ViewWindowError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Algorithm(#[from] BasinAlgorithmError),
}

/// Everything a basin render needs, as sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasinRequest {
    pub expr: String,
    pub method: Method,
    pub width: u32,
    pub height: u32,
    pub max_iter: u32,
    pub tol: f64,
    pub view: ViewWindow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phi_expr: Option<String>,
}

impl Default for BasinRequest {
    fn default() -> Self {
        Self {
            expr: "z^3 - 1".to_string(),
            method: Method::Newton,
            width: 400,
            height: 400,
            max_iter: 50,
            tol: 1e-6,
            view: ViewWindow::default(),
            phi_expr: None,
        }
    }
}

impl BasinRequest {
    /// Same request with the reduced budget used while the view is being
    /// dragged or zoomed.
    #[must_use]
    pub fn preview(&self) -> Self {
        Self {
            max_iter: PREVIEW_MIN_ITERATIONS.max(self.max_iter / 3),
            ..self.clone()
        }
    }

    pub fn grid(&self) -> Result<PixelGrid, BasinRequestError> {
        Ok(PixelGrid::new(self.width, self.height)?)
    }

    pub fn validate(&self) -> Result<(), BasinRequestError> {
        self.grid()?;
        self.view.validate()?;

        if self.max_iter == 0 {
            return Err(BasinAlgorithmError::ZeroMaxIterations.into());
        }
        if !self.tol.is_finite() || self.tol <= 0.0 {
            return Err(BasinAlgorithmError::Tolerance(self.tol).into());
        }

        Ok(())
    }

    /// Compiles the request into a ready-to-run algorithm.
    ///
    /// A `φ` that does not compile is dropped with a warning and Picard falls
    /// back to `z - f(z)`.
    pub fn compile(&self, compiler: &dyn ExpressionCompiler) -> Result<BasinAlgorithm, BasinRequestError> {
        self.validate()?;

        let function = compiler.complex_function(&self.expr)?;
        let algorithm = BasinAlgorithm::new(
            self.grid()?,
            self.view,
            function,
            self.method,
            self.max_iter,
            self.tol,
        )?;

        let phi_expr = self
            .phi_expr
            .as_deref()
            .map(str::trim)
            .filter(|phi| !phi.is_empty());

        match phi_expr {
            Some(phi) if self.method == Method::Picard => match compiler.compile_complex(phi) {
                Ok(value) => Ok(algorithm.with_fixed_point_map(ComplexFunction::from_shared(value, None))),
                Err(err) => {
                    warn!("ignoring fixed-point map {phi:?}: {err}; iterating z - f(z)");
                    Ok(algorithm)
                }
            },
            _ => Ok(algorithm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::functions::catalog::FunctionCatalog;

    #[test]
    fn test_default_request() {
        let request = BasinRequest::default();

        assert_eq!(request.expr, "z^3 - 1");
        assert_eq!((request.width, request.height), (400, 400));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_deserializes_camel_case_with_defaults() {
        let json = r#"{
            "expr": "z^4 - 1",
            "method": "secant",
            "width": 64,
            "height": 48,
            "maxIter": 30,
            "view": {"minRe": -1.0, "maxRe": 1.0, "minIm": -1.0, "maxIm": 1.0},
            "phiExpr": "z"
        }"#;

        let request: BasinRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.method, Method::Secant);
        assert_eq!(request.max_iter, 30);
        assert_eq!(request.tol, 1e-6);
        assert_eq!(request.view.max_im, 1.0);
        assert_eq!(request.phi_expr.as_deref(), Some("z"));
    }

    #[test]
    fn test_preview_budget() {
        let request = BasinRequest {
            max_iter: 90,
            ..BasinRequest::default()
        };
        let small = BasinRequest {
            max_iter: 12,
            ..BasinRequest::default()
        };

        assert_eq!(request.preview().max_iter, 30);
        assert_eq!(small.preview().max_iter, 10);
    }

    #[test]
    fn test_validate_rejects_degenerate_inputs() {
        let grid = BasinRequest {
            width: 1,
            ..BasinRequest::default()
        };
        let view = BasinRequest {
            view: ViewWindow {
                min_re: 1.0,
                max_re: -1.0,
                ..ViewWindow::default()
            },
            ..BasinRequest::default()
        };
        let tol = BasinRequest {
            tol: -1.0,
            ..BasinRequest::default()
        };

        assert!(matches!(grid.validate(), Err(BasinRequestError::Grid(_))));
        assert!(matches!(view.validate(), Err(BasinRequestError::View(_))));
        assert!(matches!(
            tol.validate(),
            Err(BasinRequestError::Algorithm(BasinAlgorithmError::Tolerance(_)))
        ));
    }

    #[test]
    fn test_compile_surfaces_parse_errors() {
        let request = BasinRequest {
            expr: "sin(z) +".to_string(),
            ..BasinRequest::default()
        };

        assert!(matches!(
            request.compile(&FunctionCatalog::new()),
            Err(BasinRequestError::Parse(_))
        ));
    }

    #[test]
    fn test_compile_rejects_unsupported_method() {
        let request = BasinRequest {
            method: Method::Bisection,
            ..BasinRequest::default()
        };

        assert!(matches!(
            request.compile(&FunctionCatalog::new()),
            Err(BasinRequestError::Algorithm(BasinAlgorithmError::UnsupportedMethod(
                Method::Bisection
            )))
        ));
    }

    #[test]
    fn test_bad_fixed_point_map_is_ignored() {
        let request = BasinRequest {
            method: Method::Picard,
            phi_expr: Some("not a map".to_string()),
            ..BasinRequest::default()
        };

        assert!(request.compile(&FunctionCatalog::new()).is_ok());
    }
}
