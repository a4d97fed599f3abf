use std::sync::Arc;

use crate::core::data::complex::Complex;
use crate::core::data::iteration_step::Bracket;
use crate::core::functions::compiler::{ExpressionCompiler, ParseError};
use crate::core::functions::evaluable::{ComplexEvaluable, RealEvaluable};

struct RealEntry {
    text: &'static str,
    value: fn(f64) -> f64,
    derivative: fn(f64) -> f64,
}

struct ComplexEntry {
    text: &'static str,
    value: fn(Complex) -> Complex,
    derivative: fn(Complex) -> Complex,
}

const REAL_ENTRIES: &[RealEntry] = &[
    RealEntry {
        text: "x^3 - 2*x - 5",
        value: |x| x.powi(3) - 2.0 * x - 5.0,
        derivative: |x| 3.0 * x * x - 2.0,
    },
    RealEntry {
        text: "sin(x) * x",
        value: |x| x.sin() * x,
        derivative: |x| x.cos() * x + x.sin(),
    },
    RealEntry {
        text: "exp(x) - 3*x",
        value: |x| x.exp() - 3.0 * x,
        derivative: |x| x.exp() - 3.0,
    },
    RealEntry {
        text: "cos(x) - x",
        value: |x| x.cos() - x,
        derivative: |x| -x.sin() - 1.0,
    },
    RealEntry {
        text: "x^2 - 2",
        value: |x| x * x - 2.0,
        derivative: |x| 2.0 * x,
    },
    RealEntry {
        text: "cbrt(2*x+5)",
        value: |x| (2.0 * x + 5.0).cbrt(),
        derivative: |x| 2.0 / (3.0 * (2.0 * x + 5.0).cbrt().powi(2)),
    },
    RealEntry {
        text: "x - 0.5*sin(x)*x",
        value: |x| x - 0.5 * x.sin() * x,
        derivative: |x| 1.0 - 0.5 * (x.cos() * x + x.sin()),
    },
    RealEntry {
        text: "log(3x)",
        value: |x| (3.0 * x).ln(),
        derivative: |x| 1.0 / x,
    },
    RealEntry {
        text: "cos(x)",
        value: f64::cos,
        derivative: |x| -x.sin(),
    },
];

const COMPLEX_ENTRIES: &[ComplexEntry] = &[
    ComplexEntry {
        text: "z^3 - 1",
        value: |z| z.powu(3) - Complex::ONE,
        derivative: |z| (z * z).scale(3.0),
    },
    ComplexEntry {
        text: "z^4 - 1",
        value: |z| z.powu(4) - Complex::ONE,
        derivative: |z| z.powu(3).scale(4.0),
    },
    ComplexEntry {
        text: "z^3 - 2*z + 2",
        value: |z| z.powu(3) - z.scale(2.0) + Complex::from(2.0),
        derivative: |z| (z * z).scale(3.0) - Complex::from(2.0),
    },
];

/// Named real function with the defaults a user starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealPreset {
    pub label: &'static str,
    pub expr: &'static str,
    pub bracket: Bracket,
    pub x0: f64,
    pub x1: f64,
    pub phi: Option<&'static str>,
}

pub const REAL_PRESETS: &[RealPreset] = &[
    RealPreset {
        label: "cubic",
        expr: "x^3 - 2*x - 5",
        bracket: Bracket::new(1.0, 8.0),
        x0: 10.0,
        x1: 9.0,
        phi: Some("cbrt(2*x+5)"),
    },
    RealPreset {
        label: "x-sin",
        expr: "sin(x) * x",
        bracket: Bracket::new(1.0, 5.0),
        x0: 3.0,
        x1: 2.5,
        phi: Some("x - 0.5*sin(x)*x"),
    },
    RealPreset {
        label: "exp",
        expr: "exp(x) - 3*x",
        bracket: Bracket::new(1.0, 10.0),
        x0: 10.0,
        x1: 9.0,
        phi: Some("log(3x)"),
    },
    RealPreset {
        label: "dottie",
        expr: "cos(x) - x",
        bracket: Bracket::new(0.0, 1.0),
        x0: 1.0,
        x1: 0.5,
        phi: Some("cos(x)"),
    },
];

/// Named complex polynomial for basin renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexPreset {
    pub label: &'static str,
    pub expr: &'static str,
}

pub const COMPLEX_PRESETS: &[ComplexPreset] = &[
    ComplexPreset {
        label: "cube-roots",
        expr: "z^3 - 1",
    },
    ComplexPreset {
        label: "fourth-roots",
        expr: "z^4 - 1",
    },
    ComplexPreset {
        label: "cycle",
        expr: "z^3 - 2*z + 2",
    },
];

#[must_use]
pub fn real_preset(label: &str) -> Option<&'static RealPreset> {
    REAL_PRESETS.iter().find(|preset| preset.label == label)
}

#[must_use]
pub fn complex_preset(label: &str) -> Option<&'static ComplexPreset> {
    COMPLEX_PRESETS.iter().find(|preset| preset.label == label)
}

/// Preset whose function text matches `expr`, if any.
#[must_use]
pub fn real_preset_for_expr(expr: &str) -> Option<&'static RealPreset> {
    let key = normalize(expr);
    REAL_PRESETS.iter().find(|preset| normalize(preset.expr) == key)
}

/// Whitespace and explicit multiplication are not significant, so
/// `log(3 * x)` and `log(3x)` name the same function.
fn normalize(expr: &str) -> String {
    expr.chars()
        .filter(|c| !c.is_whitespace() && *c != '*')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Expression compiler backed by the fixed set of catalog functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionCatalog;

impl FunctionCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn find_real(expr: &str) -> Result<&'static RealEntry, ParseError> {
        let key = normalize(expr);
        if key.is_empty() {
            return Err(ParseError::Empty);
        }

        REAL_ENTRIES
            .iter()
            .find(|entry| normalize(entry.text) == key)
            .ok_or_else(|| ParseError::Unsupported {
                expr: expr.to_string(),
                reason: "not a catalog function of x".to_string(),
            })
    }

    fn find_complex(expr: &str) -> Result<&'static ComplexEntry, ParseError> {
        let key = normalize(expr);
        if key.is_empty() {
            return Err(ParseError::Empty);
        }

        COMPLEX_ENTRIES
            .iter()
            .find(|entry| normalize(entry.text) == key)
            .ok_or_else(|| ParseError::Unsupported {
                expr: expr.to_string(),
                reason: "not a catalog function of z".to_string(),
            })
    }
}

impl ExpressionCompiler for FunctionCatalog {
    fn compile_real(&self, expr: &str) -> Result<Arc<dyn RealEvaluable>, ParseError> {
        Ok(Arc::new(Self::find_real(expr)?.value))
    }

    fn derivative_real(&self, expr: &str, var: &str) -> Result<Arc<dyn RealEvaluable>, ParseError> {
        if var != "x" {
            return Err(ParseError::NoDerivative {
                expr: expr.to_string(),
                var: var.to_string(),
            });
        }
        Ok(Arc::new(Self::find_real(expr)?.derivative))
    }

    fn compile_complex(&self, expr: &str) -> Result<Arc<dyn ComplexEvaluable>, ParseError> {
        Ok(Arc::new(Self::find_complex(expr)?.value))
    }

    fn derivative_complex(
        &self,
        expr: &str,
        var: &str,
    ) -> Result<Arc<dyn ComplexEvaluable>, ParseError> {
        if var != "z" {
            return Err(ParseError::NoDerivative {
                expr: expr.to_string(),
                var: var.to_string(),
            });
        }
        Ok(Arc::new(Self::find_complex(expr)?.derivative))
    }
}
