use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown iteration method: {0:?}")]
pub struct UnknownMethod(pub String);

/// Root-finding iteration selectable by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    Bisection,
    #[serde(alias = "regula")]
    RegulaFalsi,
    Secant,
    Newton,
    NewtonDamped,
    Picard,
    Aitken,
}

impl Method {
    pub const ALL: &'static [Self] = &[
        Self::Bisection,
        Self::RegulaFalsi,
        Self::Secant,
        Self::Newton,
        Self::NewtonDamped,
        Self::Picard,
        Self::Aitken,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bisection => "bisection",
            Self::RegulaFalsi => "regula-falsi",
            Self::Secant => "secant",
            Self::Newton => "newton",
            Self::NewtonDamped => "newton-damped",
            Self::Picard => "picard",
            Self::Aitken => "aitken",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Bisection => "Bisection",
            Self::RegulaFalsi => "Regula falsi",
            Self::Secant => "Secant",
            Self::Newton => "Newton",
            Self::NewtonDamped => "Damped Newton",
            Self::Picard => "Fixed point (Picard)",
            Self::Aitken => "Aitken-accelerated Picard",
        }
    }

    /// Methods that iterate on a bracket rather than on seed points.
    #[must_use]
    pub const fn is_bracketing(self) -> bool {
        matches!(self, Self::Bisection | Self::RegulaFalsi)
    }

    /// Methods that iterate a fixed-point map.
    #[must_use]
    pub const fn uses_fixed_point_map(self) -> bool {
        matches!(self, Self::Picard | Self::Aitken)
    }
}

impl Default for Method {
    fn default() -> Self {
        Self::Newton
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).name())
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized == "regula" {
            return Ok(Self::RegulaFalsi);
        }

        Self::ALL
            .iter()
            .copied()
            .find(|method| method.name() == normalized)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}
