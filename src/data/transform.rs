//! Numeric transforms applied to raw x and y values before plotting

use crate::error::{PlotError, Result};
use thiserror::Error;

/// A value fell outside the domain of a transform
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("{transform} is undefined for {value}")]
pub struct DomainError {
    pub transform: Transform,
    pub value: f64,
}

/// Transform catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    #[default]
    Identity,
    Log10,
    Reciprocal,
    Square,
    /// Sine of an angle in degrees
    Sin,
    /// Cosine of an angle in degrees
    Cos,
}

impl Transform {
    pub const ALL: [Transform; 6] = [
        Transform::Identity,
        Transform::Log10,
        Transform::Reciprocal,
        Transform::Square,
        Transform::Sin,
        Transform::Cos,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Transform::Identity => "x: x",
            Transform::Log10 => "x: log(x)",
            Transform::Reciprocal => "x: 1/x",
            Transform::Square => "x: x^2",
            Transform::Sin => "x: sin(x)",
            Transform::Cos => "x: cos(x)",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| PlotError::UnknownTransform(name.to_string()))
    }

    pub fn apply(&self, value: f64) -> std::result::Result<f64, DomainError> {
        let result = match self {
            Transform::Identity => value,
            Transform::Log10 if value <= 0.0 => f64::NAN,
            Transform::Log10 => value.log10(),
            Transform::Reciprocal if value == 0.0 => f64::NAN,
            Transform::Reciprocal => 1.0 / value,
            Transform::Square => value * value,
            Transform::Sin => value.to_radians().sin(),
            Transform::Cos => value.to_radians().cos(),
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(DomainError {
                transform: *self,
                value,
            })
        }
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors() {
        assert!(Transform::Log10.apply(0.0).is_err());
        assert!(Transform::Log10.apply(-3.0).is_err());
        assert!(Transform::Reciprocal.apply(0.0).is_err());
        assert!(Transform::Identity.apply(f64::INFINITY).is_err());
        assert!(Transform::Square.apply(1e200).is_err());

        let err = Transform::Reciprocal.apply(0.0).unwrap_err();
        assert_eq!(err, DomainError { transform: Transform::Reciprocal, value: 0.0 });
        assert_eq!(err.to_string(), "x: 1/x is undefined for 0");
    }

    #[test]
    fn test_values() {
        assert_eq!(Transform::Log10.apply(1000.0).unwrap(), 3.0);
        assert_eq!(Transform::Reciprocal.apply(4.0).unwrap(), 0.25);
        assert_eq!(Transform::Square.apply(-3.0).unwrap(), 9.0);
        assert!((Transform::Sin.apply(90.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((Transform::Cos.apply(180.0).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_name_lookup() {
        for t in Transform::ALL {
            assert_eq!(Transform::from_name(t.name()).unwrap(), t);
        }
        assert!(matches!(
            Transform::from_name("x: tan(x)"),
            Err(PlotError::UnknownTransform(_))
        ));
    }
}
