//! Analytic model catalog
//!
//! Each model has a fixed parameter list, a validator, a legend label and a
//! sampler that evaluates the curve over an x interval.

use crate::error::{PlotError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    #[default]
    Linear,
    Exponential,
    Quadratic,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Linear, Model::Exponential, Model::Quadratic];

    /// Catalog name shown in the model picker
    pub fn name(&self) -> &'static str {
        match self {
            Model::Linear => "y = mx + c",
            Model::Exponential => "y = ar^x + c",
            Model::Quadratic => "y = ax^2 + bx + c",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| PlotError::UnknownModel(name.to_string()))
    }

    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            Model::Linear => &["m", "c"],
            Model::Exponential => &["a", "r", "c"],
            Model::Quadratic => &["a", "b", "c"],
        }
    }

    /// Whether `params` can be plotted with this model
    pub fn validate(&self, params: &[f64]) -> bool {
        if params.len() != self.param_names().len() || params.iter().any(|p| !p.is_finite()) {
            return false;
        }
        match self {
            // A negative base has no real power for fractional x
            Model::Exponential => params[1] >= 0.0,
            Model::Linear | Model::Quadratic => true,
        }
    }

    /// Legend label with the parameters substituted. `params` must have
    /// passed [`Model::validate`].
    pub fn label(&self, params: &[f64]) -> String {
        match (self, params) {
            (Model::Linear, [m, c]) => format!("y = {:?}x + {:?}", m, c),
            (Model::Exponential, [a, r, c]) => format!("y = {:?}x{:?}^x + {:?}", a, r, c),
            (Model::Quadratic, [a, b, c]) => format!("y = {:?}x^2 + {:?}x + {:?}", a, b, c),
            _ => self.name().to_string(),
        }
    }

    /// Evaluate the model at one x
    pub fn evaluate(&self, params: &[f64], x: f64) -> f64 {
        match (self, params) {
            (Model::Linear, [m, c]) => m * x + c,
            (Model::Exponential, [a, r, c]) => a * r.powf(x) + c,
            (Model::Quadratic, [a, b, c]) => a * x * x + b * x + c,
            _ => f64::NAN,
        }
    }

    /// `samples` evenly spaced points over `[min, max]`, endpoints included
    pub fn generate(&self, params: &[f64], min: f64, max: f64, samples: usize) -> (Vec<f64>, Vec<f64>) {
        let xs = linspace(min, max, samples);
        let ys = xs.iter().map(|&x| self.evaluate(params, x)).collect();
        (xs, ys)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Evenly spaced values over `[min, max]`, endpoints included
pub fn linspace(min: f64, max: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![min],
        n => {
            let step = (max - min) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { max } else { min + step * i as f64 })
                .collect()
        }
    }
}

/// Parse one parameter box. Empty text means zero.
pub fn parse_parameter(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| PlotError::NonNumericParameter {
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_generate() {
        let (xs, ys) = Model::Linear.generate(&[2.0, 1.0], 0.0, 10.0, 2000);
        assert_eq!(xs.len(), 2000);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[1999], 10.0);
        assert_eq!(ys[0], 1.0);
        assert_eq!(ys[1999], 21.0);
    }

    #[test]
    fn test_exponential_validation() {
        assert!(Model::Exponential.validate(&[1.0, 0.0, 0.0]));
        assert!(Model::Exponential.validate(&[1.0, 2.0, 0.0]));
        assert!(!Model::Exponential.validate(&[1.0, -2.0, 0.0]));
        assert!(!Model::Exponential.validate(&[1.0, 2.0]));
        assert!(!Model::Linear.validate(&[f64::NAN, 1.0]));
        assert!(Model::Quadratic.validate(&[-1.0, -2.0, -3.0]));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Model::Linear.label(&[2.0, 0.5]), "y = 2.0x + 0.5");
        assert_eq!(Model::Exponential.label(&[3.0, 2.0, 1.0]), "y = 3.0x2.0^x + 1.0");
        assert_eq!(Model::Quadratic.label(&[1.0, 0.0, -4.0]), "y = 1.0x^2 + 0.0x + -4.0");
    }

    #[test]
    fn test_evaluate() {
        assert_eq!(Model::Exponential.evaluate(&[2.0, 3.0, 1.0], 2.0), 19.0);
        assert_eq!(Model::Quadratic.evaluate(&[1.0, -2.0, 1.0], 1.0), 0.0);
    }

    #[test]
    fn test_name_lookup() {
        for m in Model::ALL {
            assert_eq!(Model::from_name(m.name()).unwrap(), m);
        }
        assert!(Model::from_name("y = sin(x)").is_err());
    }

    #[test]
    fn test_linspace_edges() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 5.0, 1), vec![3.0]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_parse_parameter() {
        assert_eq!(parse_parameter("").unwrap(), 0.0);
        assert_eq!(parse_parameter("  ").unwrap(), 0.0);
        assert_eq!(parse_parameter(" 2.5 ").unwrap(), 2.5);
        assert!(matches!(
            parse_parameter("abc"),
            Err(PlotError::NonNumericParameter { .. })
        ));
    }
}
