use serde::{Deserialize, Serialize};

use crate::encoding::{FeatureVector, FEATURE_COUNT};

/// Pre-fitted per-feature linear transform applied before prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureScaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { scale: Vec<f64>, min: Vec<f64> },
}

impl FeatureScaler {
    pub fn kind(&self) -> &'static str {
        match self {
            FeatureScaler::Standard { .. } => "standard",
            FeatureScaler::MinMax { .. } => "min_max",
        }
    }

    /// Structural checks run once at load time.
    pub fn check(&self) -> Result<(), String> {
        let (first, second, names) = match self {
            FeatureScaler::Standard { mean, scale } => (mean, scale, ("mean", "scale")),
            FeatureScaler::MinMax { scale, min } => (scale, min, ("scale", "min")),
        };

        for (name, values) in [(names.0, first), (names.1, second)] {
            if values.len() != FEATURE_COUNT {
                return Err(format!(
                    "{name} has {} entries, expected {FEATURE_COUNT}",
                    values.len()
                ));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(format!("{name} contains non-finite values"));
            }
        }

        if let FeatureScaler::Standard { scale, .. } = self {
            if let Some(i) = scale.iter().position(|s| *s == 0.0) {
                return Err(format!("scale for feature {i} is zero"));
            }
        }
        Ok(())
    }

    pub fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut out = features.values();
        for (i, x) in out.iter_mut().enumerate() {
            *x = match self {
                FeatureScaler::Standard { mean, scale } => {
                    (*x - param(mean, i)) / param(scale, i)
                }
                FeatureScaler::MinMax { scale, min } => *x * param(scale, i) + param(min, i),
            };
        }
        FeatureVector::from_values(out)
    }
}

fn param(values: &[f64], i: usize) -> f64 {
    values.get(i).copied().unwrap_or(f64::NAN)
}
