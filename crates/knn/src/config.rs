//! Configuration for kNN regression models.

use std::fmt;
use std::str::FromStr;

use crate::error::KnnError;

/// How the labels of the k nearest neighbors are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Arithmetic mean of the neighbor labels.
    Unweighted,
    /// Inverse-distance weighting: `w_i = 1 / (d_i + ε)`.
    #[default]
    Weighted,
}

impl Strategy {
    /// Lower-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Unweighted => "unweighted",
            Strategy::Weighted => "weighted",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = KnnError;

    /// Parses `"weighted"` or `"unweighted"` (alias `"simple"`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weighted" => Ok(Strategy::Weighted),
            "unweighted" | "simple" => Ok(Strategy::Unweighted),
            _ => Err(KnnError::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}

/// Configuration for a kNN regression model.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use knnbench_knn::{KnnConfig, Strategy};
///
/// let config = KnnConfig::new(7).with_strategy(Strategy::Unweighted);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KnnConfig {
    /// Number of nearest neighbors to combine.
    k: usize,
    /// Label weighting strategy.
    strategy: Strategy,
    /// Added to each distance before inversion in weighted mode.
    epsilon: f64,
}

impl KnnConfig {
    /// Creates a new configuration with the given k.
    ///
    /// Defaults: `strategy = Weighted`, `epsilon = 1e-8`.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            strategy: Strategy::Weighted,
            epsilon: 1e-8,
        }
    }

    /// Sets the weighting strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the epsilon used in weighted mode.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Returns the number of nearest neighbors.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the weighting strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the epsilon.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Validates this configuration.
    ///
    /// Returns an error if k < 1 or epsilon is non-finite or below
    /// `f64::MIN_POSITIVE` (zero, negative, or subnormal).
    pub fn validate(&self) -> Result<(), KnnError> {
        if self.k < 1 {
            return Err(KnnError::InvalidK { k: self.k });
        }
        if !self.epsilon.is_finite() || self.epsilon < f64::MIN_POSITIVE {
            return Err(KnnError::InvalidEpsilon {
                epsilon: self.epsilon,
            });
        }
        Ok(())
    }
}

impl Default for KnnConfig {
    /// k = 7, weighted.
    fn default() -> Self {
        Self::new(7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = KnnConfig::default();
        assert_eq!(cfg.k(), 7);
        assert_eq!(cfg.strategy(), Strategy::Weighted);
        assert!((cfg.epsilon() - 1e-8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder_chaining() {
        let cfg = KnnConfig::new(3)
            .with_strategy(Strategy::Unweighted)
            .with_epsilon(1e-6);
        assert_eq!(cfg.k(), 3);
        assert_eq!(cfg.strategy(), Strategy::Unweighted);
        assert!((cfg.epsilon() - 1e-6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_epsilon_bounds() {
        assert!(KnnConfig::new(7).with_epsilon(f64::MIN_POSITIVE).validate().is_ok());
        for eps in [0.0, -1e-8, 1e-310, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    KnnConfig::new(7).with_epsilon(eps).validate(),
                    Err(KnnError::InvalidEpsilon { .. })
                ),
                "epsilon {eps}"
            );
        }
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("weighted".parse::<Strategy>().unwrap(), Strategy::Weighted);
        assert_eq!("WEIGHTED".parse::<Strategy>().unwrap(), Strategy::Weighted);
        assert_eq!(
            "unweighted".parse::<Strategy>().unwrap(),
            Strategy::Unweighted
        );
        assert_eq!("Simple".parse::<Strategy>().unwrap(), Strategy::Unweighted);
        assert!(matches!(
            "rank".parse::<Strategy>(),
            Err(KnnError::UnknownStrategy { .. })
        ));
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for s in [Strategy::Weighted, Strategy::Unweighted] {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
    }

    #[test]
    fn test_validate_invalid_k() {
        let err = KnnConfig::new(0).validate().unwrap_err();
        assert!(
            matches!(err, KnnError::InvalidK { k: 0 }),
            "expected InvalidK, got {err:?}"
        );
    }

    #[test]
    fn test_validate_invalid_epsilon() {
        for eps in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = KnnConfig::new(1).with_epsilon(eps).validate();
            assert!(
                matches!(result, Err(KnnError::InvalidEpsilon { .. })),
                "epsilon {eps} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_error_priority() {
        // k is checked before epsilon.
        let result = KnnConfig::new(0).with_epsilon(-1.0).validate();
        assert!(matches!(result, Err(KnnError::InvalidK { k: 0 })));
    }
}
