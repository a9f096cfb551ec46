//! Parameter-space primitives: kernels, log2 exponent ranges, and the
//! (cost, gamma) candidates the sweep evaluates.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ConfigError;

/// Kernel choices accepted by the external trainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    Linear,
    Polynomial,
    Rbf,
    Sigmoid,
}

impl Kernel {
    /// The 1-based kernel-type index expected on the trainer command line.
    pub fn svm_index(&self) -> u32 {
        match self {
            Self::Linear => 1,
            Self::Polynomial => 2,
            Self::Rbf => 3,
            Self::Sigmoid => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Polynomial => "polynomial",
            Self::Rbf => "rbf",
            Self::Sigmoid => "sigmoid",
        }
    }
}

impl FromStr for Kernel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "polynomial" => Ok(Self::Polynomial),
            "rbf" => Ok(Self::Rbf),
            "sigmoid" => Ok(Self::Sigmoid),
            other => Err(ConfigError::UnknownKernel {
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A log2 exponent sweep described as `start:stop:step`.
///
/// Materializes to `start + i*step` for `i in 0..ceil((stop-start)/step)` —
/// half-open range semantics, so `stop` itself is never produced. Negative
/// steps walk downward toward `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl ExponentRange {
    /// Build a validated range. A zero step, non-finite fields, or a stop
    /// that cannot be reached from start by repeated stepping are all
    /// configuration errors.
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, ConfigError> {
        let input = format!("{start}:{stop}:{step}");
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(ConfigError::MalformedRange {
                input,
                reason: "fields must be finite numbers".to_string(),
            });
        }
        if step == 0.0 {
            return Err(ConfigError::MalformedRange {
                input,
                reason: "step must be nonzero".to_string(),
            });
        }
        if (stop - start) * step <= 0.0 {
            return Err(ConfigError::MalformedRange {
                input,
                reason: "stop is not reachable from start with this step".to_string(),
            });
        }
        Ok(Self { start, stop, step })
    }

    /// Number of exponents this range materializes to.
    pub fn len(&self) -> usize {
        ((self.stop - self.start) / self.step).ceil() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize the exponent sequence.
    pub fn exponents(&self) -> Vec<f64> {
        (0..self.len())
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }
}

impl FromStr for ExponentRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() != 3 {
            return Err(ConfigError::MalformedRange {
                input: s.to_string(),
                reason: "expected start:stop:step".to_string(),
            });
        }
        let mut parsed = [0.0f64; 3];
        for (slot, field) in parsed.iter_mut().zip(&fields) {
            *slot = field.parse().map_err(|_| ConfigError::MalformedRange {
                input: s.to_string(),
                reason: format!("'{field}' is not a number"),
            })?;
        }
        Self::new(parsed[0], parsed[1], parsed[2])
    }
}

impl std::fmt::Display for ExponentRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.stop, self.step)
    }
}

/// A single (cost, gamma) hyperparameter pair under evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub cost: f64,
    pub gamma: f64,
}

impl Candidate {
    /// Lift a pair of log2 exponents into parameter space.
    pub fn from_exponents(cost_exp: f64, gamma_exp: f64) -> Self {
        Self {
            cost: 2f64.powf(cost_exp),
            gamma: 2f64.powf(gamma_exp),
        }
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c:{}, g:{}", self.cost, self.gamma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_indices_are_one_based() {
        assert_eq!(Kernel::Linear.svm_index(), 1);
        assert_eq!(Kernel::Polynomial.svm_index(), 2);
        assert_eq!(Kernel::Rbf.svm_index(), 3);
        assert_eq!(Kernel::Sigmoid.svm_index(), 4);
    }

    #[test]
    fn kernel_parse_round_trip() {
        for name in ["linear", "polynomial", "rbf", "sigmoid"] {
            let kernel: Kernel = name.parse().unwrap();
            assert_eq!(kernel.to_string(), name);
        }
    }

    #[test]
    fn kernel_parse_rejects_unknown() {
        let err = "gaussian".parse::<Kernel>().unwrap_err();
        match err {
            ConfigError::UnknownKernel { name } => assert_eq!(name, "gaussian"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn range_parse_basic() {
        let range: ExponentRange = "-7:5:2".parse().unwrap();
        assert_eq!(range.exponents(), vec![-7.0, -5.0, -3.0, -1.0, 1.0, 3.0]);
    }

    #[test]
    fn range_is_half_open() {
        // Stop itself must never be produced.
        let range: ExponentRange = "-1:3:2".parse().unwrap();
        assert_eq!(range.exponents(), vec![-1.0, 1.0]);

        let range: ExponentRange = "-1:1:2".parse().unwrap();
        assert_eq!(range.exponents(), vec![-1.0]);
    }

    #[test]
    fn range_supports_negative_step() {
        let range: ExponentRange = "4:-2:-2".parse().unwrap();
        assert_eq!(range.exponents(), vec![4.0, 2.0, 0.0]);
    }

    #[test]
    fn range_exponents_are_monotone_and_bounded() {
        let range: ExponentRange = "-16:4:2".parse().unwrap();
        let exps = range.exponents();
        assert_eq!(exps[0], -16.0);
        for pair in exps.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(exps.iter().all(|e| *e < 4.0));
    }

    #[test]
    fn range_rejects_wrong_arity() {
        assert!("1:2".parse::<ExponentRange>().is_err());
        assert!("1:2:3:4".parse::<ExponentRange>().is_err());
    }

    #[test]
    fn range_rejects_non_numeric() {
        let err = "1:x:3".parse::<ExponentRange>().unwrap_err();
        match err {
            ConfigError::MalformedRange { reason, .. } => assert!(reason.contains("'x'")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn range_rejects_zero_step() {
        assert!("0:4:0".parse::<ExponentRange>().is_err());
    }

    #[test]
    fn range_rejects_unreachable_stop() {
        // Step points away from stop.
        assert!("0:4:-1".parse::<ExponentRange>().is_err());
        // Empty range: start == stop.
        assert!("2:2:1".parse::<ExponentRange>().is_err());
    }

    #[test]
    fn candidate_from_exponents() {
        let candidate = Candidate::from_exponents(-1.0, 1.0);
        assert_eq!(candidate.cost, 0.5);
        assert_eq!(candidate.gamma, 2.0);
    }
}
