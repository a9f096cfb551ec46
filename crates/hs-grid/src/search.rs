//! Candidate grid generation.

use hs_types::{Candidate, ExponentRange};
use tracing::debug;

/// The full cross product of two exponent ranges, lifted into parameter
/// space.
///
/// Generation order is cost-major (cost outer, gamma inner). The scheduler
/// consumes the grid as a stack, so the last-generated candidate is the first
/// one dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamGrid {
    candidates: Vec<Candidate>,
}

impl ParamGrid {
    /// Expand both ranges and take their cross product.
    pub fn generate(cost_range: &ExponentRange, gamma_range: &ExponentRange) -> Self {
        let gamma_exps = gamma_range.exponents();
        let mut candidates = Vec::with_capacity(cost_range.len() * gamma_range.len());

        for cost_exp in cost_range.exponents() {
            for gamma_exp in &gamma_exps {
                candidates.push(Candidate::from_exponents(cost_exp, *gamma_exp));
            }
        }

        debug!(
            candidates = candidates.len(),
            cost = %cost_range,
            gamma = %gamma_range,
            "generated parameter grid"
        );
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Hand the grid to the scheduler, which pops candidates off the end.
    pub fn into_stack(self) -> Vec<Candidate> {
        self.candidates
    }
}
