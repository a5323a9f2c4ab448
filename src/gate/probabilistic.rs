// src/gate/probabilistic.rs

use super::matrix::ProbabilityMatrix;
use super::MAX_FAN;
use rand::Rng;

/// Stochastic gate: row `x` of the matrix is the output distribution for
/// input value `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilisticGate {
    matrix: ProbabilityMatrix,
}

impl ProbabilisticGate {
    /// `2^fan_in` rows of `2^fan_out` raw weights, row-major. Both fans are
    /// clamped to [`MAX_FAN`].
    pub fn new<I>(fan_in: usize, fan_out: usize, weights: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (fan_in, fan_out) = (fan_in.min(MAX_FAN), fan_out.min(MAX_FAN));
        ProbabilisticGate {
            matrix: ProbabilityMatrix::from_weights(1 << fan_in, 1 << fan_out, weights),
        }
    }

    pub fn matrix(&self) -> &ProbabilityMatrix {
        &self.matrix
    }

    #[inline]
    pub fn fire<R: Rng>(&self, x: usize, rng: &mut R) -> usize {
        let row = x & (self.matrix.rows() - 1);
        self.matrix.sample(row, rng)
    }
}
