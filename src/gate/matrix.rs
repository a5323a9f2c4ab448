// src/gate/matrix.rs

//! Row-stochastic matrix used by probabilistic and adaptive gates.

use rand::Rng;

/// Normalizes `row` in place so it sums to 1.0.
///
/// Negative and non-finite entries count as 0. A row whose total is 0
/// becomes the uniform distribution.
pub fn normalize_row(row: &mut [f64]) {
    if row.is_empty() {
        return;
    }
    for p in row.iter_mut() {
        if !p.is_finite() || *p < 0.0 {
            *p = 0.0;
        }
    }
    let sum: f64 = row.iter().sum();
    if sum > 0.0 {
        row.iter_mut().for_each(|p| *p /= sum);
    } else {
        let uniform = 1.0 / row.len() as f64;
        row.fill(uniform);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl ProbabilityMatrix {
    /// Builds a `rows x cols` matrix from row-major raw weights, normalizing
    /// each row. Missing weights read as 0; at least one row and column
    /// always exist.
    pub fn from_weights<I>(rows: usize, cols: usize, weights: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let mut data: Vec<f64> = weights.into_iter().take(rows * cols).collect();
        data.resize(rows * cols, 0.0);
        let mut m = ProbabilityMatrix { rows, cols, data };
        for r in 0..rows {
            normalize_row(m.row_mut(r));
        }
        m
    }

    /// Matrix whose rows are all uniform.
    pub fn uniform(rows: usize, cols: usize) -> Self {
        ProbabilityMatrix::from_weights(rows, cols, std::iter::empty())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn row(&self, r: usize) -> &[f64] {
        let start = r * self.cols;
        &self.data[start..start + self.cols]
    }

    #[inline]
    fn row_mut(&mut self, r: usize) -> &mut [f64] {
        let start = r * self.cols;
        &mut self.data[start..start + self.cols]
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    /// Samples a column from row `r`: the smallest `k` whose cumulative
    /// probability exceeds a uniform draw in `[0, 1)`.
    pub fn sample<R: Rng>(&self, r: usize, rng: &mut R) -> usize {
        let draw: f64 = rng.gen();
        let mut acc = 0.0;
        for (k, p) in self.row(r).iter().enumerate() {
            acc += p;
            if acc > draw {
                return k;
            }
        }
        // Rounding left the cumulative sum just below the draw.
        self.cols - 1
    }

    /// Adds `delta` to entry `(r, c)`, clamps it at 0 and renormalizes the row.
    pub fn adjust(&mut self, r: usize, c: usize, delta: f64) {
        let i = r * self.cols + c;
        self.data[i] = (self.data[i] + delta).max(0.0);
        normalize_row(self.row_mut(r));
    }
}
