// src/gate/adaptive.rs

//! Adaptive gate: a probabilistic gate whose matrix is reinforced online.
//!
//! The gate's first two input bits are feedback signals: bit 0 positive,
//! bit 1 negative. Like a probabilistic gate, the full input value (feedback
//! bits included) selects the matrix row. Since inputs are read from the
//! state produced by the previous step, a feedback bit observed now reports
//! the consequence of earlier firings.
//!
//! Each firing is remembered in a history of at most `h` entries. Feedback
//! moves the fired `(row, output)` entry up by `P[bucket]` or down by
//! `N[bucket]`; [`FeedbackPolicy`] picks the bucket and whether older
//! firings are adjusted too.

use super::matrix::ProbabilityMatrix;
use super::MAX_FAN;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of feedback bits preceding an adaptive gate's data inputs.
pub const FEEDBACK_INPUTS: usize = 2;

/// Selects which adjustment bucket feedback uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackPolicy {
    /// Only the firing that just happened is adjusted; bucket = row % h.
    #[default]
    RowBucket,
    /// Every remembered firing is adjusted with bucket = age, 0 being the
    /// firing that just happened. Older firings in the fired row with a
    /// different output are skipped, so positive feedback never lowers the
    /// fired entry.
    Recency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveGate {
    matrix: ProbabilityMatrix,
    pristine: ProbabilityMatrix,
    positive: Vec<f64>,
    negative: Vec<f64>,
    history: VecDeque<(usize, usize)>,
    policy: FeedbackPolicy,
}

impl AdaptiveGate {
    /// `fan_in` counts all inputs, feedback included, and is clamped to
    /// `MAX_FAN + FEEDBACK_INPUTS`. `positive` sets the history length `h`;
    /// `negative` is padded with zeros or truncated to match.
    pub fn new<I>(
        fan_in: usize,
        fan_out: usize,
        weights: I,
        positive: Vec<f64>,
        mut negative: Vec<f64>,
        policy: FeedbackPolicy,
    ) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        negative.resize(positive.len(), 0.0);
        let fan_in = fan_in.min(MAX_FAN + FEEDBACK_INPUTS);
        let fan_out = fan_out.min(MAX_FAN);
        let matrix = ProbabilityMatrix::from_weights(1 << fan_in, 1 << fan_out, weights);
        AdaptiveGate {
            pristine: matrix.clone(),
            matrix,
            history: VecDeque::with_capacity(positive.len()),
            positive,
            negative,
            policy,
        }
    }

    /// History length `h`.
    pub fn history_len(&self) -> usize {
        self.positive.len()
    }

    pub fn positive(&self) -> &[f64] {
        &self.positive
    }

    pub fn negative(&self) -> &[f64] {
        &self.negative
    }

    pub fn policy(&self) -> FeedbackPolicy {
        self.policy
    }

    pub fn matrix(&self) -> &ProbabilityMatrix {
        &self.matrix
    }

    /// Remembered firings, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &(usize, usize)> {
        self.history.iter()
    }

    pub fn probability(&self, row: usize, output: usize) -> f64 {
        self.matrix.get(row, output)
    }

    pub fn fire<R: Rng>(&mut self, x: usize, rng: &mut R) -> usize {
        let positive = x & 1 == 1;
        let negative = (x >> 1) & 1 == 1;
        let row = x & (self.matrix.rows() - 1);
        let y = self.matrix.sample(row, rng);

        let h = self.history_len();
        if h == 0 {
            return y;
        }
        self.history.push_front((row, y));
        self.history.truncate(h);

        if positive || negative {
            match self.policy {
                FeedbackPolicy::RowBucket => self.reinforce(row, y, row % h, positive, negative),
                FeedbackPolicy::Recency => {
                    for (age, &(r, c)) in self.history.iter().enumerate() {
                        if r == row && c != y {
                            continue;
                        }
                        let delta = feedback_delta(
                            self.positive[age],
                            self.negative[age],
                            positive,
                            negative,
                        );
                        self.matrix.adjust(r, c, delta);
                    }
                }
            }
        }
        y
    }

    /// Applies feedback to a single `(row, output)` entry using adjustment
    /// bucket `bucket`, then renormalizes the row. Out-of-range arguments
    /// are ignored.
    pub fn reinforce(
        &mut self,
        row: usize,
        output: usize,
        bucket: usize,
        positive: bool,
        negative: bool,
    ) {
        if row >= self.matrix.rows() || output >= self.matrix.cols() || bucket >= self.history_len()
        {
            return;
        }
        let delta = feedback_delta(
            self.positive[bucket],
            self.negative[bucket],
            positive,
            negative,
        );
        self.matrix.adjust(row, output, delta);
    }

    /// Restores the matrix as parsed and forgets the firing history.
    pub fn reset(&mut self) {
        self.matrix = self.pristine.clone();
        self.history.clear();
    }
}

#[inline]
fn feedback_delta(up: f64, down: f64, positive: bool, negative: bool) -> f64 {
    let mut delta = 0.0;
    if positive {
        delta += up;
    }
    if negative {
        delta -= down;
    }
    delta
}
