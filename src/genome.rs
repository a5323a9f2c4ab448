// src/genome.rs

//! Circular genome representation.
//!
//! A genome is a flat sequence of small unsigned integers (conventionally
//! 0-255) that is indexed modulo its length, so reads past the end wrap to
//! the beginning. Both the translator and the ancestor generator go through
//! [`Genome::get`] / [`GenomeCursor`] rather than indexing the raw vector.

use serde::{Deserialize, Serialize};

/// Sum of the two values forming a start codon.
pub const START_CODON_SUM: u64 = 255;

/// Maps `x` into the half-open range `[lb, ub)` by modular arithmetic.
///
/// Returns `lb` when the range is empty (`ub <= lb`), so a degenerate
/// bound never divides by zero.
#[inline]
pub fn modnorm(x: u32, lb: usize, ub: usize) -> usize {
    if ub <= lb {
        return lb;
    }
    lb + (x as usize) % (ub - lb)
}

/// Same as [`modnorm`], but for inclusive bounds `[lb, ub]`.
#[inline]
pub fn modnorm_inclusive(x: u32, lb: usize, ub: usize) -> usize {
    modnorm(x, lb, ub.saturating_add(1))
}

/// A circular sequence of genome values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome {
    values: Vec<u32>,
}

impl Genome {
    pub fn new(values: Vec<u32>) -> Self {
        Genome { values }
    }

    /// A genome of `len` copies of `value`.
    pub fn filled(len: usize, value: u32) -> Self {
        Genome {
            values: vec![value; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads position `i` modulo the genome length. An empty genome reads 0.
    #[inline]
    pub fn get(&self, i: usize) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        self.values[i % self.values.len()]
    }

    /// Writes position `i` modulo the genome length. No-op on an empty genome.
    #[inline]
    pub fn set(&mut self, i: usize, value: u32) {
        let len = self.values.len();
        if len == 0 {
            return;
        }
        self.values[i % len] = value;
    }

    /// True if positions `i` and `i + 1` form a start codon.
    #[inline]
    pub fn is_start_codon(&self, i: usize) -> bool {
        self.get(i) as u64 + self.get(i + 1) as u64 == START_CODON_SUM
    }

    /// Number of start codons anywhere in the genome, overlapping included.
    pub fn count_start_codons(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_start_codon(i)).count()
    }

    /// Sequential reader beginning at position `start`.
    pub fn cursor(&self, start: usize) -> GenomeCursor<'_> {
        GenomeCursor {
            genome: self,
            pos: start,
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.values
    }
}

impl From<Vec<u32>> for Genome {
    fn from(values: Vec<u32>) -> Self {
        Genome::new(values)
    }
}

impl From<Vec<u8>> for Genome {
    fn from(bytes: Vec<u8>) -> Self {
        Genome::new(bytes.into_iter().map(u32::from).collect())
    }
}

impl From<&[u8]> for Genome {
    fn from(bytes: &[u8]) -> Self {
        Genome::new(bytes.iter().copied().map(u32::from).collect())
    }
}

impl From<&[u32]> for Genome {
    fn from(values: &[u32]) -> Self {
        Genome::new(values.to_vec())
    }
}

/// Reads a genome value by value, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct GenomeCursor<'a> {
    genome: &'a Genome,
    pos: usize,
}

impl GenomeCursor<'_> {
    /// Returns the value under the cursor and advances.
    #[inline]
    pub fn next_value(&mut self) -> u32 {
        let v = self.genome.get(self.pos);
        self.pos = self.pos.wrapping_add(1);
        v
    }

    /// Reads a value and normalizes it into `[lb, ub)`.
    #[inline]
    pub fn next_modnorm(&mut self, lb: usize, ub: usize) -> usize {
        modnorm(self.next_value(), lb, ub)
    }

    /// Current position, not reduced modulo the genome length.
    pub fn position(&self) -> usize {
        self.pos
    }
}
