// src/gate/mod.rs

//! Gates: local transition functions of a Markov network.
//!
//! Every gate reads a few state cells, packs their low bits into an input
//! value (bit `j` from `inputs[j]`), maps it to an output value and scatters
//! output bit `j` to `outputs[j]`. The mapping depends on the gate kind.

mod adaptive;
mod logic;
mod matrix;
mod probabilistic;

pub use adaptive::{AdaptiveGate, FeedbackPolicy, FEEDBACK_INPUTS};
pub use logic::LogicGate;
pub use matrix::{normalize_row, ProbabilityMatrix};
pub use probabilistic::ProbabilisticGate;

use bitflags::bitflags;
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest fan-in or fan-out (excluding adaptive feedback inputs) a gate may
/// have. Tables grow as `2^fan_in * 2^fan_out`.
pub const MAX_FAN: usize = 8;

/// Gate kinds, valued by the first half of their start codon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum GateType {
    Logic = 42,
    Probabilistic = 43,
    Adaptive = 44,
}

impl GateType {
    pub const ALL: [GateType; 3] = [GateType::Logic, GateType::Probabilistic, GateType::Adaptive];

    pub fn from_codon(value: u32) -> Option<Self> {
        match value {
            42 => Some(GateType::Logic),
            43 => Some(GateType::Probabilistic),
            44 => Some(GateType::Adaptive),
            _ => None,
        }
    }

    pub fn codon(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            GateType::Logic => "logic",
            GateType::Probabilistic => "probabilistic",
            GateType::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of gate types the translator is allowed to build.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GateTypes: u8 {
        const LOGIC         = 1 << 0;
        const PROBABILISTIC = 1 << 1;
        const ADAPTIVE      = 1 << 2;
    }
}

impl Default for GateTypes {
    fn default() -> Self {
        GateTypes::all()
    }
}

impl From<GateType> for GateTypes {
    fn from(t: GateType) -> Self {
        match t {
            GateType::Logic => GateTypes::LOGIC,
            GateType::Probabilistic => GateTypes::PROBABILISTIC,
            GateType::Adaptive => GateTypes::ADAPTIVE,
        }
    }
}

impl GateTypes {
    /// Parses a list such as `"logic,probabilistic"`. A type is enabled when
    /// its name appears anywhere in the string, ignoring case.
    pub fn from_names(names: &str) -> Self {
        let names = names.to_ascii_lowercase();
        GateType::ALL
            .iter()
            .filter(|t| names.contains(t.name()))
            .fold(GateTypes::empty(), |acc, &t| acc | GateTypes::from(t))
    }

    pub fn enables(self, t: GateType) -> bool {
        self.contains(GateTypes::from(t))
    }

    /// Enabled types in codon order.
    pub fn types(self) -> Vec<GateType> {
        GateType::ALL.iter().copied().filter(|&t| self.enables(t)).collect()
    }
}

/// Kind-specific gate payload.
#[derive(Debug, Clone, PartialEq)]
pub enum GateKind {
    Logic(LogicGate),
    Probabilistic(ProbabilisticGate),
    Adaptive(AdaptiveGate),
}

/// A gate: shared input/output header plus its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    inputs: Vec<usize>,
    outputs: Vec<usize>,
    kind: GateKind,
}

impl Gate {
    /// Logic gate with the given truth table (see [`LogicGate::new`]).
    pub fn logic(mut inputs: Vec<usize>, mut outputs: Vec<usize>, table: Vec<u32>) -> Self {
        inputs.truncate(MAX_FAN);
        outputs.truncate(MAX_FAN);
        let kind = GateKind::Logic(LogicGate::new(inputs.len(), outputs.len(), table));
        Gate {
            inputs,
            outputs,
            kind,
        }
    }

    /// Probabilistic gate from row-major raw weights, each row normalized.
    pub fn probabilistic<I>(mut inputs: Vec<usize>, mut outputs: Vec<usize>, weights: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        inputs.truncate(MAX_FAN);
        outputs.truncate(MAX_FAN);
        let kind = GateKind::Probabilistic(ProbabilisticGate::new(
            inputs.len(),
            outputs.len(),
            weights,
        ));
        Gate {
            inputs,
            outputs,
            kind,
        }
    }

    /// Adaptive gate. `inputs[0]` and `inputs[1]` are the positive and
    /// negative feedback cells; the matrix has one row per value of all
    /// inputs, feedback bits included.
    pub fn adaptive<I>(
        mut inputs: Vec<usize>,
        mut outputs: Vec<usize>,
        weights: I,
        positive: Vec<f64>,
        negative: Vec<f64>,
        policy: FeedbackPolicy,
    ) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        inputs.truncate(MAX_FAN + FEEDBACK_INPUTS);
        outputs.truncate(MAX_FAN);
        let kind = GateKind::Adaptive(AdaptiveGate::new(
            inputs.len(),
            outputs.len(),
            weights,
            positive,
            negative,
            policy,
        ));
        Gate {
            inputs,
            outputs,
            kind,
        }
    }

    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[usize] {
        &self.outputs
    }

    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut GateKind {
        &mut self.kind
    }

    pub fn gate_type(&self) -> GateType {
        match self.kind {
            GateKind::Logic(_) => GateType::Logic,
            GateKind::Probabilistic(_) => GateType::Probabilistic,
            GateKind::Adaptive(_) => GateType::Adaptive,
        }
    }

    /// Maps input value `x` to an output value. Bits of `x` beyond the
    /// gate's fan-in are ignored. Never panics.
    #[inline]
    pub fn fire<R: Rng>(&mut self, x: usize, rng: &mut R) -> usize {
        match &mut self.kind {
            GateKind::Logic(g) => g.fire(x),
            GateKind::Probabilistic(g) => g.fire(x, rng),
            GateKind::Adaptive(g) => g.fire(x, rng),
        }
    }

    /// Restores learned state (adaptive gates only).
    pub fn reset(&mut self) {
        if let GateKind::Adaptive(g) = &mut self.kind {
            g.reset();
        }
    }

    /// True if every index is below `size`.
    pub fn fits(&self, size: usize) -> bool {
        self.inputs.iter().chain(&self.outputs).all(|&i| i < size)
    }

    /// Wraps out-of-range indices modulo `size`. `size` must be non-zero.
    pub(crate) fn wrap_indices(&mut self, size: usize) {
        for i in self.inputs.iter_mut().chain(self.outputs.iter_mut()) {
            if *i >= size {
                warn!("gate index {} out of range for {} states, wrapping", i, size);
                *i %= size;
            }
        }
    }
}

#[cfg(test)]
mod tests;
