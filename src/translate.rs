// src/translate.rs

//! Genome translator: builds a Markov network's gates from a circular genome.
//!
//! The genome is scanned value by value for start codons (two consecutive
//! values summing to 255). The first value of the codon names the gate type;
//! the values following the codon are parsed into the gate:
//!
//! ```text
//! [type, 255-type] [fan-in] [fan-out] [input idx]*fan-in [output idx]*fan-out [payload...]
//! ```
//!
//! Adaptive gates take two extra (feedback) inputs and put `h`, `P[h]` and
//! `N[h]` ahead of their matrix. Every value is modulo-normalized into a
//! valid range and reads wrap around the end of the genome, so any genome
//! parses. Scanning resumes one position after each codon, which lets genes
//! overlap.

use crate::config::TranslatorConfig;
use crate::gate::{FeedbackPolicy, Gate, GateType, GateTypes, FEEDBACK_INPUTS, MAX_FAN};
use crate::genome::{Genome, GenomeCursor};
use crate::network::MarkovNetwork;
use log::{debug, trace, warn};

/// Upper limit for the adaptive history length.
pub const MAX_HISTORY: usize = 256;

const DEFAULT_FAN_BOUND: usize = 4;
const DEFAULT_HISTORY_BOUND: usize = 4;
const DEFAULT_WEIGHT_STEPS: u32 = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Translator {
    fan_in: (usize, usize),
    fan_out: (usize, usize),
    history: (usize, usize),
    weight_steps: u32,
    enabled: GateTypes,
    feedback: FeedbackPolicy,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Translator with fan-in, fan-out and history fixed at 4, weights
    /// discretized into 1024 steps and every gate type enabled.
    pub fn new() -> Self {
        Translator {
            fan_in: (DEFAULT_FAN_BOUND, DEFAULT_FAN_BOUND),
            fan_out: (DEFAULT_FAN_BOUND, DEFAULT_FAN_BOUND),
            history: (DEFAULT_HISTORY_BOUND, DEFAULT_HISTORY_BOUND),
            weight_steps: DEFAULT_WEIGHT_STEPS,
            enabled: GateTypes::all(),
            feedback: FeedbackPolicy::default(),
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Self {
        Translator::new()
            .with_fan_in(config.fan_in.lower, config.fan_in.upper)
            .with_fan_out(config.fan_out.lower, config.fan_out.upper)
            .with_history(config.history.lower, config.history.upper)
            .with_weight_steps(config.weight_steps)
            .with_enabled(GateTypes::from_names(&config.gate_types))
            .with_feedback(config.feedback)
    }

    /// Inclusive fan-in bounds, clamped to [`MAX_FAN`].
    pub fn with_fan_in(mut self, lower: usize, upper: usize) -> Self {
        self.fan_in = (lower.min(MAX_FAN), upper.min(MAX_FAN));
        self
    }

    /// Inclusive fan-out bounds, clamped to [`MAX_FAN`].
    pub fn with_fan_out(mut self, lower: usize, upper: usize) -> Self {
        self.fan_out = (lower.min(MAX_FAN), upper.min(MAX_FAN));
        self
    }

    /// Inclusive bounds on the adaptive history length, clamped to [`MAX_HISTORY`].
    pub fn with_history(mut self, lower: usize, upper: usize) -> Self {
        self.history = (lower.min(MAX_HISTORY), upper.min(MAX_HISTORY));
        self
    }

    /// Number of steps adjustment weights are discretized into (at least 1).
    pub fn with_weight_steps(mut self, steps: u32) -> Self {
        self.weight_steps = steps.max(1);
        self
    }

    pub fn with_enabled(mut self, enabled: GateTypes) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_feedback(mut self, feedback: FeedbackPolicy) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn disable(&mut self, t: GateType) {
        self.enabled.remove(GateTypes::from(t));
    }

    pub fn enable(&mut self, t: GateType) {
        self.enabled.insert(GateTypes::from(t));
    }

    pub fn enabled(&self) -> GateTypes {
        self.enabled
    }

    pub fn feedback(&self) -> FeedbackPolicy {
        self.feedback
    }

    /// Builds a fresh network of the given shape from `genome`.
    pub fn build(
        &self,
        genome: &Genome,
        n_inputs: usize,
        n_outputs: usize,
        n_hidden: usize,
        seed: u64,
    ) -> MarkovNetwork {
        let mut network = MarkovNetwork::new(n_inputs, n_outputs, n_hidden, seed);
        self.translate(genome, &mut network);
        network
    }

    /// Appends one gate to `network` for every enabled start codon in
    /// `genome`. Returns the number of gates added. Never fails.
    pub fn translate(&self, genome: &Genome, network: &mut MarkovNetwork) -> usize {
        if network.state_size() == 0 {
            warn!("translate: network has no states, skipping genome");
            return 0;
        }
        let before = network.gate_count();
        for i in 0..genome.len() {
            if genome.is_start_codon(i) {
                self.translate_gene(genome, i, network);
            }
        }
        let added = network.gate_count() - before;
        debug!(
            "translate: {} gates from genome of length {}",
            added,
            genome.len()
        );
        added
    }

    /// Parses the gene whose start codon begins at `start`. Returns false
    /// (and adds nothing) for unknown or disabled gate types.
    pub fn translate_gene(&self, genome: &Genome, start: usize, network: &mut MarkovNetwork) -> bool {
        let codon = genome.get(start);
        let gate_type = match GateType::from_codon(codon) {
            Some(t) if self.enabled.enables(t) => t,
            Some(t) => {
                trace!("codon {} at {}: {} gates disabled", codon, start, t);
                return false;
            }
            None => {
                trace!("codon {} at {}: not a gate type", codon, start);
                return false;
            }
        };

        let size = network.state_size();
        if size == 0 {
            return false;
        }
        let mut cursor = genome.cursor(start + 2);
        let gate = match gate_type {
            GateType::Logic => self.parse_logic(&mut cursor, size),
            GateType::Probabilistic => self.parse_probabilistic(&mut cursor, size),
            GateType::Adaptive => self.parse_adaptive(&mut cursor, size),
        };
        debug!(
            "gene at {}: {} gate, inputs={:?}, outputs={:?}",
            start,
            gate_type,
            gate.inputs(),
            gate.outputs()
        );
        network.add_gate(gate);
        true
    }

    /// Reads the fan-in and fan-out counts, then that many state indices.
    fn parse_io(
        &self,
        cursor: &mut GenomeCursor<'_>,
        extra_inputs: usize,
        size: usize,
    ) -> (Vec<usize>, Vec<usize>) {
        let n_in = extra_inputs + cursor.next_modnorm(self.fan_in.0, self.fan_in.1 + 1);
        let n_out = cursor.next_modnorm(self.fan_out.0, self.fan_out.1 + 1);
        let inputs = (0..n_in).map(|_| cursor.next_modnorm(0, size)).collect();
        let outputs = (0..n_out).map(|_| cursor.next_modnorm(0, size)).collect();
        (inputs, outputs)
    }

    fn parse_logic(&self, cursor: &mut GenomeCursor<'_>, size: usize) -> Gate {
        let (inputs, outputs) = self.parse_io(cursor, 0, size);
        let table: Vec<u32> = (0..1usize << inputs.len())
            .map(|_| cursor.next_value())
            .collect();
        Gate::logic(inputs, outputs, table)
    }

    fn parse_probabilistic(&self, cursor: &mut GenomeCursor<'_>, size: usize) -> Gate {
        let (inputs, outputs) = self.parse_io(cursor, 0, size);
        let n_weights = (1usize << inputs.len()) << outputs.len();
        let weights: Vec<f64> = (0..n_weights).map(|_| cursor.next_value() as f64).collect();
        Gate::probabilistic(inputs, outputs, weights)
    }

    fn parse_adaptive(&self, cursor: &mut GenomeCursor<'_>, size: usize) -> Gate {
        let (inputs, outputs) = self.parse_io(cursor, FEEDBACK_INPUTS, size);
        let h = cursor.next_modnorm(self.history.0, self.history.1 + 1);
        let steps = self.weight_steps;
        let mut weight = || (cursor.next_value() % steps) as f64 / steps as f64;
        let positive: Vec<f64> = (0..h).map(|_| weight()).collect();
        let negative: Vec<f64> = (0..h).map(|_| weight()).collect();
        let n_weights = (1usize << inputs.len()) << outputs.len();
        let weights: Vec<f64> = (0..n_weights).map(|_| cursor.next_value() as f64).collect();
        Gate::adaptive(inputs, outputs, weights, positive, negative, self.feedback)
    }
}
