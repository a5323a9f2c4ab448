// src/network.rs

//! The Markov network: a state vector, an ordered list of gates and the
//! random number generator the gates draw from.
//!
//! One update step evaluates every gate once against the current buffer,
//! ORs gate outputs into the next buffer, then swaps. Gate order therefore
//! never changes what a gate reads; colliding writes merge with OR.

use crate::config::NetworkConfig;
use crate::gate::Gate;
use crate::state::{Signal, StateVector};
use log::{trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone)]
pub struct MarkovNetwork {
    state: StateVector,
    gates: Vec<Gate>,
    rng: StdRng,
    seed: u64,
}

impl MarkovNetwork {
    pub fn new(n_inputs: usize, n_outputs: usize, n_hidden: usize, seed: u64) -> Self {
        MarkovNetwork {
            state: StateVector::new(n_inputs, n_outputs, n_hidden),
            gates: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        MarkovNetwork::new(config.inputs, config.outputs, config.hidden, config.seed)
    }

    /// Changes the dimensions, zeros the state and drops all gates, since
    /// their indices refer to the old layout.
    pub fn resize(&mut self, n_inputs: usize, n_outputs: usize, n_hidden: usize) {
        self.state.resize(n_inputs, n_outputs, n_hidden);
        self.gates.clear();
    }

    /// Zeros every state cell. Gates are kept.
    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Reseeds the random number generator.
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Restores adaptive gates to their parsed matrices.
    pub fn reset_gates(&mut self) {
        self.gates.iter_mut().for_each(Gate::reset);
    }

    /// Drops all gates and zeros the state, ready for a new genome.
    pub fn clear_gates(&mut self) {
        self.gates.clear();
        self.state.clear();
    }

    /// Appends a gate. Out-of-range indices are wrapped into the state
    /// vector; on a network without states the gate is dropped.
    pub fn add_gate(&mut self, mut gate: Gate) {
        let size = self.state.len();
        if size == 0 {
            warn!("dropping {} gate: network has no states", gate.gate_type());
            return;
        }
        if !gate.fits(size) {
            gate.wrap_indices(size);
        }
        self.gates.push(gate);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn gate(&self, i: usize) -> Option<&Gate> {
        self.gates.get(i)
    }

    pub fn gate_mut(&mut self, i: usize) -> Option<&mut Gate> {
        self.gates.get_mut(i)
    }

    pub fn state_size(&self) -> usize {
        self.state.len()
    }

    pub fn n_inputs(&self) -> usize {
        self.state.n_inputs()
    }

    pub fn n_outputs(&self) -> usize {
        self.state.n_outputs()
    }

    pub fn n_hidden(&self) -> usize {
        self.state.n_hidden()
    }

    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StateVector {
        &mut self.state
    }

    /// Low bit of cell `i` of the current buffer.
    pub fn cell(&self, i: usize) -> u8 {
        self.state.bit(i)
    }

    pub fn inputs(&self) -> &[u8] {
        &self.state.current()[self.state.input_range()]
    }

    pub fn outputs(&self) -> &[u8] {
        &self.state.current()[self.state.output_range()]
    }

    pub fn hidden(&self) -> &[u8] {
        &self.state.current()[self.state.hidden_range()]
    }

    /// Sets input cell `i` of the current buffer; ignored if `i` is not an input.
    pub fn set_input<S: Signal>(&mut self, i: usize, value: S) {
        if i < self.state.n_inputs() {
            self.state.current_mut()[i] = value.low_bit();
        }
    }

    /// Runs `n` steps with `inputs` driving the input cells. The first
    /// `n_inputs` values are used (low bit only); missing ones read as 0.
    pub fn update<I>(&mut self, inputs: I, n: usize)
    where
        I: IntoIterator,
        I::Item: Signal,
    {
        self.state.load_inputs(inputs);
        self.update_in_place(n);
    }

    /// Runs `n` steps using the input cells already in the current buffer.
    pub fn update_in_place(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    fn step(&mut self) {
        let MarkovNetwork {
            state, gates, rng, ..
        } = self;
        for gate in gates.iter_mut() {
            let x = gate
                .inputs()
                .iter()
                .enumerate()
                .fold(0usize, |x, (j, &k)| x | (state.bit(k) as usize) << j);
            let y = gate.fire(x, rng);
            for (j, &k) in gate.outputs().iter().enumerate() {
                state.accumulate(k, ((y >> j) & 1) as u8);
            }
        }
        state.swap();
        trace!("step: outputs={:?}", &state.current()[state.output_range()]);
    }
}
