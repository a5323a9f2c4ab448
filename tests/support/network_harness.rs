//! Test harness for driving translated networks.
//!
//! Wraps a network together with the genome it came from and provides
//! truth-table collection plus the structural checks every translated network
//! must pass.

use markov_net::gate::GateKind;
use markov_net::{Genome, MarkovNetwork, Translator};

pub struct NetworkHarness {
    #[allow(dead_code)]
    pub genome: Genome,
    pub network: MarkovNetwork,
}

impl NetworkHarness {
    /// Translate `genome` into a network of the given shape.
    pub fn build(
        translator: &Translator,
        genome: Genome,
        n_inputs: usize,
        n_outputs: usize,
        n_hidden: usize,
    ) -> Self {
        let network = translator.build(&genome, n_inputs, n_outputs, n_hidden, 0);
        Self { genome, network }
    }

    /// Wrap a hand-built network.
    #[allow(dead_code)]
    pub fn from_network(network: MarkovNetwork) -> Self {
        Self {
            genome: Genome::default(),
            network,
        }
    }

    /// Run one update per input combination (input bit `j` from bit `j` of
    /// the combination index) and collect the outputs.
    #[allow(dead_code)]
    pub fn truth_table(&mut self) -> Vec<Vec<u8>> {
        let n = self.network.n_inputs();
        (0..1usize << n)
            .map(|x| {
                let inputs: Vec<usize> = (0..n).map(|j| (x >> j) & 1).collect();
                self.network.update(&inputs, 1);
                self.network.outputs().to_vec()
            })
            .collect()
    }

    /// Panics unless every gate is in range and every matrix row-stochastic.
    pub fn assert_well_formed(&self) {
        let size = self.network.state_size();
        for (i, gate) in self.network.gates().iter().enumerate() {
            assert!(gate.fits(size), "gate {} out of range: {:?}", i, gate);
            let matrix = match gate.kind() {
                GateKind::Logic(_) => continue,
                GateKind::Probabilistic(g) => g.matrix(),
                GateKind::Adaptive(g) => g.matrix(),
            };
            for r in 0..matrix.rows() {
                let sum: f64 = matrix.row(r).iter().sum();
                assert!((sum - 1.0).abs() < 1e-9, "gate {} row {} sums to {}", i, r, sum);
            }
        }
    }
}
