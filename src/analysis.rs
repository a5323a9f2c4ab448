// src/analysis.rs

//! Structural views of a translated network, for logging and inspection.

use crate::gate::{Gate, GateType};
use crate::network::MarkovNetwork;
use serde::Serialize;
use std::collections::BTreeSet;

/// Wiring of a single gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateSummary {
    pub kind: GateType,
    pub inputs: Vec<usize>,
    pub outputs: Vec<usize>,
}

impl From<&Gate> for GateSummary {
    fn from(gate: &Gate) -> Self {
        GateSummary {
            kind: gate.gate_type(),
            inputs: gate.inputs().to_vec(),
            outputs: gate.outputs().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub inputs: usize,
    pub outputs: usize,
    pub hidden: usize,
    pub gate_count: usize,
    pub logic_gates: usize,
    pub probabilistic_gates: usize,
    pub adaptive_gates: usize,
    pub gates: Vec<GateSummary>,
}

impl NetworkSummary {
    pub fn of(network: &MarkovNetwork) -> Self {
        let gates: Vec<GateSummary> = network.gates().iter().map(GateSummary::from).collect();
        let count = |t: GateType| gates.iter().filter(|g| g.kind == t).count();
        NetworkSummary {
            inputs: network.n_inputs(),
            outputs: network.n_outputs(),
            hidden: network.n_hidden(),
            gate_count: gates.len(),
            logic_gates: count(GateType::Logic),
            probabilistic_gates: count(GateType::Probabilistic),
            adaptive_gates: count(GateType::Adaptive),
            gates,
        }
    }
}

/// Cell-to-cell dependencies: `(a, b)` when some gate reads `a` and writes
/// `b`. Sorted, without duplicates.
pub fn edges(network: &MarkovNetwork) -> Vec<(usize, usize)> {
    network
        .gates()
        .iter()
        .flat_map(|g| {
            g.inputs()
                .iter()
                .flat_map(move |&a| g.outputs().iter().map(move |&b| (a, b)))
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Output cells written by at least one gate, in ascending order.
pub fn driven_outputs(network: &MarkovNetwork) -> Vec<usize> {
    let range = network.state().output_range();
    network
        .gates()
        .iter()
        .flat_map(|g| g.outputs().iter().copied())
        .filter(|i| range.contains(i))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
