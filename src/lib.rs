// src/lib.rs

//! Markov networks: gate-based probabilistic state machines built from
//! circular integer genomes.
//!
//! A [`Genome`] is scanned by a [`Translator`] for start codons; each gene
//! becomes a logic, probabilistic or adaptive [`Gate`] of a
//! [`MarkovNetwork`]. The network is then driven with
//! [`MarkovNetwork::update`] and its output cells read back.

pub mod analysis;
pub mod ancestor;
pub mod config;
pub mod gate;
pub mod genome;
pub mod network;
pub mod state;
pub mod translate;

pub use config::Config;
pub use gate::{FeedbackPolicy, Gate, GateKind, GateType, GateTypes};
pub use genome::Genome;
pub use network::MarkovNetwork;
pub use state::{Signal, StateVector};
pub use translate::Translator;
