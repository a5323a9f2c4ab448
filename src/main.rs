// src/main.rs

//! Smoke run: builds an ancestor network from a config and drives it with
//! random inputs.
//!
//! Usage: `markov-net [config.json]`. Without a path the defaults are used.

use markov_net::analysis::{self, NetworkSummary};
use markov_net::{ancestor, Config, GateTypes, MarkovNetwork, Translator};

use anyhow::Context;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of random input vectors the network is driven with.
const SMOKE_ROUNDS: usize = 8;

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting markov-net...");

    // --- Configuration ---
    let config = match std::env::args_os().nth(1) {
        Some(path) => {
            let config = Config::load(&path)?;
            info!("Configuration loaded from {}", path.to_string_lossy());
            config
        }
        None => {
            info!("Configuration loaded (using default).");
            Config::default()
        }
    };
    config.validate().context("Invalid configuration")?;
    debug!("Configuration: {:?}", config);

    // --- Genome and Network ---
    let mut rng = StdRng::seed_from_u64(config.network.seed);
    let enabled = GateTypes::from_names(&config.translator.gate_types);
    if enabled.is_empty() {
        warn!(
            "gate_types '{}' names no gate type; the network will have no gates",
            config.translator.gate_types
        );
    }
    let genome = ancestor::generate(&config.ancestor, enabled, &mut rng);
    info!(
        "Ancestor genome: {} values, {} start codons",
        genome.len(),
        genome.count_start_codons()
    );

    let translator = Translator::from_config(&config.translator);
    let mut network = MarkovNetwork::from_config(&config.network);
    let added = translator.translate(&genome, &mut network);
    info!(
        "Network: {} inputs, {} outputs, {} hidden, {} gates",
        network.n_inputs(),
        network.n_outputs(),
        network.n_hidden(),
        added
    );

    // --- Run ---
    for round in 0..SMOKE_ROUNDS {
        let inputs: Vec<bool> = (0..network.n_inputs()).map(|_| rng.gen()).collect();
        network.update(&inputs, config.network.update_n);
        info!(
            "Round {}: inputs={:?} outputs={:?}",
            round,
            network.inputs(),
            network.outputs()
        );
    }

    let summary = NetworkSummary::of(&network);
    info!(
        "Summary: {} logic, {} probabilistic, {} adaptive gates; {} edges; driven outputs {:?}",
        summary.logic_gates,
        summary.probabilistic_gates,
        summary.adaptive_gates,
        analysis::edges(&network).len(),
        analysis::driven_outputs(&network)
    );
    debug!(
        "Summary JSON: {}",
        serde_json::to_string(&summary).context("Failed to serialize network summary")?
    );

    info!("markov-net finished.");
    Ok(())
}
