// src/config.rs

//! Configuration structures for building and running Markov networks.
//!
//! Every struct deserializes with `#[serde(default)]`, so a config file only
//! needs the fields it changes. Defaults match the usual parameterization:
//! four inputs/outputs per gate, histories of four, weights in 1024 steps
//! and every gate type enabled.

use crate::gate::FeedbackPolicy;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Network dimensions and per-evaluation settings.
    pub network: NetworkConfig,
    /// Genome translator settings.
    pub translator: TranslatorConfig,
    /// Ancestor genome settings.
    pub ancestor: AncestorConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    /// Reads and parses a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn to_json_string(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Rejects settings that cannot produce a usable network or genome.
    pub fn validate(&self) -> anyhow::Result<()> {
        let net = &self.network;
        if net.inputs + net.outputs + net.hidden == 0 {
            bail!("network must have at least one state (inputs + outputs + hidden > 0)");
        }

        let tr = &self.translator;
        tr.fan_in.check("translator.fan_in")?;
        tr.fan_out.check("translator.fan_out")?;
        tr.history.check("translator.history")?;
        if tr.weight_steps == 0 {
            bail!("translator.weight_steps must be non-zero");
        }

        let anc = &self.ancestor;
        if anc.gene_min_size < 2 {
            bail!(
                "ancestor.gene_min_size must be at least 2 (got {})",
                anc.gene_min_size
            );
        }
        if anc.gene_min_size > anc.gene_max_size {
            bail!(
                "ancestor.gene_min_size ({}) exceeds gene_max_size ({})",
                anc.gene_min_size,
                anc.gene_max_size
            );
        }
        if anc.value_min > anc.value_max {
            bail!(
                "ancestor.value_min ({}) exceeds value_max ({})",
                anc.value_min,
                anc.value_max
            );
        }
        if anc.initial_gates > 0 && anc.initial_size < 2 {
            bail!("ancestor.initial_size must hold at least one start codon");
        }
        Ok(())
    }
}

// --- Network Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub inputs: usize,
    pub outputs: usize,
    pub hidden: usize,
    /// Update steps per evaluation.
    pub update_n: usize,
    /// Seed for the network's random number generator.
    pub seed: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            inputs: 8,
            outputs: 4,
            hidden: 8,
            update_n: 1,
            seed: 0,
        }
    }
}

// --- Translator Configuration ---

/// Inclusive `[lower, upper]` range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bounds {
    pub lower: usize,
    pub upper: usize,
}

impl Bounds {
    pub const fn new(lower: usize, upper: usize) -> Self {
        Bounds { lower, upper }
    }

    fn check(&self, name: &str) -> anyhow::Result<()> {
        if self.lower > self.upper {
            bail!(
                "{}: lower bound {} exceeds upper bound {}",
                name,
                self.lower,
                self.upper
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    pub fan_in: Bounds,
    pub fan_out: Bounds,
    /// History length of adaptive gates.
    pub history: Bounds,
    /// Steps adjustment weights are discretized into.
    pub weight_steps: u32,
    /// Gate types to build, e.g. `"logic,probabilistic"`. Case-insensitive.
    pub gate_types: String,
    pub feedback: FeedbackPolicy,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            fan_in: Bounds::new(4, 4),
            fan_out: Bounds::new(4, 4),
            history: Bounds::new(4, 4),
            weight_steps: 1024,
            gate_types: "logic,probabilistic,adaptive".to_string(),
            feedback: FeedbackPolicy::default(),
        }
    }
}

// --- Ancestor Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AncestorConfig {
    /// Genome length.
    pub initial_size: usize,
    /// Number of genes seeded with a start codon.
    pub initial_gates: usize,
    /// Gene length including the codon.
    pub gene_min_size: usize,
    pub gene_max_size: usize,
    /// Inclusive range of the random gene body values.
    pub value_min: u32,
    pub value_max: u32,
    /// Value the genome is filled with before genes are written.
    pub filler: u32,
}

impl Default for AncestorConfig {
    fn default() -> Self {
        AncestorConfig {
            initial_size: 5000,
            initial_gates: 50,
            gene_min_size: 16,
            gene_max_size: 512,
            value_min: 0,
            value_max: 255,
            filler: 127,
        }
    }
}
