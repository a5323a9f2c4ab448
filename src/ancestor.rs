// src/ancestor.rs

//! Random ancestor genomes.
//!
//! An ancestor is a genome of filler values with a number of genes written
//! at random positions: a start codon for an enabled gate type followed by
//! random body values. Genes may overwrite each other; the translator
//! tolerates whatever results.

use crate::config::AncestorConfig;
use crate::gate::GateTypes;
use crate::genome::{Genome, START_CODON_SUM};
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

/// Shortest gene: the two codon values.
const CODON_LEN: usize = 2;

/// Builds an ancestor genome from `config`, seeding genes only for the gate
/// types in `enabled`.
pub fn generate<R: Rng + ?Sized>(config: &AncestorConfig, enabled: GateTypes, rng: &mut R) -> Genome {
    let mut genome = Genome::filled(config.initial_size, config.filler);
    let types = enabled.types();
    if types.is_empty() {
        warn!("ancestor: no gate types enabled, genome holds filler only");
        return genome;
    }
    let len = genome.len();
    if len < CODON_LEN {
        warn!("ancestor: genome of length {} cannot hold a start codon", len);
        return genome;
    }

    let (size_lo, size_hi) = ordered(config.gene_min_size, config.gene_max_size);
    let (value_lo, value_hi) = ordered(config.value_min, config.value_max);
    for _ in 0..config.initial_gates {
        let csize = rng.gen_range(size_lo..=size_hi).clamp(CODON_LEN, len);
        let j = rng.gen_range(0..=len - csize);
        let Some(&gate) = types.choose(rng) else {
            break;
        };
        let codon = gate.codon();
        genome.set(j, codon);
        genome.set(j + 1, START_CODON_SUM as u32 - codon);
        for k in CODON_LEN..csize {
            genome.set(j + k, rng.gen_range(value_lo..=value_hi));
        }
        debug!("ancestor: {} gene of {} values at {}", gate, csize, j);
    }
    genome
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
