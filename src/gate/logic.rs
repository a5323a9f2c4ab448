// src/gate/logic.rs

use super::MAX_FAN;

/// Deterministic gate: the output is a literal truth-table lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicGate {
    table: Vec<u32>,
}

impl LogicGate {
    /// Table of `2^fan_in` entries, each masked to `fan_out` bits. Missing
    /// entries are 0 and surplus entries are dropped. Both fans are clamped
    /// to [`MAX_FAN`].
    pub fn new<I>(fan_in: usize, fan_out: usize, table: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let size = 1usize << fan_in.min(MAX_FAN);
        let mask = output_mask(fan_out.min(MAX_FAN));
        let mut table: Vec<u32> = table.into_iter().take(size).map(|v| v & mask).collect();
        table.resize(size, 0);
        LogicGate { table }
    }

    pub fn table(&self) -> &[u32] {
        &self.table
    }

    #[inline]
    pub fn fire(&self, x: usize) -> usize {
        self.table[x & (self.table.len() - 1)] as usize
    }
}

#[inline]
fn output_mask(fan_out: usize) -> u32 {
    if fan_out >= 32 {
        u32::MAX
    } else {
        (1u32 << fan_out) - 1
    }
}
