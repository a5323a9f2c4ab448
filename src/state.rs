// src/state.rs

//! Double-buffered binary state vector.
//!
//! Cells `[0, n_inputs)` are driven by the caller, `[n_inputs, n_inputs +
//! n_outputs)` are outputs and the remainder are hidden. During a step all
//! reads come from the current buffer while gates OR their bits into the
//! next buffer; [`StateVector::swap`] publishes the next buffer.
//!
//! Output and hidden cells only hold what gates wrote during the last step.
//! That value feeds the following step, which is the network's memory.

use std::ops::Range;

/// A value usable as a network input. Only the lowest bit is significant.
pub trait Signal {
    fn low_bit(&self) -> u8;
}

impl Signal for bool {
    #[inline]
    fn low_bit(&self) -> u8 {
        *self as u8
    }
}

macro_rules! impl_signal_for_int {
    ($($t:ty),*) => {
        $(
            impl Signal for $t {
                #[inline]
                fn low_bit(&self) -> u8 {
                    (*self & 1) as u8
                }
            }
        )*
    };
}

impl_signal_for_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl<T: Signal + ?Sized> Signal for &T {
    #[inline]
    fn low_bit(&self) -> u8 {
        (**self).low_bit()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateVector {
    n_inputs: usize,
    n_outputs: usize,
    n_hidden: usize,
    current: Vec<u8>,
    next: Vec<u8>,
}

impl StateVector {
    pub fn new(n_inputs: usize, n_outputs: usize, n_hidden: usize) -> Self {
        let len = n_inputs + n_outputs + n_hidden;
        StateVector {
            n_inputs,
            n_outputs,
            n_hidden,
            current: vec![0; len],
            next: vec![0; len],
        }
    }

    /// Changes the dimensions and zeros both buffers.
    pub fn resize(&mut self, n_inputs: usize, n_outputs: usize, n_hidden: usize) {
        *self = StateVector::new(n_inputs, n_outputs, n_hidden);
    }

    /// Zeros both buffers.
    pub fn clear(&mut self) {
        self.current.fill(0);
        self.next.fill(0);
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    pub fn n_outputs(&self) -> usize {
        self.n_outputs
    }

    pub fn n_hidden(&self) -> usize {
        self.n_hidden
    }

    pub fn input_range(&self) -> Range<usize> {
        0..self.n_inputs
    }

    pub fn output_range(&self) -> Range<usize> {
        self.n_inputs..self.n_inputs + self.n_outputs
    }

    pub fn hidden_range(&self) -> Range<usize> {
        self.n_inputs + self.n_outputs..self.len()
    }

    /// The buffer gates read from during a step.
    pub fn current(&self) -> &[u8] {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut [u8] {
        &mut self.current
    }

    /// The buffer being accumulated for the following step.
    pub fn next(&self) -> &[u8] {
        &self.next
    }

    /// Reads the low bit of cell `i` of the current buffer; out-of-range cells read 0.
    #[inline]
    pub fn bit(&self, i: usize) -> u8 {
        self.current.get(i).map_or(0, |c| c & 1)
    }

    /// Copies the low bits of `inputs` into the input cells of the current
    /// buffer. Missing values read as 0, extra values are ignored.
    pub fn load_inputs<I>(&mut self, inputs: I)
    where
        I: IntoIterator,
        I::Item: Signal,
    {
        let mut it = inputs.into_iter();
        for cell in &mut self.current[..self.n_inputs] {
            *cell = it.next().map_or(0, |v| v.low_bit());
        }
    }

    /// ORs `bit` into cell `i` of the next buffer. Out-of-range cells are ignored.
    #[inline]
    pub fn accumulate(&mut self, i: usize, bit: u8) {
        if let Some(cell) = self.next.get_mut(i) {
            *cell |= bit & 1;
        }
    }

    /// Publishes the next buffer as current and zeros the new next buffer.
    /// Input cells keep their caller-supplied values; gate writes to them
    /// are discarded.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        let n = self.n_inputs;
        self.current[..n].copy_from_slice(&self.next[..n]);
        self.next.fill(0);
    }
}
