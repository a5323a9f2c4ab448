// src/gate/tests.rs

use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const TOLERANCE: f64 = 1e-9;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn assert_rows_normalized(m: &ProbabilityMatrix) {
    for r in 0..m.rows() {
        let sum: f64 = m.row(r).iter().sum();
        assert!((sum - 1.0).abs() < TOLERANCE, "row {} sums to {}", r, sum);
        assert!(m.row(r).iter().all(|&p| p >= 0.0));
    }
}

// --- Gate types ---

#[test]
fn codons_map_to_gate_types() {
    assert_eq!(GateType::from_codon(42), Some(GateType::Logic));
    assert_eq!(GateType::from_codon(43), Some(GateType::Probabilistic));
    assert_eq!(GateType::from_codon(44), Some(GateType::Adaptive));
    assert_eq!(GateType::from_codon(45), None);
    assert_eq!(GateType::from_codon(0), None);
    for t in GateType::ALL {
        assert_eq!(GateType::from_codon(t.codon()), Some(t));
    }
}

#[test]
fn gate_types_from_names_is_case_insensitive() {
    assert_eq!(GateTypes::from_names("Logic,ADAPTIVE"), GateTypes::LOGIC | GateTypes::ADAPTIVE);
    assert_eq!(GateTypes::from_names("probabilistic"), GateTypes::PROBABILISTIC);
    assert_eq!(GateTypes::from_names(""), GateTypes::empty());
    assert_eq!(GateTypes::from_names("logic probabilistic adaptive"), GateTypes::all());
    assert_eq!(GateTypes::default(), GateTypes::all());
}

#[test]
fn gate_types_lists_enabled_in_codon_order() {
    let set = GateTypes::ADAPTIVE | GateTypes::LOGIC;
    assert_eq!(set.types(), vec![GateType::Logic, GateType::Adaptive]);
    assert!(set.enables(GateType::Adaptive));
    assert!(!set.enables(GateType::Probabilistic));
}

// --- Logic ---

#[test]
fn logic_gate_looks_up_table() {
    let mut g = Gate::logic(vec![0, 1], vec![2], vec![0, 1, 1, 0]);
    let mut r = rng();
    assert_eq!(g.gate_type(), GateType::Logic);
    assert_eq!(g.fire(0, &mut r), 0);
    assert_eq!(g.fire(1, &mut r), 1);
    assert_eq!(g.fire(2, &mut r), 1);
    assert_eq!(g.fire(3, &mut r), 0);
}

#[test]
fn logic_gate_is_deterministic() {
    let mut g = Gate::logic(vec![0, 1, 2], vec![3, 4], vec![3, 1, 2, 0, 1, 1, 2, 3]);
    let mut r = rng();
    let first: Vec<usize> = (0..8).map(|x| g.fire(x, &mut r)).collect();
    for _ in 0..20 {
        let again: Vec<usize> = (0..8).map(|x| g.fire(x, &mut r)).collect();
        assert_eq!(first, again);
    }
}

#[test]
fn logic_table_is_masked_and_padded() {
    let g = LogicGate::new(2, 1, vec![0xFF, 0x02]);
    assert_eq!(g.table(), &[1, 0, 0, 0]);

    let g = LogicGate::new(1, 4, vec![5, 6, 7, 8]);
    assert_eq!(g.table(), &[5, 6]);
}

#[test]
fn logic_gate_ignores_high_input_bits() {
    let mut g = Gate::logic(vec![0], vec![1], vec![0, 1]);
    let mut r = rng();
    assert_eq!(g.fire(0b110, &mut r), 0);
    assert_eq!(g.fire(0b111, &mut r), 1);
}

#[test]
fn zero_fan_logic_gate_is_constant() {
    let mut g = Gate::logic(vec![], vec![], vec![9]);
    let mut r = rng();
    assert_eq!(g.fire(0, &mut r), 0);
    assert_eq!(g.fire(usize::MAX, &mut r), 0);

    let mut g = Gate::logic(vec![], vec![3], vec![1]);
    assert_eq!(g.fire(12345, &mut r), 1);
}

#[test]
fn oversized_fan_is_truncated() {
    let g = Gate::logic((0..20).collect(), (0..20).collect(), vec![]);
    assert_eq!(g.inputs().len(), MAX_FAN);
    assert_eq!(g.outputs().len(), MAX_FAN);
}

// --- Probabilistic ---

#[test]
fn normalize_row_handles_degenerate_rows() {
    let mut row = [0.0; 4];
    normalize_row(&mut row);
    assert_eq!(row, [0.25; 4]);

    let mut row = [255.0; 4];
    normalize_row(&mut row);
    assert_eq!(row, [0.25; 4]);

    let mut row = [1.0, f64::NAN, -3.0, 3.0];
    normalize_row(&mut row);
    assert_eq!(row, [0.25, 0.0, 0.0, 0.75]);
}

#[test]
fn probability_rows_sum_to_one() {
    let weights = (0..64).map(|i| ((i * 37) % 256) as f64);
    let m = ProbabilityMatrix::from_weights(4, 16, weights);
    assert_rows_normalized(&m);

    let zeros = ProbabilityMatrix::from_weights(16, 16, std::iter::repeat(0.0));
    assert_rows_normalized(&zeros);

    let max = ProbabilityMatrix::from_weights(16, 16, std::iter::repeat(255.0));
    assert_rows_normalized(&max);
    assert!((max.get(3, 5) - 1.0 / 16.0).abs() < TOLERANCE);
}

#[test]
fn short_weight_stream_pads_with_uniform_rows() {
    let m = ProbabilityMatrix::from_weights(2, 2, vec![1.0, 3.0]);
    assert_eq!(m.row(0), &[0.25, 0.75]);
    assert_eq!(m.row(1), &[0.5, 0.5]);
}

#[test]
fn sampling_a_certain_row_is_deterministic() {
    // Row 1 puts all mass on column 2.
    let mut g =
        Gate::probabilistic(vec![0], vec![1, 2], vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 5.0, 0.0]);
    let mut r = rng();
    for _ in 0..100 {
        assert_eq!(g.fire(1, &mut r), 2);
    }
}

#[test]
fn sampling_follows_row_distribution() {
    let m = ProbabilityMatrix::from_weights(1, 2, vec![1.0, 3.0]);
    let mut r = rng();
    let n = 20_000;
    let ones = (0..n).filter(|_| m.sample(0, &mut r) == 1).count();
    let freq = ones as f64 / n as f64;
    assert!((freq - 0.75).abs() < 0.02, "observed frequency {}", freq);
}

#[test]
fn probabilistic_sampling_is_reproducible_with_seed() {
    let mut a = Gate::probabilistic(vec![0, 1], vec![2, 3], (0..16).map(|i| i as f64));
    let mut b = a.clone();
    let mut ra = StdRng::seed_from_u64(99);
    let mut rb = StdRng::seed_from_u64(99);
    for x in 0..200 {
        assert_eq!(a.fire(x % 4, &mut ra), b.fire(x % 4, &mut rb));
    }
}

// --- Adaptive ---

fn adaptive(policy: FeedbackPolicy, positive: Vec<f64>, negative: Vec<f64>) -> AdaptiveGate {
    // Positive, negative and one data input; one output: 8 uniform rows of 2.
    AdaptiveGate::new(3, 1, vec![1.0; 16], positive, negative, policy)
}

#[test]
fn default_policy_adjusts_only_the_fired_entry() {
    assert_eq!(FeedbackPolicy::default(), FeedbackPolicy::RowBucket);
}

#[test_log::test]
fn positive_feedback_never_lowers_the_fired_entry() {
    for policy in [FeedbackPolicy::default(), FeedbackPolicy::Recency] {
        for seed in 0..20 {
            let mut g = adaptive(policy, vec![0.0, 1.0], vec![0.0, 0.0]);
            let mut r = StdRng::seed_from_u64(seed);
            for step in 0..10 {
                let before = g.matrix().clone();
                // Row 1: positive feedback bit set, data bit clear.
                let y = g.fire(0b001, &mut r);
                let (p0, p1) = (before.get(1, y), g.probability(1, y));
                assert!(
                    p1 >= p0 - TOLERANCE,
                    "{:?} seed {} step {}: p(1, {}) {} -> {}",
                    policy,
                    seed,
                    step,
                    y,
                    p0,
                    p1
                );
                assert_rows_normalized(g.matrix());
            }
        }
    }
}

#[test]
fn repeated_positive_reinforcement_converges() {
    let mut g = adaptive(FeedbackPolicy::default(), vec![0.1, 0.05], vec![0.1, 0.05]);
    let mut last = g.probability(1, 0);
    for _ in 0..50 {
        g.reinforce(1, 0, 0, true, false);
        let p = g.probability(1, 0);
        assert!(p >= last - TOLERANCE, "{} dropped below {}", p, last);
        assert_rows_normalized(g.matrix());
        last = p;
    }
    assert!(last > 0.9);
}

#[test]
fn negative_reinforcement_clamps_at_zero() {
    let mut g = adaptive(FeedbackPolicy::default(), vec![0.0], vec![0.9]);
    for _ in 0..10 {
        g.reinforce(0, 1, 0, false, true);
        assert_rows_normalized(g.matrix());
    }
    assert_eq!(g.probability(0, 1), 0.0);
    assert!((g.probability(0, 0) - 1.0).abs() < TOLERANCE);
}

#[test]
fn reinforce_ignores_out_of_range_arguments() {
    let mut g = adaptive(FeedbackPolicy::default(), vec![0.5], vec![0.5]);
    let before = g.matrix().clone();
    g.reinforce(8, 0, 0, true, false);
    g.reinforce(0, 2, 0, true, false);
    g.reinforce(0, 0, 1, true, false);
    assert_eq!(g.matrix(), &before);
}

#[test]
fn rows_are_indexed_by_the_full_input_value() {
    let g = adaptive(FeedbackPolicy::default(), vec![0.5], vec![0.5]);
    assert_eq!(g.matrix().rows(), 8);
    assert_eq!(g.matrix().cols(), 2);

    // Row 5 (positive feedback, data bit set) always emits 1.
    let mut weights = vec![1.0; 16];
    weights[10] = 0.0;
    let mut g = AdaptiveGate::new(3, 1, weights, vec![0.0], vec![0.0], FeedbackPolicy::default());
    let mut r = rng();
    for _ in 0..20 {
        assert_eq!(g.fire(0b101, &mut r), 1);
    }
}

#[test]
fn feedback_bits_select_reinforcement() {
    let mut g = adaptive(FeedbackPolicy::default(), vec![0.2], vec![0.2]);
    let mut r = rng();
    for _ in 0..30 {
        let y = g.fire(0b001, &mut r);
        assert!(y < 2);
        assert_rows_normalized(g.matrix());
    }
    // Rows fired without feedback bits were never addressed.
    assert_eq!(g.matrix().row(0), &[0.5, 0.5]);
    assert_eq!(g.matrix().row(4), &[0.5, 0.5]);
    // Row 1 has drifted away from uniform towards whatever it kept choosing.
    assert!(g.matrix().row(1)[0] != 0.5);
}

#[test]
fn firing_without_feedback_leaves_matrix_alone() {
    let mut g = adaptive(FeedbackPolicy::Recency, vec![0.3, 0.3], vec![0.3, 0.3]);
    let before = g.matrix().clone();
    let mut r = rng();
    for x in [0b000, 0b100, 0b000, 0b100] {
        g.fire(x, &mut r);
    }
    assert_eq!(g.matrix(), &before);
    assert_eq!(g.history().count(), 2);
}

#[test]
fn history_keeps_most_recent_first() {
    // Every row always emits column 0.
    let weights: Vec<f64> = (0..16).map(|i| if i % 2 == 0 { 1.0 } else { 0.0 }).collect();
    let mut g = AdaptiveGate::new(3, 1, weights, vec![0.0; 3], vec![0.0; 3], FeedbackPolicy::Recency);
    let mut r = rng();
    g.fire(0b000, &mut r);
    g.fire(0b100, &mut r);
    let rows: Vec<usize> = g.history().map(|&(row, _)| row).collect();
    assert_eq!(rows, vec![4, 0]);
    assert!(g.history().all(|&(_, y)| y == 0));
}

#[test]
fn recency_policy_rewards_older_firings_with_later_buckets() {
    // Row 0 uniform, row 1 always emits 1.
    let mut weights = vec![1.0; 16];
    weights[2] = 0.0;
    let mut g = AdaptiveGate::new(3, 1, weights, vec![0.0, 0.5], vec![0.0, 0.0], FeedbackPolicy::Recency);
    let mut r = rng();
    let y0 = g.fire(0b000, &mut r); // row 0, no feedback
    let y1 = g.fire(0b001, &mut r); // row 1, positive feedback
    assert_eq!(y1, 1);
    // Bucket 0 (this firing) adds 0; bucket 1 (the row 0 firing) adds 0.5.
    assert_eq!(g.matrix().row(1), &[0.0, 1.0]);
    let row0 = g.matrix().row(0);
    assert!((row0[y0] - 2.0 / 3.0).abs() < TOLERANCE);
    assert!((row0[1 - y0] - 1.0 / 3.0).abs() < TOLERANCE);
}

#[test]
fn row_bucket_policy_only_touches_current_firing() {
    let mut g = adaptive(FeedbackPolicy::RowBucket, vec![0.0, 1.0], vec![0.0, 0.0]);
    let mut r = rng();
    g.fire(0b000, &mut r);
    // Row 1 -> bucket 1 % 2 = 1, which adds 1.0 to the chosen entry.
    let y = g.fire(0b001, &mut r);
    assert!((g.matrix().row(1)[y] - 0.75).abs() < TOLERANCE);
    assert_eq!(g.matrix().row(0), &[0.5, 0.5]);
}

#[test]
fn zero_history_disables_adaptation() {
    let mut g = adaptive(FeedbackPolicy::default(), vec![], vec![0.4]);
    assert_eq!(g.history_len(), 0);
    assert!(g.negative().is_empty());
    let before = g.matrix().clone();
    let mut r = rng();
    for _ in 0..10 {
        g.fire(0b011, &mut r);
    }
    assert_eq!(g.matrix(), &before);
}

#[test]
fn reset_restores_parsed_matrix() {
    let mut gate = Gate::adaptive(
        vec![0, 1, 2],
        vec![3],
        vec![1.0; 16],
        vec![0.5],
        vec![0.5],
        FeedbackPolicy::default(),
    );
    let pristine = gate.clone();
    let mut r = rng();
    for _ in 0..10 {
        gate.fire(0b001, &mut r);
    }
    assert_ne!(gate, pristine);
    gate.reset();
    assert_eq!(gate, pristine);
}

#[test]
fn adaptive_gate_without_feedback_cells_does_not_panic() {
    let mut g = Gate::adaptive(vec![0], vec![], vec![], vec![0.5], vec![0.5], FeedbackPolicy::RowBucket);
    let mut r = rng();
    for x in 0..8 {
        assert_eq!(g.fire(x, &mut r), 0);
    }
}

#[test]
fn payload_constructors_clamp_oversized_fans() {
    let logic = LogicGate::new(64, 70, vec![3, 2, 1]);
    assert_eq!(logic.table().len(), 1 << MAX_FAN);
    assert_eq!(&logic.table()[..3], &[3, 2, 1]);

    let prob = ProbabilisticGate::new(100, 65, std::iter::empty());
    assert_eq!(prob.matrix().rows(), 1 << MAX_FAN);
    assert_eq!(prob.matrix().cols(), 1 << MAX_FAN);

    let adaptive = AdaptiveGate::new(80, 1, std::iter::empty(), vec![], vec![], FeedbackPolicy::default());
    assert_eq!(adaptive.matrix().rows(), 1 << (MAX_FAN + FEEDBACK_INPUTS));
}

// --- Index bookkeeping ---

#[test]
fn wrap_indices_brings_gate_into_range() {
    let mut g = Gate::logic(vec![5, 1], vec![9], vec![0, 1, 1, 0]);
    assert!(!g.fits(4));
    g.wrap_indices(4);
    assert!(g.fits(4));
    assert_eq!(g.inputs(), &[1, 1]);
    assert_eq!(g.outputs(), &[1]);
}
