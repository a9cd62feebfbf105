//! Engine and printer options.
//!
//! Probabilities are expressed in per-mille (0..=1000), matching the
//! resolution of `rng::Rng::flip`.

/// path selection heuristic for the propagation descent
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PathSel { Random, Essential }

/// rendering of constants in SMT-LIB output
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NumFormat { Bin, Hex, Dec }

#[derive(Clone, Debug)]
pub struct Opts {
  /// RNG seed; runs are deterministic given the seed.
  pub seed: u64,
  /// rewrite level: 0 disables constant folding at hash-cons time.
  pub rewrite_level: u32,
  /// sort children of commutative operators by id before lookup.
  pub sort_exp: bool,
  /// path selection heuristic.
  pub prop_path_sel: PathSel,
  /// probability of choosing the inverse over the consistent sampler.
  pub prop_prob_use_inv_value: u32,
  /// probability of flipping one don't-care bit in inv_and/cons_and.
  pub prop_prob_and_flip: u32,
  /// probability of a single-bit flip (vs. fresh random) in inv_eq/cons_eq.
  pub prop_prob_eq_flip: u32,
  /// probability of flipping the condition when walking through an ite.
  pub prop_prob_flip_cond: u32,
  /// starting probability of flipping the condition when a branch is const.
  pub prop_prob_flip_cond_const: u32,
  /// after this many const-branch flips, nudge the probability above by +-100.
  pub prop_flip_cond_const_npathsel: u32,
  /// probability of slicing out of the current assignment in cons_concat.
  pub prop_prob_conc_flip: u32,
  /// probability of flipping a don't-care bit in inv_slice.
  pub prop_prob_slice_flip: u32,
  /// probability of keeping don't-care bits in inv_slice.
  pub prop_prob_slice_keep_dc: u32,
  /// treat conflicts on constant operands as non-recoverable.
  pub prop_no_move_on_conflict: bool,
  /// overall propagation-step budget; 0 means unbounded.
  pub nprops: u64,
  /// restart budget; 0 means unbounded.
  pub max_restarts: u64,
  /// constant rendering in the printer.
  pub output_number_format: NumFormat,
  /// renumber printed ids densely from 1.
  pub pretty_print: bool,
}

impl Default for Opts {
  fn default() -> Self {
    Opts {
      seed: 0,
      rewrite_level: 1,
      sort_exp: true,
      prop_path_sel: PathSel::Essential,
      prop_prob_use_inv_value: 990,
      prop_prob_and_flip: 0,
      prop_prob_eq_flip: 0,
      prop_prob_flip_cond: 100,
      prop_prob_flip_cond_const: 100,
      prop_flip_cond_const_npathsel: 500,
      prop_prob_conc_flip: 0,
      prop_prob_slice_flip: 0,
      prop_prob_slice_keep_dc: 500,
      prop_no_move_on_conflict: false,
      nprops: 0,
      max_restarts: 0,
      output_number_format: NumFormat::Bin,
      pretty_print: true }}}
