//! Soft-satisfaction scores for boolean sub-expressions.
//!
//! A score in [0,1] estimates how close a term is to being true under
//! the current model: 1 means satisfied, values below 1 rank candidate
//! moves. Scores are cached per signed id (both polarities).
use fxhash::FxHashMap;
use crate::base::BvBase;
use crate::bv::BV;
use crate::nid::NID;
use crate::node::{Kind, Sort};
use super::PropSolver;

/// weight of the near-miss term (matches Z3's c1)
pub const SCORE_CFACT: f64 = 0.5;

/// number of differing bits
pub fn hamming_distance(a: &BV, b: &BV) -> u32 {
  let mut x = a.xor(b);
  let ones = BV::ones(x.width());
  let mut res = 0;
  while !x.is_zero() {
    res += 1;
    let dec = x.add(&ones);  // x - 1
    x = x.and(&dec) }
  res }

/// Minimal number of bit flips in `a` (zeroing set bits, MSB first)
/// needed to make a < b. Not necessarily the true minimum; when b = 0
/// the distance to zero is used so the score cannot go negative.
pub fn min_flip(a: &BV, b: &BV) -> u32 {
  if b.is_zero() { return hamming_distance(a, b) }
  let mut tmp = a.clone();
  let mut res = 0;
  for j in (0..tmp.width()).rev() {
    if !tmp.get_bit(j) { continue }
    res += 1;
    tmp.set_bit(j, false);
    if tmp < *b { break }}
  res }

/// dual of min_flip: set clear bits (MSB first) until a >= b
pub fn min_flip_inv(a: &BV, b: &BV) -> u32 {
  let mut tmp = a.clone();
  let mut res = 0;
  for j in (0..tmp.width()).rev() {
    if tmp.get_bit(j) { continue }
    res += 1;
    tmp.set_bit(j, true);
    if tmp >= *b { break }}
  res }

impl PropSolver {

  /// Score of one boolean reference, assuming the scores of its
  /// relevant children are already cached.
  pub(crate) fn compute_score_node(&mut self, base: &BvBase, exp: NID) -> f64 {
    let real = exp.raw();
    debug_assert_eq!(base.width(real), 1);
    let node = base.node(real);
    let res = match node.kind {
      Kind::And => {
        let (e0, e1) = (node.e[0], node.e[1]);
        if exp.is_inv() {
          // or: best child wins
          let s0 = self.score[&(!e0).sid()];
          let s1 = self.score[&(!e1).sid()];
          if s0 > s1 { s0 } else { s1 }
        } else {
          let s0 = self.score[&e0.sid()];
          let s1 = self.score[&e1.sid()];
          let mean = (s0 + s1) / 2.0;
          // rounding fix: (0.999.. + 1.0)/2 must not report satisfied
          if mean == 1.0 && (s0 < 1.0 || s1 < 1.0) {
            if s0 < s1 { s0 } else { s1 }
          } else { mean }}}
      Kind::BvEq => {
        let (e0, e1) = (node.e[0], node.e[1]);
        let bv0 = self.model.value(base, &mut self.rng, e0);
        let bv1 = self.model.value(base, &mut self.rng, e1);
        if exp.is_inv() {
          if bv0 == bv1 { 0.0 } else { 1.0 }
        } else if bv0 == bv1 { 1.0 }
        else {
          SCORE_CFACT
            * (1.0 - hamming_distance(&bv0, &bv1) as f64 / bv0.width() as f64) }}
      Kind::Ult => {
        let (e0, e1) = (node.e[0], node.e[1]);
        let bv0 = self.model.value(base, &mut self.rng, e0);
        let bv1 = self.model.value(base, &mut self.rng, e1);
        if exp.is_inv() {
          if bv0 >= bv1 { 1.0 }
          else {
            SCORE_CFACT
              * (1.0 - min_flip_inv(&bv0, &bv1) as f64 / bv0.width() as f64) }
        } else if bv0 < bv1 { 1.0 }
        else {
          SCORE_CFACT
            * (1.0 - min_flip(&bv0, &bv1) as f64 / bv0.width() as f64) }}
      _ => {
        // atomic boolean: its assignment is the score
        let bv = self.model.value(base, &mut self.rng, exp);
        if bv.is_true() { 1.0 } else { 0.0 }}};
    trace!("score {} = {}", exp, res);
    debug_assert!((0.0..=1.0).contains(&res));
    res }

  /// (Re)compute the score cache for everything reachable from the
  /// registered roots. Children are scored before parents; both
  /// polarities of every 1-bit node get an entry.
  pub(crate) fn compute_scores(&mut self, base: &BvBase) {
    self.score.clear();
    let mut mark: FxHashMap<u32, u8> = FxHashMap::default();
    let mut stack: Vec<NID> = vec![];
    for &r in base.constraints().iter().chain(base.assumptions().iter()) {
      stack.push(base.chase(r).raw()) }
    while let Some(&cur) = stack.last() {
      let id = cur.id();
      match mark.get(&id).copied() {
        None => {
          mark.insert(id, 0);
          let node = base.node(cur);
          // don't descend into function territory: applies are scored
          // as atoms, lambda bodies only have values under an apply
          if !matches!(node.kind, Kind::Lambda | Kind::Apply | Kind::Uf | Kind::Args) {
            for &c in node.children() { stack.push(c.raw()) }}}
        Some(0) => {
          mark.insert(id, 1);
          stack.pop();
          if matches!(base.node(cur).sort, Sort::Bv(1)) {
            let s = self.compute_score_node(base, cur);
            self.score.insert(cur.sid(), s);
            let si = self.compute_score_node(base, !cur);
            self.score.insert((!cur).sid(), si); }}
        _ => { stack.pop(); }}}}

  #[cfg(test)]
  pub(crate) fn score_of(&self, n: NID) -> Option<f64> {
    self.score.get(&n.sid()).copied() }
}
