//! A propagation-based local-search solver.
//!
//! The engine keeps a total candidate model over the DAG and a set of
//! falsified roots. Each move picks a falsified root, walks down one
//! child per level (choosing the path and a target value for it via
//! inverse or consistent samplers), lands on an input variable, and
//! installs the new assignment by recomputing the changed cone of
//! influence. Restarts resample the whole model under a growing step
//! bound. The engine is incomplete: it answers `Sat` or gives up with
//! `Unknown` (`Unsat` only for constant-false roots).
use std::fmt;
use std::time::{Duration, Instant};
use fxhash::{FxHashMap, FxHashSet};
use crate::base::BvBase;
use crate::bv::BV;
use crate::model::BvModel;
use crate::nid::NID;
use crate::node::{Kind, Sort, eval_binary};
use crate::opt::{Opts, PathSel};
use crate::rng::Rng;

mod score;
mod inv;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status { Sat, Unsat, Unknown }

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Status::Sat => write!(f, "sat"),
      Status::Unsat => write!(f, "unsat"),
      Status::Unknown => write!(f, "unknown") }}}

#[derive(Default, Clone, Debug)]
pub struct Stats {
  pub moves: u64,
  pub props: u64,
  pub restarts: u64,
  pub updates: u64,
  pub move_prop_rec_conf: u64,
  pub move_prop_non_rec_conf: u64,
  pub inv_add: u64, pub inv_and: u64, pub inv_eq: u64, pub inv_ult: u64,
  pub inv_sll: u64, pub inv_srl: u64, pub inv_mul: u64, pub inv_udiv: u64,
  pub inv_urem: u64, pub inv_concat: u64, pub inv_slice: u64,
  pub cons_add: u64, pub cons_and: u64, pub cons_eq: u64, pub cons_ult: u64,
  pub cons_sll: u64, pub cons_srl: u64, pub cons_mul: u64, pub cons_udiv: u64,
  pub cons_urem: u64, pub cons_concat: u64, pub cons_slice: u64,
  pub time_update_cone: Duration,
  pub time_update_cone_reset: Duration,
  pub time_update_cone_model_gen: Duration,
  pub time_update_cone_compute_score: Duration }

impl Stats {
  pub fn report(&self) {
    info!("moves: {}  props: {}  restarts: {}", self.moves, self.props, self.restarts);
    info!("recoverable conflicts: {}  non-recoverable: {}",
          self.move_prop_rec_conf, self.move_prop_non_rec_conf);
    info!("cone updates: {} ({:?} total, {:?} reset, {:?} model, {:?} score)",
          self.updates, self.time_update_cone, self.time_update_cone_reset,
          self.time_update_cone_model_gen, self.time_update_cone_compute_score); }}

pub struct PropSolver {
  pub opts: Opts,
  pub stats: Stats,
  rng: Rng,
  model: BvModel,
  /// signed ids of currently falsified roots
  roots: FxHashSet<i64>,
  /// soft-satisfaction cache, keyed by signed id
  score: FxHashMap<i64, f64>,
  nflip_cond_const: u32,
  flip_cond_const_prob_delta: i32 }

impl PropSolver {

  pub fn new(base: &BvBase) -> Self {
    let opts = base.opts.clone();
    let rng = Rng::new(opts.seed);
    PropSolver {
      opts, rng,
      stats: Stats::default(),
      model: BvModel::new(),
      roots: FxHashSet::default(),
      score: FxHashMap::default(),
      nflip_cond_const: 0,
      flip_cond_const_prob_delta: 100 }}

  /// pre-seed or override a variable assignment (before calling sat)
  pub fn set_assignment(&mut self, n: NID, bv: BV) {
    self.model.set(n.id(), bv) }

  pub fn assignment(&self, n: NID) -> Option<&BV> { self.model.get(n) }

  pub fn num_falsified(&self) -> usize { self.roots.len() }

  // -- top level ---------------------------------------------------------

  /// per-restart step bound: 100 * (1 if i odd else 2^(i/2))
  fn step_bound(restarts: u64) -> u64 {
    if restarts % 2 == 1 { 100 }
    else { 100u64.saturating_mul(2u64.saturating_pow((restarts / 2).min(54) as u32)) }}

  /// Search for a satisfying assignment. `terminate` is polled between
  /// moves; a true return unwinds cleanly with `Unknown`.
  pub fn sat(&mut self, base: &BvBase, terminate: &mut dyn FnMut() -> bool) -> Status {
    for &r in base.constraints().iter().chain(base.assumptions().iter()) {
      let r = base.chase(r);
      if let Some(v) = base.const_val(r) {
        if v.is_false() {
          debug!("root {} is constant false", r);
          return Status::Unsat }}}
    self.generate_model(base, false);
    self.compute_scores(base);
    self.collect_roots(base);
    let mut nmoves = 0u64;
    loop {
      if terminate() { return Status::Unknown }
      if self.roots.is_empty() {
        self.stats.report();
        return Status::Sat }
      if self.opts.nprops > 0 && self.stats.props >= self.opts.nprops {
        return Status::Unknown }
      if nmoves >= Self::step_bound(self.stats.restarts) {
        self.stats.restarts += 1;
        debug!("restart {} (step bound {})",
               self.stats.restarts, Self::step_bound(self.stats.restarts));
        if self.opts.max_restarts > 0 && self.stats.restarts > self.opts.max_restarts {
          return Status::Unknown }
        self.generate_model(base, true);
        self.compute_scores(base);
        self.collect_roots(base);
        nmoves = 0;
        continue }
      let root = {
        let mut sids: Vec<i64> = self.roots.iter().copied().collect();
        sids.sort_unstable();
        let k = self.rng.pick(0, sids.len() as u32 - 1) as usize;
        let sid = sids[k];
        if sid < 0 { !NID::new((-sid) as u32) } else { NID::new(sid as u32) }};
      trace!("");
      trace!("*** move {} at root {}", self.stats.moves + 1, root);
      let (mv, props) = self.select_move_prop(base, root);
      self.stats.props += props;
      nmoves += 1;
      match mv {
        Some((input, ass)) => {
          trace!("    {} := {:?}", input, ass);
          self.update_cone(base, &[(input.id(), ass)]);
          self.stats.moves += 1 }
        None => {
          // no input found: non-recoverable conflict
          if self.opts.prop_no_move_on_conflict {
            nmoves = Self::step_bound(self.stats.restarts) }}}}}

  /// sample every unassigned variable; with `reset`, resample all of
  /// them. root cones are (re)computed afterwards.
  fn generate_model(&mut self, base: &BvBase, reset: bool) {
    if reset { self.model.clear() }
    for id in base.var_ids() {
      if !self.model.contains(id) {
        let w = base.width(NID::new(id));
        let v = BV::new_random(&mut self.rng, w);
        self.model.set(id, v) }}
    for &r in base.constraints().iter().chain(base.assumptions().iter()) {
      let r = base.chase(r);
      let _ = self.model.value(base, &mut self.rng, r); }}

  fn collect_roots(&mut self, base: &BvBase) {
    self.roots.clear();
    for &r in base.constraints().iter().chain(base.assumptions().iter()) {
      let r = base.chase(r);
      let v = self.model.value(base, &mut self.rng, r);
      if v.is_false() { self.roots.insert(r.sid()); }}}

  // -- cone of influence -------------------------------------------------

  /// roots bookkeeping for one changed boolean node: a falsified entry
  /// flips to satisfied (remove) or a satisfied one to falsified (add),
  /// in whichever polarity is registered.
  fn update_roots_table(&mut self, id: u32, bv: &BV) {
    let sid = id as i64;
    if self.roots.contains(&sid) { self.roots.remove(&sid); }
    else if self.roots.contains(&-sid) { self.roots.remove(&-sid); }
    else if bv.is_false() { self.roots.insert(sid); }
    else { self.roots.insert(-sid); }}

  fn child_val(&mut self, base: &BvBase, c: NID) -> BV {
    if let Some(v) = base.const_val(c) { v }
    else if let Some(v) = self.model.get(c) { v.clone() }
    else { self.model.value(base, &mut self.rng, c) }}

  /// Install new input assignments and repair the model, the roots set
  /// and the score cache over the cone of influence.
  pub fn update_cone(&mut self, base: &BvBase, exps: &[(u32, BV)]) {
    assert!(!exps.is_empty());
    let start = Instant::now();
    let mut delta = Instant::now();

    // discover the cone by walking parent lists up from the inputs
    let exp_ids: FxHashSet<u32> = exps.iter().map(|&(id, _)| id).collect();
    let mut stack: Vec<u32> = exp_ids.iter().copied().collect();
    let mut cache: FxHashSet<u32> = FxHashSet::default();
    let mut cone: Vec<u32> = vec![];
    while let Some(cur) = stack.pop() {
      if !cache.insert(cur) { continue }
      if !exp_ids.contains(&cur) { cone.push(cur) }
      self.stats.updates += 1;
      for &(p, _) in base.parents(NID::new(cur)) { stack.push(p) }}
    self.stats.time_update_cone_reset += delta.elapsed();

    // install the new input assignments
    for (id, ass) in exps {
      let n = NID::new(*id);
      debug_assert!(base.is_var(n));
      let changed = self.model.get(n) != Some(ass);
      if changed && (base.node(n).constraint || base.is_assumption(n) || base.is_assumption(!n)) {
        self.update_roots_table(*id, ass) }
      self.model.set(*id, ass.clone());
      if base.is_bool(n) && self.score.contains_key(&(*id as i64)) {
        let s = self.compute_score_node(base, n);
        self.score.insert(*id as i64, s);
        let si = self.compute_score_node(base, !n);
        self.score.insert(-(*id as i64), si); }}

    cone.sort_unstable();

    // recompute the model over the cone, children before parents
    delta = Instant::now();
    for &id in &cone {
      let n = NID::new(id);
      let node = base.node(n);
      if node.parameterized
        || matches!(node.kind,
                    Kind::Lambda | Kind::Args | Kind::Uf | Kind::Param
                    | Kind::FunEq | Kind::Proxy | Kind::BvVar | Kind::BvConst) {
        continue }
      let val = match node.kind {
        Kind::Apply =>
          self.model.apply_value(base, &mut self.rng, n, &FxHashMap::default()),
        Kind::Slice => {
          let (u, l) = node.slice_bounds();
          self.child_val(base, node.e[0]).slice(u, l) }
        Kind::Cond => {
          let c = self.child_val(base, node.e[0]);
          if c.is_true() { self.child_val(base, node.e[1]) }
          else { self.child_val(base, node.e[2]) }}
        kind => {
          let a = self.child_val(base, node.e[0]);
          let b = self.child_val(base, node.e[1]);
          eval_binary(kind, &a, &b) }};
      let changed = self.model.get(n) != Some(&val);
      if changed && (node.constraint || base.is_assumption(n) || base.is_assumption(!n)) {
        self.update_roots_table(id, &val) }
      self.model.set(id, val); }
    self.stats.time_update_cone_model_gen += delta.elapsed();

    // rescore the boolean part of the cone
    delta = Instant::now();
    for &id in &cone {
      let n = NID::new(id);
      if !matches!(base.node(n).sort, Sort::Bv(1)) { continue }
      if !self.score.contains_key(&(id as i64)) { continue }  // not under a root
      let s = self.compute_score_node(base, n);
      self.score.insert(id as i64, s);
      let si = self.compute_score_node(base, !n);
      self.score.insert(-(id as i64), si); }
    self.stats.time_update_cone_compute_score += delta.elapsed();
    self.stats.time_update_cone += start.elapsed(); }

  // -- path selection ----------------------------------------------------

  /// any constant child is excluded from path selection
  fn select_path_non_const(&self, base: &BvBase, exp: NID) -> i32 {
    let arity = base.arity(exp) as usize;
    for i in 0..arity {
      if base.is_const(base.child(exp, i)) {
        return if i == 1 { 0 } else { 1 }}}
    -1 }

  fn select_path_random(&mut self, base: &BvBase, exp: NID) -> i32 {
    self.rng.pick(0, base.arity(exp) as u32 - 1) as i32 }

  fn select_path_and(&mut self, base: &BvBase, exp: NID, bvand: &BV, bve: &[BV]) -> usize {
    let mut eidx = self.select_path_non_const(base, exp);
    if eidx == -1 {
      if self.opts.prop_path_sel == PathSel::Random {
        eidx = self.select_path_random(base, exp);
      } else if base.width(exp) == 1 {
        // choose the 0-branch if exactly one branch is 0
        for (i, v) in bve.iter().enumerate() {
          if v.is_zero() { eidx = if eidx == -1 { i as i32 } else { -1 }}}
      } else {
        // a child not covering a required bit must change
        for (i, v) in bve.iter().enumerate() {
          if &bvand.and(v) != bvand { eidx = if eidx == -1 { i as i32 } else { -1 }}}}
      if eidx == -1 { eidx = self.select_path_random(base, exp) }}
    eidx as usize }

  fn select_path_ult(&mut self, base: &BvBase, exp: NID, bvult: &BV, bve: &[BV]) -> usize {
    let mut eidx = self.select_path_non_const(base, exp);
    if eidx == -1 {
      if self.opts.prop_path_sel == PathSel::Essential && bvult.is_true() {
        // 1...1 < x and x < 0 are unsatisfiable for any x
        if bve[0].is_ones() { eidx = 0 }
        if bve[1].is_zero() { eidx = if eidx == -1 { 1 } else { -1 }}}
      if eidx == -1 { eidx = self.select_path_random(base, exp) }}
    eidx as usize }

  fn select_path_sll(&mut self, base: &BvBase, exp: NID, bvsll: &BV, bve: &[BV]) -> usize {
    let mut eidx = self.select_path_non_const(base, exp);
    if eidx == -1 {
      if self.opts.prop_path_sel == PathSel::Essential {
        let shift = bve[1].to_u64().min(bvsll.width() as u64) as u32;
        // the shift amount must match the zero LSBs of the output
        for i in 0..shift {
          if bvsll.get_bit(i) { return 1 }}
        // the kept bits must match the first operand
        for i in 0..bvsll.width() - shift {
          if bve[0].get_bit(i) != bvsll.get_bit(shift + i) {
            eidx = if eidx == -1 { 0 } else { -1 };
            break }}}
      if eidx == -1 { eidx = self.select_path_random(base, exp) }}
    eidx as usize }

  fn select_path_srl(&mut self, base: &BvBase, exp: NID, bvsrl: &BV, bve: &[BV]) -> usize {
    let mut eidx = self.select_path_non_const(base, exp);
    if eidx == -1 {
      if self.opts.prop_path_sel == PathSel::Essential {
        let w = bvsrl.width();
        let shift = bve[1].to_u64().min(w as u64) as u32;
        for i in 0..shift {
          if bvsrl.get_bit(w - 1 - i) { return 1 }}
        for i in 0..w - shift {
          if bve[0].get_bit(w - 1 - i) != bvsrl.get_bit(w - 1 - (shift + i)) {
            eidx = if eidx == -1 { 0 } else { -1 };
            break }}}
      if eidx == -1 { eidx = self.select_path_random(base, exp) }}
    eidx as usize }

  fn select_path_mul(&mut self, base: &BvBase, exp: NID, bvmul: &BV, bve: &[BV]) -> usize {
    let mut eidx = self.select_path_non_const(base, exp);
    if eidx == -1 {
      if self.opts.prop_path_sel == PathSel::Essential {
        let (z0, z1) = (bve[0].is_zero(), bve[1].is_zero());
        let (odd0, odd1) = (bve[0].is_odd(), bve[1].is_odd());
        if (z0 || z1) && !bvmul.is_zero() {
          // a zero operand of a non-zero product must change
          if z0 { eidx = 0 }
          if z1 { eidx = if eidx == -1 { 1 } else { -1 }}
        } else if bvmul.is_odd() && (!odd0 || !odd1) {
          // an odd product needs odd operands
          if !odd0 { eidx = 0 }
          if !odd1 { eidx = if eidx == -1 { 1 } else { -1 }}
        } else {
          let ctz = bvmul.get_num_trailing_zeros();
          if ctz < bve[0].get_num_trailing_zeros() { eidx = 0 }
          if ctz < bve[1].get_num_trailing_zeros() {
            eidx = if eidx == -1 { 1 } else { -1 }}}}
      if eidx == -1 { eidx = self.select_path_random(base, exp) }}
    eidx as usize }

  fn select_path_udiv(&mut self, base: &BvBase, exp: NID, bvudiv: &BV, bve: &[BV]) -> usize {
    let mut eidx = self.select_path_non_const(base, exp);
    if eidx == -1 {
      if self.opts.prop_path_sel == PathSel::Essential {
        let bvmax = BV::ones(bve[0].width());
        if bvudiv == &bvmax {
          // only x/0 and 1...1/1 hit the top of the range
          eidx = 1;
        } else {
          if bvudiv.is_zero() && bve[0] == bvmax { eidx = 0 }
          else if &bve[0] < bvudiv { eidx = 0 }
          else {
            let up = bve[0].udiv(bvudiv);
            let lo = bve[0].udiv(&bvudiv.inc()).inc();
            if lo > up { eidx = 0 }}
          if bve[1].is_zero() || BV::is_umulo(&bve[1], bvudiv) {
            eidx = if eidx == -1 { 1 } else { -1 }}}}
      if eidx == -1 { eidx = self.select_path_random(base, exp) }}
    eidx as usize }

  fn select_path_urem(&mut self, base: &BvBase, exp: NID, bvurem: &BV, bve: &[BV]) -> usize {
    let mut eidx = self.select_path_non_const(base, exp);
    if eidx == -1 {
      if self.opts.prop_path_sel == PathSel::Essential {
        let bvmax = BV::ones(bve[0].width());
        let sub = bve[0].sub(bvurem);
        let dec = bve[0].dec();
        if bvurem == &bvmax {
          // 1...1 is only reachable as 1...1 % 0
          if !bve[1].is_zero() { eidx = 1 }
          if bve[0] != bvmax { eidx = if eidx == -1 { 0 } else { -1 }}
        } else if !bvurem.is_zero() && bve[1].is_one() {
          eidx = 1;
        } else if !bve[1].is_zero() && bve[1] <= *bvurem {
          eidx = if eidx == -1 { 1 } else { -1 };
        } else if &bve[0] < bvurem
          || (&bve[0] > bvurem && (sub <= *bvurem || dec == *bvurem)) {
          eidx = 0 }}
      if eidx == -1 { eidx = self.select_path_random(base, exp) }}
    eidx as usize }

  fn select_path_concat(&mut self, base: &BvBase, exp: NID, bvconcat: &BV, bve: &[BV]) -> usize {
    let mut eidx = self.select_path_non_const(base, exp);
    if eidx == -1 {
      if self.opts.prop_path_sel == PathSel::Essential {
        // an operand disagreeing with its slice of the output must change
        let cw = bvconcat.width();
        if bvconcat.slice(cw - 1, cw - bve[0].width()) != bve[0] { eidx = 0 }
        if bvconcat.slice(bve[1].width() - 1, 0) != bve[1] {
          eidx = if eidx == -1 { 1 } else { -1 }}}
      if eidx == -1 { eidx = self.select_path_random(base, exp) }}
    eidx as usize }

  fn select_path_any(&mut self, base: &BvBase, exp: NID) -> usize {
    let mut eidx = self.select_path_non_const(base, exp);
    if eidx == -1 { eidx = self.select_path_random(base, exp) }
    eidx as usize }

  /// Condition handling: a constant condition forces the enabled
  /// branch; otherwise the condition is flipped with a (dynamically
  /// tuned, when a branch is constant) probability, else the enabled
  /// branch is followed.
  fn select_path_cond(&mut self, base: &BvBase, exp: NID, bve0: &BV) -> usize {
    let e0 = base.child(exp, 0);
    if base.is_const(e0) {
      return if e0 == base.true_nid() { 1 } else { 2 }}
    let e1const = base.is_const(base.child(exp, 1));
    let e2const = base.is_const(base.child(exp, 2));
    let prob = self.opts.prop_prob_flip_cond_const;
    if ((e1const && bve0.is_true()) || (e2const && bve0.is_false()))
      && self.rng.flip(prob) {
      self.nflip_cond_const += 1;
      if self.nflip_cond_const == self.opts.prop_flip_cond_const_npathsel {
        self.nflip_cond_const = 0;
        self.flip_cond_const_prob_delta =
          if prob == 0 { 100 }
          else if prob == 1000 { -100 }
          else { self.flip_cond_const_prob_delta };
        self.opts.prop_prob_flip_cond_const =
          (prob as i32 + self.flip_cond_const_prob_delta).clamp(0, 1000) as u32 }
      0
    } else if self.rng.flip(self.opts.prop_prob_flip_cond) {
      0
    } else if bve0.is_true() { 1 } else { 2 }}

  // -- propagation descent -----------------------------------------------

  /// Walk from a falsified root down to an input variable, producing
  /// its new assignment. Returns the number of propagation steps along
  /// with the move; `None` means a non-recoverable conflict.
  pub fn select_move_prop(&mut self, base: &BvBase, root: NID)
                          -> (Option<(NID, BV)>, u64) {
    let mut nprops = 0u64;
    let mut cur = base.chase(root);
    let mut bvcur = BV::one(1);
    loop {
      let real = cur.raw();
      if base.is_var(cur) {
        let ass = if cur.is_inv() { bvcur.not() } else { bvcur };
        return (Some((real, ass)), nprops) }
      if base.is_const(cur) {
        // constant leaf with a mismatched target
        self.stats.move_prop_non_rec_conf += 1;
        return (None, nprops) }
      if matches!(base.kind(cur),
                  Kind::Apply | Kind::Param | Kind::Uf | Kind::Lambda
                  | Kind::Args | Kind::FunEq) {
        // function territory: nothing to propagate into
        self.stats.move_prop_non_rec_conf += 1;
        return (None, nprops) }
      nprops += 1;
      if cur.is_inv() { bvcur = bvcur.not() }
      let arity = base.arity(real) as usize;
      let mut bve = Vec::with_capacity(arity);
      let mut nconst = 0;
      for i in 0..arity {
        let c = base.child(real, i);
        bve.push(self.model.value(base, &mut self.rng, c));
        if base.is_const(c) { nconst += 1 }}
      if nconst > arity - 1 {
        self.stats.move_prop_non_rec_conf += 1;
        return (None, nprops) }
      trace!("propagate {:?} through {} {:?}", bvcur, real, base.kind(real));
      let use_inv = self.rng.flip(self.opts.prop_prob_use_inv_value);
      let kind = base.kind(real);
      let (eidx, bvenew) = match kind {
        Kind::Cond => {
          let eidx = self.select_path_cond(base, real, &bve[0]);
          // either flip the condition or pass the target through
          let v = if eidx == 0 { Some(bve[0].not()) } else { Some(bvcur.clone()) };
          (eidx, v) }
        Kind::Slice => {
          let v = if use_inv { self.inv_slice(base, real, &bvcur, &bve[0]) }
                  else { Some(self.cons_slice(base, real, &bvcur, &bve[0])) };
          (0, v) }
        _ => {
          let eidx = match kind {
            Kind::And => self.select_path_and(base, real, &bvcur, &bve),
            Kind::Ult => self.select_path_ult(base, real, &bvcur, &bve),
            Kind::Sll => self.select_path_sll(base, real, &bvcur, &bve),
            Kind::Srl => self.select_path_srl(base, real, &bvcur, &bve),
            Kind::Mul => self.select_path_mul(base, real, &bvcur, &bve),
            Kind::Udiv => self.select_path_udiv(base, real, &bvcur, &bve),
            Kind::Urem => self.select_path_urem(base, real, &bvcur, &bve),
            Kind::Concat => self.select_path_concat(base, real, &bvcur, &bve),
            _ => self.select_path_any(base, real) };
          let o = &bve[1 - eidx];
          let v = match kind {
            Kind::Add => if use_inv { self.inv_add(base, real, &bvcur, o, eidx) }
                         else { Some(self.cons_add(base, real, &bvcur, o, eidx)) },
            Kind::And => if use_inv { self.inv_and(base, real, &bvcur, o, eidx) }
                         else { Some(self.cons_and(base, real, &bvcur, o, eidx)) },
            Kind::BvEq => if use_inv { self.inv_eq(base, real, &bvcur, o, eidx) }
                          else { Some(self.cons_eq(base, real, &bvcur, o, eidx)) },
            Kind::Ult => if use_inv { self.inv_ult(base, real, &bvcur, o, eidx) }
                         else { Some(self.cons_ult(base, real, &bvcur, o, eidx)) },
            Kind::Sll => if use_inv { self.inv_sll(base, real, &bvcur, o, eidx) }
                         else { Some(self.cons_sll(base, real, &bvcur, o, eidx)) },
            Kind::Srl => if use_inv { self.inv_srl(base, real, &bvcur, o, eidx) }
                         else { Some(self.cons_srl(base, real, &bvcur, o, eidx)) },
            Kind::Mul => if use_inv { self.inv_mul(base, real, &bvcur, o, eidx) }
                         else { Some(self.cons_mul(base, real, &bvcur, o, eidx)) },
            Kind::Udiv => if use_inv { self.inv_udiv(base, real, &bvcur, o, eidx) }
                          else { Some(self.cons_udiv(base, real, &bvcur, o, eidx)) },
            Kind::Urem => if use_inv { self.inv_urem(base, real, &bvcur, o, eidx) }
                          else { Some(self.cons_urem(base, real, &bvcur, o, eidx)) },
            Kind::Concat => if use_inv { self.inv_concat(base, real, &bvcur, o, eidx) }
                            else { Some(self.cons_concat(base, real, &bvcur, o, eidx)) },
            other => panic!("cannot propagate through {:?}", other) };
          (eidx, v) }};
      match bvenew {
        None => return (None, nprops),
        Some(v) => {
          cur = base.chase(base.child(real, eidx));
          bvcur = v }}}}

} // impl PropSolver

include!("test-prop.rs");
