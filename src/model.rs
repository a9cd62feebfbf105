//! Candidate models: a total assignment from nodes to bit-vectors.
//!
//! The table keys on signed node ids so that both polarities of a node
//! have their own entry (the negated value is stored for the inverted
//! reference). Values for nodes missing from the table are computed on
//! demand by walking the DAG, sampling unassigned variables uniformly.
use fxhash::{FxHashMap, FxHashSet};
use crate::base::BvBase;
use crate::bv::BV;
use crate::nid::NID;
use crate::node::{Kind, Sort, eval_binary};
use crate::rng::Rng;

#[derive(Default)]
pub struct BvModel {
  map: FxHashMap<i64, BV>,
  /// sampled values for uninterpreted function applications,
  /// keyed by (uf id, concrete argument values)
  fun_cache: FxHashMap<(u32, Vec<BV>), BV> }

impl BvModel {

  pub fn new() -> Self { BvModel::default() }

  pub fn clear(&mut self) {
    self.map.clear();
    self.fun_cache.clear(); }

  pub fn contains(&self, id: u32) -> bool { self.map.contains_key(&(id as i64)) }

  /// cached value of a reference, if present
  pub fn get(&self, n: NID) -> Option<&BV> { self.map.get(&n.sid()) }

  /// install an assignment for a (non-inverted) node; maintains the
  /// negated entry for the inverted reference alongside.
  pub fn set(&mut self, id: u32, bv: BV) {
    self.map.insert(-(id as i64), bv.not());
    self.map.insert(id as i64, bv); }

  /// value of a reference, computing (and caching) it if missing
  pub fn value(&mut self, base: &BvBase, rng: &mut Rng, n: NID) -> BV {
    let n = base.chase(n);
    if let Some(v) = self.map.get(&n.sid()) { return v.clone() }
    self.compute(base, rng, n, &FxHashMap::default()) }

  /// Recursively compute the assignment of `root` under the given
  /// param environment. Non-parameterized results are cached in the
  /// model; parameterized ones live only for this call.
  fn compute(&mut self, base: &BvBase, rng: &mut Rng, root: NID,
             env: &FxHashMap<u32, BV>) -> BV {
    let mut wip: FxHashMap<u32, BV> = FxHashMap::default();
    let mut mark: FxHashSet<u32> = FxHashSet::default();
    let mut stack = vec![root];
    while let Some(&cur) = stack.last() {
      let real = cur.raw();
      let id = real.id();
      if wip.contains_key(&id) || self.map.contains_key(&(id as i64)) {
        stack.pop();
        continue }
      let node = base.node(real);
      if !mark.contains(&id) {
        mark.insert(id);
        match node.kind {
          Kind::BvConst | Kind::BvVar | Kind::Param | Kind::Apply | Kind::FunEq => {}
          Kind::Lambda | Kind::Uf | Kind::Args =>
            panic!("no bit-vector value for {:?} node {}", node.kind, id),
          _ => for &c in node.children() { stack.push(c) }}
        continue }
      stack.pop();
      let val = match node.kind {
        Kind::BvConst => node.bits().clone(),
        Kind::BvVar => BV::new_random(rng, node.width()),
        Kind::Param => env.get(&id).expect("unbound param in evaluation").clone(),
        Kind::Apply => self.apply_value(base, rng, real, env),
        // hash-consing makes alpha-equivalent functions identical, so
        // structural equality decides function equality here
        Kind::FunEq => BV::from_bool(node.e[0] == node.e[1]),
        Kind::Slice => {
          let (u, l) = node.slice_bounds();
          self.fetch(node.e[0], &wip).slice(u, l) }
        Kind::Cond => {
          let c = self.fetch(node.e[0], &wip);
          if c.is_true() { self.fetch(node.e[1], &wip) }
          else { self.fetch(node.e[2], &wip) }}
        _ => {
          let a = self.fetch(node.e[0], &wip);
          let b = self.fetch(node.e[1], &wip);
          eval_binary(node.kind, &a, &b) }};
      if node.parameterized { wip.insert(id, val); }
      else { self.set(id, val); }}
    self.fetch(root, &wip) }

  fn fetch(&self, n: NID, wip: &FxHashMap<u32, BV>) -> BV {
    if let Some(v) = self.map.get(&n.sid()) { return v.clone() }
    let v = wip.get(&n.id()).expect("missing assignment");
    if n.is_inv() { v.not() } else { v.clone() }}

  /// Value of a function application: beta-reduce lambdas (binding the
  /// curried params to the concrete argument values), sample-and-cache
  /// uninterpreted functions.
  pub(crate) fn apply_value(&mut self, base: &BvBase, rng: &mut Rng, apply: NID,
                            env: &FxHashMap<u32, BV>) -> BV {
    let fun = base.child(apply, 0);
    let args = base.child(apply, 1);
    let vals: Vec<BV> = base.args_leaves(args).iter()
      .map(|&l| self.compute(base, rng, l, env))
      .collect();
    match base.kind(fun) {
      Kind::Uf => {
        let codomain = match base.sort(fun) {
          Sort::Fun { codomain, .. } => *codomain,
          _ => unreachable!() };
        let key = (fun.id(), vals);
        if let Some(v) = self.fun_cache.get(&key) { return v.clone() }
        let v = BV::new_random(rng, codomain);
        self.fun_cache.insert(key, v.clone());
        v }
      Kind::Lambda => {
        let mut inner = env.clone();
        let mut cur = fun;
        let mut vals = vals.into_iter();
        loop {
          let p = base.lambda_param(cur);
          inner.insert(p.id(), vals.next().expect("arity mismatch"));
          let body = base.lambda_body(cur);
          if base.is_lambda(body) && !body.is_inv() { cur = body }
          else { return self.compute(base, rng, body, &inner) }}}
      other => panic!("apply of {:?}", other) }}

} // impl BvModel


#[cfg(test)] mod test {
  use super::*;
  use crate::opt::Opts;

  #[test] fn test_model_eval() {
    let mut base = BvBase::new(Opts::default());
    let mut rng = Rng::new(1);
    let mut model = BvModel::new();
    let x = base.bv_var(8, Some("x"));
    let k = base.bv_const(BV::from_u64(3, 8));
    let e = base.add(x, k);
    model.set(x.id(), BV::from_u64(7, 8));
    assert_eq!(model.value(&base, &mut rng, e).to_u64(), 10);
    // inverted reference reads the complement entry
    assert_eq!(model.value(&base, &mut rng, !e).to_u64(), 0xf5); }

  #[test] fn test_model_cond() {
    let mut base = BvBase::new(Opts::default());
    let mut rng = Rng::new(1);
    let mut model = BvModel::new();
    let c = base.bv_var(1, None);
    let (t, e) = (base.bv_var(4, None), base.bv_var(4, None));
    let ite = base.cond(c, t, e);
    model.set(c.id(), BV::from_bool(true));
    model.set(t.id(), BV::from_u64(5, 4));
    model.set(e.id(), BV::from_u64(9, 4));
    assert_eq!(model.value(&base, &mut rng, ite).to_u64(), 5); }

  #[test] fn test_model_apply_lambda() {
    let mut base = BvBase::new(Opts::default());
    let mut rng = Rng::new(1);
    let mut model = BvModel::new();
    // f(p) = p + 1
    let p = base.param(8, None);
    let one = base.bv_const(BV::one(8));
    let body = base.add(p, one);
    let f = base.lambda(p, body);
    let x = base.bv_var(8, None);
    let args = base.args(&[x]);
    let app = base.apply(f, args);
    model.set(x.id(), BV::from_u64(41, 8));
    assert_eq!(model.value(&base, &mut rng, app).to_u64(), 42); }

  #[test] fn test_model_uf_consistent() {
    let mut base = BvBase::new(Opts::default());
    let mut rng = Rng::new(1);
    let mut model = BvModel::new();
    let g = base.uf(vec![8], 8, Some("g"));
    let x = base.bv_var(8, None);
    let args = base.args(&[x]);
    let a1 = base.apply(g, args);
    model.set(x.id(), BV::from_u64(5, 8));
    let v1 = model.value(&base, &mut rng, a1);
    // same argument value -> same sampled result
    assert_eq!(model.value(&base, &mut rng, a1), v1); }
}
