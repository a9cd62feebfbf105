//! Expression nodes: operator kinds, sorts, and per-node data.
use crate::bv::BV;
use crate::nid::NID;

/// Operator kinds. `Proxy` is the tombstone left behind when a node is
/// rewritten away; readers resolve it through `BvBase::chase`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
  BvConst, BvVar, Param, Uf,
  Slice, And, BvEq, FunEq, Add, Mul, Ult,
  Sll, Srl, Udiv, Urem, Concat,
  Cond, Lambda, Apply, Args,
  Proxy }

impl Kind {
  /// children of these operators are sorted by id before hash-cons lookup
  pub fn is_commutative(self) -> bool {
    matches!(self, Kind::And | Kind::BvEq | Kind::FunEq | Kind::Add | Kind::Mul) }

  /// leaf kinds that never enter the unique table
  pub fn is_input(self) -> bool {
    matches!(self, Kind::BvVar | Kind::Param | Kind::Uf) }}

/// Node sorts. Bool is represented as `Bv(1)`; the printer re-derives
/// boolean-ness from the operator structure.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Sort {
  Bv(u32),
  Fun { domain: Vec<u32>, codomain: u32 },
  Tuple(Vec<u32>) }

impl Sort {
  pub fn width(&self) -> u32 {
    match self {
      Sort::Bv(w) => *w,
      other => panic!("width() of non-bitvector sort {:?}", other) }}

  pub fn is_fun(&self) -> bool { matches!(self, Sort::Fun { .. }) }}

/// Kind-local payload.
#[derive(Clone, Debug)]
pub enum Data {
  None,
  /// normalised constant: `bits` always has bit 0 = 0; `invbits` caches
  /// the complement for inverted references.
  Const { bits: BV, invbits: BV },
  Slice { upper: u32, lower: u32 },
  /// id of the binding lambda (0 while unbound)
  Param { binder: u32 },
  /// alpha-invariant hash cached at creation; static_rho carries
  /// index/value pairs for lambdas synthesised from array writes.
  Lambda { hash: u32, static_rho: Option<Vec<(NID, NID)>> } }

/// A node in the expression DAG. Nodes are owned by their BvBase and
/// referenced through NIDs; `e` holds up to three tagged child refs.
#[derive(Clone, Debug)]
pub struct Node {
  pub id: u32,
  pub kind: Kind,
  pub sort: Sort,
  pub arity: u8,
  pub e: [NID; 3],
  pub refs: u32,
  /// reverse edges: (parent id, child slot). apply parents sit at the
  /// end of the list, all others at the front.
  pub parents: Vec<(u32, u8)>,
  /// forwarding target once the node has been rewritten away
  pub simplified: Option<NID>,
  /// unique-table chain link (0 terminates)
  pub next: u32,
  pub unique: bool,
  /// registered as a top-level constraint
  pub constraint: bool,
  pub parameterized: bool,
  pub lambda_below: bool,
  pub apply_below: bool,
  pub is_array: bool,
  pub data: Data }

impl Node {
  pub fn children(&self) -> &[NID] { &self.e[..self.arity as usize] }

  pub fn width(&self) -> u32 { self.sort.width() }

  pub fn bits(&self) -> &BV {
    match &self.data {
      Data::Const { bits, .. } => bits,
      _ => panic!("bits() of non-constant node {}", self.id) }}

  pub fn invbits(&self) -> &BV {
    match &self.data {
      Data::Const { invbits, .. } => invbits,
      _ => panic!("invbits() of non-constant node {}", self.id) }}

  pub fn slice_bounds(&self) -> (u32, u32) {
    match &self.data {
      Data::Slice { upper, lower } => (*upper, *lower),
      _ => panic!("slice_bounds() of non-slice node {}", self.id) }}

  pub fn lambda_hash(&self) -> u32 {
    match &self.data {
      Data::Lambda { hash, .. } => *hash,
      _ => panic!("lambda_hash() of non-lambda node {}", self.id) }}}

/// Evaluate a binary bit-vector operator over concrete values.
/// Used by constant folding and by the cone update.
pub fn eval_binary(kind: Kind, a: &BV, b: &BV) -> BV {
  match kind {
    Kind::And => a.and(b),
    Kind::Add => a.add(b),
    Kind::Mul => a.mul(b),
    Kind::Udiv => a.udiv(b),
    Kind::Urem => a.urem(b),
    Kind::Sll => a.sll(b),
    Kind::Srl => a.srl(b),
    Kind::Concat => a.concat(b),
    Kind::Ult => BV::from_bool(a < b),
    Kind::BvEq => BV::from_bool(a == b),
    other => panic!("eval_binary: not a binary bv op: {:?}", other) }}


#[test] fn test_eval_binary() {
  let a = BV::from_u64(0b1100, 4);
  let b = BV::from_u64(0b1010, 4);
  assert_eq!(eval_binary(Kind::And, &a, &b).to_u64(), 0b1000);
  assert_eq!(eval_binary(Kind::Add, &a, &b).to_u64(), 0b0110);
  assert_eq!(eval_binary(Kind::Ult, &a, &b).to_u64(), 0);
  assert_eq!(eval_binary(Kind::BvEq, &a, &a).to_u64(), 1); }

#[test] fn test_sort_width() {
  assert_eq!(Sort::Bv(8).width(), 8);
  assert!(Sort::Fun { domain: vec![8], codomain: 1 }.is_fun()); }
