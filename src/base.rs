//! The expression base: a hash-consed DAG of bit-vector expressions.
//!
//! All node construction and destruction funnels through a `BvBase`.
//! Builders return NIDs with one reference owned by the caller;
//! `copy`/`release` adjust the count. Structurally equal terms share
//! one node (and one id) via the unique table.
use fxhash::{FxHashMap, FxHashSet};
use crate::bv::BV;
use crate::nid::NID;
use crate::node::{Data, Kind, Node, Sort, eval_binary};
use crate::opt::Opts;

/// fixed multipliers for the structural hash
const PRIMES: [u32; 3] = [333444569, 76891121, 456790003];

const UNIQUE_TABLE_MINSIZE: usize = 256;

fn code(k: Kind) -> u32 { k as u32 }

fn log2(x: u32) -> u32 {
  assert!(x.is_power_of_two(), "{} is not a power of two", x);
  x.trailing_zeros() }

pub struct BvBase {
  pub opts: Opts,
  /// id table; slot 0 is reserved so ids are dense from 1.
  nodes: Vec<Option<Node>>,
  /// unique table: power-of-two chained hash table of node ids.
  utab: Vec<u32>,
  unum: usize,
  symbols: FxHashMap<String, NID>,
  node2symbol: FxHashMap<u32, String>,
  bv_vars: FxHashSet<u32>,
  ufs: FxHashSet<u32>,
  lambdas: FxHashSet<u32>,
  feqs: FxHashSet<u32>,
  /// node id -> ids of the params occurring (unbound) below it
  parameterized: FxHashMap<u32, FxHashSet<u32>>,
  extern_ids: FxHashMap<u32, i32>,
  constraints: Vec<NID>,
  assumptions: Vec<NID>,
  false_nid: NID }

impl Default for BvBase {
  fn default() -> Self { BvBase::new(Opts::default()) }}

impl BvBase {

  pub fn new(opts: Opts) -> Self {
    let mut base = BvBase {
      opts,
      nodes: vec![None],
      utab: vec![0; UNIQUE_TABLE_MINSIZE],
      unum: 0,
      symbols: FxHashMap::default(),
      node2symbol: FxHashMap::default(),
      bv_vars: FxHashSet::default(),
      ufs: FxHashSet::default(),
      lambdas: FxHashSet::default(),
      feqs: FxHashSet::default(),
      parameterized: FxHashMap::default(),
      extern_ids: FxHashMap::default(),
      constraints: vec![],
      assumptions: vec![],
      false_nid: NID::default() };
    base.false_nid = base.bv_const(BV::zeros(1));
    base }

  // -- node access ------------------------------------------------------

  pub(crate) fn node(&self, n: NID) -> &Node {
    self.nodes[n.idx()].as_ref().expect("reference to released node") }

  fn node_mut(&mut self, id: usize) -> &mut Node {
    self.nodes[id].as_mut().expect("reference to released node") }

  /// number of id-table slots handed out so far (including released ones)
  pub fn num_ids(&self) -> usize { self.nodes.len() - 1 }

  /// number of live entries in the unique table
  pub fn num_unique(&self) -> usize { self.unum }

  pub fn kind(&self, n: NID) -> Kind { self.node(n).kind }
  pub fn arity(&self, n: NID) -> u8 { self.node(n).arity }
  pub fn child(&self, n: NID, i: usize) -> NID { self.node(n).e[i] }
  pub fn refs(&self, n: NID) -> u32 { self.node(n).refs }
  pub fn sort(&self, n: NID) -> &Sort { &self.node(n).sort }
  pub fn width(&self, n: NID) -> u32 { self.node(n).width() }
  pub fn is_bool(&self, n: NID) -> bool {
    matches!(self.node(n).sort, Sort::Bv(1)) }

  pub fn is_const(&self, n: NID) -> bool { self.kind(n) == Kind::BvConst }
  pub fn is_var(&self, n: NID) -> bool { self.kind(n) == Kind::BvVar }
  pub fn is_param(&self, n: NID) -> bool { self.kind(n) == Kind::Param }
  pub fn is_uf(&self, n: NID) -> bool { self.kind(n) == Kind::Uf }
  pub fn is_lambda(&self, n: NID) -> bool { self.kind(n) == Kind::Lambda }
  pub fn is_apply(&self, n: NID) -> bool { self.kind(n) == Kind::Apply }
  pub fn is_args(&self, n: NID) -> bool { self.kind(n) == Kind::Args }
  pub fn is_and(&self, n: NID) -> bool { self.kind(n) == Kind::And }
  pub fn is_cond(&self, n: NID) -> bool { self.kind(n) == Kind::Cond }
  pub fn is_parameterized(&self, n: NID) -> bool { self.node(n).parameterized }

  /// the constant `false` (1-bit zero); `true` is its inversion
  pub fn false_nid(&self) -> NID { self.false_nid }
  pub fn true_nid(&self) -> NID { !self.false_nid }

  /// Resolve proxy forwarding: follow `simplified` pointers to a fixed
  /// point, preserving polarity. Every reader that turns a NID into a
  /// node goes through here first.
  pub fn chase(&self, n: NID) -> NID {
    let mut cur = n;
    while let Some(s) = self.node(cur).simplified {
      cur = if cur.is_inv() { !s } else { s }}
    cur }

  /// concrete value of a constant reference, respecting inversion
  pub fn const_val(&self, n: NID) -> Option<BV> {
    let node = self.node(n);
    if node.kind != Kind::BvConst { return None }
    Some(if n.is_inv() { node.invbits().clone() } else { node.bits().clone() }) }

  // -- symbols and external ids ----------------------------------------

  pub fn set_symbol(&mut self, n: NID, sym: &str) {
    assert!(!self.symbols.contains_key(sym), "symbol {:?} already in use", sym);
    let id = n.id();
    if let Some(old) = self.node2symbol.remove(&id) { self.symbols.remove(&old); }
    self.symbols.insert(sym.to_string(), n.raw());
    self.node2symbol.insert(id, sym.to_string()); }

  pub fn symbol(&self, n: NID) -> Option<&str> {
    self.node2symbol.get(&n.id()).map(|s| s.as_str()) }

  pub fn get_by_symbol(&self, sym: &str) -> Option<NID> {
    self.symbols.get(sym).copied() }

  pub fn get_by_id(&self, id: u32) -> Option<NID> {
    if (id as usize) < self.nodes.len() && self.nodes[id as usize].is_some() {
      Some(NID::new(id)) } else { None }}

  /// user-assignable external id, consumed by the printer when
  /// pretty-printing is off
  pub fn set_extern_id(&mut self, n: NID, id: i32) {
    self.extern_ids.insert(n.id(), id); }

  pub fn extern_id(&self, n: NID) -> Option<i32> {
    self.extern_ids.get(&n.id()).copied() }

  // -- parents ----------------------------------------------------------

  /// reverse edges of n: (parent id, child slot)
  pub fn parents(&self, n: NID) -> &[(u32, u8)] { &self.node(n).parents }

  pub fn apply_parents(&self, n: NID) -> Vec<u32> {
    self.parents(n).iter().map(|&(p, _)| p)
      .filter(|&p| self.nodes[p as usize].as_ref().map_or(false, |x| x.kind == Kind::Apply))
      .collect() }

  pub fn lambda_parents(&self, n: NID) -> Vec<u32> {
    self.parents(n).iter().map(|&(p, _)| p)
      .filter(|&p| self.nodes[p as usize].as_ref().map_or(false, |x| x.kind == Kind::Lambda))
      .collect() }

  // -- constraints and assumptions --------------------------------------

  pub fn assert_constraint(&mut self, root: NID) {
    let root = self.chase(root);
    assert_eq!(self.width(root), 1, "constraints must be boolean");
    if self.constraints.contains(&root) { return }
    self.copy(root);
    self.node_mut(root.idx()).constraint = true;
    self.constraints.push(root); }

  pub fn assume(&mut self, root: NID) {
    let root = self.chase(root);
    assert_eq!(self.width(root), 1, "assumptions must be boolean");
    if self.assumptions.contains(&root) { return }
    self.copy(root);
    self.assumptions.push(root); }

  pub fn reset_assumptions(&mut self) {
    while let Some(a) = self.assumptions.pop() { self.release(a) }}

  pub fn constraints(&self) -> &[NID] { &self.constraints }
  pub fn assumptions(&self) -> &[NID] { &self.assumptions }

  pub fn is_assumption(&self, n: NID) -> bool {
    self.assumptions.contains(&n) || self.assumptions.contains(&!n) }

  /// sorted ids of all live bit-vector variables
  pub fn var_ids(&self) -> Vec<u32> {
    let mut ids: Vec<u32> = self.bv_vars.iter().copied().collect();
    ids.sort_unstable();
    ids }

  pub fn uf_ids(&self) -> Vec<u32> {
    let mut ids: Vec<u32> = self.ufs.iter().copied().collect();
    ids.sort_unstable();
    ids }

  pub fn num_ufs(&self) -> usize { self.ufs.len() }

  // -- hashing ----------------------------------------------------------

  fn hash_bv(kind: Kind, e: &[NID]) -> u32 {
    let _ = kind;
    let mut hash = 0u32;
    for (i, c) in e.iter().enumerate() {
      hash = hash.wrapping_add(PRIMES[i].wrapping_mul(c.id())) }
    hash }

  fn hash_slice(e: NID, upper: u32, lower: u32) -> u32 {
    PRIMES[0].wrapping_mul(e.id())
      .wrapping_add(PRIMES[1].wrapping_mul(upper))
      .wrapping_add(PRIMES[2].wrapping_mul(lower)) }

  fn hash_of_node(node: &Node, size: usize) -> usize {
    let h = match node.kind {
      Kind::BvConst => fxhash::hash32(node.bits()),
      Kind::Lambda => node.lambda_hash(),
      Kind::Slice => {
        let (u, l) = node.slice_bounds();
        Self::hash_slice(node.e[0], u, l) }
      _ => Self::hash_bv(node.kind, node.children()) };
    h as usize & (size - 1) }

  /// Alpha-invariant hash of a prospective lambda body. Walks the
  /// parameterized part of the body; nodes without a param below
  /// contribute their (signed) id, nested lambdas contribute their
  /// cached hash, everything else its kind.
  fn hash_lambda(&self, body: NID) -> u32 {
    let mut hash = 0u32;
    let mut marked: FxHashSet<u32> = FxHashSet::default();
    let mut visit = vec![body];
    while let Some(cur) = visit.pop() {
      let real = cur.raw();
      if marked.contains(&real.id()) { continue }
      let node = self.node(real);
      if !node.parameterized {
        hash = hash.wrapping_add(cur.sid() as i32 as u32);
        continue }
      marked.insert(real.id());
      if node.kind == Kind::Lambda {
        hash = hash.wrapping_add(node.lambda_hash())
          .wrapping_add(code(node.kind))
          .wrapping_add(code(self.node(node.e[0]).kind));
        continue }
      let k = code(node.kind);
      hash = if cur.is_inv() { hash.wrapping_sub(k) } else { hash.wrapping_add(k) };
      for &c in node.children() { visit.push(c) }}
    hash }

  /// structural equality of two lambda definitions modulo renaming of
  /// their formal parameters (curried lambdas are zipped).
  fn lambda_alpha_eq(&self, p1: NID, b1: NID, p2: NID, b2: NID) -> bool {
    if self.width(p1) != self.width(p2) { return false }
    let mut map: FxHashMap<u32, u32> = FxHashMap::default();
    map.insert(p1.id(), p2.id());
    let mut cache: FxHashSet<(u32, u32)> = FxHashSet::default();
    let mut stack = vec![(b1, b2)];
    while let Some((a, b)) = stack.pop() {
      if a.is_inv() != b.is_inv() { return false }
      let (ra, rb) = (a.raw(), b.raw());
      if ra == rb { continue }
      if !cache.insert((ra.id(), rb.id())) { continue }
      let (na, nb) = (self.node(ra), self.node(rb));
      if na.kind != nb.kind || na.arity != nb.arity || na.sort != nb.sort { return false }
      match na.kind {
        Kind::Param => {
          if map.get(&ra.id()) != Some(&rb.id()) { return false }}
        Kind::BvConst => {
          if na.bits() != nb.bits() { return false }}
        Kind::BvVar | Kind::Uf => return false,  // ra != rb already
        Kind::Slice => {
          if na.slice_bounds() != nb.slice_bounds() { return false }
          stack.push((na.e[0], nb.e[0])) }
        Kind::Lambda => {
          map.insert(na.e[0].id(), nb.e[0].id());
          stack.push((na.e[1], nb.e[1])) }
        _ => {
          for i in 0..na.arity as usize { stack.push((na.e[i], nb.e[i])) }}}}
    true }

  // -- unique table ------------------------------------------------------

  fn find_chain<F: Fn(&Node) -> bool>(&self, hash: usize, pred: F) -> Option<u32> {
    let mut cur = self.utab[hash];
    while cur != 0 {
      let node = self.nodes[cur as usize].as_ref().expect("unique chain hit released node");
      if pred(node) { return Some(cur) }
      cur = node.next }
    None }

  fn find_const(&self, bits: &BV) -> Option<u32> {
    let hash = fxhash::hash32(bits) as usize & (self.utab.len() - 1);
    self.find_chain(hash, |n| n.kind == Kind::BvConst && n.bits() == bits) }

  fn find_bv_node(&self, kind: Kind, e: &[NID]) -> Option<u32> {
    let hash = Self::hash_bv(kind, e) as usize & (self.utab.len() - 1);
    self.find_chain(hash, |n| n.kind == kind && n.children() == e) }

  fn find_slice(&self, e: NID, upper: u32, lower: u32) -> Option<u32> {
    let hash = Self::hash_slice(e, upper, lower) as usize & (self.utab.len() - 1);
    self.find_chain(hash, |n| {
      n.kind == Kind::Slice && n.e[0] == e && n.slice_bounds() == (upper, lower) }) }

  fn find_lambda(&self, hash: u32, param: NID, body: NID) -> Option<u32> {
    let slot = hash as usize & (self.utab.len() - 1);
    let mut cur = self.utab[slot];
    while cur != 0 {
      let node = self.nodes[cur as usize].as_ref().expect("unique chain hit released node");
      if node.kind == Kind::Lambda && node.lambda_hash() == hash
        && self.lambda_alpha_eq(param, body, node.e[0], node.e[1]) {
        return Some(cur) }
      cur = node.next }
    None }

  fn insert_unique(&mut self, id: u32) {
    if self.unum >= self.utab.len() && (self.utab.len() as u32).trailing_zeros() < 30 {
      self.enlarge_unique() }
    let size = self.utab.len();
    let hash = Self::hash_of_node(self.node_mut(id as usize), size);
    let head = self.utab[hash];
    let node = self.node_mut(id as usize);
    node.next = head;
    node.unique = true;
    self.utab[hash] = id;
    self.unum += 1; }

  fn enlarge_unique(&mut self) {
    let new_size = self.utab.len() * 2;
    let mut ids = vec![];
    for i in 0..self.utab.len() {
      let mut cur = self.utab[i];
      while cur != 0 {
        ids.push(cur);
        cur = self.node_mut(cur as usize).next }}
    let mut new_chains = vec![0u32; new_size];
    for id in ids {
      let hash = Self::hash_of_node(self.node(NID::new(id)), new_size);
      let node = self.node_mut(id as usize);
      node.next = new_chains[hash];
      new_chains[hash] = id }
    self.utab = new_chains; }

  fn remove_from_unique(&mut self, id: u32) {
    if !self.node(NID::new(id)).unique { return }
    let size = self.utab.len();
    let hash = Self::hash_of_node(self.node(NID::new(id)), size);
    let mut cur = self.utab[hash];
    if cur == id {
      self.utab[hash] = self.node(NID::new(id)).next;
    } else {
      while cur != 0 {
        let next = self.node(NID::new(cur)).next;
        if next == id {
          let after = self.node(NID::new(id)).next;
          self.node_mut(cur as usize).next = after;
          break }
        cur = next }
      assert!(cur != 0, "node {} not found in its unique chain", id) }
    self.unum -= 1;
    let node = self.node_mut(id as usize);
    node.unique = false;
    node.next = 0; }

  // -- node creation -----------------------------------------------------

  fn new_node(&mut self, kind: Kind, sort: Sort, e: &[NID], data: Data) -> NID {
    let id = self.nodes.len() as u32;
    assert!(id < i32::MAX as u32, "expression id overflow");
    let mut pset: FxHashSet<u32> = FxHashSet::default();
    let mut lambda_below = kind == Kind::Lambda;
    let mut apply_below = kind == Kind::Apply;
    for &c in e {
      let cn = self.node(c);
      lambda_below |= cn.lambda_below;
      apply_below |= cn.apply_below;
      if cn.kind == Kind::Param { pset.insert(c.id()); }
      if let Some(ps) = self.parameterized.get(&c.id()) {
        pset.extend(ps.iter().copied()) }}
    if kind == Kind::Lambda { pset.remove(&e[0].id()); }
    if kind == Kind::Param { pset.insert(id); }
    let parameterized = !pset.is_empty();
    let mut node = Node {
      id, kind, sort,
      arity: e.len() as u8,
      e: [NID::default(); 3],
      refs: 1,
      parents: vec![],
      simplified: None,
      next: 0,
      unique: false,
      constraint: false,
      parameterized, lambda_below, apply_below,
      is_array: false,
      data };
    node.e[..e.len()].copy_from_slice(e);
    self.nodes.push(Some(node));
    if parameterized { self.parameterized.insert(id, pset); }
    for (pos, &c) in e.iter().enumerate() {
      self.connect_child(id, kind, c, pos as u8) }
    NID::new(id) }

  /// Connect child to its parent: bump the child's refcount and thread
  /// the reverse edge. Apply parents go to the end of the list, all
  /// others to the front (apply-parent iteration visits them in
  /// creation order).
  fn connect_child(&mut self, parent: u32, parent_kind: Kind, child: NID, pos: u8) {
    let cn = self.node_mut(child.idx());
    assert!(cn.refs < u32::MAX, "reference counter overflow");
    cn.refs += 1;
    if parent_kind == Kind::Apply { cn.parents.push((parent, pos)) }
    else { cn.parents.insert(0, (parent, pos)) }}

  fn hashcons_bv(&mut self, kind: Kind, sort: Sort, e: &[NID]) -> NID {
    if let Some(id) = self.find_bv_node(kind, e) {
      self.node_mut(id as usize).refs += 1;
      return NID::new(id) }
    let n = self.new_node(kind, sort, e, Data::None);
    self.insert_unique(n.id());
    n }

  // -- builders ----------------------------------------------------------

  /// Constant. Only even bit patterns are stored; an odd constant
  /// becomes the inverted reference to its complement.
  pub fn bv_const(&mut self, bits: BV) -> NID {
    let inverted = bits.is_odd();
    let store = if inverted { bits.not() } else { bits };
    let n = if let Some(id) = self.find_const(&store) {
      self.node_mut(id as usize).refs += 1;
      NID::new(id)
    } else {
      let invbits = store.not();
      let width = store.width();
      let n = self.new_node(Kind::BvConst, Sort::Bv(width),
                            &[], Data::Const { bits: store, invbits });
      self.insert_unique(n.id());
      n };
    if inverted { !n } else { n }}

  pub fn bv_var(&mut self, width: u32, symbol: Option<&str>) -> NID {
    let n = self.new_node(Kind::BvVar, Sort::Bv(width), &[], Data::None);
    self.bv_vars.insert(n.id());
    if let Some(s) = symbol { self.set_symbol(n, s) }
    n }

  pub fn param(&mut self, width: u32, symbol: Option<&str>) -> NID {
    let n = self.new_node(Kind::Param, Sort::Bv(width), &[], Data::Param { binder: 0 });
    if let Some(s) = symbol { self.set_symbol(n, s) }
    n }

  pub fn uf(&mut self, domain: Vec<u32>, codomain: u32, symbol: Option<&str>) -> NID {
    assert!(!domain.is_empty(), "uninterpreted functions take at least one argument");
    let n = self.new_node(Kind::Uf, Sort::Fun { domain, codomain }, &[], Data::None);
    self.ufs.insert(n.id());
    if let Some(s) = symbol { self.set_symbol(n, s) }
    n }

  pub fn slice(&mut self, e: NID, upper: u32, lower: u32) -> NID {
    let e = self.chase(e);
    let w = self.width(e);
    assert!(lower <= upper && upper < w, "slice bounds out of range");
    if self.opts.rewrite_level > 0 {
      if let Some(val) = self.const_val(e) {
        return self.bv_const(val.slice(upper, lower)) }
      if lower == 0 && upper == w - 1 { return self.copy(e) }}
    if let Some(id) = self.find_slice(e, upper, lower) {
      self.node_mut(id as usize).refs += 1;
      return NID::new(id) }
    let n = self.new_node(Kind::Slice, Sort::Bv(upper - lower + 1),
                          &[e], Data::Slice { upper, lower });
    self.insert_unique(n.id());
    n }

  fn binary(&mut self, kind: Kind, a: NID, b: NID) -> NID {
    let (mut a, mut b) = (self.chase(a), self.chase(b));
    let (wa, wb) = (self.width(a), self.width(b));
    let sort = match kind {
      Kind::Concat => Sort::Bv(wa + wb),
      Kind::Sll | Kind::Srl => {
        assert_eq!(wb, log2(wa), "shift amount width must be log2 of data width");
        Sort::Bv(wa) }
      Kind::Ult | Kind::BvEq => {
        assert_eq!(wa, wb, "operand widths differ");
        Sort::Bv(1) }
      _ => {
        assert_eq!(wa, wb, "operand widths differ");
        Sort::Bv(wa) }};
    if self.opts.rewrite_level > 0 {
      if let (Some(x), Some(y)) = (self.const_val(a), self.const_val(b)) {
        return self.bv_const(eval_binary(kind, &x, &y)) }}
    if self.opts.sort_exp && kind.is_commutative() && a.idx() > b.idx() {
      std::mem::swap(&mut a, &mut b) }
    self.hashcons_bv(kind, sort, &[a, b]) }

  pub fn and(&mut self, a: NID, b: NID) -> NID { self.binary(Kind::And, a, b) }
  pub fn add(&mut self, a: NID, b: NID) -> NID { self.binary(Kind::Add, a, b) }
  pub fn mul(&mut self, a: NID, b: NID) -> NID { self.binary(Kind::Mul, a, b) }
  pub fn udiv(&mut self, a: NID, b: NID) -> NID { self.binary(Kind::Udiv, a, b) }
  pub fn urem(&mut self, a: NID, b: NID) -> NID { self.binary(Kind::Urem, a, b) }
  pub fn concat(&mut self, a: NID, b: NID) -> NID { self.binary(Kind::Concat, a, b) }
  pub fn sll(&mut self, a: NID, b: NID) -> NID { self.binary(Kind::Sll, a, b) }
  pub fn srl(&mut self, a: NID, b: NID) -> NID { self.binary(Kind::Srl, a, b) }
  pub fn ult(&mut self, a: NID, b: NID) -> NID { self.binary(Kind::Ult, a, b) }
  pub fn bv_eq(&mut self, a: NID, b: NID) -> NID { self.binary(Kind::BvEq, a, b) }

  pub fn fun_eq(&mut self, a: NID, b: NID) -> NID {
    let (mut a, mut b) = (self.chase(a), self.chase(b));
    assert!(!a.is_inv() && !b.is_inv(), "function references cannot be inverted");
    assert!(self.sort(a).is_fun() && self.sort(a) == self.sort(b),
            "fun_eq requires equal function sorts");
    if self.opts.sort_exp && a.idx() > b.idx() { std::mem::swap(&mut a, &mut b) }
    let n = self.hashcons_bv(Kind::FunEq, Sort::Bv(1), &[a, b]);
    self.feqs.insert(n.id());
    n }

  pub fn cond(&mut self, c: NID, t: NID, e: NID) -> NID {
    let (c, t, e) = (self.chase(c), self.chase(t), self.chase(e));
    assert_eq!(self.width(c), 1, "condition must be boolean");
    assert_eq!(self.sort(t), self.sort(e), "branch sorts differ");
    if self.opts.rewrite_level > 0 {
      if let Some(val) = self.const_val(c) {
        return if val.is_true() { self.copy(t) } else { self.copy(e) }}}
    let sort = self.sort(t).clone();
    self.hashcons_bv(Kind::Cond, sort, &[c, t, e]) }

  /// Function definition. The param must not already be bound; lambdas
  /// over alpha-equivalent bodies share one node.
  pub fn lambda(&mut self, param: NID, body: NID) -> NID {
    assert!(!param.is_inv() && self.is_param(param));
    match self.node(param).data {
      Data::Param { binder } => assert_eq!(binder, 0, "param already bound"),
      _ => unreachable!() }
    let body = self.chase(body);
    let pw = self.width(param);
    let sort = match self.sort(body) {
      Sort::Fun { domain, codomain } => {
        // curried: fold the new param into the signature
        let mut d = vec![pw]; d.extend(domain.iter().copied());
        Sort::Fun { domain: d, codomain: *codomain }}
      Sort::Bv(w) => Sort::Fun { domain: vec![pw], codomain: *w },
      Sort::Tuple(_) => panic!("lambda body cannot be an argument tuple") };
    let hash = self.hash_lambda(body);
    if let Some(id) = self.find_lambda(hash, param, body) {
      self.node_mut(id as usize).refs += 1;
      return NID::new(id) }
    let n = self.new_node(Kind::Lambda, sort, &[param, body],
                          Data::Lambda { hash, static_rho: None });
    self.node_mut(param.idx()).data = Data::Param { binder: n.id() };
    self.lambdas.insert(n.id());
    self.insert_unique(n.id());
    n }

  /// Argument tuple: k >= 1 leaves folded right-leaning into nodes of
  /// arity <= 3 (the third slot may chain another args node).
  pub fn args(&mut self, xs: &[NID]) -> NID {
    assert!(!xs.is_empty(), "args() needs at least one argument");
    let xs: Vec<NID> = xs.iter().map(|&x| self.chase(x)).collect();
    self.args_aux(&xs) }

  fn args_aux(&mut self, xs: &[NID]) -> NID {
    let widths = |base: &Self, items: &[NID]| -> Vec<u32> {
      let mut ws = vec![];
      for &x in items {
        match base.sort(x) {
          Sort::Tuple(ts) => ws.extend(ts.iter().copied()),
          Sort::Bv(w) => ws.push(*w),
          Sort::Fun { .. } => panic!("function-sorted argument") }}
      ws };
    if xs.len() <= 3 {
      let sort = Sort::Tuple(widths(self, xs));
      return self.hashcons_bv(Kind::Args, sort, xs) }
    let tail = self.args_aux(&xs[2..]);
    let slots = [xs[0], xs[1], tail];
    let sort = Sort::Tuple(widths(self, &slots));
    let n = self.hashcons_bv(Kind::Args, sort, &slots);
    self.release(tail);
    n }

  /// leaf arguments of an args tuple, in order
  pub fn args_leaves(&self, n: NID) -> Vec<NID> {
    assert!(self.is_args(n));
    let mut res = vec![];
    let mut cur = n;
    loop {
      let node = self.node(cur);
      let mut chained = None;
      for &c in node.children() {
        if self.is_args(c) { chained = Some(c) } else { res.push(c) }}
      match chained { Some(next) => cur = next, None => return res }}}

  /// Function application. `args` must be an args tuple matching the
  /// function's domain.
  pub fn apply(&mut self, fun: NID, args: NID) -> NID {
    let (fun, args) = (self.chase(fun), self.chase(args));
    assert!(!fun.is_inv(), "function references cannot be inverted");
    assert!(self.is_args(args), "apply takes an args tuple");
    let codomain = match self.sort(fun) {
      Sort::Fun { domain, codomain } => {
        let leaves = self.args_leaves(args);
        assert_eq!(domain.len(), leaves.len(), "arity mismatch in apply");
        for (w, &l) in domain.iter().zip(leaves.iter()) {
          assert_eq!(*w, self.width(l), "argument width mismatch") }
        *codomain }
      _ => panic!("apply of a non-function") };
    self.hashcons_bv(Kind::Apply, Sort::Bv(codomain), &[fun, args]) }

  // -- structural lookup -------------------------------------------------

  /// probe for an existing node without creating one.
  /// does not bump the refcount.
  pub fn match_bv(&self, kind: Kind, e: &[NID]) -> Option<NID> {
    let mut e: Vec<NID> = e.iter().map(|&x| self.chase(x)).collect();
    if self.opts.sort_exp && kind.is_commutative() && e.len() == 2 && e[0].idx() > e[1].idx() {
      e.swap(0, 1) }
    self.find_bv_node(kind, &e).map(NID::new) }

  // -- reference counting ------------------------------------------------

  pub fn copy(&mut self, n: NID) -> NID {
    let node = self.node_mut(n.idx());
    assert!(node.refs < u32::MAX, "reference counter overflow");
    node.refs += 1;
    n }

  /// Release one reference; on reaching zero the node is destroyed:
  /// unique-table removal, index/symbol cleanup, parent-list unlink,
  /// recursive release of children via an explicit work-stack (DAG
  /// spines can be deeper than the host stack).
  pub fn release(&mut self, n: NID) {
    let id = n.idx();
    let refs = self.node(n).refs;
    assert!(refs > 0);
    if refs > 1 {
      self.node_mut(id).refs -= 1;
      return }
    let mut stack = vec![id];
    while let Some(id) = stack.pop() {
      debug_assert_eq!(self.nodes[id].as_ref().unwrap().refs, 1);
      self.remove_from_unique(id as u32);
      self.remove_from_tables(id as u32);
      let node = self.nodes[id].take().expect("double release");
      for (pos, &c) in node.children().iter().enumerate() {
        let cn = self.node_mut(c.idx());
        if let Some(k) = cn.parents.iter()
          .position(|&(p, s)| p as usize == id && s as usize == pos) {
          cn.parents.remove(k); }
        if cn.refs == 1 { stack.push(c.idx()) } else { cn.refs -= 1 }}
      if let Some(s) = node.simplified {
        let sn = self.node_mut(s.idx());
        if sn.refs == 1 { stack.push(s.idx()) } else { sn.refs -= 1 }}}}

  fn remove_from_tables(&mut self, id: u32) {
    match self.node(NID::new(id)).kind {
      Kind::BvVar => { self.bv_vars.remove(&id); }
      Kind::Uf => { self.ufs.remove(&id); }
      Kind::Lambda => { self.lambdas.remove(&id); }
      Kind::FunEq => { self.feqs.remove(&id); }
      _ => {}}
    if let Some(sym) = self.node2symbol.remove(&id) { self.symbols.remove(&sym); }
    self.parameterized.remove(&id);
    self.extern_ids.remove(&id); }

  /// Turn a rewritten node into a proxy forwarding to `to`. The id is
  /// preserved; children are disconnected and released; the proxy holds
  /// one reference to its target.
  pub fn set_to_proxy(&mut self, n: NID, to: NID) {
    let id = n.idx();
    assert!(!n.is_inv());
    assert!(self.chase(to).raw() != n.raw(), "proxy cycle");
    self.remove_from_unique(id as u32);
    self.remove_from_tables(id as u32);
    let children: Vec<NID> = self.node(n).children().to_vec();
    for (pos, &c) in children.iter().enumerate() {
      let cn = self.node_mut(c.idx());
      if let Some(k) = cn.parents.iter()
        .position(|&(p, s)| p as usize == id && s as usize == pos) {
        cn.parents.remove(k); }}
    self.copy(to);
    let node = self.node_mut(id);
    node.kind = Kind::Proxy;
    node.arity = 0;
    node.e = [NID::default(); 3];
    node.data = Data::None;
    node.simplified = Some(to);
    for c in children { self.release(c) }}

  // -- lambda accessors --------------------------------------------------

  pub fn lambda_param(&self, n: NID) -> NID {
    assert!(self.is_lambda(n));
    self.node(n).e[0] }

  pub fn lambda_body(&self, n: NID) -> NID {
    assert!(self.is_lambda(n));
    self.node(n).e[1] }

  /// the lambda binding the given param (None while unbound)
  pub fn param_binder(&self, n: NID) -> Option<NID> {
    match self.node(n).data {
      Data::Param { binder: 0 } => None,
      Data::Param { binder } => Some(NID::new(binder)),
      _ => panic!("param_binder of non-param") }}

  pub fn lambda_static_rho(&self, n: NID) -> Option<&[(NID, NID)]> {
    match &self.node(n).data {
      Data::Lambda { static_rho, .. } => static_rho.as_deref(),
      _ => panic!("static_rho of non-lambda") }}

  pub fn lambda_set_static_rho(&mut self, n: NID, rho: Vec<(NID, NID)>) {
    match &mut self.node_mut(n.idx()).data {
      Data::Lambda { static_rho, .. } => *static_rho = Some(rho),
      _ => panic!("static_rho of non-lambda") }}

  pub fn slice_bounds(&self, n: NID) -> (u32, u32) { self.node(n).slice_bounds() }

} // impl BvBase

include!("test-base.rs");
