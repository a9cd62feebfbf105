//! SMT-LIB v2 output.
//!
//! A dump walks the DAG once to compute per-node reference counts and
//! boolean-ness, declares inputs, defines globally shared terms and
//! functions, and emits one assert per root. Output is deterministic:
//! every list is sorted by id before emission. Bool/bitvec coercions
//! are inserted on the fly (`(ite b #b1 #b0)` and `(= #b1 t)`).
use std::io::{self, Write};
use fxhash::{FxHashMap, FxHashSet};
use crate::base::BvBase;
use crate::bv::BV;
use crate::nid::NID;
use crate::node::{Kind, Sort};
use crate::opt::NumFormat;

fn kind_smt_name(kind: Kind) -> &'static str {
  match kind {
    Kind::BvConst => "const", Kind::BvVar => "var", Kind::Param => "param",
    Kind::Uf => "uf", Kind::Slice => "extract", Kind::And => "bvand",
    Kind::BvEq | Kind::FunEq => "=", Kind::Add => "bvadd", Kind::Mul => "bvmul",
    Kind::Ult => "bvult", Kind::Sll => "bvshl", Kind::Srl => "bvlshr",
    Kind::Udiv => "bvudiv", Kind::Urem => "bvurem", Kind::Concat => "concat",
    Kind::Cond => "ite", Kind::Lambda => "lambda", Kind::Apply => "apply",
    Kind::Args => "args", Kind::Proxy => "proxy" }}

struct Frame {
  exp: NID,
  expect_bv: bool,
  expect_bool: bool,
  add_space: bool,
  zero_ext: u32,
  depth: u32,
  open: bool }

struct DumpCtx<'a, W: Write> {
  base: &'a BvBase,
  out: &'a mut W,
  /// node id -> dump reference count
  dump: FxHashMap<u32, i32>,
  dumped: FxHashSet<u32>,
  boolean: FxHashSet<u32>,
  idtab: FxHashMap<u32, i32>,
  roots: Vec<NID>,
  const_cache: FxHashMap<BV, String>,
  maxid: i32,
  open_lets: u32 }

impl<'a, W: Write> DumpCtx<'a, W> {

  fn new(base: &'a BvBase, out: &'a mut W) -> Self {
    DumpCtx {
      base, out,
      dump: FxHashMap::default(),
      dumped: FxHashSet::default(),
      boolean: FxHashSet::default(),
      idtab: FxHashMap::default(),
      roots: vec![],
      const_cache: FxHashMap::default(),
      maxid: 1,
      open_lets: 0 }}

  fn add_root(&mut self, root: NID) {
    let root = self.base.chase(root);
    if !self.roots.contains(&root) { self.roots.push(root) }}

  fn is_boolean(&self, n: NID) -> bool { self.boolean.contains(&n.id()) }

  fn smt_id(&mut self, n: NID) -> i32 {
    if self.base.opts.pretty_print {
      if let Some(&i) = self.idtab.get(&n.id()) { return i }
      let i = self.maxid;
      self.maxid += 1;
      self.idtab.insert(n.id(), i);
      return i }
    if let Some(i) = self.base.extern_id(n) { return i }
    n.id() as i32 }

  fn write_smt_id(&mut self, exp: NID) -> io::Result<()> {
    let real = exp.raw();
    let kind = self.base.kind(real);
    let prefix = match kind {
      Kind::BvVar => "v", Kind::Param => "p",
      Kind::Uf => "uf", Kind::Lambda => "f",
      _ => "$e" };
    if matches!(kind, Kind::BvVar | Kind::Param | Kind::Uf | Kind::Lambda) {
      if let Some(sym) = self.base.symbol(real) {
        if !sym.starts_with(|c: char| c.is_ascii_digit()) {
          return write!(self.out, "{}", sym) }}}
    let id = self.smt_id(real);
    write!(self.out, "{}{}", prefix, id) }

  /// constants render once; decimal and hex conversions are cached
  fn write_const(&mut self, bits: &BV) -> io::Result<()> {
    match self.base.opts.output_number_format {
      NumFormat::Dec => {
        if !self.const_cache.contains_key(bits) {
          self.const_cache.insert(bits.clone(), bits.to_dec_string()); }
        let val = &self.const_cache[bits];
        write!(self.out, "(_ bv{} {})", val, bits.width()) }
      NumFormat::Hex if bits.width() % 4 == 0 => {
        if !self.const_cache.contains_key(bits) {
          self.const_cache.insert(bits.clone(), bits.to_hex_string()); }
        let val = &self.const_cache[bits];
        write!(self.out, "#x{}", val) }
      _ => write!(self.out, "#b{}", bits.to_bin_string()) }}

  fn write_sort(&mut self, sort: &Sort) -> io::Result<()> {
    match sort {
      Sort::Bv(w) => write!(self.out, "(_ BitVec {})", w),
      Sort::Fun { domain, codomain } => {
        write!(self.out, "(")?;
        for (i, w) in domain.iter().enumerate() {
          if i > 0 { write!(self.out, " ")? }
          write!(self.out, "(_ BitVec {})", w)? }
        write!(self.out, ") (_ BitVec {})", codomain) }
      Sort::Tuple(_) => panic!("argument tuples have no printable sort") }}

  /// boolean marking, children before parents (ids ascending)
  fn mark_boolean(&mut self, all: &[u32]) {
    for &id in all {
      let n = NID::new(id);
      let node = self.base.node(n);
      match node.kind {
        Kind::BvEq | Kind::FunEq | Kind::Ult => { self.boolean.insert(id); }
        Kind::BvConst if n == self.base.false_nid().raw() => {
          self.boolean.insert(id); }
        Kind::Apply => {
          let fun = node.e[0];
          let is_bool = match self.base.kind(fun) {
            Kind::Lambda => {
              let body = self.chain_body(fun);
              self.is_boolean(body.raw()) }
            Kind::Uf => matches!(self.base.sort(fun),
                                 Sort::Fun { codomain: 1, .. }),
            _ => false };
          if is_bool { self.boolean.insert(id); }}
        Kind::And | Kind::Cond if matches!(node.sort, Sort::Bv(1)) => {
          if node.children().iter().all(|c| self.is_boolean(c.raw())) {
            self.boolean.insert(id); }}
        _ => {}}}}

  /// innermost body of a (possibly curried) lambda chain
  fn chain_body(&self, fun: NID) -> NID {
    let mut cur = fun;
    loop {
      let body = self.base.lambda_body(cur);
      if !body.is_inv() && self.base.is_lambda(body) { cur = body }
      else { return body }}}

  fn lambda_chain(&self, fun: NID) -> Vec<NID> {
    let mut chain = vec![fun];
    let mut cur = fun;
    loop {
      let body = self.base.lambda_body(cur);
      if !body.is_inv() && self.base.is_lambda(body) {
        chain.push(body);
        cur = body }
      else { return chain }}}

  /// dump reference count: root uses plus non-args parent edges
  fn get_references(&self, exp: NID) -> i32 {
    let real = exp.raw();
    let mut refs = 0;
    for &r in &self.roots {
      if r.raw() == real { refs += 1 }}
    for &(p, _) in self.base.parents(real) {
      if self.dump.contains_key(&p) && self.base.kind(NID::new(p)) != Kind::Args {
        refs += 1 }}
    refs }

  /// flatten a chain of boolean ands into its n-ary children
  fn collect_and_children(&mut self, exp: NID) -> Vec<NID> {
    assert!(self.base.is_and(exp.raw()));
    let mut children = vec![];
    let mut cache: FxHashSet<i64> = FxHashSet::default();
    let mut queue: std::collections::VecDeque<NID> =
      self.base.node(exp.raw()).children().iter().copied().collect();
    while let Some(cur) = queue.pop_front() {
      let real = cur.raw();
      let skip = !cache.insert(cur.sid());
      let shared = !skip && self.dump.get(&real.id()).map_or(false, |&r| r > 1);
      if !self.base.is_and(real) || shared || cur.is_inv() || skip {
        if !skip { children.push(cur) }
        continue }
      self.dumped.insert(real.id());
      for &c in self.base.node(real).children() { queue.push_back(c) }}
    children.sort_unstable_by_key(|c| (c.idx(), c.is_inv()));
    children }

  fn close_wrapper(&mut self, frame: &Frame, is_bool: bool) -> io::Result<()> {
    let real = frame.exp.raw();
    let is_const = self.base.is_const(real);
    if is_bool && frame.expect_bv && !is_const {
      // bool term in bitvec context: finish the ite wrapper
      write!(self.out, " ")?;
      self.write_const(&BV::one(1))?;
      write!(self.out, " ")?;
      self.write_const(&BV::zeros(1))?;
      write!(self.out, ")")? }
    if frame.exp.is_inv() && !is_const { write!(self.out, ")")? }
    if frame.expect_bool && !is_bool { write!(self.out, ")")? }
    if frame.zero_ext > 0 { write!(self.out, ")")? }
    Ok(()) }

  /// The workhorse: iteratively dump one expression, inserting
  /// coercions where the expected and actual sorts disagree.
  fn rec_dump(&mut self, exp: NID, expect_bv: bool, depth_limit: u32) -> io::Result<()> {
    debug_assert!(self.dump.contains_key(&exp.id()));
    let mut stack = vec![Frame {
      exp, expect_bv, expect_bool: false,
      add_space: false, zero_ext: 0, depth: 0, open: false }];
    while let Some(frame) = stack.pop() {
      let real = frame.exp.raw();
      let node = self.base.node(real);
      let is_bool = self.is_boolean(real);

      if frame.open {
        // close the s-expression opened by the first visit
        self.dumped.insert(real.id());
        if node.arity > 0 { write!(self.out, ")")? }
        self.close_wrapper(&frame, is_bool)?;
        continue }

      if frame.add_space { write!(self.out, " ")? }
      if frame.zero_ext > 0 {
        write!(self.out, "((_ zero_extend {}) ", frame.zero_ext)? }

      // constants are always printed in place
      if node.kind == Kind::BvConst {
        if frame.exp == self.base.true_nid() && !frame.expect_bv {
          write!(self.out, "true")? }
        else if frame.exp == self.base.false_nid() && !frame.expect_bv {
          write!(self.out, "false")? }
        else if frame.exp.is_inv() { let b = node.invbits().clone(); self.write_const(&b)? }
        else { let b = node.bits().clone(); self.write_const(&b)? }
        if frame.zero_ext > 0 { write!(self.out, ")")? }
        continue }

      if frame.expect_bool && !is_bool {
        write!(self.out, "(= ")?;
        self.write_const(&BV::one(1))?;
        write!(self.out, " ")? }
      if frame.exp.is_inv() {
        write!(self.out, "{}",
               if frame.expect_bv || !is_bool { "(bvnot " } else { "(not " })? }
      if is_bool && frame.expect_bv { write!(self.out, "(ite ")? }

      // reference already-emitted terms by name; applies are never
      // shared and re-dump inline at every occurrence
      if (self.dumped.contains(&real.id()) && node.kind != Kind::Apply)
        || matches!(node.kind, Kind::Lambda | Kind::Uf) {
        self.write_smt_id(frame.exp)?;
        self.close_wrapper(&frame, is_bool)?;
        continue }

      if depth_limit > 0 && frame.depth >= depth_limit {
        write!(self.out, "{}_{}", kind_smt_name(node.kind), real.idx())?;
        self.close_wrapper(&frame, is_bool)?;
        continue }

      let depth = frame.depth;
      stack.push(Frame { open: true, ..frame });

      match node.kind {
        Kind::Sll | Kind::Srl => {
          let op = if node.kind == Kind::Srl { "bvlshr" } else { "bvshl" };
          // the shift amount is zero-extended up to the data width
          let pad = node.width() - self.base.width(node.e[1]);
          stack.push(Frame { exp: node.e[1], expect_bv: true, expect_bool: false,
                             add_space: true, zero_ext: pad, depth: depth + 1, open: false });
          stack.push(Frame { exp: node.e[0], expect_bv: true, expect_bool: false,
                             add_space: true, zero_ext: 0, depth: depth + 1, open: false });
          write!(self.out, "({}", op)? }
        Kind::Cond => {
          for i in [2usize, 1] {
            stack.push(Frame { exp: node.e[i], expect_bv: !is_bool, expect_bool: false,
                               add_space: true, zero_ext: 0, depth: depth + 1, open: false }) }
          stack.push(Frame { exp: node.e[0], expect_bv: false, expect_bool: true,
                             add_space: true, zero_ext: 0, depth: depth + 1, open: false });
          write!(self.out, "(ite")? }
        Kind::Apply => {
          let leaves = self.base.args_leaves(node.e[1]);
          for &arg in leaves.iter().rev() {
            stack.push(Frame { exp: arg, expect_bv: true, expect_bool: false,
                               add_space: true, zero_ext: 0, depth: depth + 1, open: false }) }
          stack.push(Frame { exp: node.e[0], expect_bv: true, expect_bool: false,
                             add_space: false, zero_ext: 0, depth: depth + 1, open: false });
          write!(self.out, "(")? }
        Kind::Slice => {
          let (u, l) = node.slice_bounds();
          stack.push(Frame { exp: node.e[0], expect_bv: true, expect_bool: false,
                             add_space: true, zero_ext: 0, depth: depth + 1, open: false });
          write!(self.out, "((_ extract {} {})", u, l)? }
        _ => {
          let op = match node.kind {
            Kind::FunEq | Kind::BvEq => "=",
            Kind::Ult => "bvult",
            Kind::And => if is_bool { "and" } else { "bvand" },
            Kind::Add => "bvadd",
            Kind::Mul => "bvmul",
            Kind::Udiv => "bvudiv",
            Kind::Urem => "bvurem",
            Kind::Concat => "concat",
            other => panic!("cannot dump {:?} node", other) };
          let expect = !(node.kind == Kind::And && is_bool);
          if node.kind == Kind::And && is_bool {
            // flatten boolean and-chains into one n-ary and
            let children = self.collect_and_children(frame.exp);
            for &c in children.iter().rev() {
              stack.push(Frame { exp: c, expect_bv: false, expect_bool: false,
                                 add_space: true, zero_ext: 0, depth: depth + 1, open: false }) }
          } else {
            for i in (0..node.arity as usize).rev() {
              stack.push(Frame { exp: node.e[i], expect_bv: expect, expect_bool: false,
                                 add_space: true, zero_ext: 0, depth: depth + 1, open: false }) }}
          write!(self.out, "({}", op)? }}}
    Ok(()) }

  fn dump_let(&mut self, exp: NID) -> io::Result<()> {
    debug_assert!(!self.dumped.contains(&exp.id()));
    write!(self.out, "(let ((")?;
    self.write_smt_id(exp)?;
    write!(self.out, " ")?;
    let expect_bv = !self.is_boolean(exp.raw());
    self.rec_dump(exp, expect_bv, 0)?;
    write!(self.out, "))")?;
    self.open_lets += 1;
    self.dumped.insert(exp.id());
    Ok(()) }

  /// `(define-fun $eN () S <term>)` for a globally shared term
  fn dump_fun_let(&mut self, exp: NID) -> io::Result<()> {
    let is_bool = self.is_boolean(exp.raw());
    write!(self.out, "(define-fun ")?;
    self.write_smt_id(exp)?;
    write!(self.out, " () ")?;
    if is_bool { write!(self.out, "Bool")? }
    else { let sort = self.base.sort(exp.raw()).clone(); self.write_sort(&sort)? }
    write!(self.out, " ")?;
    self.rec_dump(exp, !is_bool, 0)?;
    writeln!(self.out, ")")?;
    self.dumped.insert(exp.id());
    Ok(()) }

  /// `(define-fun f ((p1 T1) ...) R <body>)`; curried lambdas are
  /// zipped into one signature, shared parameterized sub-terms are
  /// let-bound inside the body.
  fn dump_fun(&mut self, fun: NID) -> io::Result<()> {
    debug_assert!(self.base.is_lambda(fun));
    debug_assert!(!self.base.is_parameterized(fun));
    let body = self.chain_body(fun);

    // collect shared parameterized expressions in the function body
    let mut mark: FxHashSet<u32> = FxHashSet::default();
    let mut shared: Vec<NID> = vec![];
    let mut visit = vec![body];
    while let Some(cur) = visit.pop() {
      let real = cur.raw();
      if mark.contains(&real.id()) || self.dumped.contains(&real.id())
        || self.base.is_lambda(real) { continue }
      mark.insert(real.id());
      let node = self.base.node(real);
      let refs = self.dump.get(&real.id()).copied().unwrap_or(0);
      if !matches!(node.kind, Kind::Args | Kind::Param | Kind::BvConst)
        && node.parameterized && refs > 1 {
        shared.push(real) }
      for &c in node.children() { visit.push(c) }}

    write!(self.out, "(define-fun ")?;
    self.write_smt_id(fun)?;
    write!(self.out, " (")?;
    let chain = self.lambda_chain(fun);
    for (i, &cur) in chain.iter().enumerate() {
      let param = self.base.lambda_param(cur);
      mark.insert(cur.id());
      mark.insert(param.id());
      self.dumped.insert(cur.id());
      self.dumped.insert(param.id());
      if i > 0 { write!(self.out, " ")? }
      write!(self.out, "(")?;
      self.write_smt_id(param)?;
      write!(self.out, " ")?;
      let sort = self.base.sort(param).clone();
      self.write_sort(&sort)?;
      write!(self.out, ")")? }
    write!(self.out, ") ")?;
    if self.is_boolean(body.raw()) { write!(self.out, "Bool")? }
    else { let sort = self.base.sort(body.raw()).clone(); self.write_sort(&sort)? }
    write!(self.out, " ")?;

    debug_assert_eq!(self.open_lets, 0);
    shared.sort_unstable_by_key(|n| n.idx());
    for &cur in &shared {
      self.dump_let(cur)?;
      write!(self.out, " ")? }
    let expect_bv = !self.is_boolean(body.raw());
    self.rec_dump(body, expect_bv, 0)?;
    for _ in 0..self.open_lets { write!(self.out, ")")? }
    self.open_lets = 0;
    writeln!(self.out, ")")?;

    // lambda hashing may share a lambda of this chain with another
    // not-yet-dumped function; everything below it must then be
    // re-emitted in that function's own scope.
    for &cur in &chain {
      let mut shared_parent = false;
      for &(p, _) in self.base.parents(cur) {
        let pn = NID::new(p);
        if self.dump.contains_key(&p) && !self.dumped.contains(&p)
          && self.base.is_lambda(pn) {
          shared_parent = true;
          break }}
      if !shared_parent { continue }
      let mut visit = vec![cur];
      while let Some(c) = visit.pop() {
        let real = c.raw();
        let node = self.base.node(real);
        if !node.parameterized
          && (!mark.contains(&real.id()) || !self.dumped.contains(&real.id())) {
          continue }
        self.dumped.remove(&real.id());
        for &cc in node.children() { visit.push(cc) }}}
    Ok(()) }

  fn dump_declare_fun(&mut self, exp: NID) -> io::Result<()> {
    debug_assert!(!self.dumped.contains(&exp.id()));
    write!(self.out, "(declare-fun ")?;
    self.write_smt_id(exp)?;
    write!(self.out, " ")?;
    if self.base.is_var(exp) { write!(self.out, "() ")? }
    let sort = self.base.sort(exp).clone();
    self.write_sort(&sort)?;
    writeln!(self.out, ")")?;
    self.dumped.insert(exp.id());
    Ok(()) }

  fn dump_assert(&mut self, exp: NID) -> io::Result<()> {
    debug_assert_eq!(self.base.width(exp), 1);
    write!(self.out, "(assert ")?;
    let is_bool = self.is_boolean(exp.raw());
    if !is_bool { write!(self.out, "(distinct ")? }
    self.rec_dump(exp, false, 0)?;
    if !is_bool { write!(self.out, " #b0)")? }
    writeln!(self.out, ")")?;
    Ok(()) }

  fn dump(&mut self) -> io::Result<()> {
    // collect every node reachable from the roots
    let mut visit: Vec<NID> = self.roots.iter().map(|r| r.raw()).collect();
    let mut all: Vec<u32> = vec![];
    let mut vars: Vec<u32> = vec![];
    let mut ufs: Vec<u32> = vec![];
    let mut shared: Vec<u32> = vec![];
    while let Some(cur) = visit.pop() {
      let real = cur.raw();
      if self.dump.contains_key(&real.id()) { continue }
      self.dump.insert(real.id(), 0);
      all.push(real.id());
      let node = self.base.node(real);
      match node.kind {
        Kind::BvVar => vars.push(real.id()),
        Kind::Uf => ufs.push(real.id()),
        Kind::Lambda if !node.parameterized
          && !self.base.parents(real).iter().all(|&(p, _)| {
               self.base.kind(NID::new(p)) == Kind::Lambda })
          => shared.push(real.id()),
        _ => {}}
      for &c in node.children() { visit.push(c.raw()) }}

    // reference counts; uses through args tuples count for the leaves
    all.sort_unstable();
    for &id in &all {
      let refs = self.get_references(NID::new(id));
      self.dump.insert(id, refs);
      if self.base.kind(NID::new(id)) == Kind::Args && refs > 0 {
        for leaf in self.base.args_leaves(NID::new(id)) {
          *self.dump.get_mut(&leaf.id()).expect("arg leaf not collected") += refs }}}

    // globally shared terms become define-funs
    for &id in &all {
      let n = NID::new(id);
      let node = self.base.node(n);
      let refs = self.dump[&id];
      if refs <= 1
        || node.parameterized
        || matches!(node.kind,
                    Kind::Param | Kind::BvConst | Kind::BvVar | Kind::Lambda
                    | Kind::Uf | Kind::Apply | Kind::Args) {
        continue }
      shared.push(id) }

    self.mark_boolean(&all);

    if ufs.is_empty() { writeln!(self.out, "(set-logic QF_BV)")? }
    else { writeln!(self.out, "(set-logic QF_UFBV)")? }

    vars.sort_unstable();
    for &id in &vars { self.dump_declare_fun(NID::new(id))? }
    ufs.sort_unstable();
    for &id in &ufs { self.dump_declare_fun(NID::new(id))? }

    shared.sort_unstable();
    for &id in &shared {
      let n = NID::new(id);
      if self.dumped.contains(&id) { continue }
      debug_assert!(!self.base.is_parameterized(n));
      if self.base.is_lambda(n) { self.dump_fun(n)? }
      else { self.dump_fun_let(n)? }}

    let roots = self.roots.clone();
    for r in roots { self.dump_assert(r)? }
    debug_assert_eq!(self.open_lets, 0);

    writeln!(self.out, "(check-sat)")?;
    writeln!(self.out, "(exit)")?;
    self.out.flush() }
}

/// Dump the whole context: every registered constraint becomes an
/// assert. Without constraints a single `true` is asserted.
pub fn dump<W: Write>(base: &BvBase, out: &mut W) -> io::Result<()> {
  let roots: Vec<NID> = base.constraints().to_vec();
  dump_roots(base, &roots, out) }

pub fn dump_roots<W: Write>(base: &BvBase, roots: &[NID], out: &mut W) -> io::Result<()> {
  let mut ctx = DumpCtx::new(base, out);
  if roots.is_empty() { ctx.add_root(base.true_nid()) }
  for &r in roots { ctx.add_root(r) }
  ctx.dump() }

/// Dump a single expression (debugging aid). Nodes below `depth` print
/// as `kind_id` placeholders; 0 means unlimited.
pub fn dump_node<W: Write>(base: &BvBase, exp: NID, depth: u32, out: &mut W)
                           -> io::Result<()> {
  let real = base.chase(exp);
  if matches!(base.kind(real), Kind::Args | Kind::Param) {
    return writeln!(out, "{}_{}", kind_smt_name(base.kind(real)), real.idx()) }
  let mut ctx = DumpCtx::new(base, out);
  if base.is_var(real) || base.is_uf(real) {
    return ctx.dump_declare_fun(real.raw()) }
  let mut visit = vec![real.raw()];
  let mut all = vec![];
  while let Some(cur) = visit.pop() {
    let r = cur.raw();
    if ctx.dump.contains_key(&r.id()) { continue }
    if base.is_var(r) || base.is_uf(r)
      || (!base.is_lambda(real) && base.is_param(r)) {
      ctx.dumped.insert(r.id()); }
    ctx.dump.insert(r.id(), 0);
    all.push(r.id());
    for &c in base.node(r).children() { visit.push(c) }}
  all.sort_unstable();
  for &id in &all {
    let refs = ctx.get_references(NID::new(id));
    ctx.dump.insert(id, refs);
    if base.kind(NID::new(id)) == Kind::Args && refs > 0 {
      for leaf in base.args_leaves(NID::new(id)) {
        *ctx.dump.get_mut(&leaf.id()).expect("arg leaf not collected") += refs }}}
  ctx.mark_boolean(&all);
  if base.is_lambda(real) { ctx.dump_fun(real.raw())? }
  else {
    ctx.rec_dump(real, false, depth)?;
    writeln!(ctx.out)? }
  Ok(()) }

include!("test-smt.rs");
