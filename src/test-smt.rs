// printer test suite (included at the bottom of smt.rs)

#[cfg(test)]
mod test_smt {
  use super::*;
  use crate::opt::Opts;

  fn b() -> BvBase { BvBase::new(Opts::default()) }

  fn dump_string(base: &BvBase) -> String {
    let mut out = vec![];
    dump(base, &mut out).unwrap();
    String::from_utf8(out).unwrap() }

  #[test] fn test_empty_dump() {
    let base = b();
    let out = dump_string(&base);
    assert_eq!(out, "(set-logic QF_BV)\n(assert true)\n(check-sat)\n(exit)\n"); }

  #[test] fn test_dump_shape() {
    let mut base = b();
    let x = base.bv_var(8, Some("x"));
    let y = base.bv_var(8, Some("y"));
    let r = base.ult(x, y);
    base.assert_constraint(r);
    let out = dump_string(&base);
    assert!(out.starts_with("(set-logic QF_BV)\n"));
    assert!(out.contains("(declare-fun x () (_ BitVec 8))\n"));
    assert!(out.contains("(declare-fun y () (_ BitVec 8))\n"));
    assert!(out.contains("(assert (bvult x y))\n"));
    assert!(out.ends_with("(check-sat)\n(exit)\n"));
    // declarations come out in id order
    assert!(out.find("declare-fun x").unwrap() < out.find("declare-fun y").unwrap()); }

  #[test] fn test_dump_deterministic_shared() {
    let mut base = b();
    let x = base.bv_var(8, Some("x"));
    let y = base.bv_var(8, Some("y"));
    let a1 = base.add(x, y);
    let a2 = base.add(y, x);
    assert_eq!(a1, a2);
    let r = base.bv_eq(a1, a2);
    base.assert_constraint(r);
    let out1 = dump_string(&base);
    let out2 = dump_string(&base);
    assert_eq!(out1, out2, "dumps must be byte-identical");
    assert_eq!(out1.matches("(assert ").count(), 1);
    assert_eq!(out1.matches("(bvadd x y)").count(), 1,
               "the sum is emitted once and shared by name"); }

  #[test] fn test_shared_term_define_fun() {
    let mut base = b();
    let x = base.bv_var(8, None);
    let y = base.bv_var(8, None);
    let s = base.add(x, y);
    let k = base.bv_const(BV::from_u64(10, 8));
    let r1 = base.ult(s, k);
    let r2 = base.ult(k, s);
    base.assert_constraint(r1);
    base.assert_constraint(r2);
    let out = dump_string(&base);
    assert_eq!(out.matches("(define-fun $e").count(), 1);
    assert_eq!(out.matches("(bvadd ").count(), 1);
    assert_eq!(out.matches("(assert ").count(), 2); }

  #[test] fn test_distinct_wrapper() {
    let mut base = b();
    let v = base.bv_var(1, Some("b"));
    base.assert_constraint(v);
    let out = dump_string(&base);
    assert!(out.contains("(assert (distinct b #b0))"), "got: {}", out); }

  #[test] fn test_not_on_boolean() {
    let mut base = b();
    let x = base.bv_var(4, None);
    let y = base.bv_var(4, None);
    let q = base.bv_eq(x, y);
    base.assert_constraint(!q);
    let out = dump_string(&base);
    assert!(out.contains("(assert (not (= "), "got: {}", out); }

  #[test] fn test_and_flattening() {
    let mut base = b();
    let k = base.bv_const(BV::from_u64(2, 4));
    let xs: Vec<NID> = (0..3).map(|_| base.bv_var(4, None)).collect();
    let eqs: Vec<NID> = xs.iter().map(|&x| base.bv_eq(x, k)).collect();
    let a = base.and(eqs[0], eqs[1]);
    let r = base.and(a, eqs[2]);
    base.assert_constraint(r);
    let out = dump_string(&base);
    assert_eq!(out.matches("(and ").count(), 1, "chain flattens: {}", out);
    assert_eq!(out.matches("(= ").count(), 3); }

  #[test] fn test_bool_in_bitvec_context() {
    let mut base = b();
    let x = base.bv_var(4, None);
    let y = base.bv_var(4, None);
    let q = base.bv_eq(x, y);     // boolean
    let z = base.bv_var(1, None);
    let s = base.add(q, z);       // q used as a bit-vector
    let t = base.true_nid();
    let r = base.bv_eq(s, t);
    base.assert_constraint(r);
    let out = dump_string(&base);
    assert!(out.contains("(ite (= "), "bool operand wrapped in ite: {}", out);
    assert!(out.contains(" #b1 #b0)"), "got: {}", out); }

  #[test] fn test_ite_condition_stays_boolean() {
    let mut base = b();
    let x = base.bv_var(8, None);
    let y = base.bv_var(8, None);
    let c = base.ult(x, y);
    let ite = base.cond(c, x, y);
    let k = base.bv_const(BV::from_u64(12, 8));
    let r = base.bv_eq(ite, k);
    base.assert_constraint(r);
    let out = dump_string(&base);
    assert!(out.contains("(ite (bvult "), "got: {}", out); }

  #[test] fn test_shift_zero_extends_count() {
    let mut base = b();
    let x = base.bv_var(8, None);
    let s = base.bv_var(3, None);
    let e = base.sll(x, s);
    let k = base.bv_const(BV::from_u64(8, 8));
    let r = base.bv_eq(e, k);
    base.assert_constraint(r);
    let out = dump_string(&base);
    assert!(out.contains("(bvshl "), "got: {}", out);
    assert!(out.contains("((_ zero_extend 5) "), "got: {}", out); }

  #[test] fn test_extract_indexed() {
    let mut base = b();
    let x = base.bv_var(8, None);
    let e = base.slice(x, 5, 2);
    let k = base.bv_const(BV::from_u64(2, 4));
    let r = base.bv_eq(e, k);
    base.assert_constraint(r);
    let out = dump_string(&base);
    assert!(out.contains("((_ extract 5 2) "), "got: {}", out); }

  #[test] fn test_number_formats() {
    for (fmt, expect) in [
      (NumFormat::Bin, "#b11000011"),
      (NumFormat::Hex, "#xc3"),
      (NumFormat::Dec, "(_ bv195 8)") ] {
      let mut opts = Opts::default();
      opts.output_number_format = fmt;
      let mut base = BvBase::new(opts);
      let x = base.bv_var(8, None);
      let k = base.bv_const(BV::from_u64(0xc3, 8));
      let r = base.bv_eq(x, k);
      base.assert_constraint(r);
      let out = dump_string(&base);
      assert!(out.contains(expect), "format {:?}: {}", fmt, out) }}

  #[test] fn test_uf_dump() {
    let mut base = b();
    let g = base.uf(vec![8], 1, Some("g"));
    let x = base.bv_var(8, Some("x"));
    let args = base.args(&[x]);
    let app = base.apply(g, args);
    base.assert_constraint(app);
    let out = dump_string(&base);
    assert!(out.starts_with("(set-logic QF_UFBV)\n"));
    assert!(out.contains("(declare-fun g ((_ BitVec 8)) (_ BitVec 1))\n"), "got: {}", out);
    assert!(out.contains("(g x)"), "got: {}", out); }

  #[test] fn test_lambda_dump() {
    let mut base = b();
    let p = base.param(8, Some("p"));
    let one = base.bv_const(BV::one(8));
    let body = base.add(p, one);
    let f = base.lambda(p, body);
    let x = base.bv_var(8, Some("x"));
    let args = base.args(&[x]);
    let app = base.apply(f, args);
    let k = base.bv_const(BV::from_u64(7, 8));
    let r = base.bv_eq(app, k);
    base.assert_constraint(r);
    let out = dump_string(&base);
    assert!(out.contains("(define-fun f1 ((p (_ BitVec 8))) (_ BitVec 8) (bvadd p #b00000001))"),
            "got: {}", out);
    assert!(out.contains("(f1 x)"), "got: {}", out);
    assert!(out.starts_with("(set-logic QF_BV)"), "lambdas alone stay in QF_BV"); }

  #[test] fn test_curried_lambda_signature() {
    let mut base = b();
    let p1 = base.param(8, Some("a"));
    let p2 = base.param(8, Some("c"));
    let inner_body = base.add(p1, p2);
    let inner = base.lambda(p2, inner_body);
    let f = base.lambda(p1, inner);
    let x = base.bv_var(8, None);
    let y = base.bv_var(8, None);
    let args = base.args(&[x, y]);
    let app = base.apply(f, args);
    let k = base.bv_const(BV::from_u64(3, 8));
    let r = base.bv_eq(app, k);
    base.assert_constraint(r);
    let out = dump_string(&base);
    assert!(out.contains("((a (_ BitVec 8)) (c (_ BitVec 8)))"),
            "curried params are zipped into one signature: {}", out); }

  #[test] fn test_dump_node_depth_limit() {
    let mut base = b();
    let x = base.bv_var(8, Some("x"));
    let y = base.bv_var(8, Some("y"));
    let m = base.mul(x, y);
    let k = base.bv_const(BV::from_u64(4, 8));
    let e = base.add(m, k);
    let mut out = vec![];
    dump_node(&base, e, 1, &mut out).unwrap();
    let s = String::from_utf8(out).unwrap();
    assert!(s.contains("(bvadd "), "got: {}", s);
    assert!(s.contains("bvmul_"), "truncated below depth 1: {}", s);
    let mut out = vec![];
    dump_node(&base, e, 0, &mut out).unwrap();
    let s = String::from_utf8(out).unwrap();
    assert!(s.contains("(bvmul x y)"), "got: {}", s); }

  #[test] fn test_dump_node_var() {
    let mut base = b();
    let x = base.bv_var(8, Some("x"));
    let mut out = vec![];
    dump_node(&base, x, 0, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "(declare-fun x () (_ BitVec 8))\n"); }

  #[test] fn test_pretty_print_renumbering() {
    let mut opts = Opts::default();
    opts.pretty_print = true;
    let mut base = BvBase::new(opts);
    let x = base.bv_var(8, None);
    let y = base.bv_var(8, None);
    let s = base.add(x, y);
    let k = base.bv_const(BV::from_u64(10, 8));
    let r1 = base.ult(s, k);
    let r2 = base.ult(k, s);
    base.assert_constraint(r1);
    base.assert_constraint(r2);
    let out = dump_string(&base);
    // pretty ids are dense from 1 regardless of internal ids
    assert!(out.contains("(declare-fun v1 "), "got: {}", out);
    assert!(out.contains("(declare-fun v2 "), "got: {}", out);
    assert!(out.contains("(define-fun $e3 "), "got: {}", out); }
}
