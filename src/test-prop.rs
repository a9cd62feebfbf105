// propagation engine test suite (included at the bottom of prop.rs)

#[cfg(test)]
mod test_prop {
  use super::*;
  use super::score::{hamming_distance, min_flip, min_flip_inv};

  /// call at the top of a failing test to watch the walk
  #[allow(dead_code)]
  fn logging_on() {
    use simplelog::*;
    TermLogger::init(LevelFilter::Trace, Config::default()).unwrap() }

  fn b() -> BvBase { BvBase::new(Opts::default()) }

  fn never() -> impl FnMut() -> bool { || false }

  #[test] fn test_inv_add_round_trip() {
    let mut base = b();
    let v1 = base.bv_var(16, None);
    let v2 = base.bv_var(16, None);
    let e = base.add(v1, v2);
    let mut slv = PropSolver::new(&base);
    let target = BV::zeros(16);
    let o = BV::from_u64(0x1234, 16);
    let r = slv.inv_add(&base, e, &target, &o, 0).unwrap();
    assert_eq!(r.to_u64(), 0xedcc);
    assert_eq!(r.add(&o), target); }

  #[test] fn test_inv_mul_odd_operand() {
    let mut base = b();
    let v1 = base.bv_var(8, None);
    let v2 = base.bv_var(8, None);
    let e = base.mul(v1, v2);
    let mut slv = PropSolver::new(&base);
    let o = BV::from_u64(0b0000_0011, 8);
    let target = BV::from_u64(0b1100_1100, 8);
    let r = slv.inv_mul(&base, e, &target, &o, 0).unwrap();
    assert_eq!(r.mul(&o), target);
    assert_eq!(slv.stats.move_prop_rec_conf, 0); }

  #[test] fn test_inv_mul_even_operand() {
    let mut base = b();
    let v1 = base.bv_var(8, None);
    let v2 = base.bv_var(8, None);
    let e = base.mul(v1, v2);
    let mut slv = PropSolver::new(&base);
    // o = 2^2 * 3; target supplies enough trailing zeros
    let o = BV::from_u64(12, 8);
    let target = BV::from_u64(0b0011_0000, 8);
    let r = slv.inv_mul(&base, e, &target, &o, 1).unwrap();
    assert_eq!(o.mul(&r), target); }

  #[test] fn test_inv_and() {
    let mut base = b();
    let v1 = base.bv_var(8, None);
    let v2 = base.bv_var(8, None);
    let e = base.and(v1, v2);
    let mut slv = PropSolver::new(&base);
    let o = BV::from_u64(0b1111_0000, 8);
    let target = BV::from_u64(0b1001_0000, 8);
    let r = slv.inv_and(&base, e, &target, &o, 1).unwrap();
    assert_eq!(o.and(&r), target);
    // a target bit outside the fixed operand is a recoverable conflict
    let bad = BV::from_u64(0b1000_0001, 8);
    let r = slv.inv_and(&base, e, &bad, &o, 1);
    assert!(r.is_some());
    assert_eq!(slv.stats.move_prop_rec_conf, 1); }

  #[test] fn test_inv_eq() {
    let mut base = b();
    let v1 = base.bv_var(8, None);
    let v2 = base.bv_var(8, None);
    let e = base.bv_eq(v1, v2);
    let mut slv = PropSolver::new(&base);
    let o = BV::from_u64(42, 8);
    let r = slv.inv_eq(&base, e, &BV::from_bool(true), &o, 1).unwrap();
    assert_eq!(r, o);
    let r = slv.inv_eq(&base, e, &BV::from_bool(false), &o, 1).unwrap();
    assert_ne!(r, o); }

  #[test] fn test_inv_ult() {
    let mut base = b();
    let v1 = base.bv_var(4, None);
    let v2 = base.bv_var(4, None);
    let e = base.ult(v1, v2);
    let mut slv = PropSolver::new(&base);
    let o = BV::from_u64(5, 4);
    // o < res
    let r = slv.inv_ult(&base, e, &BV::from_bool(true), &o, 1).unwrap();
    assert!(o < r);
    // res < o
    let r = slv.inv_ult(&base, e, &BV::from_bool(true), &o, 0).unwrap();
    assert!(r < o);
    // !(o < res)
    let r = slv.inv_ult(&base, e, &BV::from_bool(false), &o, 1).unwrap();
    assert!(r <= o);
    // 1...1 < res is a conflict, resolved consistently
    let ones = BV::ones(4);
    assert!(slv.inv_ult(&base, e, &BV::from_bool(true), &ones, 1).is_some());
    assert_eq!(slv.stats.move_prop_rec_conf, 1); }

  #[test] fn test_inv_sll_srl() {
    let mut base = b();
    let v = base.bv_var(8, None);
    let s = base.bv_var(3, None);
    let e = base.sll(v, s);
    let mut slv = PropSolver::new(&base);
    // solve for the shift amount
    let o = BV::from_u64(0b0001_0110, 8);
    let target = BV::from_u64(0b1011_0000, 8);
    let r = slv.inv_sll(&base, e, &target, &o, 1).unwrap();
    assert_eq!(r.to_u64(), 3);
    assert_eq!(o.sll(&r), target);
    // solve for the data operand
    let shift = BV::from_u64(2, 3);
    let target = BV::from_u64(0b0010_1100, 8);
    let r = slv.inv_sll(&base, e, &target, &shift, 0).unwrap();
    assert_eq!(r.sll(&shift), target);
    // shifting out a one is a conflict
    let e2 = base.srl(v, s);
    let bad = BV::ones(8);
    assert!(slv.inv_srl(&base, e2, &bad, &BV::from_u64(1, 3), 0).is_some());
    assert_eq!(slv.stats.move_prop_rec_conf, 1); }

  #[test] fn test_inv_concat() {
    let mut base = b();
    let v1 = base.bv_var(3, None);
    let v2 = base.bv_var(4, None);
    let e = base.concat(v1, v2);
    let mut slv = PropSolver::new(&base);
    let hi = BV::from_u64(0b101, 3);
    let lo = BV::from_u64(0b0011, 4);
    let target = hi.concat(&lo);
    let r = slv.inv_concat(&base, e, &target, &hi, 1).unwrap();
    assert_eq!(r, lo);
    let r = slv.inv_concat(&base, e, &target, &lo, 0).unwrap();
    assert_eq!(r, hi);
    // mismatched fixed side conflicts
    let bad = BV::from_u64(0b111, 3);
    assert!(slv.inv_concat(&base, e, &target, &bad, 1).is_some());
    assert_eq!(slv.stats.move_prop_rec_conf, 1); }

  #[test] fn test_inv_slice() {
    let mut base = b();
    let v = base.bv_var(8, None);
    let e = base.slice(v, 5, 2);
    let mut slv = PropSolver::new(&base);
    let target = BV::from_u64(0b1010, 4);
    let bve = BV::from_u64(0xff, 8);
    let r = slv.inv_slice(&base, e, &target, &bve).unwrap();
    assert_eq!(r.slice(5, 2), target); }

  #[test] fn test_inv_udiv() {
    let mut base = b();
    let v1 = base.bv_var(4, None);
    let v2 = base.bv_var(4, None);
    let e = base.udiv(v1, v2);
    let mut slv = PropSolver::new(&base);
    let o = BV::from_u64(13, 4);
    let target = BV::from_u64(3, 4);
    let r = slv.inv_udiv(&base, e, &target, &o, 1).unwrap();
    assert_eq!(o.udiv(&r), target);
    let r = slv.inv_udiv(&base, e, &target, &BV::from_u64(4, 4), 0).unwrap();
    assert_eq!(r.udiv(&BV::from_u64(4, 4)), target);
    // x / bve < bve is a conflict on the divisor side
    let r = slv.inv_udiv(&base, e, &BV::from_u64(9, 4), &BV::from_u64(5, 4), 1);
    assert!(r.is_some());
    assert_eq!(slv.stats.move_prop_rec_conf, 1); }

  #[test] fn test_inv_urem() {
    let mut base = b();
    let v1 = base.bv_var(4, None);
    let v2 = base.bv_var(4, None);
    let e = base.urem(v1, v2);
    let mut slv = PropSolver::new(&base);
    let o = BV::from_u64(5, 4);
    let target = BV::from_u64(3, 4);
    // res % 5 = 3
    let r = slv.inv_urem(&base, e, &target, &o, 0).unwrap();
    assert_eq!(r.urem(&o), target);
    // 13 % res = 3  ->  res in {5, 10}
    let r = slv.inv_urem(&base, e, &target, &BV::from_u64(13, 4), 1).unwrap();
    assert_eq!(BV::from_u64(13, 4).urem(&r), target);
    // bve < target is a conflict
    let r = slv.inv_urem(&base, e, &target, &BV::from_u64(2, 4), 1);
    assert!(r.is_some());
    assert_eq!(slv.stats.move_prop_rec_conf, 1); }

  #[test] fn test_non_rec_conflict_on_const() {
    let mut base = b();
    base.opts.prop_no_move_on_conflict = true;
    let v = base.bv_var(8, None);
    let k = base.bv_const(BV::from_u64(0b1111_0000, 8));
    let e = base.and(v, k);
    let mut slv = PropSolver::new(&base);
    let o = base.const_val(k).unwrap();
    // target needs a bit the constant operand cannot supply
    let bad = BV::from_u64(1, 8);
    let eidx = if base.child(e, 0) == k { 1 } else { 0 };
    assert!(slv.inv_and(&base, e, &bad, &o, eidx).is_none());
    assert_eq!(slv.stats.move_prop_non_rec_conf, 1); }

  #[test] fn test_score_metrics() {
    assert_eq!(hamming_distance(&BV::from_u64(0b1100, 4), &BV::from_u64(0b1001, 4)), 2);
    assert_eq!(hamming_distance(&BV::from_u64(7, 4), &BV::from_u64(7, 4)), 0);
    assert_eq!(min_flip(&BV::from_u64(0b101, 3), &BV::from_u64(0b010, 3)), 1);
    assert_eq!(min_flip(&BV::from_u64(0b111, 3), &BV::zeros(3)), 3);
    assert_eq!(min_flip_inv(&BV::from_u64(0b001, 3), &BV::from_u64(0b100, 3)), 1); }

  #[test] fn test_score_eq() {
    let mut base = b();
    let x = base.bv_var(4, None);
    let y = base.bv_var(4, None);
    let r = base.bv_eq(x, y);
    base.assert_constraint(r);
    let mut slv = PropSolver::new(&base);
    slv.set_assignment(x, BV::from_u64(0b1100, 4));
    slv.set_assignment(y, BV::from_u64(0b1000, 4));
    slv.generate_model(&base, false);
    slv.compute_scores(&base);
    // one differing bit out of four
    assert_eq!(slv.score_of(r), Some(0.5 * (1.0 - 0.25)));
    assert_eq!(slv.score_of(!r), Some(1.0));
    slv.update_cone(&base, &[(y.id(), BV::from_u64(0b1100, 4))]);
    assert_eq!(slv.score_of(r), Some(1.0));
    assert_eq!(slv.score_of(!r), Some(0.0)); }

  #[test] fn test_score_and_mean() {
    let mut base = b();
    let x = base.bv_var(4, None);
    let y = base.bv_var(4, None);
    let k = base.bv_const(BV::from_u64(0b1100, 4));
    let e1 = base.bv_eq(x, k);
    let e2 = base.bv_eq(y, k);
    let r = base.and(e1, e2);
    base.assert_constraint(r);
    let mut slv = PropSolver::new(&base);
    slv.set_assignment(x, BV::from_u64(0b1100, 4));  // satisfied
    slv.set_assignment(y, BV::from_u64(0b0011, 4));  // h = 4
    slv.generate_model(&base, false);
    slv.compute_scores(&base);
    assert_eq!(slv.score_of(e1), Some(1.0));
    assert_eq!(slv.score_of(e2), Some(0.0));
    assert_eq!(slv.score_of(r), Some(0.5));
    // inverted and is an or: the best branch wins
    assert_eq!(slv.score_of(!r), Some(1.0)); }

  #[test] fn test_cone_update_maintains_roots() {
    let mut base = b();
    let a = base.bv_var(4, Some("a"));
    let v = base.bv_var(4, Some("b"));
    let r = base.ult(a, v);
    base.assert_constraint(r);
    let mut slv = PropSolver::new(&base);
    slv.set_assignment(a, BV::from_u64(3, 4));
    slv.set_assignment(v, BV::from_u64(2, 4));
    slv.generate_model(&base, false);
    slv.compute_scores(&base);
    slv.collect_roots(&base);
    assert_eq!(slv.num_falsified(), 1, "3 < 2 starts out falsified");
    slv.update_cone(&base, &[(a.id(), BV::zeros(4))]);
    assert_eq!(slv.num_falsified(), 0, "0 < 2 satisfies the root");
    slv.update_cone(&base, &[(v.id(), BV::zeros(4))]);
    assert_eq!(slv.num_falsified(), 1, "0 < 0 falsifies it again");
    // the model matches a bottom-up evaluation over the cone
    assert_eq!(slv.assignment(r), Some(&BV::from_bool(false))); }

  #[test] fn test_cone_update_through_shared_node() {
    let mut base = b();
    let x = base.bv_var(8, None);
    let y = base.bv_var(8, None);
    let s = base.add(x, y);
    let k = base.bv_const(BV::from_u64(10, 8));
    let r1 = base.ult(s, k);
    let r2 = base.ult(k, s);
    base.assert_constraint(r1);
    base.assert_constraint(r2);
    let mut slv = PropSolver::new(&base);
    slv.set_assignment(x, BV::from_u64(1, 8));
    slv.set_assignment(y, BV::from_u64(1, 8));
    slv.generate_model(&base, false);
    slv.compute_scores(&base);
    slv.collect_roots(&base);
    assert_eq!(slv.num_falsified(), 1);  // r2: 10 < 2 is false
    slv.update_cone(&base, &[(x.id(), BV::from_u64(20, 8))]);
    // now 21 < 10 is false and 10 < 21 holds
    assert_eq!(slv.num_falsified(), 1);
    assert_eq!(slv.assignment(s), Some(&BV::from_u64(21, 8))); }

  #[test] fn test_step_bound() {
    assert_eq!(PropSolver::step_bound(0), 100);
    assert_eq!(PropSolver::step_bound(1), 100);
    assert_eq!(PropSolver::step_bound(2), 200);
    assert_eq!(PropSolver::step_bound(3), 100);
    assert_eq!(PropSolver::step_bound(4), 400);
    assert_eq!(PropSolver::step_bound(6), 800); }

  #[test] fn test_sat_toy_add() {
    // x + y = 10 over 4 bits, starting from x = y = 0
    let mut base = b();
    base.opts.nprops = 100_000;
    let x = base.bv_var(4, Some("x"));
    let y = base.bv_var(4, Some("y"));
    let s = base.add(x, y);
    let k = base.bv_const(BV::from_u64(0b1010, 4));
    let r = base.bv_eq(s, k);
    base.assert_constraint(r);
    let mut slv = PropSolver::new(&base);
    slv.set_assignment(x, BV::zeros(4));
    slv.set_assignment(y, BV::zeros(4));
    assert_eq!(slv.sat(&base, &mut never()), Status::Sat);
    assert!(slv.stats.moves <= 10, "took {} moves", slv.stats.moves);
    let vx = slv.assignment(x).unwrap().clone();
    let vy = slv.assignment(y).unwrap().clone();
    assert_eq!(vx.add(&vy).to_u64(), 0b1010);
    assert_eq!(slv.num_falsified(), 0); }

  #[test] fn test_sat_ult_chain() {
    let mut base = b();
    base.opts.nprops = 100_000;
    let x = base.bv_var(4, None);
    let y = base.bv_var(4, None);
    let z = base.bv_var(4, None);
    let r1 = base.ult(x, y);
    let r2 = base.ult(y, z);
    base.assert_constraint(r1);
    base.assert_constraint(r2);
    let mut slv = PropSolver::new(&base);
    assert_eq!(slv.sat(&base, &mut never()), Status::Sat);
    let vx = slv.assignment(x).unwrap();
    let vy = slv.assignment(y).unwrap();
    let vz = slv.assignment(z).unwrap();
    assert!(vx < vy && vy < vz); }

  #[test] fn test_sat_mixed_ops() {
    let mut base = b();
    base.opts.nprops = 200_000;
    let x = base.bv_var(8, None);
    let y = base.bv_var(8, None);
    let m = base.mul(x, y);
    let k = base.bv_const(BV::from_u64(0b0010_0001, 8));
    let r1 = base.bv_eq(m, k);
    let s = base.slice(x, 3, 0);
    let k2 = base.bv_const(BV::from_u64(0b1011, 4));
    let r2 = base.bv_eq(s, k2);
    base.assert_constraint(r1);
    base.assert_constraint(r2);
    let mut slv = PropSolver::new(&base);
    assert_eq!(slv.sat(&base, &mut never()), Status::Sat);
    let vx = slv.assignment(x).unwrap().clone();
    let vy = slv.assignment(y).unwrap().clone();
    assert_eq!(vx.mul(&vy).to_u64(), 0b0010_0001);
    assert_eq!(vx.slice(3, 0).to_u64(), 0b1011); }

  #[test] fn test_sat_cond() {
    let mut base = b();
    base.opts.nprops = 100_000;
    let c = base.bv_var(1, None);
    let t = base.bv_var(8, None);
    let e = base.bv_var(8, None);
    let ite = base.cond(c, t, e);
    let k = base.bv_const(BV::from_u64(0x5a, 8));
    let r = base.bv_eq(ite, k);
    base.assert_constraint(r);
    let mut slv = PropSolver::new(&base);
    assert_eq!(slv.sat(&base, &mut never()), Status::Sat);
    let vc = slv.assignment(c).unwrap().clone();
    let picked = if vc.is_true() { t } else { e };
    assert_eq!(slv.assignment(picked).unwrap().to_u64(), 0x5a); }

  #[test] fn test_sat_assumption() {
    let mut base = b();
    base.opts.nprops = 100_000;
    let x = base.bv_var(4, None);
    let k = base.bv_const(BV::from_u64(0b0110, 4));
    let r = base.bv_eq(x, k);
    base.assume(r);
    let mut slv = PropSolver::new(&base);
    assert_eq!(slv.sat(&base, &mut never()), Status::Sat);
    assert_eq!(slv.assignment(x).unwrap().to_u64(), 0b0110); }

  #[test] fn test_unsat_const_root() {
    let mut base = b();
    let f = base.false_nid();
    base.assert_constraint(f);
    let mut slv = PropSolver::new(&base);
    assert_eq!(slv.sat(&base, &mut never()), Status::Unsat); }

  #[test] fn test_terminate_polled() {
    let mut base = b();
    let x = base.bv_var(4, None);
    let y = base.bv_var(4, None);
    let r = base.ult(x, y);
    base.assert_constraint(r);
    let mut slv = PropSolver::new(&base);
    assert_eq!(slv.sat(&base, &mut || true), Status::Unknown);
    assert_eq!(slv.stats.moves, 0, "termination precedes the first move"); }

  #[test] fn test_prop_budget_gives_unknown() {
    // x < y and y < x cannot be satisfied; the engine gives up
    let mut base = b();
    base.opts.nprops = 2000;
    let x = base.bv_var(4, None);
    let y = base.bv_var(4, None);
    let r1 = base.ult(x, y);
    let r2 = base.ult(y, x);
    base.assert_constraint(r1);
    base.assert_constraint(r2);
    let mut slv = PropSolver::new(&base);
    assert_eq!(slv.sat(&base, &mut never()), Status::Unknown);
    assert!(slv.stats.props >= 2000); }

  #[test] fn test_seed_determinism() {
    let run = || {
      let mut base = b();
      base.opts.seed = 7;
      base.opts.nprops = 100_000;
      let x = base.bv_var(8, None);
      let y = base.bv_var(8, None);
      let s = base.add(x, y);
      let k = base.bv_const(BV::from_u64(0x42, 8));
      let r = base.bv_eq(s, k);
      base.assert_constraint(r);
      let mut slv = PropSolver::new(&base);
      assert_eq!(slv.sat(&base, &mut never()), Status::Sat);
      (slv.assignment(x).unwrap().clone(), slv.stats.moves) };
    assert_eq!(run(), run()); }

  #[cfg(feature = "slowtests")]
  #[test] fn test_sat_wide_mixed() {
    let mut base = b();
    base.opts.nprops = 2_000_000;
    let x = base.bv_var(32, None);
    let y = base.bv_var(32, None);
    let s = base.add(x, y);
    let m = base.mul(x, y);
    let k1 = base.bv_const(BV::from_u64(0xdead_beef, 32));
    let r1 = base.bv_eq(s, k1);
    let r2 = base.ult(m, s);
    base.assert_constraint(r1);
    base.assert_constraint(r2);
    let mut slv = PropSolver::new(&base);
    assert_eq!(slv.sat(&base, &mut never()), Status::Sat);
    let vx = slv.assignment(x).unwrap().clone();
    let vy = slv.assignment(y).unwrap().clone();
    assert_eq!(vx.add(&vy).to_u64(), 0xdead_beef); }
}
