//! Inverse and consistent value samplers.
//!
//! Given `op(e0, e1) = target` with one operand fixed, an inverse
//! sampler produces a value for the other operand that makes the
//! equation hold, or signals a conflict. A consistent sampler only
//! honours the operator's standalone constraints (e.g. "a non-zero
//! even product needs an operand with at most as many trailing
//! zeros"). On a recoverable conflict the engine falls back from the
//! inverse to the consistent sampler; a conflict against a constant
//! operand is non-recoverable when `prop_no_move_on_conflict` is set.
use crate::base::BvBase;
use crate::bv::BV;
use crate::nid::NID;
use super::PropSolver;

/// shared conflict exit for the inverse samplers: `$other` is the
/// fixed operand's node, `$cons` the consistent fallback expression.
macro_rules! conflict {
  ($self:ident, $base:ident, $other:expr, $cons:expr) => {{
    if $self.opts.prop_no_move_on_conflict && $base.is_const($other) {
      $self.stats.move_prop_non_rec_conf += 1;
      return None }
    $self.stats.move_prop_rec_conf += 1;
    return Some($cons) }}}

impl PropSolver {

  fn cur_assignment(&mut self, base: &BvBase, exp: NID, eidx: usize) -> BV {
    let child = base.child(exp, eidx);
    self.model.value(base, &mut self.rng, child) }

  // -- consistent samplers ----------------------------------------------

  pub(crate) fn cons_add(&mut self, _base: &BvBase, _exp: NID, bvadd: &BV,
                         _bve: &BV, _eidx: usize) -> BV {
    self.stats.cons_add += 1;
    BV::new_random(&mut self.rng, bvadd.width()) }

  /// all bits set in the target must be set; the rest are free
  pub(crate) fn cons_and(&mut self, base: &BvBase, exp: NID, bvand: &BV,
                         _bve: &BV, eidx: usize) -> BV {
    self.stats.cons_and += 1;
    let b = self.rng.flip(self.opts.prop_prob_and_flip);
    let mut res = self.cur_assignment(base, exp, eidx);
    let mut dcbits = vec![];
    for i in 0..bvand.width() {
      if bvand.get_bit(i) { res.set_bit(i, true) }
      else if b { dcbits.push(i) }
      else { let v = self.rng.bit(); res.set_bit(i, v) }}
    if b && !dcbits.is_empty() {
      let i = self.rng.pick(0, dcbits.len() as u32 - 1) as usize;
      res.flip_bit(dcbits[i]) }
    res }

  pub(crate) fn cons_eq(&mut self, base: &BvBase, exp: NID, _bveq: &BV,
                        bve: &BV, eidx: usize) -> BV {
    self.stats.cons_eq += 1;
    if self.rng.flip(self.opts.prop_prob_eq_flip) {
      let mut res = self.cur_assignment(base, exp, eidx);
      let i = self.rng.pick(0, res.width() - 1);
      res.flip_bit(i);
      res
    } else {
      BV::new_random(&mut self.rng, bve.width()) }}

  pub(crate) fn cons_ult(&mut self, _base: &BvBase, _exp: NID, bvult: &BV,
                         bve: &BV, eidx: usize) -> BV {
    self.stats.cons_ult += 1;
    let bw = bve.width();
    let isult = !bvult.is_zero();
    let zero = BV::zeros(bw);
    let bvmax = BV::ones(bw);
    if eidx == 1 && isult {
      // bve < res -> res > 0
      let one = BV::one(bw);
      BV::new_random_range(&mut self.rng, bw, &one, &bvmax)
    } else if eidx == 0 && isult {
      // res < bve -> 0 <= res < 1...1
      let top = bvmax.dec();
      BV::new_random_range(&mut self.rng, bw, &zero, &top)
    } else {
      BV::new_random(&mut self.rng, bw) }}

  /// shift amounts are bounded by the number of zero LSBs of the target
  pub(crate) fn cons_sll(&mut self, _base: &BvBase, _exp: NID, bvsll: &BV,
                         _bve: &BV, eidx: usize) -> BV {
    self.stats.cons_sll += 1;
    let bw = bvsll.width();
    let sbw = bw.trailing_zeros();
    let ctz = bvsll.get_num_trailing_zeros();
    let from = BV::zeros(sbw);
    let to = BV::from_u64((if ctz == bw { ctz - 1 } else { ctz }) as u64, sbw);
    let shift = BV::new_random_range(&mut self.rng, sbw, &from, &to);
    if eidx == 1 { shift }
    else {
      let s = shift.to_u64() as u32;
      let mut res = bvsll.srl(&shift);
      for i in 0..s { let v = self.rng.bit(); res.set_bit(bw - 1 - i, v) }
      res }}

  pub(crate) fn cons_srl(&mut self, _base: &BvBase, _exp: NID, bvsrl: &BV,
                         _bve: &BV, eidx: usize) -> BV {
    self.stats.cons_srl += 1;
    let bw = bvsrl.width();
    let sbw = bw.trailing_zeros();
    let clz = bvsrl.get_num_leading_zeros();
    let from = BV::zeros(sbw);
    let to = BV::from_u64((if clz == bw { clz - 1 } else { clz }) as u64, sbw);
    let shift = BV::new_random_range(&mut self.rng, sbw, &from, &to);
    if eidx == 1 { shift }
    else {
      let s = shift.to_u64() as u32;
      let mut res = bvsrl.sll(&shift);
      for i in 0..s { let v = self.rng.bit(); res.set_bit(i, v) }
      res }}

  pub(crate) fn cons_mul(&mut self, _base: &BvBase, _exp: NID, bvmul: &BV,
                         _bve: &BV, _eidx: usize) -> BV {
    self.stats.cons_mul += 1;
    let bw = bvmul.width();
    let mut res = BV::new_random(&mut self.rng, bw);
    if !bvmul.is_zero() {
      if res.is_zero() { res = BV::new_random(&mut self.rng, bw) }
      if bvmul.is_odd() {
        // odd target -> odd operand
        if !res.get_bit(0) { res.set_bit(0, true) }
      } else {
        let ctz_bvmul = bvmul.get_num_trailing_zeros();
        if self.rng.flip(100) {
          // 2^n with n <= ctz(target)
          res = BV::zeros(bw);
          res.set_bit(self.rng.pick(0, ctz_bvmul - 1), true);
        } else if self.rng.flip(100) {
          // target shifted right by up to ctz(target)
          let r = self.rng.pick(0, ctz_bvmul);
          res = if r > 0 { bvmul.slice(bw - 1, r).uext(r) } else { bvmul.clone() }
        } else if res.get_num_trailing_zeros() > ctz_bvmul {
          res.set_bit(self.rng.pick(0, ctz_bvmul - 1), true) }}}
    res }

  pub(crate) fn cons_udiv(&mut self, _base: &BvBase, _exp: NID, bvudiv: &BV,
                          _bve: &BV, eidx: usize) -> BV {
    self.stats.cons_udiv += 1;
    let bw = bvudiv.width();
    let zero = BV::zeros(bw);
    let one = BV::one(bw);
    let bvmax = BV::ones(bw);
    if eidx == 1 {
      // any x/0 = 1...1 and x/1 = x work for target 1...1
      if bvudiv == &bvmax {
        BV::from_u64(self.rng.pick(0, 1) as u64, bw)
      } else {
        let mut res = BV::new_random_range(&mut self.rng, bw, &one, &bvmax);
        while BV::is_umulo(&res, bvudiv) {
          let top = res.dec();
          res = BV::new_random_range(&mut self.rng, bw, &one, &top) }
        res }
    } else if bvudiv.is_zero() {
      let top = bvmax.dec();
      BV::new_random_range(&mut self.rng, bw, &zero, &top)
    } else if bvudiv == &bvmax {
      BV::new_random(&mut self.rng, bw)
    } else {
      // pick a divisor that doesn't overflow, return its product
      let mut tmpbve = BV::new_random_range(&mut self.rng, bw, &one, &bvmax);
      while BV::is_umulo(&tmpbve, bvudiv) {
        let top = tmpbve.dec();
        tmpbve = BV::new_random_range(&mut self.rng, bw, &one, &top) }
      tmpbve.mul(bvudiv) }}

  pub(crate) fn cons_urem(&mut self, _base: &BvBase, _exp: NID, bvurem: &BV,
                          _bve: &BV, eidx: usize) -> BV {
    self.stats.cons_urem += 1;
    let bw = bvurem.width();
    let bvmax = BV::ones(bw);
    if eidx == 1 {
      // target 1...1 forces divisor 0, otherwise divisor > target
      if bvurem == &bvmax { BV::zeros(bw) }
      else {
        let lo = bvurem.inc();
        BV::new_random_range(&mut self.rng, bw, &lo, &bvmax) }
    } else if bvurem == &bvmax {
      bvmax.clone()
    } else {
      BV::new_random_range(&mut self.rng, bw, bvurem, &bvmax) }}

  pub(crate) fn cons_concat(&mut self, base: &BvBase, exp: NID, bvconcat: &BV,
                            bve: &BV, eidx: usize) -> BV {
    self.stats.cons_concat += 1;
    let idx = if eidx == 1 { 0 } else { 1 };
    let cw = bvconcat.width();
    // against a constant operand, optionally slice out of the current
    // assignment and flip at most one bit instead
    if base.is_const(base.child(exp, idx)) && self.rng.flip(self.opts.prop_prob_conc_flip) {
      let bvcur = self.model.value(base, &mut self.rng, exp);
      let mut res = if eidx == 1 { bvcur.slice(cw - bve.width() - 1, 0) }
                    else { bvcur.slice(cw - 1, bve.width()) };
      let r = self.rng.pick(0, res.width());
      if r > 0 { res.flip_bit(r - 1) }
      res
    } else if eidx == 1 {
      bvconcat.slice(cw - bve.width() - 1, 0)
    } else {
      bvconcat.slice(cw - 1, bve.width()) }}

  pub(crate) fn cons_slice(&mut self, base: &BvBase, exp: NID, bvslice: &BV,
                           bve: &BV) -> BV {
    self.stats.cons_slice += 1;
    self.inv_slice_aux(base, exp, bvslice, bve) }

  // -- inverse samplers --------------------------------------------------

  /// res + bve = target  ->  res = target - bve (always invertible)
  pub(crate) fn inv_add(&mut self, _base: &BvBase, _exp: NID, bvadd: &BV,
                        bve: &BV, _eidx: usize) -> Option<BV> {
    self.stats.inv_add += 1;
    Some(bvadd.sub(bve)) }

  pub(crate) fn inv_and(&mut self, base: &BvBase, exp: NID, bvand: &BV,
                        bve: &BV, eidx: usize) -> Option<BV> {
    self.stats.inv_and += 1;
    let other = base.child(exp, if eidx == 1 { 0 } else { 1 });
    let b = self.rng.flip(self.opts.prop_prob_and_flip);
    let mut res = self.cur_assignment(base, exp, eidx);
    let mut dcbits = vec![];
    for i in 0..bvand.width() {
      let bitand = bvand.get_bit(i);
      let bite = bve.get_bit(i);
      // every bit set in the target must be set in the fixed operand
      if bitand && !bite {
        conflict!(self, base, other, self.cons_and(base, exp, bvand, bve, eidx)) }
      if bitand { res.set_bit(i, true) }
      else if bite { res.set_bit(i, false) }
      else if b { dcbits.push(i) }
      else { let v = self.rng.bit(); res.set_bit(i, v) }}
    if b && !dcbits.is_empty() {
      let i = self.rng.pick(0, dcbits.len() as u32 - 1) as usize;
      res.flip_bit(dcbits[i]) }
    Some(res) }

  pub(crate) fn inv_eq(&mut self, base: &BvBase, exp: NID, bveq: &BV,
                       bve: &BV, eidx: usize) -> Option<BV> {
    self.stats.inv_eq += 1;
    if bveq.is_zero() {
      // res != bve: biased toward a single bit flip of the current value
      let res = if self.rng.flip(self.opts.prop_prob_eq_flip) {
        loop {
          let mut r = self.cur_assignment(base, exp, eidx);
          let i = self.rng.pick(0, r.width() - 1);
          r.flip_bit(i);
          if &r != bve { break r }}
      } else {
        loop {
          let r = BV::new_random(&mut self.rng, bve.width());
          if &r != bve { break r }}};
      Some(res)
    } else {
      Some(bve.clone()) }}

  pub(crate) fn inv_ult(&mut self, base: &BvBase, exp: NID, bvult: &BV,
                        bve: &BV, eidx: usize) -> Option<BV> {
    self.stats.inv_ult += 1;
    let other = base.child(exp, if eidx == 1 { 0 } else { 1 });
    let bw = bve.width();
    let zero = BV::zeros(bw);
    let one = BV::one(bw);
    let bvmax = BV::ones(bw);
    let isult = !bvult.is_zero();
    if eidx == 1 {
      if bve == &bvmax && isult {
        // 1...1 < res has no solution
        conflict!(self, base, other, self.cons_ult(base, exp, bvult, bve, eidx)) }
      Some(if !isult {
        BV::new_random_range(&mut self.rng, bw, &zero, bve)
      } else {
        let lo = bve.add(&one);
        BV::new_random_range(&mut self.rng, bw, &lo, &bvmax) })
    } else {
      if bve.is_zero() && isult {
        // res < 0 has no solution
        conflict!(self, base, other, self.cons_ult(base, exp, bvult, bve, eidx)) }
      Some(if !isult {
        BV::new_random_range(&mut self.rng, bw, bve, &bvmax)
      } else {
        let hi = bve.sub(&one);
        BV::new_random_range(&mut self.rng, bw, &zero, &hi) }) }}

  pub(crate) fn inv_sll(&mut self, base: &BvBase, exp: NID, bvsll: &BV,
                        bve: &BV, eidx: usize) -> Option<BV> {
    self.stats.inv_sll += 1;
    let other = base.child(exp, if eidx == 1 { 0 } else { 1 });
    macro_rules! conf { ($s:ident) => {
      conflict!($s, base, other, $s.cons_sll(base, exp, bvsll, bve, eidx)) }}
    if eidx == 1 {
      let bw = bvsll.width();
      let sbw = bw.trailing_zeros();
      // infer the shift amount from the zero LSBs of the target
      if bve.is_zero() && bvsll.is_zero() {
        return Some(BV::new_random(&mut self.rng, sbw)) }
      let ctz_bve = bve.get_num_trailing_zeros();
      let ctz_bvsll = bvsll.get_num_trailing_zeros();
      if ctz_bve > ctz_bvsll { conf!(self) }
      let shift = ctz_bvsll - ctz_bve;
      if shift > bw - 1 { conf!(self) }
      if bvsll.is_zero() {
        let lo = BV::from_u64(shift as u64, sbw);
        let hi = BV::ones(sbw);
        return Some(BV::new_random_range(&mut self.rng, sbw, &lo, &hi)) }
      // the bits that survive the shift must match
      for i in 0..bve.width() - shift {
        if bve.get_bit(i) != bvsll.get_bit(shift + i) { conf!(self) }}
      Some(BV::from_u64(shift as u64, sbw))
    } else {
      // res << bve = target  ->  res = target >> bve, shifted-out MSBs free
      let shift = bve.to_u64() as u32;
      if bvsll.get_num_trailing_zeros() < shift { conf!(self) }
      let mut res = bvsll.srl(bve);
      for i in 0..shift {
        let v = self.rng.bit();
        res.set_bit(res.width() - 1 - i, v) }
      Some(res) }}

  pub(crate) fn inv_srl(&mut self, base: &BvBase, exp: NID, bvsrl: &BV,
                        bve: &BV, eidx: usize) -> Option<BV> {
    self.stats.inv_srl += 1;
    let other = base.child(exp, if eidx == 1 { 0 } else { 1 });
    macro_rules! conf { ($s:ident) => {
      conflict!($s, base, other, $s.cons_srl(base, exp, bvsrl, bve, eidx)) }}
    if eidx == 1 {
      let bw = bvsrl.width();
      let sbw = bw.trailing_zeros();
      if bve.is_zero() && bvsrl.is_zero() {
        return Some(BV::new_random(&mut self.rng, sbw)) }
      let clz_bve = bve.get_num_leading_zeros();
      let clz_bvsrl = bvsrl.get_num_leading_zeros();
      if clz_bve > clz_bvsrl { conf!(self) }
      let shift = clz_bvsrl - clz_bve;
      if shift > bw - 1 { conf!(self) }
      if bvsrl.is_zero() {
        let lo = BV::from_u64(shift as u64, sbw);
        let hi = BV::ones(sbw);
        return Some(BV::new_random_range(&mut self.rng, sbw, &lo, &hi)) }
      for i in 0..bve.width() - shift {
        if bve.get_bit(bve.width() - 1 - i) != bvsrl.get_bit(bvsrl.width() - 1 - (shift + i)) {
          conf!(self) }}
      Some(BV::from_u64(shift as u64, sbw))
    } else {
      let shift = bve.to_u64() as u32;
      if bvsrl.get_num_leading_zeros() < shift { conf!(self) }
      let mut res = bvsrl.sll(bve);
      for i in 0..shift {
        let v = self.rng.bit();
        res.set_bit(i, v) }
      Some(res) }}

  pub(crate) fn inv_mul(&mut self, base: &BvBase, exp: NID, bvmul: &BV,
                        bve: &BV, eidx: usize) -> Option<BV> {
    self.stats.inv_mul += 1;
    let other = base.child(exp, if eidx == 1 { 0 } else { 1 });
    macro_rules! conf { ($s:ident) => {
      conflict!($s, base, other, $s.cons_mul(base, exp, bvmul, bve, eidx)) }}
    let bw = bvmul.width();
    if bve.is_zero() {
      if bvmul.is_zero() { return Some(BV::new_random(&mut self.rng, bw)) }
      conf!(self) }
    if bvmul.is_odd() && !bve.is_odd() { conf!(self) }
    if bve.is_odd() {
      // unique solution via the modular inverse
      return Some(bve.mod_inverse().mul(bvmul)) }
    if let Some(n) = bve.power_of_two() {
      // bve = 2^n: target must supply at least n zero LSBs
      if bvmul.get_num_trailing_zeros() < n { conf!(self) }
      let mut res = bvmul.slice(bw - 1, n).uext(n);
      for i in 0..n { let v = self.rng.bit(); res.set_bit(bw - 1 - i, v) }
      Some(res)
    } else {
      // bve = 2^n * m with m odd
      let i = bvmul.get_num_trailing_zeros();
      let j = bve.get_num_trailing_zeros();
      if i < j { conf!(self) }
      let shifted = bvmul.slice(bw - 1, j).uext(j);
      let m = bve.slice(bw - 1, j).uext(j);
      let mut res = shifted.mul(&m.mod_inverse());
      for k in 0..j { let v = self.rng.bit(); res.set_bit(bw - 1 - k, v) }
      Some(res) }}

  pub(crate) fn inv_udiv(&mut self, base: &BvBase, exp: NID, bvudiv: &BV,
                         bve: &BV, eidx: usize) -> Option<BV> {
    self.stats.inv_udiv += 1;
    let other = base.child(exp, if eidx == 1 { 0 } else { 1 });
    macro_rules! conf { ($s:ident) => {
      conflict!($s, base, other, $s.cons_udiv(base, exp, bvudiv, bve, eidx)) }}
    let bw = bve.width();
    let one = BV::one(bw);
    let bvmax = BV::ones(bw);
    if eidx == 1 {
      // bve / res = target
      if bvudiv == &bvmax {
        Some(if bve == bvudiv && self.rng.flip(500) { one } else { BV::zeros(bw) })
      } else if bvudiv.is_zero() {
        if bve.is_zero() {
          Some(BV::new_random_range(&mut self.rng, bw, &one, &bvmax))
        } else if bve != &bvmax {
          let lo = bve.inc();
          Some(BV::new_random_range(&mut self.rng, bw, &lo, &bvmax))
        } else { conf!(self) }
      } else if bve < bvudiv { conf!(self) }
      else {
        // divisor interval [bve/(target+1)+1, bve/target]
        if bve.urem(bvudiv).is_zero() && self.rng.flip(500) {
          Some(bve.udiv(bvudiv))
        } else {
          let up = bve.udiv(bvudiv);
          let lo = bve.udiv(&bvudiv.inc()).inc();
          if lo > up { conf!(self) }
          Some(BV::new_random_range(&mut self.rng, bw, &lo, &up)) }}
    } else {
      // res / bve = target
      if bvudiv == &bvmax {
        if bve == &one { Some(bvmax.clone()) }
        else if bve.is_zero() { Some(BV::new_random(&mut self.rng, bw)) }
        else { conf!(self) }
      } else if bve.is_zero() { conf!(self) }
      else if BV::is_umulo(bve, bvudiv) { conf!(self) }
      else if self.rng.flip(500) {
        Some(bve.mul(bvudiv))
      } else {
        // dividend interval [bve*target, bve*(target+1)-1]
        let lo = bve.mul(bvudiv);
        let t1 = bvudiv.inc();
        let up = if BV::is_umulo(bve, &t1) { bvmax.clone() } else { bve.mul(&t1).dec() };
        Some(BV::new_random_range(&mut self.rng, bw, &lo, &up)) }}}

  pub(crate) fn inv_urem(&mut self, base: &BvBase, exp: NID, bvurem: &BV,
                         bve: &BV, eidx: usize) -> Option<BV> {
    self.stats.inv_urem += 1;
    let other = base.child(exp, if eidx == 1 { 0 } else { 1 });
    macro_rules! conf { ($s:ident) => {
      conflict!($s, base, other, $s.cons_urem(base, exp, bvurem, bve, eidx)) }}
    let bw = bvurem.width();
    let bvmax = BV::ones(bw);
    let one = BV::one(bw);
    if eidx == 1 {
      // bve % res = target
      if bvurem == &bvmax {
        if bve != &bvmax { conf!(self) }
        return Some(BV::zeros(bw)) }
      match bve.cmp(bvurem) {
        std::cmp::Ordering::Equal => {
          // res = 0 or any res > target
          Some(if self.rng.flip(250) { BV::zeros(bw) }
               else {
                 let lo = bvurem.add(&one);
                 BV::new_random_range(&mut self.rng, bw, &lo, &bvmax) })}
        std::cmp::Ordering::Greater => {
          if !bvurem.is_zero() && bve.dec() == *bvurem { conf!(self) }
          let sub = bve.sub(bvurem);
          if sub <= *bvurem { conf!(self) }
          if self.rng.flip(500) { return Some(sub) }
          // res = (bve - target) / n for some n with zero remainder
          let up = if bvurem.is_zero() { bve.clone() }
          else {
            let q = sub.udiv(bvurem);
            if sub.urem(bvurem).is_zero() { q.dec() } else { q }};
          if up.is_zero() { return Some(sub) }
          let mut n = BV::new_random_range(&mut self.rng, bw, &one, &up);
          let mut cnt = 0;
          while cnt < bw && !sub.urem(&n).is_zero() {
            n = BV::new_random_range(&mut self.rng, bw, &one, &up);
            cnt += 1 }
          Some(if sub.urem(&n).is_zero() { sub.udiv(&n) } else { sub })}
        std::cmp::Ordering::Less => conf!(self) }
    } else {
      // res % bve = target
      if bve.is_zero() { return Some(bvurem.clone()) }
      if !bvurem.is_zero() && bve.is_one() { conf!(self) }
      if bvurem == &bvmax { conf!(self) }  // needs bve = 0, handled above
      if bve > bvurem {
        if self.rng.flip(500) { return Some(bvurem.clone()) }
        // res = bve * n + target without overflow
        if bvmax.sub(bve) < *bvurem { return Some(bvurem.clone()) }
        let mut n = BV::new_random_range(&mut self.rng, bw, &one, &bvmax);
        while BV::is_umulo(bve, &n) {
          let top = n.dec();
          n = BV::new_random_range(&mut self.rng, bw, &one, &top) }
        let mut mul = bve.mul(&n);
        if bvmax.sub(&mul) < *bvurem {
          let top = n.dec();
          n = BV::new_random_range(&mut self.rng, bw, &one, &top);
          mul = bve.mul(&n) }
        Some(mul.add(bvurem))
      } else { conf!(self) }}}

  pub(crate) fn inv_concat(&mut self, base: &BvBase, exp: NID, bvconcat: &BV,
                           bve: &BV, eidx: usize) -> Option<BV> {
    self.stats.inv_concat += 1;
    let other = base.child(exp, if eidx == 1 { 0 } else { 1 });
    macro_rules! conf { ($s:ident) => {
      conflict!($s, base, other, $s.cons_concat(base, exp, bvconcat, bve, eidx)) }}
    let cw = bvconcat.width();
    if eidx == 1 {
      // the fixed operand is the upper part
      if bvconcat.slice(cw - 1, cw - bve.width()) != *bve { conf!(self) }
      Some(bvconcat.slice(cw - bve.width() - 1, 0))
    } else {
      if bvconcat.slice(bve.width() - 1, 0) != *bve { conf!(self) }
      Some(bvconcat.slice(cw - 1, bve.width())) }}

  /// never conflicts: out-of-range bits are free
  pub(crate) fn inv_slice(&mut self, base: &BvBase, exp: NID, bvslice: &BV,
                          bve: &BV) -> Option<BV> {
    self.stats.inv_slice += 1;
    Some(self.inv_slice_aux(base, exp, bvslice, bve)) }

  fn inv_slice_aux(&mut self, base: &BvBase, exp: NID, bvslice: &BV, bve: &BV) -> BV {
    let (upper, lower) = base.slice_bounds(exp);
    let bflip = self.rng.flip(self.opts.prop_prob_slice_flip);
    let bkeep = bflip || self.rng.flip(self.opts.prop_prob_slice_keep_dc);
    let w = base.width(base.child(exp, 0));
    let mut res = BV::zeros(w);
    for i in 0..lower {
      let v = if bkeep { bve.get_bit(i) } else { self.rng.bit() };
      res.set_bit(i, v) }
    for i in lower..=upper {
      res.set_bit(i, bvslice.get_bit(i - lower)) }
    for i in upper + 1..w {
      let v = if bkeep { bve.get_bit(i) } else { self.rng.bit() };
      res.set_bit(i, v) }
    if bflip {
      // flip one bit outside the sliced range, if there is any
      let mut rboth = 0;
      let mut rlower = 0;
      let mut rupper = w - 1;
      if lower > 0 {
        rboth += 1;
        rlower = self.rng.pick(0, lower - 1) }
      if upper + 1 < w {
        rboth += 2;
        rupper = self.rng.pick(upper + 1, w - 1) }
      match rboth {
        3 => { let i = if self.rng.flip(500) { rupper } else { rlower }; res.flip_bit(i) }
        2 => res.flip_bit(rupper),
        1 => res.flip_bit(rlower),
        _ => {}}}
    res }
}
