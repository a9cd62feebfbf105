/* Bitmask diagram:

   bit 63     : INV  (the reference denotes the bitwise/boolean negation)
   bits 32-62 : unused (reserved)
   bits 0-31  : node id within the owning BvBase

*/
use std::fmt;

/// A NID is a reference to a node in a BvBase. It packs the node id
/// together with an inversion flag into a u64, so that `not e` can
/// share the node of `e`.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct NID { n: u64 }

/// Single-bit mask representing that a NID is inverted.
const INV: u64 = 1 << 63;

/// Constant used to extract the id part of a NID.
const IDX_MASK: u64 = (1 << 32) - 1;

impl NID {
  /// construct a plain (non-inverted) reference to the node with the given id
  pub const fn new(id: u32) -> NID { NID { n: id as u64 }}

  /// the id of the referenced node (inversion stripped)
  #[inline(always)] pub fn idx(&self) -> usize { (self.n & IDX_MASK) as usize }

  /// same as idx, but as the raw u32 id
  #[inline(always)] pub fn id(&self) -> u32 { (self.n & IDX_MASK) as u32 }

  /// does the NID represent `not(some other nid)`?
  #[inline(always)] pub fn is_inv(&self) -> bool { self.n & INV != 0 }

  /// the NID with the INV flag removed
  #[inline(always)] pub fn raw(&self) -> NID { NID { n: self.n & !INV }}

  /// signed id: negative for inverted references. model and score
  /// tables key on this so both polarities get their own entry.
  #[inline(always)] pub fn sid(&self) -> i64 {
    if self.is_inv() { -(self.idx() as i64) } else { self.idx() as i64 }}}

impl std::ops::Not for NID {
  type Output = NID;
  fn not(self) -> NID { NID { n: self.n ^ INV }}}

/// Pretty-printer for NIDs that reveals their internal data.
impl fmt::Display for NID {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.is_inv() { write!(f, "!")? }
    write!(f, "@{}", self.idx()) }}

/// Same as fmt::Display. Mostly so it's easier to see the problem when an assertion fails.
impl fmt::Debug for NID { // for test suite output
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self) }}


#[test] fn test_nids() {
  let n = NID::new(5);
  assert_eq!(n.idx(), 5);
  assert!(!n.is_inv());
  assert!((!n).is_inv());
  assert_eq!((!n).idx(), 5);
  assert_eq!(!!n, n);
  assert_eq!((!n).raw(), n);
  assert_eq!(format!("{}", !n), "!@5"); }

#[test] fn test_sid() {
  let n = NID::new(7);
  assert_eq!(n.sid(), 7);
  assert_eq!((!n).sid(), -7); }
