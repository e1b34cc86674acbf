//! Emulation sequences for targets without a native instruction.
//!
//! Everything here is generic over the executing token and is built only
//! from that token's own uniform shifts and byte lookups, plus the lane-wise
//! primitives of [`Vec128`]. All sequences are branch-free across lanes.

use crate::{Isa, Lane, Lane64, Vec128};

/// Per-lane left shift by bit decomposition of the count.
///
/// For each power of two `step < BITS`, lanes whose count has that bit set
/// take `acc << step`. The steps compose to `count mod BITS`.
#[inline]
pub(crate) fn shl_var<I: Isa, T: Lane>(isa: I, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
  let zero = Vec128::zero();
  let mut acc = v;
  let mut step = 1u32;
  while step < T::BITS {
    let bit = s.and(Vec128::splat(T::from_bits(u64::from(step))));
    acc = bit.cmp_ne(zero).select(isa.shl_same(acc, step), acc);
    step <<= 1;
  }
  acc
}

/// Per-lane right shift by bit decomposition.
///
/// Uses the token's uniform right shift, which already fills with zeros or
/// sign bits as `T` requires. Arithmetic shifts compose like logical ones
/// while the total stays below `BITS`.
#[inline]
pub(crate) fn shr_var<I: Isa, T: Lane>(isa: I, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
  let zero = Vec128::zero();
  let mut acc = v;
  let mut step = 1u32;
  while step < T::BITS {
    let bit = s.and(Vec128::splat(T::from_bits(u64::from(step))));
    acc = bit.cmp_ne(zero).select(isa.shr_same(acc, step), acc);
    step <<= 1;
  }
  acc
}

/// `(v >> bits) + ((v >> (bits - 1)) & 1)`, identity for `bits = 0`.
///
/// The correction is at most one and `v >> bits` has at least one free bit
/// at the top, so the sum never wraps.
#[inline]
pub(crate) fn rounding_shr_same<I: Isa, T: Lane>(isa: I, v: Vec128<T>, bits: u32) -> Vec128<T> {
  if bits == 0 {
    return v;
  }
  let one = Vec128::splat(T::ONE);
  let half = isa.shr_same(v, bits - 1).and(one);
  isa.shr_same(v, bits).add(half)
}

/// Per-lane rounding shift. Lanes with a zero count pass through unchanged.
#[inline]
pub(crate) fn rounding_shr_var<I: Isa, T: Lane>(isa: I, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
  let zero = Vec128::zero();
  let one = Vec128::splat(T::ONE);
  let count = s.and(Vec128::splat(T::from_bits(u64::from(T::BITS - 1))));
  // count - 1 wraps to BITS - 1 in zero-count lanes; the select drops those.
  let half = count.cmp_ne(zero).select(isa.shr_var(v, count.sub(one)).and(one), zero);
  isa.shr_var(v, count).add(half)
}

/// Byte-gather multishift.
///
/// Index byte `idx` of group `g` needs bits `idx .. idx + 8` (mod 64) of
/// `v[g]`. Those live in bytes `a = idx / 8` and `(a + 1) mod 8` of the
/// group. Both are gathered, paired into a 16-bit lane, shifted right by
/// `idx mod 8` and truncated to the low byte. Lookups never leave the group.
#[inline]
pub(crate) fn multi_shift<I: Isa, T: Lane64>(isa: I, v: Vec128<T>, idx: Vec128<u8>) -> Vec128<T> {
  let seven = Vec128::splat(7u8);
  let byte_off = isa.shr::<u8, 3>(idx).and(seven);
  let bit_off = idx.and(seven);

  let group_base = Vec128::<u8>::from_fn(|j| (j & !7) as u8);
  let lo_idx = group_base.add(byte_off);
  let hi_idx = group_base.add(byte_off.add(Vec128::splat(1)).and(seven));

  let bytes = v.bitcast::<u8>();
  let lo = isa.table_lookup_bytes(bytes, lo_idx);
  let hi = isa.table_lookup_bytes(bytes, hi_idx);

  let zero = Vec128::<u8>::zero();
  let lower = isa.shr_var(lo.zip_lower(hi), bit_off.zip_lower(zero));
  let upper = isa.shr_var(lo.zip_upper(hi), bit_off.zip_upper(zero));
  Vec128::<u8>::truncate_pairs(lower, upper).bitcast::<T>()
}
