//! Scalar fallback token.
//!
//! Runs on every architecture. Each lane is shifted independently with the
//! raw-bit routines below. Out-of-range uniform counts saturate the way
//! x86 register-count shifts do: zero for left and logical right shifts,
//! all sign bits for arithmetic right shifts.

use backend::Target;

use super::{Isa, sealed};
use crate::{Lane, Lane64, Vec128, lane::ShiftAmount};

/// Scalar per-lane code. Always available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Portable;

impl sealed::Sealed for Portable {}

#[inline(always)]
fn shl_lane<T: Lane>(x: T, bits: u32) -> T {
  T::from_bits(x.to_bits().checked_shl(bits).unwrap_or(0))
}

#[inline(always)]
fn shr_lane<T: Lane>(x: T, bits: u32) -> T {
  let raw = x.to_bits();
  let logical = raw.checked_shr(bits).unwrap_or(0);
  if T::SIGNED && raw & T::sign_bit() != 0 {
    let kept = T::WIDTH_MASK.checked_shr(bits).unwrap_or(0);
    T::from_bits(logical | (T::WIDTH_MASK & !kept))
  } else {
    T::from_bits(logical)
  }
}

#[inline(always)]
fn count<T: Lane>(s: T) -> u32 {
  (s.to_bits() & u64::from(T::BITS - 1)) as u32
}

impl Isa for Portable {
  const TARGET: Target = Target::Portable;

  #[inline]
  fn shl<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = ShiftAmount::<T, K>::CHECK;
    v.map(|x| shl_lane(x, K as u32))
  }

  #[inline]
  fn shr<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = ShiftAmount::<T, K>::CHECK;
    v.map(|x| shr_lane(x, K as u32))
  }

  #[inline]
  fn shl_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    v.map(|x| shl_lane(x, bits))
  }

  #[inline]
  fn shr_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    v.map(|x| shr_lane(x, bits))
  }

  #[inline]
  fn shl_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    v.zip_map(s, |x, n| shl_lane(x, count(n)))
  }

  #[inline]
  fn shr_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    v.zip_map(s, |x, n| shr_lane(x, count(n)))
  }

  #[inline]
  fn multi_shift<T: Lane64>(self, v: Vec128<T>, idx: Vec128<u8>) -> Vec128<T> {
    let bytes = Vec128::<u8>::from_fn(|j| {
      let q = v.lane(j / 8).to_bits();
      q.rotate_right(u32::from(idx.lane(j) & 63)) as u8
    });
    bytes.bitcast()
  }
}
