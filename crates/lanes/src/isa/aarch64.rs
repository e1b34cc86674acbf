//! aarch64 NEON token.
//!
//! NEON shifts by a signed per-lane register count: positive shifts left,
//! negative shifts right (`USHL`/`SSHL`). That one instruction family covers
//! constant, uniform and per-lane shifts for every lane width, and the
//! rounding variants (`URSHL`/`SRSHL`) round half up in extended precision.
//!
//! The immediate forms (`vshlq_n_*`) are not used: their range assertions
//! would fire for lane widths the generic code never takes.
//!
//! # Safety
//!
//! Intrinsic helpers are `#[target_feature(enable = "neon")]`. They are only
//! reached through a `Neon` token, which requires detected NEON.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::{arch::aarch64::*, mem::transmute};

use backend::Target;

use crate::{Isa, Lane, Vec128, lane::ShiftAmount};

isa_token! {
  /// aarch64 Advanced SIMD.
  Neon => Target::Neon
}

/// `SSHL`/`USHL` by signed per-lane counts.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn shift<T: Lane>(x: [u8; 16], counts: [u8; 16]) -> [u8; 16] {
  match (T::BITS, T::SIGNED) {
    (8, false) => transmute(vshlq_u8(transmute(x), transmute(counts))),
    (8, true) => transmute(vshlq_s8(transmute(x), transmute(counts))),
    (16, false) => transmute(vshlq_u16(transmute(x), transmute(counts))),
    (16, true) => transmute(vshlq_s16(transmute(x), transmute(counts))),
    (32, false) => transmute(vshlq_u32(transmute(x), transmute(counts))),
    (32, true) => transmute(vshlq_s32(transmute(x), transmute(counts))),
    (_, false) => transmute(vshlq_u64(transmute(x), transmute(counts))),
    (_, true) => transmute(vshlq_s64(transmute(x), transmute(counts))),
  }
}

/// `SRSHL`/`URSHL`: as [`shift`], rounding when the count is negative.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn rounding_shift<T: Lane>(x: [u8; 16], counts: [u8; 16]) -> [u8; 16] {
  match (T::BITS, T::SIGNED) {
    (8, false) => transmute(vrshlq_u8(transmute(x), transmute(counts))),
    (8, true) => transmute(vrshlq_s8(transmute(x), transmute(counts))),
    (16, false) => transmute(vrshlq_u16(transmute(x), transmute(counts))),
    (16, true) => transmute(vrshlq_s16(transmute(x), transmute(counts))),
    (32, false) => transmute(vrshlq_u32(transmute(x), transmute(counts))),
    (32, true) => transmute(vrshlq_s32(transmute(x), transmute(counts))),
    (_, false) => transmute(vrshlq_u64(transmute(x), transmute(counts))),
    (_, true) => transmute(vrshlq_s64(transmute(x), transmute(counts))),
  }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn table_lookup(table: [u8; 16], idx: [u8; 16]) -> [u8; 16] {
  transmute(vqtbl1q_u8(transmute(table), transmute(idx)))
}

/// Counts for a right shift: `-bits` in every lane.
#[inline(always)]
fn negated<T: Lane>(bits: u32) -> Vec128<T> {
  Vec128::splat(T::from_bits(u64::from(bits).wrapping_neg()))
}

/// Per-lane counts reduced modulo the lane width.
#[inline(always)]
fn wrapped<T: Lane>(s: Vec128<T>) -> Vec128<T> {
  s.and(Vec128::splat(T::from_bits(u64::from(T::BITS - 1))))
}

impl Neon {
  #[inline(always)]
  fn run<T: Lane>(self, v: Vec128<T>, counts: Vec128<T>) -> Vec128<T> {
    // SAFETY: the token proves NEON.
    Vec128::from_bytes(unsafe { shift::<T>(v.to_bytes(), counts.to_bytes()) })
  }

  #[inline(always)]
  fn run_rounding<T: Lane>(self, v: Vec128<T>, counts: Vec128<T>) -> Vec128<T> {
    // SAFETY: the token proves NEON.
    Vec128::from_bytes(unsafe { rounding_shift::<T>(v.to_bytes(), counts.to_bytes()) })
  }
}

impl Isa for Neon {
  const TARGET: Target = Target::Neon;

  #[inline]
  fn shl<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = ShiftAmount::<T, K>::CHECK;
    self.run(v, Vec128::splat(T::from_bits(K as u64)))
  }

  #[inline]
  fn shr<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = ShiftAmount::<T, K>::CHECK;
    self.run(v, negated(K as u32))
  }

  #[inline]
  fn shl_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    self.run(v, Vec128::splat(T::from_bits(u64::from(bits))))
  }

  #[inline]
  fn shr_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    self.run(v, negated(bits))
  }

  #[inline]
  fn shl_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    self.run(v, wrapped(s))
  }

  #[inline]
  fn shr_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    self.run(v, Vec128::zero().sub(wrapped(s)))
  }

  #[inline]
  fn rounding_shr<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = ShiftAmount::<T, K>::CHECK;
    self.run_rounding(v, negated(K as u32))
  }

  #[inline]
  fn rounding_shr_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    self.run_rounding(v, negated(bits))
  }

  #[inline]
  fn rounding_shr_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    self.run_rounding(v, Vec128::zero().sub(wrapped(s)))
  }

  #[inline]
  fn table_lookup_bytes(self, table: Vec128<u8>, idx: Vec128<u8>) -> Vec128<u8> {
    // SAFETY: the token proves NEON. Indices are masked to 0..16.
    Vec128::from_bytes(unsafe { table_lookup(table.to_bytes(), idx.and(Vec128::splat(15)).to_bytes()) })
  }
}
