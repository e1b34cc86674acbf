//! wasm32 simd128 token.
//!
//! WebAssembly has uniform shifts for every lane width (the count is taken
//! modulo the width) and `i8x16.swizzle`. Per-lane shifts, rounding and
//! multishift use the generic emulations on top of those.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::{arch::wasm32::*, mem::transmute};

use backend::Target;

use crate::{Isa, Lane, Vec128, lane::ShiftAmount};

isa_token! {
  /// WebAssembly fixed-width SIMD.
  Simd128 => Target::Simd128
}

#[inline]
#[target_feature(enable = "simd128")]
unsafe fn shl<T: Lane>(x: [u8; 16], bits: u32) -> [u8; 16] {
  let x: v128 = transmute(x);
  let out = match T::BITS {
    8 => u8x16_shl(x, bits),
    16 => u16x8_shl(x, bits),
    32 => u32x4_shl(x, bits),
    _ => u64x2_shl(x, bits),
  };
  transmute(out)
}

#[inline]
#[target_feature(enable = "simd128")]
unsafe fn shr<T: Lane>(x: [u8; 16], bits: u32) -> [u8; 16] {
  let x: v128 = transmute(x);
  let out = match (T::BITS, T::SIGNED) {
    (8, false) => u8x16_shr(x, bits),
    (8, true) => i8x16_shr(x, bits),
    (16, false) => u16x8_shr(x, bits),
    (16, true) => i16x8_shr(x, bits),
    (32, false) => u32x4_shr(x, bits),
    (32, true) => i32x4_shr(x, bits),
    (_, false) => u64x2_shr(x, bits),
    (_, true) => i64x2_shr(x, bits),
  };
  transmute(out)
}

#[inline]
#[target_feature(enable = "simd128")]
unsafe fn swizzle(table: [u8; 16], idx: [u8; 16]) -> [u8; 16] {
  transmute(i8x16_swizzle(transmute(table), transmute(idx)))
}

impl Isa for Simd128 {
  const TARGET: Target = Target::Simd128;

  #[inline]
  fn shl<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = ShiftAmount::<T, K>::CHECK;
    self.shl_same(v, K as u32)
  }

  #[inline]
  fn shr<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = ShiftAmount::<T, K>::CHECK;
    self.shr_same(v, K as u32)
  }

  #[inline]
  fn shl_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    // SAFETY: the token proves simd128.
    Vec128::from_bytes(unsafe { shl::<T>(v.to_bytes(), bits) })
  }

  #[inline]
  fn shr_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    // SAFETY: the token proves simd128.
    Vec128::from_bytes(unsafe { shr::<T>(v.to_bytes(), bits) })
  }

  #[inline]
  fn table_lookup_bytes(self, table: Vec128<u8>, idx: Vec128<u8>) -> Vec128<u8> {
    // SAFETY: the token proves simd128. Indices are masked to 0..16.
    Vec128::from_bytes(unsafe { swizzle(table.to_bytes(), idx.and(Vec128::splat(15)).to_bytes()) })
  }
}
