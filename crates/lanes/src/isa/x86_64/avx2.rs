//! AVX2 per-lane shifts (VEX.128 encodings).
//!
//! - 32-bit: `VPSLLVD`, `VPSRLVD`, `VPSRAVD`
//! - 64-bit: `VPSLLVQ`, `VPSRLVQ`; arithmetic via sign extension of the
//!   logical result with a per-lane shifted sign bit
//! - 16-bit: widen each half to 32-bit lanes, shift, repack
//! - 8-bit: bit decomposition over the SSE2 uniform shifts
//!
//! Constant and uniform shifts are the SSE2 ones. Byte lookups use `PSHUFB`.

use core::arch::x86_64::*;

use backend::Target;

use super::{from_m128i, sse2, to_m128i};
use crate::{Isa, Lane, Vec128, isa::emulate, lane::ShiftAmount};

isa_token! {
  /// x86_64 with AVX2 (and the SSSE3/SSE4.1 it implies).
  Avx2 => Target::Avx2
}

/// Reduce per-lane counts modulo the lane width.
#[inline]
#[target_feature(enable = "sse2")]
pub(super) unsafe fn wrap_counts<T: Lane>(s: __m128i) -> __m128i {
  let limit = match T::BITS {
    8 => _mm_set1_epi8(7),
    16 => _mm_set1_epi16(15),
    32 => _mm_set1_epi32(31),
    _ => _mm_set1_epi64x(63),
  };
  _mm_and_si128(s, limit)
}

// ─── 16-bit via 32-bit lanes ───

#[derive(Clone, Copy)]
enum Op {
  Left,
  Logical,
  Arithmetic,
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn shift16_widened(x: __m128i, counts: __m128i, op: Op) -> __m128i {
  let zero = _mm_setzero_si128();
  let c_lo = _mm_unpacklo_epi16(counts, zero);
  let c_hi = _mm_unpackhi_epi16(counts, zero);
  let (lo, hi) = match op {
    Op::Left => (
      _mm_sllv_epi32(_mm_unpacklo_epi16(x, zero), c_lo),
      _mm_sllv_epi32(_mm_unpackhi_epi16(x, zero), c_hi),
    ),
    Op::Logical => (
      _mm_srlv_epi32(_mm_unpacklo_epi16(x, zero), c_lo),
      _mm_srlv_epi32(_mm_unpackhi_epi16(x, zero), c_hi),
    ),
    // Place each lane in the high half, then sign-extend down.
    Op::Arithmetic => (
      _mm_srav_epi32(_mm_srai_epi32::<16>(_mm_unpacklo_epi16(zero, x)), c_lo),
      _mm_srav_epi32(_mm_srai_epi32::<16>(_mm_unpackhi_epi16(zero, x)), c_hi),
    ),
  };
  // Truncate before the saturating pack so every value is in range.
  let keep = _mm_set1_epi32(0xFFFF);
  _mm_packus_epi32(_mm_and_si128(lo, keep), _mm_and_si128(hi, keep))
}

// ─── Per-lane amount (counts already wrapped) ───

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn shl_var_wrapped<T: Lane>(x: __m128i, counts: __m128i) -> __m128i {
  match T::BITS {
    16 => shift16_widened(x, counts, Op::Left),
    32 => _mm_sllv_epi32(x, counts),
    _ => _mm_sllv_epi64(x, counts),
  }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn shr_var_wrapped<T: Lane>(x: __m128i, counts: __m128i) -> __m128i {
  match (T::BITS, T::SIGNED) {
    (16, false) => shift16_widened(x, counts, Op::Logical),
    (16, true) => shift16_widened(x, counts, Op::Arithmetic),
    (32, false) => _mm_srlv_epi32(x, counts),
    (32, true) => _mm_srav_epi32(x, counts),
    (_, false) => _mm_srlv_epi64(x, counts),
    (_, true) => {
      let m = _mm_srlv_epi64(_mm_set1_epi64x(i64::MIN), counts);
      let logical = _mm_srlv_epi64(x, counts);
      _mm_sub_epi64(_mm_xor_si128(logical, m), m)
    }
  }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn shuffle_bytes(table: __m128i, idx: __m128i) -> __m128i {
  _mm_shuffle_epi8(table, idx)
}

impl Isa for Avx2 {
  const TARGET: Target = Target::Avx2;

  #[inline]
  fn shl<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = ShiftAmount::<T, K>::CHECK;
    // SAFETY: AVX2 implies SSE2.
    from_m128i(unsafe { sse2::shl_imm::<T, K>(to_m128i(v)) })
  }

  #[inline]
  fn shr<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = ShiftAmount::<T, K>::CHECK;
    // SAFETY: AVX2 implies SSE2.
    from_m128i(unsafe { sse2::shr_imm::<T, K>(to_m128i(v)) })
  }

  #[inline]
  fn shl_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    // SAFETY: AVX2 implies SSE2.
    from_m128i(unsafe { sse2::shl_reg::<T>(to_m128i(v), bits) })
  }

  #[inline]
  fn shr_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    // SAFETY: AVX2 implies SSE2.
    from_m128i(unsafe { sse2::shr_reg::<T>(to_m128i(v), bits) })
  }

  #[inline]
  fn shl_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    if T::BITS == 8 {
      return emulate::shl_var(self, v, s);
    }
    // SAFETY: the token proves AVX2.
    from_m128i(unsafe { shl_var_wrapped::<T>(to_m128i(v), wrap_counts::<T>(to_m128i(s))) })
  }

  #[inline]
  fn shr_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    if T::BITS == 8 {
      return emulate::shr_var(self, v, s);
    }
    // SAFETY: the token proves AVX2.
    from_m128i(unsafe { shr_var_wrapped::<T>(to_m128i(v), wrap_counts::<T>(to_m128i(s))) })
  }

  #[inline]
  fn table_lookup_bytes(self, table: Vec128<u8>, idx: Vec128<u8>) -> Vec128<u8> {
    // SAFETY: the token proves SSSE3. Indices are masked to 0..16, so no
    // lane hits the zeroing high bit.
    from_m128i(unsafe { shuffle_bytes(to_m128i(table), to_m128i(idx.and(Vec128::splat(15)))) })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::isa::Portable;

  fn token() -> Option<Avx2> {
    Avx2::new(platform::caps())
  }

  #[test]
  fn widened_16_bit_shifts_match_portable() {
    let Some(isa) = token() else { return };
    let v = Vec128::<u16>::from_fn(|i| 0x8001u16.rotate_left(i as u32 * 3));
    let s = Vec128::<u16>::from_fn(|i| [0, 1, 7, 8, 15, 16, 17, 0xFFFF][i]);
    assert_eq!(isa.shl_var(v, s), Portable.shl_var(v, s));
    assert_eq!(isa.shr_var(v, s), Portable.shr_var(v, s));
    let (v, s) = (v.bitcast::<i16>(), s.bitcast::<i16>());
    assert_eq!(isa.shr_var(v, s), Portable.shr_var(v, s));
  }

  #[test]
  fn i64_variable_right_shift_extends_sign() {
    let Some(isa) = token() else { return };
    let v = Vec128::<i64>::from_fn(|i| if i == 0 { i64::MIN } else { -3 });
    let s = Vec128::<i64>::from_fn(|i| if i == 0 { 63 } else { 65 });
    assert_eq!(isa.shr_var(v, s), Vec128::from_fn(|i| if i == 0 { -1 } else { -2 }));
  }

  #[test]
  fn shuffle_matches_portable_lookup() {
    let Some(isa) = token() else { return };
    let table = Vec128::<u8>::iota(0x40);
    let idx = Vec128::<u8>::from_fn(|i| (15 - i) as u8);
    assert_eq!(isa.table_lookup_bytes(table, idx), table.table_lookup(idx));
  }
}
