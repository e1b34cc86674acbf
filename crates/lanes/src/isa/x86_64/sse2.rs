//! SSE2 shifts.
//!
//! SSE2 has no byte shifts and no 64-bit arithmetic right shift:
//!
//! - 8-bit lanes shift as 16-bit lanes, then a per-byte mask clears the bits
//!   that crossed from the neighbouring byte.
//! - Arithmetic right shifts missing in hardware are a logical shift plus
//!   sign extension: `(x ^ m) - m` with `m` the shifted sign bit.
//!
//! These helpers are shared by the AVX2 and AVX-512 tokens, which have no
//! better constant or uniform forms for most widths.

use core::arch::x86_64::*;

use backend::Target;

use super::{from_m128i, to_m128i};
use crate::{Isa, Lane, Vec128, lane::ShiftAmount};

isa_token! {
  /// x86_64 baseline: SSE2.
  Sse2 => Target::Sse2
}

// ─── Sign extension ───

/// Turn logically shifted bytes into arithmetically shifted ones.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn sign_extend_8(logical: __m128i, bits: u32) -> __m128i {
  let m = _mm_set1_epi8(0x80u8.wrapping_shr(bits) as i8);
  _mm_sub_epi8(_mm_xor_si128(logical, m), m)
}

#[inline]
#[target_feature(enable = "sse2")]
pub(super) unsafe fn sign_extend_64(logical: __m128i, bits: u32) -> __m128i {
  let m = _mm_set1_epi64x((1u64 << 63).wrapping_shr(bits) as i64);
  _mm_sub_epi64(_mm_xor_si128(logical, m), m)
}

// ─── Constant amount ───

#[inline]
#[target_feature(enable = "sse2")]
pub(super) unsafe fn shl_imm<T: Lane, const K: i32>(x: __m128i) -> __m128i {
  match T::BITS {
    8 => _mm_and_si128(_mm_slli_epi16::<K>(x), _mm_set1_epi8(u8::MAX.wrapping_shl(K as u32) as i8)),
    16 => _mm_slli_epi16::<K>(x),
    32 => _mm_slli_epi32::<K>(x),
    _ => _mm_slli_epi64::<K>(x),
  }
}

#[inline]
#[target_feature(enable = "sse2")]
pub(super) unsafe fn shr_imm<T: Lane, const K: i32>(x: __m128i) -> __m128i {
  match (T::BITS, T::SIGNED) {
    (8, signed) => {
      let logical = _mm_and_si128(_mm_srli_epi16::<K>(x), _mm_set1_epi8(u8::MAX.wrapping_shr(K as u32) as i8));
      if signed { sign_extend_8(logical, K as u32) } else { logical }
    }
    (16, false) => _mm_srli_epi16::<K>(x),
    (16, true) => _mm_srai_epi16::<K>(x),
    (32, false) => _mm_srli_epi32::<K>(x),
    (32, true) => _mm_srai_epi32::<K>(x),
    (_, false) => _mm_srli_epi64::<K>(x),
    (_, true) => sign_extend_64(_mm_srli_epi64::<K>(x), K as u32),
  }
}

// ─── Uniform amount ───

#[inline]
#[target_feature(enable = "sse2")]
pub(super) unsafe fn shl_reg<T: Lane>(x: __m128i, bits: u32) -> __m128i {
  let count = _mm_cvtsi32_si128(bits as i32);
  match T::BITS {
    8 => _mm_and_si128(_mm_sll_epi16(x, count), _mm_set1_epi8(u8::MAX.wrapping_shl(bits) as i8)),
    16 => _mm_sll_epi16(x, count),
    32 => _mm_sll_epi32(x, count),
    _ => _mm_sll_epi64(x, count),
  }
}

#[inline]
#[target_feature(enable = "sse2")]
pub(super) unsafe fn shr_reg<T: Lane>(x: __m128i, bits: u32) -> __m128i {
  let count = _mm_cvtsi32_si128(bits as i32);
  match (T::BITS, T::SIGNED) {
    (8, signed) => {
      let logical = _mm_and_si128(_mm_srl_epi16(x, count), _mm_set1_epi8(u8::MAX.wrapping_shr(bits) as i8));
      if signed { sign_extend_8(logical, bits) } else { logical }
    }
    (16, false) => _mm_srl_epi16(x, count),
    (16, true) => _mm_sra_epi16(x, count),
    (32, false) => _mm_srl_epi32(x, count),
    (32, true) => _mm_sra_epi32(x, count),
    (_, false) => _mm_srl_epi64(x, count),
    (_, true) => sign_extend_64(_mm_srl_epi64(x, count), bits),
  }
}

impl Isa for Sse2 {
  const TARGET: Target = Target::Sse2;

  #[inline]
  fn shl<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = ShiftAmount::<T, K>::CHECK;
    // SAFETY: the token proves SSE2.
    from_m128i(unsafe { shl_imm::<T, K>(to_m128i(v)) })
  }

  #[inline]
  fn shr<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = ShiftAmount::<T, K>::CHECK;
    // SAFETY: the token proves SSE2.
    from_m128i(unsafe { shr_imm::<T, K>(to_m128i(v)) })
  }

  #[inline]
  fn shl_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    // SAFETY: the token proves SSE2.
    from_m128i(unsafe { shl_reg::<T>(to_m128i(v), bits) })
  }

  #[inline]
  fn shr_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    // SAFETY: the token proves SSE2.
    from_m128i(unsafe { shr_reg::<T>(to_m128i(v), bits) })
  }
}
