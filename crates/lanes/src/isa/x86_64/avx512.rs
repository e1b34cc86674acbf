//! AVX-512 shifts on XMM registers (EVEX.128 encodings).
//!
//! Adds to AVX2:
//!
//! - `VPSRAQ` / `VPSRAVQ`: native 64-bit arithmetic right shifts
//! - `VPSLLVW` / `VPSRLVW` / `VPSRAVW`: native 16-bit per-lane shifts
//! - opmask predication for masked per-lane shifts on 16/32/64-bit lanes
//! - with VBMI, `VPMULTISHIFTQB`
//!
//! 8-bit lanes still go through the SSE2 sequences.

use core::arch::x86_64::*;

use backend::Target;

use super::{avx2::wrap_counts, from_m128i, sse2, to_m128i};
use crate::{Isa, Lane, Lane64, Mask128, Vec128, isa::emulate, lane::ShiftAmount};

isa_token! {
  /// x86_64 with AVX-512 F, VL and BW.
  Avx512 => Target::Avx512
}

isa_token! {
  /// x86_64 with AVX-512 F, VL, BW and VBMI.
  Avx512Vbmi => Target::Avx512Vbmi
}

// ─── 64-bit arithmetic right ───

#[inline]
#[target_feature(enable = "avx512f,avx512vl")]
unsafe fn sra_epi64(x: __m128i, bits: u32) -> __m128i {
  _mm_sra_epi64(x, _mm_cvtsi32_si128(bits as i32))
}

#[inline]
#[target_feature(enable = "avx512f,avx512vl,avx512bw")]
unsafe fn shr_reg<T: Lane>(x: __m128i, bits: u32) -> __m128i {
  if T::BITS == 64 && T::SIGNED {
    sra_epi64(x, bits)
  } else {
    sse2::shr_reg::<T>(x, bits)
  }
}

// ─── Per-lane amount (16/32/64-bit, counts already wrapped) ───

#[inline]
#[target_feature(enable = "avx512f,avx512vl,avx512bw")]
unsafe fn shl_var_wrapped<T: Lane>(x: __m128i, counts: __m128i) -> __m128i {
  match T::BITS {
    16 => _mm_sllv_epi16(x, counts),
    32 => _mm_sllv_epi32(x, counts),
    _ => _mm_sllv_epi64(x, counts),
  }
}

#[inline]
#[target_feature(enable = "avx512f,avx512vl,avx512bw")]
unsafe fn shr_var_wrapped<T: Lane>(x: __m128i, counts: __m128i) -> __m128i {
  match (T::BITS, T::SIGNED) {
    (16, false) => _mm_srlv_epi16(x, counts),
    (16, true) => _mm_srav_epi16(x, counts),
    (32, false) => _mm_srlv_epi32(x, counts),
    (32, true) => _mm_srav_epi32(x, counts),
    (_, false) => _mm_srlv_epi64(x, counts),
    (_, true) => _mm_srav_epi64(x, counts),
  }
}

// ─── Predicated ───

/// Opmask with bit `i` set iff lane `i` of `m` is nonzero.
#[inline]
#[target_feature(enable = "avx512f,avx512vl,avx512bw")]
unsafe fn to_kmask<T: Lane>(m: __m128i) -> __mmask8 {
  match T::BITS {
    16 => _mm_test_epi16_mask(m, m),
    32 => _mm_test_epi32_mask(m, m),
    _ => _mm_test_epi64_mask(m, m),
  }
}

#[inline]
#[target_feature(enable = "avx512f,avx512vl,avx512bw")]
unsafe fn masked_shl_var<T: Lane>(src: __m128i, k: __mmask8, x: __m128i, counts: __m128i) -> __m128i {
  match T::BITS {
    16 => _mm_mask_sllv_epi16(src, k, x, counts),
    32 => _mm_mask_sllv_epi32(src, k, x, counts),
    _ => _mm_mask_sllv_epi64(src, k, x, counts),
  }
}

#[inline]
#[target_feature(enable = "avx512f,avx512vl,avx512bw")]
unsafe fn masked_shr_var<T: Lane>(src: __m128i, k: __mmask8, x: __m128i, counts: __m128i) -> __m128i {
  match (T::BITS, T::SIGNED) {
    (16, false) => _mm_mask_srlv_epi16(src, k, x, counts),
    (16, true) => _mm_mask_srav_epi16(src, k, x, counts),
    (32, false) => _mm_mask_srlv_epi32(src, k, x, counts),
    (32, true) => _mm_mask_srav_epi32(src, k, x, counts),
    (_, false) => _mm_mask_srlv_epi64(src, k, x, counts),
    (_, true) => _mm_mask_srav_epi64(src, k, x, counts),
  }
}

#[inline]
#[target_feature(enable = "avx512f,avx512vl,avx512bw")]
unsafe fn shuffle_bytes(table: __m128i, idx: __m128i) -> __m128i {
  _mm_shuffle_epi8(table, idx)
}

#[inline]
#[target_feature(enable = "avx512vbmi,avx512vl")]
unsafe fn multishift(data: __m128i, idx: __m128i) -> __m128i {
  // Control operand first.
  _mm_multishift_epi64_epi8(idx, data)
}

/// The AVX-512 operation set, shared by both tokens. They differ only in
/// how `multi_shift` is computed.
macro_rules! avx512_isa {
  ($token:ident => $target:expr, multi_shift: |$isa:ident, $v:ident, $idx:ident| $multi:expr) => {
    impl Isa for $token {
      const TARGET: Target = $target;

      #[inline]
      fn shl<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
        let () = ShiftAmount::<T, K>::CHECK;
        // SAFETY: AVX-512 implies SSE2.
        from_m128i(unsafe { sse2::shl_imm::<T, K>(to_m128i(v)) })
      }

      #[inline]
      fn shr<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
        let () = ShiftAmount::<T, K>::CHECK;
        if T::BITS == 64 && T::SIGNED {
          // SAFETY: the token proves AVX-512 F/VL.
          return from_m128i(unsafe { sra_epi64(to_m128i(v), K as u32) });
        }
        // SAFETY: AVX-512 implies SSE2.
        from_m128i(unsafe { sse2::shr_imm::<T, K>(to_m128i(v)) })
      }

      #[inline]
      fn shl_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
        // SAFETY: AVX-512 implies SSE2.
        from_m128i(unsafe { sse2::shl_reg::<T>(to_m128i(v), bits) })
      }

      #[inline]
      fn shr_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
        // SAFETY: the token proves AVX-512 F/VL/BW.
        from_m128i(unsafe { shr_reg::<T>(to_m128i(v), bits) })
      }

      #[inline]
      fn shl_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
        if T::BITS == 8 {
          return emulate::shl_var(self, v, s);
        }
        // SAFETY: the token proves AVX-512 F/VL/BW.
        from_m128i(unsafe { shl_var_wrapped::<T>(to_m128i(v), wrap_counts::<T>(to_m128i(s))) })
      }

      #[inline]
      fn shr_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
        if T::BITS == 8 {
          return emulate::shr_var(self, v, s);
        }
        // SAFETY: the token proves AVX-512 F/VL/BW.
        from_m128i(unsafe { shr_var_wrapped::<T>(to_m128i(v), wrap_counts::<T>(to_m128i(s))) })
      }

      #[inline]
      fn masked_shl_or_zero<T: Lane, const K: i32>(self, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
        self.masked_shl_or::<T, K>(Vec128::zero(), mask, v)
      }

      #[inline]
      fn masked_shr_or_zero<T: Lane, const K: i32>(self, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
        self.masked_shr_or::<T, K>(Vec128::zero(), mask, v)
      }

      #[inline]
      fn masked_shl_or<T: Lane, const K: i32>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
        let () = ShiftAmount::<T, K>::CHECK;
        self.masked_shl_var_or(base, mask, v, Vec128::splat(T::from_bits(K as u64)))
      }

      #[inline]
      fn masked_shr_or<T: Lane, const K: i32>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
        let () = ShiftAmount::<T, K>::CHECK;
        self.masked_shr_var_or(base, mask, v, Vec128::splat(T::from_bits(K as u64)))
      }

      #[inline]
      fn masked_shl_var_or<T: Lane>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
        if T::BITS == 8 {
          return mask.select(self.shl_var(v, s), base);
        }
        // SAFETY: the token proves AVX-512 F/VL/BW.
        from_m128i(unsafe {
          let k = to_kmask::<T>(to_m128i(mask.to_vec()));
          masked_shl_var::<T>(to_m128i(base), k, to_m128i(v), wrap_counts::<T>(to_m128i(s)))
        })
      }

      #[inline]
      fn masked_shr_var_or<T: Lane>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
        if T::BITS == 8 {
          return mask.select(self.shr_var(v, s), base);
        }
        // SAFETY: the token proves AVX-512 F/VL/BW.
        from_m128i(unsafe {
          let k = to_kmask::<T>(to_m128i(mask.to_vec()));
          masked_shr_var::<T>(to_m128i(base), k, to_m128i(v), wrap_counts::<T>(to_m128i(s)))
        })
      }

      #[inline]
      fn table_lookup_bytes(self, table: Vec128<u8>, idx: Vec128<u8>) -> Vec128<u8> {
        // SAFETY: AVX-512 implies SSSE3. Indices are masked to 0..16.
        from_m128i(unsafe { shuffle_bytes(to_m128i(table), to_m128i(idx.and(Vec128::splat(15)))) })
      }

      #[inline]
      fn multi_shift<T: Lane64>(self, v: Vec128<T>, idx: Vec128<u8>) -> Vec128<T> {
        let ($isa, $v, $idx) = (self, v, idx);
        $multi
      }
    }
  };
}

avx512_isa!(Avx512 => Target::Avx512, multi_shift: |isa, v, idx| emulate::multi_shift(isa, v, idx));

avx512_isa!(Avx512Vbmi => Target::Avx512Vbmi, multi_shift: |_isa, v, idx| {
  // SAFETY: the token proves AVX-512 VBMI and VL.
  from_m128i(unsafe { multishift(to_m128i(v), to_m128i(idx)) })
});

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{isa::Portable, reference};

  #[test]
  fn native_i64_arithmetic_right_shift() {
    let Some(isa) = Avx512::new(platform::caps()) else { return };
    let v = Vec128::<i64>::from_fn(|i| if i == 0 { i64::MIN } else { 0x4000_0000_0000_0001 });
    assert_eq!(isa.shr::<i64, 62>(v), Vec128::from_fn(|i| if i == 0 { -2 } else { 1 }));
    for bits in 0..64 {
      assert_eq!(isa.shr_same(v, bits), Portable.shr_same(v, bits), "bits {bits}");
    }
  }

  #[test]
  fn predicated_shifts_keep_inactive_lanes() {
    let Some(isa) = Avx512::new(platform::caps()) else { return };
    let base = Vec128::<i16>::splat(-9);
    let v = Vec128::<i16>::iota(-4);
    let s = Vec128::<i16>::from_fn(|i| i as i16 * 5);
    let mask = Mask128::<i16>::from_fn(|i| i % 3 != 1);
    assert_eq!(isa.masked_shr_var_or(base, mask, v, s), Portable.masked_shr_var_or(base, mask, v, s));
    assert_eq!(isa.masked_shl_var_or(base, mask, v, s), Portable.masked_shl_var_or(base, mask, v, s));
    assert_eq!(isa.masked_shl_or_zero::<i16, 15>(mask, v), Portable.masked_shl_or_zero::<i16, 15>(mask, v));
  }

  #[test]
  fn vbmi_multishift_is_a_rotation() {
    let Some(isa) = Avx512Vbmi::new(platform::caps()) else { return };
    let v = Vec128::<u64>::from_fn(|i| [0x0102_0304_0506_0708, 0x1020_3040_5060_7080][i]);
    let idx = Vec128::<u8>::from_fn(|i| (i as u8).wrapping_mul(29));
    let out = isa.multi_shift(v, idx).bitcast::<u8>();
    for j in 0..16 {
      assert_eq!(out.lane(j), reference::multishift_byte(v.lane(j / 8), idx.lane(j)), "byte {j}");
    }
  }
}
