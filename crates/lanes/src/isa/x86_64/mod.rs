//! x86_64 tokens.
//!
//! All targets use 128-bit XMM registers. Wider extensions contribute their
//! VEX/EVEX-encoded 128-bit forms:
//!
//! - SSE2: immediate and register-count shifts for 16/32/64-bit lanes
//! - AVX2: per-lane `VPSLLV/VPSRLV` (32/64) and `VPSRAVD`, `PSHUFB`
//! - AVX-512 (F+VL+BW): 16-bit per-lane shifts, `VPSRAQ`, opmask predication
//! - AVX-512 VBMI: `VPMULTISHIFTQB`
//!
//! # Safety
//!
//! Intrinsic helpers are `#[target_feature]` functions. They are only called
//! through a token, and a token is only constructed after the corresponding
//! features were detected.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::__m128i;

use crate::{Lane, Vec128};

mod avx2;
mod avx512;
mod sse2;

pub use avx2::Avx2;
pub use avx512::{Avx512, Avx512Vbmi};
pub use sse2::Sse2;

#[inline(always)]
fn to_m128i<T: Lane>(v: Vec128<T>) -> __m128i {
  // SAFETY: `__m128i` is 16 bytes of plain integer data with no invalid
  // bit patterns.
  unsafe { core::mem::transmute::<[u8; 16], __m128i>(v.to_bytes()) }
}

#[inline(always)]
fn from_m128i<T: Lane>(x: __m128i) -> Vec128<T> {
  // SAFETY: as above, in the other direction.
  Vec128::from_bytes(unsafe { core::mem::transmute::<__m128i, [u8; 16]>(x) })
}
