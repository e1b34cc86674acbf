//! Instruction-set tokens.
//!
//! Each [`Target`] has one zero-sized token type implementing [`Isa`]. Holding
//! a token proves its instructions are executable on this machine, so token
//! methods are safe to call. Tokens are obtained from
//! [`Engine::dispatch`](crate::Engine::dispatch) or, for a specific target,
//! from `Token::new(caps)`.
//!
//! Every method has exactly one meaning, given by its portable definition
//! (see [`reference`](crate::reference)). Tokens override the methods they
//! can do natively and inherit emulated defaults for the rest.
//!
//! ```
//! use lanes::{Engine, Isa, Kernel, Vec128};
//!
//! struct Halve(Vec128<i32>);
//!
//! impl Kernel for Halve {
//!   type Output = Vec128<i32>;
//!
//!   fn run<I: Isa>(self, isa: I) -> Vec128<i32> {
//!     isa.rounding_shr::<i32, 1>(self.0)
//!   }
//! }
//!
//! let out = Engine::detect().dispatch(Halve(Vec128::splat(-3)));
//! assert_eq!(out.get(0), Some(-1));
//! ```

use core::fmt;

use backend::Target;

use crate::{Lane, Lane64, Mask128, Vec128};

pub(crate) mod emulate;
mod portable;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "wasm32")]
mod wasm32;
#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "aarch64")]
pub use aarch64::Neon;
pub use portable::Portable;
#[cfg(target_arch = "wasm32")]
pub use wasm32::Simd128;
#[cfg(target_arch = "x86_64")]
pub use x86_64::{Avx2, Avx512, Avx512Vbmi, Sse2};

pub(crate) mod sealed {
  pub trait Sealed {}
}

/// The shift operation set, implemented once per target.
///
/// Constant amounts are const generics validated at build time:
/// `isa.shl::<u8, 8>(v)` does not compile. Uniform amounts must be below
/// `T::BITS`; larger values give unspecified lanes but never fault. Per-lane
/// amounts are taken modulo `T::BITS`.
pub trait Isa: Copy + Send + Sync + fmt::Debug + 'static + sealed::Sealed {
  /// The target this token executes.
  const TARGET: Target;

  // ─── Constant amount ───

  /// Shift every lane left by `K`, filling with zeros.
  fn shl<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T>;

  /// Shift every lane right by `K`: logical for unsigned lanes, arithmetic
  /// for signed ones.
  fn shr<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T>;

  // ─── Uniform runtime amount ───

  fn shl_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T>;

  fn shr_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T>;

  // ─── Per-lane amount ───

  /// `out[i] = v[i] << (s[i] mod BITS)`.
  #[inline]
  fn shl_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    emulate::shl_var(self, v, s)
  }

  /// `out[i] = v[i] >> (s[i] mod BITS)`.
  #[inline]
  fn shr_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    emulate::shr_var(self, v, s)
  }

  // ─── Rounding right shift ───

  /// Right shift by `K`, rounding half up: adds back the last bit shifted
  /// out. `K = 0` is the identity.
  #[inline]
  fn rounding_shr<T: Lane, const K: i32>(self, v: Vec128<T>) -> Vec128<T> {
    let () = crate::lane::ShiftAmount::<T, K>::CHECK;
    self.rounding_shr_same(v, K as u32)
  }

  #[inline]
  fn rounding_shr_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    emulate::rounding_shr_same(self, v, bits)
  }

  #[inline]
  fn rounding_shr_var<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    emulate::rounding_shr_var(self, v, s)
  }

  // ─── Masked ───

  /// `shl::<K>(v)` where `mask` is active, zero elsewhere.
  #[inline]
  fn masked_shl_or_zero<T: Lane, const K: i32>(self, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
    mask.select(self.shl::<T, K>(v), Vec128::zero())
  }

  #[inline]
  fn masked_shr_or_zero<T: Lane, const K: i32>(self, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
    mask.select(self.shr::<T, K>(v), Vec128::zero())
  }

  /// `shl::<K>(v)` where `mask` is active, `base` elsewhere.
  #[inline]
  fn masked_shl_or<T: Lane, const K: i32>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
    mask.select(self.shl::<T, K>(v), base)
  }

  #[inline]
  fn masked_shr_or<T: Lane, const K: i32>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
    mask.select(self.shr::<T, K>(v), base)
  }

  #[inline]
  fn masked_shl_var_or<T: Lane>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    mask.select(self.shl_var(v, s), base)
  }

  #[inline]
  fn masked_shr_var_or<T: Lane>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    mask.select(self.shr_var(v, s), base)
  }

  // ─── Byte permutation and multishift ───

  /// `out[i] = table[idx[i]]` for indices below 16.
  #[inline]
  fn table_lookup_bytes(self, table: Vec128<u8>, idx: Vec128<u8>) -> Vec128<u8> {
    table.table_lookup(idx)
  }

  /// For each 64-bit lane `q` and each of its 8 index bytes `b`, the output
  /// byte is the low 8 bits of `q.rotate_right(b mod 64)`.
  #[inline]
  fn multi_shift<T: Lane64>(self, v: Vec128<T>, idx: Vec128<u8>) -> Vec128<T> {
    emulate::multi_shift(self, v, idx)
  }
}

/// Code that runs once against a concrete token.
///
/// [`Engine::dispatch`](crate::Engine::dispatch) resolves the target a single
/// time and calls [`run`](Kernel::run) with its token, so a kernel built from
/// many operations pays for dispatch once.
pub trait Kernel {
  type Output;

  fn run<I: Isa>(self, isa: I) -> Self::Output;
}
