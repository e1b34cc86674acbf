//! The dispatching entry point.
//!
//! An [`Engine`] is a validated [`Target`]: it can only be built for a target
//! the running machine supports. Each method matches on the target once and
//! forwards to that target's [`Isa`] token. Callers hold the engine
//! explicitly; there is no process-wide current target.

use backend::Target;

use crate::{Isa, Kernel, Lane, Lane64, Mask128, Vec128, config};

/// Shift operations on the target selected at construction.
///
/// ```
/// use lanes::{Engine, Target, Vec128};
///
/// let portable = Engine::portable();
/// assert_eq!(portable.target(), Target::Portable);
///
/// let v = Vec128::<u8>::splat(0b1001_0110);
/// assert_eq!(portable.shift_left::<2, _>(v).get(0), Some(0b0101_1000));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Engine {
  // Invariant: supported by the running machine.
  target: Target,
}

impl Engine {
  /// The best engine for this machine.
  ///
  /// Honors `LANES_FORCE_TARGET` (see [`config`](crate::config)). The
  /// choice is made once and cached.
  #[inline]
  #[must_use]
  pub fn detect() -> Self {
    static CACHED: backend::OnceCache<Target> = backend::OnceCache::new();
    Self {
      target: CACHED.get_or_init(|| config::get().effective),
    }
  }

  /// An engine for `target`, if this machine supports it.
  #[inline]
  #[must_use]
  pub fn with_target(target: Target) -> Option<Self> {
    target.is_supported(platform::caps()).then_some(Self { target })
  }

  /// The scalar engine. Always available.
  #[inline]
  #[must_use]
  pub const fn portable() -> Self {
    Self {
      target: Target::Portable,
    }
  }

  /// The target this engine executes.
  #[inline]
  #[must_use]
  pub const fn target(self) -> Target {
    self.target
  }

  /// Run `kernel` with this engine's token.
  #[inline]
  pub fn dispatch<K: Kernel>(self, kernel: K) -> K::Output {
    with_isa!(self.target, isa => kernel.run(isa))
  }

  // ─── Constant amount ───

  /// Shift every lane left by `K`. `K` outside `0..T::BITS` fails to build.
  #[inline]
  #[must_use]
  pub fn shift_left<const K: i32, T: Lane>(self, v: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.shl::<T, K>(v))
  }

  /// Shift every lane right by `K`: logical for unsigned, arithmetic for
  /// signed lanes.
  #[inline]
  #[must_use]
  pub fn shift_right<const K: i32, T: Lane>(self, v: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.shr::<T, K>(v))
  }

  // ─── Uniform amount ───

  /// Shift every lane left by `bits`.
  ///
  /// `bits` must be below `T::BITS`. Larger values give unspecified lanes
  /// that may differ between targets; nothing faults.
  #[inline]
  #[must_use]
  pub fn shift_left_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    with_isa!(self.target, isa => isa.shl_same(v, bits))
  }

  /// Shift every lane right by `bits`, same precondition as
  /// [`shift_left_same`](Self::shift_left_same).
  #[inline]
  #[must_use]
  pub fn shift_right_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    with_isa!(self.target, isa => isa.shr_same(v, bits))
  }

  // ─── Per-lane amount ───

  /// `out[i] = v[i] << (s[i] mod T::BITS)`.
  #[inline]
  #[must_use]
  pub fn shl<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.shl_var(v, s))
  }

  /// `out[i] = v[i] >> (s[i] mod T::BITS)`.
  #[inline]
  #[must_use]
  pub fn shr<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.shr_var(v, s))
  }

  // ─── Rounding ───

  /// Right shift by `K` rounding half up; `K = 0` returns `v`.
  ///
  /// Equals `shift_right::<K>(v)` plus bit `K - 1` of each lane, and never
  /// overflows.
  #[inline]
  #[must_use]
  pub fn rounding_shift_right<const K: i32, T: Lane>(self, v: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.rounding_shr::<T, K>(v))
  }

  #[inline]
  #[must_use]
  pub fn rounding_shift_right_same<T: Lane>(self, v: Vec128<T>, bits: u32) -> Vec128<T> {
    with_isa!(self.target, isa => isa.rounding_shr_same(v, bits))
  }

  /// Per-lane rounding shift by `s[i] mod T::BITS`.
  #[inline]
  #[must_use]
  pub fn rounding_shr<T: Lane>(self, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.rounding_shr_var(v, s))
  }

  // ─── Masked ───

  /// `shift_left::<K>(v)` in active lanes, zero elsewhere.
  #[inline]
  #[must_use]
  pub fn masked_shift_left_or_zero<const K: i32, T: Lane>(self, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.masked_shl_or_zero::<T, K>(mask, v))
  }

  #[inline]
  #[must_use]
  pub fn masked_shift_right_or_zero<const K: i32, T: Lane>(self, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.masked_shr_or_zero::<T, K>(mask, v))
  }

  /// `shift_left::<K>(v)` in active lanes, `base` elsewhere.
  #[inline]
  #[must_use]
  pub fn masked_shift_left_or<const K: i32, T: Lane>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.masked_shl_or::<T, K>(base, mask, v))
  }

  #[inline]
  #[must_use]
  pub fn masked_shift_right_or<const K: i32, T: Lane>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.masked_shr_or::<T, K>(base, mask, v))
  }

  /// `shl(v, s)` in active lanes, `base` elsewhere.
  #[inline]
  #[must_use]
  pub fn masked_shl_or<T: Lane>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.masked_shl_var_or(base, mask, v, s))
  }

  #[inline]
  #[must_use]
  pub fn masked_shr_or<T: Lane>(self, base: Vec128<T>, mask: Mask128<T>, v: Vec128<T>, s: Vec128<T>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.masked_shr_var_or(base, mask, v, s))
  }

  // ─── MultiShift ───

  /// Per-byte bit extraction from 64-bit lanes.
  ///
  /// Byte `j` of lane `i` in the output is the low byte of
  /// `v[i].rotate_right(idx[8 * i + j] mod 64)`.
  ///
  /// ```
  /// use lanes::{Engine, Vec128};
  ///
  /// let v = Vec128::<u64>::splat(0x0102_0304_0506_0708);
  /// // Reverse the bytes of each lane.
  /// let idx = Vec128::<u8>::from_fn(|j| (56 - 8 * (j % 8)) as u8);
  /// let out = Engine::detect().multi_shift(v, idx);
  /// assert_eq!(out.get(0), Some(0x0807_0605_0403_0201));
  /// ```
  #[inline]
  #[must_use]
  pub fn multi_shift<T: Lane64>(self, v: Vec128<T>, idx: Vec128<u8>) -> Vec128<T> {
    with_isa!(self.target, isa => isa.multi_shift(v, idx))
  }
}

impl Default for Engine {
  #[inline]
  fn default() -> Self {
    Self::detect()
  }
}

/// Every engine this machine can run, portable first.
///
/// Useful for cross-checking targets against each other.
pub fn engines() -> impl Iterator<Item = Engine> {
  Target::ALL.into_iter().filter_map(Engine::with_target)
}
