//! Lane element types.
//!
//! [`Lane`] is implemented for the eight fixed-width integers
//! `u8 i8 u16 i16 u32 i32 u64 i64` and nothing else (the trait is sealed).
//! All arithmetic is modulo 2^BITS. Unsigned lanes never sign-extend,
//! signed lanes always do on right shifts.

use core::{fmt, hash::Hash, marker::PhantomData};

mod sealed {
  pub trait Sealed {}
}

/// An integer lane type.
pub trait Lane:
  Copy + Default + Eq + Hash + fmt::Debug + fmt::Display + fmt::LowerHex + Send + Sync + 'static + sealed::Sealed
{
  /// Width in bits: 8, 16, 32 or 64.
  const BITS: u32;
  /// Whether right shifts replicate the sign bit.
  const SIGNED: bool;
  /// Lanes per 128-bit vector.
  const LANES: usize = (128 / Self::BITS) as usize;
  /// Mask of the low `BITS` bits of a `u64`.
  const WIDTH_MASK: u64 = u64::MAX >> (64 - Self::BITS);

  const ZERO: Self;
  const ONE: Self;
  const MIN: Self;
  const MAX: Self;

  /// The unsigned type of the same width.
  type Unsigned: Lane<Unsigned = Self::Unsigned>;

  /// Raw two's-complement bits, zero-extended to 64.
  fn to_bits(self) -> u64;

  /// Truncate `bits` to `BITS` and reinterpret.
  fn from_bits(bits: u64) -> Self;

  /// Numeric value (sign-extended for signed lanes).
  fn to_i128(self) -> i128;

  fn wrapping_add(self, rhs: Self) -> Self;

  fn wrapping_sub(self, rhs: Self) -> Self;

  /// The sign bit as a raw value: `1 << (BITS - 1)`.
  #[inline]
  #[must_use]
  fn sign_bit() -> u64 {
    1u64 << (Self::BITS - 1)
  }
}

/// Lanes that are 64 bits wide (`u64`, `i64`).
pub trait Lane64: Lane {}

macro_rules! impl_lane {
  ($($t:ty => $u:ty, $signed:expr;)+) => {$(
    impl sealed::Sealed for $t {}

    impl Lane for $t {
      const BITS: u32 = <$t>::BITS;
      const SIGNED: bool = $signed;
      const ZERO: Self = 0;
      const ONE: Self = 1;
      const MIN: Self = <$t>::MIN;
      const MAX: Self = <$t>::MAX;

      type Unsigned = $u;

      #[inline(always)]
      fn to_bits(self) -> u64 {
        self as $u as u64
      }

      #[inline(always)]
      fn from_bits(bits: u64) -> Self {
        bits as $u as $t
      }

      #[inline(always)]
      fn to_i128(self) -> i128 {
        self as i128
      }

      #[inline(always)]
      fn wrapping_add(self, rhs: Self) -> Self {
        <$t>::wrapping_add(self, rhs)
      }

      #[inline(always)]
      fn wrapping_sub(self, rhs: Self) -> Self {
        <$t>::wrapping_sub(self, rhs)
      }
    }
  )+};
}

impl_lane! {
  u8 => u8, false;
  i8 => u8, true;
  u16 => u16, false;
  i16 => u16, true;
  u32 => u32, false;
  i32 => u32, true;
  u64 => u64, false;
  i64 => u64, true;
}

impl Lane64 for u64 {}
impl Lane64 for i64 {}

/// Compile-time validation of a constant shift amount.
///
/// Referencing [`ShiftAmount::CHECK`] in a function body turns an
/// out-of-range `K` into a build error for that instantiation.
pub(crate) struct ShiftAmount<T, const K: i32>(PhantomData<T>);

impl<T: Lane, const K: i32> ShiftAmount<T, K> {
  pub(crate) const CHECK: () = assert!(
    K >= 0 && (K as u32) < T::BITS,
    "constant shift amount must lie in [0, lane bits)"
  );
}
