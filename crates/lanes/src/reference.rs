//! Scalar reference definitions.
//!
//! One function per operation, written for obviousness rather than speed.
//! Signed arithmetic goes through `i128` so no intermediate can overflow.
//! Every target is tested against these.
//!
//! ```
//! use lanes::reference;
//!
//! assert_eq!(reference::shr(-7i8, 1), -4);
//! assert_eq!(reference::rounding_shr(-7i8, 1), -3);
//! assert_eq!(reference::multishift_byte(0x0102_0304_0506_0708u64, 8), 0x07);
//! ```

use crate::{Lane, Lane64, Mask128, Vec128};

/// `x << k`, dropping bits shifted past the top.
#[must_use]
pub fn shl<T: Lane>(x: T, k: u32) -> T {
  debug_assert!(k < T::BITS);
  T::from_bits(x.to_bits() << k)
}

/// `x >> k`: zero fill for unsigned lanes, sign fill for signed ones.
#[must_use]
pub fn shr<T: Lane>(x: T, k: u32) -> T {
  debug_assert!(k < T::BITS);
  T::from_bits((x.to_i128() >> k) as u64)
}

/// Left shift by `s mod BITS`.
#[must_use]
pub fn shl_var<T: Lane>(x: T, s: T) -> T {
  shl(x, wrap_count::<T>(s))
}

/// Right shift by `s mod BITS`.
#[must_use]
pub fn shr_var<T: Lane>(x: T, s: T) -> T {
  shr(x, wrap_count::<T>(s))
}

/// Right shift by `k`, rounding half up. `k = 0` is the identity.
///
/// Equivalent to `floor(x / 2^k + 1/2)`.
#[must_use]
pub fn rounding_shr<T: Lane>(x: T, k: u32) -> T {
  debug_assert!(k < T::BITS);
  if k == 0 {
    return x;
  }
  let wide = x.to_i128();
  T::from_bits(((wide + (1i128 << (k - 1))) >> k) as u64)
}

/// Per-lane rounding shift by `s mod BITS`.
#[must_use]
pub fn rounding_shr_var<T: Lane>(x: T, s: T) -> T {
  rounding_shr(x, wrap_count::<T>(s))
}

/// `(a + b + 1) >> 1` without intermediate overflow.
#[must_use]
pub fn average_round<T: Lane>(a: T, b: T) -> T {
  T::from_bits(((a.to_i128() + b.to_i128() + 1) >> 1) as u64)
}

/// Low byte of `q` rotated right by `idx mod 64`.
#[must_use]
pub fn multishift_byte<T: Lane64>(q: T, idx: u8) -> u8 {
  q.to_bits().rotate_right(u32::from(idx & 63)) as u8
}

/// Lane-wise `mask ? yes : no`.
#[must_use]
pub fn select<T: Lane>(mask: Mask128<T>, yes: Vec128<T>, no: Vec128<T>) -> Vec128<T> {
  Vec128::from_fn(|i| if mask.is_set(i) { yes.lane(i) } else { no.lane(i) })
}

#[inline]
fn wrap_count<T: Lane>(s: T) -> u32 {
  (s.to_bits() & u64::from(T::BITS - 1)) as u32
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn signed_right_shift_replicates_sign() {
    assert_eq!(shr(i8::MIN, 7), -1);
    assert_eq!(shr(i8::MIN + 1, 7), -1);
    assert_eq!(shr(-1i64, 63), -1);
    assert_eq!(shr(u8::MAX, 7), 1);
    assert_eq!(shr(i16::MAX, 14), 1);
  }

  #[test]
  fn left_shift_truncates() {
    assert_eq!(shl(0x81u8, 1), 0x02);
    assert_eq!(shl(1i32, 31), i32::MIN);
    assert_eq!(shl(u64::MAX, 63), 1 << 63);
  }

  #[test]
  fn rounding_is_half_up() {
    assert_eq!(rounding_shr(5u8, 1), 3);
    assert_eq!(rounding_shr(4u8, 1), 2);
    assert_eq!(rounding_shr(-5i8, 1), -2);
    assert_eq!(rounding_shr(-6i8, 2), -1);
    assert_eq!(rounding_shr(u8::MAX, 1), 128);
    assert_eq!(rounding_shr(u64::MAX, 63), 2);
    assert_eq!(rounding_shr(i32::MIN, 31), -1);
    assert_eq!(rounding_shr(77u16, 0), 77);
  }

  #[test]
  fn rounding_adds_the_last_bit_shifted_out() {
    for x in i8::MIN..=i8::MAX {
      for k in 1..8 {
        let half = shr(x, k - 1) & 1;
        assert_eq!(rounding_shr(x, k), shr(x, k).wrapping_add(half), "x {x} k {k}");
      }
    }
  }

  #[test]
  fn rounding_by_one_is_average_with_zero() {
    for x in 0..=u8::MAX {
      assert_eq!(rounding_shr(x, 1), average_round(x, 0));
    }
    for x in i8::MIN..=i8::MAX {
      assert_eq!(rounding_shr(x, 1), average_round(x, 0));
    }
  }

  #[test]
  fn variable_counts_wrap() {
    assert_eq!(shl_var(1u32, 33), 2);
    assert_eq!(shr_var(-64i8, -1), -1);
    assert_eq!(rounding_shr_var(3u16, 17), 2);
  }

  #[test]
  fn multishift_is_a_rotation() {
    let q = 0x8000_0000_0000_0001u64;
    assert_eq!(multishift_byte(q, 0), 0x01);
    assert_eq!(multishift_byte(q, 63), 0x03);
    assert_eq!(multishift_byte(q, 127), 0x03);
    assert_eq!(multishift_byte(-2i64, 1), 0xFF);
    assert_eq!(multishift_byte(-2i64, 0), 0xFE);
  }

  #[test]
  fn select_picks_by_lane() {
    let m = Mask128::<u32>::first_n(2);
    let out = select(m, Vec128::splat(1), Vec128::splat(9));
    assert_eq!(out, Vec128::from_fn(|i| if i < 2 { 1 } else { 9 }));
  }
}
