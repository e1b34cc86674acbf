//! 128-bit vectors and masks, plus the portable primitives shifts build on.
//!
//! [`Vec128<T>`] is an immutable value of `128 / T::BITS` lanes stored in
//! little-endian lane order (lane 0 occupies the lowest bytes), matching the
//! register layout of every supported target. [`Mask128<T>`] has the same
//! lane count; each lane is all-ones (active) or all-zeros (inactive).
//!
//! Everything here is plain scalar code over a `u128`. Targets replace the
//! hot primitives with native instructions inside their [`Isa`](crate::Isa)
//! tokens; these definitions are the semantics those replacements must match.
//!
//! ```
//! use lanes::{Mask128, Vec128};
//!
//! let v = Vec128::<u16>::iota(1);
//! assert_eq!(v.get(0), Some(1));
//! assert_eq!(v.get(7), Some(8));
//! assert_eq!(v.get(8), None);
//!
//! let m = Mask128::<u16>::first_n(3);
//! let picked = m.select(v, Vec128::zero());
//! assert_eq!(picked.iter().collect::<Vec<_>>(), [1, 2, 3, 0, 0, 0, 0, 0]);
//! ```

use core::{
  fmt,
  hash::{Hash, Hasher},
  marker::PhantomData,
  ops,
};

use crate::{Lane, LengthError};

// ─────────────────────────────────────────────────────────────────────────────
// Vec128
// ─────────────────────────────────────────────────────────────────────────────

/// A 128-bit vector of `T` lanes.
#[repr(C, align(16))]
pub struct Vec128<T> {
  bytes: [u8; 16],
  lane: PhantomData<T>,
}

impl<T> Clone for Vec128<T> {
  #[inline(always)]
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Vec128<T> {}

impl<T> PartialEq for Vec128<T> {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.bytes == other.bytes
  }
}

impl<T> Eq for Vec128<T> {}

impl<T> Hash for Vec128<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.bytes.hash(state);
  }
}

impl<T: Lane> Default for Vec128<T> {
  #[inline]
  fn default() -> Self {
    Self::zero()
  }
}

impl<T: Lane> fmt::Debug for Vec128<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Vec128")?;
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<T: Lane> Vec128<T> {
  /// Number of lanes.
  pub const LANES: usize = T::LANES;

  /// All lanes zero.
  #[inline]
  #[must_use]
  pub const fn zero() -> Self {
    Self::from_bytes([0; 16])
  }

  /// Reinterpret 16 little-endian bytes.
  #[inline(always)]
  #[must_use]
  pub const fn from_bytes(bytes: [u8; 16]) -> Self {
    Self { bytes, lane: PhantomData }
  }

  /// The 16 little-endian bytes of this vector.
  #[inline(always)]
  #[must_use]
  pub const fn to_bytes(self) -> [u8; 16] {
    self.bytes
  }

  /// Reinterpret a `u128` (lane 0 in the low bits).
  #[inline(always)]
  #[must_use]
  pub const fn from_u128(bits: u128) -> Self {
    Self::from_bytes(bits.to_le_bytes())
  }

  /// The whole vector as a `u128` (lane 0 in the low bits).
  #[inline(always)]
  #[must_use]
  pub const fn to_u128(self) -> u128 {
    u128::from_le_bytes(self.bytes)
  }

  /// Lane `i`; callers guarantee `i < LANES`.
  #[inline(always)]
  pub(crate) fn lane(self, i: usize) -> T {
    T::from_bits((self.to_u128() >> (i as u32 * T::BITS)) as u64)
  }

  /// Build a vector lane by lane.
  #[inline]
  #[must_use]
  pub fn from_fn(mut f: impl FnMut(usize) -> T) -> Self {
    let mut acc = 0u128;
    for i in 0..T::LANES {
      acc |= u128::from(f(i).to_bits()) << (i as u32 * T::BITS);
    }
    Self::from_u128(acc)
  }

  /// Every lane set to `value`.
  #[inline]
  #[must_use]
  pub fn splat(value: T) -> Self {
    Self::from_fn(|_| value)
  }

  /// Lane `i` holds `first + i` (wrapping).
  #[inline]
  #[must_use]
  pub fn iota(first: T) -> Self {
    Self::from_fn(|i| T::from_bits(first.to_bits().wrapping_add(i as u64)))
  }

  /// Load the first `LANES` elements of `src`.
  ///
  /// # Errors
  ///
  /// [`LengthError`] if `src` holds fewer than `LANES` elements.
  #[inline]
  pub fn load(src: &[T]) -> Result<Self, LengthError> {
    let head = src.get(..T::LANES).ok_or(LengthError::new(T::LANES, src.len()))?;
    let mut iter = head.iter().copied();
    Ok(Self::from_fn(|_| iter.next().unwrap_or(T::ZERO)))
  }

  /// Store all lanes into the first `LANES` elements of `dst`.
  ///
  /// # Errors
  ///
  /// [`LengthError`] if `dst` holds fewer than `LANES` elements.
  #[inline]
  pub fn store(self, dst: &mut [T]) -> Result<(), LengthError> {
    let len = dst.len();
    let head = dst.get_mut(..T::LANES).ok_or(LengthError::new(T::LANES, len))?;
    for (slot, value) in head.iter_mut().zip(self.iter()) {
      *slot = value;
    }
    Ok(())
  }

  /// Extract lane `i`, or `None` past the last lane.
  #[inline]
  #[must_use]
  pub fn get(self, i: usize) -> Option<T> {
    (i < T::LANES).then(|| self.lane(i))
  }

  /// Iterate lanes from 0 upwards.
  #[inline]
  pub fn iter(self) -> impl Iterator<Item = T> + Clone {
    (0..T::LANES).map(move |i| self.lane(i))
  }

  /// Reinterpret the same 128 bits as lanes of `U`.
  #[inline(always)]
  #[must_use]
  pub const fn bitcast<U: Lane>(self) -> Vec128<U> {
    Vec128::from_bytes(self.bytes)
  }

  /// Apply `f` to every lane.
  #[inline]
  #[must_use]
  pub fn map(self, mut f: impl FnMut(T) -> T) -> Self {
    Self::from_fn(|i| f(self.lane(i)))
  }

  /// Apply `f` lane-wise to `self` and `other`.
  #[inline]
  #[must_use]
  pub fn zip_map(self, other: Self, mut f: impl FnMut(T, T) -> T) -> Self {
    Self::from_fn(|i| f(self.lane(i), other.lane(i)))
  }

  // ─── Bitwise ───

  #[inline(always)]
  #[must_use]
  pub const fn and(self, other: Self) -> Self {
    Self::from_u128(self.to_u128() & other.to_u128())
  }

  #[inline(always)]
  #[must_use]
  pub const fn or(self, other: Self) -> Self {
    Self::from_u128(self.to_u128() | other.to_u128())
  }

  #[inline(always)]
  #[must_use]
  pub const fn xor(self, other: Self) -> Self {
    Self::from_u128(self.to_u128() ^ other.to_u128())
  }

  /// `!self & other`.
  #[inline(always)]
  #[must_use]
  pub const fn and_not(self, other: Self) -> Self {
    Self::from_u128(!self.to_u128() & other.to_u128())
  }

  #[inline(always)]
  #[must_use]
  pub const fn not(self) -> Self {
    Self::from_u128(!self.to_u128())
  }

  // ─── Arithmetic (wrapping) ───

  #[inline]
  #[must_use]
  pub fn add(self, other: Self) -> Self {
    self.zip_map(other, T::wrapping_add)
  }

  #[inline]
  #[must_use]
  pub fn sub(self, other: Self) -> Self {
    self.zip_map(other, T::wrapping_sub)
  }

  /// `floor((a + b + 1) / 2)` per lane, computed without overflow.
  #[inline]
  #[must_use]
  pub fn average_round(self, other: Self) -> Self {
    self.zip_map(other, |a, b| {
      let avg = (a.to_i128() + b.to_i128() + 1) >> 1;
      T::from_bits(avg as u64)
    })
  }

  // ─── Comparisons ───

  /// Lanes where `self == other`.
  #[inline]
  #[must_use]
  pub fn cmp_eq(self, other: Self) -> Mask128<T> {
    Mask128::from_fn(|i| self.lane(i) == other.lane(i))
  }

  /// Lanes where `self != other`.
  #[inline]
  #[must_use]
  pub fn cmp_ne(self, other: Self) -> Mask128<T> {
    Mask128::from_fn(|i| self.lane(i) != other.lane(i))
  }
}

// ─── Byte permutation (needed by multishift) ───

impl Vec128<u8> {
  /// `out[i] = self[idx[i] & 15]`.
  ///
  /// Indices are expected below 16. Native lookups differ for larger
  /// indices, so callers must not rely on that behaviour.
  #[inline]
  #[must_use]
  pub fn table_lookup(self, idx: Vec128<u8>) -> Self {
    Self::from_fn(|i| self.lane(usize::from(idx.lane(i) & 15)))
  }

  /// Pair bytes 0..8 of `self` (low halves) with bytes 0..8 of `high`.
  #[inline]
  #[must_use]
  pub fn zip_lower(self, high: Self) -> Vec128<u16> {
    Vec128::from_fn(|i| u16::from(self.lane(i)) | (u16::from(high.lane(i)) << 8))
  }

  /// Pair bytes 8..16 of `self` (low halves) with bytes 8..16 of `high`.
  #[inline]
  #[must_use]
  pub fn zip_upper(self, high: Self) -> Vec128<u16> {
    Vec128::from_fn(|i| u16::from(self.lane(i + 8)) | (u16::from(high.lane(i + 8)) << 8))
  }

  /// Low byte of each 16-bit lane; `lower` fills bytes 0..8, `upper` 8..16.
  #[inline]
  #[must_use]
  pub fn truncate_pairs(lower: Vec128<u16>, upper: Vec128<u16>) -> Self {
    Self::from_fn(|i| if i < 8 { lower.lane(i) as u8 } else { upper.lane(i - 8) as u8 })
  }
}

impl<T: Lane> ops::BitAnd for Vec128<T> {
  type Output = Self;

  #[inline(always)]
  fn bitand(self, rhs: Self) -> Self {
    self.and(rhs)
  }
}

impl<T: Lane> ops::BitOr for Vec128<T> {
  type Output = Self;

  #[inline(always)]
  fn bitor(self, rhs: Self) -> Self {
    self.or(rhs)
  }
}

impl<T: Lane> ops::BitXor for Vec128<T> {
  type Output = Self;

  #[inline(always)]
  fn bitxor(self, rhs: Self) -> Self {
    self.xor(rhs)
  }
}

impl<T: Lane> ops::Not for Vec128<T> {
  type Output = Self;

  #[inline(always)]
  fn not(self) -> Self {
    Vec128::not(self)
  }
}

impl<T: Lane> ops::Add for Vec128<T> {
  type Output = Self;

  #[inline]
  fn add(self, rhs: Self) -> Self {
    Vec128::add(self, rhs)
  }
}

impl<T: Lane> ops::Sub for Vec128<T> {
  type Output = Self;

  #[inline]
  fn sub(self, rhs: Self) -> Self {
    Vec128::sub(self, rhs)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mask128
// ─────────────────────────────────────────────────────────────────────────────

/// A per-lane predicate for `Vec128<T>`.
pub struct Mask128<T> {
  bits: Vec128<T>,
}

impl<T> Clone for Mask128<T> {
  #[inline(always)]
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Mask128<T> {}

impl<T> PartialEq for Mask128<T> {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.bits == other.bits
  }
}

impl<T> Eq for Mask128<T> {}

impl<T> Hash for Mask128<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.bits.hash(state);
  }
}

impl<T: Lane> fmt::Debug for Mask128<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Mask128")?;
    f.debug_list().entries((0..T::LANES).map(|i| self.is_set(i))).finish()
  }
}

impl<T: Lane> Mask128<T> {
  /// Every lane active.
  #[inline]
  #[must_use]
  pub const fn all() -> Self {
    Self {
      bits: Vec128::from_u128(u128::MAX),
    }
  }

  /// Every lane inactive.
  #[inline]
  #[must_use]
  pub const fn none() -> Self {
    Self { bits: Vec128::zero() }
  }

  /// Build a mask lane by lane.
  #[inline]
  #[must_use]
  pub fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
    Self {
      bits: Vec128::from_fn(|i| if f(i) { T::from_bits(u64::MAX) } else { T::ZERO }),
    }
  }

  /// Lanes `0..n` active; `n >= LANES` activates all of them.
  #[inline]
  #[must_use]
  pub fn first_n(n: usize) -> Self {
    Self::from_fn(|i| i < n)
  }

  /// Active where the lane of `v` is nonzero.
  #[inline]
  #[must_use]
  pub fn from_vec(v: Vec128<T>) -> Self {
    v.cmp_ne(Vec128::zero())
  }

  /// All-ones lanes where active, zero elsewhere.
  #[inline(always)]
  #[must_use]
  pub const fn to_vec(self) -> Vec128<T> {
    self.bits
  }

  /// Whether lane `i` is active (`false` past the last lane).
  #[inline]
  #[must_use]
  pub fn is_set(self, i: usize) -> bool {
    self.bits.get(i).is_some_and(|lane| lane != T::ZERO)
  }

  /// Number of active lanes.
  #[inline]
  #[must_use]
  pub fn count(self) -> usize {
    (0..T::LANES).filter(|&i| self.is_set(i)).count()
  }

  /// Bit `i` set iff lane `i` is active.
  #[inline]
  #[must_use]
  pub fn bitmask(self) -> u16 {
    (0..T::LANES).fold(0u16, |acc, i| acc | (u16::from(self.is_set(i)) << i))
  }

  /// `yes` where active, `no` elsewhere.
  #[inline(always)]
  #[must_use]
  pub const fn select(self, yes: Vec128<T>, no: Vec128<T>) -> Vec128<T> {
    self.bits.and(yes).or(self.bits.and_not(no))
  }

  #[inline]
  #[must_use]
  pub const fn and(self, other: Self) -> Self {
    Self {
      bits: self.bits.and(other.bits),
    }
  }

  #[inline]
  #[must_use]
  pub const fn or(self, other: Self) -> Self {
    Self {
      bits: self.bits.or(other.bits),
    }
  }

  #[inline]
  #[must_use]
  pub const fn not(self) -> Self {
    Self { bits: self.bits.not() }
  }
}
