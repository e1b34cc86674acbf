//! Error types.
//!
//! Shift operations themselves are total and never fail. The only fallible
//! entry points are slice loads and stores.

use core::fmt;

/// A slice was too short to fill (or receive) a whole vector.
///
/// Returned by [`Vec128::load`](crate::Vec128::load) and
/// [`Vec128::store`](crate::Vec128::store).
///
/// ```
/// use lanes::{LengthError, Vec128};
///
/// let err = Vec128::<u32>::load(&[1, 2, 3]).unwrap_err();
/// assert_eq!(err, LengthError::new(4, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LengthError {
  needed: usize,
  got: usize,
}

impl LengthError {
  /// Create a new length error.
  #[inline]
  #[must_use]
  pub const fn new(needed: usize, got: usize) -> Self {
    Self { needed, got }
  }

  /// Lanes required.
  #[inline]
  #[must_use]
  pub const fn needed(&self) -> usize {
    self.needed
  }

  /// Lanes provided.
  #[inline]
  #[must_use]
  pub const fn got(&self) -> usize {
    self.got
  }
}

impl fmt::Display for LengthError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "slice holds {} lanes, a vector needs {}", self.got, self.needed)
  }
}

impl core::error::Error for LengthError {}
