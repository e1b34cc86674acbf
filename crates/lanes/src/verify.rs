//! Lane-level comparison with useful failure reports.
//!
//! `assert_eq!` on two vectors prints both in full. These helpers name the
//! first differing lane and where the check was made, which is what matters
//! when a single target disagrees with the reference.
//!
//! ```
//! use lanes::{Vec128, verify::check_vec_eq};
//!
//! let want = Vec128::<u16>::iota(0);
//! let got = want.add(Vec128::from_fn(|i| u16::from(i == 5)));
//! let err = check_vec_eq(want, got).unwrap_err();
//! assert_eq!(err.lane, 5);
//! assert_eq!((err.expected, err.actual), (5, 6));
//! ```

use core::{fmt, panic::Location};

use crate::{Lane, Vec128};

/// The first lane where two vectors differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneMismatch<T> {
  pub lane: usize,
  pub expected: T,
  pub actual: T,
  /// Where the comparison was made.
  pub location: &'static Location<'static>,
}

impl<T: Lane> fmt::Display for LaneMismatch<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "lane {}: expected {} ({:#x}), got {} ({:#x}) at {}",
      self.lane, self.expected, self.expected, self.actual, self.actual, self.location
    )
  }
}

impl<T: Lane> core::error::Error for LaneMismatch<T> {}

/// Compare two vectors lane by lane.
///
/// # Errors
///
/// The first mismatching lane.
#[track_caller]
pub fn check_vec_eq<T: Lane>(expected: Vec128<T>, actual: Vec128<T>) -> Result<(), LaneMismatch<T>> {
  first_mismatch(expected.iter().zip(actual.iter()), Location::caller())
}

/// Compare a vector against expected lane values.
///
/// Only the first `min(expected.len(), LANES)` lanes are checked.
///
/// # Errors
///
/// The first mismatching lane.
#[track_caller]
pub fn check_lanes_eq<T: Lane>(expected: &[T], actual: Vec128<T>) -> Result<(), LaneMismatch<T>> {
  first_mismatch(expected.iter().copied().zip(actual.iter()), Location::caller())
}

fn first_mismatch<T: Lane>(
  pairs: impl Iterator<Item = (T, T)>,
  location: &'static Location<'static>,
) -> Result<(), LaneMismatch<T>> {
  match pairs.enumerate().find(|(_, (e, a))| e != a) {
    None => Ok(()),
    Some((lane, (expected, actual))) => Err(LaneMismatch {
      lane,
      expected,
      actual,
      location,
    }),
  }
}

/// Panic with a [`LaneMismatch`] report unless two vectors are equal.
///
/// An optional trailing format string adds context (target, lane type,
/// shift amount).
#[macro_export]
macro_rules! assert_vec_eq {
  ($expected:expr, $actual:expr $(,)?) => {
    if let ::core::result::Result::Err(mismatch) = $crate::verify::check_vec_eq($expected, $actual) {
      ::core::panic!("vectors differ: {mismatch}");
    }
  };
  ($expected:expr, $actual:expr, $($arg:tt)+) => {
    if let ::core::result::Result::Err(mismatch) = $crate::verify::check_vec_eq($expected, $actual) {
      ::core::panic!("vectors differ: {mismatch}: {}", ::core::format_args!($($arg)+));
    }
  };
}
