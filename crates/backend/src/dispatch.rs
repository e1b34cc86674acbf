//! Candidate selection.
//!
//! - [`Candidate`]: a choice with capability requirements
//! - [`Selected`]: the result of selection
//! - [`select`]: pick the first satisfied candidate from a best-first list
//! - [`candidates!`](crate::candidates): list literal sugar
//!
//! # Usage
//!
//! ```ignore
//! use backend::dispatch::{Candidate, Selected, select};
//! use platform::caps::{Caps, x86};
//!
//! const LIST: &[Candidate<Target>] = backend::candidates![
//!     "x86_64/avx2" => x86::AVX2_READY => Target::Avx2,
//!     "portable"    => Caps::NONE      => Target::Portable,
//! ];
//!
//! let selected: Selected<Target> = select(platform::caps(), LIST);
//! ```

use platform::Caps;

/// A candidate with capability requirements.
///
/// Candidates are ordered from best to worst. [`select`] returns the first
/// one whose requirements are satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "x86_64/avx2").
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// The payload: a target, a function pointer, a table.
  pub func: F,
}

impl<F> Candidate<F> {
  /// Create a new candidate.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// The result of selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selected<F> {
  /// Human-readable name of the selected candidate.
  pub name: &'static str,
  /// The selected payload.
  pub func: F,
}

impl<F> Selected<F> {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Select the best candidate from a best-first list.
///
/// # Panics
///
/// Panics if no candidate matches. The last candidate should always require
/// [`Caps::NONE`].
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Selected<F> {
  for candidate in candidates {
    if caps.has(candidate.requires) {
      return Selected::new(candidate.name, candidate.func);
    }
  }

  panic!("no matching candidate: the candidate list must end with a portable fallback");
}

/// Build a `&[Candidate<_>]` literal.
///
/// ```ignore
/// const LIST: &[Candidate<u8>] = backend::candidates![
///     "fast"     => x86::AVX2_READY => 2,
///     "portable" => Caps::NONE      => 0,
/// ];
/// ```
#[macro_export]
macro_rules! candidates {
  ($($name:literal => $requires:expr => $func:expr),+ $(,)?) => {
    &[$($crate::dispatch::Candidate::new($name, $requires, $func)),+]
  };
}
