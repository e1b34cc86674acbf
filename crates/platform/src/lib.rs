//! CPU capability detection for the lanes workspace.
//!
//! This crate is the **single source of truth** for "which vector
//! instructions can run here". Target selection in `backend` and the shift
//! engine in `lanes` query it instead of doing ad-hoc detection.
//!
//! # Main Entry Point
//!
//! ```ignore
//! use platform::caps::x86;
//!
//! let caps = platform::caps();
//! if caps.has(x86::AVX2_READY) {
//!     // VEX variable shifts are legal
//! }
//! ```
//!
//! # Design
//!
//! 1. **One API**: everything goes through [`caps()`].
//! 2. **Zero-cost when possible**: compile-time features come from `cfg!`.
//! 3. **Cached otherwise**: runtime detection is cached in `OnceLock` (std) or atomics (no_std).
//! 4. **Miri-safe**: under Miri, always returns portable-only caps.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod caps;
mod detect;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

use core::fmt;

pub use caps::{Arch, Caps};
pub use detect::caps_static;

/// Detected CPU capabilities.
///
/// # Caching
///
/// - With `std`: detection runs once and is cached in a `OnceLock`.
/// - Without `std`: compile-time features only, cached with atomics.
///
/// An override set through [`set_caps_override`] takes precedence.
///
/// # Miri
///
/// Under Miri, always returns [`Caps::NONE`] so only portable code runs.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Set or clear the capabilities override.
///
/// While set, [`caps()`] returns `value` instead of the detected set. Pass
/// `None` to resume detection.
///
/// The override is trusted: claiming features the CPU lacks lets the
/// dispatchers execute instructions that fault. Set it before spawning
/// threads that dispatch.
///
/// ```ignore
/// platform::set_caps_override(Some(platform::Caps::NONE));
/// // ... run with portable code only ...
/// platform::set_caps_override(None);
/// ```
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}

/// Snapshot of the platform for diagnostics.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Description {
  /// Architecture of the running binary.
  pub arch: Arch,
  /// Capabilities as seen by [`caps()`].
  pub caps: Caps,
  /// Whether `caps` came from an override.
  pub overridden: bool,
}

/// Describe the current platform (arch + capabilities).
#[inline]
#[must_use]
pub fn describe() -> Description {
  Description {
    arch: Arch::current(),
    caps: caps(),
    overridden: has_override(),
  }
}

impl fmt::Display for Description {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.caps)?;
    if self.overridden {
      f.write_str(" (override)")?;
    }
    Ok(())
  }
}

impl fmt::Debug for Description {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Description")
      .field("arch", &self.arch)
      .field("caps", &self.caps)
      .field("overridden", &self.overridden)
      .finish()
  }
}
