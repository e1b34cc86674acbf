//! Runtime target configuration.
//!
//! [`Engine::detect`](crate::Engine::detect) picks the best supported target.
//! Benchmarks and tests can pin a target instead:
//!
//! ```text
//! LANES_FORCE_TARGET=auto|portable|sse2|avx2|avx512|avx512-vbmi|neon|simd128
//! ```
//!
//! The variable is read once per process (`std` only). A forced target is a
//! *request*: if this machine cannot run it, selection falls back to auto so
//! dispatch never executes unsupported instructions.

use backend::Target;
use platform::Caps;

/// Name of the environment variable holding the forced target.
pub const FORCE_TARGET_ENV: &str = "LANES_FORCE_TARGET";

/// Effective target configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
  /// Target requested through the environment, `None` for auto.
  pub requested_force: Option<Target>,
  /// Target actually used by [`Engine::detect`](crate::Engine::detect).
  pub effective: Target,
}

impl Config {
  /// Resolve a request against `caps`.
  #[must_use]
  pub fn resolve(requested_force: Option<Target>, caps: Caps) -> Self {
    Self {
      requested_force,
      effective: clamp_force_to_caps(requested_force, caps),
    }
  }

  /// Whether the request was honored as given.
  #[inline]
  #[must_use]
  pub fn is_forced(&self) -> bool {
    self.requested_force.is_some_and(|t| t == self.effective)
  }
}

/// Parse a force value. `auto` and the empty string mean no override.
///
/// # Errors
///
/// [`backend::ParseTargetError`] for unknown names.
pub fn parse_force(value: &str) -> Result<Option<Target>, backend::ParseTargetError> {
  let value = value.trim();
  if value.is_empty() || value.eq_ignore_ascii_case("auto") {
    return Ok(None);
  }
  value.parse().map(Some)
}

#[inline]
#[must_use]
fn clamp_force_to_caps(requested: Option<Target>, caps: Caps) -> Target {
  match requested {
    Some(target) if target.is_supported(caps) => target,
    _ => Target::best(caps),
  }
}

#[cfg(feature = "std")]
fn read_env_force() -> Option<Target> {
  let value = std::env::var(FORCE_TARGET_ENV).ok()?;
  // Unknown names are ignored rather than failing detection.
  parse_force(&value).ok().flatten()
}

#[cfg(feature = "std")]
fn requested_force() -> Option<Target> {
  use std::sync::OnceLock;
  static FORCE: OnceLock<Option<Target>> = OnceLock::new();
  *FORCE.get_or_init(read_env_force)
}

#[cfg(not(feature = "std"))]
fn requested_force() -> Option<Target> {
  None
}

/// The current configuration: environment request clamped to detected caps.
#[must_use]
pub fn get() -> Config {
  Config::resolve(requested_force(), platform::caps())
}
