//! Dispatch introspection.
//!
//! ```
//! use lanes::DispatchInfo;
//!
//! let info = DispatchInfo::current();
//! println!("{info}");
//! // Example output: "x86_64/avx512 on Caps(x86_64, [sse2, ..., avx512bw])"
//! ```

use core::fmt;

use backend::Target;

use crate::{Config, Engine};

/// Which target runs, and why.
///
/// Zero-allocation: holds the platform description and the resolved
/// configuration by value.
#[derive(Clone, Copy)]
pub struct DispatchInfo {
  platform: platform::Description,
  config: Config,
  selected: Target,
}

impl DispatchInfo {
  /// Dispatch info for the current process.
  #[inline]
  #[must_use]
  pub fn current() -> Self {
    Self {
      platform: platform::describe(),
      config: crate::config::get(),
      selected: Engine::detect().target(),
    }
  }

  /// Architecture and capabilities as detected (or overridden).
  #[inline]
  #[must_use]
  pub fn platform(&self) -> platform::Description {
    self.platform
  }

  /// The target [`Engine::detect`] uses.
  #[inline]
  #[must_use]
  pub fn selected(&self) -> Target {
    self.selected
  }

  /// Target requested through `LANES_FORCE_TARGET`, if any.
  #[inline]
  #[must_use]
  pub fn requested(&self) -> Option<Target> {
    self.config.requested_force
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} on {}", self.selected.qualified_name(), self.platform)?;
    if let Some(requested) = self.config.requested_force
      && requested != self.selected
    {
      write!(f, " (requested {requested}, unsupported)")?;
    }
    Ok(())
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo")
      .field("platform", &format_args!("{}", self.platform))
      .field("requested", &self.config.requested_force)
      .field("selected", &self.selected)
      .finish()
  }
}
