//! Capability detection.
//!
//! - Compile-time detection via `cfg!(target_feature = "...")`
//! - Runtime detection via `is_*_feature_detected!` (requires `std`)
//! - Caching: `OnceLock` with `std`, an atomic state machine without
//! - A trusted override for bare metal and tests
//! - Miri: always portable (no intrinsics are interpreted)

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Compile-Time Static Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Capabilities known at compile time (`-C target-feature` / `-C target-cpu`).
///
/// ```
/// const CAPS: platform::Caps = platform::caps_static();
///
/// #[cfg(target_arch = "x86_64")]
/// assert!(CAPS.has(platform::caps::x86::SSE2));
/// ```
#[inline(always)]
#[must_use]
pub const fn caps_static() -> Caps {
  #[allow(unused_macros)]
  macro_rules! detect {
    ($caps:ident; $($feature:literal => $cap:expr),+ $(,)?) => {
      $(if cfg!(target_feature = $feature) { $caps = $caps.union($cap); })+
    };
  }

  #[allow(unused_mut)]
  let mut result = Caps::NONE;

  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  {
    use crate::caps::x86;
    detect!(result;
      "sse2" => x86::SSE2,
      "ssse3" => x86::SSSE3,
      "sse4.1" => x86::SSE41,
      "avx" => x86::AVX,
      "avx2" => x86::AVX2,
      "avx512f" => x86::AVX512F,
      "avx512vl" => x86::AVX512VL,
      "avx512bw" => x86::AVX512BW,
      "avx512vbmi" => x86::AVX512VBMI,
    );
  }

  #[cfg(target_arch = "aarch64")]
  {
    use crate::caps::aarch64;
    detect!(result;
      "neon" => aarch64::NEON,
    );
  }

  #[cfg(target_arch = "wasm32")]
  {
    use crate::caps::wasm;
    detect!(result;
      "simd128" => wasm::SIMD128,
    );
  }

  result
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime Detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(feature = "std", any(target_arch = "x86_64", target_arch = "x86")))]
fn caps_runtime() -> Caps {
  use crate::caps::x86;

  macro_rules! runtime {
    ($caps:ident; $($feature:tt => $cap:expr),+ $(,)?) => {
      $(if std::arch::is_x86_feature_detected!($feature) { $caps |= $cap; })+
    };
  }

  let mut caps = Caps::NONE;
  runtime!(caps;
    "sse2" => x86::SSE2,
    "ssse3" => x86::SSSE3,
    "sse4.1" => x86::SSE41,
    "avx" => x86::AVX,
    "avx2" => x86::AVX2,
    "avx512f" => x86::AVX512F,
    "avx512vl" => x86::AVX512VL,
    "avx512bw" => x86::AVX512BW,
    "avx512vbmi" => x86::AVX512VBMI,
  );
  caps
}

#[cfg(all(feature = "std", target_arch = "aarch64"))]
fn caps_runtime() -> Caps {
  use crate::caps::aarch64;

  // Advanced SIMD is mandatory on AArch64.
  aarch64::NEON
}

#[cfg(not(all(
  feature = "std",
  any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")
)))]
fn caps_runtime() -> Caps {
  Caps::NONE
}

#[cold]
#[cfg_attr(miri, allow(dead_code))]
fn detect_uncached() -> Caps {
  caps_static().union(caps_runtime())
}

// ─────────────────────────────────────────────────────────────────────────────
// Override
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: [AtomicU64; 4] = [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];

pub(crate) fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      for (slot, word) in OVERRIDE_BITS.iter().zip(caps.0) {
        slot.store(word, Ordering::Relaxed);
      }
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

pub(crate) fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

fn get_override() -> Option<Caps> {
  if !OVERRIDE_SET.load(Ordering::Acquire) {
    return None;
  }
  let mut words = [0u64; 4];
  for (word, slot) in words.iter_mut().zip(OVERRIDE_BITS.iter()) {
    *word = slot.load(Ordering::Relaxed);
  }
  Some(Caps(words))
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(feature = "std", not(miri)))]
fn cached() -> Caps {
  use std::sync::OnceLock;
  static CACHE: OnceLock<Caps> = OnceLock::new();
  *CACHE.get_or_init(detect_uncached)
}

#[cfg(all(not(feature = "std"), not(miri)))]
fn cached() -> Caps {
  use core::sync::atomic::AtomicU8;

  const UNINIT: u8 = 0;
  const INITING: u8 = 1;
  const READY: u8 = 2;

  static STATE: AtomicU8 = AtomicU8::new(UNINIT);
  static BITS: [AtomicU64; 4] = [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];

  fn load() -> Caps {
    let mut words = [0u64; 4];
    for (word, slot) in words.iter_mut().zip(BITS.iter()) {
      *word = slot.load(Ordering::Acquire);
    }
    Caps(words)
  }

  if STATE.load(Ordering::Acquire) == READY {
    return load();
  }

  match STATE.compare_exchange(UNINIT, INITING, Ordering::AcqRel, Ordering::Acquire) {
    Ok(_) => {
      let caps = detect_uncached();
      for (slot, word) in BITS.iter().zip(caps.0) {
        slot.store(word, Ordering::Release);
      }
      STATE.store(READY, Ordering::Release);
      caps
    }
    Err(INITING) => {
      while STATE.load(Ordering::Acquire) == INITING {
        core::hint::spin_loop();
      }
      load()
    }
    Err(_) => load(),
  }
}

/// Detected capabilities, honouring an active override.
#[inline]
pub(crate) fn caps() -> Caps {
  if let Some(caps) = get_override() {
    return caps;
  }

  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(not(miri))]
  {
    cached()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  #[cfg(not(miri))]
  fn static_caps_subset_of_detected() {
    let detected = detect_uncached();
    assert!(detected.has(caps_static()));
  }

  #[test]
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  fn x86_64_baseline_is_sse2() {
    assert!(caps_static().has(crate::caps::x86::SSE2));
    assert!(detect_uncached().has(crate::caps::x86::SSE2));
  }

  #[test]
  #[cfg(all(target_arch = "aarch64", not(miri)))]
  fn aarch64_baseline_is_neon() {
    assert!(detect_uncached().has(crate::caps::aarch64::NEON));
  }

  #[test]
  fn cache_is_stable() {
    #[cfg(not(miri))]
    assert_eq!(cached(), cached());
  }

  // The override is process-global, so every assertion touching it lives in
  // one test to keep the parallel test runner from interleaving them.
  #[test]
  fn override_roundtrip() {
    let forced = crate::caps::wasm::SIMD128 | crate::caps::aarch64::NEON;

    set_caps_override(Some(forced));
    assert!(has_override());
    assert_eq!(caps(), forced);

    set_caps_override(Some(Caps::NONE));
    assert_eq!(caps(), Caps::NONE);

    set_caps_override(None);
    assert!(!has_override());
    #[cfg(not(miri))]
    assert_eq!(caps(), cached());
  }
}
