//! Shift targets.
//!
//! A target is one concrete instruction set the shift engine can be
//! specialised for. The set is closed: every target has a token type in
//! `lanes::isa`, and the engine matches on this enum exactly once per call.
//!
//! # Target Overview
//!
//! | Target | Arch | Requires | Native variable shifts |
//! |--------|------|----------|------------------------|
//! | Portable | any | nothing | scalar per lane |
//! | Sse2 | x86_64 | SSE2 | none (bit decomposition) |
//! | Avx2 | x86_64 | AVX2 + SSSE3 + SSE4.1 | 32/64-bit |
//! | Avx512 | x86_64 | AVX-512 F/VL/BW | 16/32/64-bit, masked |
//! | Avx512Vbmi | x86_64 | Avx512 + VBMI | as Avx512, plus multishift |
//! | Neon | aarch64 | NEON | all widths, rounding |
//! | Simd128 | wasm32 | simd128 | none (bit decomposition) |
//!
//! All targets operate on 128-bit vectors.

use core::{fmt, str::FromStr};

use platform::{Arch, Caps, caps};

use crate::dispatch::{Candidate, select};

/// A shift-engine target.
///
/// Ordering follows declaration order. Within one architecture, a greater
/// target is a strict capability superset of a lesser one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Target {
  /// Scalar per-lane code. Always available, used as the fallback.
  #[default]
  Portable = 0,
  /// x86_64 baseline 128-bit integer vectors.
  Sse2 = 1,
  /// x86_64 with VEX variable shifts.
  Avx2 = 2,
  /// x86_64 with EVEX 128-bit forms and opmask predication.
  Avx512 = 3,
  /// x86_64 AVX-512 plus `VPMULTISHIFTQB`.
  Avx512Vbmi = 4,
  /// aarch64 Advanced SIMD.
  Neon = 5,
  /// WebAssembly fixed-width SIMD.
  Simd128 = 6,
}

impl Target {
  /// Every target, in declaration order.
  pub const ALL: [Self; 7] = [
    Self::Portable,
    Self::Sse2,
    Self::Avx2,
    Self::Avx512,
    Self::Avx512Vbmi,
    Self::Neon,
    Self::Simd128,
  ];

  /// Convert to numeric value.
  #[inline]
  #[must_use]
  pub const fn as_u8(self) -> u8 {
    self as u8
  }

  /// Short lowercase name, also accepted by [`FromStr`].
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      Self::Sse2 => "sse2",
      Self::Avx2 => "avx2",
      Self::Avx512 => "avx512",
      Self::Avx512Vbmi => "avx512-vbmi",
      Self::Neon => "neon",
      Self::Simd128 => "simd128",
    }
  }

  /// Architecture-qualified name for diagnostics, e.g. `"x86_64/avx2"`.
  #[inline]
  #[must_use]
  pub const fn qualified_name(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      Self::Sse2 => "x86_64/sse2",
      Self::Avx2 => "x86_64/avx2",
      Self::Avx512 => "x86_64/avx512",
      Self::Avx512Vbmi => "x86_64/avx512-vbmi",
      Self::Neon => "aarch64/neon",
      Self::Simd128 => "wasm32/simd128",
    }
  }

  /// The architecture this target's instructions belong to.
  ///
  /// `None` for [`Target::Portable`], which runs anywhere.
  #[inline]
  #[must_use]
  pub const fn arch(self) -> Option<Arch> {
    match self {
      Self::Portable => None,
      Self::Sse2 | Self::Avx2 | Self::Avx512 | Self::Avx512Vbmi => Some(Arch::X86_64),
      Self::Neon => Some(Arch::Aarch64),
      Self::Simd128 => Some(Arch::Wasm32),
    }
  }

  /// Capabilities that must be present to execute this target.
  #[inline]
  #[must_use]
  pub const fn requires(self) -> Caps {
    use platform::caps::{aarch64, wasm, x86};
    match self {
      Self::Portable => Caps::NONE,
      Self::Sse2 => x86::SSE2_READY,
      Self::Avx2 => x86::AVX2_READY,
      Self::Avx512 => x86::AVX512_READY,
      Self::Avx512Vbmi => x86::AVX512_VBMI_READY,
      Self::Neon => aarch64::NEON_READY,
      Self::Simd128 => wasm::SIMD128,
    }
  }

  /// Whether this target can run in this binary given `caps`.
  ///
  /// Checks both the architecture of the build and the capability bits, so
  /// an override that claims foreign-architecture features never selects a
  /// foreign target.
  #[inline]
  #[must_use]
  pub fn is_supported(self, caps: Caps) -> bool {
    let arch_ok = match self.arch() {
      None => true,
      Some(arch) => arch == Arch::current(),
    };
    arch_ok && caps.has(self.requires())
  }

  /// Whether this target uses hardware vector instructions.
  #[inline]
  #[must_use]
  pub const fn is_simd(self) -> bool {
    !matches!(self, Self::Portable)
  }

  /// The best target for `caps` on the current architecture.
  #[must_use]
  pub fn best(caps: Caps) -> Self {
    select(caps, Self::candidates()).func
  }

  /// The best target for the detected platform.
  #[inline]
  #[must_use]
  pub fn detect() -> Self {
    Self::best(caps())
  }

  /// Best-first candidate list for the current architecture.
  #[inline]
  #[must_use]
  pub const fn candidates() -> &'static [Candidate<Self>] {
    CANDIDATES
  }
}

#[cfg(target_arch = "x86_64")]
const CANDIDATES: &[Candidate<Target>] = crate::candidates![
  "x86_64/avx512-vbmi" => Target::Avx512Vbmi.requires() => Target::Avx512Vbmi,
  "x86_64/avx512"      => Target::Avx512.requires()     => Target::Avx512,
  "x86_64/avx2"        => Target::Avx2.requires()       => Target::Avx2,
  "x86_64/sse2"        => Target::Sse2.requires()       => Target::Sse2,
  "portable"           => Caps::NONE                    => Target::Portable,
];

#[cfg(target_arch = "aarch64")]
const CANDIDATES: &[Candidate<Target>] = crate::candidates![
  "aarch64/neon" => Target::Neon.requires() => Target::Neon,
  "portable"     => Caps::NONE              => Target::Portable,
];

#[cfg(target_arch = "wasm32")]
const CANDIDATES: &[Candidate<Target>] = crate::candidates![
  "wasm32/simd128" => Target::Simd128.requires() => Target::Simd128,
  "portable"       => Caps::NONE                 => Target::Portable,
];

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "wasm32")))]
const CANDIDATES: &[Candidate<Target>] = crate::candidates![
  "portable" => Caps::NONE => Target::Portable,
];

impl fmt::Display for Target {
  #[inline]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Target {
  type Err = ParseTargetError;

  /// Parse a target name, ignoring ASCII case.
  ///
  /// Accepts [`Target::name`] plus common aliases (`scalar`, `avx3`,
  /// `avx512vbmi`, `asimd`, `wasm`).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    let aliases: &[(&str, Self)] = &[
      ("portable", Self::Portable),
      ("scalar", Self::Portable),
      ("sse2", Self::Sse2),
      ("avx2", Self::Avx2),
      ("avx512", Self::Avx512),
      ("avx3", Self::Avx512),
      ("avx512-vbmi", Self::Avx512Vbmi),
      ("avx512vbmi", Self::Avx512Vbmi),
      ("avx3-dl", Self::Avx512Vbmi),
      ("neon", Self::Neon),
      ("asimd", Self::Neon),
      ("simd128", Self::Simd128),
      ("wasm", Self::Simd128),
    ];
    aliases
      .iter()
      .find(|(name, _)| s.eq_ignore_ascii_case(name))
      .map(|&(_, target)| target)
      .ok_or(ParseTargetError::new())
  }
}

/// Unknown target name.
///
/// Returned by [`Target::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct ParseTargetError;

impl ParseTargetError {
  /// Create a new parse error.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for ParseTargetError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for ParseTargetError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("unknown shift target (expected one of: ")?;
    for (i, target) in Target::ALL.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      f.write_str(target.name())?;
    }
    f.write_str(")")
  }
}

impl core::error::Error for ParseTargetError {}
