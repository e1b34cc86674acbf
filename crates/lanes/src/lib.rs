//! Portable 128-bit SIMD shifts with hardware acceleration.
//!
//! Algorithm code is written once against [`Engine`] (or generically over an
//! [`Isa`] token) and runs on whichever vector instruction set the host
//! supports. Every target produces bit-identical results.
//!
//! # Operations
//!
//! | Operation | Engine | Amount |
//! |-----------|--------|--------|
//! | Constant shift | [`Engine::shift_left`], [`Engine::shift_right`] | const generic, checked at build time |
//! | Uniform shift | [`Engine::shift_left_same`], [`Engine::shift_right_same`] | runtime `u32`, must be below lane bits |
//! | Per-lane shift | [`Engine::shl`], [`Engine::shr`] | vector, taken modulo lane bits |
//! | Rounding shift | [`Engine::rounding_shift_right`], [`Engine::rounding_shift_right_same`], [`Engine::rounding_shr`] | all three forms |
//! | Masked shift | [`Engine::masked_shift_left_or_zero`], [`Engine::masked_shl_or`], ... | inactive lanes take a fallback |
//! | MultiShift | [`Engine::multi_shift`] | per-byte bit index into 64-bit lanes |
//!
//! Right shifts are logical for unsigned lanes and arithmetic for signed ones.
//!
//! # Targets
//!
//! | Target | Arch | Native per-lane shifts | Native multishift |
//! |--------|------|------------------------|-------------------|
//! | Portable | any | scalar | scalar |
//! | SSE2 | x86_64 | - | - |
//! | AVX2 | x86_64 | 16 (widened), 32, 64 | - |
//! | AVX-512 | x86_64 | 16, 32, 64, masked | - |
//! | AVX-512 VBMI | x86_64 | 16, 32, 64, masked | `VPMULTISHIFTQB` |
//! | NEON | aarch64 | 8, 16, 32, 64, rounding | - |
//! | simd128 | wasm32 | - | - |
//!
//! Missing native forms are emulated from the target's own uniform shifts and
//! byte shuffles.
//!
//! # Example
//!
//! ```rust
//! use lanes::{Engine, Mask128, Vec128};
//!
//! let engine = Engine::detect();
//!
//! let v = Vec128::<i16>::iota(-4);
//! assert_eq!(engine.shift_right::<1, _>(v).get(0), Some(-2));
//!
//! // Per-lane counts wrap modulo the lane width.
//! let s = Vec128::<u32>::from_fn(|i| i as u32 * 17);
//! let out = engine.shl(Vec128::splat(1u32), s);
//! assert_eq!(out.iter().collect::<Vec<_>>(), [1, 1 << 17, 1 << 2, 1 << 19]);
//!
//! // Round half up.
//! assert_eq!(engine.rounding_shift_right::<2, _>(Vec128::splat(6u8)).get(0), Some(2));
//!
//! // Only lane 0 shifts, the other lane keeps the fallback.
//! let m = Mask128::<u64>::first_n(1);
//! let out = engine.masked_shift_left_or::<4, _>(Vec128::splat(7), m, Vec128::splat(1));
//! assert_eq!(out.iter().collect::<Vec<_>>(), [16, 7]);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the `std` feature for embedded use:
//!
//! ```toml
//! [dependencies]
//! lanes = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, runtime detection and the `LANES_FORCE_TARGET` environment
//! override are unavailable; targets enabled at compile time are still used.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// Internal macros must be declared before modules that use them.
#[macro_use]
mod macros;

pub mod config;
mod engine;
mod error;
mod introspect;
pub mod isa;
mod lane;
pub mod reference;
mod vec;
pub mod verify;

pub use backend::Target;
pub use config::Config;
pub use engine::{Engine, engines};
pub use error::LengthError;
pub use introspect::DispatchInfo;
pub use isa::{Isa, Kernel};
pub use lane::{Lane, Lane64};
pub use vec::{Mask128, Vec128};
