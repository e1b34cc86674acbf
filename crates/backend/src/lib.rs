//! Target selection for the lanes workspace.
//!
//! - **Targets**: the closed set of instruction sets the shift engine is
//!   specialised for ([`Target`])
//! - **Dispatch**: best-first candidate lists resolved against detected
//!   capabilities ([`dispatch::select`], [`candidates!`])
//! - **Caching**: a `no_std`-friendly set-once cell ([`OnceCache`])
//!
//! # Usage
//!
//! ```ignore
//! use backend::Target;
//!
//! let target = Target::best(platform::caps());
//! println!("shift target: {target}");
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod cache;
pub mod dispatch;
pub mod target;

pub use cache::OnceCache;
pub use dispatch::{Candidate, Selected, select};
// Re-export platform types for convenience.
pub use platform;
pub use target::{ParseTargetError, Target};
