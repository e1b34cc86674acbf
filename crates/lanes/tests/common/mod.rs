//! Helpers shared by the integration tests.
#![allow(dead_code)]

use lanes::{Engine, Lane, Vec128};

/// Every engine runnable on this machine, portable first.
pub fn engines() -> Vec<Engine> {
  lanes::engines().collect()
}

/// Lane `i` holds `i` for unsigned types and `i - LANES` for signed ones, so
/// signed inputs cover negative values.
pub fn iota_values<T: Lane>() -> Vec128<T> {
  if T::SIGNED {
    Vec128::iota(T::from_bits((T::LANES as u64).wrapping_neg()))
  } else {
    Vec128::iota(T::ZERO)
  }
}

/// Deterministic pseudo-random lanes (xorshift64).
pub fn random_values<T: Lane>(seed: u64) -> Vec128<T> {
  let mut x = seed | 1;
  Vec128::from_fn(|_| {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    T::from_bits(x)
  })
}

/// Largest in-range shift amount.
pub fn max_shift<T: Lane>() -> u32 {
  T::BITS - 1
}

/// Short type name for failure messages.
pub fn type_name<T: Lane>() -> &'static str {
  let full = core::any::type_name::<T>();
  full.rsplit("::").next().unwrap_or(full)
}

/// Instantiate a generic check for all eight lane types.
#[macro_export]
macro_rules! for_each_lane_type {
  ($check:ident $(, $arg:expr)*) => {{
    $check::<u8>($($arg),*);
    $check::<i8>($($arg),*);
    $check::<u16>($($arg),*);
    $check::<i16>($($arg),*);
    $check::<u32>($($arg),*);
    $check::<i32>($($arg),*);
    $check::<u64>($($arg),*);
    $check::<i64>($($arg),*);
  }};
}

/// Instantiate a generic check for the four unsigned lane types.
#[macro_export]
macro_rules! for_each_unsigned_type {
  ($check:ident $(, $arg:expr)*) => {{
    $check::<u8>($($arg),*);
    $check::<u16>($($arg),*);
    $check::<u32>($($arg),*);
    $check::<u64>($($arg),*);
  }};
}

/// Instantiate a generic check for the four signed lane types.
#[macro_export]
macro_rules! for_each_signed_type {
  ($check:ident $(, $arg:expr)*) => {{
    $check::<i8>($($arg),*);
    $check::<i16>($($arg),*);
    $check::<i32>($($arg),*);
    $check::<i64>($($arg),*);
  }};
}
