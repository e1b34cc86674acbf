//! Differential fuzzing of every runnable engine against the scalar reference.
//!
//! Checks, for the lane type picked by the input:
//! - Uniform and per-lane shifts match the reference lane by lane
//! - Rounding shifts match the reference and never fault
//! - Masked shifts equal `select(mask, shift, fallback)`
//! - Out-of-range uniform counts do not panic

#![no_main]

use arbitrary::Arbitrary;
use lanes::{Engine, Lane, Mask128, Vec128, reference};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  lane: u8,
  values: [u8; 16],
  counts: [u8; 16],
  base: [u8; 16],
  mask: u16,
  bits: u32,
}

fuzz_target!(|input: Input| {
  match input.lane % 8 {
    0 => check::<u8>(&input),
    1 => check::<i8>(&input),
    2 => check::<u16>(&input),
    3 => check::<i16>(&input),
    4 => check::<u32>(&input),
    5 => check::<i32>(&input),
    6 => check::<u64>(&input),
    _ => check::<i64>(&input),
  }
});

fn check<T: Lane>(input: &Input) {
  let v = Vec128::<T>::from_bytes(input.values);
  let s = Vec128::<T>::from_bytes(input.counts);
  let base = Vec128::<T>::from_bytes(input.base);
  let mask = Mask128::<T>::from_fn(|i| (input.mask >> i) & 1 == 1);
  let k = input.bits % T::BITS;

  for engine in lanes::engines() {
    let target = engine.target();

    // ─── Uniform counts ───
    assert_eq!(engine.shift_left_same(v, k), v.map(|x| reference::shl(x, k)), "shl_same k={k} on {target}");
    assert_eq!(engine.shift_right_same(v, k), v.map(|x| reference::shr(x, k)), "shr_same k={k} on {target}");
    assert_eq!(
      engine.rounding_shift_right_same(v, k),
      v.map(|x| reference::rounding_shr(x, k)),
      "rounding_shr_same k={k} on {target}"
    );

    // ─── Per-lane counts ───
    let left = engine.shl(v, s);
    let right = engine.shr(v, s);
    assert_eq!(left, v.zip_map(s, reference::shl_var), "shl on {target}");
    assert_eq!(right, v.zip_map(s, reference::shr_var), "shr on {target}");
    assert_eq!(engine.rounding_shr(v, s), v.zip_map(s, reference::rounding_shr_var), "rounding_shr on {target}");

    // ─── Masked ───
    assert_eq!(engine.masked_shl_or(base, mask, v, s), reference::select(mask, left, base), "masked_shl_or on {target}");
    assert_eq!(engine.masked_shr_or(base, mask, v, s), reference::select(mask, right, base), "masked_shr_or on {target}");

    // ─── Out-of-range uniform counts: result unspecified, must not fault ───
    let _ = engine.shift_left_same(v, input.bits);
    let _ = engine.shift_right_same(v, input.bits);
  }

  // ─── Engines agree with each other ───
  let portable = Engine::portable();
  for engine in lanes::engines() {
    assert_eq!(engine.rounding_shr(v, s), portable.rounding_shr(v, s), "{} vs portable", engine.target());
  }
}
