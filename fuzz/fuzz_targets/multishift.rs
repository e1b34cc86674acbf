//! Fuzz target for MultiShift on 64-bit lanes.
//!
//! Every output byte must equal the low byte of its 64-bit group rotated
//! right by the low six bits of its index, on every engine.

#![no_main]

use arbitrary::Arbitrary;
use lanes::{Lane64, Vec128, reference};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  signed: bool,
  values: [u64; 2],
  indices: [u8; 16],
}

fuzz_target!(|input: Input| {
  let idx = Vec128::<u8>::from_bytes(input.indices);
  if input.signed {
    check(Vec128::<i64>::from_fn(|i| input.values[i] as i64), idx);
  } else {
    check(Vec128::<u64>::from_fn(|i| input.values[i]), idx);
  }
});

fn check<T: Lane64>(v: Vec128<T>, idx: Vec128<u8>) {
  let want = Vec128::<u8>::from_fn(|j| {
    let q = v.get(j / 8).unwrap_or(T::ZERO);
    reference::multishift_byte(q, idx.get(j).unwrap_or(0))
  })
  .bitcast::<T>();

  // ─── High index bits are ignored ───
  let low = idx.and(Vec128::splat(63));

  for engine in lanes::engines() {
    assert_eq!(engine.multi_shift(v, idx), want, "multi_shift on {}", engine.target());
    assert_eq!(engine.multi_shift(v, low), want, "masked indices on {}", engine.target());
  }
}
