//! MultiShift on 64-bit lanes.

mod common;

use common::{random_values, type_name};
use lanes::{Engine, Lane64, Vec128, assert_vec_eq, reference};

const EVEN: u64 = 0x0102_0304_0506_0708;
const ODD: u64 = 0x1020_3040_5060_7080;

fn alternating<T: Lane64>(even: u64, odd: u64) -> Vec128<T> {
  Vec128::from_fn(|i| T::from_bits(if i % 2 == 0 { even } else { odd }))
}

/// The same 8 indices for every 64-bit group.
fn per_group(indices: [u8; 8]) -> Vec128<u8> {
  Vec128::from_fn(|j| indices[j % 8])
}

fn expected<T: Lane64>(v: Vec128<T>, idx: Vec128<u8>) -> Vec128<T> {
  let bytes = Vec128::<u8>::from_fn(|j| {
    let q = v.get(j / 8).unwrap_or(T::ZERO);
    reference::multishift_byte(q, idx.get(j).unwrap_or(0))
  });
  bytes.bitcast()
}

fn check_byte_moves<T: Lane64>(engine: Engine) {
  let v = alternating::<T>(EVEN, ODD);
  let ctx = (type_name::<T>(), engine.target());

  let identity = per_group([0, 8, 16, 24, 32, 40, 48, 56]);
  assert_vec_eq!(v, engine.multi_shift(v, identity), "identity {ctx:?}");

  let reverse = per_group([56, 48, 40, 32, 24, 16, 8, 0]);
  assert_vec_eq!(alternating::<T>(EVEN.swap_bytes(), ODD.swap_bytes()), engine.multi_shift(v, reverse), "byteswap {ctx:?}");
}

fn check_bit_offsets<T: Lane64>(engine: Engine) {
  let v = alternating::<T>(0x0102_0102_0102_0102, 0x0102_0102_0102_0102);
  let ctx = (type_name::<T>(), engine.target());

  let climbing = per_group([0, 9, 18, 27, 36, 45, 54, 63]);
  assert_vec_eq!(expected(v, climbing), engine.multi_shift(v, climbing), "stride 9 {ctx:?}");

  let overlapping = per_group([0, 7, 14, 21, 28, 35, 42, 49]);
  assert_vec_eq!(expected(v, overlapping), engine.multi_shift(v, overlapping), "stride 7 {ctx:?}");
}

fn check_byte_move_with_bit_shift<T: Lane64>(engine: Engine) {
  let v = alternating::<T>(EVEN, ODD);
  let ctx = (type_name::<T>(), engine.target());

  let shifted = per_group([4, 12, 20, 28, 36, 44, 52, 60]);
  let rotr4 = alternating::<T>(EVEN.rotate_right(4), ODD.rotate_right(4));
  assert_vec_eq!(rotr4, engine.multi_shift(v, shifted), "rotr4 {ctx:?}");

  let reversed = per_group([60, 52, 44, 36, 28, 20, 12, 4]);
  let want = alternating::<T>(EVEN.rotate_right(4).swap_bytes(), ODD.rotate_right(4).swap_bytes());
  assert_vec_eq!(want, engine.multi_shift(v, reversed), "byteswap rotr4 {ctx:?}");
}

#[test]
fn byte_aligned_indices_move_bytes() {
  for engine in common::engines() {
    check_byte_moves::<u64>(engine);
    check_byte_moves::<i64>(engine);
  }
}

#[test]
fn unaligned_indices_extract_bit_fields() {
  for engine in common::engines() {
    check_bit_offsets::<u64>(engine);
    check_bit_offsets::<i64>(engine);
  }
}

#[test]
fn combined_byte_reorder_and_bit_shift() {
  for engine in common::engines() {
    check_byte_move_with_bit_shift::<u64>(engine);
    check_byte_move_with_bit_shift::<i64>(engine);
  }
}

#[test]
fn random_indices_match_rotation() {
  for engine in common::engines() {
    for seed in 1..64u64 {
      let v = random_values::<u64>(seed);
      let idx = random_values::<u8>(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
      assert_vec_eq!(expected(v, idx), engine.multi_shift(v, idx), "seed {seed} on {}", engine.target());
      let w = v.bitcast::<i64>();
      assert_vec_eq!(expected(w, idx), engine.multi_shift(w, idx), "seed {seed} on {}", engine.target());
    }
  }
}

#[test]
fn index_bits_above_five_are_ignored() {
  for engine in common::engines() {
    let v = random_values::<u64>(42);
    let idx = random_values::<u8>(43);
    let low = idx.and(Vec128::splat(63));
    assert_eq!(engine.multi_shift(v, idx), engine.multi_shift(v, low));
  }
}

#[test]
fn groups_do_not_exchange_bytes() {
  for engine in common::engines() {
    let v = Vec128::<u64>::from_fn(|i| if i == 0 { 0 } else { u64::MAX });
    let idx = Vec128::<u8>::from_fn(|j| (j as u8).wrapping_mul(13));
    let out = engine.multi_shift(v, idx);
    assert_eq!(out.get(0), Some(0));
    assert_eq!(out.get(1), Some(u64::MAX));
  }
}
