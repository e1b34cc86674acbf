//! Constant-amount and uniform-amount shifts on every available target.

mod common;

use common::{iota_values, max_shift, random_values, type_name};
use lanes::{Engine, Lane, Vec128, assert_vec_eq, reference};

fn inputs<T: Lane>(seed: u64) -> [Vec128<T>; 6] {
  [
    iota_values::<T>(),
    // Signed lanes shifted left from non-negative inputs too.
    Vec128::iota(T::ZERO),
    random_values::<T>(seed),
    Vec128::splat(T::MIN),
    Vec128::splat(T::MIN.wrapping_add(T::ONE)),
    Vec128::splat(T::MAX),
  ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Constant amount
// ─────────────────────────────────────────────────────────────────────────────

fn check_const<T: Lane, const K: i32>(engine: Engine) {
  let k = K as u32;
  for v in inputs::<T>(0x9E37_79B9_7F4A_7C15 ^ u64::from(k)) {
    let left = v.map(|x| reference::shl(x, k));
    let right = v.map(|x| reference::shr(x, k));
    assert_vec_eq!(left, engine.shift_left::<K, T>(v), "{} shift_left::<{k}> on {}", type_name::<T>(), engine.target());
    assert_vec_eq!(right, engine.shift_right::<K, T>(v), "{} shift_right::<{k}> on {}", type_name::<T>(), engine.target());
  }
}

macro_rules! check_amounts {
  ($engine:expr, $t:ty, [$($k:literal),+ $(,)?]) => {
    $( check_const::<$t, $k>($engine); )+
  };
}

#[test]
fn constant_shifts_match_reference() {
  for engine in common::engines() {
    check_amounts!(engine, u8, [0, 1, 2, 3, 4, 5, 6, 7]);
    check_amounts!(engine, i8, [0, 1, 2, 3, 4, 5, 6, 7]);
    check_amounts!(engine, u16, [0, 1, 2, 7, 8, 9, 14, 15]);
    check_amounts!(engine, i16, [0, 1, 2, 7, 8, 9, 14, 15]);
    check_amounts!(engine, u32, [0, 1, 2, 15, 16, 17, 30, 31]);
    check_amounts!(engine, i32, [0, 1, 2, 15, 16, 17, 30, 31]);
    check_amounts!(engine, u64, [0, 1, 2, 31, 32, 33, 62, 63]);
    check_amounts!(engine, i64, [0, 1, 2, 31, 32, 33, 62, 63]);
  }
}

#[test]
fn shift_by_zero_is_identity() {
  for engine in common::engines() {
    let v = random_values::<i32>(7);
    assert_eq!(engine.shift_left::<0, _>(v), v);
    assert_eq!(engine.shift_right::<0, _>(v), v);
    assert_eq!(engine.shift_left_same(v, 0), v);
    assert_eq!(engine.shift_right_same(v, 0), v);
  }
}

#[test]
fn byte_lanes_do_not_bleed() {
  // Alternating 0xFF / 0x00 bytes catch 16-bit shift emulation that forgets
  // to clear bits crossing into the neighbouring byte.
  let v = Vec128::<u8>::from_fn(|i| if i % 2 == 0 { 0xFF } else { 0x00 });
  for engine in common::engines() {
    assert_vec_eq!(Vec128::from_fn(|i| if i % 2 == 0 { 0xF8 } else { 0 }), engine.shift_left::<3, _>(v));
    assert_vec_eq!(Vec128::from_fn(|i| if i % 2 == 0 { 0x1F } else { 0 }), engine.shift_right::<3, _>(v));
    let s = v.bitcast::<i8>();
    assert_vec_eq!(Vec128::from_fn(|i| if i % 2 == 0 { -1 } else { 0 }), engine.shift_right::<3, _>(s));
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Uniform amount
// ─────────────────────────────────────────────────────────────────────────────

fn check_uniform<T: Lane>(engine: Engine) {
  for k in 0..T::BITS {
    for v in inputs::<T>(0xD1B5_4A32_D192_ED03 ^ u64::from(k)) {
      let left = v.map(|x| reference::shl(x, k));
      let right = v.map(|x| reference::shr(x, k));
      assert_vec_eq!(left, engine.shift_left_same(v, k), "{} shift_left_same({k}) on {}", type_name::<T>(), engine.target());
      assert_vec_eq!(right, engine.shift_right_same(v, k), "{} shift_right_same({k}) on {}", type_name::<T>(), engine.target());
    }
  }
}

#[test]
fn uniform_shifts_match_reference() {
  for engine in common::engines() {
    for_each_lane_type!(check_uniform, engine);
  }
}

#[test]
fn uniform_and_constant_forms_agree() {
  for engine in common::engines() {
    let v = random_values::<u16>(99);
    assert_eq!(engine.shift_left::<9, _>(v), engine.shift_left_same(v, 9));
    assert_eq!(engine.shift_right::<9, _>(v), engine.shift_right_same(v, 9));
    let s = random_values::<i64>(99);
    assert_eq!(engine.shift_right::<45, _>(s), engine.shift_right_same(s, 45));
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Signed extremes
// ─────────────────────────────────────────────────────────────────────────────

/// `MIN >> k` is `-(2^(BITS - 1 - k))`: all bits from `BITS - 1 - k` up set.
fn min_shifted<T: Lane>(k: u32) -> T {
  T::from_bits(!((1u64 << (max_shift::<T>() - k)) - 1))
}

fn check_signed_min<T: Lane>(engine: Engine) {
  let min = Vec128::splat(T::MIN);
  let min_plus_one = Vec128::splat(T::MIN.wrapping_add(T::ONE));
  for k in 0..T::BITS {
    assert_vec_eq!(
      Vec128::splat(min_shifted::<T>(k)),
      engine.shift_right_same(min, k),
      "{} MIN >> {k} on {}",
      type_name::<T>(),
      engine.target()
    );
  }
  let all_ones = Vec128::splat(T::from_bits(u64::MAX));
  assert_vec_eq!(all_ones, engine.shift_right_same(min, max_shift::<T>()));
  assert_vec_eq!(all_ones, engine.shift_right_same(min_plus_one, max_shift::<T>()));
  assert_vec_eq!(min_plus_one, engine.shift_right_same(min_plus_one, 0));
}

#[test]
fn signed_min_shifts_right_with_sign_fill() {
  for engine in common::engines() {
    for_each_signed_type!(check_signed_min, engine);

    assert_eq!(engine.shift_right::<1, _>(Vec128::splat(i8::MIN)), Vec128::splat(-64));
    assert_eq!(engine.shift_right::<2, _>(Vec128::splat(i16::MIN)), Vec128::splat(-8192));
    assert_eq!(engine.shift_right::<31, _>(Vec128::splat(i32::MIN + 1)), Vec128::splat(-1));
    assert_eq!(engine.shift_right::<63, _>(Vec128::splat(i64::MIN)), Vec128::splat(-1));
  }
}

#[test]
fn unsigned_right_shift_fills_with_zeros() {
  for engine in common::engines() {
    assert_eq!(engine.shift_right::<7, _>(Vec128::splat(u8::MAX)), Vec128::splat(1));
    assert_eq!(engine.shift_right::<63, _>(Vec128::splat(u64::MAX)), Vec128::splat(1));
    assert_eq!(engine.shift_right_same(Vec128::splat(0x8000u16), 15), Vec128::splat(1));
  }
}

#[test]
fn small_byte_vectors() {
  for engine in common::engines() {
    let v = Vec128::<u8>::from_fn(|i| (i % 8) as u8);
    let doubled: Vec<u8> = engine.shift_left::<1, _>(v).iter().collect();
    assert_eq!(doubled[..8], [0, 2, 4, 6, 8, 10, 12, 14]);
    let top: Vec<u8> = engine.shift_left::<7, _>(v).iter().collect();
    assert_eq!(top[..8], [0, 128, 0, 128, 0, 128, 0, 128]);

    assert_eq!(engine.shift_right::<2, _>(Vec128::splat(i8::MIN)), Vec128::splat(-32));
    assert_eq!(engine.shift_right_same(Vec128::splat(i8::MIN), 2), Vec128::splat(-32));
  }
}

#[test]
fn out_of_range_uniform_counts_do_not_fault() {
  // Results are unspecified; only completion is checked.
  for engine in common::engines() {
    for bits in [8, 16, 31, 64, 65, 255, u32::MAX] {
      let _ = engine.shift_left_same(Vec128::<u8>::splat(3), bits);
      let _ = engine.shift_right_same(Vec128::<i8>::splat(-3), bits);
      let _ = engine.shift_right_same(Vec128::<i64>::splat(-3), bits);
    }
  }
}
