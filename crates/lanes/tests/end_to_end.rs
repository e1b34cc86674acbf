//! Whole-pipeline checks: kernels, cross-target agreement, introspection.

mod common;

use common::random_values;
use lanes::{DispatchInfo, Engine, Isa, Kernel, Lane, Mask128, Target, Vec128, assert_vec_eq};

// ─────────────────────────────────────────────────────────────────────────────
// Kernels
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed-point scale: `(x * 2^a) >> b` with rounding, for lanes selected by
/// a mask, built from several operations and dispatched once.
struct Rescale<T: Lane> {
  values: Vec128<T>,
  up: Vec128<T>,
  down: u32,
  active: Mask128<T>,
}

impl<T: Lane> Kernel for Rescale<T> {
  type Output = Vec128<T>;

  fn run<I: Isa>(self, isa: I) -> Vec128<T> {
    let scaled = isa.shl_var(self.values, self.up);
    let rounded = isa.rounding_shr_same(scaled, self.down);
    isa.masked_shr_var_or(self.values, self.active, rounded, Vec128::zero())
  }
}

fn rescale_on<T: Lane>(engine: Engine, seed: u64) -> Vec128<T> {
  engine.dispatch(Rescale {
    values: random_values::<T>(seed),
    up: random_values::<T>(seed ^ 0xFF),
    down: (seed % u64::from(T::BITS)) as u32,
    active: Mask128::from_fn(|i| (seed >> i) & 1 == 1),
  })
}

fn check_kernel_agreement<T: Lane>(engines: &[Engine]) {
  for seed in 0..32u64 {
    let want = rescale_on::<T>(Engine::portable(), seed);
    for &engine in engines {
      assert_vec_eq!(want, rescale_on::<T>(engine, seed), "seed {seed} on {}", engine.target());
    }
  }
}

#[test]
fn kernels_agree_across_targets() {
  let engines = common::engines();
  for_each_lane_type!(check_kernel_agreement, &engines);
}

#[test]
fn engine_methods_match_dispatched_kernels() {
  struct Both(Vec128<i32>, Vec128<i32>);

  impl Kernel for Both {
    type Output = (Vec128<i32>, Vec128<i32>);

    fn run<I: Isa>(self, isa: I) -> Self::Output {
      (isa.shr_var(self.0, self.1), isa.rounding_shr::<i32, 3>(self.0))
    }
  }

  for engine in common::engines() {
    let v = random_values::<i32>(11);
    let s = random_values::<i32>(12);
    let (shifted, rounded) = engine.dispatch(Both(v, s));
    assert_eq!(shifted, engine.shr(v, s));
    assert_eq!(rounded, engine.rounding_shift_right::<3, _>(v));
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cross-target agreement on every operation
// ─────────────────────────────────────────────────────────────────────────────

fn all_ops<T: Lane>(engine: Engine, seed: u64) -> [Vec128<T>; 12] {
  let v = random_values::<T>(seed);
  let s = random_values::<T>(seed.rotate_left(17));
  let base = random_values::<T>(!seed);
  let mask = Mask128::from_vec(random_values::<T>(seed ^ 0x5555).and(Vec128::splat(T::ONE)));
  let k = (seed % u64::from(T::BITS)) as u32;
  [
    engine.shift_left::<1, T>(v),
    engine.shift_right::<1, T>(v),
    engine.shift_left_same(v, k),
    engine.shift_right_same(v, k),
    engine.shl(v, s),
    engine.shr(v, s),
    engine.rounding_shift_right::<1, T>(v),
    engine.rounding_shift_right_same(v, k),
    engine.rounding_shr(v, s),
    engine.masked_shift_right_or::<1, T>(base, mask, v),
    engine.masked_shl_or(base, mask, v, s),
    engine.masked_shr_or(base, mask, v, s),
  ]
}

fn check_all_ops<T: Lane>(engines: &[Engine]) {
  for seed in 1..16u64 {
    let want = all_ops::<T>(Engine::portable(), seed);
    for &engine in engines {
      for (op, (w, got)) in want.iter().zip(all_ops::<T>(engine, seed)).enumerate() {
        assert_vec_eq!(*w, got, "op {op} seed {seed} on {}", engine.target());
      }
    }
  }
}

#[test]
fn every_target_agrees_with_portable() {
  let engines = common::engines();
  for_each_lane_type!(check_all_ops, &engines);
}

// ─────────────────────────────────────────────────────────────────────────────
// Selection and introspection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn detected_engine_is_the_best_available() {
  let info = DispatchInfo::current();
  let detected = Engine::detect();
  assert_eq!(detected.target(), info.selected());
  if info.requested().is_none() {
    assert_eq!(detected.target(), Target::best(platform::caps()));
  }
}

#[test]
fn introspection_reports_platform_and_target() {
  let info = DispatchInfo::current();
  let shown = info.to_string();
  assert!(shown.contains(info.selected().qualified_name()), "{shown}");
  assert!(shown.contains("Caps("), "{shown}");
  assert_eq!(info.platform().arch, platform::Arch::current());
}

#[test]
fn target_names_round_trip_through_config() {
  for target in Target::ALL {
    assert_eq!(lanes::config::parse_force(target.name()), Ok(Some(target)));
  }
}

#[test]
fn engines_are_unique_and_supported() {
  let engines = common::engines();
  for (i, a) in engines.iter().enumerate() {
    assert!(a.target().is_supported(platform::caps()));
    for b in &engines[i + 1..] {
      assert_ne!(a, b);
    }
  }
}
