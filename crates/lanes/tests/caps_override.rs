//! Capability override handling.
//!
//! Kept in its own test binary: the override is process-wide and would race
//! with tests that enumerate engines.

use lanes::{Engine, Target, Vec128};

#[test]
fn override_restricts_and_restores_targets() {
  let detected = platform::caps();

  platform::set_caps_override(Some(platform::Caps::NONE));
  assert!(platform::has_override());
  let only: Vec<Target> = lanes::engines().map(Engine::target).collect();
  assert_eq!(only, [Target::Portable]);
  assert_eq!(Target::best(platform::caps()), Target::Portable);
  for target in Target::ALL.into_iter().filter(|t| t.is_simd()) {
    assert_eq!(Engine::with_target(target), None, "{target}");
  }

  // Portable still computes correctly under the override.
  let v = Vec128::<i16>::splat(-5);
  assert_eq!(Engine::portable().rounding_shift_right::<1, _>(v), Vec128::splat(-2));

  platform::set_caps_override(None);
  assert!(!platform::has_override());
  assert_eq!(platform::caps(), detected);
  assert_eq!(Engine::with_target(Target::best(detected)).map(Engine::target), Some(Target::best(detected)));
}
