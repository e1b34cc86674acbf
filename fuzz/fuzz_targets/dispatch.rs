//! Fuzz target for target selection and force-target parsing.
//!
//! Tests that:
//! - The best target for arbitrary capabilities is always supported by them
//! - Removing capabilities never selects a better target
//! - Portable is always supported
//! - Parsing arbitrary strings never panics, and parsed targets round-trip

#![no_main]

use arbitrary::Arbitrary;
use backend::Target;
use libfuzzer_sys::fuzz_target;
use platform::Caps;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
  a: [u64; 4],
  b: [u64; 4],
  force: &'a str,
}

fuzz_target!(|input: Input<'_>| {
  let a = Caps::from_raw(input.a);
  let b = Caps::from_raw(input.b);

  // ─── Selection is supported ───
  let best = Target::best(a);
  assert!(best.is_supported(a), "best target {best} must be supported");
  assert!(Target::Portable.is_supported(a), "portable must always be supported");

  // ─── Selection is monotone ───
  let fewer = Target::best(a & b);
  assert!(fewer <= best, "fewer caps selected {fewer} over {best}");

  // ─── Config resolution clamps to caps ───
  let config = lanes::Config::resolve(input.force.parse().ok(), a);
  assert!(config.effective.is_supported(a), "effective {} unsupported", config.effective);

  // ─── Parsing ───
  if let Ok(Some(target)) = lanes::config::parse_force(input.force) {
    assert_eq!(lanes::config::parse_force(target.name()), Ok(Some(target)));
  }
});
