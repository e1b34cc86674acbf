use std::sync::Once;

use lanes::{DispatchInfo, Lane, Vec128};

/// Vectors per iteration, by label.
pub const CASES: &[(&str, usize)] = &[("s", 16), ("m", 256), ("l", 4096)];

/// Deterministic lanes for a batch of `count` vectors.
pub fn make_batch<T: Lane>(count: usize, seed: u64) -> Vec<Vec128<T>> {
  let mut x = seed | 1;
  (0..count)
    .map(|_| {
      Vec128::from_fn(|_| {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        T::from_bits(x)
      })
    })
    .collect()
}

pub fn print_platform_info() {
  static ONCE: Once = Once::new();
  ONCE.call_once(|| {
    let info = DispatchInfo::current();
    eprintln!("╔══════════════════════════════════════════════════════════════╗");
    eprintln!("║                   PLATFORM DETECTION INFO                    ║");
    eprintln!("╠══════════════════════════════════════════════════════════════╣");
    eprintln!("║ Platform: {}", platform::describe());
    eprintln!("║ Selected: {}", info.selected().qualified_name());
    if let Some(requested) = info.requested() {
      eprintln!("║ Requested: {requested}");
    }
    eprintln!("║ Runnable targets:");
    for engine in lanes::engines() {
      eprintln!("║   {}", engine.target().qualified_name());
    }
    eprintln!("╚══════════════════════════════════════════════════════════════╝");
  });
}
