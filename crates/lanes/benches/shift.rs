use core::{hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lanes::{Engine, Lane, Mask128, Vec128};

mod util;

fn throughput(count: usize) -> Throughput {
  Throughput::Bytes((count * 16) as u64)
}

fn bench_constant(c: &mut Criterion) {
  util::print_platform_info();
  let mut group = c.benchmark_group("shift/constant/i16");
  for &(label, count) in util::CASES {
    let data = util::make_batch::<i16>(count, 1);
    group.throughput(throughput(count));
    for engine in lanes::engines() {
      group.bench_with_input(BenchmarkId::new(engine.target().name(), label), &data, |b, data| {
        b.iter(|| {
          for &v in data {
            black_box(engine.shift_right::<3, _>(black_box(v)));
          }
        });
      });
    }
  }
  group.finish();
}

fn bench_variable_lanes<T: Lane>(c: &mut Criterion, name: &str) {
  util::print_platform_info();
  let mut group = c.benchmark_group(format!("shift/variable/{name}"));
  for &(label, count) in util::CASES {
    let values = util::make_batch::<T>(count, 2);
    let counts = util::make_batch::<T>(count, 3);
    group.throughput(throughput(count));
    for engine in lanes::engines() {
      group.bench_with_input(BenchmarkId::new(engine.target().name(), label), &(&values, &counts), |b, (values, counts)| {
        b.iter(|| {
          for (&v, &s) in values.iter().zip(counts.iter()) {
            black_box(engine.shr(black_box(v), black_box(s)));
          }
        });
      });
    }
  }
  group.finish();
}

fn bench_variable(c: &mut Criterion) {
  bench_variable_lanes::<i8>(c, "i8");
  bench_variable_lanes::<u16>(c, "u16");
  bench_variable_lanes::<i32>(c, "i32");
  bench_variable_lanes::<i64>(c, "i64");
}

fn bench_rounding(c: &mut Criterion) {
  util::print_platform_info();
  let mut group = c.benchmark_group("shift/rounding/i32");
  for &(label, count) in util::CASES {
    let values = util::make_batch::<i32>(count, 4);
    let counts = util::make_batch::<i32>(count, 5);
    group.throughput(throughput(count));
    for engine in lanes::engines() {
      group.bench_with_input(BenchmarkId::new(engine.target().name(), label), &(&values, &counts), |b, (values, counts)| {
        b.iter(|| {
          for (&v, &s) in values.iter().zip(counts.iter()) {
            black_box(engine.rounding_shr(black_box(v), black_box(s)));
          }
        });
      });
    }
  }
  group.finish();
}

fn bench_masked(c: &mut Criterion) {
  util::print_platform_info();
  let mut group = c.benchmark_group("shift/masked/u32");
  let mask = Mask128::<u32>::from_fn(|i| i % 2 == 0);
  let base = Vec128::<u32>::splat(0xDEAD_BEEF);
  for &(label, count) in util::CASES {
    let values = util::make_batch::<u32>(count, 6);
    let counts = util::make_batch::<u32>(count, 7);
    group.throughput(throughput(count));
    for engine in lanes::engines() {
      group.bench_with_input(BenchmarkId::new(engine.target().name(), label), &(&values, &counts), |b, (values, counts)| {
        b.iter(|| {
          for (&v, &s) in values.iter().zip(counts.iter()) {
            black_box(engine.masked_shl_or(base, mask, black_box(v), black_box(s)));
          }
        });
      });
    }
  }
  group.finish();
}

fn bench_multishift(c: &mut Criterion) {
  util::print_platform_info();
  let mut group = c.benchmark_group("shift/multishift/u64");
  let idx = Vec128::<u8>::from_fn(|j| ((j % 8) * 9) as u8);
  for &(label, count) in util::CASES {
    let data = util::make_batch::<u64>(count, 8);
    group.throughput(throughput(count));
    for engine in lanes::engines() {
      group.bench_with_input(BenchmarkId::new(engine.target().name(), label), &data, |b, data| {
        b.iter(|| {
          for &v in data {
            black_box(engine.multi_shift(black_box(v), idx));
          }
        });
      });
    }
  }
  group.finish();
}

fn bench_detect(c: &mut Criterion) {
  c.bench_function("engine/detect", |b| b.iter(|| black_box(Engine::detect())));
}

criterion_group! {
  name = benches;
  config = Criterion::default()
    .measurement_time(Duration::from_secs(3))
    .sample_size(50);
  targets =
    bench_constant,
    bench_variable,
    bench_rounding,
    bench_masked,
    bench_multishift,
    bench_detect,
}
criterion_main!(benches);
