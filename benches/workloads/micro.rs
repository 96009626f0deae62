use criterion::{black_box, BatchSize, Criterion};
use uniq::UniquePtr;

pub fn run(c: &mut Criterion) {
    bench_scalar_small(c);
    bench_slice_medium(c);
    bench_slice_large(c);
    bench_reset_churn(c);
}

fn bench_scalar_small(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro_small");
    group.warm_up_time(std::time::Duration::from_millis(500));
    group.measurement_time(std::time::Duration::from_secs(1));
    group.sample_size(10);

    group.bench_function("unique_new_drop_16b", |b| {
        b.iter(|| {
            black_box(UniquePtr::new(black_box(10u128)));
        })
    });

    group.finish();
}

fn bench_slice_medium(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro_medium");

    group.bench_function("unique_slice_1kb", |b| {
        b.iter(|| {
            black_box(UniquePtr::new_slice(1024, |i| i as u8));
        })
    });

    group.finish();
}

fn bench_slice_large(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro_large");

    group.bench_function("unique_slice_1mb", |b| {
        b.iter(|| {
            black_box(UniquePtr::from_vec(vec![0u8; 1024 * 1024]));
        })
    });

    group.finish();
}

fn bench_reset_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro_reset");

    group.bench_function("assign_1000", |b| {
        b.iter_batched(
            || UniquePtr::new(0u64),
            |mut owner| {
                for i in 0..1000 {
                    owner.assign(UniquePtr::new(black_box(i)));
                }
                black_box(owner)
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}
