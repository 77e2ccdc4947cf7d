use criterion::*;

#[cfg(unix)]
use pprof::criterion::{Output, PProfProfiler};

use tessera_othello::Position;
use tessera_search::{count_leaves, count_leaves_parallel};

fn criterion_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(50);

    for depth in 1..7 {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| count_leaves(&Position::new(), black_box(depth)))
        });
    }

    group.finish();
}

fn criterion_perft_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_parallel");
    group.sample_size(20);

    for depth in 6..9 {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| count_leaves_parallel(&Position::new(), black_box(depth), 0))
        });
    }

    group.finish();
}

#[cfg(unix)]
criterion_group! {
    name = perft;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_perft, criterion_perft_parallel
}

#[cfg(not(unix))]
criterion_group! {
    name = perft;
    config = Criterion::default();
    targets = criterion_perft, criterion_perft_parallel
}

criterion_main!(perft);
