//! Benchmark for container pipelines: Outcome chains, Effect composition,
//! and State's iterative batch mode against nested composition.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use monadic::lazy::{Effect, State};
use monadic::simple::Outcome;
use std::hint::black_box;

// =============================================================================
// Outcome Benchmarks
// =============================================================================

fn benchmark_outcome_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("outcome_chain");

    group.bench_function("continuing_pipeline", |bencher| {
        bencher.iter(|| {
            let outcome: Outcome<String, i64> = Outcome::success(black_box(1))
                .fmap(|x| x + 1)
                .flat_map(|x| Outcome::just(x * 2))
                .fmap(|x| x - 3);
            black_box(outcome.unwrap_or(0))
        });
    });

    group.bench_function("halting_short_circuit", |bencher| {
        bencher.iter(|| {
            let outcome: Outcome<String, i64> = Outcome::nothing()
                .fmap(|x: i64| x + 1)
                .flat_map(|x| Outcome::success(x * 2));
            black_box(outcome.unwrap_or(0))
        });
    });

    group.finish();
}

// =============================================================================
// Effect Benchmarks
// =============================================================================

fn benchmark_effect_pipeline(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("effect_pipeline");

    for length in [10usize, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("chained_steps", length),
            &length,
            |bencher, &length| {
                bencher.iter(|| {
                    let mut effect: Effect<String, i64> = Effect::pure(0);
                    for _ in 0..length {
                        effect = effect.fmap(|x| x + 1);
                    }
                    black_box(effect.run().unwrap_or(0))
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// State Benchmarks
// =============================================================================

fn benchmark_state_batch(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("state_batch");

    for length in [100usize, 1000] {
        group.bench_with_input(
            BenchmarkId::new("nested_fmap", length),
            &length,
            |bencher, &length| {
                bencher.iter(|| {
                    let mut state: State<i64, i64> = State::get();
                    for _ in 0..length {
                        state = state.fmap(|x| x + 1);
                    }
                    black_box(state.run(0))
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("iter_queue", length),
            &length,
            |bencher, &length| {
                bencher.iter(|| {
                    let mut state: State<i64, i64> = State::get();
                    for _ in 0..length {
                        state.map_iter(|x| x + 1);
                    }
                    black_box(state.run_iter(0))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_outcome_chain,
    benchmark_effect_pipeline,
    benchmark_state_batch
);
criterion_main!(benches);
