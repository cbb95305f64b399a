use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sapper_core::*;
use std::hint::black_box;

fn tiers() -> [(Difficulty, Coord2); 4] {
    [
        (Difficulty::Beginner, (4, 4)),
        (Difficulty::Intermediate, (8, 8)),
        (Difficulty::Expert, (15, 8)),
        (Difficulty::Classic, (12, 12)),
    ]
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (difficulty, start) in tiers() {
        let config = difficulty.config();
        group.bench_with_input(BenchmarkId::from_parameter(difficulty), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(RandomMineGenerator::new(seed).generate(config, start))
            });
        });
    }

    // densest board the exclusion zone allows, exercises the shuffle fallback
    let dense = GameConfig::new((30, 16), 480 - 9).unwrap();
    group.bench_function("dense", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(RandomMineGenerator::new(seed).generate(dense, (15, 8)))
        });
    });
    group.finish();
}

fn bench_first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for (difficulty, start) in tiers() {
        let config = difficulty.config();
        group.bench_with_input(BenchmarkId::from_parameter(difficulty), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                let mut board = Board::with_seed(config, seed).unwrap();
                black_box(board.reveal(start).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_first_reveal);
criterion_main!(benches);
