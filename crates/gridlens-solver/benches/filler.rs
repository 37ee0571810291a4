//! Benchmarks for randomized board completion.
//!
//! Measures [`BoardFiller::fill`] on an empty board across three fixed
//! seeds, covering the full constructive search from a blank grid.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench filler
//! ```

use std::hint;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gridlens_core::Board;
use gridlens_solver::BoardFiller;

const SEEDS: [u8; 3] = [0x11, 0x7a, 0xc3];

fn bench_fill_empty(c: &mut Criterion) {
    for (i, byte) in SEEDS.into_iter().enumerate() {
        c.bench_with_input(
            BenchmarkId::new("fill_empty", format!("seed_{i}")),
            &byte,
            |b, &byte| {
                b.iter_batched(
                    || (BoardFiller::from_seed([byte; 32]), Board::new()),
                    |(mut filler, mut board)| {
                        let filled = filler.fill(&mut board);
                        hint::black_box((filled, board))
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

criterion_group!(benches, bench_fill_empty);
criterion_main!(benches);
