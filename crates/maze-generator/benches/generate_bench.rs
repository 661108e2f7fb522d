//! Benchmarks for maze carving
//!
//! Measures the full pipeline per topology and the carve alone on a large
//! rectangular grid.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use maze_generator::{carve, generate, MazeConfig, Topology};
use maze_topology::{Entrances, RectGrid};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Benchmark build, carve and open for every topology
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for topology in Topology::ALL {
        let config = MazeConfig {
            topology,
            size: 10,
            entry_count: 3,
            seed: Some(42),
        };
        group.bench_with_input(BenchmarkId::from_parameter(topology), &config, |b, cfg| {
            b.iter(|| generate(black_box(cfg)))
        });
    }
    group.finish();
}

/// Benchmark carving alone as entry count grows
fn bench_carve(c: &mut Criterion) {
    let mut group = c.benchmark_group("carve_rect_128");
    let template = RectGrid::new(128).unwrap();
    group.throughput(Throughput::Elements(128 * 128));

    for &entries in &[1usize, 4, 16] {
        let starts = template.generate_entries(entries).unwrap();
        group.bench_with_input(BenchmarkId::new("entries", entries), &starts, |b, starts| {
            b.iter(|| {
                let mut grid = template.clone();
                let mut rng = StdRng::seed_from_u64(7);
                carve(&mut grid, black_box(starts), &mut rng)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_carve);
criterion_main!(benches);
