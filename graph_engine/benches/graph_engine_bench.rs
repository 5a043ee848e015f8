// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(missing_docs)]
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graph_engine::{Graph, GraphConfig, PrimConfig, SccConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_edges(n: usize, m: usize, seed: u64) -> Vec<(usize, usize, i64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..m)
        .map(|_| {
            (
                rng.random_range(0..n),
                rng.random_range(0..n),
                rng.random_range(1..100),
            )
        })
        .collect()
}

fn build(n: usize, directed: bool, edges: &[(usize, usize, i64)]) -> Graph {
    let graph = Graph::new(n, directed);
    graph.add_edges(edges.iter().copied()).unwrap();
    graph
}

fn bench_add_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_edges");

    for size in [1_000, 10_000, 50_000] {
        let edges = random_edges(size, size * 4, 1);
        group.bench_with_input(BenchmarkId::new("one_by_one", size), &size, |b, &size| {
            b.iter(|| {
                let graph = Graph::undirected(size);
                for &(u, v, w) in &edges {
                    graph.add_edge(u, v, w).unwrap();
                }
                black_box(&graph);
            });
        });
        group.bench_with_input(BenchmarkId::new("batch", size), &size, |b, &size| {
            b.iter(|| black_box(build(size, false, &edges)));
        });
    }

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    for size in [1_000, 10_000, 100_000] {
        let graph = build(size, false, &random_edges(size, size * 3, 2));
        group.bench_with_input(BenchmarkId::new("bfs", size), &graph, |b, graph| {
            b.iter(|| black_box(graph.bfs(0).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("dfs", size), &graph, |b, graph| {
            b.iter(|| black_box(graph.dfs(0).unwrap()));
        });
    }

    group.finish();
}

fn bench_shortest_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_paths");

    for size in [1_000, 10_000] {
        let graph = build(size, true, &random_edges(size, size * 5, 3));
        group.bench_with_input(BenchmarkId::new("dijkstra", size), &graph, |b, graph| {
            b.iter(|| black_box(graph.dijkstra(0).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("bellman_ford", size), &graph, |b, graph| {
            b.iter(|| black_box(graph.bellman_ford(0).unwrap()));
        });
    }

    group.finish();
}

fn bench_floyd_warshall(c: &mut Criterion) {
    let mut group = c.benchmark_group("floyd_warshall");
    group.sample_size(10);

    for size in [64, 256] {
        let edges = random_edges(size, size * 4, 4);
        let sequential = Graph::with_config(
            size,
            true,
            GraphConfig::new().parallel_threshold(usize::MAX),
        );
        sequential.add_edges(edges.iter().copied()).unwrap();
        let parallel = Graph::with_config(size, true, GraphConfig::new().parallel_threshold(1));
        parallel.add_edges(edges.iter().copied()).unwrap();

        group.bench_with_input(BenchmarkId::new("sequential", size), &sequential, |b, g| {
            b.iter(|| black_box(g.floyd_warshall()));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &parallel, |b, g| {
            b.iter(|| black_box(g.floyd_warshall()));
        });
    }

    group.finish();
}

fn bench_spanning_trees(c: &mut Criterion) {
    let mut group = c.benchmark_group("spanning_trees");

    for size in [1_000, 10_000] {
        let graph = build(size, false, &random_edges(size, size * 5, 5));
        group.bench_with_input(BenchmarkId::new("kruskal", size), &graph, |b, graph| {
            b.iter(|| black_box(graph.kruskal().unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("prim", size), &graph, |b, graph| {
            b.iter(|| black_box(graph.prim(&PrimConfig::new()).unwrap()));
        });
    }

    group.finish();
}

fn bench_connectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity");

    for size in [1_000, 10_000] {
        let directed = build(size, true, &random_edges(size, size * 2, 6));
        let undirected = build(size, false, &random_edges(size, size * 2, 7));

        group.bench_with_input(BenchmarkId::new("kosaraju", size), &directed, |b, graph| {
            b.iter(|| black_box(graph.kosaraju(&SccConfig::default()).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("tarjan", size), &directed, |b, graph| {
            b.iter(|| black_box(graph.tarjan(&SccConfig::default()).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("topological", size), &directed, |b, graph| {
            b.iter(|| black_box(graph.topological_sort().unwrap()));
        });
        group.bench_with_input(
            BenchmarkId::new("biconnected", size),
            &undirected,
            |b, graph| {
                b.iter(|| black_box(graph.biconnected_components().unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_concurrent_readers(c: &mut Criterion) {
    use std::sync::{Arc, Barrier};
    use std::thread;

    let mut group = c.benchmark_group("concurrent_readers");
    let graph = Arc::new(build(10_000, false, &random_edges(10_000, 40_000, 8)));

    for thread_count in [2, 4, 8] {
        let runs_per_thread = 10;

        group.bench_with_input(
            BenchmarkId::new("threads", thread_count),
            &thread_count,
            |b, &threads| {
                b.iter_custom(|iters| {
                    let mut total_duration = std::time::Duration::ZERO;

                    for _ in 0..iters {
                        let barrier = Arc::new(Barrier::new(threads));
                        let start = std::time::Instant::now();

                        let handles: Vec<_> = (0..threads)
                            .map(|_| {
                                let g = Arc::clone(&graph);
                                let bar = Arc::clone(&barrier);
                                thread::spawn(move || {
                                    bar.wait();
                                    for _ in 0..runs_per_thread {
                                        black_box(g.dijkstra(0).unwrap());
                                    }
                                })
                            })
                            .collect();

                        for h in handles {
                            h.join().unwrap();
                        }

                        total_duration += start.elapsed();
                    }

                    total_duration
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_add_edges,
    bench_traversal,
    bench_shortest_paths,
    bench_floyd_warshall,
    bench_spanning_trees,
    bench_connectivity,
);

criterion_group!(concurrent_benches, bench_concurrent_readers);

criterion_main!(benches, concurrent_benches);
