// SPDX-License-Identifier: BSL-1.1 OR Apache-2.0
//! Reproducible graph generation for stress tests.
//!
//! Every generator takes a seed, so a failing run can be replayed exactly.

use graph_engine::Graph;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `count` random `(from, to, weight)` triples over `vertices` vertices.
///
/// Weights are drawn from the inclusive range `weights`.
pub fn generate_weighted_edges(
    vertices: usize,
    count: usize,
    weights: (i64, i64),
    seed: u64,
) -> Vec<(usize, usize, i64)> {
    if vertices == 0 {
        return Vec::new();
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            (
                rng.random_range(0..vertices),
                rng.random_range(0..vertices),
                rng.random_range(weights.0..=weights.1),
            )
        })
        .collect()
}

/// Inserts generator output. Endpoints are drawn from `0..vertices`, so a
/// rejected batch is a generator bug.
fn insert_all(graph: &Graph, edges: Vec<(usize, usize, i64)>) {
    graph
        .add_edges(edges)
        .expect("generated endpoints are in range");
}

/// Random graph with non-negative weights.
pub fn generate_random_graph(vertices: usize, edges: usize, directed: bool, seed: u64) -> Graph {
    let graph = Graph::new(vertices, directed);
    insert_all(&graph, generate_weighted_edges(vertices, edges, (0, 1_000), seed));
    graph
}

/// Undirected graph that is connected through a shuffled spanning path,
/// plus `extra` random edges.
pub fn generate_connected_graph(vertices: usize, extra: usize, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..vertices).collect();
    order.shuffle(&mut rng);

    let graph = Graph::undirected(vertices);
    let spine = order
        .windows(2)
        .map(|pair| (pair[0], pair[1], rng.random_range(1..=1_000)));
    insert_all(&graph, spine.collect());
    insert_all(
        &graph,
        generate_weighted_edges(
            vertices,
            extra,
            (1, 1_000),
            seed.wrapping_add(1),
        ),
    );
    graph
}

/// Directed acyclic graph: every edge goes from a lower to a higher rank
/// of a hidden random permutation.
pub fn generate_dag(vertices: usize, edges: usize, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut rank: Vec<usize> = (0..vertices).collect();
    rank.shuffle(&mut rng);

    let graph = Graph::directed(vertices);
    if vertices < 2 {
        return graph;
    }
    let batch: Vec<_> = (0..edges)
        .filter_map(|_| {
            let a = rng.random_range(0..vertices);
            let b = rng.random_range(0..vertices);
            match rank[a].cmp(&rank[b]) {
                std::cmp::Ordering::Less => Some((a, b, 1)),
                std::cmp::Ordering::Greater => Some((b, a, 1)),
                std::cmp::Ordering::Equal => None,
            }
        })
        .collect();
    insert_all(&graph, batch);
    graph
}

/// Graph made of `walks` closed walks through vertex 0, so every vertex is
/// balanced and an Euler circuit exists.
pub fn generate_eulerian_graph(
    vertices: usize,
    walks: usize,
    walk_len: usize,
    directed: bool,
    seed: u64,
) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let graph = Graph::new(vertices, directed);
    if vertices == 0 {
        return graph;
    }
    for _ in 0..walks {
        let mut walk = vec![0];
        walk.extend((0..walk_len).map(|_| rng.random_range(0..vertices)));
        walk.push(0);
        insert_all(&graph, walk.windows(2).map(|p| (p[0], p[1], 1)).collect());
    }
    graph
}
