// SPDX-License-Identifier: BSL-1.1 OR Apache-2.0
#![no_main]

//! Fuzz target for graph construction and the algorithm family.
//!
//! Builds a small graph from arbitrary edges (including out-of-range
//! endpoints, self-loops, parallel and negative edges) and runs every
//! algorithm, checking cross-algorithm agreements that must always hold.

use arbitrary::Arbitrary;
use graph_engine::{Graph, GraphError, HamiltonianConfig, PrimConfig, SccConfig};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzEdge {
    from: u8,
    to: u8,
    weight: i8,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    vertices: u8,
    directed: bool,
    batch: bool,
    edges: Vec<FuzzEdge>,
    source: u8,
}

fuzz_target!(|input: FuzzInput| {
    let n = (input.vertices as usize) % 24;
    let graph = Graph::new(n, input.directed);

    let edges: Vec<_> = input
        .edges
        .iter()
        .take(64)
        .map(|e| (e.from as usize, e.to as usize, i64::from(e.weight)))
        .collect();
    let all_valid = edges.iter().all(|&(u, v, _)| u < n && v < n);

    if input.batch {
        let result = graph.add_edges(edges.iter().copied());
        assert_eq!(result.is_ok(), all_valid);
        if !all_valid {
            assert_eq!(graph.edge_count(), 0);
        }
    } else {
        for &(u, v, w) in &edges {
            let ok = graph.add_edge(u, v, w).is_ok();
            assert_eq!(ok, u < n && v < n);
        }
    }

    let source = input.source as usize;
    if source >= n {
        assert!(matches!(
            graph.bfs(source),
            Err(GraphError::InvalidVertex { .. })
        ));
        return;
    }

    let bfs = graph.bfs(source).unwrap();
    let dfs = graph.dfs(source).unwrap();
    assert_eq!(bfs.len(), dfs.len());

    let bellman = graph.bellman_ford(source).unwrap();
    let all_pairs = graph.floyd_warshall();
    if !graph.edges().iter().any(|e| e.weight < 0) {
        let dijkstra = graph.dijkstra(source).unwrap();
        assert_eq!(Some(dijkstra.distances.as_slice()), bellman.distances());
        for v in 0..n {
            assert_eq!(all_pairs.distance(source, v), dijkstra.distance_to(v));
        }
    } else {
        assert!(matches!(
            graph.dijkstra(source),
            Err(GraphError::NegativeWeight { .. })
        ));
    }
    if bellman.has_negative_cycle() {
        assert!(all_pairs.has_negative_cycle());
    }

    if input.directed {
        let kosaraju = graph.kosaraju(&SccConfig::new().with_condensation()).unwrap();
        let tarjan = graph.tarjan(&SccConfig::default()).unwrap();
        assert!(kosaraju.same_partition(&tarjan));

        let topo = graph.topological_sort().unwrap();
        if let Some(positions) = topo.positions() {
            for edge in graph.edges() {
                assert!(positions[edge.from] < positions[edge.to]);
            }
        }
        assert!(graph.kruskal().unwrap_err().is_unsupported());
    } else {
        let kruskal = graph.kruskal().unwrap();
        let prim = graph.prim(&PrimConfig::new().start(source)).unwrap();
        if kruskal.spanning {
            assert_eq!(kruskal.total_weight, prim.total_weight);
        }
        let biconnected = graph.biconnected_components().unwrap();
        for &(u, v) in &biconnected.bridges {
            assert!(graph.has_edge(u, v).unwrap());
        }
        assert!(graph.topological_sort().unwrap_err().is_unsupported());
    }

    if let Some(path) = graph.euler_path() {
        assert_eq!(path.len(), graph.edge_count() + 1);
    }

    let config = HamiltonianConfig::new().max_steps(20_000);
    let hamiltonian = graph.hamiltonian_path(&config).unwrap();
    if let Some(path) = &hamiltonian.path {
        assert!(graph.is_hamiltonian_path(path));
    }
});
