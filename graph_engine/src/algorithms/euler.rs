//! Euler paths and circuits.
//!
//! Existence is decided by degree balance plus connectivity over the
//! vertices that carry edges. Construction is Hierholzer's algorithm with a
//! per-vertex edge cursor and a consumed flag per edge id, so the mirrored
//! record of an undirected edge is consumed together with it.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::collections::{DisjointSet, UnionFind};
use crate::{Graph, GraphView, VertexId};

/// Whether the graph has an Euler path or circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EulerStatus {
    /// No walk uses every edge exactly once.
    None,
    /// An open walk exists from `start` to `end`.
    Path { start: VertexId, end: VertexId },
    /// A closed walk exists.
    Circuit,
}

impl EulerStatus {
    #[must_use]
    pub const fn has_path(&self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub const fn has_circuit(&self) -> bool {
        matches!(self, Self::Circuit)
    }
}

/// True when every vertex with a non-zero degree is in one weak component.
fn edges_connected(view: &GraphView<'_>) -> bool {
    let mut sets = UnionFind::with_size(view.vertex_count());
    for edge in view.edges() {
        sets.union(edge.from, edge.to);
    }
    let Some(anchor) = view.edges().first().map(|e| e.from) else {
        return true;
    };
    view.edges().iter().all(|e| sets.connected(anchor, e.from))
}

fn first_touched_vertex(view: &GraphView<'_>) -> VertexId {
    view.edges().first().map_or(0, |e| e.from)
}

pub(crate) fn euler_status_on(view: &GraphView<'_>) -> EulerStatus {
    let n = view.vertex_count();
    if n == 0 || !edges_connected(view) {
        return EulerStatus::None;
    }

    if view.is_directed() {
        let mut balance = vec![0i64; n];
        for edge in view.edges() {
            balance[edge.from] += 1;
            balance[edge.to] -= 1;
        }
        let mut start = None;
        let mut end = None;
        for (v, &b) in balance.iter().enumerate() {
            match b {
                0 => {},
                1 if start.is_none() => start = Some(v),
                -1 if end.is_none() => end = Some(v),
                _ => return EulerStatus::None,
            }
        }
        match (start, end) {
            (None, None) => EulerStatus::Circuit,
            (Some(start), Some(end)) => EulerStatus::Path { start, end },
            _ => EulerStatus::None,
        }
    } else {
        let odd: Vec<VertexId> = (0..n).filter(|&v| view.degree(v) % 2 == 1).collect();
        match odd.as_slice() {
            [] => EulerStatus::Circuit,
            &[start, end] => EulerStatus::Path { start, end },
            _ => EulerStatus::None,
        }
    }
}

/// Hierholzer walk from `start`; the vertex sequence of the walk.
fn hierholzer(view: &GraphView<'_>, start: VertexId) -> Vec<VertexId> {
    let mut cursors = vec![0usize; view.vertex_count()];
    let mut used = vec![false; view.edge_count()];
    let mut stack = vec![start];
    let mut path = Vec::with_capacity(view.edge_count() + 1);

    while let Some(&v) = stack.last() {
        let edges = view.edges_from(v);
        while cursors[v] < edges.len() && used[edges[cursors[v]].id] {
            cursors[v] += 1;
        }
        if let Some(edge) = edges.get(cursors[v]) {
            used[edge.id] = true;
            stack.push(edge.to);
        } else {
            path.push(v);
            stack.pop();
        }
    }

    path.reverse();
    path
}

impl Graph {
    /// Classify the graph as having an Euler circuit, an Euler path, or neither.
    #[instrument(skip(self))]
    pub fn euler_status(&self) -> EulerStatus {
        let status = euler_status_on(&self.read());
        debug!(?status, "euler status");
        status
    }

    /// An Euler path, if one exists. A graph with an Euler circuit returns
    /// that circuit.
    ///
    /// Time complexity: O(V + E)
    #[instrument(skip(self))]
    pub fn euler_path(&self) -> Option<Vec<VertexId>> {
        let view = self.read();
        let start = match euler_status_on(&view) {
            EulerStatus::None => return None,
            EulerStatus::Path { start, .. } => start,
            EulerStatus::Circuit => first_touched_vertex(&view),
        };
        let path = hierholzer(&view, start);
        debug!(len = path.len(), "euler path built");
        Some(path)
    }

    /// An Euler circuit, if one exists. The first and last vertices coincide.
    #[instrument(skip(self))]
    pub fn euler_circuit(&self) -> Option<Vec<VertexId>> {
        let view = self.read();
        if euler_status_on(&view) != EulerStatus::Circuit {
            return None;
        }
        let circuit = hierholzer(&view, first_touched_vertex(&view));
        debug!(len = circuit.len(), "euler circuit built");
        Some(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Graph {
        let graph = Graph::undirected(4);
        graph
            .add_edges([(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1)])
            .unwrap();
        graph
    }

    /// Every edge used once, consecutive vertices joined by an edge.
    fn assert_uses_every_edge(graph: &Graph, walk: &[VertexId]) {
        assert_eq!(walk.len(), graph.edge_count() + 1);
        let mut remaining = graph.edges();
        for pair in walk.windows(2) {
            let pos = remaining
                .iter()
                .position(|e| {
                    (e.from == pair[0] && e.to == pair[1])
                        || (!graph.is_directed() && e.from == pair[1] && e.to == pair[0])
                })
                .unwrap();
            remaining.swap_remove(pos);
        }
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_four_cycle_circuit() {
        let graph = square();
        assert_eq!(graph.euler_status(), EulerStatus::Circuit);

        let circuit = graph.euler_circuit().unwrap();
        assert_eq!(circuit.len(), 5);
        assert_eq!(circuit.first(), circuit.last());
        assert_eq!(circuit, vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_undirected_path_between_odd_vertices() {
        let graph = square();
        graph.add_edge(0, 2, 1).unwrap();

        assert_eq!(graph.euler_status(), EulerStatus::Path { start: 0, end: 2 });
        assert!(graph.euler_circuit().is_none());

        let path = graph.euler_path().unwrap();
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&2));
        assert_uses_every_edge(&graph, &path);
    }

    #[test]
    fn test_directed_path() {
        let graph = Graph::directed(4);
        graph
            .add_edges([(0, 1, 1), (1, 2, 1), (2, 0, 1), (2, 3, 1)])
            .unwrap();

        assert_eq!(graph.euler_status(), EulerStatus::Path { start: 2, end: 3 });
        assert_eq!(graph.euler_path(), Some(vec![2, 0, 1, 2, 3]));
    }

    #[test]
    fn test_directed_circuit() {
        let graph = Graph::directed(3);
        graph.add_edges([(0, 1, 1), (1, 2, 1), (2, 0, 1)]).unwrap();

        let circuit = graph.euler_circuit().unwrap();
        assert_eq!(circuit, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_directed_imbalance_has_none() {
        let graph = Graph::directed(3);
        graph.add_edges([(0, 1, 1), (0, 2, 1)]).unwrap();
        assert_eq!(graph.euler_status(), EulerStatus::None);
        assert!(graph.euler_path().is_none());
    }

    #[test]
    fn test_star_has_none() {
        let graph = Graph::undirected(4);
        graph.add_edges([(0, 1, 1), (0, 2, 1), (0, 3, 1)]).unwrap();
        assert_eq!(graph.euler_status(), EulerStatus::None);
    }

    #[test]
    fn test_disconnected_edges_have_none() {
        let graph = Graph::undirected(6);
        graph
            .add_edges([(0, 1, 1), (1, 2, 1), (2, 0, 1), (3, 4, 1), (4, 5, 1), (5, 3, 1)])
            .unwrap();
        assert_eq!(graph.euler_status(), EulerStatus::None);
    }

    #[test]
    fn test_isolated_vertices_are_ignored() {
        let graph = Graph::undirected(5);
        graph.add_edges([(1, 2, 1), (2, 3, 1), (3, 1, 1)]).unwrap();

        let circuit = graph.euler_circuit().unwrap();
        assert_eq!(circuit.first(), Some(&1));
        assert_uses_every_edge(&graph, &circuit);
    }

    #[test]
    fn test_self_loop_and_parallel_edges() {
        let graph = Graph::undirected(2);
        graph
            .add_edges([(0, 1, 1), (1, 0, 1), (1, 1, 1)])
            .unwrap();

        assert_eq!(graph.euler_status(), EulerStatus::Circuit);
        let circuit = graph.euler_circuit().unwrap();
        assert_uses_every_edge(&graph, &circuit);
    }

    #[test]
    fn test_edgeless_graph_is_trivial_circuit() {
        let graph = Graph::undirected(3);
        assert_eq!(graph.euler_circuit(), Some(vec![0]));
        assert_eq!(Graph::undirected(0).euler_status(), EulerStatus::None);
    }
}
