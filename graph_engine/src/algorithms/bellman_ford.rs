//! Single-source shortest paths tolerating negative weights.
//!
//! Relaxes every edge up to `|V| - 1` times. A further pass that still
//! improves a distance proves a negative cycle reachable from the source, in
//! which case no distances are reported.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::traversal::reachable_from;
use crate::{Distance, Graph, GraphView, Result, ShortestPaths, VertexId};

/// Result of a Bellman-Ford computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BellmanFordResult {
    pub source: VertexId,
    /// Shortest paths; `None` when a negative cycle was detected.
    pub paths: Option<ShortestPaths>,
    /// Vertices of a negative cycle in traversal order, when one exists.
    pub negative_cycle: Option<Vec<VertexId>>,
}

impl BellmanFordResult {
    #[must_use]
    pub const fn has_negative_cycle(&self) -> bool {
        self.negative_cycle.is_some()
    }

    /// Distance to `v`; `None` when unreachable or a negative cycle exists.
    #[must_use]
    pub fn distance_to(&self, v: VertexId) -> Option<Distance> {
        self.paths.as_ref()?.distance_to(v)
    }

    #[must_use]
    pub fn path_to(&self, v: VertexId) -> Option<Vec<VertexId>> {
        self.paths.as_ref()?.path_to(v)
    }

    #[must_use]
    pub fn distances(&self) -> Option<&[Option<Distance>]> {
        self.paths.as_ref().map(|p| p.distances.as_slice())
    }
}

/// One relaxation sweep over every adjacency record.
///
/// Returns the first vertex whose distance improved, if any.
fn relax_all(
    view: &GraphView<'_>,
    dist: &mut [Option<Distance>],
    pred: &mut [Option<VertexId>],
) -> Option<VertexId> {
    let mut improved = None;
    for u in 0..view.vertex_count() {
        let Some(base) = dist[u] else {
            continue;
        };
        for edge in view.edges_from(u) {
            let candidate = base + Distance::from(edge.weight);
            if dist[edge.to].map_or(true, |best| candidate < best) {
                dist[edge.to] = Some(candidate);
                pred[edge.to] = Some(u);
                improved.get_or_insert(edge.to);
            }
        }
    }
    improved
}

/// Walks predecessors from a vertex improved in the detection pass.
///
/// After `|V|` steps the walk is inside the cycle; the cycle is then read
/// off the predecessor chain.
fn extract_cycle(pred: &[Option<VertexId>], start: VertexId) -> Vec<VertexId> {
    let mut inside = start;
    for _ in 0..pred.len() {
        match pred[inside] {
            Some(p) => inside = p,
            None => return vec![start],
        }
    }

    let mut cycle = vec![inside];
    let mut current = inside;
    while let Some(p) = pred[current] {
        if p == inside {
            break;
        }
        cycle.push(p);
        current = p;
        if cycle.len() > pred.len() {
            break;
        }
    }
    cycle.reverse();
    cycle
}

pub(crate) fn bellman_ford_on(view: &GraphView<'_>, source: VertexId) -> BellmanFordResult {
    let n = view.vertex_count();
    let mut dist: Vec<Option<Distance>> = vec![None; n];
    let mut pred = vec![None; n];
    dist[source] = Some(0);

    for _ in 1..n {
        if relax_all(view, &mut dist, &mut pred).is_none() {
            break;
        }
    }

    if let Some(witness) = relax_all(view, &mut dist, &mut pred) {
        let cycle = extract_cycle(&pred, witness);
        warn!(source, cycle_len = cycle.len(), "negative cycle detected");
        return BellmanFordResult {
            source,
            paths: None,
            negative_cycle: Some(cycle),
        };
    }

    let reachable = reachable_from(view, source);
    for v in 0..n {
        if !reachable[v] {
            dist[v] = None;
            pred[v] = None;
        }
    }

    BellmanFordResult {
        source,
        paths: Some(ShortestPaths {
            source,
            distances: dist,
            predecessors: pred,
        }),
        negative_cycle: None,
    }
}

impl Graph {
    /// Bellman-Ford from `source`.
    ///
    /// Time complexity: O(V * E)
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is out of range.
    #[instrument(skip(self))]
    pub fn bellman_ford(&self, source: VertexId) -> Result<BellmanFordResult> {
        self.check_vertex(source)?;
        let result = bellman_ford_on(&self.read(), source);
        debug!(
            negative_cycle = result.has_negative_cycle(),
            "bellman-ford finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Distance, Graph};

    #[test]
    fn test_negative_weights_without_cycle() {
        let graph = Graph::directed(5);
        graph
            .add_edges([
                (0, 1, 6),
                (0, 2, 7),
                (1, 2, 8),
                (1, 3, 5),
                (1, 4, -4),
                (2, 3, -3),
                (2, 4, 9),
                (3, 1, -2),
                (4, 0, 2),
                (4, 3, 7),
            ])
            .unwrap();

        let result = graph.bellman_ford(0).unwrap();
        assert!(!result.has_negative_cycle());
        assert_eq!(
            result.distances().unwrap(),
            &[Some(0), Some(2), Some(7), Some(4), Some(-2)]
        );
        assert_eq!(result.path_to(4), Some(vec![0, 2, 3, 1, 4]));
    }

    #[test]
    fn test_negative_cycle_detected() {
        let graph = Graph::directed(4);
        graph
            .add_edges([(0, 1, 1), (1, 2, -1), (2, 3, -1), (3, 1, -1)])
            .unwrap();

        let result = graph.bellman_ford(0).unwrap();
        assert!(result.has_negative_cycle());
        assert!(result.paths.is_none());
        assert_eq!(result.distance_to(1), None);
        assert_eq!(result.path_to(3), None);

        let mut cycle = result.negative_cycle.unwrap();
        cycle.sort_unstable();
        assert_eq!(cycle, vec![1, 2, 3]);
    }

    #[test]
    fn test_unreachable_negative_cycle_is_ignored() {
        let graph = Graph::directed(4);
        graph
            .add_edges([(0, 1, 3), (2, 3, -5), (3, 2, 1)])
            .unwrap();

        let result = graph.bellman_ford(0).unwrap();
        assert!(!result.has_negative_cycle());
        assert_eq!(result.distance_to(1), Some(3));
        assert_eq!(result.distance_to(2), None);
        assert_eq!(result.distance_to(3), None);
    }

    #[test]
    fn test_undirected_negative_edge_is_a_cycle() {
        let graph = Graph::undirected(2);
        graph.add_edge(0, 1, -1).unwrap();
        assert!(graph.bellman_ford(0).unwrap().has_negative_cycle());
    }

    #[test]
    fn test_single_vertex() {
        let result = Graph::directed(1).bellman_ford(0).unwrap();
        assert_eq!(result.distances().unwrap(), &[Some(0)]);
    }

    #[test]
    fn test_repeated_runs_are_independent() {
        let graph = Graph::directed(3);
        graph.add_edge(0, 1, 2).unwrap();
        let first = graph.bellman_ford(0).unwrap();
        let from_two = graph.bellman_ford(2).unwrap();
        let second = graph.bellman_ford(0).unwrap();

        assert_eq!(first, second);
        assert_eq!(from_two.distance_to(1), None);
    }

    #[test]
    fn test_invalid_source() {
        assert!(Graph::directed(1).bellman_ford(1).is_err());
    }

    #[test]
    fn test_distance_reaching_i64_max_stays_reachable() {
        let graph = Graph::directed(4);
        graph
            .add_edges([(0, 1, i64::MAX - 1), (1, 2, 1), (2, 3, -2)])
            .unwrap();

        let result = graph.bellman_ford(0).unwrap();
        assert!(!result.has_negative_cycle());
        assert_eq!(result.distance_to(2), Some(Distance::from(i64::MAX)));
        assert_eq!(result.distance_to(3), Some(Distance::from(i64::MAX) - 2));
        assert_eq!(result.path_to(3), Some(vec![0, 1, 2, 3]));
    }
}
