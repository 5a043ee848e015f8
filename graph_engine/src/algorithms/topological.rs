//! Topological sort with cycle detection.
//!
//! Depth-first search with two marks per vertex: temporary while the vertex
//! is on the current path, permanent once it has finished. Reaching a
//! temporarily-marked vertex means the graph has a cycle and no ordering
//! exists.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{Graph, GraphKind, GraphView, Result, VertexId};

/// Outcome of a topological sort.
///
/// Exactly one of `order` and `cycle` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologicalOrder {
    /// Vertices with every edge's source before its target.
    pub order: Option<Vec<VertexId>>,
    /// A directed cycle `[v0, v1, .., vk]` where `vk -> v0` closes it.
    pub cycle: Option<Vec<VertexId>>,
}

impl TopologicalOrder {
    #[must_use]
    pub const fn has_cycle(&self) -> bool {
        self.cycle.is_some()
    }

    #[must_use]
    pub fn order(&self) -> Option<&[VertexId]> {
        self.order.as_deref()
    }

    /// Position of each vertex in the order, when one exists.
    #[must_use]
    pub fn positions(&self) -> Option<Vec<usize>> {
        let order = self.order.as_ref()?;
        let mut positions = vec![0; order.len()];
        for (i, &v) in order.iter().enumerate() {
            positions[v] = i;
        }
        Some(positions)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    None,
    Temporary,
    Permanent,
}

pub(crate) fn topological_on(view: &GraphView<'_>) -> TopologicalOrder {
    let n = view.vertex_count();
    let mut marks = vec![Mark::None; n];
    let mut finished = Vec::with_capacity(n);
    let mut frames: Vec<(VertexId, usize)> = Vec::new();

    for root in 0..n {
        if marks[root] != Mark::None {
            continue;
        }
        marks[root] = Mark::Temporary;
        frames.push((root, 0));

        while let Some((v, cursor)) = frames.last_mut() {
            let v = *v;
            let Some(edge) = view.edges_from(v).get(*cursor) else {
                marks[v] = Mark::Permanent;
                finished.push(v);
                frames.pop();
                continue;
            };
            *cursor += 1;

            let w = edge.to;
            match marks[w] {
                Mark::None => {
                    marks[w] = Mark::Temporary;
                    frames.push((w, 0));
                },
                Mark::Temporary => {
                    let start = frames.iter().rposition(|&(u, _)| u == w).unwrap_or(0);
                    let cycle = frames[start..].iter().map(|&(u, _)| u).collect();
                    return TopologicalOrder {
                        order: None,
                        cycle: Some(cycle),
                    };
                },
                Mark::Permanent => {},
            }
        }
    }

    finished.reverse();
    TopologicalOrder {
        order: Some(finished),
        cycle: None,
    }
}

impl Graph {
    /// Topological ordering of a directed graph.
    ///
    /// A cyclic graph is not an error: the result carries a witness cycle
    /// and no order.
    ///
    /// Time complexity: O(V + E)
    #[instrument(skip(self))]
    pub fn topological_sort(&self) -> Result<TopologicalOrder> {
        self.require("topological sort", GraphKind::Directed)?;
        let result = topological_on(&self.read());
        match &result.cycle {
            Some(cycle) => warn!(
                cycle_len = cycle.len(),
                "graph has a cycle, no topological order"
            ),
            None => debug!(vertices = self.vertex_count, "topological order computed"),
        }
        Ok(result)
    }

    pub fn has_cycle(&self) -> Result<bool> {
        Ok(self.topological_sort()?.has_cycle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    fn assert_valid(graph: &Graph, result: &TopologicalOrder) {
        let positions = result.positions().unwrap();
        for edge in graph.edges() {
            assert!(positions[edge.from] < positions[edge.to], "{edge:?}");
        }
    }

    #[test]
    fn test_topological_dag() {
        let graph = Graph::directed(6);
        graph
            .add_edges([(5, 2, 1), (5, 0, 1), (4, 0, 1), (4, 1, 1), (2, 3, 1), (3, 1, 1)])
            .unwrap();

        let result = graph.topological_sort().unwrap();
        assert!(!result.has_cycle());
        assert_eq!(result.order().unwrap().len(), 6);
        assert_valid(&graph, &result);
    }

    #[test]
    fn test_topological_chain_is_forced() {
        let graph = Graph::directed(4);
        graph.add_edges([(2, 0, 1), (0, 3, 1), (3, 1, 1)]).unwrap();

        let result = graph.topological_sort().unwrap();
        assert_eq!(result.order, Some(vec![2, 0, 3, 1]));
    }

    #[test]
    fn test_three_cycle_has_no_order() {
        let graph = Graph::directed(3);
        graph.add_edges([(0, 1, 1), (1, 2, 1), (2, 0, 1)]).unwrap();

        let result = graph.topological_sort().unwrap();
        assert!(result.has_cycle());
        assert!(result.order.is_none());
        assert_eq!(result.cycle, Some(vec![0, 1, 2]));
        assert!(graph.has_cycle().unwrap());
    }

    #[test]
    fn test_cycle_witness_excludes_prefix() {
        let graph = Graph::directed(4);
        graph
            .add_edges([(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 1, 1)])
            .unwrap();

        let result = graph.topological_sort().unwrap();
        assert_eq!(result.cycle, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let graph = Graph::directed(2);
        graph.add_edges([(0, 1, 1), (1, 1, 1)]).unwrap();
        assert_eq!(graph.topological_sort().unwrap().cycle, Some(vec![1]));
    }

    #[test]
    fn test_isolated_vertices_are_ordered() {
        let graph = Graph::directed(3);
        let result = graph.topological_sort().unwrap();
        let mut order = result.order.unwrap();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_diamond_revisit_is_not_a_cycle() {
        let graph = Graph::directed(4);
        graph
            .add_edges([(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)])
            .unwrap();

        let result = graph.topological_sort().unwrap();
        assert!(!result.has_cycle());
        assert_valid(&graph, &result);
    }

    #[test]
    fn test_topological_rejects_undirected() {
        let graph = Graph::undirected(2);
        assert!(matches!(
            graph.topological_sort(),
            Err(GraphError::Unsupported { .. })
        ));
    }
}
