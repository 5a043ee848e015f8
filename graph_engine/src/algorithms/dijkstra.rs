//! Single-source shortest paths for non-negative weights.
//!
//! Uses a min-priority queue keyed by tentative distance with lazy deletion:
//! a popped entry whose key exceeds the best known distance is stale and is
//! skipped. Negative weights are rejected up front.
//!
//! Distances are [`Distance`] sums, so a path whose length exceeds `i64::MAX`
//! is still reported rather than clamped.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::collections::{BinaryHeapQueue, MinPriorityQueue};
use crate::{Distance, Graph, GraphError, GraphView, Result, VertexId};

/// Shortest distances and predecessor tree from one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPaths {
    pub source: VertexId,
    /// Distance per vertex; `None` when unreachable.
    pub distances: Vec<Option<Distance>>,
    /// Predecessor on a shortest path; `None` for the source and unreachable vertices.
    pub predecessors: Vec<Option<VertexId>>,
}

impl ShortestPaths {
    #[must_use]
    pub fn distance_to(&self, v: VertexId) -> Option<Distance> {
        self.distances.get(v).copied().flatten()
    }

    #[must_use]
    pub fn is_reachable(&self, v: VertexId) -> bool {
        self.distance_to(v).is_some()
    }

    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    /// Vertices of a shortest path from the source to `target`, inclusive.
    #[must_use]
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        self.distance_to(target)?;

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessors.get(current).copied().flatten()?;
            path.push(current);
            if path.len() > self.distances.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

pub(crate) fn first_negative_edge(view: &GraphView<'_>) -> Option<GraphError> {
    view.edges().iter().find(|e| e.weight < 0).map(|e| GraphError::NegativeWeight {
        from: e.from,
        to: e.to,
        weight: e.weight,
    })
}

pub(crate) fn dijkstra_on<Q>(view: &GraphView<'_>, source: VertexId) -> ShortestPaths
where
    Q: MinPriorityQueue<VertexId, Distance> + Default,
{
    let n = view.vertex_count();
    let mut dist: Vec<Option<Distance>> = vec![None; n];
    let mut pred = vec![None; n];
    let mut queue = Q::default();

    dist[source] = Some(0);
    queue.push(source, 0);

    while let Some((u, d)) = queue.pop_min() {
        if dist[u].is_some_and(|best| d > best) {
            continue;
        }
        for edge in view.edges_from(u) {
            let candidate = d + Distance::from(edge.weight);
            if dist[edge.to].map_or(true, |best| candidate < best) {
                dist[edge.to] = Some(candidate);
                pred[edge.to] = Some(u);
                queue.push(edge.to, candidate);
            }
        }
    }

    ShortestPaths {
        source,
        distances: dist,
        predecessors: pred,
    }
}

impl Graph {
    /// Dijkstra's algorithm from `source`.
    ///
    /// Time complexity: O((V + E) log V)
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] for an out-of-range source and
    /// [`GraphError::NegativeWeight`] if any edge weight is negative.
    pub fn dijkstra(&self, source: VertexId) -> Result<ShortestPaths> {
        self.dijkstra_with::<BinaryHeapQueue<VertexId, Distance>>(source)
    }

    /// Dijkstra's algorithm with a caller-chosen priority queue.
    #[instrument(skip(self))]
    pub fn dijkstra_with<Q>(&self, source: VertexId) -> Result<ShortestPaths>
    where
        Q: MinPriorityQueue<VertexId, Distance> + Default,
    {
        self.check_vertex(source)?;
        let view = self.read();
        if let Some(err) = first_negative_edge(&view) {
            return Err(err);
        }

        let result = dijkstra_on::<Q>(&view, source);
        debug!(reached = result.reachable_count(), "dijkstra finished");
        Ok(result)
    }
}
