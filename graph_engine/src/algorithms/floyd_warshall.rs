//! All-pairs shortest paths by dynamic programming over intermediate vertices.
//!
//! Maintains a `V x V` distance matrix and a parallel next-hop matrix. After
//! processing every intermediate vertex `k`, a negative diagonal entry
//! `dist[i][i]` means `i` lies on a negative cycle.
//!
//! Entries are [`Distance`] sums. Relaxation saturates because a negative
//! cycle can drive entries down exponentially in `V`; once a cycle is flagged
//! no distance is reported.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{Distance, Graph, GraphView, VertexId};

/// All-pairs distances with next-hop path reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllPairsShortestPaths {
    /// `distances[i][j]`; `None` when `j` is unreachable from `i`.
    pub distances: Vec<Vec<Option<Distance>>>,
    /// First vertex after `i` on a shortest path to `j`.
    pub next_hop: Vec<Vec<Option<VertexId>>>,
    /// Vertices whose diagonal entry went negative.
    negative_cycle_vertices: Vec<VertexId>,
}

impl AllPairsShortestPaths {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.distances.len()
    }

    #[must_use]
    pub fn has_negative_cycle(&self) -> bool {
        !self.negative_cycle_vertices.is_empty()
    }

    /// Vertices lying on at least one negative cycle.
    #[must_use]
    pub fn negative_cycle_vertices(&self) -> &[VertexId] {
        &self.negative_cycle_vertices
    }

    /// Distance from `from` to `to`; `None` when unreachable, out of range,
    /// or when the graph has a negative cycle.
    #[must_use]
    pub fn distance(&self, from: VertexId, to: VertexId) -> Option<Distance> {
        if self.has_negative_cycle() {
            return None;
        }
        self.distances.get(from)?.get(to).copied().flatten()
    }

    /// Follows the next-hop matrix from `from` to `to`.
    #[must_use]
    pub fn path(&self, from: VertexId, to: VertexId) -> Option<Vec<VertexId>> {
        self.distance(from, to)?;

        let mut path = vec![from];
        let mut current = from;
        while current != to {
            current = self.next_hop[current][to]?;
            path.push(current);
            if path.len() > self.vertex_count() {
                return None;
            }
        }
        Some(path)
    }
}

type DistanceRow = Vec<Option<Distance>>;

pub(crate) fn floyd_warshall_on(
    view: &GraphView<'_>,
    parallel_threshold: usize,
) -> AllPairsShortestPaths {
    let n = view.vertex_count();
    let mut dist: Vec<DistanceRow> = vec![vec![None; n]; n];
    let mut next: Vec<Vec<Option<VertexId>>> = vec![vec![None; n]; n];

    for i in 0..n {
        dist[i][i] = Some(0);
        next[i][i] = Some(i);
    }
    for u in 0..n {
        for edge in view.edges_from(u) {
            let weight = Distance::from(edge.weight);
            if dist[u][edge.to].map_or(true, |best| weight < best) {
                dist[u][edge.to] = Some(weight);
                next[u][edge.to] = Some(edge.to);
            }
        }
    }

    let parallel = n >= parallel_threshold;
    for k in 0..n {
        // Row k is read by every other row during this round.
        let row_k = dist[k].clone();
        let relax = |(row, next_row): (&mut DistanceRow, &mut Vec<Option<VertexId>>)| {
            let Some(through_k) = row[k] else {
                return;
            };
            let hop = next_row[k];
            for (j, tail) in row_k.iter().enumerate() {
                let Some(tail) = *tail else {
                    continue;
                };
                let candidate = through_k.saturating_add(tail);
                if row[j].map_or(true, |best| candidate < best) {
                    row[j] = Some(candidate);
                    next_row[j] = hop;
                }
            }
        };

        if parallel {
            dist.par_iter_mut()
                .zip(next.par_iter_mut())
                .for_each(&relax);
        } else {
            dist.iter_mut().zip(next.iter_mut()).for_each(&relax);
        }
    }

    let negative_cycle_vertices: Vec<VertexId> = (0..n)
        .filter(|&i| dist[i][i].is_some_and(|d| d < 0))
        .collect();

    AllPairsShortestPaths {
        distances: dist,
        next_hop: next,
        negative_cycle_vertices,
    }
}

impl Graph {
    /// Floyd-Warshall over the whole graph.
    ///
    /// Time complexity: O(V^3); rows are relaxed in parallel once the vertex
    /// count reaches [`GraphConfig::parallel_threshold`](crate::GraphConfig).
    #[instrument(skip(self))]
    pub fn floyd_warshall(&self) -> AllPairsShortestPaths {
        let result = floyd_warshall_on(&self.read(), self.config().parallel_threshold);
        if result.has_negative_cycle() {
            warn!(
                vertices = result.negative_cycle_vertices().len(),
                "negative cycle detected"
            );
        } else {
            debug!(vertex_count = result.vertex_count(), "floyd-warshall finished");
        }
        result
    }
}
