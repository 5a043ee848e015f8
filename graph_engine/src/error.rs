//! Error types for the graph engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::VertexId;

/// Shape a graph must have for an algorithm to be defined on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphKind {
    Directed,
    Undirected,
}

impl GraphKind {
    #[must_use]
    pub const fn of(directed: bool) -> Self {
        if directed {
            Self::Directed
        } else {
            Self::Undirected
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directed => f.write_str("directed"),
            Self::Undirected => f.write_str("undirected"),
        }
    }
}

/// Error type for graph operations.
///
/// Only caller mistakes live here. Expected outcomes such as a negative
/// cycle, a missing Euler path or a cyclic input to topological sort are
/// reported through the result types instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum GraphError {
    /// Vertex index outside `[0, vertex_count)`.
    #[error("Invalid vertex {vertex}: graph has {vertex_count} vertices")]
    InvalidVertex {
        vertex: VertexId,
        vertex_count: usize,
    },
    /// Algorithm invoked on a graph of the wrong shape.
    #[error("{algorithm} is only defined for {requires} graphs")]
    Unsupported {
        algorithm: &'static str,
        requires: GraphKind,
    },
    /// Negative edge weight passed to an algorithm that assumes non-negative weights.
    #[error("Edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight {
        from: VertexId,
        to: VertexId,
        weight: i64,
    },
    /// Result accessor called before any computation finished.
    #[error("No result has been computed yet")]
    NotComputed,
}

impl GraphError {
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::InvalidVertex {
            vertex: 7,
            vertex_count: 5,
        };
        assert_eq!(err.to_string(), "Invalid vertex 7: graph has 5 vertices");

        let err = GraphError::Unsupported {
            algorithm: "kruskal",
            requires: GraphKind::Undirected,
        };
        assert!(err.to_string().contains("undirected"));
        assert!(err.is_unsupported());

        let err = GraphError::NegativeWeight {
            from: 1,
            to: 2,
            weight: -3,
        };
        assert!(err.to_string().contains("negative weight -3"));

        assert!(GraphError::NotComputed.to_string().contains("computed"));
    }

    #[test]
    fn test_graph_kind_of() {
        assert_eq!(GraphKind::of(true), GraphKind::Directed);
        assert_eq!(GraphKind::of(false), GraphKind::Undirected);
        assert_eq!(GraphKind::Directed.to_string(), "directed");
    }

    #[test]
    fn test_error_serializes() {
        let err = GraphError::InvalidVertex {
            vertex: 3,
            vertex_count: 2,
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("InvalidVertex"));
    }
}
