// SPDX-License-Identifier: BSL-1.1 OR Apache-2.0
//! Stress test utilities for the graph engine.
//!
//! Provides seeded graph generators, per-algorithm latency histograms,
//! and test configuration presets for large-graph stress testing.

pub mod config;
pub mod generators;
pub mod metrics;

pub use config::{endurance_config, full_config, quick_config, ScaleLevel, StressConfig};
pub use generators::{
    generate_connected_graph, generate_dag, generate_eulerian_graph, generate_random_graph,
    generate_weighted_edges,
};
pub use metrics::{AlgorithmLatencies, LatencyHistogram, LatencySnapshot, ThroughputCounter};

/// Format duration as human-readable string.
#[must_use]
pub fn format_duration(secs: f64) -> String {
    if secs >= 3600.0 {
        let hours = secs / 3600.0;
        format!("{hours:.1}h")
    } else if secs >= 60.0 {
        let mins = secs / 60.0;
        format!("{mins:.1}m")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        format!("{:.2}ms", secs * 1000.0)
    }
}
