// SPDX-License-Identifier: BSL-1.1 OR Apache-2.0
//! Test configuration presets for stress tests.

use std::env;

/// Scale level for stress tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleLevel {
    /// 100K vertices, ~2 min
    Quick,
    /// 1M vertices, ~10 min
    Full,
    /// Extended duration (1 hour+)
    Endurance,
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    pub scale: ScaleLevel,
    pub vertex_count: usize,
    /// Edges generated per vertex.
    pub edge_factor: usize,
    pub thread_count: usize,
    pub duration_secs: u64,
    pub seed: u64,
}

fn env_override<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl StressConfig {
    /// Get thread count, respecting `STRESS_THREADS` env var override.
    #[must_use]
    pub fn effective_thread_count(&self) -> usize {
        env_override("STRESS_THREADS", self.thread_count)
    }

    /// Get vertex count, respecting `STRESS_VERTICES` env var override.
    #[must_use]
    pub fn effective_vertex_count(&self) -> usize {
        env_override("STRESS_VERTICES", self.vertex_count)
    }

    /// Get edge count, respecting `STRESS_EDGES` env var override.
    #[must_use]
    pub fn effective_edge_count(&self) -> usize {
        env_override(
            "STRESS_EDGES",
            self.effective_vertex_count() * self.edge_factor,
        )
    }

    /// Get duration in seconds, respecting `STRESS_DURATION` env var override.
    #[must_use]
    pub fn effective_duration_secs(&self) -> u64 {
        env_override("STRESS_DURATION", self.duration_secs)
    }

    /// Get generator seed, respecting `STRESS_SEED` env var override.
    #[must_use]
    pub fn effective_seed(&self) -> u64 {
        env_override("STRESS_SEED", self.seed)
    }
}

/// Quick stress config: 100K vertices, 8 threads, ~2 min.
#[must_use]
pub const fn quick_config() -> StressConfig {
    StressConfig {
        scale: ScaleLevel::Quick,
        vertex_count: 100_000,
        edge_factor: 4,
        thread_count: 8,
        duration_secs: 120,
        seed: 42,
    }
}

/// Full stress config: 1M vertices, 16 threads, ~10 min.
#[must_use]
pub const fn full_config() -> StressConfig {
    StressConfig {
        scale: ScaleLevel::Full,
        vertex_count: 1_000_000,
        edge_factor: 4,
        thread_count: 16,
        duration_secs: 600,
        seed: 42,
    }
}

/// Endurance stress config: 500K vertices, 8 threads, 1 hour.
#[must_use]
pub const fn endurance_config() -> StressConfig {
    StressConfig {
        scale: ScaleLevel::Endurance,
        vertex_count: 500_000,
        edge_factor: 8,
        thread_count: 8,
        duration_secs: 3600,
        seed: 7,
    }
}
