// SPDX-License-Identifier: BSL-1.1 OR Apache-2.0
//! Latency and throughput metrics for stress tests.

use std::{
    collections::BTreeMap,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

use hdrhistogram::Histogram;

/// Highest trackable latency: one hour, in nanoseconds.
const MAX_TRACKABLE_NANOS: u64 = 3_600_000_000_000;

/// Latency histogram with p50/p99/p999 percentiles, nanosecond resolution.
#[derive(Clone)]
pub struct LatencyHistogram {
    histogram: Histogram<u64>,
}

impl LatencyHistogram {
    pub fn new() -> Self {
        Self {
            histogram: Histogram::new_with_bounds(1, MAX_TRACKABLE_NANOS, 3)
                .expect("static histogram bounds"),
        }
    }

    /// Record a latency measurement, clamped to the trackable range.
    pub fn record(&mut self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.histogram.saturating_record(nanos.max(1));
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }

    /// Get a snapshot of the current statistics.
    pub fn snapshot(&self) -> LatencySnapshot {
        let at = |q: f64| Duration::from_nanos(self.histogram.value_at_quantile(q));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mean = Duration::from_nanos(self.histogram.mean() as u64);
        LatencySnapshot {
            count: self.histogram.len(),
            p50: at(0.5),
            p99: at(0.99),
            p999: at(0.999),
            max: Duration::from_nanos(self.histogram.max()),
            mean,
        }
    }

    /// Merge another histogram into this one.
    pub fn merge(&mut self, other: &Self) {
        let _ = self.histogram.add(&other.histogram);
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of latency statistics.
#[derive(Debug, Clone)]
pub struct LatencySnapshot {
    pub count: u64,
    pub p50: Duration,
    pub p99: Duration,
    pub p999: Duration,
    pub max: Duration,
    pub mean: Duration,
}

impl fmt::Display for LatencySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} mean={:?} p50={:?} p99={:?} p999={:?} max={:?}",
            self.count, self.mean, self.p50, self.p99, self.p999, self.max
        )
    }
}

/// One latency histogram per algorithm name.
#[derive(Clone, Default)]
pub struct AlgorithmLatencies {
    by_algorithm: BTreeMap<&'static str, LatencyHistogram>,
}

impl AlgorithmLatencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, algorithm: &'static str, duration: Duration) {
        self.by_algorithm
            .entry(algorithm)
            .or_default()
            .record(duration);
    }

    /// Run `op` and record how long it took under `algorithm`.
    pub fn time<T>(&mut self, algorithm: &'static str, op: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = op();
        self.record(algorithm, start.elapsed());
        out
    }

    pub fn snapshot(&self, algorithm: &str) -> Option<LatencySnapshot> {
        self.by_algorithm
            .get(algorithm)
            .map(LatencyHistogram::snapshot)
    }

    /// Merge another thread's measurements into this one.
    pub fn merge(&mut self, other: &Self) {
        for (&name, histogram) in &other.by_algorithm {
            self.by_algorithm.entry(name).or_default().merge(histogram);
        }
    }

    pub fn algorithms(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_algorithm.keys().copied()
    }
}

impl fmt::Display for AlgorithmLatencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, histogram) in &self.by_algorithm {
            writeln!(f, "  {name:<16} {}", histogram.snapshot())?;
        }
        Ok(())
    }
}

/// Thread-safe throughput counter.
pub struct ThroughputCounter {
    count: AtomicU64,
    start: Instant,
}

impl ThroughputCounter {
    pub fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
            start: Instant::now(),
        }
    }

    /// Increment the counter by one.
    pub fn inc(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add(&self, n: u64) {
        self.count.fetch_add(n, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Operations per second since creation.
    pub fn throughput(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            #[allow(clippy::cast_precision_loss)]
            let count = self.count() as f64;
            count / elapsed
        } else {
            0.0
        }
    }
}

impl Default for ThroughputCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_histogram() {
        let mut hist = LatencyHistogram::new();
        for i in 1..=100 {
            hist.record(Duration::from_micros(i));
        }
        let snap = hist.snapshot();
        assert_eq!(snap.count, 100);
        assert!(snap.p50 >= Duration::from_micros(40));
        assert!(snap.p50 <= Duration::from_micros(60));
    }

    #[test]
    fn test_zero_duration_is_recorded() {
        let mut hist = LatencyHistogram::new();
        hist.record(Duration::ZERO);
        assert_eq!(hist.snapshot().count, 1);
    }

    #[test]
    fn test_algorithm_latencies_merge() {
        let mut a = AlgorithmLatencies::new();
        let mut b = AlgorithmLatencies::new();
        let sum = a.time("dijkstra", || 1 + 1);
        assert_eq!(sum, 2);
        b.record("dijkstra", Duration::from_micros(5));
        b.record("kruskal", Duration::from_micros(7));

        a.merge(&b);
        assert_eq!(a.snapshot("dijkstra").unwrap().count, 2);
        assert_eq!(a.algorithms().collect::<Vec<_>>(), vec!["dijkstra", "kruskal"]);
        assert!(a.snapshot("prim").is_none());
        assert!(a.to_string().contains("kruskal"));
    }

    #[test]
    fn test_throughput_counter() {
        let counter = ThroughputCounter::new();
        counter.add(100);
        counter.inc();
        assert_eq!(counter.count(), 101);
    }
}
