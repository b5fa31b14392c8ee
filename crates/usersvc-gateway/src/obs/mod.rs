//! Lightweight in-process metrics.
//!
//! Counters and histograms are stored as atomics in `DashMap` shards and
//! rendered by the `/metrics` handler in Prometheus text format. The
//! `middleware` module records one observation per user-route request.

pub mod metrics;
pub mod middleware;

pub use metrics::ServiceMetrics;
