//! Coordinator counters.
//!
//! Counters use relaxed ordering; they feed debug displays and tests, not
//! control flow.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts of what the coordinator did and skipped.
#[derive(Debug, Default)]
pub struct CoordinatorMetrics {
	/// Documents re-aggregated.
	pub aggregations: AtomicU64,
	/// Renders pushed to the host.
	pub renders_applied: AtomicU64,
	/// Renders skipped because the signature did not change.
	pub renders_skipped: AtomicU64,
	/// Full clears of an editor's decorations.
	pub clears: AtomicU64,
	/// Render requests dropped because their epoch was stale.
	pub stale_requests: AtomicU64,
}

impl CoordinatorMetrics {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn inc_aggregation(&self) {
		self.aggregations.fetch_add(1, Ordering::Relaxed);
	}

	pub fn inc_render_applied(&self) {
		self.renders_applied.fetch_add(1, Ordering::Relaxed);
	}

	pub fn inc_render_skipped(&self) {
		self.renders_skipped.fetch_add(1, Ordering::Relaxed);
	}

	pub fn inc_clear(&self) {
		self.clears.fetch_add(1, Ordering::Relaxed);
	}

	pub fn inc_stale_request(&self) {
		self.stale_requests.fetch_add(1, Ordering::Relaxed);
	}

	pub fn aggregation_count(&self) -> u64 {
		self.aggregations.load(Ordering::Relaxed)
	}

	pub fn render_applied_count(&self) -> u64 {
		self.renders_applied.load(Ordering::Relaxed)
	}

	pub fn render_skipped_count(&self) -> u64 {
		self.renders_skipped.load(Ordering::Relaxed)
	}

	pub fn clear_count(&self) -> u64 {
		self.clears.load(Ordering::Relaxed)
	}

	pub fn stale_request_count(&self) -> u64 {
		self.stale_requests.load(Ordering::Relaxed)
	}
}
