//! Atomic counters for submission outcomes.

// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for submission attempts and their outcomes.
#[derive(Debug, Default)]
pub struct SubmitMetrics {
	attempts: AtomicU64,
	delivered: AtomicU64,
	failed: AtomicU64,
	abandoned: AtomicU64,
}
impl SubmitMetrics {
	/// Returns the total number of submission calls.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of requests the endpoint answered, whatever the status.
	pub fn delivered(&self) -> u64 {
		self.delivered.load(Ordering::Relaxed)
	}

	/// Returns the number of requests lost to serialization or transport failures.
	pub fn failed(&self) -> u64 {
		self.failed.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that never obtained a permit.
	pub fn abandoned(&self) -> u64 {
		self.abandoned.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_delivered(&self) {
		self.delivered.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failed(&self) {
		self.failed.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_abandoned(&self) {
		self.abandoned.fetch_add(1, Ordering::Relaxed);
	}
}
