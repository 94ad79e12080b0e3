//! Optional observability helpers for submissions and refills.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (default) to run every submission inside a span named
//!   `document_submitter.submit` with `stage` and `doc_id` fields, to emit one `info` event per failed
//!   delivery, and to trace refill ticks.
//! - Enable `metrics` to increment the `document_submitter_submit_total` counter for every
//!   attempt/delivery/failure/abandonment, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmitStage {
	/// Entry to [`Submitter::submit`](crate::submit::Submitter::submit) or a sibling.
	Attempt,
	/// The endpoint answered (any HTTP status).
	Delivered,
	/// Serialization or transport failed after a permit was granted.
	Failed,
	/// No permit was granted (timeout, cancellation, or shutdown).
	Abandoned,
}
impl SubmitStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SubmitStage::Attempt => "attempt",
			SubmitStage::Delivered => "delivered",
			SubmitStage::Failed => "failed",
			SubmitStage::Abandoned => "abandoned",
		}
	}
}
impl Display for SubmitStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
