//! Structured per-submission outcomes for callers that opt into observing failures.

// self
use crate::{
	_prelude::*,
	error::{AcquireError, FailureKind},
};

/// What happened to one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
	/// The endpoint answered; any HTTP status counts.
	Delivered {
		/// Status returned by the endpoint, when the transport exposes it.
		status: Option<u16>,
	},
	/// A permit was granted but the single attempt failed.
	Failed {
		/// Coarse failure class.
		kind: FailureKind,
		/// Human-readable description of the failure.
		message: String,
	},
	/// No permit was granted, so nothing was sent.
	Abandoned {
		/// Why the wait ended.
		reason: AcquireError,
	},
}
impl SubmitOutcome {
	/// Returns `true` when the endpoint received the request.
	pub fn is_delivered(&self) -> bool {
		matches!(self, Self::Delivered { .. })
	}
}

/// Outcome of one submission, tagged with the document it concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitReport {
	/// Identifier of the submitted document.
	pub doc_id: String,
	/// What happened.
	pub outcome: SubmitOutcome,
}

/// Receives a [`SubmitReport`] after every submission settles.
///
/// Called inline on the submitting task, so implementations should return quickly.
pub trait SubmitObserver
where
	Self: Send + Sync,
{
	/// Handles one report.
	fn observe(&self, report: &SubmitReport);
}
impl<F> SubmitObserver for F
where
	F: Send + Sync + Fn(&SubmitReport),
{
	fn observe(&self, report: &SubmitReport) {
		self(report)
	}
}
