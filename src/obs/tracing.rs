// self
use crate::{
	_prelude::*,
	error::{AcquireError, DeliveryError},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedSubmit<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedSubmit<F> = F;

/// A span builder used by submission entry points.
#[derive(Clone, Debug)]
pub struct SubmitSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl SubmitSpan {
	/// Creates a new span tagged with the calling stage and document identifier.
	pub fn new(stage: &'static str, doc_id: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("document_submitter.submit", stage, doc_id);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, doc_id);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedSubmit<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits the single diagnostic line for a failed delivery.
pub(crate) fn log_delivery_failure(doc_id: &str, err: &DeliveryError) {
	#[cfg(feature = "tracing")]
	tracing::info!(doc_id, kind = err.kind().as_str(), "Document submission failed: {err}");
	#[cfg(not(feature = "tracing"))]
	let _ = (doc_id, err);
}

/// Emits the diagnostic line for a submission that never obtained a permit.
pub(crate) fn log_abandoned(doc_id: &str, err: &AcquireError) {
	#[cfg(feature = "tracing")]
	tracing::info!(doc_id, "Document submission abandoned: {err}");
	#[cfg(not(feature = "tracing"))]
	let _ = (doc_id, err);
}

/// Records the endpoint's answer at debug level.
pub(crate) fn debug_delivered(doc_id: &str, status: Option<u16>) {
	#[cfg(feature = "tracing")]
	tracing::debug!(doc_id, status, "Document submitted.");
	#[cfg(not(feature = "tracing"))]
	let _ = (doc_id, status);
}

/// Reports a refill loop that ended with a panic or was aborted by the runtime.
pub(crate) fn warn_refill_exit(err: &tokio::task::JoinError) {
	#[cfg(feature = "tracing")]
	tracing::warn!("Permit refill task exited abnormally: {err}");
	#[cfg(not(feature = "tracing"))]
	let _ = err;
}

/// Records a refill tick at trace level.
pub(crate) fn trace_refill(restored: usize, capacity: usize) {
	#[cfg(feature = "tracing")]
	tracing::trace!(
		restored = restored as u64,
		capacity = capacity as u64,
		"Permit pool refilled."
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (restored, capacity);
}
