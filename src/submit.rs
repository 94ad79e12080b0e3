//! Throttled, fire-and-forget document submission.
//!
//! [`Submitter::submit`] waits for a permit from the shared [`RateLimiter`], builds the
//! envelope, and makes exactly one `POST`. Failures never reach the caller: each one produces
//! a single diagnostic log line and a [`SubmitReport`] for the optional [`SubmitObserver`].
//! There is no retry, backoff, or circuit breaking; reliability belongs to a higher layer.

pub mod builder;
pub mod metrics;
pub mod report;

pub use builder::*;
pub use metrics::*;
pub use report::*;

// self
use crate::{
	_prelude::*,
	document::{Document, DocumentEnvelope, Signature},
	error::{AcquireError, DeliveryError},
	http::{ResponseMetadata, SubmitHttpClient},
	limiter::{RateLimiter, ThrottleConfig},
	obs::{self, SubmitSpan, SubmitStage},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Endpoint documents are posted to unless the builder overrides it.
pub const DEFAULT_ENDPOINT: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

#[cfg(feature = "reqwest")]
/// Submitter specialized for the crate's default reqwest transport.
pub type ReqwestSubmitter = Submitter<ReqwestHttpClient>;

/// Posts documents to a single endpoint, never exceeding the configured quota per window.
///
/// The submitter owns its limiter, so the refill task lives exactly as long as the submitter
/// (or until [`Submitter::shutdown`]). Share it behind an [`Arc`] across callers.
pub struct Submitter<C>
where
	C: ?Sized + SubmitHttpClient,
{
	limiter: RateLimiter,
	http_client: Arc<C>,
	endpoint: Url,
	observer: Option<Arc<dyn SubmitObserver>>,
	metrics: Arc<SubmitMetrics>,
}
impl<C> Submitter<C>
where
	C: ?Sized + SubmitHttpClient,
{
	/// Starts a builder that sends through the caller-provided transport.
	pub fn with_http_client(
		config: ThrottleConfig,
		http_client: impl Into<Arc<C>>,
	) -> SubmitterBuilder<C> {
		SubmitterBuilder::new(config, http_client)
	}

	/// Endpoint every request is posted to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Limiter guarding the endpoint.
	pub fn limiter(&self) -> &RateLimiter {
		&self.limiter
	}

	/// Counters for attempts and their outcomes.
	pub fn metrics(&self) -> &Arc<SubmitMetrics> {
		&self.metrics
	}

	/// Submits one document, waiting as long as it takes for a permit.
	///
	/// Returns once the single delivery attempt has settled. Nothing is reported back: a
	/// failed attempt is logged and handed to the observer, then dropped.
	pub async fn submit(&self, document: Document, signature: impl Into<Signature>) {
		let signature = signature.into();
		let span = SubmitSpan::new("submit", &document.doc_id);

		span.instrument(async move {
			self.begin();

			match self.limiter.acquire().await {
				Ok(()) => self.deliver(DocumentEnvelope::new(document, signature)).await,
				Err(err) => self.abandon(document.doc_id, err),
			}
		})
		.await;
	}

	/// Like [`Submitter::submit`] but gives up if no permit is granted within `timeout`.
	///
	/// Only the wait for a permit is bounded. Once granted, the delivery behaves exactly as in
	/// [`Submitter::submit`] and its outcome is not part of the return value.
	pub async fn submit_within(
		&self,
		document: Document,
		signature: impl Into<Signature>,
		timeout: Duration,
	) -> Result<(), AcquireError> {
		let signature = signature.into();
		let span = SubmitSpan::new("submit_within", &document.doc_id);

		span.instrument(async move {
			self.begin();

			match self.limiter.acquire_timeout(timeout).await {
				Ok(()) => {
					self.deliver(DocumentEnvelope::new(document, signature)).await;

					Ok(())
				},
				Err(err) => {
					self.abandon(document.doc_id, err.clone());

					Err(err)
				},
			}
		})
		.await
	}

	/// Like [`Submitter::submit`] but gives up once `token` is cancelled while waiting.
	pub async fn submit_cancellable(
		&self,
		document: Document,
		signature: impl Into<Signature>,
		token: &CancellationToken,
	) -> Result<(), AcquireError> {
		let signature = signature.into();
		let span = SubmitSpan::new("submit_cancellable", &document.doc_id);

		span.instrument(async move {
			self.begin();

			match self.limiter.acquire_cancellable(token).await {
				Ok(()) => {
					self.deliver(DocumentEnvelope::new(document, signature)).await;

					Ok(())
				},
				Err(err) => {
					self.abandon(document.doc_id, err.clone());

					Err(err)
				},
			}
		})
		.await
	}

	/// Stops the refill task and releases blocked callers.
	///
	/// Callers still waiting for a permit are abandoned (logged and reported); later calls are
	/// abandoned immediately.
	pub async fn shutdown(&self) {
		self.limiter.stop().await;
	}

	fn begin(&self) {
		self.metrics.record_attempt();
		obs::record_submit_stage(SubmitStage::Attempt);
	}

	async fn deliver(&self, envelope: DocumentEnvelope) {
		let doc_id = envelope.document.doc_id.clone();
		let outcome = match self.send(&envelope).await {
			Ok(meta) => {
				obs::debug_delivered(&doc_id, meta.status);
				obs::record_submit_stage(SubmitStage::Delivered);
				self.metrics.record_delivered();

				SubmitOutcome::Delivered { status: meta.status }
			},
			Err(err) => {
				obs::log_delivery_failure(&doc_id, &err);
				obs::record_submit_stage(SubmitStage::Failed);
				self.metrics.record_failed();

				SubmitOutcome::Failed { kind: err.kind(), message: err.to_string() }
			},
		};

		self.notify(SubmitReport { doc_id, outcome });
	}

	async fn send(&self, envelope: &DocumentEnvelope) -> Result<ResponseMetadata, DeliveryError> {
		let body = envelope.to_json_vec()?;

		Ok(self.http_client.post_json(&self.endpoint, body).await?)
	}

	fn abandon(&self, doc_id: String, err: AcquireError) {
		obs::log_abandoned(&doc_id, &err);
		obs::record_submit_stage(SubmitStage::Abandoned);
		self.metrics.record_abandoned();
		self.notify(SubmitReport { doc_id, outcome: SubmitOutcome::Abandoned { reason: err } });
	}

	fn notify(&self, report: SubmitReport) {
		if let Some(observer) = self.observer.as_ref() {
			observer.observe(&report);
		}
	}
}
#[cfg(feature = "reqwest")]
impl Submitter<ReqwestHttpClient> {
	/// Creates a submitter for the default endpoint with its own reqwest transport.
	///
	/// Must be called inside a tokio runtime; the refill task starts immediately.
	pub fn new(config: ThrottleConfig) -> Result<Self> {
		Self::builder(config).build()
	}

	/// Starts a builder preconfigured with a default reqwest transport.
	pub fn builder(config: ThrottleConfig) -> SubmitterBuilder<ReqwestHttpClient> {
		SubmitterBuilder::new(config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for Submitter<C>
where
	C: ?Sized + SubmitHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Submitter")
			.field("endpoint", &self.endpoint.as_str())
			.field("limiter", &self.limiter)
			.field("observer_set", &self.observer.is_some())
			.finish()
	}
}
