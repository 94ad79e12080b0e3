//! Builder for [`Submitter`] values.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	http::SubmitHttpClient,
	limiter::{RateLimiter, ThrottleConfig},
	submit::{DEFAULT_ENDPOINT, SubmitObserver, Submitter},
};

/// Builder for [`Submitter`] values.
///
/// Validation (quota, endpoint URI, runtime availability) happens in
/// [`SubmitterBuilder::build`], so a misconfigured submitter never starts its refill task.
pub struct SubmitterBuilder<C>
where
	C: ?Sized + SubmitHttpClient,
{
	config: ThrottleConfig,
	http_client: Arc<C>,
	endpoint: String,
	observer: Option<Arc<dyn SubmitObserver>>,
}
impl<C> SubmitterBuilder<C>
where
	C: ?Sized + SubmitHttpClient,
{
	/// Creates a builder that posts to [`DEFAULT_ENDPOINT`] through `http_client`.
	pub fn new(config: ThrottleConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			config,
			http_client: http_client.into(),
			endpoint: DEFAULT_ENDPOINT.to_owned(),
			observer: None,
		}
	}

	/// Overrides the endpoint with an already parsed URL.
	pub fn endpoint(mut self, url: Url) -> Self {
		self.endpoint = url.into();

		self
	}

	/// Overrides the endpoint with a raw URI; parsing is deferred to [`SubmitterBuilder::build`].
	pub fn endpoint_str(mut self, uri: impl Into<String>) -> Self {
		self.endpoint = uri.into();

		self
	}

	/// Registers an observer that receives a [`SubmitReport`](crate::submit::SubmitReport) for
	/// every submission.
	pub fn observer(mut self, observer: Arc<dyn SubmitObserver>) -> Self {
		self.observer = Some(observer);

		self
	}

	/// Validates the configuration and starts the submitter's refill task.
	pub fn build(self) -> Result<Submitter<C>> {
		let endpoint = parse_endpoint(&self.endpoint)?;
		let limiter = RateLimiter::start(self.config)?;

		Ok(Submitter {
			limiter,
			http_client: self.http_client,
			endpoint,
			observer: self.observer,
			metrics: Default::default(),
		})
	}
}
impl<C> Debug for SubmitterBuilder<C>
where
	C: ?Sized + SubmitHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SubmitterBuilder")
			.field("config", &self.config)
			.field("endpoint", &self.endpoint)
			.field("observer_set", &self.observer.is_some())
			.finish()
	}
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint { source })?;

	match url.scheme() {
		"http" | "https" => Ok(url),
		_ => Err(ConfigError::UnsupportedScheme { url: url.to_string() }),
	}
}
