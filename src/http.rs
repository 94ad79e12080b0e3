//! Transport seam for posting JSON bodies to the submission endpoint.
//!
//! [`SubmitHttpClient`] is the crate's only dependency on an HTTP stack. The submitter hands it
//! a serialized body and reads back [`ResponseMetadata`]; the response body itself is never
//! interpreted. Any HTTP status counts as a completed exchange. Only failures that prevent a
//! response (DNS, TCP, TLS, I/O) surface as [`TransportError`].

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{CONTENT_TYPE, HeaderValue};
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`SubmitHttpClient::post_json`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ResponseMetadata, TransportError>> + 'a + Send>>;

/// HTTP transports capable of posting a JSON body to a fixed endpoint.
///
/// Implementations must be `Send + Sync + 'static` so one client can be shared by every
/// caller of a submitter, and the returned future must be `Send` so submissions can hop
/// executors.
pub trait SubmitHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues exactly one `POST` with `Content-Type: application/json`.
	fn post_json<'a>(&'a self, endpoint: &'a Url, body: Vec<u8>) -> TransportFuture<'a>;
}

/// What the transport learned from the endpoint's response.
///
/// Additional metadata fields may be added in future releases, so downstream code
/// should construct values using field names instead of struct update syntax.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the endpoint, if available.
	pub status: Option<u16>,
}
impl ResponseMetadata {
	/// Metadata for a response with the given status.
	pub fn with_status(status: u16) -> Self {
		Self { status: Some(status) }
	}

	/// Returns `true` when the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		matches!(self.status, Some(200..=299))
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Finishes a reqwest [`ClientBuilder`](reqwest::ClientBuilder) and wraps the result.
	pub fn from_builder(builder: reqwest::ClientBuilder) -> Result<Self, ConfigError> {
		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl SubmitHttpClient for ReqwestHttpClient {
	fn post_json<'a>(&'a self, endpoint: &'a Url, body: Vec<u8>) -> TransportFuture<'a> {
		Box::pin(async move {
			let response = self
				.0
				.post(endpoint.clone())
				.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
				.body(body)
				.send()
				.await?;
			let status = response.status().as_u16();

			// Drain the body so the connection can be reused; its content is not interpreted.
			response.bytes().await?;

			Ok(ResponseMetadata::with_status(status))
		})
	}
}
