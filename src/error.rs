//! Crate-level error types shared by the limiter, the transport seam, and the submitter.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; the value being built is unusable.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A permit could not be obtained.
	#[error(transparent)]
	Acquire(#[from] AcquireError),
	/// A single delivery attempt failed.
	#[error(transparent)]
	Delivery(#[from] DeliveryError),
}

/// Configuration and validation failures raised at construction time.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Request quota must allow at least one request per window.
	#[error("Request limit must be a positive integer, got {limit}.")]
	NonPositiveLimit {
		/// Limit that was supplied.
		limit: i64,
	},
	/// Refill window must be longer than zero.
	#[error("Refill window must be greater than zero.")]
	ZeroWindow,
	/// Refill window exceeds the longest period the refill task can schedule.
	#[error("Refill window {window:?} exceeds the maximum of {max:?}.")]
	WindowTooLong {
		/// Window that was supplied, saturated when it does not fit in a [`Duration`].
		window: Duration,
		/// Longest accepted window.
		max: Duration,
	},
	/// The refill task needs an active tokio runtime to be spawned on.
	#[error("No tokio runtime is active; the refill task cannot be started.")]
	MissingRuntime,
	/// Submission endpoint cannot be parsed.
	#[error("Submission endpoint is not a valid URI.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Submission endpoint uses a scheme other than HTTP(S).
	#[error("Submission endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Reasons a bounded acquisition gave up without a permit.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum AcquireError {
	/// The deadline elapsed before a permit was granted.
	#[error("No permit was granted within {waited:?}.")]
	TimedOut {
		/// How long the caller waited.
		waited: Duration,
	},
	/// The caller's cancellation token fired while waiting.
	#[error("Permit acquisition was cancelled.")]
	Cancelled,
	/// The pool has been shut down and will never grant another permit.
	#[error("Permit pool is closed.")]
	Closed,
}

/// Failure of one delivery attempt; logged and reported, never retried.
#[derive(Debug, ThisError)]
pub enum DeliveryError {
	/// The envelope could not be serialized.
	#[error("Document envelope could not be serialized: {0}")]
	Serialization(#[from] serde_json::Error),
	/// The request never produced a response.
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl DeliveryError {
	/// Coarse classification used by reports, logs, and metrics.
	pub fn kind(&self) -> FailureKind {
		match self {
			Self::Serialization(_) => FailureKind::Serialization,
			Self::Transport(_) => FailureKind::Transport,
		}
	}
}

/// Coarse failure classes surfaced through submission reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
	/// Envelope serialization failed before anything was sent.
	Serialization,
	/// Network, TLS, or I/O failure while sending.
	Transport,
}
impl FailureKind {
	/// Returns a stable label suitable for log or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FailureKind::Serialization => "serialization",
			FailureKind::Transport => "transport",
		}
	}
}
impl Display for FailureKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the submission endpoint: {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the submission endpoint: {0}")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
