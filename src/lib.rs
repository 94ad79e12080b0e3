//! Throttled, fire-and-forget document submission: a fair fixed-window permit pool in front of a
//! single JSON endpoint.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod document;
pub mod error;
pub mod http;
pub mod limiter;
pub mod obs;
pub mod submit;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests and demos.

	pub use crate::_prelude::*;

	// self
	use crate::{
		document::{Description, Document, DocumentType, Product},
		http::ReqwestHttpClient,
		limiter::ThrottleConfig,
		submit::{ReqwestSubmitter, SubmitObserver, SubmitReport, Submitter},
	};

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		ReqwestHttpClient::from_builder(
			ReqwestClient::builder()
				.danger_accept_invalid_certs(true)
				.danger_accept_invalid_hostnames(true),
		)
		.expect("Failed to build insecure Reqwest client for tests.")
	}

	/// Constructs a reqwest-backed [`Submitter`] that posts to `endpoint` and reports every
	/// outcome to the returned [`RecordingObserver`].
	pub fn build_reqwest_test_submitter(
		config: ThrottleConfig,
		endpoint: &str,
	) -> (ReqwestSubmitter, Arc<RecordingObserver>) {
		let observer = Arc::new(RecordingObserver::default());
		let submitter =
			Submitter::<ReqwestHttpClient>::with_http_client(config, test_reqwest_http_client())
				.endpoint_str(endpoint)
				.observer(observer.clone())
				.build()
				.expect("Failed to build reqwest test submitter.");

		(submitter, observer)
	}

	/// Observer that keeps every report for later assertions.
	#[derive(Debug, Default)]
	pub struct RecordingObserver(Mutex<Vec<SubmitReport>>);
	impl RecordingObserver {
		/// Returns a snapshot of the reports observed so far.
		pub fn reports(&self) -> Vec<SubmitReport> {
			self.0.lock().clone()
		}
	}
	impl SubmitObserver for RecordingObserver {
		fn observe(&self, report: &SubmitReport) {
			self.0.lock().push(report.clone());
		}
	}

	/// Parses a `YYYY-MM-DD` fixture date.
	pub fn date(value: &str) -> Date {
		Date::parse(value, time::macros::format_description!("[year]-[month]-[day]"))
			.expect("Fixture dates should use the YYYY-MM-DD form.")
	}

	/// Returns a fully populated goods-introduction document with one product.
	pub fn sample_document(doc_id: &str) -> Document {
		Document {
			description: Some(Description { participant_inn: "7700000000".into() }),
			doc_id: doc_id.into(),
			doc_status: "DRAFT".into(),
			doc_type: DocumentType::LpIntroduceGoods,
			import_request: true,
			owner_inn: "7700000001".into(),
			participant_inn: "7700000000".into(),
			producer_inn: "7700000002".into(),
			production_date: date("2023-01-10"),
			production_type: "OWN_PRODUCTION".into(),
			products: vec![Product {
				certificate_document: "CONFORMITY_CERTIFICATE".into(),
				certificate_document_date: date("2022-06-01"),
				certificate_document_number: "RU-001".into(),
				owner_inn: "7700000001".into(),
				producer_inn: "7700000002".into(),
				production_date: date("2023-01-10"),
				tnved_code: "6401100000".into(),
				uit_code: Some("010460406000600021N4N57RSCBUZTQ".into()),
				uitu_code: None,
			}],
			reg_date: date("2023-01-15"),
			reg_number: "REG-42".into(),
		}
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::Date;
	pub use tokio_util::sync::CancellationToken;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use tokio_util::sync::CancellationToken;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tracing_subscriber as _};
