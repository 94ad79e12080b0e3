#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use document_submitter::{
	_preludet::*,
	error::{ConfigError, FailureKind},
	limiter::{ThrottleConfig, WindowUnit},
	submit::{SubmitOutcome, Submitter},
};

const PATH: &str = "/api/v3/lk/documents/create";

fn config() -> ThrottleConfig {
	ThrottleConfig::per(WindowUnit::Second, 5).expect("Quota should be valid.")
}

#[tokio::test]
async fn submit_posts_the_envelope_as_json() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(PATH).header("content-type", "application/json").json_body(
				json!({
					"document": {
						"description": { "participantInn": "7700000000" },
						"doc_id": "doc-wire",
						"doc_status": "DRAFT",
						"doc_type": "LP_INTRODUCE_GOODS",
						"importRequest": true,
						"owner_inn": "7700000001",
						"participant_inn": "7700000000",
						"producer_inn": "7700000002",
						"production_date": "2023-01-10",
						"production_type": "OWN_PRODUCTION",
						"products": [{
							"certificate_document": "CONFORMITY_CERTIFICATE",
							"certificate_document_date": "2022-06-01",
							"certificate_document_number": "RU-001",
							"owner_inn": "7700000001",
							"producer_inn": "7700000002",
							"production_date": "2023-01-10",
							"tnved_code": "6401100000",
							"uit_code": "010460406000600021N4N57RSCBUZTQ",
							"uitu_code": null
						}],
						"reg_date": "2023-01-15",
						"reg_number": "REG-42"
					},
					"signature": "detached-signature"
				}),
			);
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let (submitter, observer) = build_reqwest_test_submitter(config(), &server.url(PATH));

	submitter.submit(sample_document("doc-wire"), "detached-signature").await;

	mock.assert_async().await;

	assert_eq!(
		observer.reports().first().map(|report| report.outcome.clone()),
		Some(SubmitOutcome::Delivered { status: Some(200) })
	);

	submitter.shutdown().await;
}

#[tokio::test]
async fn error_statuses_are_not_failures() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(PATH);
			then.status(503).body("maintenance");
		})
		.await;
	let (submitter, observer) = build_reqwest_test_submitter(config(), &server.url(PATH));

	submitter.submit(sample_document("doc-503"), "signature").await;

	mock.assert_calls_async(1).await;

	assert_eq!(submitter.metrics().delivered(), 1);
	assert_eq!(submitter.metrics().failed(), 0);
	assert_eq!(
		observer.reports().first().map(|report| report.outcome.clone()),
		Some(SubmitOutcome::Delivered { status: Some(503) })
	);

	submitter.shutdown().await;
}

#[tokio::test]
async fn each_call_is_sent_exactly_once() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(PATH);
			then.status(500);
		})
		.await;
	let (submitter, _observer) = build_reqwest_test_submitter(config(), &server.url(PATH));

	for idx in 0..3 {
		submitter.submit(sample_document(&format!("doc-{idx}")), "signature").await;
	}

	mock.assert_calls_async(3).await;

	submitter.shutdown().await;
}

#[tokio::test]
async fn unreachable_endpoint_is_swallowed() {
	let port = {
		let listener =
			std::net::TcpListener::bind("127.0.0.1:0").expect("Ephemeral port should bind.");

		listener.local_addr().expect("Listener should expose its address.").port()
	};
	let (submitter, observer) = build_reqwest_test_submitter(
		config(),
		&format!("http://127.0.0.1:{port}/api/v3/lk/documents/create"),
	);

	submitter.submit(sample_document("doc-offline"), "signature").await;

	let reports = observer.reports();

	assert_eq!(reports.len(), 1);
	assert!(matches!(
		reports[0].outcome,
		SubmitOutcome::Failed { kind: FailureKind::Transport, .. }
	));
	assert_eq!(submitter.metrics().failed(), 1);

	submitter.shutdown().await;
}

#[tokio::test]
async fn malformed_endpoints_fail_at_build_time() {
	let err = Submitter::builder(config())
		.endpoint_str("::not a uri::")
		.build()
		.expect_err("Malformed endpoint must be rejected.");

	assert!(matches!(err, Error::Config(ConfigError::InvalidEndpoint { .. })));

	let err = Submitter::builder(config())
		.endpoint_str("file:///tmp/documents")
		.build()
		.expect_err("Non-HTTP endpoint must be rejected.");

	assert!(matches!(err, Error::Config(ConfigError::UnsupportedScheme { .. })));
}

#[tokio::test]
async fn default_submitter_targets_the_documents_endpoint() {
	let submitter = Submitter::new(config()).expect("Default submitter should build.");

	assert_eq!(submitter.endpoint().as_str(), document_submitter::submit::DEFAULT_ENDPOINT);
	assert_eq!(submitter.limiter().capacity(), 5);

	submitter.shutdown().await;
}
