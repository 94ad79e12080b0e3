//! Demonstrates throttled submission against a local mock endpoint: five concurrent callers
//! share a two-per-second quota, and every outcome is printed by a closure observer.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use time::macros::date;
// self
use document_submitter::{
	document::{Description, Document, DocumentType, Product},
	http::ReqwestHttpClient,
	limiter::{ThrottleConfig, WindowUnit},
	reqwest::Client,
	submit::{SubmitReport, Submitter},
};

fn document(doc_id: String) -> Document {
	Document {
		description: Some(Description { participant_inn: "7700000000".into() }),
		doc_id,
		doc_status: "DRAFT".into(),
		doc_type: DocumentType::LpIntroduceGoods,
		import_request: false,
		owner_inn: "7700000001".into(),
		participant_inn: "7700000000".into(),
		producer_inn: "7700000002".into(),
		production_date: date!(2023 - 01 - 10),
		production_type: "OWN_PRODUCTION".into(),
		products: vec![Product {
			certificate_document: "CONFORMITY_CERTIFICATE".into(),
			certificate_document_date: date!(2022 - 06 - 01),
			certificate_document_number: "RU-001".into(),
			owner_inn: "7700000001".into(),
			producer_inn: "7700000002".into(),
			production_date: date!(2023 - 01 - 10),
			tnved_code: "6401100000".into(),
			uit_code: Some("010460406000600021N4N57RSCBUZTQ".into()),
			uitu_code: None,
		}],
		reg_date: date!(2023 - 01 - 15),
		reg_number: "REG-42".into(),
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v3/lk/documents/create")
				.header("content-type", "application/json");
			then.status(200).header("content-type", "application/json").body("{\"value\":\"ok\"}");
		})
		.await;
	let http_client = ReqwestHttpClient::from_builder(
		Client::builder().danger_accept_invalid_certs(true).danger_accept_invalid_hostnames(true),
	)?;
	let submitter = Arc::new(
		Submitter::<ReqwestHttpClient>::with_http_client(
			ThrottleConfig::per(WindowUnit::Second, 2)?,
			http_client,
		)
		.endpoint_str(server.url("/api/v3/lk/documents/create"))
		.observer(Arc::new(|report: &SubmitReport| {
			println!("{}: {:?}.", report.doc_id, report.outcome);
		}))
		.build()?,
	);
	let tasks = (0..5)
		.map(|idx| {
			let submitter = submitter.clone();

			tokio::spawn(async move {
				submitter.submit(document(format!("doc-{idx}")), "demo-signature").await;
			})
		})
		.collect::<Vec<_>>();

	for task in tasks {
		task.await?;
	}

	println!(
		"Delivered {} of {} submissions.",
		submitter.metrics().delivered(),
		submitter.metrics().attempts()
	);

	create_mock.assert_calls_async(5).await;
	submitter.shutdown().await;

	Ok(())
}
