#![cfg(all(feature = "reqwest", feature = "tracing"))]

// std
use std::io;
// crates.io
use tracing::{
	Event, Level, Subscriber,
	field::{Field, Visit},
};
use tracing_subscriber::{
	layer::{Context, Layer, SubscriberExt},
	registry,
};
// self
use document_submitter::{
	_preludet::*,
	error::{FailureKind, TransportError},
	http::{SubmitHttpClient, TransportFuture},
	limiter::{ThrottleConfig, WindowUnit},
	submit::{SubmitOutcome, Submitter},
};

#[derive(Clone, Debug)]
struct CapturedEvent {
	level: Level,
	message: String,
	doc_id: Option<String>,
	kind: Option<String>,
}

#[derive(Clone, Default)]
struct CaptureLayer {
	events: Arc<Mutex<Vec<CapturedEvent>>>,
}
impl CaptureLayer {
	fn events(&self) -> Vec<CapturedEvent> {
		self.events.lock().clone()
	}
}
impl<S> Layer<S> for CaptureLayer
where
	S: Subscriber,
{
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		let metadata = event.metadata();

		if *metadata.level() > Level::INFO || !metadata.target().starts_with("document_submitter") {
			return;
		}

		let mut visitor = CaptureVisitor::default();

		event.record(&mut visitor);
		self.events.lock().push(CapturedEvent {
			level: *metadata.level(),
			message: visitor.message,
			doc_id: visitor.doc_id,
			kind: visitor.kind,
		});
	}
}

#[derive(Default)]
struct CaptureVisitor {
	message: String,
	doc_id: Option<String>,
	kind: Option<String>,
}
impl Visit for CaptureVisitor {
	fn record_str(&mut self, field: &Field, value: &str) {
		match field.name() {
			"doc_id" => self.doc_id = Some(value.to_owned()),
			"kind" => self.kind = Some(value.to_owned()),
			_ => {},
		}
	}

	fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
		if field.name() == "message" {
			self.message = format!("{value:?}");
		}
	}
}

struct FailingHttpClient;
impl SubmitHttpClient for FailingHttpClient {
	fn post_json<'a>(&'a self, _endpoint: &'a Url, _body: Vec<u8>) -> TransportFuture<'a> {
		Box::pin(async { Err(TransportError::Io(io::Error::other("connection reset"))) })
	}
}

#[tokio::test]
async fn failed_delivery_emits_exactly_one_diagnostic() {
	let layer = CaptureLayer::default();
	let _guard = tracing::subscriber::set_default(registry().with(layer.clone()));
	let observer = Arc::new(RecordingObserver::default());
	let config = ThrottleConfig::per(WindowUnit::Second, 2).expect("Quota should be valid.");
	let submitter = Submitter::<FailingHttpClient>::with_http_client(config, FailingHttpClient)
		.endpoint_str("https://documents.example.com/api/v3/lk/documents/create")
		.observer(observer.clone())
		.build()
		.expect("Submitter should build inside a runtime.");

	submitter.submit(sample_document("doc-failing"), "signature").await;

	let events = layer.events();

	assert_eq!(events.len(), 1, "Unexpected diagnostics: {events:?}.");
	assert_eq!(events[0].level, Level::INFO);
	assert_eq!(events[0].doc_id.as_deref(), Some("doc-failing"));
	assert_eq!(events[0].kind.as_deref(), Some("transport"));
	assert!(events[0].message.contains("connection reset"), "Message: {}.", events[0].message);
	assert_eq!(submitter.metrics().attempts(), 1);
	assert_eq!(submitter.metrics().failed(), 1);
	assert_eq!(submitter.metrics().delivered(), 0);

	let reports = observer.reports();

	assert_eq!(reports.len(), 1);
	assert_eq!(reports[0].doc_id, "doc-failing");
	assert!(matches!(
		reports[0].outcome,
		SubmitOutcome::Failed { kind: FailureKind::Transport, .. }
	));

	submitter.shutdown().await;
}

#[tokio::test]
async fn successful_delivery_stays_quiet_at_info() {
	struct AcceptingHttpClient;
	impl SubmitHttpClient for AcceptingHttpClient {
		fn post_json<'a>(&'a self, _endpoint: &'a Url, _body: Vec<u8>) -> TransportFuture<'a> {
			Box::pin(async {
				Ok(document_submitter::http::ResponseMetadata::with_status(200))
			})
		}
	}

	let layer = CaptureLayer::default();
	let _guard = tracing::subscriber::set_default(registry().with(layer.clone()));
	let config = ThrottleConfig::per(WindowUnit::Second, 2).expect("Quota should be valid.");
	let submitter =
		Submitter::<AcceptingHttpClient>::with_http_client(config, AcceptingHttpClient)
			.build()
			.expect("Submitter should build inside a runtime.");

	submitter.submit(sample_document("doc-ok"), "signature").await;

	assert!(layer.events().is_empty());
	assert_eq!(submitter.metrics().delivered(), 1);

	submitter.shutdown().await;
}
