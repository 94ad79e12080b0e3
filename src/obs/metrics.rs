// self
use crate::obs::SubmitStage;

/// Records a submission stage via the global metrics recorder (when enabled).
pub fn record_submit_stage(stage: SubmitStage) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("document_submitter_submit_total", "outcome" => stage.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = stage;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_submit_stage_noop_without_metrics() {
		record_submit_stage(SubmitStage::Failed);
	}
}
