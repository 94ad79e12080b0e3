//! Request body combining a document with its detached signature.

// self
use crate::{
	_prelude::*,
	document::{Document, Signature},
};

/// One request body: `{ "document": { .. }, "signature": ".." }`.
///
/// Built per call and discarded once the request settles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEnvelope {
	/// Business payload.
	pub document: Document,
	/// Detached signature over the payload.
	pub signature: Signature,
}
impl DocumentEnvelope {
	/// Pairs a document with its signature.
	pub fn new(document: Document, signature: impl Into<Signature>) -> Self {
		Self { document, signature: signature.into() }
	}

	/// Serializes the envelope into a fresh JSON buffer.
	pub fn to_json_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
		serde_json::to_vec(self)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::Value;
	use time::macros::date;
	// self
	use super::*;
	use crate::document::DocumentType;

	#[test]
	fn envelope_has_exactly_two_top_level_fields() {
		let document = Document {
			description: None,
			doc_id: "doc-7".into(),
			doc_status: "NEW".into(),
			doc_type: DocumentType::LpIntroduceGoods,
			import_request: false,
			owner_inn: "1".into(),
			participant_inn: "2".into(),
			producer_inn: "3".into(),
			production_date: date!(2024 - 02 - 29),
			production_type: "OWN_PRODUCTION".into(),
			products: Vec::new(),
			reg_date: date!(2024 - 03 - 01),
			reg_number: "R-7".into(),
		};
		let body = DocumentEnvelope::new(document, "sig")
			.to_json_vec()
			.expect("Envelope should serialize.");
		let value: Value = serde_json::from_slice(&body).expect("Body should be valid JSON.");
		let object = value.as_object().expect("Envelope should be a JSON object.");

		assert_eq!(object.len(), 2);
		assert_eq!(object["signature"], "sig");
		assert_eq!(object["document"]["doc_id"], "doc-7");
		assert_eq!(object["document"]["description"], Value::Null);
		assert_eq!(object["document"]["production_date"], "2024-02-29");
	}
}
