//! Goods-introduction document records as the endpoint expects them on the wire.
//!
//! Field names serialize in snake_case, with two exceptions inherited from the endpoint's
//! schema: [`Document::import_request`] travels as `importRequest`, and [`Description`] keeps
//! camelCase (`participantInn`). Dates travel as `YYYY-MM-DD`.

// self
use crate::_prelude::*;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// Document kinds accepted by the endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
	/// Introduction of locally produced goods into circulation.
	#[default]
	LpIntroduceGoods,
}

/// Free-form description block attached to a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
	/// Taxpayer number of the participant filing the document.
	pub participant_inn: String,
}

/// Business payload submitted to the endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Document {
	/// Optional description block.
	pub description: Option<Description>,
	/// Document identifier.
	pub doc_id: String,
	/// Document status label.
	pub doc_status: String,
	/// Document kind.
	pub doc_type: DocumentType,
	/// Whether the goods are imported.
	#[serde(rename = "importRequest")]
	pub import_request: bool,
	/// Taxpayer number of the owner.
	pub owner_inn: String,
	/// Taxpayer number of the participant.
	pub participant_inn: String,
	/// Taxpayer number of the producer.
	pub producer_inn: String,
	/// Production date.
	#[serde(with = "calendar_date")]
	pub production_date: Date,
	/// Production type label.
	pub production_type: String,
	/// Products covered by the document.
	pub products: Vec<Product>,
	/// Registration date.
	#[serde(with = "calendar_date")]
	pub reg_date: Date,
	/// Registration number.
	pub reg_number: String,
}

/// One product line inside a [`Document`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Product {
	/// Kind of conformity document.
	pub certificate_document: String,
	/// Issue date of the conformity document.
	#[serde(with = "calendar_date")]
	pub certificate_document_date: Date,
	/// Number of the conformity document.
	pub certificate_document_number: String,
	/// Taxpayer number of the owner.
	pub owner_inn: String,
	/// Taxpayer number of the producer.
	pub producer_inn: String,
	/// Production date.
	#[serde(with = "calendar_date")]
	pub production_date: Date,
	/// Commodity nomenclature code.
	pub tnved_code: String,
	/// Unit identification code, when the item is marked individually.
	pub uit_code: Option<String>,
	/// Package identification code, when the item is marked per package.
	pub uitu_code: Option<String>,
}
