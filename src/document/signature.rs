//! Detached document signature that stays out of logs.

// self
use crate::_prelude::*;

/// Detached signature for a document; redacted from `Debug` and `Display`.
///
/// Serializes as the raw string because the endpoint needs it verbatim.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);
impl Signature {
	/// Wraps a signature string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner signature. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Signature {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<String> for Signature {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for Signature {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Signature").field(&"<redacted>").finish()
	}
}
impl Display for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn signature_formatters_redact() {
		let signature = Signature::new("MIIGdQYJKoZIhvcNAQcCoIIGZjCCBmICAQExDjAMBggqhQMHAQECAgUA");

		assert_eq!(format!("{signature:?}"), "Signature(\"<redacted>\")");
		assert_eq!(format!("{signature}"), "<redacted>");
	}

	#[test]
	fn signature_serializes_verbatim() {
		let payload =
			serde_json::to_string(&Signature::from("c2lnbmVk")).expect("Signature serializes.");

		assert_eq!(payload, "\"c2lnbmVk\"");
	}
}
