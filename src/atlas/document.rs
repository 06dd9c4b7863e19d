//! Uploaded documents and their sections.

use serde::{Deserialize, Serialize};

use crate::error::UploadError;

/// Placeholder used when the backend returns no summary.
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable.";

/// A part of a document, e.g. a detected header and its body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
	/// Unique within the parent document.
	pub id: String,
	/// Section heading. Empty headings are never projected.
	pub title: String,
	/// Body text, shown as the node's hover summary.
	pub content: String,
	/// Semantic vector from the backend, if any.
	#[serde(default)]
	pub embedding: Option<Vec<f32>>,
}

/// A document in the session corpus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
	/// Upload-order index as a string.
	pub id: String,
	/// Display name, taken from the file name.
	pub title: String,
	/// Backend summary or a placeholder.
	pub summary: String,
	/// Size of the uploaded file in bytes.
	#[serde(default)]
	pub byte_size: u64,
	/// Sections in document order.
	#[serde(default)]
	pub sections: Vec<SectionRecord>,
}

/// How an upload ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
	/// The backend answered; the summary may be missing.
	Completed {
		/// `processing_result.summary`, if present.
		summary: Option<String>,
	},
	/// The request failed or the server rejected it.
	Failed {
		/// Human readable reason.
		reason: String,
	},
}

#[derive(Deserialize)]
struct UploadResponse {
	#[serde(default)]
	processing_result: Option<ProcessingResult>,
}

#[derive(Deserialize)]
struct ProcessingResult {
	#[serde(default)]
	summary: Option<String>,
}

impl UploadOutcome {
	/// Interpret a raw HTTP response. Never fails: a bad status becomes
	/// `Failed`, a malformed body becomes a completion without summary.
	pub fn from_response(status: u16, body: &str) -> Self {
		if !(200..300).contains(&status) {
			return UploadError::Status(status).into();
		}
		let summary = match serde_json::from_str::<UploadResponse>(body) {
			Ok(response) => response.processing_result.and_then(|p| p.summary),
			Err(err) => {
				log::warn!("Malformed upload response: {err}");
				None
			}
		};
		UploadOutcome::Completed { summary }
	}

	/// Message to show for this outcome, `None` once an upload went through.
	pub fn failure_reason(&self) -> Option<&str> {
		match self {
			UploadOutcome::Completed { .. } => None,
			UploadOutcome::Failed { reason } => Some(reason.as_str()),
		}
	}
}

impl From<UploadError> for UploadOutcome {
	fn from(err: UploadError) -> Self {
		UploadOutcome::Failed {
			reason: err.to_string(),
		}
	}
}

impl DocumentRecord {
	/// Build the record for the `index`-th upload of the session.
	pub fn from_upload(
		index: usize,
		file_name: impl Into<String>,
		byte_size: u64,
		outcome: UploadOutcome,
	) -> Self {
		let summary = match outcome {
			UploadOutcome::Completed { summary } => summary
				.filter(|s| !s.trim().is_empty())
				.unwrap_or_else(|| SUMMARY_UNAVAILABLE.to_string()),
			UploadOutcome::Failed { reason } => format!("Upload failed: {reason}"),
		};
		Self {
			id: index.to_string(),
			title: file_name.into(),
			summary,
			byte_size,
			sections: Vec::new(),
		}
	}

	/// Size in kilobytes with two decimals, as shown on file cards.
	pub fn size_kb(&self) -> String {
		format!("{:.2} KB", self.byte_size as f64 / 1024.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn completed_upload_keeps_summary() {
		let body = concat!(
			r#"{"success":true,"fileId":"x","#,
			r#""processing_result":{"success":true,"summary":"A study of maps."}}"#,
		);
		let outcome = UploadOutcome::from_response(200, body);
		let doc = DocumentRecord::from_upload(0, "maps.pdf", 2048, outcome);
		assert_eq!(doc.id, "0");
		assert_eq!(doc.title, "maps.pdf");
		assert_eq!(doc.summary, "A study of maps.");
		assert!(doc.sections.is_empty());
	}

	#[test]
	fn missing_summary_falls_back_to_placeholder() {
		let outcome = UploadOutcome::from_response(200, r#"{"success":true}"#);
		let doc = DocumentRecord::from_upload(3, "notes.txt", 10, outcome);
		assert_eq!(doc.summary, SUMMARY_UNAVAILABLE);
		assert_eq!(doc.id, "3");
	}

	#[test]
	fn blank_summary_falls_back_to_placeholder() {
		let outcome =
			UploadOutcome::from_response(200, r#"{"processing_result":{"summary":"  "}}"#);
		assert_eq!(
			DocumentRecord::from_upload(0, "a.txt", 1, outcome).summary,
			SUMMARY_UNAVAILABLE
		);
	}

	#[test]
	fn malformed_body_falls_back_to_placeholder() {
		let outcome = UploadOutcome::from_response(200, "<html>oops</html>");
		assert_eq!(outcome, UploadOutcome::Completed { summary: None });
	}

	#[test]
	fn server_error_records_status_code() {
		let outcome = UploadOutcome::from_response(500, r#"{"error":"Upload failed: boom"}"#);
		let doc = DocumentRecord::from_upload(0, "paper.pdf", 1, outcome);
		assert!(!doc.summary.is_empty());
		assert!(doc.summary.contains("500"));
	}

	#[test]
	fn network_failure_is_recorded() {
		let outcome: UploadOutcome = UploadError::Network("Failed to fetch".into()).into();
		let doc = DocumentRecord::from_upload(1, "paper.pdf", 1, outcome);
		assert_eq!(doc.summary, "Upload failed: network error: Failed to fetch");
	}

	#[test]
	fn only_failures_carry_a_message() {
		let failed: UploadOutcome = UploadError::Status(502).into();
		assert_eq!(failed.failure_reason(), Some("server responded with status 502"));
		let completed = UploadOutcome::from_response(200, "{}");
		assert_eq!(completed.failure_reason(), None);
	}

	#[test]
	fn size_is_reported_in_kilobytes() {
		let outcome = UploadOutcome::Completed { summary: None };
		let doc = DocumentRecord::from_upload(0, "a.txt", 1536, outcome);
		assert_eq!(doc.size_kb(), "1.50 KB");
	}
}
