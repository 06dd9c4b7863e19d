//! App configuration, provided to the component tree through context.

use std::time::Duration;

use crate::atlas::LayoutStrategy;
use crate::error::UploadError;

/// Settings shared by the upload widget and the research map.
#[derive(Clone, Debug, PartialEq)]
pub struct AtlasConfig {
	/// Multipart POST endpoint of the summarizing backend.
	pub upload_endpoint: String,
	/// Accepted file extensions, lowercase, with leading dot.
	pub allowed_extensions: Vec<String>,
	/// Largest accepted file in bytes.
	pub max_upload_bytes: u64,
	/// Simulated progress increment, in percent.
	pub progress_step: u8,
	/// Simulated progress stops here until the response arrives.
	pub progress_ceiling: u8,
	/// Delay between simulated progress increments.
	pub progress_interval: Duration,
	/// Layout applied after every projection.
	pub layout: LayoutStrategy,
}

impl Default for AtlasConfig {
	fn default() -> Self {
		Self {
			upload_endpoint: "http://localhost:5000/api/upload".into(),
			allowed_extensions: [".pdf", ".txt", ".doc", ".docx"]
				.into_iter()
				.map(String::from)
				.collect(),
			max_upload_bytes: 10 * 1024 * 1024,
			progress_step: 10,
			progress_ceiling: 90,
			progress_interval: Duration::from_millis(200),
			layout: LayoutStrategy::Indexed,
		}
	}
}

impl AtlasConfig {
	/// Check a picked file before uploading it.
	pub fn validate_file(&self, file_name: &str, size: u64) -> Result<(), UploadError> {
		let extension = file_name
			.rfind('.')
			.map(|i| file_name[i..].to_lowercase())
			.unwrap_or_default();
		if !self.allowed_extensions.contains(&extension) {
			return Err(UploadError::UnsupportedType(extension));
		}
		if size > self.max_upload_bytes {
			return Err(UploadError::TooLarge {
				size,
				limit: self.max_upload_bytes,
			});
		}
		Ok(())
	}

	/// Next simulated progress value.
	pub fn advance_progress(&self, current: u8) -> u8 {
		if current >= self.progress_ceiling {
			return current;
		}
		current
			.saturating_add(self.progress_step)
			.min(self.progress_ceiling)
	}
}
