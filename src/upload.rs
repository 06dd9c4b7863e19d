//! Multipart upload to the summarizing backend.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

use crate::atlas::UploadOutcome;
use crate::error::UploadError;

/// POST `file` as form field `file` to `endpoint`. Never fails: every
/// problem is folded into [`UploadOutcome::Failed`].
pub async fn upload_file(endpoint: &str, file: &File) -> UploadOutcome {
	match send(endpoint, file).await {
		Ok((status, body)) => {
			log::debug!("Upload of {} answered with {status}", file.name());
			UploadOutcome::from_response(status, &body)
		}
		Err(err) => {
			log::warn!("Upload of {} failed: {err}", file.name());
			err.into()
		}
	}
}

async fn send(endpoint: &str, file: &File) -> Result<(u16, String), UploadError> {
	let form = FormData::new().map_err(browser)?;
	form.append_with_blob_and_filename("file", file, &file.name())
		.map_err(browser)?;

	let init = RequestInit::new();
	init.set_method("POST");
	init.set_body(&JsValue::from(form));
	let request = Request::new_with_str_and_init(endpoint, &init).map_err(browser)?;

	let window = web_sys::window().ok_or_else(|| UploadError::Browser("no window".into()))?;
	let response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(network)?;
	let response: Response = response.dyn_into().map_err(browser)?;

	let status = response.status();
	let body = JsFuture::from(response.text().map_err(browser)?)
		.await
		.map_err(network)?;
	Ok((status, body.as_string().unwrap_or_default()))
}

fn browser(err: JsValue) -> UploadError {
	UploadError::Browser(format!("{err:?}"))
}

fn network(err: JsValue) -> UploadError {
	log::debug!("fetch rejected: {err:?}");
	UploadError::Network("could not reach the upload server".into())
}
