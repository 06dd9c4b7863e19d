use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use web_sys::HtmlInputElement;

use crate::atlas::UploadOutcome;
use crate::config::AtlasConfig;
use crate::upload::upload_file;

/// A finished upload: file name, size in bytes and what the backend said.
pub type FinishedUpload = (String, u64, UploadOutcome);

/// File picker that validates, uploads and reports each picked file.
///
/// `on_uploaded` fires for every upload that was sent, failed or not, and
/// carries transport failures in its outcome; `on_error` gets files
/// rejected before sending.
#[component]
pub fn FileUpload(
	#[prop(into)] on_uploaded: Callback<FinishedUpload>,
	#[prop(into)] on_error: Callback<String>,
) -> impl IntoView {
	let config = expect_context::<AtlasConfig>();
	let accept = config.allowed_extensions.join(",");
	let input_ref = NodeRef::<leptos::html::Input>::new();
	let (uploading, set_uploading) = signal(false);
	let (progress, set_progress) = signal(0u8);
	let (selected, set_selected) = signal(None::<String>);

	let on_change = move |ev: web_sys::Event| {
		let input = event_target::<HtmlInputElement>(&ev);
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			set_selected.set(None);
			return;
		};
		input.set_value("");

		let (name, size) = (file.name(), file.size() as u64);
		if let Err(err) = config.validate_file(&name, size) {
			log::warn!("Rejected {name}: {err}");
			on_error.run(err.to_string());
			return;
		}

		set_selected.set(Some(name.clone()));
		set_uploading.set(true);
		set_progress.set(0);

		let ticker_config = config.clone();
		let ticker = set_interval_with_handle(
			move || set_progress.update(|p| *p = ticker_config.advance_progress(*p)),
			config.progress_interval,
		)
		.map_err(|err| log::warn!("Progress timer unavailable: {err:?}"))
		.ok();

		let endpoint = config.upload_endpoint.clone();
		spawn_local(async move {
			let outcome = upload_file(&endpoint, &file).await;
			if let Some(handle) = ticker {
				handle.clear();
			}
			set_progress.set(100);
			on_uploaded.run((name, size, outcome));
			set_timeout(
				move || {
					set_selected.set(None);
					set_progress.set(0);
					set_uploading.set(false);
				},
				Duration::from_millis(1000),
			);
		});
	};

	let on_click = move |_| {
		if uploading.get_untracked() {
			return;
		}
		if let Some(input) = input_ref.get() {
			input.click();
		}
	};

	view! {
		<div class="file-upload-container">
			<button
				class="file-upload-button"
				type="button"
				disabled=move || uploading.get()
				on:click=on_click
			>
				{move || {
					if uploading.get() {
						view! {
							<div class="upload-progress">
								<div class="progress-bar">
									<div
										class="progress-fill"
										style:width=move || format!("{}%", progress.get())
									></div>
								</div>
								<span>{move || format!("{}%", progress.get())}</span>
							</div>
						}
							.into_any()
					} else if let Some(name) = selected.get() {
						format!("Selected: {name}").into_any()
					} else {
						"Select File".into_any()
					}
				}}
			</button>
			<input
				type="file"
				node_ref=input_ref
				style="display: none;"
				accept=accept
				disabled=move || uploading.get()
				on:change=on_change
			/>
			<Show when=move || uploading.get()>
				<div class="upload-status">
					<p>"Uploading..."</p>
				</div>
			</Show>
		</div>
	}
}
