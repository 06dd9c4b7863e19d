use leptos::prelude::*;

use crate::atlas::DocumentRecord;

/// Card for one uploaded document: name, size and summary.
#[component]
pub fn UploadedFile(document: DocumentRecord) -> impl IntoView {
	view! {
		<div class="file-square">
			<div class="file-icon">"📄"</div>
			<h3 class="file-name">{document.title.clone()}</h3>
			<p class="file-size">{document.size_kb()}</p>
			<p class="summary">{document.summary.clone()}</p>
		</div>
	}
}
