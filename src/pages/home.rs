use leptos::prelude::*;

use crate::atlas::{AtlasEvent, AtlasSession};
use crate::components::file_upload::{FileUpload, FinishedUpload};
use crate::components::research_map::ResearchMap;
use crate::components::search_bar::SearchBar;
use crate::components::sidebar::{Sidebar, Tab};
use crate::components::uploaded_file::UploadedFile;
use crate::config::AtlasConfig;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = expect_context::<AtlasConfig>();
	let session = RwSignal::new(AtlasSession::with_layout(config.layout.clone()));
	let (tab, set_tab) = signal(Tab::Workspace);
	let (upload_error, set_upload_error) = signal(None::<String>);

	let frame = Signal::derive(move || session.with(|s| s.frame()));
	let documents = move || session.with(|s| s.documents().to_vec());
	let selected_count = move || session.with(|s| s.selection().len());

	let on_uploaded = Callback::new(move |(name, size, outcome): FinishedUpload| {
		// A finished upload replaces whatever error was showing.
		set_upload_error.set(outcome.failure_reason().map(String::from));
		session.update(|s| {
			s.add_document(name, size, outcome);
		});
	});
	let on_error = Callback::new(move |message: String| set_upload_error.set(Some(message)));
	let on_search = Callback::new(move |query: String| session.update(|s| s.search(&query)));
	let on_event = Callback::new(move |event: AtlasEvent| {
		session.update(|s| {
			if let Err(err) = s.handle(event) {
				log::warn!("Rejected map edit: {err}");
			}
		})
	});

	let panel = move |which: Tab| {
		move || {
			if tab.get() == which {
				"display: block;"
			} else {
				"display: none;"
			}
		}
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="home-layout">
				<Sidebar active=tab on_select=move |t: Tab| set_tab.set(t) />
				<main class="main-content">
					<h1 class="atlas-title">"Research Atlas"</h1>

					<section class="workspace-content" style=panel(Tab::Workspace)>
						<FileUpload on_uploaded=on_uploaded on_error=on_error />
						{move || {
							upload_error.get().map(|e| view! { <p class="upload-error">{e}</p> })
						}}
						<div class="file-squares-column">
							<For
								each=documents
								key=|doc| (doc.id.clone(), doc.summary.clone())
								children=|doc| view! { <UploadedFile document=doc /> }
							/>
						</div>
					</section>

					<section class="search-content" style=panel(Tab::Search)>
						<SearchBar on_search=on_search placeholder="Search documents..." />
					</section>

					<section class="graph-content" style=panel(Tab::Graph)>
						<div class="research-map-controls">
							<span>{move || format!("{} selected", selected_count())}</span>
							<button
								type="button"
								disabled=move || selected_count() == 0
								on:click=move |_| session.update(|s| s.clear_selection())
							>
								"Clear selection"
							</button>
						</div>
						<div class="research-map-flow">
							<ResearchMap
								frame=frame
								on_event=on_event
								width=Some(960.0)
								height=Some(640.0)
							/>
						</div>
					</section>
				</main>
			</div>
		</ErrorBoundary>
	}
}
