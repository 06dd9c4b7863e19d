use leptos::prelude::*;

/// Text search box. Emits the query on every keystroke and `""` on clear.
#[component]
pub fn SearchBar(
	#[prop(into)] on_search: Callback<String>,
	#[prop(into, default = "Search...".into())] placeholder: String,
) -> impl IntoView {
	let (query, set_query) = signal(String::new());

	view! {
		<div class="search-bar-container">
			<div class="search-bar">
				<span class="search-icon">"⌕"</span>
				<input
					type="text"
					class="search-input"
					placeholder=placeholder
					prop:value=move || query.get()
					on:input=move |ev| {
						let value = event_target_value(&ev);
						set_query.set(value.clone());
						on_search.run(value);
					}
				/>
				<Show when=move || !query.get().is_empty()>
					<button
						class="clear-button"
						type="button"
						aria-label="Clear search"
						on:click=move |_| {
							set_query.set(String::new());
							on_search.run(String::new());
						}
					>
						"×"
					</button>
				</Show>
			</div>
		</div>
	}
}
