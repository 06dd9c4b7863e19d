use leptos::prelude::*;

/// Top-level sections of the workspace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
	/// Upload and list documents.
	Workspace,
	/// Search the corpus.
	Search,
	/// Research map.
	Graph,
}

impl Tab {
	/// Tabs in sidebar order.
	pub const ALL: [Tab; 3] = [Tab::Workspace, Tab::Search, Tab::Graph];

	/// Text shown in the sidebar.
	pub fn label(self) -> &'static str {
		match self {
			Tab::Workspace => "Workspace",
			Tab::Search => "Search",
			Tab::Graph => "Graph",
		}
	}
}

/// Vertical tab list.
#[component]
pub fn Sidebar(
	#[prop(into)] active: Signal<Tab>,
	#[prop(into)] on_select: Callback<Tab>,
) -> impl IntoView {
	view! {
		<nav class="sidebar">
			<ul>
				{Tab::ALL
					.into_iter()
					.map(move |tab| {
						view! {
							<li
								class:active=move || active.get() == tab
								on:click=move |_| on_select.run(tab)
							>
								{tab.label()}
							</li>
						}
					})
					.collect_view()}
			</ul>
		</nav>
	}
}
