use leptos::prelude::*;
use web_sys::{File, HtmlInputElement};

/// Save/load/export/import buttons. The work itself happens in the page.
#[component]
pub fn PersistenceControls(
	#[prop(into)] on_save: Callback<()>,
	#[prop(into)] on_load: Callback<()>,
	#[prop(into)] on_export: Callback<()>,
	#[prop(into)] on_import: Callback<File>,
	#[prop(into)] on_regenerate: Callback<()>,
) -> impl IntoView {
	let file_input = NodeRef::<leptos::html::Input>::new();

	let on_file = move |ev: leptos::ev::Event| {
		let input: HtmlInputElement = event_target(&ev);
		if let Some(file) = input.files().and_then(|files| files.get(0)) {
			on_import.run(file);
		}
		// Allow picking the same file again.
		input.set_value("");
	};

	view! {
		<section class="panel persistence-controls">
			<h3>"Network Data"</h3>
			<div class="button-grid">
				<button on:click=move |_| on_save.run(())>"Save"</button>
				<button on:click=move |_| on_load.run(())>"Load"</button>
				<button on:click=move |_| on_export.run(())>"Export"</button>
				<button on:click=move |_| {
					if let Some(input) = file_input.get() {
						input.click();
					}
				}>"Import"</button>
			</div>
			<button class="subtle" on:click=move |_| on_regenerate.run(())>"Regenerate Network"</button>
			<input
				node_ref=file_input
				type="file"
				accept=".json,application/json"
				style="display: none;"
				on:change=on_file
			/>
		</section>
	}
}
