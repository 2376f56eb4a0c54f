use leptos::prelude::*;

use crate::network::{Catalog, ViewSelection};

/// Community checkboxes plus the free-text search box.
#[component]
pub fn NetworkFilter(selection: RwSignal<ViewSelection>) -> impl IntoView {
	let catalog = Catalog::standard();
	let hidden_count = move || {
		selection.with(|s| (!s.covers(catalog)).then(|| s.communities.len()))
	};

	let rows = catalog
		.iter()
		.enumerate()
		.map(|(index, community)| {
			let checkbox_id = format!("community-{index}");
			view! {
				<div class="filter-row">
					<input
						type="checkbox"
						id=checkbox_id.clone()
						prop:checked=move || selection.with(|s| s.communities.contains(&index))
						on:change=move |_| selection.update(|s| s.toggle(index))
					/>
					<span class="swatch" style:background-color=community.color.clone()></span>
					<label for=checkbox_id>{community.name.clone()}</label>
				</div>
			}
		})
		.collect_view();

	view! {
		<section class="panel network-filter">
			<header class="panel-header">
				<h3>
					"Filter by Community"
					{move || hidden_count().map(|n| view! { <span class="badge">{n}</span> })}
				</h3>
				<div class="panel-actions">
					<button on:click=move |_| selection.update(|s| s.communities = (0..catalog.len()).collect())>
						"Select All"
					</button>
					<button on:click=move |_| selection.update(|s| s.communities.clear())>"Clear"</button>
				</div>
			</header>
			<input
				type="search"
				class="search"
				placeholder="Search nodes by name or type"
				prop:value=move || selection.with(|s| s.query.clone())
				on:input=move |ev| {
					let query = event_target_value(&ev);
					selection.update(|s| s.query = query);
				}
			/>
			<div class="filter-list">{rows}</div>
		</section>
	}
}
