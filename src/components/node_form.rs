use leptos::prelude::*;

use crate::network::{Catalog, NodeInput};

/// Suggested node types; any free text is accepted.
const NODE_TYPES: [&str; 4] = ["person", "organization", "project", "resource"];

/// Add/edit form for a node. Submitting is disabled until every field has
/// a value.
#[component]
pub fn NodeForm(
	#[prop(into)] title: String,
	#[prop(into)] submit_label: String,
	#[prop(optional)] initial: Option<NodeInput>,
	#[prop(into)] on_submit: Callback<NodeInput>,
	#[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
	let catalog = Catalog::standard();
	let (name, set_name) = signal(initial.as_ref().map(|i| i.name.clone()).unwrap_or_default());
	let (node_type, set_node_type) =
		signal(initial.as_ref().map(|i| i.node_type.clone()).unwrap_or_default());
	let (community, set_community) = signal(initial.as_ref().map(|i| i.community.to_string()).unwrap_or_default());

	let complete = move || {
		!name.get().trim().is_empty() && !node_type.get().trim().is_empty() && !community.get().is_empty()
	};

	let submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let Ok(community) = community.get().parse::<usize>() else {
			return;
		};
		on_submit.run(NodeInput {
			name: name.get(),
			node_type: node_type.get(),
			community,
		});
	};

	let type_options = NODE_TYPES
		.into_iter()
		.map(|t| view! { <option value=t></option> })
		.collect_view();
	let community_options = catalog
		.iter()
		.enumerate()
		.map(|(index, c)| view! { <option value=index.to_string()>{c.name.clone()}</option> })
		.collect_view();

	view! {
		<div class="dialog-backdrop">
			<form class="dialog" on:submit=submit>
				<h3>{title}</h3>
				<label for="node-name">"Name"</label>
				<input
					id="node-name"
					placeholder="Enter node name"
					prop:value=move || name.get()
					on:input=move |ev| set_name.set(event_target_value(&ev))
				/>
				<label for="node-type">"Type"</label>
				<input
					id="node-type"
					list="node-types"
					placeholder="person, organization, project..."
					prop:value=move || node_type.get()
					on:input=move |ev| set_node_type.set(event_target_value(&ev))
				/>
				<datalist id="node-types">{type_options}</datalist>
				<label for="node-community">"Community"</label>
				<select
					id="node-community"
					prop:value=move || community.get()
					on:change=move |ev| set_community.set(event_target_value(&ev))
				>
					<option value="" disabled=true>"Select community"</option>
					{community_options}
				</select>
				<footer class="dialog-actions">
					<button type="button" on:click=move |_| on_cancel.run(())>"Cancel"</button>
					<button type="submit" class="primary" disabled=move || !complete()>{submit_label}</button>
				</footer>
			</form>
		</div>
	}
}
