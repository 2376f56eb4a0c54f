use leptos::prelude::*;

use crate::network::{Catalog, Node};

#[component]
fn DetailItem(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
	view! {
		<div class="detail-item">
			<span class="muted">{label}</span>
			<span class="value">{value}</span>
		</div>
	}
}

/// Details of the selected node, its neighbours, and edit/delete actions.
#[component]
pub fn NodeDetailPanel(
	node: Node,
	/// `(id, label)` of linked nodes.
	neighbors: Vec<(String, String)>,
	#[prop(into)] on_close: Callback<()>,
	#[prop(into)] on_edit: Callback<()>,
	#[prop(into)] on_delete: Callback<()>,
	#[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
	let community = Catalog::standard()
		.get(node.community)
		.map(|c| c.name.clone())
		.unwrap_or_else(|_| format!("Community {}", node.community));

	let node_type = node.node_type.clone().unwrap_or_else(|| "Default".to_string());

	let neighbor_list = if neighbors.is_empty() {
		view! { <p class="muted">"No connections"</p> }.into_any()
	} else {
		neighbors
			.into_iter()
			.map(|(id, label)| {
				view! {
					<li>
						<button class="link" on:click=move |_| on_select.run(id.clone())>{label}</button>
					</li>
				}
			})
			.collect_view()
			.into_any()
	};

	view! {
		<section class="panel node-detail">
			<header class="panel-header">
				<h3>"Node Details"</h3>
				<button class="close" on:click=move |_| on_close.run(())>"×"</button>
			</header>
			<div class="node-heading">
				<span class="swatch large" style:background-color=node.style.background.clone()></span>
				<div>
					<h4>{node.label.clone()}</h4>
					<span class="muted">"ID: " {node.id.clone()}</span>
				</div>
			</div>
			<DetailItem label="Community" value=community />
			<DetailItem label="Type" value=node_type />
			{node.influence.map(|i| view! { <DetailItem label="Influence" value=format!("{i:.2}") /> })}
			{node.is_central.map(|c| view! { <DetailItem label="Central Node" value={if c { "Yes" } else { "No" }} /> })}
			<DetailItem
				label="Position"
				value=format!("X: {}, Y: {}", node.position.x.round(), node.position.y.round())
			/>
			<div class="panel-actions">
				<button on:click=move |_| on_edit.run(())>"Edit Node"</button>
				<button class="danger" on:click=move |_| on_delete.run(())>"Delete Node"</button>
			</div>
			<h4>"Connected Nodes"</h4>
			<ul class="neighbors">{neighbor_list}</ul>
		</section>
	}
}
