use leptos::prelude::*;

use crate::network::CommunityStats;

/// Totals and per-community statistics.
#[component]
pub fn NetworkDataSidebar(
	#[prop(into)] stats: Signal<Vec<CommunityStats>>,
	#[prop(into)] node_count: Signal<usize>,
	#[prop(into)] edge_count: Signal<usize>,
) -> impl IntoView {
	view! {
		<aside class="panel data-sidebar">
			<h3>"Network Data"</h3>
			<div class="card">
				<div class="detail-item">
					<span>"Total Nodes"</span>
					<span class="value">{move || node_count.get()}</span>
				</div>
				<div class="detail-item">
					<span>"Total Edges"</span>
					<span class="value">{move || edge_count.get()}</span>
				</div>
				<div class="detail-item">
					<span>"Communities"</span>
					<span class="value">{move || stats.with(Vec::len)}</span>
				</div>
			</div>
			<h4 class="muted">"Communities"</h4>
			{move || {
				stats
					.get()
					.into_iter()
					.map(|stat| {
						view! {
							<div class="card">
								<div class="community-title">
									<span class="swatch" style:background-color=stat.color></span>
									<span class="value">{stat.name}</span>
								</div>
								<div class="detail-item">
									<span>"Nodes"</span>
									<span>{stat.node_count}</span>
								</div>
								<div class="detail-item">
									<span>"Edges"</span>
									<span>{stat.edge_count}</span>
								</div>
								<div class="detail-item">
									<span>"Central Node"</span>
									<span>{stat.central_node.unwrap_or_default()}</span>
								</div>
							</div>
						}
					})
					.collect_view()
			}}
		</aside>
	}
}
