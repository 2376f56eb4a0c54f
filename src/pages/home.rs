use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use web_sys::File;

use crate::components::edge_form::{EdgeForm, LinkRequest};
use crate::components::filter::NetworkFilter;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::layout_controls::LayoutControls;
use crate::components::node_detail::NodeDetailPanel;
use crate::components::node_form::NodeForm;
use crate::components::persistence_controls::PersistenceControls;
use crate::components::sidebar::NetworkDataSidebar;
use crate::network::random;
use crate::network::{
	Catalog, Graph, LayoutKind, LayoutOptions, NetworkConfig, NodeInput, Position, ViewSelection,
	project,
};
use crate::storage;

/// Which modal form is open.
#[derive(Clone, Debug, PartialEq)]
enum Dialog {
	AddNode,
	EditNode(String),
	CreateLink,
}

#[derive(Clone, Debug, PartialEq)]
enum Notice {
	Info(String),
	Error(String),
}

/// Saved network if there is one, otherwise a freshly generated one.
fn initial_graph(config: &NetworkConfig, catalog: &Catalog) -> Graph {
	match storage::load(config, catalog) {
		Ok(Some(graph)) => graph,
		Ok(None) => Graph::generate(catalog, &config.generator, &mut random::system()),
		Err(err) => {
			warn!("discarding saved network: {err}");
			Graph::generate(catalog, &config.generator, &mut random::system())
		}
	}
}

/// Network explorer page.
#[component]
pub fn Home() -> impl IntoView {
	let catalog = Catalog::standard();
	let config = StoredValue::new(storage::load_config());
	let graph = RwSignal::new(config.with_value(|c| initial_graph(c, catalog)));
	let selection = RwSignal::new(ViewSelection::all(catalog));
	let selected = RwSignal::new(None::<String>);
	let physics = RwSignal::new(false);
	let dialog = RwSignal::new(None::<Dialog>);
	let notice = RwSignal::new(None::<Notice>);

	let visible = Memo::new(move |_| {
		graph.with(|g| selection.with(|s| project(g.nodes(), g.edges(), s, catalog)))
	});
	let stats = Memo::new(move |_| graph.with(|g| g.community_stats(catalog)));
	let node_count = Signal::derive(move || graph.with(|g| g.nodes().len()));
	let edge_count = Signal::derive(move || graph.with(|g| g.edges().len()));
	let node_choices = Signal::derive(move || {
		graph.with(|g| {
			g.nodes()
				.iter()
				.map(|n| (n.id.clone(), n.label.clone()))
				.collect::<Vec<_>>()
		})
	});

	let report = move |result: Result<String, String>| {
		notice.set(Some(match result {
			Ok(msg) => Notice::Info(msg),
			Err(msg) => Notice::Error(msg),
		}));
	};

	let on_select = Callback::new(move |id: Option<String>| selected.set(id));

	let on_node_moved = Callback::new(move |(id, position): (String, Position)| {
		graph.update(|g| {
			if let Err(err) = g.move_node(&id, position) {
				warn!("drag ignored: {err}");
			}
		});
	});

	let on_settled = Callback::new(move |positions: Vec<(String, Position)>| {
		graph.update(|g| {
			for (id, position) in &positions {
				if let Err(err) = g.move_node(id, *position) {
					warn!("relaxed position ignored: {err}");
				}
			}
		});
		info!("committed {} relaxed positions", positions.len());
	});

	let on_apply_layout = Callback::new(move |(kind, spacing): (LayoutKind, f64)| {
		let options = LayoutOptions {
			spacing,
			..config.with_value(|c| c.layout.clone())
		};
		graph.update(|g| g.apply_layout(kind, &options, catalog, &mut random::system()));
		config.update_value(|c| c.layout.spacing = spacing);
		if let Err(err) = config.with_value(storage::save_config) {
			warn!("could not persist settings: {err}");
		}
	});

	let on_add_node = Callback::new(move |input: NodeInput| {
		let result = graph.try_update(|g| {
			g.add_node(input, catalog, &mut random::system())
				.map(|n| (n.id.clone(), n.label.clone()))
		});
		match result {
			Some(Ok((id, label))) => {
				dialog.set(None);
				selected.set(Some(id));
				report(Ok(format!("Added {label}")));
			}
			Some(Err(err)) => report(Err(err.to_string())),
			None => {}
		}
	});

	let on_edit_node = Callback::new(move |input: NodeInput| {
		let Some(Dialog::EditNode(id)) = dialog.get_untracked() else {
			return;
		};
		let result = graph.try_update(|g| g.update_node(&id, input, catalog).map(|n| n.label.clone()));
		match result {
			Some(Ok(label)) => {
				dialog.set(None);
				report(Ok(format!("Updated {label}")));
			}
			Some(Err(err)) => report(Err(err.to_string())),
			None => {}
		}
	});

	let on_delete_node = Callback::new(move |()| {
		let Some(id) = selected.get_untracked() else {
			return;
		};
		if graph.try_update(|g| g.delete_node(&id)).unwrap_or(false) {
			selected.set(None);
			report(Ok(format!("Deleted node {id}")));
		}
	});

	let on_create_link = Callback::new(move |request: LinkRequest| {
		let result = graph.try_update(|g| {
			g.create_edge(&request.source, &request.target, request.kind, request.label)
				.map(|e| e.id.clone())
		});
		match result {
			Some(Ok(id)) => {
				dialog.set(None);
				report(Ok(format!("Created link {id}")));
			}
			Some(Err(err)) => report(Err(err.to_string())),
			None => {}
		}
	});

	let on_save = Callback::new(move |()| {
		let result = graph.with(|g| config.with_value(|c| storage::save(g, c)));
		report(result.map(|()| "Network saved".to_string()).map_err(|e| e.to_string()));
	});

	let on_load = Callback::new(move |()| {
		match config.with_value(|c| storage::load(c, catalog)) {
			Ok(Some(loaded)) => {
				graph.set(loaded);
				selected.set(None);
				report(Ok("Network loaded".to_string()));
			}
			Ok(None) => report(Err("No saved network found".to_string())),
			Err(err) => report(Err(err.to_string())),
		}
	});

	let on_export = Callback::new(move |()| {
		let result = graph.with(|g| config.with_value(|c| storage::export(g, c)));
		if let Err(err) = result {
			report(Err(err.to_string()));
		}
	});

	let on_import = Callback::new(move |file: File| {
		spawn_local(async move {
			match storage::import(file, catalog).await {
				Ok(imported) => {
					graph.set(imported);
					selected.set(None);
					report(Ok("Network imported".to_string()));
				}
				Err(err) => report(Err(err.to_string())),
			}
		});
	});

	let on_regenerate = Callback::new(move |()| {
		let fresh = config.with_value(|c| Graph::generate(catalog, &c.generator, &mut random::system()));
		graph.set(fresh);
		selected.set(None);
	});

	let detail = move || {
		let id = selected.get()?;
		graph.with(|g| {
			let node = g.node(&id)?.clone();
			let neighbors = g
				.neighbors(&id)
				.into_iter()
				.filter_map(|n| g.node(n).map(|n| (n.id.clone(), n.label.clone())))
				.collect::<Vec<_>>();
			Some(view! {
				<NodeDetailPanel
					node
					neighbors
					on_close=move |()| selected.set(None)
					on_edit=move |()| dialog.set(Some(Dialog::EditNode(id.clone())))
					on_delete=on_delete_node
					on_select=move |n: String| selected.set(Some(n))
				/>
			})
		})
	};

	let modal = move || match dialog.get()? {
		Dialog::AddNode => Some(
			view! {
				<NodeForm
					title="Add New Node"
					submit_label="Add Node"
					on_submit=on_add_node
					on_cancel=move |()| dialog.set(None)
				/>
			}
			.into_any(),
		),
		Dialog::EditNode(id) => {
			let initial = graph.with_untracked(|g| {
				g.node(&id).map(|n| NodeInput {
					name: n.label.clone(),
					node_type: n.node_type.clone().unwrap_or_default(),
					community: n.community,
				})
			})?;
			Some(
				view! {
					<NodeForm
						title="Edit Node"
						submit_label="Save Changes"
						initial
						on_submit=on_edit_node
						on_cancel=move |()| dialog.set(None)
					/>
				}
				.into_any(),
			)
		}
		Dialog::CreateLink => Some(
			view! {
				<EdgeForm nodes=node_choices on_submit=on_create_link on_cancel=move |()| dialog.set(None) />
			}
			.into_any(),
		),
	};

	let banner = move || {
		notice.get().map(|n| {
			let (class, text) = match n {
				Notice::Info(text) => ("notice info", text),
				Notice::Error(text) => ("notice error", text),
			};
			view! {
				<div class=class on:click=move |_| notice.set(None)>
					{text}
				</div>
			}
		})
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
			<div class="network-page">
				<aside class="controls">
					<div class="panel">
						<button on:click=move |_| dialog.set(Some(Dialog::AddNode))>"Add Node"</button>
						<button on:click=move |_| dialog.set(Some(Dialog::CreateLink))>"Create Link"</button>
					</div>
					<NetworkFilter selection />
					<LayoutControls
						initial_spacing=config.with_value(|c| c.layout.spacing)
						on_apply=on_apply_layout
						physics
					/>
					<PersistenceControls
						on_save
						on_load
						on_export
						on_import
						on_regenerate
					/>
				</aside>

				<main class="graph-area">
					<header class="graph-header">
						<h2>"Network Visualization"</h2>
						<span class="muted">
							{move || visible.with(|v| format!("{} nodes, {} links shown", v.nodes.len(), v.edges.len()))}
						</span>
					</header>
					{banner}
					<ForceGraphCanvas
						view=visible
						selected
						physics
						on_select
						on_node_moved
						on_settled
					/>
				</main>

				<aside class="details">
					{detail}
					<NetworkDataSidebar stats node_count edge_count />
				</aside>
				{modal}
			</div>
		</ErrorBoundary>
	}
}
