use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{EdgeInfo, NodeInfo};
use crate::network::{Position, VisibleSubgraph};

/// Extra slop around a node when hit testing, in graph units.
pub const HIT_SLOP: f64 = 4.0;
const FIT_PADDING: f64 = 0.1;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Canvas-side copy of the visible subgraph plus interaction state.
///
/// Positions here follow the stored graph until the user drags a node or
/// runs physics; either way they are reported back through callbacks.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub physics: bool,
	pub selected: Option<String>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	ids: HashMap<DefaultNodeIdx, String>,
}

impl ForceGraphState {
	pub fn new(view: &VisibleSubgraph, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(simulation_parameters()),
			edges: Vec::new(),
			ids: HashMap::new(),
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			physics: false,
			selected: None,
		};
		state.load(view);
		state.fit_view();
		state
	}

	/// Replaces the displayed subgraph, keeping pan/zoom and selection.
	pub fn load(&mut self, view: &VisibleSubgraph) {
		let mut graph = ForceGraph::new(simulation_parameters());
		let mut id_to_idx = HashMap::new();
		self.ids.clear();
		self.edges.clear();

		for node in &view.nodes {
			let info = NodeInfo::from(node);
			let idx = graph.add_node(NodeData {
				x: node.position.x as f32,
				y: node.position.y as f32,
				mass: (info.radius as f32).max(5.0),
				is_anchor: false,
				user_data: info,
			});
			id_to_idx.insert(node.id.as_str(), idx);
			self.ids.insert(idx, node.id.clone());
		}

		for edge in &view.edges {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(edge.source.as_str()),
				id_to_idx.get(edge.target.as_str()),
			) {
				graph.add_edge(src, tgt, EdgeData { user_data: EdgeInfo::from(edge) });
				self.edges.push((src, tgt));
			}
		}

		self.graph = graph;
		self.hover = HoverState::default();
		self.drag = DragState::default();
		if self.selected.as_ref().is_some_and(|id| !id_to_idx.contains_key(id.as_str())) {
			self.selected = None;
		}
	}

	/// Zooms and pans so every node is on screen.
	pub fn fit_view(&mut self) {
		let (mut min_x, mut min_y, mut max_x, mut max_y) =
			(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
		self.graph.visit_nodes(|node| {
			let r = node.data.user_data.radius;
			let (x, y) = (node.x() as f64, node.y() as f64);
			min_x = min_x.min(x - r);
			min_y = min_y.min(y - r);
			max_x = max_x.max(x + r);
			max_y = max_y.max(y + r);
		});
		if !min_x.is_finite() {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		}
		let (w, h) = ((max_x - min_x).max(1.0), (max_y - min_y).max(1.0));
		let k = ((self.width / w).min(self.height / h) * (1.0 - 2.0 * FIT_PADDING)).clamp(0.1, 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - (min_x + w / 2.0) * k,
			y: self.height / 2.0 - (min_y + h / 2.0) * k,
			k,
		};
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius + HIT_SLOP {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<&str> {
		self.ids.get(&idx).map(String::as_str)
	}

	pub fn is_selected(&self, idx: DefaultNodeIdx) -> bool {
		self.selected.is_some() && self.selected.as_deref() == self.node_id(idx)
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<Position> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(Position::new(node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	/// Current position of every displayed node, by id.
	pub fn positions(&self) -> Vec<(String, Position)> {
		let mut out = Vec::with_capacity(self.ids.len());
		self.graph.visit_nodes(|node| {
			if let Some(id) = self.ids.get(&node.index()) {
				out.push((id.clone(), Position::new(node.x() as f64, node.y() as f64)));
			}
		});
		out
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the old highlight around so it can fade out.
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		if self.physics {
			self.graph.update(dt);
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn simulation_parameters() -> SimulationParameters {
	SimulationParameters {
		force_charge: 600.0,
		force_spring: 0.02,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::generator::GeneratorSettings;
	use crate::network::random::seeded;
	use crate::network::{Catalog, Graph, ViewSelection, project};

	fn view() -> VisibleSubgraph {
		let catalog = Catalog::standard();
		let graph = Graph::generate(catalog, &GeneratorSettings::default(), &mut seeded(2));
		project(graph.nodes(), graph.edges(), &ViewSelection::all(catalog), catalog)
	}

	#[test]
	fn loads_every_visible_node_at_its_stored_position() {
		let view = view();
		let state = ForceGraphState::new(&view, 800.0, 600.0);
		let mut positions = state.positions();
		positions.sort_by(|a, b| a.0.cmp(&b.0));
		assert_eq!(positions.len(), view.nodes.len());
		for (id, position) in positions {
			let node = view.nodes.iter().find(|n| n.id == id).unwrap();
			assert!((node.position.x - position.x).abs() < 1e-3);
			assert!((node.position.y - position.y).abs() < 1e-3);
		}
	}

	#[test]
	fn fit_view_brings_nodes_on_screen() {
		let view = view();
		let state = ForceGraphState::new(&view, 800.0, 600.0);
		for (_, p) in state.positions() {
			let sx = p.x * state.transform.k + state.transform.x;
			let sy = p.y * state.transform.k + state.transform.y;
			assert!((0.0..=800.0).contains(&sx));
			assert!((0.0..=600.0).contains(&sy));
		}
	}

	#[test]
	fn hit_testing_finds_the_node_under_the_cursor() {
		let view = view();
		let state = ForceGraphState::new(&view, 800.0, 600.0);
		let hub = &view.nodes[0];
		let sx = hub.position.x * state.transform.k + state.transform.x;
		let sy = hub.position.y * state.transform.k + state.transform.y;
		let idx = state.node_at_position(sx, sy).unwrap();
		assert_eq!(state.node_id(idx), Some(hub.id.as_str()));
	}

	#[test]
	fn empty_views_center_the_origin() {
		let state = ForceGraphState::new(&VisibleSubgraph::default(), 800.0, 600.0);
		assert_eq!(state.transform.x, 400.0);
		assert!(state.positions().is_empty());
	}
}
