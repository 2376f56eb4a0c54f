//! The graph aggregate and the edits the user can make to it.

use std::collections::HashSet;

use log::{debug, info, warn};

use super::community::Catalog;
use super::error::{NetworkError, Result};
use super::generator::{self, GeneratorSettings};
use super::layout::{self, LayoutKind, LayoutOptions};
use super::random::RandomSource;
use super::style;
use super::types::{Edge, EdgeKind, Node, Position};

/// Fields supplied when adding or editing a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeInput {
	pub name: String,
	pub node_type: String,
	pub community: usize,
}

/// Per-community summary shown in the data sidebar.
#[derive(Clone, Debug, PartialEq)]
pub struct CommunityStats {
	pub name: String,
	pub color: String,
	pub node_count: usize,
	/// Edges whose source node belongs to the community.
	pub edge_count: usize,
	pub central_node: Option<String>,
}

/// Owns all nodes and edges plus the counters used to mint ids.
///
/// Counters only ever grow, so an id is never handed out twice even after
/// the entity it named has been deleted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	node_seq: u64,
	edge_seq: u64,
}

impl Graph {
	/// Wraps existing nodes and edges, resuming id counters past the highest
	/// numeric suffix already in use. Callers are expected to have validated
	/// referential integrity (see [`super::persistence`]).
	pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		let node_seq = restored_seq(nodes.iter().map(|n| n.id.as_str()));
		let edge_seq = restored_seq(edges.iter().map(|e| e.id.as_str()));
		Self {
			nodes,
			edges,
			node_seq,
			edge_seq,
		}
	}

	/// Fresh network generated from `catalog`.
	pub fn generate(
		catalog: &Catalog,
		settings: &GeneratorSettings,
		rng: &mut dyn RandomSource,
	) -> Self {
		let nodes = generator::generate_nodes(catalog, settings, rng);
		let edges = generator::generate_edges(&nodes, settings, rng);
		Self::from_parts(nodes, edges)
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id == id)
	}

	pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
		(self.nodes, self.edges)
	}

	fn node_index(&self, id: &str) -> Result<usize> {
		self.nodes
			.iter()
			.position(|n| n.id == id)
			.ok_or_else(|| NetworkError::NodeNotFound(id.to_string()))
	}

	fn next_node_id(&mut self) -> Result<String> {
		loop {
			self.node_seq = self
				.node_seq
				.checked_add(1)
				.ok_or(NetworkError::IdsExhausted("node"))?;
			let id = format!("node-{}", self.node_seq);
			if self.node(&id).is_none() {
				return Ok(id);
			}
		}
	}

	fn next_edge_id(&mut self) -> Result<String> {
		loop {
			self.edge_seq = self
				.edge_seq
				.checked_add(1)
				.ok_or(NetworkError::IdsExhausted("edge"))?;
			let id = format!("e{}", self.edge_seq);
			if self.edge(&id).is_none() {
				return Ok(id);
			}
		}
	}

	/// Adds a node at a random spot in the default canvas area.
	pub fn add_node(
		&mut self,
		input: NodeInput,
		catalog: &Catalog,
		rng: &mut dyn RandomSource,
	) -> Result<&Node> {
		let name = validated_name(&input.name)?;
		let community = catalog.get(input.community)?;
		let id = self.next_node_id()?;
		let node = Node {
			id,
			label: name,
			community: input.community,
			influence: None,
			is_central: None,
			node_type: non_empty(&input.node_type),
			position: Position::new(rng.range(100.0, 900.0), rng.range(100.0, 700.0)),
			style: style::manual_node(community),
		};
		debug!("added node {} to community {}", node.id, node.community);
		self.nodes.push(node);
		Ok(&self.nodes[self.nodes.len() - 1])
	}

	/// Replaces label, type and community, recoloring the node. Incident
	/// edges are restyled since their cross-community status may change.
	pub fn update_node(&mut self, id: &str, input: NodeInput, catalog: &Catalog) -> Result<&Node> {
		let name = validated_name(&input.name)?;
		let community = catalog.get(input.community)?;
		let index = self.node_index(id)?;

		let node = &mut self.nodes[index];
		node.label = name;
		node.node_type = non_empty(&input.node_type);
		node.community = input.community;
		node.style.background = community.color.clone();
		debug!("updated node {id}");

		self.restyle_edges_of(id);
		Ok(&self.nodes[index])
	}

	/// Removes the node and every edge touching it. Returns `false` when
	/// there was nothing to remove.
	pub fn delete_node(&mut self, id: &str) -> bool {
		let Ok(index) = self.node_index(id) else {
			return false;
		};
		self.nodes.remove(index);
		let before = self.edges.len();
		self.edges.retain(|e| !e.touches(id));
		debug!("deleted node {id} and {} incident edges", before - self.edges.len());
		true
	}

	/// Links `source -> target`. Each ordered pair may be linked once.
	pub fn create_edge(
		&mut self,
		source: &str,
		target: &str,
		kind: EdgeKind,
		label: Option<String>,
	) -> Result<&Edge> {
		let src = self.node_index(source)?;
		let tgt = self.node_index(target)?;
		if source == target {
			return Err(NetworkError::SelfLoop(source.to_string()));
		}
		if self.edges.iter().any(|e| e.source == source && e.target == target) {
			warn!("rejected duplicate edge {source} -> {target}");
			return Err(NetworkError::DuplicateEdge {
				from: source.to_string(),
				to: target.to_string(),
			});
		}

		let style = style::edge(&self.nodes[src], &self.nodes[tgt], kind);
		let id = self.next_edge_id()?;
		debug!("created edge {id}: {source} -> {target} ({kind})");
		self.edges.push(Edge {
			id,
			source: source.to_string(),
			target: target.to_string(),
			kind,
			label: label.and_then(|l| non_empty(&l)),
			style,
		});
		Ok(&self.edges[self.edges.len() - 1])
	}

	pub fn remove_edge(&mut self, id: &str) -> Result<Edge> {
		let index = self
			.edges
			.iter()
			.position(|e| e.id == id)
			.ok_or_else(|| NetworkError::EdgeNotFound(id.to_string()))?;
		Ok(self.edges.remove(index))
	}

	/// Commits a dragged position.
	pub fn move_node(&mut self, id: &str, position: Position) -> Result<()> {
		let index = self.node_index(id)?;
		self.nodes[index].position = position;
		Ok(())
	}

	/// Ids of nodes linked to `id` in either direction, in edge order.
	pub fn neighbors(&self, id: &str) -> Vec<&str> {
		let mut seen = HashSet::new();
		self.edges
			.iter()
			.filter_map(|e| {
				if e.source == id {
					Some(e.target.as_str())
				} else if e.target == id {
					Some(e.source.as_str())
				} else {
					None
				}
			})
			.filter(|n| seen.insert(*n))
			.collect()
	}

	/// Repositions every node.
	pub fn apply_layout(
		&mut self,
		kind: LayoutKind,
		options: &LayoutOptions,
		catalog: &Catalog,
		rng: &mut dyn RandomSource,
	) {
		self.nodes = layout::apply_layout(&self.nodes, kind, options, catalog.len(), rng);
		info!("applied {kind} layout (spacing {})", options.spacing);
	}

	pub fn community_stats(&self, catalog: &Catalog) -> Vec<CommunityStats> {
		catalog
			.iter()
			.enumerate()
			.map(|(index, community)| {
				let members: Vec<&Node> = self.nodes.iter().filter(|n| n.community == index).collect();
				let ids: HashSet<&str> = members.iter().map(|n| n.id.as_str()).collect();
				CommunityStats {
					name: community.name.clone(),
					color: community.color.clone(),
					node_count: members.len(),
					edge_count: self.edges.iter().filter(|e| ids.contains(e.source.as_str())).count(),
					central_node: members.iter().find(|n| n.is_central()).map(|n| n.label.clone()),
				}
			})
			.collect()
	}

	/// Checks the rules every loaded graph must satisfy: valid communities,
	/// unique ids, influence within `[0, 1]`, edges between two distinct
	/// existing nodes, and at most one edge per ordered pair.
	pub fn validate(&self, catalog: &Catalog) -> Result<()> {
		let mut node_ids = HashSet::new();
		for node in &self.nodes {
			catalog.get(node.community)?;
			if !node_ids.insert(node.id.as_str()) {
				return Err(NetworkError::DuplicateId(node.id.clone()));
			}
			if let Some(influence) = node.influence.filter(|i| !(0.0..=1.0).contains(i)) {
				return Err(invalid(&node.id, format!("influence {influence} is outside [0, 1]")));
			}
		}
		let mut edge_ids = HashSet::new();
		let mut pairs = HashSet::new();
		for edge in &self.edges {
			if !edge_ids.insert(edge.id.as_str()) {
				return Err(NetworkError::DuplicateId(edge.id.clone()));
			}
			for end in [&edge.source, &edge.target] {
				if !node_ids.contains(end.as_str()) {
					return Err(NetworkError::DanglingEdge {
						edge: edge.id.clone(),
						node: end.clone(),
					});
				}
			}
			if edge.source == edge.target {
				return Err(invalid(&edge.id, format!("links {} to itself", edge.source)));
			}
			if !pairs.insert((edge.source.as_str(), edge.target.as_str())) {
				return Err(invalid(
					&edge.id,
					format!("repeats the link {} -> {}", edge.source, edge.target),
				));
			}
		}
		Ok(())
	}

	fn restyle_edges_of(&mut self, id: &str) {
		let Self { nodes, edges, .. } = self;
		for edge in edges.iter_mut().filter(|e| e.touches(id)) {
			let source = nodes.iter().find(|n| n.id == edge.source);
			let target = nodes.iter().find(|n| n.id == edge.target);
			if let (Some(source), Some(target)) = (source, target) {
				edge.style = style::edge(source, target, edge.kind);
			}
		}
	}
}

fn invalid(id: &str, reason: String) -> NetworkError {
	NetworkError::InvalidRecord {
		id: id.to_string(),
		reason,
	}
}

fn validated_name(name: &str) -> Result<String> {
	non_empty(name).ok_or(NetworkError::EmptyLabel)
}

fn non_empty(value: &str) -> Option<String> {
	let trimmed = value.trim();
	(!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Largest suffix a counter resumes from. Ids with bigger suffixes are
/// still honored, since minting skips ids already taken.
const MAX_RESTORED_SEQ: u64 = u32::MAX as u64;

fn restored_seq<'a>(ids: impl Iterator<Item = &'a str>) -> u64 {
	ids.filter_map(numeric_suffix)
		.filter(|n| *n <= MAX_RESTORED_SEQ)
		.max()
		.unwrap_or(0)
}

/// Trailing run of digits, e.g. `"node-12"` and `"e12"` both give 12.
fn numeric_suffix(id: &str) -> Option<u64> {
	let digits = id.chars().rev().take_while(char::is_ascii_digit).count();
	id.get(id.len() - digits..).and_then(|tail| tail.parse().ok())
}
