//! Derives the visible subgraph from the community selection and search box.

use std::collections::{BTreeSet, HashSet};

use super::community::Catalog;
use super::types::{Edge, Node};

/// What the user has chosen to look at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewSelection {
	pub communities: BTreeSet<usize>,
	pub query: String,
}

impl ViewSelection {
	/// Every community selected, empty query.
	pub fn all(catalog: &Catalog) -> Self {
		Self {
			communities: (0..catalog.len()).collect(),
			query: String::new(),
		}
	}

	pub fn toggle(&mut self, community: usize) {
		if !self.communities.remove(&community) {
			self.communities.insert(community);
		}
	}

	pub fn covers(&self, catalog: &Catalog) -> bool {
		(0..catalog.len()).all(|i| self.communities.contains(&i))
	}
}

/// Nodes and edges that survive the current filters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibleSubgraph {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

/// Applies the community filter, then the search filter, then keeps only
/// edges whose endpoints are both visible.
pub fn project(
	nodes: &[Node],
	edges: &[Edge],
	selection: &ViewSelection,
	catalog: &Catalog,
) -> VisibleSubgraph {
	let all_communities = selection.covers(catalog);
	let query = selection.query.trim().to_lowercase();

	let visible: Vec<Node> = nodes
		.iter()
		.filter(|n| all_communities || selection.communities.contains(&n.community))
		.filter(|n| query.is_empty() || matches_query(n, &query))
		.cloned()
		.collect();

	let ids: HashSet<&str> = visible.iter().map(|n| n.id.as_str()).collect();
	let edges = edges
		.iter()
		.filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
		.cloned()
		.collect();

	VisibleSubgraph {
		nodes: visible,
		edges,
	}
}

/// `query` must already be lowercased.
fn matches_query(node: &Node, query: &str) -> bool {
	node.label.to_lowercase().contains(query)
		|| node
			.node_type
			.as_deref()
			.is_some_and(|t| t.to_lowercase().contains(query))
}
