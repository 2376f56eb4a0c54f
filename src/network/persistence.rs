//! JSON codec for saved and exported networks.
//!
//! The document shape is `{"nodes": [...], "edges": [...]}`. Writers may add
//! a `savedAt` or `exportedAt` timestamp; readers ignore any extra keys.

use log::info;
use serde::{Deserialize, Serialize};

use super::community::Catalog;
use super::error::Result;
use super::graph::Graph;
use super::types::{Edge, Node};

#[derive(Serialize)]
struct Document<'a> {
	nodes: &'a [Node],
	edges: &'a [Edge],
	#[serde(rename = "savedAt", skip_serializing_if = "Option::is_none")]
	saved_at: Option<&'a str>,
	#[serde(rename = "exportedAt", skip_serializing_if = "Option::is_none")]
	exported_at: Option<&'a str>,
}

#[derive(Deserialize)]
struct OwnedDocument {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

/// When a document was written, and for which purpose.
#[derive(Clone, Copy, Debug)]
pub enum Stamp<'a> {
	None,
	Saved(&'a str),
	Exported(&'a str),
}

/// Compact JSON, as kept in local storage.
pub fn to_json(graph: &Graph, stamp: Stamp<'_>) -> Result<String> {
	Ok(serde_json::to_string(&document(graph, stamp))?)
}

/// Indented JSON, as offered for download.
pub fn to_json_pretty(graph: &Graph, stamp: Stamp<'_>) -> Result<String> {
	Ok(serde_json::to_string_pretty(&document(graph, stamp))?)
}

fn document<'a>(graph: &'a Graph, stamp: Stamp<'a>) -> Document<'a> {
	let (saved_at, exported_at) = match stamp {
		Stamp::None => (None, None),
		Stamp::Saved(at) => (Some(at), None),
		Stamp::Exported(at) => (None, Some(at)),
	};
	Document {
		nodes: graph.nodes(),
		edges: graph.edges(),
		saved_at,
		exported_at,
	}
}

/// Decodes and validates a document against `catalog`.
pub fn from_json(json: &str, catalog: &Catalog) -> Result<Graph> {
	let document: OwnedDocument = serde_json::from_str(json)?;
	let graph = Graph::from_parts(document.nodes, document.edges);
	graph.validate(catalog)?;
	info!(
		"loaded network with {} nodes and {} edges",
		graph.nodes().len(),
		graph.edges().len()
	);
	Ok(graph)
}

#[cfg(test)]
mod tests {
	use rstest::{fixture, rstest};
	use serde_json::{Value, json};

	use super::*;
	use crate::network::error::NetworkError;
	use crate::network::types::EdgeKind;
	use crate::network::ErrorKind;
	use crate::network::generator::GeneratorSettings;
	use crate::network::graph::NodeInput;
	use crate::network::random::seeded;

	#[fixture]
	fn graph() -> Graph {
		Graph::generate(Catalog::standard(), &GeneratorSettings::default(), &mut seeded(21))
	}

	#[rstest]
	fn round_trip_preserves_ids_and_attributes(graph: Graph) {
		let json = to_json(&graph, Stamp::None).unwrap();
		let back = from_json(&json, Catalog::standard()).unwrap();
		assert_eq!(back.nodes(), graph.nodes());
		assert_eq!(back.edges(), graph.edges());
	}

	#[rstest]
	fn only_nodes_and_edges_plus_stamp_are_written(graph: Graph) {
		let json = to_json_pretty(&graph, Stamp::Exported("2026-10-19T00:00:00.000Z")).unwrap();
		let value: Value = serde_json::from_str(&json).unwrap();
		let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
		keys.sort_unstable();
		assert_eq!(keys, ["edges", "exportedAt", "nodes"]);
	}

	#[rstest]
	fn envelope_fields_are_ignored_on_read(graph: Graph) {
		let json = to_json(&graph, Stamp::Saved("yesterday")).unwrap();
		assert!(json.contains("\"savedAt\":\"yesterday\""));
		assert!(from_json(&json, Catalog::standard()).is_ok());
	}

	#[rstest]
	#[case(r#"{"nodes": []}"#)]
	#[case(r#"{"edges": []}"#)]
	#[case("not json")]
	fn malformed_documents_are_format_errors(#[case] json: &str) {
		let err = from_json(json, Catalog::standard()).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Format);
	}

	#[rstest]
	fn dangling_edges_are_rejected(graph: Graph) {
		let mut value: Value = serde_json::from_str(&to_json(&graph, Stamp::None).unwrap()).unwrap();
		value["edges"][0]["target"] = Value::from("missing");
		let err = from_json(&value.to_string(), Catalog::standard()).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Format);
	}

	#[rstest]
	fn reloaded_graphs_mint_fresh_ids(graph: Graph) {
		let mut back = from_json(&to_json(&graph, Stamp::None).unwrap(), Catalog::standard()).unwrap();
		let highest = graph.nodes().len();
		let input = NodeInput {
			name: "New".into(),
			node_type: "resource".into(),
			community: 0,
		};
		let id = back.add_node(input, Catalog::standard(), &mut seeded(1)).unwrap().id.clone();
		assert_eq!(id, format!("node-{}", highest + 1));
	}

	fn node(id: &str, influence: Option<f64>) -> Value {
		json!({
			"id": id,
			"label": format!("Node {id}"),
			"community": 0,
			"influence": influence,
			"position": {"x": 10.0, "y": 20.0},
			"style": {"background": "#6366f1", "size": 30.0, "opacity": 0.85},
		})
	}

	fn edge(id: &str, source: &str, target: &str) -> Value {
		json!({
			"id": id,
			"source": source,
			"target": target,
			"style": {"stroke": "#6366f1", "opacity": 0.25, "strokeWidth": 1.0},
		})
	}

	fn document(nodes: Vec<Value>, edges: Vec<Value>) -> String {
		json!({"nodes": nodes, "edges": edges}).to_string()
	}

	#[rstest]
	#[case::influence_above_one(document(vec![node("1", Some(3.5))], vec![]))]
	#[case::negative_influence(document(vec![node("1", Some(-0.1))], vec![]))]
	#[case::self_loop(document(vec![node("1", None)], vec![edge("e1", "1", "1")]))]
	#[case::repeated_pair(document(
		vec![node("1", None), node("2", None)],
		vec![edge("e1", "1", "2"), edge("e2", "1", "2")],
	))]
	fn records_breaking_graph_rules_are_rejected(#[case] json: String) {
		let err = from_json(&json, Catalog::standard()).unwrap_err();
		assert!(matches!(err, NetworkError::InvalidRecord { .. }), "{err}");
		assert_eq!(err.kind(), ErrorKind::Format);
	}

	#[test]
	fn reverse_links_and_boundary_influence_are_accepted() {
		let json = document(
			vec![node("1", Some(0.0)), node("2", Some(1.0))],
			vec![edge("e1", "1", "2"), edge("e2", "2", "1")],
		);
		let graph = from_json(&json, Catalog::standard()).unwrap();
		assert_eq!(graph.edges().len(), 2);
	}

	#[test]
	fn huge_numeric_ids_do_not_exhaust_the_counters() {
		let max = u64::MAX.to_string();
		let json = document(
			vec![node(&max, None), node("node-7", None)],
			vec![edge(&format!("e{max}"), &max, "node-7")],
		);
		let mut graph = from_json(&json, Catalog::standard()).unwrap();
		let input = NodeInput {
			name: "New".into(),
			node_type: String::new(),
			community: 0,
		};
		let id = graph.add_node(input, Catalog::standard(), &mut seeded(3)).unwrap().id.clone();
		assert_eq!(id, "node-8");
		let edge = graph.create_edge("node-7", &max, EdgeKind::Default, None).unwrap();
		assert_eq!(edge.id, "e1");
		graph.validate(Catalog::standard()).unwrap();
	}
}
