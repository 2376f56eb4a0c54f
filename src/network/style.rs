//! Visual attributes derived from graph data.

use super::community::Community;
use super::types::{EdgeKind, EdgeStyle, Node, NodeStyle};

pub const CENTRAL_NODE_SIZE: f64 = 60.0;
pub const CENTRAL_NODE_OPACITY: f64 = 0.9;
/// Size given to nodes created by hand.
pub const MANUAL_NODE_SIZE: f64 = 30.0;
pub const MANUAL_NODE_OPACITY: f64 = 0.85;
/// Influence assumed for nodes that carry none.
pub const DEFAULT_INFLUENCE: f64 = 0.5;
pub const CROSS_EDGE_STROKE: &str = "rgba(160, 160, 160, 0.2)";
const CROSS_EDGE_OPACITY: f64 = 0.15;
const COMMUNITY_EDGE_OPACITY: f64 = 0.25;
const STRONG_EDGE_WIDTH: f64 = 3.0;
const DASH_PATTERN: &str = "5,5";

pub fn central_node(community: &Community) -> NodeStyle {
	NodeStyle {
		background: community.color.clone(),
		size: CENTRAL_NODE_SIZE,
		opacity: CENTRAL_NODE_OPACITY,
	}
}

pub fn satellite_node(community: &Community, size: f64, influence: f64) -> NodeStyle {
	NodeStyle {
		background: community.color.clone(),
		size,
		opacity: 0.7 + influence * 0.3,
	}
}

pub fn manual_node(community: &Community) -> NodeStyle {
	NodeStyle {
		background: community.color.clone(),
		size: MANUAL_NODE_SIZE,
		opacity: MANUAL_NODE_OPACITY,
	}
}

/// Mean influence of both endpoints.
pub fn edge_strength(source: &Node, target: &Node) -> f64 {
	let influence = |n: &Node| n.influence.unwrap_or(DEFAULT_INFLUENCE);
	(influence(source) + influence(target)) / 2.0
}

/// Stroke for an edge between two nodes. Cross-community edges are gray and
/// fainter; same-community edges take the source node's color.
pub fn edge(source: &Node, target: &Node, kind: EdgeKind) -> EdgeStyle {
	let cross = source.community != target.community;
	let mut style = EdgeStyle {
		stroke: if cross {
			CROSS_EDGE_STROKE.to_string()
		} else {
			source.style.background.clone()
		},
		opacity: if cross {
			CROSS_EDGE_OPACITY
		} else {
			COMMUNITY_EDGE_OPACITY
		},
		stroke_width: 1.0 + edge_strength(source, target) * 2.0,
		dash: None,
	};
	match kind {
		EdgeKind::Default => {}
		EdgeKind::Strong => style.stroke_width = STRONG_EDGE_WIDTH,
		EdgeKind::Dashed => style.dash = Some(DASH_PATTERN.to_string()),
	}
	style
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::network::types::Position;

	fn node(community: usize, color: &str, influence: Option<f64>) -> Node {
		Node {
			id: "n".into(),
			label: "n".into(),
			community,
			influence,
			is_central: None,
			node_type: None,
			position: Position::default(),
			style: NodeStyle {
				background: color.into(),
				size: 20.0,
				opacity: 1.0,
			},
		}
	}

	#[rstest]
	#[case(0.0, 0.7)]
	#[case(1.0, 1.0)]
	fn satellite_opacity_tracks_influence(#[case] influence: f64, #[case] opacity: f64) {
		let community = Community::new("A", "#123456", 1);
		let style = satellite_node(&community, 25.0, influence);
		assert!((style.opacity - opacity).abs() < 1e-9);
		assert_eq!(style.background, "#123456");
	}

	#[test]
	fn same_community_edges_use_source_color() {
		let a = node(0, "#aaa", Some(1.0));
		let b = node(0, "#bbb", Some(0.0));
		let style = edge(&a, &b, EdgeKind::Default);
		assert_eq!(style.stroke, "#aaa");
		assert_eq!(style.opacity, 0.25);
		assert_eq!(style.stroke_width, 2.0);
	}

	#[test]
	fn cross_edges_are_gray_and_absent_influence_counts_as_half() {
		let a = node(0, "#aaa", None);
		let b = node(1, "#bbb", None);
		let style = edge(&a, &b, EdgeKind::Default);
		assert_eq!(style.stroke, CROSS_EDGE_STROKE);
		assert_eq!(style.opacity, 0.15);
		assert_eq!(style.stroke_width, 2.0);
	}

	#[test]
	fn kinds_adjust_stroke() {
		let a = node(0, "#aaa", Some(0.0));
		let b = node(0, "#aaa", Some(0.0));
		assert_eq!(edge(&a, &b, EdgeKind::Strong).stroke_width, 3.0);
		assert_eq!(edge(&a, &b, EdgeKind::Dashed).dash.as_deref(), Some("5,5"));
	}
}
