use crate::network::{Edge, EdgeKind, Node};

/// Per-node data carried through the canvas simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
	pub radius: f64,
	pub opacity: f64,
	pub central: bool,
}

impl From<&Node> for NodeInfo {
	fn from(node: &Node) -> Self {
		Self {
			id: node.id.clone(),
			label: node.label.clone(),
			color: node.style.background.clone(),
			radius: node.style.size / 2.0,
			opacity: node.style.opacity,
			central: node.is_central(),
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub color: String,
	pub opacity: f64,
	pub width: f64,
	pub dashed: bool,
	pub label: Option<String>,
}

impl From<&Edge> for EdgeInfo {
	fn from(edge: &Edge) -> Self {
		Self {
			color: edge.style.stroke.clone(),
			opacity: edge.style.opacity,
			width: edge.style.stroke_width,
			dashed: edge.kind == EdgeKind::Dashed,
			label: edge.label.clone(),
		}
	}
}
