use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn is_finite(&self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

/// Rendering attributes of a node. Derived from community and influence,
/// never edited directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
	pub background: String,
	/// Diameter in graph units.
	pub size: f64,
	pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: String,
	pub label: String,
	pub community: usize,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub influence: Option<f64>,
	#[serde(default, rename = "isCentral", skip_serializing_if = "Option::is_none")]
	pub is_central: Option<bool>,
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub node_type: Option<String>,
	pub position: Position,
	pub style: NodeStyle,
}

impl Node {
	pub fn is_central(&self) -> bool {
		self.is_central.unwrap_or(false)
	}
}

/// How a connection is drawn. Has no effect on graph semantics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
	#[default]
	Default,
	Strong,
	Dashed,
}

impl EdgeKind {
	pub const ALL: [EdgeKind; 3] = [EdgeKind::Default, EdgeKind::Strong, EdgeKind::Dashed];

	pub fn as_str(self) -> &'static str {
		match self {
			EdgeKind::Default => "default",
			EdgeKind::Strong => "strong",
			EdgeKind::Dashed => "dashed",
		}
	}

	pub fn display_name(self) -> &'static str {
		match self {
			EdgeKind::Default => "Regular",
			EdgeKind::Strong => "Strong",
			EdgeKind::Dashed => "Dashed",
		}
	}
}

impl FromStr for EdgeKind {
	type Err = std::convert::Infallible;

	/// Unknown names fall back to [`EdgeKind::Default`].
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s.trim().to_ascii_lowercase().as_str() {
			"strong" => EdgeKind::Strong,
			"dashed" => EdgeKind::Dashed,
			_ => EdgeKind::Default,
		})
	}
}

impl fmt::Display for EdgeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
	pub stroke: String,
	pub opacity: f64,
	#[serde(rename = "strokeWidth")]
	pub stroke_width: f64,
	#[serde(default, rename = "strokeDasharray", skip_serializing_if = "Option::is_none")]
	pub dash: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	pub id: String,
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub kind: EdgeKind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	pub style: EdgeStyle,
}

impl Edge {
	pub fn touches(&self, node_id: &str) -> bool {
		self.source == node_id || self.target == node_id
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("strong", EdgeKind::Strong)]
	#[case(" Dashed ", EdgeKind::Dashed)]
	#[case("default", EdgeKind::Default)]
	#[case("wobbly", EdgeKind::Default)]
	fn edge_kind_parses_leniently(#[case] raw: &str, #[case] expected: EdgeKind) {
		assert_eq!(raw.parse::<EdgeKind>(), Ok(expected));
	}

	#[test]
	fn optional_node_fields_are_omitted_from_json() {
		let node = Node {
			id: "node-1".into(),
			label: "Alice".into(),
			community: 0,
			influence: None,
			is_central: None,
			node_type: Some("person".into()),
			position: Position::new(1.0, 2.0),
			style: NodeStyle {
				background: "#fff".into(),
				size: 30.0,
				opacity: 0.9,
			},
		};
		let json = serde_json::to_value(&node).unwrap();
		assert!(json.get("influence").is_none());
		assert!(json.get("isCentral").is_none());
		assert_eq!(json["type"], "person");
	}
}
