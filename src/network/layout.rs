//! Closed-form layout strategies.
//!
//! Each strategy is a single pass that returns repositioned copies of the
//! input nodes. None of them iterate towards an equilibrium or resolve
//! overlaps.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::types::{Node, Position};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
	/// Clusters nodes around one point per community.
	#[default]
	Force,
	Circular,
	Grid,
	Random,
}

impl LayoutKind {
	pub const ALL: [LayoutKind; 4] = [
		LayoutKind::Force,
		LayoutKind::Circular,
		LayoutKind::Grid,
		LayoutKind::Random,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			LayoutKind::Force => "force",
			LayoutKind::Circular => "circular",
			LayoutKind::Grid => "grid",
			LayoutKind::Random => "random",
		}
	}

	pub fn display_name(self) -> &'static str {
		match self {
			LayoutKind::Force => "Force-Directed",
			LayoutKind::Circular => "Circular",
			LayoutKind::Grid => "Grid",
			LayoutKind::Random => "Random",
		}
	}
}

impl FromStr for LayoutKind {
	type Err = std::convert::Infallible;

	/// Unrecognised names select [`LayoutKind::Force`].
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s.trim().to_ascii_lowercase().as_str() {
			"circular" => LayoutKind::Circular,
			"grid" => LayoutKind::Grid,
			"random" => LayoutKind::Random,
			_ => LayoutKind::Force,
		})
	}
}

impl fmt::Display for LayoutKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
	pub spacing: f64,
	pub center_x: f64,
	pub center_y: f64,
	/// Force layout: community ring radius as a multiple of spacing.
	pub cluster_radius_factor: f64,
	/// Force layout: maximum scatter around a cluster, in spacings.
	pub cluster_scatter_factor: f64,
}

impl Default for LayoutOptions {
	fn default() -> Self {
		Self {
			spacing: 50.0,
			center_x: 500.0,
			center_y: 400.0,
			cluster_radius_factor: 5.0,
			cluster_scatter_factor: 2.0,
		}
	}
}

impl LayoutOptions {
	fn center(&self) -> Position {
		Position::new(self.center_x, self.center_y)
	}
}

/// Repositions `nodes` under `kind`. Only `position` changes. An empty
/// input comes back empty.
///
/// `community_count` is the catalog length; the force layout reserves one
/// cluster slot per community.
pub fn apply_layout(
	nodes: &[Node],
	kind: LayoutKind,
	options: &LayoutOptions,
	community_count: usize,
	rng: &mut dyn RandomSource,
) -> Vec<Node> {
	if nodes.is_empty() {
		return Vec::new();
	}
	debug!("applying {kind} layout to {} nodes", nodes.len());
	let positions = match kind {
		LayoutKind::Circular => circular(nodes.len(), options),
		LayoutKind::Grid => grid(nodes.len(), options),
		LayoutKind::Random => random(nodes.len(), options, rng),
		LayoutKind::Force => clustered(nodes, options, community_count, rng),
	};
	nodes
		.iter()
		.zip(positions)
		.map(|(node, position)| Node {
			position,
			..node.clone()
		})
		.collect()
}

fn circular(n: usize, options: &LayoutOptions) -> Vec<Position> {
	let radius = options.spacing * (n as f64 / (2.0 * PI));
	(0..n)
		.map(|i| {
			let angle = 2.0 * PI * i as f64 / n as f64;
			Position::new(
				options.center_x + radius * angle.cos(),
				options.center_y + radius * angle.sin(),
			)
		})
		.collect()
}

fn grid(n: usize, options: &LayoutOptions) -> Vec<Position> {
	let cols = (n as f64).sqrt().ceil() as usize;
	let cell = options.spacing * 2.0;
	let half_cols = cols as f64 / 2.0;
	let half_rows = (n / cols) as f64 / 2.0;
	(0..n)
		.map(|i| {
			let (row, col) = (i / cols, i % cols);
			Position::new(
				options.center_x + (col as f64 - half_cols) * cell,
				options.center_y + (row as f64 - half_rows) * cell,
			)
		})
		.collect()
}

fn random(n: usize, options: &LayoutOptions, rng: &mut dyn RandomSource) -> Vec<Position> {
	let side = (n as f64).sqrt() * options.spacing;
	(0..n)
		.map(|_| {
			let x = options.center_x + (rng.next_f64() - 0.5) * side;
			let y = options.center_y + (rng.next_f64() - 0.5) * side;
			Position::new(x, y)
		})
		.collect()
}

/// Cluster center of a community on the force layout ring.
pub fn cluster_center(options: &LayoutOptions, community: usize, community_count: usize) -> Position {
	if community >= community_count {
		return options.center();
	}
	let angle = 2.0 * PI * community as f64 / community_count as f64;
	let radius = options.spacing * options.cluster_radius_factor;
	Position::new(
		options.center_x + radius * angle.cos(),
		options.center_y + radius * angle.sin(),
	)
}

fn clustered(
	nodes: &[Node],
	options: &LayoutOptions,
	community_count: usize,
	rng: &mut dyn RandomSource,
) -> Vec<Position> {
	let max_offset = options.spacing * options.cluster_scatter_factor;
	nodes
		.iter()
		.map(|node| {
			let center = cluster_center(options, node.community, community_count);
			let angle = rng.next_f64() * 2.0 * PI;
			let offset = rng.next_f64() * max_offset;
			Position::new(
				center.x + offset * angle.cos(),
				center.y + offset * angle.sin(),
			)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use rstest::{fixture, rstest};

	use super::*;
	use crate::network::random::{seeded, testing::Scripted};
	use crate::network::types::NodeStyle;

	fn node(id: usize, community: usize) -> Node {
		Node {
			id: id.to_string(),
			label: format!("Node {id}"),
			community,
			influence: Some(0.4),
			is_central: None,
			node_type: Some("person".into()),
			position: Position::default(),
			style: NodeStyle {
				background: "#abc".into(),
				size: 25.0,
				opacity: 0.82,
			},
		}
	}

	#[fixture]
	fn nine() -> Vec<Node> {
		(1..=9).map(|i| node(i, i % 3)).collect()
	}

	#[rstest]
	#[case(LayoutKind::Force)]
	#[case(LayoutKind::Circular)]
	#[case(LayoutKind::Grid)]
	#[case(LayoutKind::Random)]
	fn empty_input_is_returned_unchanged(#[case] kind: LayoutKind) {
		let out = apply_layout(&[], kind, &LayoutOptions::default(), 3, &mut seeded(0));
		assert!(out.is_empty());
	}

	#[rstest]
	#[case("circular", LayoutKind::Circular)]
	#[case("GRID", LayoutKind::Grid)]
	#[case("random", LayoutKind::Random)]
	#[case("force", LayoutKind::Force)]
	#[case("spring", LayoutKind::Force)]
	fn unknown_layout_names_fall_back_to_force(#[case] raw: &str, #[case] expected: LayoutKind) {
		assert_eq!(raw.parse::<LayoutKind>(), Ok(expected));
	}

	#[rstest]
	fn grid_of_nine_is_three_by_three(nine: Vec<Node>) {
		let out = apply_layout(&nine, LayoutKind::Grid, &LayoutOptions::default(), 3, &mut seeded(0));
		let mut xs: Vec<i64> = out.iter().map(|n| n.position.x as i64).collect();
		let mut ys: Vec<i64> = out.iter().map(|n| n.position.y as i64).collect();
		xs.sort_unstable();
		xs.dedup();
		ys.sort_unstable();
		ys.dedup();
		assert_eq!(xs, [350, 450, 550]);
		assert_eq!(ys, [250, 350, 450]);

		let mut cells: Vec<(i64, i64)> = out
			.iter()
			.map(|n| (n.position.x as i64, n.position.y as i64))
			.collect();
		cells.sort_unstable();
		cells.dedup();
		assert_eq!(cells.len(), 9);
	}

	#[rstest]
	fn layouts_only_touch_positions(nine: Vec<Node>) {
		for kind in LayoutKind::ALL {
			let out = apply_layout(&nine, kind, &LayoutOptions::default(), 3, &mut seeded(11));
			assert_eq!(out.len(), nine.len());
			for (before, after) in nine.iter().zip(&out) {
				assert_eq!(
					Node {
						position: before.position,
						..after.clone()
					},
					*before
				);
				assert!(after.position.is_finite());
			}
		}
	}

	#[test]
	fn circular_radius_grows_with_node_count() {
		let nodes: Vec<Node> = (1..=4).map(|i| node(i, 0)).collect();
		let options = LayoutOptions::default();
		let out = apply_layout(&nodes, LayoutKind::Circular, &options, 1, &mut seeded(0));
		let radius = 50.0 * 4.0 / (2.0 * PI);
		assert!((out[0].position.x - (500.0 + radius)).abs() < 1e-9);
		assert!((out[0].position.y - 400.0).abs() < 1e-9);
		assert!((out[2].position.x - (500.0 - radius)).abs() < 1e-9);
	}

	#[test]
	fn single_node_circle_sits_on_the_center() {
		let out = apply_layout(&[node(1, 0)], LayoutKind::Circular, &LayoutOptions::default(), 1, &mut seeded(0));
		let p = out[0].position;
		assert!((p.x - (500.0 + 50.0 / (2.0 * PI))).abs() < 1e-9);
		assert!((p.y - 400.0).abs() < 1e-9);
	}

	#[test]
	fn random_layout_stays_inside_its_square() {
		let nodes: Vec<Node> = (1..=16).map(|i| node(i, 0)).collect();
		let out = apply_layout(&nodes, LayoutKind::Random, &LayoutOptions::default(), 1, &mut seeded(3));
		// side = sqrt(16) * 50
		for n in out {
			assert!((400.0..600.0).contains(&n.position.x));
			assert!((300.0..500.0).contains(&n.position.y));
		}
	}

	#[test]
	fn force_layout_clusters_by_community() {
		let nodes: Vec<Node> = (1..=6).map(|i| node(i, i % 2)).collect();
		let options = LayoutOptions::default();
		let out = apply_layout(&nodes, LayoutKind::Force, &options, 2, &mut seeded(8));
		for n in &out {
			let c = cluster_center(&options, n.community, 2);
			let d = (n.position.x - c.x).hypot(n.position.y - c.y);
			assert!(d <= 100.0 + 1e-9);
		}
	}

	#[test]
	fn force_layout_with_zero_draws_lands_on_cluster_centers() {
		let nodes = vec![node(1, 0), node(2, 1), node(3, 7)];
		let options = LayoutOptions::default();
		let out = apply_layout(&nodes, LayoutKind::Force, &options, 2, &mut Scripted::constant(0.0));
		assert!((out[0].position.x - 750.0).abs() < 1e-9);
		assert!((out[1].position.x - 250.0).abs() < 1e-9);
		// Unknown community falls back to the global center.
		assert_eq!(out[2].position, Position::new(500.0, 400.0));
	}
}
