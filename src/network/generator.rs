//! Builds the initial network from the community catalog.
//!
//! Communities sit on a large circle around a global center. Each one gets
//! a central hub node plus a ring of satellites with jittered radius, and
//! edges are sampled independently for every ordered node pair.
//!
//! Edge sampling is a full all-pairs scan, quadratic in node count. That is
//! fine for catalogs of a few hundred nodes and is the known scaling limit.

use std::f64::consts::PI;

use log::info;
use serde::{Deserialize, Serialize};

use super::community::Catalog;
use super::random::RandomSource;
use super::style;
use super::types::{Edge, EdgeKind, Node, Position};

/// Tunables for [`generate_nodes`] and [`generate_edges`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
	pub center_x: f64,
	pub center_y: f64,
	/// Distance of each community hub from the global center.
	pub community_radius: f64,
	pub satellite_radius: f64,
	/// Satellite radius is `satellite_radius + U[0, satellite_jitter)`.
	pub satellite_jitter: f64,
	pub satellite_min_size: f64,
	pub satellite_max_size: f64,
	pub same_community_probability: f64,
	pub cross_community_probability: f64,
	/// Probability multiplier when either endpoint is a hub.
	pub central_multiplier: f64,
}

impl Default for GeneratorSettings {
	fn default() -> Self {
		Self {
			center_x: 500.0,
			center_y: 400.0,
			community_radius: 400.0,
			satellite_radius: 120.0,
			satellite_jitter: 80.0,
			satellite_min_size: 20.0,
			satellite_max_size: 35.0,
			same_community_probability: 0.35,
			cross_community_probability: 0.03,
			central_multiplier: 1.5,
		}
	}
}

impl GeneratorSettings {
	/// Chance that `source -> target` is linked.
	pub fn link_probability(&self, source: &Node, target: &Node) -> f64 {
		let base = if source.community == target.community {
			self.same_community_probability
		} else {
			self.cross_community_probability
		};
		if source.is_central() || target.is_central() {
			base * self.central_multiplier
		} else {
			base
		}
	}
}

/// Hub position of community `index` out of `count`.
pub fn community_center(settings: &GeneratorSettings, index: usize, count: usize) -> Position {
	let angle = 2.0 * PI * index as f64 / count.max(1) as f64;
	Position::new(
		settings.center_x + settings.community_radius * angle.cos(),
		settings.center_y + settings.community_radius * angle.sin(),
	)
}

/// One hub plus `count` satellites per community. Ids are `"1"`, `"2"`, ...
/// shared across communities.
pub fn generate_nodes(
	catalog: &Catalog,
	settings: &GeneratorSettings,
	rng: &mut dyn RandomSource,
) -> Vec<Node> {
	let total = catalog.len() + catalog.iter().map(|c| c.count).sum::<usize>();
	let mut nodes = Vec::with_capacity(total);
	let mut next_id = 1usize;

	for (index, community) in catalog.iter().enumerate() {
		let center = community_center(settings, index, catalog.len());
		nodes.push(Node {
			id: next_id.to_string(),
			label: community.name.clone(),
			community: index,
			influence: None,
			is_central: Some(true),
			node_type: None,
			position: center,
			style: style::central_node(community),
		});
		next_id += 1;

		for j in 0..community.count {
			let angle = 2.0 * PI * j as f64 / community.count as f64;
			let radius = settings.satellite_radius + rng.next_f64() * settings.satellite_jitter;
			let size = rng.range(settings.satellite_min_size, settings.satellite_max_size);
			let influence = rng.next_f64();
			nodes.push(Node {
				id: next_id.to_string(),
				label: format!("Node {next_id}"),
				community: index,
				influence: Some(influence),
				is_central: None,
				node_type: None,
				position: Position::new(
					center.x + radius * angle.cos(),
					center.y + radius * angle.sin(),
				),
				style: style::satellite_node(community, size, influence),
			});
			next_id += 1;
		}
	}

	info!("generated {} nodes across {} communities", nodes.len(), catalog.len());
	nodes
}

/// Samples one Bernoulli trial per ordered pair of distinct nodes. Ids are
/// `"e1"`, `"e2"`, ...
pub fn generate_edges(
	nodes: &[Node],
	settings: &GeneratorSettings,
	rng: &mut dyn RandomSource,
) -> Vec<Edge> {
	let mut edges = Vec::new();
	for source in nodes {
		for target in nodes {
			if source.id == target.id {
				continue;
			}
			if rng.next_f64() < settings.link_probability(source, target) {
				edges.push(Edge {
					id: format!("e{}", edges.len() + 1),
					source: source.id.clone(),
					target: target.id.clone(),
					kind: EdgeKind::Default,
					label: None,
					style: style::edge(source, target, EdgeKind::Default),
				});
			}
		}
	}
	info!("sampled {} edges over {} nodes", edges.len(), nodes.len());
	edges
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::community::Community;
	use crate::network::random::{seeded, testing::Scripted};

	fn small_catalog() -> Catalog {
		Catalog::new(vec![
			Community::new("Alpha", "#ff0000", 3),
			Community::new("Beta", "#0000ff", 2),
		])
	}

	#[test]
	fn generates_hub_and_satellites_with_sequential_ids() {
		let nodes = generate_nodes(&small_catalog(), &GeneratorSettings::default(), &mut seeded(1));
		let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7"]);
		assert_eq!(nodes.iter().filter(|n| n.is_central()).count(), 2);
		assert_eq!(nodes[0].label, "Alpha");
		assert_eq!(nodes[4].label, "Beta");
		assert_eq!(nodes[4].community, 1);
		assert!(nodes[0].influence.is_none());
		assert_eq!(nodes[0].style.size, style::CENTRAL_NODE_SIZE);
	}

	#[test]
	fn satellites_stay_within_the_jitter_ring() {
		let settings = GeneratorSettings::default();
		let catalog = small_catalog();
		let nodes = generate_nodes(&catalog, &settings, &mut seeded(42));
		for node in nodes.iter().filter(|n| !n.is_central()) {
			let center = community_center(&settings, node.community, catalog.len());
			let d = (node.position.x - center.x).hypot(node.position.y - center.y);
			assert!((120.0..=200.0).contains(&d), "distance {d}");
			let influence = node.influence.unwrap();
			assert!((0.0..1.0).contains(&influence));
			assert!((20.0..=35.0).contains(&node.style.size));
			assert!((node.style.opacity - (0.7 + influence * 0.3)).abs() < 1e-9);
		}
	}

	#[test]
	fn communities_are_spread_around_the_global_circle() {
		let settings = GeneratorSettings::default();
		let first = community_center(&settings, 0, 2);
		let second = community_center(&settings, 1, 2);
		assert!((first.x - 900.0).abs() < 1e-9);
		assert!((second.x - 100.0).abs() < 1e-9);
		assert!((second.y - 400.0).abs() < 1e-6);
	}

	#[test]
	fn certain_sampling_links_every_ordered_pair() {
		let nodes = generate_nodes(&small_catalog(), &GeneratorSettings::default(), &mut seeded(3));
		// 0.0 is below every positive probability.
		let edges = generate_edges(&nodes, &GeneratorSettings::default(), &mut Scripted::constant(0.0));
		assert_eq!(edges.len(), nodes.len() * (nodes.len() - 1));
		assert_eq!(edges[0].id, "e1");
		assert_eq!(edges.last().unwrap().id, format!("e{}", edges.len()));
		assert!(edges.iter().all(|e| e.source != e.target));
	}

	#[test]
	fn hub_multiplier_only_applies_to_hub_pairs() {
		let settings = GeneratorSettings::default();
		let nodes = generate_nodes(&small_catalog(), &settings, &mut seeded(5));
		// nodes[0] is Alpha's hub, nodes[1..4] its satellites, nodes[5] a Beta satellite.
		assert!((settings.link_probability(&nodes[0], &nodes[1]) - 0.525).abs() < 1e-9);
		assert!((settings.link_probability(&nodes[1], &nodes[2]) - 0.35).abs() < 1e-9);
		assert!((settings.link_probability(&nodes[1], &nodes[5]) - 0.03).abs() < 1e-9);
		assert!((settings.link_probability(&nodes[4], &nodes[1]) - 0.045).abs() < 1e-9);
	}

	#[test]
	fn unlikely_draws_produce_no_edges() {
		let nodes = generate_nodes(&small_catalog(), &GeneratorSettings::default(), &mut seeded(3));
		let edges = generate_edges(&nodes, &GeneratorSettings::default(), &mut Scripted::constant(0.99));
		assert!(edges.is_empty());
	}

	#[test]
	fn seeded_generation_is_reproducible() {
		let settings = GeneratorSettings::default();
		let catalog = Catalog::standard();
		let a = generate_nodes(catalog, &settings, &mut seeded(9));
		let b = generate_nodes(catalog, &settings, &mut seeded(9));
		assert_eq!(a, b);
		assert_eq!(
			generate_edges(&a, &settings, &mut seeded(10)),
			generate_edges(&b, &settings, &mut seeded(10))
		);
	}
}
