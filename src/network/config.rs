//! Runtime settings for generation, layout and storage.
//!
//! Every field has a default, so a settings document only needs to name
//! what it overrides.

use serde::{Deserialize, Serialize};

use super::error::{NetworkError, Result};
use super::generator::GeneratorSettings;
use super::layout::LayoutOptions;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
	#[serde(default)]
	pub generator: GeneratorSettings,

	#[serde(default)]
	pub layout: LayoutOptions,

	#[serde(default)]
	pub storage: StorageConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
	#[serde(default = "default_network_key")]
	pub network_key: String,

	#[serde(default = "default_settings_key")]
	pub settings_key: String,

	#[serde(default = "default_export_prefix")]
	pub export_prefix: String,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			network_key: default_network_key(),
			settings_key: default_settings_key(),
			export_prefix: default_export_prefix(),
		}
	}
}

fn default_network_key() -> String {
	"collab-graph-network".to_string()
}

fn default_settings_key() -> String {
	"collab-graph-settings".to_string()
}

fn default_export_prefix() -> String {
	"collab-graph-export".to_string()
}

/// Slider bounds for layout spacing.
pub const SPACING_RANGE: (f64, f64) = (10.0, 200.0);
pub const SPACING_STEP: f64 = 5.0;

impl NetworkConfig {
	/// Parses a (possibly partial) JSON settings document.
	pub fn from_json(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}

	fn validate(&self) -> Result<()> {
		let g = &self.generator;
		for (name, p) in [
			("same_community_probability", g.same_community_probability),
			("cross_community_probability", g.cross_community_probability),
		] {
			if !(0.0..=1.0).contains(&p) {
				return Err(NetworkError::Config(format!("{name} must be within [0, 1], got {p}")));
			}
		}
		let l = &self.layout;
		for (name, value) in [
			("community_radius", g.community_radius),
			("satellite_radius", g.satellite_radius),
			("satellite_jitter", g.satellite_jitter),
			("satellite_min_size", g.satellite_min_size),
			("satellite_max_size", g.satellite_max_size),
			("central_multiplier", g.central_multiplier),
			("cluster_radius_factor", l.cluster_radius_factor),
			("cluster_scatter_factor", l.cluster_scatter_factor),
		] {
			if !(value.is_finite() && value >= 0.0) {
				return Err(NetworkError::Config(format!(
					"{name} must be a non-negative number, got {value}"
				)));
			}
		}
		for (name, value) in [
			("generator center", (g.center_x, g.center_y)),
			("layout center", (l.center_x, l.center_y)),
		] {
			if !(value.0.is_finite() && value.1.is_finite()) {
				return Err(NetworkError::Config(format!("{name} must be finite")));
			}
		}
		if g.satellite_min_size > g.satellite_max_size {
			return Err(NetworkError::Config(
				"satellite_min_size exceeds satellite_max_size".to_string(),
			));
		}
		if !(self.layout.spacing.is_finite() && self.layout.spacing > 0.0) {
			return Err(NetworkError::Config(format!(
				"layout spacing must be positive, got {}",
				self.layout.spacing
			)));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::network::ErrorKind;

	#[test]
	fn empty_document_yields_defaults() {
		let config = NetworkConfig::from_json("{}").unwrap();
		assert_eq!(config, NetworkConfig::default());
		assert_eq!(config.layout.spacing, 50.0);
		assert_eq!(config.generator.community_radius, 400.0);
		assert_eq!(config.storage.network_key, "collab-graph-network");
	}

	#[test]
	fn partial_overrides_keep_other_defaults() {
		let config =
			NetworkConfig::from_json(r#"{"layout": {"spacing": 80}, "generator": {"cross_community_probability": 0.1}}"#)
				.unwrap();
		assert_eq!(config.layout.spacing, 80.0);
		assert_eq!(config.layout.center_x, 500.0);
		assert_eq!(config.generator.cross_community_probability, 0.1);
		assert_eq!(config.generator.same_community_probability, 0.35);
	}

	#[test]
	fn out_of_range_values_are_rejected() {
		let err = NetworkConfig::from_json(r#"{"generator": {"same_community_probability": 1.5}}"#)
			.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Format);
		assert!(NetworkConfig::from_json(r#"{"layout": {"spacing": 0}}"#).is_err());
	}

	#[rstest]
	#[case(r#"{"generator": {"central_multiplier": -1}}"#)]
	#[case(r#"{"generator": {"satellite_jitter": -5}}"#)]
	#[case(r#"{"generator": {"community_radius": -400}}"#)]
	#[case(r#"{"generator": {"satellite_min_size": -20}}"#)]
	#[case(r#"{"layout": {"cluster_radius_factor": -2}}"#)]
	#[case(r#"{"layout": {"cluster_scatter_factor": -0.5}}"#)]
	fn negative_tunables_are_rejected(#[case] json: &str) {
		let err = NetworkConfig::from_json(json).unwrap_err();
		assert!(matches!(err, NetworkError::Config(_)), "{err}");
	}

	#[test]
	fn zero_tunables_are_allowed() {
		let config = NetworkConfig::from_json(
			r#"{"generator": {"satellite_jitter": 0, "central_multiplier": 0}, "layout": {"cluster_scatter_factor": 0}}"#,
		)
		.unwrap();
		assert_eq!(config.generator.satellite_jitter, 0.0);
	}

	#[test]
	fn settings_round_trip() {
		let mut config = NetworkConfig::default();
		config.layout.spacing = 120.0;
		let back = NetworkConfig::from_json(&config.to_json().unwrap()).unwrap();
		assert_eq!(back, config);
	}
}
