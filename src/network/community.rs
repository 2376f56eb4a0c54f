//! The fixed set of stakeholder communities every graph is partitioned into.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::error::{NetworkError, Result};

/// A named, colored partition of nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Community {
	pub name: String,
	pub color: String,
	/// Satellite nodes generated for this community.
	pub count: usize,
}

impl Community {
	pub fn new(name: impl Into<String>, color: impl Into<String>, count: usize) -> Self {
		Self {
			name: name.into(),
			color: color.into(),
			count,
		}
	}
}

/// Ordered, immutable list of communities. A community's identity is its
/// position in the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
	communities: Vec<Community>,
}

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| {
	Catalog::new(vec![
		Community::new("Compliance Office", "#6366f1", 14),
		Community::new("Legal & Regulatory", "#0ea5e9", 12),
		Community::new("Risk Management", "#f97316", 16),
		Community::new("Internal Audit", "#10b981", 10),
		Community::new("Operations", "#e11d48", 18),
		Community::new("External Partners", "#a855f7", 12),
	])
});

impl Catalog {
	pub fn new(communities: Vec<Community>) -> Self {
		Self { communities }
	}

	/// The process-wide catalog used by the application.
	pub fn standard() -> &'static Catalog {
		&STANDARD
	}

	pub fn len(&self) -> usize {
		self.communities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.communities.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Community> {
		self.communities.iter()
	}

	/// Looks up a community, failing with
	/// [`NetworkError::CommunityOutOfRange`] for an unknown index.
	pub fn get(&self, index: usize) -> Result<&Community> {
		self.communities
			.get(index)
			.ok_or(NetworkError::CommunityOutOfRange {
				index,
				len: self.communities.len(),
			})
	}

	pub fn contains(&self, index: usize) -> bool {
		index < self.communities.len()
	}
}
