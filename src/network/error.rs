use thiserror::Error;

/// Coarse classification of a [`NetworkError`], stable for callers that
/// only care which kind of failure happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
	/// Malformed input: bad community index, empty label, self loop.
	Validation,
	/// An operation referenced a node or edge id that does not exist.
	NotFound,
	/// Create-edge on an ordered pair that is already connected.
	DuplicateEdge,
	/// Persisted or configured data could not be decoded.
	Format,
}

/// Errors produced by the network core.
#[derive(Debug, Error)]
pub enum NetworkError {
	/// Community index outside the catalog.
	#[error("community {index} is out of range (catalog has {len})")]
	CommunityOutOfRange {
		/// Offending index.
		index: usize,
		/// Catalog length.
		len: usize,
	},
	/// Node label was empty after trimming.
	#[error("node label must not be empty")]
	EmptyLabel,
	/// An edge would connect a node to itself.
	#[error("cannot link node {0} to itself")]
	SelfLoop(String),
	/// No node with this id.
	#[error("node {0} not found")]
	NodeNotFound(String),
	/// No edge with this id.
	#[error("edge {0} not found")]
	EdgeNotFound(String),
	/// An edge already connects this ordered pair.
	#[error("an edge from {from} to {to} already exists")]
	DuplicateEdge {
		/// Source node id.
		from: String,
		/// Target node id.
		to: String,
	},
	/// A decoded edge references a node that is not in the document.
	#[error("edge {edge} references missing node {node}")]
	DanglingEdge {
		/// Edge id.
		edge: String,
		/// Missing endpoint id.
		node: String,
	},
	/// A decoded document repeats a node or edge id.
	#[error("duplicate id {0}")]
	DuplicateId(String),
	/// A decoded node or edge breaks a graph rule.
	#[error("{id} is invalid: {reason}")]
	InvalidRecord {
		/// Node or edge id.
		id: String,
		/// What is wrong with it.
		reason: String,
	},
	/// The id counter has no room left.
	#[error("no {0} ids left to allocate")]
	IdsExhausted(&'static str),
	/// JSON could not be parsed or lacked the expected shape.
	#[error("invalid network data format: {0}")]
	Json(#[from] serde_json::Error),
	/// Configuration document was rejected.
	#[error("invalid configuration: {0}")]
	Config(String),
}

impl NetworkError {
	/// Which kind of failure this is.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::CommunityOutOfRange { .. }
			| Self::EmptyLabel
			| Self::SelfLoop(_)
			| Self::IdsExhausted(_) => {
				ErrorKind::Validation
			}
			Self::NodeNotFound(_) | Self::EdgeNotFound(_) => ErrorKind::NotFound,
			Self::DuplicateEdge { .. } => ErrorKind::DuplicateEdge,
			Self::DanglingEdge { .. }
			| Self::DuplicateId(_)
			| Self::InvalidRecord { .. }
			| Self::Json(_)
			| Self::Config(_) => {
				ErrorKind::Format
			}
		}
	}
}

/// Result alias used throughout the core.
pub type Result<T, E = NetworkError> = std::result::Result<T, E>;
