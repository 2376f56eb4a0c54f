//! Stakeholder network core: generation, layout, filtering and edits.
//!
//! Nothing in here touches the browser. The Leptos components drive these
//! functions and render whatever they return.

pub mod community;
pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod graph;
pub mod layout;
pub mod persistence;
pub mod random;
pub mod style;
pub mod types;

pub use community::{Catalog, Community};
pub use config::NetworkConfig;
pub use error::{ErrorKind, NetworkError};
pub use filter::{ViewSelection, VisibleSubgraph, project};
pub use generator::GeneratorSettings;
pub use graph::{CommunityStats, Graph, NodeInput};
pub use layout::{LayoutKind, LayoutOptions, apply_layout};
pub use random::RandomSource;
pub use types::{Edge, EdgeKind, EdgeStyle, Node, NodeStyle, Position};
