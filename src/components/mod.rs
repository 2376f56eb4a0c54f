pub mod edge_form;
pub mod filter;
pub mod force_graph;
pub mod layout_controls;
pub mod node_detail;
pub mod node_form;
pub mod persistence_controls;
pub mod sidebar;
