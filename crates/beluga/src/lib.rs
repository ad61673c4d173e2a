#![forbid(unsafe_code)]

//! Headless layered graph layout with fixed-side ports.
//!
//! `beluga` computes node positions for directed graphs whose nodes carry a
//! size and a set of side-anchored ports. Edges reference ports (or nodes)
//! by id. The result is a map from node id to top-left coordinates; edge
//! routing is left to the consumer.
//!
//! The pipeline is the classic layered one: cycle breaking, longest-path
//! ranking, barycenter ordering, coordinate assignment. It is deterministic
//! and performs no I/O.

pub mod algo;
pub mod error;
pub mod graph;

pub use error::{Error, Result};
pub use graph::{
    Direction, Edge, EdgeRouting, Graph, LayoutOptions, LayoutResult, Node, NodePlacement, Point,
    Port, PortConstraints, PortSide,
};

/// Headless layout entry point.
pub fn layout(graph: &Graph, options: &LayoutOptions) -> Result<LayoutResult> {
    algo::layered(graph, options)
}
