#![forbid(unsafe_code)]

//! Canvas state, canonical↔render adapters and auto-layout for flowsheet
//! diagrams.
//!
//! The canvas widget itself is an external collaborator: it consumes the
//! render-shaped node/edge lists held by [`store::CanvasStore`] and emits
//! change events back. Everything here stays deterministic and
//! runtime-agnostic; the only async surface is the layout invocation, which
//! wraps synchronous CPU-bound work.

pub mod convert;
pub mod domain;
pub mod layout;
pub mod render;
pub mod store;

pub use convert::{ConvertMeta, to_canonical, to_render};
pub use domain::DomainStore;
pub use layout::{
    BelugaEngine, LayoutEngine, NodeDimensions, apply_layout, build_layout_graph,
    extract_positions, layout_options, node_dimensions,
};
pub use render::{
    EdgeStyle, Measured, NodeDisplay, RenderEdge, RenderNode, edge_style, render_kind, symbol_key,
};
pub use store::{CanvasStore, Connection, EdgeChange, NewNode, NodeChange};

#[cfg(test)]
mod tests;
