//! Renderer-facing node/edge shapes.
//!
//! A render node is a product of renderer fields and the full canonical
//! payload, so the inverse adapter has a statically guaranteed source of
//! truth instead of optional lookups in a loose data bag.

use flowsheet_core::{CanonicalEdge, CanonicalNode, EdgeType, NodeType, Position};
use serde::{Deserialize, Serialize};

/// Handle used for edge sources when no port is given.
pub const DEFAULT_SOURCE_HANDLE: &str = "right-source";
/// Handle used for edge targets when no port is given.
pub const DEFAULT_TARGET_HANDLE: &str = "left-target";

/// Edge curve type understood by the renderer.
pub const EDGE_KIND_SMOOTHSTEP: &str = "smoothstep";

/// Renderer node-type tag. Equipment, valves and instruments share the one
/// generic symbolic node component; fittings have their own.
pub fn render_kind(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Equipment | NodeType::Valve | NodeType::Instrument => "pid",
        NodeType::Fitting => "fitting",
    }
}

/// Resolves the visual symbol key for a subtype. A few subtypes draw a
/// symbol that differs from their own name.
pub fn symbol_key(subtype: &str) -> &str {
    match subtype {
        "vessel" => "vessel_vertical",
        "indicator_controller" => "field_mounted",
        other => other,
    }
}

/// Display-only fields derived from the canonical node at conversion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplay {
    /// Resolved symbol key (subtype remapped through [`symbol_key`]).
    pub symbol: String,
    /// Tag, falling back to the subtype for untagged nodes.
    pub label: String,
    pub location: String,
    pub description: String,
}

/// Dimensions reported back by the renderer after measuring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measured {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: String,
    /// Renderer node-type tag (see [`render_kind`]).
    pub kind: String,
    pub position: Position,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub dragging: bool,
    #[serde(default)]
    pub measured: Option<Measured>,
    pub display: NodeDisplay,
    /// Full canonical node. Everything not needed for display rides along so
    /// that converting back is lossless.
    pub payload: CanonicalNode,
}

impl RenderNode {
    /// Node created directly on the canvas, with no domain data yet. The
    /// payload starts from sane defaults: equipment, `unknown` subtype,
    /// tag taken from the label.
    pub fn from_canvas(
        id: impl Into<String>,
        position: Position,
        label: impl Into<String>,
    ) -> Self {
        let id = id.into();
        let label = label.into();
        let mut payload = CanonicalNode::new(NodeType::Equipment, "unknown", position);
        payload.id = id.clone();
        payload.tag = label.clone();
        Self {
            id,
            kind: render_kind(NodeType::Equipment).to_string(),
            position,
            selected: false,
            dragging: false,
            measured: None,
            display: NodeDisplay {
                symbol: symbol_key("unknown").to_string(),
                label,
                location: "field".to_string(),
                description: String::new(),
            },
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default)]
    pub dash_array: Option<String>,
}

/// Stroke style per edge type. Signal lines are dashed by construction, so
/// no render-time override can disagree with the table.
pub fn edge_style(edge_type: EdgeType) -> EdgeStyle {
    match edge_type {
        EdgeType::Process => EdgeStyle {
            stroke: "#000".to_string(),
            stroke_width: 2.0,
            dash_array: None,
        },
        EdgeType::Utility => EdgeStyle {
            stroke: "#000".to_string(),
            stroke_width: 1.5,
            dash_array: Some("6 3".to_string()),
        },
        EdgeType::SignalElectrical | EdgeType::SignalPneumatic => EdgeStyle {
            stroke: "#888".to_string(),
            stroke_width: 1.0,
            dash_array: Some("2 2".to_string()),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub id: String,
    /// Renderer edge curve type (see [`EDGE_KIND_SMOOTHSTEP`]).
    pub kind: String,
    pub source: String,
    pub source_handle: String,
    pub target: String,
    pub target_handle: String,
    /// Visible label; the line number when one is set.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub selected: bool,
    pub style: EdgeStyle,
    /// Full canonical edge, for lossless conversion back.
    pub payload: CanonicalEdge,
}
