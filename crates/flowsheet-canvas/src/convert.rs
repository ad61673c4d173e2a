//! Canonical ↔ render adapters.
//!
//! `to_render` expands the canonical document into renderer-consumable
//! shapes and attaches derived display fields; `to_canonical` strips
//! renderer-only state and reconstructs the domain shape from the attached
//! payload. Both are pure; neither validates referential integrity (that is
//! the validation backend's job).

use flowsheet_core::{
    CANONICAL_SCHEMA_VERSION, CanonicalEdge, CanonicalMetadata, CanonicalNode, DiagramCanonical,
    DiagramType,
};

use crate::render::{
    DEFAULT_SOURCE_HANDLE, DEFAULT_TARGET_HANDLE, EDGE_KIND_SMOOTHSTEP, NodeDisplay, RenderEdge,
    RenderNode, edge_style, render_kind, symbol_key,
};

/// Location used when a node does not say where it lives.
pub const DEFAULT_LOCATION: &str = "field";

/// Document-level fields for [`to_canonical`]; the render lists only carry
/// nodes and edges.
#[derive(Debug, Clone, Default)]
pub struct ConvertMeta {
    pub id: Option<String>,
    pub name: String,
    pub diagram_type: DiagramType,
    pub project_id: Option<String>,
    /// Metadata is empty unless explicitly supplied.
    pub metadata: Option<CanonicalMetadata>,
}

impl ConvertMeta {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Expands a canonical document into render node/edge lists.
pub fn to_render(diagram: &DiagramCanonical) -> (Vec<RenderNode>, Vec<RenderEdge>) {
    (
        diagram.nodes.iter().map(node_to_render).collect(),
        diagram.edges.iter().map(edge_to_render).collect(),
    )
}

/// Reconstructs the canonical document from render lists.
pub fn to_canonical(
    nodes: &[RenderNode],
    edges: &[RenderEdge],
    meta: &ConvertMeta,
) -> DiagramCanonical {
    DiagramCanonical {
        canonical_schema_version: CANONICAL_SCHEMA_VERSION,
        id: meta.id.clone(),
        name: meta.name.clone(),
        diagram_type: meta.diagram_type,
        project_id: meta.project_id.clone(),
        metadata: meta.metadata.clone().unwrap_or_default(),
        nodes: nodes.iter().map(node_to_canonical).collect(),
        edges: edges.iter().map(edge_to_canonical).collect(),
    }
}

fn node_to_render(node: &CanonicalNode) -> RenderNode {
    let label = if node.tag.is_empty() {
        node.subtype.clone()
    } else {
        node.tag.clone()
    };
    RenderNode {
        id: node.id.clone(),
        kind: render_kind(node.node_type).to_string(),
        position: node.position,
        selected: false,
        dragging: false,
        measured: None,
        display: NodeDisplay {
            symbol: symbol_key(&node.subtype).to_string(),
            label,
            location: node
                .location
                .clone()
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            description: node.description.clone().unwrap_or_default(),
        },
        payload: node.clone(),
    }
}

fn edge_to_render(edge: &CanonicalEdge) -> RenderEdge {
    RenderEdge {
        id: edge.id.clone(),
        kind: EDGE_KIND_SMOOTHSTEP.to_string(),
        source: edge.from_node.clone(),
        source_handle: edge
            .from_port
            .clone()
            .unwrap_or_else(|| DEFAULT_SOURCE_HANDLE.to_string()),
        target: edge.to_node.clone(),
        target_handle: edge
            .to_port
            .clone()
            .unwrap_or_else(|| DEFAULT_TARGET_HANDLE.to_string()),
        label: edge.line_number.clone().filter(|l| !l.is_empty()),
        selected: false,
        style: edge_style(edge.edge_type),
        payload: edge.clone(),
    }
}

fn node_to_canonical(node: &RenderNode) -> CanonicalNode {
    let payload = &node.payload;
    CanonicalNode {
        id: node.id.clone(),
        node_type: payload.node_type,
        subtype: payload.subtype.clone(),
        tag: payload.tag.clone(),
        name: payload.name.clone(),
        // Explicit user-entered description only; the display symbol key is
        // never a fallback.
        description: Some(payload.description.clone().unwrap_or_default()),
        location: Some(
            payload
                .location
                .clone()
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        ),
        // Position is live render state; the payload copy may be stale after
        // a drag.
        position: node.position,
        properties: payload.properties.clone(),
        nozzles: payload.nozzles.clone(),
    }
}

fn edge_to_canonical(edge: &RenderEdge) -> CanonicalEdge {
    let payload = &edge.payload;
    CanonicalEdge {
        id: edge.id.clone(),
        edge_type: payload.edge_type,
        from_node: edge.source.clone(),
        from_port: non_empty(&edge.source_handle),
        to_node: edge.target.clone(),
        to_port: non_empty(&edge.target_handle),
        line_number: edge
            .label
            .clone()
            .filter(|l| !l.is_empty())
            .or_else(|| payload.line_number.clone()),
        pipe_size: payload.pipe_size.clone(),
        pipe_class: payload.pipe_class.clone(),
        insulation: if payload.insulation.is_empty() {
            "N".to_string()
        } else {
            payload.insulation.clone()
        },
        properties: payload.properties.clone(),
        waypoints: payload.waypoints.clone(),
    }
}

fn non_empty(handle: &str) -> Option<String> {
    (!handle.is_empty()).then(|| handle.to_string())
}
