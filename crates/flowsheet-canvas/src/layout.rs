//! Auto-layout adapter: canonical diagram → layout graph → repositioned
//! canonical diagram.
//!
//! The layout engine sits behind [`LayoutEngine`] so the store can run
//! against the bundled layered engine or an injected fake. Layout is a
//! cosmetic convenience: failures are absorbed and the caller always gets a
//! usable diagram back.

use flowsheet_core::{DiagramCanonical, NodeType, NozzleSide, Position};

/// Spacing between layers, along the layout direction.
pub const LAYER_SPACING: f64 = 100.0;
/// Spacing between nodes within a layer.
pub const NODE_SPACING: f64 = 80.0;

/// Node footprint used for layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDimensions {
    pub width: f64,
    pub height: f64,
}

/// Node footprint by structural category: a static table, not computed
/// from content.
pub fn node_dimensions(node_type: NodeType) -> NodeDimensions {
    match node_type {
        NodeType::Equipment => NodeDimensions {
            width: 80.0,
            height: 80.0,
        },
        NodeType::Valve | NodeType::Instrument => NodeDimensions {
            width: 60.0,
            height: 60.0,
        },
        NodeType::Fitting => NodeDimensions {
            width: 40.0,
            height: 40.0,
        },
    }
}

fn port_side(side: NozzleSide) -> beluga::PortSide {
    match side {
        NozzleSide::Left => beluga::PortSide::West,
        NozzleSide::Right => beluga::PortSide::East,
        NozzleSide::Top => beluga::PortSide::North,
        NozzleSide::Bottom => beluga::PortSide::South,
    }
}

/// Four default ports, one per side, for nodes without nozzles.
fn default_ports(node_id: &str) -> Vec<beluga::Port> {
    [
        ("left", beluga::PortSide::West),
        ("right", beluga::PortSide::East),
        ("top", beluga::PortSide::North),
        ("bottom", beluga::PortSide::South),
    ]
    .map(|(side, port_side)| beluga::Port {
        id: format!("{node_id}__{side}"),
        side: port_side,
    })
    .into()
}

const HANDLE_SIDES: [&str; 4] = ["left", "right", "top", "bottom"];

/// Resolves an edge endpoint to a layout port identifier.
///
/// Renderer handles of the form `<side>-<source|target>` translate to the
/// node's `<node id>__<side>` port; opaque nozzle ids pass through
/// unchanged; an absent port falls back to the given side.
fn resolve_port(node_id: &str, port: Option<&str>, fallback_side: &str) -> String {
    let Some(port) = port else {
        return format!("{node_id}__{fallback_side}");
    };
    match port.split_once('-') {
        Some((side, role))
            if HANDLE_SIDES.contains(&side) && matches!(role, "source" | "target") =>
        {
            format!("{node_id}__{side}")
        }
        _ => port.to_string(),
    }
}

/// Builds the layout-engine graph: sized nodes, ports from nozzles (or the
/// four defaults), edge endpoints resolved to port identifiers.
pub fn build_layout_graph(diagram: &DiagramCanonical) -> beluga::Graph {
    let nodes = diagram
        .nodes
        .iter()
        .map(|node| {
            let size = node_dimensions(node.node_type);
            let ports = if node.nozzles.is_empty() {
                default_ports(&node.id)
            } else {
                node.nozzles
                    .iter()
                    .map(|nozzle| beluga::Port {
                        id: nozzle.id.clone(),
                        side: port_side(nozzle.side),
                    })
                    .collect()
            };
            beluga::Node {
                id: node.id.clone(),
                width: size.width,
                height: size.height,
                ports,
            }
        })
        .collect();

    let edges = diagram
        .edges
        .iter()
        .map(|edge| beluga::Edge {
            id: edge.id.clone(),
            source: resolve_port(&edge.from_node, edge.from_port.as_deref(), "right"),
            target: resolve_port(&edge.to_node, edge.to_port.as_deref(), "left"),
        })
        .collect();

    beluga::Graph { nodes, edges }
}

/// The fixed algorithm configuration. The spacing constants are part of the
/// contract, not tunable per call.
pub fn layout_options() -> beluga::LayoutOptions {
    beluga::LayoutOptions {
        direction: beluga::Direction::Right,
        layer_spacing: LAYER_SPACING,
        node_spacing: NODE_SPACING,
        edge_routing: beluga::EdgeRouting::Orthogonal,
        node_placement: beluga::NodePlacement::NetworkSimplex,
        port_constraints: beluga::PortConstraints::FixedSide,
    }
}

/// Folds computed positions back into the canonical model. Nodes missing
/// from the result keep their original position.
pub fn extract_positions(
    original: &DiagramCanonical,
    result: &beluga::LayoutResult,
) -> DiagramCanonical {
    let mut updated = original.clone();
    for node in &mut updated.nodes {
        if let Some(point) = result.positions.get(&node.id) {
            node.position = Position::new(point.x, point.y);
        }
    }
    updated
}

/// Computes node positions for a prepared layout graph.
pub trait LayoutEngine {
    fn layout(
        &self,
        graph: &beluga::Graph,
        options: &beluga::LayoutOptions,
    ) -> beluga::Result<beluga::LayoutResult>;
}

/// The bundled layered engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct BelugaEngine;

impl LayoutEngine for BelugaEngine {
    fn layout(
        &self,
        graph: &beluga::Graph,
        options: &beluga::LayoutOptions,
    ) -> beluga::Result<beluga::LayoutResult> {
        beluga::layout(graph, options)
    }
}

/// Applies auto-layout and returns the repositioned diagram.
///
/// An empty diagram or an engine failure yields the original diagram
/// unchanged (logged, never surfaced). There is no timeout and no
/// cancellation; a second concurrent invocation per canvas is a caller-side
/// bug.
pub async fn apply_layout(
    diagram: &DiagramCanonical,
    engine: &dyn LayoutEngine,
) -> DiagramCanonical {
    if diagram.nodes.is_empty() {
        return diagram.clone();
    }
    let graph = build_layout_graph(diagram);
    match engine.layout(&graph, &layout_options()) {
        Ok(result) => extract_positions(diagram, &result),
        Err(err) => {
            tracing::warn!(error = %err, "auto-layout failed; keeping original positions");
            diagram.clone()
        }
    }
}
