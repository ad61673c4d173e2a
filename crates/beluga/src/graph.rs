use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Resolves an edge endpoint to the id of the node that owns it.
    ///
    /// Accepted endpoint forms, in resolution order: a declared port id, a
    /// node id, or a `<node id>__<side>` port name for an existing node.
    pub fn resolve_endpoint(&self, endpoint: &str) -> Option<&str> {
        for node in &self.nodes {
            if node.ports.iter().any(|p| p.id == endpoint) {
                return Some(node.id.as_str());
            }
        }
        if let Some(node) = self.nodes.iter().find(|n| n.id == endpoint) {
            return Some(node.id.as_str());
        }
        let (node_id, _side) = endpoint.rsplit_once("__")?;
        self.nodes
            .iter()
            .find(|n| n.id == node_id)
            .map(|n| n.id.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        for e in &self.edges {
            for endpoint in [e.source.as_str(), e.target.as_str()] {
                if self.resolve_endpoint(endpoint).is_none() {
                    return Err(Error::UnknownEndpoint {
                        edge_id: e.id.clone(),
                        endpoint: endpoint.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub ports: Vec<Port>,
}

#[derive(Debug, Clone)]
pub struct Port {
    pub id: String,
    pub side: PortSide,
}

/// Cardinal port side, in the ELK convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSide {
    North,
    South,
    East,
    West,
}

/// An edge between two endpoints; each endpoint is a port id, a node id, or
/// a `<node id>__<side>` port name (see [`Graph::resolve_endpoint`]).
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Right,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeRouting {
    #[default]
    Orthogonal,
    Polyline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodePlacement {
    /// Stacked placement refined by aligning nodes with the barycenter of
    /// their predecessors.
    #[default]
    NetworkSimplex,
    /// Plain stacked placement within each layer.
    Stacked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortConstraints {
    #[default]
    Free,
    /// Ports stay on their declared side.
    FixedSide,
}

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub direction: Direction,
    /// Spacing between adjacent layers, along the layout direction.
    pub layer_spacing: f64,
    /// Spacing between adjacent nodes within a layer.
    pub node_spacing: f64,
    pub edge_routing: EdgeRouting,
    pub node_placement: NodePlacement,
    pub port_constraints: PortConstraints,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Right,
            layer_spacing: 50.0,
            node_spacing: 50.0,
            edge_routing: EdgeRouting::default(),
            node_placement: NodePlacement::default(),
            port_constraints: PortConstraints::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Top-left node coordinates keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    pub positions: std::collections::BTreeMap<String, Point>,
}
