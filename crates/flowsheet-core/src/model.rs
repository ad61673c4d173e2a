//! Canonical diagram model.
//!
//! These types are the persistence and interchange representation of a
//! flowsheet: no renderer-specific fields, stable field names, deterministic
//! serialization (open bags are order-preserving maps).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Schema version written by this build. Consumers must check the version
/// before interpreting the rest of the document.
pub const CANONICAL_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NozzleSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// A named connection point on a node: anchored to one side, at a fraction
/// of that side's length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nozzle {
    pub id: String,
    pub label: String,
    pub side: NozzleSide,
    #[serde(default = "default_nozzle_offset")]
    pub offset: f64,
}

fn default_nozzle_offset() -> f64 {
    0.5
}

/// Structural category of a process element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Equipment,
    Valve,
    Instrument,
    Fitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    #[default]
    Process,
    Utility,
    SignalElectrical,
    SignalPneumatic,
}

impl EdgeType {
    /// Signal lines (electrical or pneumatic) share rendering conventions.
    pub fn is_signal(self) -> bool {
        matches!(self, Self::SignalElectrical | Self::SignalPneumatic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramType {
    Pfd,
    #[default]
    Pid,
    Bfd,
}

/// Property-bag value: a small closed set of scalars keeps serialization and
/// equality well-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

pub type Properties = IndexMap<String, PropertyValue>;

/// A process element: pump, valve, instrument bubble, fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Finer classification (e.g. `centrifugal_pump`, `gate_valve`); drives
    /// the visual symbol and the tag prefix.
    pub subtype: String,
    /// Human-readable sequential identifier (e.g. `P-101`). Assigned by the
    /// tag service, changed only by explicit rename.
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub position: Position,
    #[serde(default)]
    pub properties: Properties,
    /// Empty means the node exposes four default ports, one per side, at
    /// layout time.
    #[serde(default)]
    pub nozzles: Vec<Nozzle>,
}

impl CanonicalNode {
    /// New untagged node with a generated id.
    pub fn new(node_type: NodeType, subtype: impl Into<String>, position: Position) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            node_type,
            subtype: subtype.into(),
            tag: String::new(),
            name: None,
            description: None,
            location: None,
            position,
            properties: Properties::default(),
            nozzles: Vec::new(),
        }
    }
}

/// A typed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEdge {
    pub id: String,
    #[serde(rename = "type", default)]
    pub edge_type: EdgeType,
    pub from_node: String,
    /// Nozzle id or renderer handle identifier.
    #[serde(default)]
    pub from_port: Option<String>,
    pub to_node: String,
    #[serde(default)]
    pub to_port: Option<String>,
    /// Pipe line number (e.g. `6"-PLA-001-A2A`).
    #[serde(default)]
    pub line_number: Option<String>,
    #[serde(default)]
    pub pipe_size: Option<String>,
    #[serde(default)]
    pub pipe_class: Option<String>,
    /// Insulation code; `"N"` means none.
    #[serde(default = "default_insulation")]
    pub insulation: String,
    #[serde(default)]
    pub properties: Properties,
    /// Intermediate points for manual routing; empty means auto-routed.
    #[serde(default)]
    pub waypoints: Vec<Position>,
}

fn default_insulation() -> String {
    "N".to_string()
}

impl CanonicalEdge {
    /// New edge with a generated id and default pipe metadata.
    pub fn new(
        edge_type: EdgeType,
        from_node: impl Into<String>,
        to_node: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            edge_type,
            from_node: from_node.into(),
            from_port: None,
            to_node: to_node.into(),
            to_port: None,
            line_number: None,
            pipe_size: None,
            pipe_class: None,
            insulation: default_insulation(),
            properties: Properties::default(),
            waypoints: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(flatten)]
    pub extra: Properties,
}

/// The full diagram document. Created when a diagram is loaded or started,
/// replaced wholesale on load, discarded on navigation away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramCanonical {
    #[serde(default = "default_schema_version")]
    pub canonical_schema_version: u32,
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub diagram_type: DiagramType,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub metadata: CanonicalMetadata,
    #[serde(default)]
    pub nodes: Vec<CanonicalNode>,
    #[serde(default)]
    pub edges: Vec<CanonicalEdge>,
}

fn default_schema_version() -> u32 {
    CANONICAL_SCHEMA_VERSION
}

impl DiagramCanonical {
    /// New empty diagram with a generated id.
    pub fn new(name: impl Into<String>, diagram_type: DiagramType) -> Self {
        Self {
            canonical_schema_version: CANONICAL_SCHEMA_VERSION,
            id: Some(Uuid::new_v4().to_string()),
            name: name.into(),
            diagram_type,
            project_id: None,
            metadata: CanonicalMetadata::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Decodes a document from JSON, checking the schema version before
    /// interpreting the rest of the structure.
    pub fn from_value(value: &Value) -> Result<Self> {
        if let Some(version) = value.get("canonical_schema_version") {
            let found = version.as_u64().ok_or_else(|| Error::MalformedDiagram {
                message: "canonical_schema_version is not an integer".to_string(),
            })?;
            if found != u64::from(CANONICAL_SCHEMA_VERSION) {
                return Err(Error::UnsupportedSchemaVersion {
                    found,
                    expected: CANONICAL_SCHEMA_VERSION,
                });
            }
        }
        serde_json::from_value(value.clone()).map_err(|err| Error::MalformedDiagram {
            message: err.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn node_by_id(&self, node_id: &str) -> Option<&CanonicalNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn edges_from(&self, node_id: &str) -> impl Iterator<Item = &CanonicalEdge> {
        self.edges.iter().filter(move |e| e.from_node == node_id)
    }

    pub fn edges_to(&self, node_id: &str) -> impl Iterator<Item = &CanonicalEdge> {
        self.edges.iter().filter(move |e| e.to_node == node_id)
    }

    /// Nodes directly downstream of `node_id`.
    pub fn downstream_nodes(&self, node_id: &str) -> Vec<&CanonicalNode> {
        self.edges_from(node_id)
            .filter_map(|e| self.node_by_id(&e.to_node))
            .collect()
    }

    /// Nodes directly upstream of `node_id`.
    pub fn upstream_nodes(&self, node_id: &str) -> Vec<&CanonicalNode> {
        self.edges_to(node_id)
            .filter_map(|e| self.node_by_id(&e.from_node))
            .collect()
    }

    /// Removes a node and every edge referencing it as source or target.
    /// Returns whether the node existed.
    pub fn remove_node(&mut self, node_id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != node_id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges
            .retain(|e| e.from_node != node_id && e.to_node != node_id);
        true
    }
}
