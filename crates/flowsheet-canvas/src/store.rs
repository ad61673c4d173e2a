//! Renderer-facing canvas state.
//!
//! One `CanvasStore` per open diagram: constructed on load, discarded on
//! navigation away. Exactly one logical actor (the UI loop) mutates it, so
//! there is no interior locking; Rust's ownership rules give readers the
//! exclusivity the original design bought with copy-on-write list swaps.

use flowsheet_core::{
    CanonicalEdge, CanonicalNode, DiagramCanonical, EdgeType, NodeType, Position, next_tag,
    tag_prefix,
};
use serde_json::Value;
use uuid::Uuid;

use crate::convert::{self, ConvertMeta, DEFAULT_LOCATION};
use crate::layout::{self, BelugaEngine, LayoutEngine};
use crate::render::{
    DEFAULT_SOURCE_HANDLE, DEFAULT_TARGET_HANDLE, EDGE_KIND_SMOOTHSTEP, NodeDisplay, RenderEdge,
    RenderNode, edge_style, render_kind, symbol_key,
};

/// Incremental node deltas emitted by the canvas widget.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    Position { id: String, position: Position },
    Select { id: String, selected: bool },
    Remove { id: String },
}

/// Incremental edge deltas emitted by the canvas widget.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
}

/// A connect gesture between two node handles.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub source: String,
    pub target: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
    pub edge_type: EdgeType,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            edge_type: EdgeType::Process,
        }
    }
}

/// Parameters for dropping a new element on the canvas.
#[derive(Debug, Clone)]
pub struct NewNode {
    pub node_type: NodeType,
    pub subtype: String,
    /// Tag/symbol class when it differs from the subtype (e.g. a palette
    /// symbol id such as `vessel_vertical`).
    pub equipment_class: Option<String>,
    pub position: Position,
}

impl NewNode {
    pub fn new(node_type: NodeType, subtype: impl Into<String>, position: Position) -> Self {
        Self {
            node_type,
            subtype: subtype.into(),
            equipment_class: None,
            position,
        }
    }

    fn class(&self) -> &str {
        self.equipment_class.as_deref().unwrap_or(&self.subtype)
    }
}

pub struct CanvasStore {
    nodes: Vec<RenderNode>,
    edges: Vec<RenderEdge>,
    engine: Box<dyn LayoutEngine>,
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasStore {
    pub fn new() -> Self {
        Self::with_engine(Box::new(BelugaEngine))
    }

    pub fn with_engine(engine: Box<dyn LayoutEngine>) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            engine,
        }
    }

    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RenderEdge] {
        &self.edges
    }

    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) {
        for change in changes {
            match change {
                NodeChange::Position { id, position } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| n.id == *id) {
                        node.position = *position;
                    }
                }
                NodeChange::Select { id, selected } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| n.id == *id) {
                        node.selected = *selected;
                    }
                }
                NodeChange::Remove { id } => {
                    self.remove_node(id);
                }
            }
        }
    }

    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        for change in changes {
            match change {
                EdgeChange::Select { id, selected } => {
                    if let Some(edge) = self.edges.iter_mut().find(|e| e.id == *id) {
                        edge.selected = *selected;
                    }
                }
                EdgeChange::Remove { id } => {
                    self.remove_edge(id);
                }
            }
        }
    }

    /// Materializes a connect gesture into an edge with a fresh id and the
    /// default style for its type. Returns the new edge id.
    pub fn connect(&mut self, connection: Connection) -> String {
        let id = Uuid::new_v4().to_string();
        let mut payload = CanonicalEdge::new(
            connection.edge_type,
            connection.source.clone(),
            connection.target.clone(),
        );
        payload.id = id.clone();
        payload.from_port = connection.source_handle.clone();
        payload.to_port = connection.target_handle.clone();

        self.edges.push(RenderEdge {
            id: id.clone(),
            kind: EDGE_KIND_SMOOTHSTEP.to_string(),
            source: connection.source,
            source_handle: connection
                .source_handle
                .unwrap_or_else(|| DEFAULT_SOURCE_HANDLE.to_string()),
            target: connection.target,
            target_handle: connection
                .target_handle
                .unwrap_or_else(|| DEFAULT_TARGET_HANDLE.to_string()),
            label: None,
            selected: false,
            style: edge_style(connection.edge_type),
            payload,
        });
        id
    }

    /// Drops a new node on the canvas: generated id, sequential tag, render
    /// kind per structural category. Returns the new node id.
    pub fn add_node(&mut self, new: NewNode) -> String {
        let tag = next_tag(
            tag_prefix(new.class()),
            self.nodes.iter().map(|n| n.payload.tag.as_str()),
        );

        let mut payload = CanonicalNode::new(new.node_type, new.subtype.clone(), new.position);
        payload.tag = tag.clone();
        let id = payload.id.clone();

        self.nodes.push(RenderNode {
            id: id.clone(),
            kind: render_kind(new.node_type).to_string(),
            position: new.position,
            selected: false,
            dragging: false,
            measured: None,
            display: NodeDisplay {
                symbol: symbol_key(new.class()).to_string(),
                label: tag,
                location: DEFAULT_LOCATION.to_string(),
                description: String::new(),
            },
            payload,
        });
        id
    }

    /// Applies an in-place update to one node. Returns whether it exists.
    pub fn update_node(&mut self, id: &str, update: impl FnOnce(&mut RenderNode)) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                update(node);
                true
            }
            None => false,
        }
    }

    /// Removes a node and every edge referencing it as source or target.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges.retain(|e| e.source != id && e.target != id);
        true
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        self.edges.len() != before
    }

    /// Replaces the canvas contents with a canonical document.
    pub fn load_canonical(&mut self, diagram: &DiagramCanonical) {
        let (nodes, edges) = convert::to_render(diagram);
        self.nodes = nodes;
        self.edges = edges;
    }

    /// Like [`CanvasStore::load_canonical`], from raw JSON. A malformed
    /// document is logged and the canvas is left unchanged.
    pub fn load_canonical_value(&mut self, value: &Value) {
        match DiagramCanonical::from_value(value) {
            Ok(diagram) => self.load_canonical(&diagram),
            Err(err) => {
                tracing::error!(error = %err, "load_canonical: invalid canonical diagram");
            }
        }
    }

    /// Converts the current canvas contents back into a canonical document.
    pub fn to_canonical(&self, meta: &ConvertMeta) -> DiagramCanonical {
        convert::to_canonical(&self.nodes, &self.edges, meta)
    }

    /// Runs auto-layout over the current contents and reloads the result.
    /// Failures degrade to leaving every position as-is.
    pub async fn apply_auto_layout(&mut self, meta: &ConvertMeta) {
        let current = self.to_canonical(meta);
        if current.nodes.is_empty() {
            return;
        }
        let positioned = layout::apply_layout(&current, self.engine.as_ref()).await;
        self.load_canonical(&positioned);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
