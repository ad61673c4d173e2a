//! Canonical-only state holder.
//!
//! The renderer-free sibling of [`crate::store::CanvasStore`]: the same
//! conceptual operations expressed directly over the canonical model, for
//! callers that never touch render types. The two stores are alternative
//! integration points, not cooperating peers; nothing keeps them in sync.

use flowsheet_core::{CanonicalNode, DiagramCanonical, generate_tag};

use crate::layout::{self, BelugaEngine, LayoutEngine};
use crate::store::NewNode;

pub struct DomainStore {
    canonical: Option<DiagramCanonical>,
    engine: Box<dyn LayoutEngine>,
}

impl Default for DomainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainStore {
    pub fn new() -> Self {
        Self::with_engine(Box::new(BelugaEngine))
    }

    pub fn with_engine(engine: Box<dyn LayoutEngine>) -> Self {
        Self {
            canonical: None,
            engine,
        }
    }

    /// Replaces the document wholesale (load from persistence, template
    /// generation).
    pub fn set_canonical(&mut self, diagram: DiagramCanonical) {
        self.canonical = Some(diagram);
    }

    pub fn canonical(&self) -> Option<&DiagramCanonical> {
        self.canonical.as_ref()
    }

    pub fn take_canonical(&mut self) -> Option<DiagramCanonical> {
        self.canonical.take()
    }

    /// Adds a node with a generated id and a sequential tag. Returns the new
    /// node id, or `None` when no document is loaded.
    pub fn add_node(&mut self, new: NewNode) -> Option<String> {
        let diagram = self.canonical.as_mut()?;
        let class = new
            .equipment_class
            .clone()
            .unwrap_or_else(|| new.subtype.clone());
        let tag = generate_tag(&class, &diagram.nodes);

        let mut node = CanonicalNode::new(new.node_type, new.subtype, new.position);
        node.tag = tag;
        let id = node.id.clone();
        diagram.nodes.push(node);
        Some(id)
    }

    /// Removes a node and its referencing edges.
    pub fn remove_node(&mut self, node_id: &str) -> bool {
        match self.canonical.as_mut() {
            Some(diagram) => diagram.remove_node(node_id),
            None => false,
        }
    }

    /// Runs auto-layout over the document and stores the repositioned
    /// result, which is also returned. `None` when no document is loaded.
    pub async fn apply_layout(&mut self) -> Option<DiagramCanonical> {
        let current = self.canonical.clone()?;
        let positioned = layout::apply_layout(&current, self.engine.as_ref()).await;
        self.canonical = Some(positioned.clone());
        Some(positioned)
    }

    /// Empties the diagram contents, keeping the document shell.
    pub fn clear(&mut self) {
        if let Some(diagram) = self.canonical.as_mut() {
            diagram.nodes.clear();
            diagram.edges.clear();
        }
    }
}
