#![forbid(unsafe_code)]

//! Canonical P&ID flowsheet model + domain services (headless).
//!
//! Design goals:
//! - a renderer-free canonical diagram representation that is what gets
//!   persisted, validated and exchanged with backend services
//! - pure, deterministic domain services (tag issuing, export)
//! - typed boundary contracts for the validation / template / repair
//!   services instead of loose JSON bags

pub mod api;
pub mod error;
pub mod export;
pub mod model;
pub mod tag;

pub use error::{Error, Result};
pub use export::{ExportFile, export_diagram};
pub use model::{
    CANONICAL_SCHEMA_VERSION, CanonicalEdge, CanonicalMetadata, CanonicalNode, DiagramCanonical,
    DiagramType, EdgeType, NodeType, Nozzle, NozzleSide, Position, Properties, PropertyValue,
};
pub use tag::{generate_tag, next_tag, tag_prefix};
