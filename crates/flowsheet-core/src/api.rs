//! Boundary contracts for the backend services (validation, template
//! generation, auto-repair, persistence).
//!
//! Only the request/response shapes live here; the services themselves are
//! external collaborators. All calls are fire-once: failures surface to the
//! caller as rejected operations and the core never retries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{DiagramCanonical, DiagramType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub diagram: DiagramCanonical,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruleset_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_code: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub edge_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub error_count: u32,
    pub warning_count: u32,
    #[serde(default)]
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRequest {
    pub template_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub diagram: DiagramCanonical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairRequest {
    pub diagram: DiagramCanonical,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairResponse {
    pub diagram: DiagramCanonical,
    #[serde(default)]
    pub repairs: Vec<Value>,
    #[serde(default)]
    pub remaining_violations: Vec<Violation>,
}

/// Persisted diagram row. `version` increments server-side on every save;
/// the core never computes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramRecord {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub diagram_type: DiagramType,
    pub version: i32,
    pub status: String,
    pub canonical_json: DiagramCanonical,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
