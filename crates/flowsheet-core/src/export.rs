use crate::error::Result;
use crate::model::DiagramCanonical;

/// A downloadable rendition of a diagram document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Serializes the canonical document as pretty-printed JSON, named after the
/// diagram (`<name>.json`).
pub fn export_diagram(diagram: &DiagramCanonical) -> Result<ExportFile> {
    Ok(ExportFile {
        file_name: format!("{}.json", diagram.name),
        contents: serde_json::to_string_pretty(diagram)?,
    })
}
