pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported canonical schema version: {found} (this build reads version {expected})")]
    UnsupportedSchemaVersion { found: u64, expected: u32 },

    #[error("malformed canonical diagram: {message}")]
    MalformedDiagram { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
