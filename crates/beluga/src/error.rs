#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph contains an edge with an unresolvable endpoint: {edge_id} -> {endpoint}")]
    UnknownEndpoint { edge_id: String, endpoint: String },
}

pub type Result<T> = std::result::Result<T, Error>;
