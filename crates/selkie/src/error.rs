use thiserror::Error;

/// Errors surfaced at the JSON boundary. The layout engine itself never fails: malformed
/// references inside an already-parsed input are normalized away instead of reported.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid layout input: {message}")]
    InvalidModel { message: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
