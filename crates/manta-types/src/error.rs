use thiserror::Error;

/// Errors raised while building or parsing Manta wire types.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid manta:// url: {0}")]
    UrlParse(String),

    #[error("json encode/decode failed: {0}")]
    Json(#[from] serde_json::Error),
}
