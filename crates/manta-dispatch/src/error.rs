use thiserror::Error;

/// Errors raised while building or running a [`crate::Dispatcher`].
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid topic pattern {0}: {1}")]
    InvalidPattern(String, String),

    #[error("handler failed: {0}")]
    Handler(String),
}
