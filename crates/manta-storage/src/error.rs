use thiserror::Error;

/// Errors raised by a [`crate::TransactionStorage`] implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no transaction state for session {0}")]
    SessionNotFound(String),

    #[error("no transaction state for txid {0}")]
    TxidNotFound(String),

    #[error("txid {0} already exists")]
    AlreadyExists(String),
}
