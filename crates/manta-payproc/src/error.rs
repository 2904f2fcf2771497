use thiserror::Error;

/// Errors raised by the Payment Processor service.
#[derive(Debug, Error)]
pub enum PayProcError {
    #[error("no session for id {0}")]
    UnknownSession(String),

    #[error("directory has no destination for crypto currency {0}")]
    NoMatchingDestination(String),

    #[error(transparent)]
    Storage(#[from] manta_storage::StorageError),

    #[error(transparent)]
    Crypto(#[from] manta_crypto::CryptoError),

    #[error(transparent)]
    Broker(#[from] manta_broker::BrokerError),

    #[error(transparent)]
    Types(#[from] manta_types::TypesError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Dispatch(#[from] manta_dispatch::DispatchError),
}

impl From<PayProcError> for manta_dispatch::DispatchError {
    fn from(err: PayProcError) -> Self {
        manta_dispatch::DispatchError::Handler(err.to_string())
    }
}
