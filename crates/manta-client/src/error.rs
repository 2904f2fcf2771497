use thiserror::Error;

/// Errors raised by the POS (`Store`) and `Wallet` client state machines.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The Payment Processor did not respond within the expected window.
    /// Kept distinct from every other variant so callers can retry on it
    /// specifically.
    #[error("timed out waiting for a response from the payment processor")]
    Timeout,

    #[error("order was rejected: {0}")]
    OrderRejected(String),

    #[error(transparent)]
    Broker(#[from] manta_broker::BrokerError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Types(#[from] manta_types::TypesError),
}
