use thiserror::Error;

/// Errors raised by a [`crate::BrokerClient`] adapter.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("not connected to broker")]
    NotConnected,

    #[error("failed to connect: {0}")]
    Connect(String),

    #[error("failed to publish to {topic}: {source}")]
    Publish {
        topic: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to subscribe to {topic}: {source}")]
    Subscribe {
        topic: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
