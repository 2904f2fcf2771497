use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::{BrokerError, BrokerMessage, Qos};

/// A stream of messages delivered on topics this client has subscribed to.
pub type BrokerStream = BoxStream<'static, BrokerMessage>;

/// The pub/sub port every Manta component talks to.
///
/// Implementations range from a real MQTT connection
/// (`manta_broker::adapters::mqtt::MqttBrokerClient`) to an in-process test
/// double (`manta_broker::adapters::memory::InMemoryBrokerClient`); protocol
/// components depend only on this trait, never on a concrete transport.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Establishes the underlying connection. Idempotent: calling it again
    /// on an already-connected client is a no-op.
    async fn connect(&self) -> Result<(), BrokerError>;

    /// Subscribes to an MQTT topic filter (`+`/`#` wildcards allowed).
    async fn subscribe(&self, filter: &str, qos: Qos) -> Result<(), BrokerError>;

    /// Publishes `payload` to `topic`.
    async fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
        qos: Qos,
        retain: bool,
    ) -> Result<(), BrokerError>;

    /// The stream of messages matching this client's subscriptions.
    ///
    /// Calling this more than once yields independent streams over the same
    /// underlying subscriptions.
    fn messages(&self) -> BrokerStream;
}
