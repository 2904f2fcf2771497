/// MQTT quality-of-service level. The Manta protocol only ever uses `AtLeastOnce`
/// for acks and `AtMostOnce` for best-effort notices; `ExactlyOnce` is exposed
/// for completeness but unused by the protocol's own components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qos {
    AtMostOnce,
    AtLeastOnce,
    ExactlyOnce,
}

/// A message received from a subscribed topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerMessage {
    pub topic: String,
    pub payload: Vec<u8>,
    pub retained: bool,
}

impl BrokerMessage {
    #[must_use]
    pub fn new(topic: impl Into<String>, payload: Vec<u8>, retained: bool) -> Self {
        Self {
            topic: topic.into(),
            payload,
            retained,
        }
    }
}
