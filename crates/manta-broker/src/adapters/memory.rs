use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use manta_dispatch::mqtt_to_regex;
use regex::Regex;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use crate::{BrokerClient, BrokerError, BrokerMessage, Qos};

/// An in-process pub/sub bus, shared by every [`InMemoryBrokerClient`] handed
/// out by [`InMemoryBroker::client`]. Stands in for a real MQTT broker in
/// tests: publishing through one client's handle is visible to every other
/// handle's subscriptions.
pub struct InMemoryBroker {
    sender: broadcast::Sender<BrokerMessage>,
    retained: Arc<Mutex<HashMap<String, BrokerMessage>>>,
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBroker {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1024);
        Self {
            sender,
            retained: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Hands out a new client handle bound to this bus.
    #[must_use]
    pub fn client(&self) -> InMemoryBrokerClient {
        InMemoryBrokerClient {
            sender: self.sender.clone(),
            retained: self.retained.clone(),
            filters: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// A handle to an [`InMemoryBroker`].
pub struct InMemoryBrokerClient {
    sender: broadcast::Sender<BrokerMessage>,
    retained: Arc<Mutex<HashMap<String, BrokerMessage>>>,
    filters: Arc<Mutex<Vec<Regex>>>,
}

#[async_trait]
impl BrokerClient for InMemoryBrokerClient {
    async fn connect(&self) -> Result<(), BrokerError> {
        Ok(())
    }

    async fn subscribe(&self, filter: &str, _qos: Qos) -> Result<(), BrokerError> {
        let regex = mqtt_to_regex(filter)
            .map_err(|e| BrokerError::Subscribe { topic: filter.to_string(), source: Box::new(e) })?;

        let replayed: Vec<BrokerMessage> = {
            let retained = self.retained.lock().unwrap();
            retained
                .values()
                .filter(|msg| regex.is_match(&msg.topic))
                .cloned()
                .collect()
        };

        self.filters.lock().unwrap().push(regex);

        // Re-broadcasting retained messages on subscribe means a receiver
        // created before this call (via `messages()`) picks them up; one
        // created after does not, so callers should subscribe before
        // starting to read the stream.
        for msg in replayed {
            let _ = self.sender.send(msg);
        }

        Ok(())
    }

    async fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
        _qos: Qos,
        retain: bool,
    ) -> Result<(), BrokerError> {
        let message = BrokerMessage::new(topic, payload, retain);
        if retain {
            self.retained
                .lock()
                .unwrap()
                .insert(topic.to_string(), message.clone());
        }
        // No active subscriber is not an error: MQTT publish succeeds
        // whether or not anyone is listening.
        let _ = self.sender.send(message);
        Ok(())
    }

    fn messages(&self) -> BoxStream<'static, BrokerMessage> {
        let receiver = self.sender.subscribe();
        let filters = self.filters.clone();
        BroadcastStream::new(receiver)
            .filter_map(|result| async { result.ok() })
            .filter(move |msg| {
                let matches = filters.lock().unwrap().iter().any(|f| f.is_match(&msg.topic));
                let msg_matches = matches;
                async move { msg_matches }
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_is_delivered_to_matching_subscriber() {
        let broker = InMemoryBroker::new();
        let publisher = broker.client();
        let subscriber = broker.client();

        subscriber.subscribe("acks/+", Qos::AtLeastOnce).await.unwrap();
        let mut stream = subscriber.messages();

        publisher
            .publish("acks/123", b"hello".to_vec(), Qos::AtLeastOnce, false)
            .await
            .unwrap();

        let msg = stream.next().await.unwrap();
        assert_eq!(msg.topic, "acks/123");
        assert_eq!(msg.payload, b"hello");
    }

    #[tokio::test]
    async fn non_matching_topics_are_filtered_out() {
        let broker = InMemoryBroker::new();
        let publisher = broker.client();
        let subscriber = broker.client();

        subscriber.subscribe("acks/+", Qos::AtLeastOnce).await.unwrap();
        let mut stream = subscriber.messages();

        publisher
            .publish("payments/123", b"ignored".to_vec(), Qos::AtLeastOnce, false)
            .await
            .unwrap();
        publisher
            .publish("acks/123", b"seen".to_vec(), Qos::AtLeastOnce, false)
            .await
            .unwrap();

        let msg = stream.next().await.unwrap();
        assert_eq!(msg.payload, b"seen");
    }

    #[tokio::test]
    async fn retained_message_is_replayed_on_subscribe() {
        let broker = InMemoryBroker::new();
        let publisher = broker.client();
        publisher
            .publish("status/1", b"retained".to_vec(), Qos::AtLeastOnce, true)
            .await
            .unwrap();

        let subscriber = broker.client();
        let mut stream = subscriber.messages();
        subscriber.subscribe("status/+", Qos::AtLeastOnce).await.unwrap();

        let msg = stream.next().await.unwrap();
        assert_eq!(msg.payload, b"retained");
    }
}
