use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use tokio::sync::Mutex;

use crate::{BrokerClient, BrokerError, BrokerMessage, Qos};

impl From<Qos> for QoS {
    fn from(qos: Qos) -> Self {
        match qos {
            Qos::AtMostOnce => QoS::AtMostOnce,
            Qos::AtLeastOnce => QoS::AtLeastOnce,
            Qos::ExactlyOnce => QoS::ExactlyOnce,
        }
    }
}

/// A real MQTT broker connection, backed by `rumqttc`.
pub struct MqttBrokerClient {
    client: AsyncClient,
    event_loop: Arc<Mutex<rumqttc::EventLoop>>,
}

impl MqttBrokerClient {
    /// Builds a client for `host:port`, identifying itself as `client_id`.
    /// No network I/O happens until [`BrokerClient::connect`] is called.
    #[must_use]
    pub fn new(client_id: &str, host: &str, port: u16) -> Self {
        let mut options = MqttOptions::new(client_id, host, port);
        options.set_keep_alive(Duration::from_secs(30));
        let (client, event_loop) = AsyncClient::new(options, 64);
        Self {
            client,
            event_loop: Arc::new(Mutex::new(event_loop)),
        }
    }
}

#[async_trait]
impl BrokerClient for MqttBrokerClient {
    async fn connect(&self) -> Result<(), BrokerError> {
        // rumqttc connects lazily on the first event-loop poll; we drive one
        // iteration here so callers get an early connection error instead of
        // one surfacing from the first `subscribe`/`publish`.
        let mut event_loop = self.event_loop.lock().await;
        event_loop
            .poll()
            .await
            .map_err(|e| BrokerError::Connect(e.to_string()))?;
        Ok(())
    }

    async fn subscribe(&self, filter: &str, qos: Qos) -> Result<(), BrokerError> {
        self.client
            .subscribe(filter, qos.into())
            .await
            .map_err(|e| BrokerError::Subscribe {
                topic: filter.to_string(),
                source: Box::new(e),
            })
    }

    async fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
        qos: Qos,
        retain: bool,
    ) -> Result<(), BrokerError> {
        self.client
            .publish(topic, qos.into(), retain, payload)
            .await
            .map_err(|e| BrokerError::Publish {
                topic: topic.to_string(),
                source: Box::new(e),
            })
    }

    fn messages(&self) -> BoxStream<'static, BrokerMessage> {
        let event_loop = self.event_loop.clone();
        stream::unfold(event_loop, |event_loop| async move {
            loop {
                let event = {
                    let mut guard = event_loop.lock().await;
                    guard.poll().await
                };
                match event {
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        let message = BrokerMessage::new(
                            publish.topic,
                            publish.payload.to_vec(),
                            publish.retain,
                        );
                        return Some((message, event_loop));
                    }
                    Ok(_) => continue,
                    Err(err) => {
                        tracing::warn!(error = %err, "mqtt event loop error");
                        return None;
                    }
                }
            }
        })
        .boxed()
    }
}
