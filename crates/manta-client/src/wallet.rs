use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::StreamExt;
use manta_broker::{BrokerClient, Qos};
use manta_types::{MantaUrl, PaymentMessage, PaymentRequestEnvelope};

use crate::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// The Wallet side of the protocol: fetches the signed `PaymentRequest` for
/// a session and reports back the transaction it broadcast.
pub struct Wallet<B: BrokerClient> {
    broker: B,
    session_id: String,
    connected: AtomicBool,
}

impl<B: BrokerClient> Wallet<B> {
    #[must_use]
    pub fn new(broker: B, session_id: impl Into<String>) -> Self {
        Self {
            broker,
            session_id: session_id.into(),
            connected: AtomicBool::new(false),
        }
    }

    /// Builds a `Wallet` from a `manta://host[:port]/session_id` URL, using
    /// `build_broker` to construct the transport for the parsed host/port.
    pub fn from_url(url: &str, build_broker: impl FnOnce(&str, u16) -> B) -> Result<Self, ClientError> {
        let parsed = MantaUrl::parse(url)?;
        let broker = build_broker(&parsed.host, parsed.port);
        Ok(Self::new(broker, parsed.session_id))
    }

    /// Connects the underlying broker transport. Safe to call more than
    /// once; only the first call does any work.
    pub async fn connect(&self) -> Result<(), ClientError> {
        if self.connected.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.broker.connect().await?;
        Ok(())
    }

    /// Requests the signed `PaymentRequest` for `crypto_currency` ("all" for
    /// every currency the merchant supports).
    pub async fn get_payment_request(
        &self,
        crypto_currency: &str,
    ) -> Result<PaymentRequestEnvelope, ClientError> {
        self.connect().await?;

        let reply_topic = format!("payment_requests/{}", self.session_id);
        self.broker.subscribe(&reply_topic, Qos::AtLeastOnce).await?;
        let mut replies = self.broker.messages();

        self.broker
            .publish(
                &format!("payment_requests/{}/{crypto_currency}", self.session_id),
                Vec::new(),
                Qos::AtLeastOnce,
                false,
            )
            .await?;

        let message = tokio::time::timeout(REQUEST_TIMEOUT, replies.next())
            .await
            .map_err(|_| ClientError::Timeout)?
            .ok_or(ClientError::Timeout)?;

        Ok(serde_json::from_slice(&message.payload)?)
    }

    /// Reports the transaction broadcast to pay the session.
    pub async fn send_payment(&self, crypto_currency: &str, transaction_hash: &str) -> Result<(), ClientError> {
        self.connect().await?;
        let payment = PaymentMessage::new(crypto_currency, transaction_hash);
        self.broker
            .publish(
                &format!("payments/{}", self.session_id),
                serde_json::to_vec(&payment)?,
                Qos::AtLeastOnce,
                false,
            )
            .await?;
        Ok(())
    }
}
