use std::time::Duration;

use futures::StreamExt;
use manta_broker::{BrokerClient, Qos};
use manta_types::{generate_session_id, AckMessage, MerchantOrderRequest, Status};
use rust_decimal::Decimal;

use crate::ClientError;

const ORDER_REPLY_TIMEOUT: Duration = Duration::from_secs(3);

/// The point-of-sale side of the protocol: places an order with the
/// Payment Processor and reports the ack it gets back so the till can
/// display a QR code or a legacy payment URI.
pub struct Store<B: BrokerClient> {
    broker: B,
}

impl<B: BrokerClient> Store<B> {
    #[must_use]
    pub fn new(broker: B) -> Self {
        Self { broker }
    }

    /// Places an order and waits for the Payment Processor's first ack.
    ///
    /// `crypto_currency` absent or empty selects Manta mode (the caller
    /// gets back a `manta://` URL to display); set, it selects legacy mode
    /// (the caller gets back a currency-specific URI).
    pub async fn merchant_order_request(
        &self,
        amount: Decimal,
        fiat_currency: &str,
        crypto_currency: Option<String>,
    ) -> Result<AckMessage, ClientError> {
        self.broker.connect().await?;

        let session_id = generate_session_id();
        self.broker
            .subscribe(&format!("acks/{session_id}"), Qos::AtLeastOnce)
            .await?;
        let mut acks = self.broker.messages();

        let order = MerchantOrderRequest::new(amount, fiat_currency, session_id.clone(), crypto_currency);
        self.broker
            .publish(
                &format!("merchant_order_request/{session_id}"),
                serde_json::to_vec(&order)?,
                Qos::AtLeastOnce,
                false,
            )
            .await?;

        let message = tokio::time::timeout(ORDER_REPLY_TIMEOUT, acks.next())
            .await
            .map_err(|_| ClientError::Timeout)?
            .ok_or(ClientError::Timeout)?;

        let ack: AckMessage = serde_json::from_slice(&message.payload)?;
        if ack.status != Status::New {
            return Err(ClientError::OrderRejected(session_id));
        }
        Ok(ack)
    }

    /// Cancels an in-flight order.
    pub async fn cancel(&self, session_id: &str) -> Result<(), ClientError> {
        self.broker
            .publish(
                &format!("merchant_order_cancel/{session_id}"),
                Vec::new(),
                Qos::AtLeastOnce,
                false,
            )
            .await?;
        Ok(())
    }
}
