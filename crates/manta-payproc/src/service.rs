use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::StreamExt;
use manta_broker::{BrokerClient, Qos};
use manta_crypto::PayProcSigner;
use manta_dispatch::{Dispatcher, DispatcherBuilder};
use manta_storage::{TransactionState, TransactionStorage};
use manta_types::{
    AckMessage, MantaUrl, MerchantOrderRequest, PaymentMessage, PaymentRequest,
    PaymentRequestEnvelope, Status, PROTOCOL_VERSION,
};

use crate::domain::{ack, legacy};
use crate::ports::outbound::MerchantDirectory;
use crate::PayProcError;

/// The Payment Processor: owns the broker connection, transaction storage,
/// merchant directory lookups and the signer it attaches to every
/// `PaymentRequest`.
///
/// Generic over its three ports so tests can swap in in-memory/fake
/// adapters while production wires in the real MQTT broker, a persistent
/// `TransactionStorage`, and a directory backed by real merchant
/// configuration.
pub struct PayProc<D, S, B>
where
    D: MerchantDirectory + 'static,
    S: TransactionStorage + 'static,
    B: BrokerClient + 'static,
{
    host: String,
    port: u16,
    directory: D,
    storage: S,
    broker: B,
    signer: PayProcSigner,
    next_txid: AtomicU64,
}

impl<D, S, B> PayProc<D, S, B>
where
    D: MerchantDirectory + 'static,
    S: TransactionStorage + 'static,
    B: BrokerClient + 'static,
{
    pub fn new(
        host: impl Into<String>,
        port: u16,
        starting_txid: u64,
        directory: D,
        storage: S,
        broker: B,
        signer: PayProcSigner,
    ) -> Arc<Self> {
        Arc::new(Self {
            host: host.into(),
            port,
            directory,
            storage,
            broker,
            signer,
            next_txid: AtomicU64::new(starting_txid),
        })
    }

    fn allocate_txid(&self) -> String {
        self.next_txid.fetch_add(1, Ordering::SeqCst).to_string()
    }

    async fn publish_ack(&self, session_id: &str, ack: &AckMessage) -> Result<(), PayProcError> {
        let payload = serde_json::to_vec(ack)?;
        self.broker
            .publish(&format!("acks/{session_id}"), payload, Qos::AtLeastOnce, false)
            .await?;
        Ok(())
    }

    async fn subscribe_all(&self) -> Result<(), PayProcError> {
        self.broker.subscribe("merchant_order_request/+", Qos::AtLeastOnce).await?;
        self.broker.subscribe("merchant_order_cancel/+", Qos::AtLeastOnce).await?;
        self.broker.subscribe("payment_requests/+/+", Qos::AtLeastOnce).await?;
        self.broker.subscribe("payments/+", Qos::AtLeastOnce).await?;
        Ok(())
    }

    fn build_dispatcher(self: Arc<Self>) -> Dispatcher {
        let order = self.clone();
        let cancel = self.clone();
        let request = self.clone();
        let payment = self.clone();

        DispatcherBuilder::new()
            .route(
                "merchant_order_request/+",
                Arc::new(move |args, payload| {
                    let order = order.clone();
                    Box::pin(async move { order.on_merchant_order_request(&args[0], payload).await.map_err(Into::into) })
                }),
            )
            .expect("static pattern is valid")
            .route(
                "merchant_order_cancel/+",
                Arc::new(move |args, payload| {
                    let cancel = cancel.clone();
                    Box::pin(async move { cancel.on_merchant_order_cancel(&args[0], payload).await.map_err(Into::into) })
                }),
            )
            .expect("static pattern is valid")
            .route(
                "payment_requests/+/+",
                Arc::new(move |args, payload| {
                    let request = request.clone();
                    Box::pin(async move {
                        request
                            .on_get_payment_request(&args[0], &args[1], payload)
                            .await
                            .map_err(Into::into)
                    })
                }),
            )
            .expect("static pattern is valid")
            .route(
                "payments/+",
                Arc::new(move |args, payload| {
                    let payment = payment.clone();
                    Box::pin(async move { payment.on_payment(&args[0], payload).await.map_err(Into::into) })
                }),
            )
            .expect("static pattern is valid")
            .build()
    }

    /// Connects, subscribes and dispatches forever. On a broker disconnect
    /// the subscriptions are static topic filters, not per-session state, so
    /// reconnecting only requires re-issuing the same four `subscribe`
    /// calls — there is no per-session resubscription to replay.
    pub async fn run(self: Arc<Self>) -> Result<(), PayProcError> {
        loop {
            self.broker.connect().await?;
            self.subscribe_all().await?;
            tracing::info!(host = %self.host, port = self.port, "payproc connected and subscribed");

            let dispatcher = self.clone().build_dispatcher();
            let mut messages = self.broker.messages();
            while let Some(msg) = messages.next().await {
                dispatcher.dispatch(&msg.topic, msg.payload).await;
            }

            tracing::warn!("broker message stream ended, reconnecting");
        }
    }

    async fn on_merchant_order_request(
        self: Arc<Self>,
        session_id: &str,
        payload: Vec<u8>,
    ) -> Result<(), PayProcError> {
        let order: MerchantOrderRequest = serde_json::from_slice(&payload)?;
        let txid = self.allocate_txid();
        let state = TransactionState::new(&txid, session_id, order.clone());
        self.storage.create(state).await?;

        let url_or_uri = if order.is_manta_mode() {
            MantaUrl::new(self.host.clone(), self.port, session_id.to_string()).mint()
        } else {
            let crypto = order.crypto_currency.clone().unwrap_or_default();
            let destinations = self
                .directory
                .destinations_for(order.amount, &order.fiat_currency, Some(&crypto))
                .await?;
            let destination = destinations
                .first()
                .ok_or_else(|| PayProcError::NoMatchingDestination(crypto.clone()))?;
            legacy::mint_uri(&crypto, &destination.destination_address, destination.amount)
        };

        let initial = ack::initial(&txid, url_or_uri);
        self.storage.set_ack(&txid, initial.clone()).await?;
        self.publish_ack(session_id, &initial).await
    }

    async fn on_merchant_order_cancel(
        self: Arc<Self>,
        session_id: &str,
        _payload: Vec<u8>,
    ) -> Result<(), PayProcError> {
        let Some(state) = self.storage.get_for_session(session_id).await else {
            tracing::debug!(session_id, "cancel for unknown session, ignoring");
            return Ok(());
        };
        if state.ack.status.is_terminal() {
            return Ok(());
        }

        let next = ack::invalid(&state.ack, Some("Canceled by Merchant".to_string()));
        self.storage.set_ack(&state.txid, next.clone()).await?;
        self.publish_ack(session_id, &next).await
    }

    async fn on_get_payment_request(
        self: Arc<Self>,
        session_id: &str,
        crypto_currency: &str,
        _payload: Vec<u8>,
    ) -> Result<(), PayProcError> {
        let state = self
            .storage
            .get_for_session(session_id)
            .await
            .ok_or_else(|| PayProcError::UnknownSession(session_id.to_string()))?;

        let crypto_filter = if crypto_currency == "all" {
            None
        } else {
            Some(crypto_currency)
        };

        let offered = self
            .directory
            .destinations_for(state.order.amount, &state.order.fiat_currency, crypto_filter)
            .await?;
        if offered.is_empty() {
            return Err(PayProcError::NoMatchingDestination(crypto_currency.to_string()));
        }

        let supported_cryptos: BTreeSet<String> = if crypto_filter.is_some() {
            self.directory
                .destinations_for(state.order.amount, &state.order.fiat_currency, None)
                .await?
                .into_iter()
                .map(|d| d.crypto_currency)
                .collect()
        } else {
            offered.iter().map(|d| d.crypto_currency.clone()).collect()
        };

        let request = PaymentRequest {
            merchant: self.directory.merchant(),
            amount: state.order.amount,
            fiat_currency: state.order.fiat_currency.clone(),
            destinations: offered,
            supported_cryptos,
            version: PROTOCOL_VERSION.to_string(),
        };

        self.storage.set_payment_request(&state.txid, request.clone()).await?;

        let message = serde_json::to_string(&request)?;
        let signature = self.signer.sign(message.as_bytes())?;
        let envelope = PaymentRequestEnvelope::new(message, signature);

        self.broker
            .publish(
                &format!("payment_requests/{session_id}"),
                serde_json::to_vec(&envelope)?,
                Qos::AtLeastOnce,
                false,
            )
            .await?;
        Ok(())
    }

    async fn on_payment(self: Arc<Self>, session_id: &str, payload: Vec<u8>) -> Result<(), PayProcError> {
        let payment: PaymentMessage = serde_json::from_slice(&payload)?;
        let state = self
            .storage
            .get_for_session(session_id)
            .await
            .ok_or_else(|| PayProcError::UnknownSession(session_id.to_string()))?;

        let reported = payment.crypto_currency.to_uppercase();
        let is_supported = state
            .payment_request
            .as_ref()
            .is_some_and(|r| r.supported_cryptos.iter().any(|c| c.to_uppercase() == reported));
        if !is_supported {
            tracing::debug!(session_id, crypto = %payment.crypto_currency, "payment crypto not offered on this session, dropping");
            return Ok(());
        }

        let next = ack::pending(&state.ack, payment.transaction_hash, payment.crypto_currency);
        self.storage.set_ack(&state.txid, next.clone()).await?;
        self.publish_ack(session_id, &next).await
    }

    /// Moves `session_id`'s transaction into `Confirming`. Idempotent:
    /// calling it again once the session is already at or past `Confirming`
    /// is a no-op rather than re-publishing a duplicate ack. A no-op too if
    /// the session no longer exists.
    pub async fn confirming(&self, session_id: &str) -> Result<(), PayProcError> {
        let Some(state) = self.storage.get_for_session(session_id).await else {
            return Ok(());
        };
        if state.ack.status >= Status::Confirming {
            return Ok(());
        }

        let next = ack::confirming(&state.ack);
        self.storage.set_ack(&state.txid, next.clone()).await?;
        self.publish_ack(session_id, &next).await
    }

    /// Moves `session_id`'s transaction into the terminal `Paid` status. A
    /// no-op if the session no longer exists.
    pub async fn confirm(&self, session_id: &str) -> Result<(), PayProcError> {
        let Some(state) = self.storage.get_for_session(session_id).await else {
            return Ok(());
        };
        let next = ack::paid(&state.ack);
        self.storage.set_ack(&state.txid, next.clone()).await?;
        self.publish_ack(session_id, &next).await
    }

    /// Moves `session_id`'s transaction into the terminal `Invalid` status.
    /// A no-op if the session no longer exists.
    pub async fn invalidate(&self, session_id: &str, memo: Option<String>) -> Result<(), PayProcError> {
        let Some(state) = self.storage.get_for_session(session_id).await else {
            return Ok(());
        };
        let next = ack::invalid(&state.ack, memo);
        self.storage.set_ack(&state.txid, next.clone()).await?;
        self.publish_ack(session_id, &next).await
    }
}
