use std::collections::HashMap;

use async_trait::async_trait;
use manta_types::{AckMessage, PaymentRequest};
use tokio::sync::RwLock;

use crate::observer::SharedObserver;
use crate::{StorageError, StorageObserver, TransactionState, TransactionStorage};

#[derive(Default)]
struct Inner {
    by_txid: HashMap<String, TransactionState>,
    session_to_txid: HashMap<String, String>,
}

/// An in-memory [`TransactionStorage`], sufficient for a single Payment
/// Processor process. Evicts a session as soon as its ack reaches a
/// terminal status.
pub struct InMemoryTransactionStorage {
    inner: RwLock<Inner>,
    observers: Vec<SharedObserver>,
}

impl Default for InMemoryTransactionStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTransactionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            observers: Vec::new(),
        }
    }

    /// Registers an observer to be notified on every ack replacement.
    #[must_use]
    pub fn with_observer(mut self, observer: impl StorageObserver + 'static) -> Self {
        self.observers.push(std::sync::Arc::new(observer));
        self
    }

    fn notify(&self, state: &TransactionState) {
        for observer in &self.observers {
            observer.on_ack_changed(state);
        }
    }
}

#[async_trait]
impl TransactionStorage for InMemoryTransactionStorage {
    async fn create(&self, state: TransactionState) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        if inner.by_txid.contains_key(&state.txid) {
            return Err(StorageError::AlreadyExists(state.txid));
        }
        inner
            .session_to_txid
            .insert(state.session_id.clone(), state.txid.clone());
        inner.by_txid.insert(state.txid.clone(), state);
        Ok(())
    }

    async fn get(&self, txid: &str) -> Option<TransactionState> {
        self.inner.read().await.by_txid.get(txid).cloned()
    }

    async fn get_for_session(&self, session_id: &str) -> Option<TransactionState> {
        let inner = self.inner.read().await;
        let txid = inner.session_to_txid.get(session_id)?;
        inner.by_txid.get(txid).cloned()
    }

    async fn session_exists(&self, session_id: &str) -> bool {
        self.inner.read().await.session_to_txid.contains_key(session_id)
    }

    async fn set_ack(&self, txid: &str, ack: AckMessage) -> Result<(), StorageError> {
        let updated = {
            let mut inner = self.inner.write().await;
            let state = inner
                .by_txid
                .get_mut(txid)
                .ok_or_else(|| StorageError::TxidNotFound(txid.to_string()))?;
            state.ack = ack;
            let updated = state.clone();

            if updated.ack.status.is_terminal() {
                inner.by_txid.remove(txid);
                inner.session_to_txid.remove(&updated.session_id);
                tracing::debug!(txid, status = %updated.ack.status, "evicting terminal session");
            }

            updated
        };

        self.notify(&updated);
        Ok(())
    }

    async fn set_payment_request(&self, txid: &str, request: PaymentRequest) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        let state = inner
            .by_txid
            .get_mut(txid)
            .ok_or_else(|| StorageError::TxidNotFound(txid.to_string()))?;
        state.payment_request = Some(request);
        Ok(())
    }

    async fn snapshot(&self) -> Vec<TransactionState> {
        self.inner.read().await.by_txid.values().cloned().collect()
    }

    async fn len(&self) -> usize {
        self.inner.read().await.by_txid.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manta_types::{MerchantOrderRequest, Status};
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sample_state(txid: &str, session_id: &str) -> TransactionState {
        let order = MerchantOrderRequest::new(Decimal::from(10), "EUR", session_id, None);
        TransactionState::new(txid, session_id, order)
    }

    #[tokio::test]
    async fn create_and_lookup_by_both_keys() {
        let storage = InMemoryTransactionStorage::new();
        storage.create(sample_state("1", "sid-1")).await.unwrap();

        assert!(storage.get("1").await.is_some());
        assert!(storage.get_for_session("sid-1").await.is_some());
        assert!(storage.session_exists("sid-1").await);
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_txid_is_rejected() {
        let storage = InMemoryTransactionStorage::new();
        storage.create(sample_state("1", "sid-1")).await.unwrap();
        let err = storage.create(sample_state("1", "sid-2")).await.unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn terminal_status_evicts_the_session() {
        let storage = InMemoryTransactionStorage::new();
        storage.create(sample_state("1", "sid-1")).await.unwrap();

        storage
            .set_ack("1", AckMessage::new("1", Status::Paid))
            .await
            .unwrap();

        assert!(storage.get("1").await.is_none());
        assert!(!storage.session_exists("sid-1").await);
        assert_eq!(storage.len().await, 0);
    }

    #[tokio::test]
    async fn canceled_also_evicts() {
        let storage = InMemoryTransactionStorage::new();
        storage.create(sample_state("1", "sid-1")).await.unwrap();

        storage
            .set_ack("1", AckMessage::new("1", Status::Canceled))
            .await
            .unwrap();

        assert_eq!(storage.len().await, 0);
    }

    #[tokio::test]
    async fn non_terminal_status_keeps_the_session() {
        let storage = InMemoryTransactionStorage::new();
        storage.create(sample_state("1", "sid-1")).await.unwrap();

        storage
            .set_ack("1", AckMessage::new("1", Status::Pending))
            .await
            .unwrap();

        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn observer_is_notified_once_per_write_including_eviction() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();

        let storage = InMemoryTransactionStorage::new()
            .with_observer(move |_state: &TransactionState| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            });
        storage.create(sample_state("1", "sid-1")).await.unwrap();

        storage
            .set_ack("1", AckMessage::new("1", Status::Pending))
            .await
            .unwrap();
        storage
            .set_ack("1", AckMessage::new("1", Status::Paid))
            .await
            .unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn set_ack_on_unknown_txid_errors() {
        let storage = InMemoryTransactionStorage::new();
        let err = storage
            .set_ack("missing", AckMessage::new("missing", Status::Pending))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::TxidNotFound(_)));
    }

    #[tokio::test]
    async fn set_payment_request_is_visible_on_the_stored_state() {
        use manta_types::{Destination, Merchant};
        use std::collections::BTreeSet;

        let storage = InMemoryTransactionStorage::new();
        storage.create(sample_state("1", "sid-1")).await.unwrap();

        let request = PaymentRequest {
            merchant: Merchant::new("Test Merchant", None),
            amount: Decimal::from(10),
            fiat_currency: "EUR".to_string(),
            destinations: vec![Destination {
                amount: Decimal::from(1),
                destination_address: "addr".to_string(),
                crypto_currency: "NANO".to_string(),
            }],
            supported_cryptos: BTreeSet::from(["NANO".to_string()]),
            version: "1".to_string(),
        };
        storage.set_payment_request("1", request.clone()).await.unwrap();

        let state = storage.get("1").await.unwrap();
        assert_eq!(state.payment_request, Some(request));
    }
}
