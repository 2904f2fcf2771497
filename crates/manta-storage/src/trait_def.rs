use async_trait::async_trait;
use manta_types::{AckMessage, PaymentRequest};

use crate::{StorageError, TransactionState};

/// Storage for in-flight `TransactionState`s, keyed by Payment Processor
/// transaction id and indexed by session id.
///
/// Implementations evict a session as soon as its ack reaches a terminal
/// [`manta_types::Status`] (`PAID`, `INVALID` or `CANCELED`); code holding a
/// `txid` across an `await` point should not assume the session is still
/// present afterward.
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    async fn create(&self, state: TransactionState) -> Result<(), StorageError>;

    async fn get(&self, txid: &str) -> Option<TransactionState>;

    async fn get_for_session(&self, session_id: &str) -> Option<TransactionState>;

    async fn session_exists(&self, session_id: &str) -> bool;

    /// Replaces the ack for `txid`, notifying observers and evicting the
    /// session if the new ack's status is terminal.
    async fn set_ack(&self, txid: &str, ack: AckMessage) -> Result<(), StorageError>;

    /// Records the signed `PaymentRequest` last offered on `txid`'s session,
    /// so a later payment report can be checked against its
    /// `supported_cryptos`.
    async fn set_payment_request(&self, txid: &str, request: PaymentRequest) -> Result<(), StorageError>;

    /// A point-in-time snapshot of every non-evicted session.
    async fn snapshot(&self) -> Vec<TransactionState>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
