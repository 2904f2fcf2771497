use std::sync::Arc;

use crate::TransactionState;

/// Notified whenever a stored transaction's ack is replaced.
///
/// Receives the state as it stood immediately after the write, including
/// writes that immediately evict the session (a terminal-status ack is
/// still delivered once before removal).
pub trait StorageObserver: Send + Sync {
    fn on_ack_changed(&self, state: &TransactionState);
}

impl<F> StorageObserver for F
where
    F: Fn(&TransactionState) + Send + Sync,
{
    fn on_ack_changed(&self, state: &TransactionState) {
        self(state)
    }
}

pub(crate) type SharedObserver = Arc<dyn StorageObserver>;
