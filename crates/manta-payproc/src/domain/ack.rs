use manta_types::{AckMessage, Status};

/// Builds the initial ack for a freshly created session, carrying the
/// `manta://` URL or legacy payment URI the POS should display. Status
/// stays `New` — a session only leaves `New` once a payment report arrives.
#[must_use]
pub fn initial(txid: &str, url: impl Into<String>) -> AckMessage {
    AckMessage {
        url: Some(url.into()),
        ..AckMessage::new(txid, Status::New)
    }
}

/// Evolves `prev` into `Pending` once a payment report arrives, recording
/// the reported transaction and clearing the now-stale display URL.
#[must_use]
pub fn pending(prev: &AckMessage, transaction_hash: impl Into<String>, transaction_currency: impl Into<String>) -> AckMessage {
    AckMessage {
        status: Status::Pending,
        transaction_hash: Some(transaction_hash.into()),
        transaction_currency: Some(transaction_currency.into()),
        url: None,
        ..prev.clone()
    }
}

/// Evolves `prev` into `Confirming`. Only reachable through the external
/// `confirming` transition, never from the payments handler directly.
#[must_use]
pub fn confirming(prev: &AckMessage) -> AckMessage {
    AckMessage {
        status: Status::Confirming,
        ..prev.clone()
    }
}

/// Evolves `prev` into the terminal `Paid` status.
#[must_use]
pub fn paid(prev: &AckMessage) -> AckMessage {
    AckMessage {
        status: Status::Paid,
        ..prev.clone()
    }
}

/// Evolves `prev` into the terminal `Invalid` status, optionally recording
/// why.
#[must_use]
pub fn invalid(prev: &AckMessage, memo: Option<String>) -> AckMessage {
    AckMessage {
        status: Status::Invalid,
        memo,
        ..prev.clone()
    }
}

/// Evolves `prev` into the terminal `Canceled` status.
#[must_use]
pub fn canceled(prev: &AckMessage) -> AckMessage {
    AckMessage {
        status: Status::Canceled,
        ..prev.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_carries_the_url_without_advancing_status() {
        let next = initial("1", "manta://h/1");
        assert_eq!(next.status, Status::New);
        assert_eq!(next.url.as_deref(), Some("manta://h/1"));
        assert_eq!(next.txid, "1");
    }

    #[test]
    fn pending_clears_the_url_and_records_the_transaction() {
        let prev = initial("1", "manta://h/1");
        let next = pending(&prev, "0xabc", "NANO");
        assert_eq!(next.status, Status::Pending);
        assert_eq!(next.url, None);
        assert_eq!(next.transaction_hash.as_deref(), Some("0xabc"));
        assert_eq!(next.transaction_currency.as_deref(), Some("NANO"));
    }

    #[test]
    fn confirming_preserves_the_recorded_transaction() {
        let prev = pending(&initial("1", "manta://h/1"), "0xabc", "NANO");
        let next = confirming(&prev);
        assert_eq!(next.status, Status::Confirming);
        assert_eq!(next.transaction_hash.as_deref(), Some("0xabc"));
    }

    #[test]
    fn paid_is_terminal() {
        let prev = confirming(&pending(&initial("1", "u"), "h", "c"));
        assert!(paid(&prev).status.is_terminal());
    }
}
