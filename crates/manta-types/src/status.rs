use serde::{Deserialize, Serialize};

/// Lifecycle status of a payment session.
///
/// Transitions are strictly monotone along `NEW < PENDING < CONFIRMING <
/// PAID`; only `CONFIRMING` may be skipped. `PAID`, `INVALID` and
/// `CANCELED` are terminal and cause the owning session to be evicted from
/// storage (see `manta_storage`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    New,
    Pending,
    Confirming,
    Paid,
    Invalid,
    Canceled,
}

impl Status {
    /// Terminal statuses cause eviction from transaction storage.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Paid | Status::Invalid | Status::Canceled)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Pending => "pending",
            Status::Confirming => "confirming",
            Status::Paid => "paid",
            Status::Invalid => "invalid",
            Status::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::New).unwrap(), "\"new\"");
        assert_eq!(
            serde_json::to_string(&Status::Confirming).unwrap(),
            "\"confirming\""
        );
    }

    #[test]
    fn terminal_statuses() {
        assert!(Status::Paid.is_terminal());
        assert!(Status::Invalid.is_terminal());
        assert!(Status::Canceled.is_terminal());
        assert!(!Status::New.is_terminal());
        assert!(!Status::Pending.is_terminal());
        assert!(!Status::Confirming.is_terminal());
    }

    #[test]
    fn ordering_is_monotone() {
        assert!(Status::New < Status::Pending);
        assert!(Status::Pending < Status::Confirming);
        assert!(Status::Confirming < Status::Paid);
    }
}
