use manta_types::{AckMessage, MerchantOrderRequest, PaymentRequest, Status};

/// The Payment Processor's view of one in-flight session.
///
/// `ack` is replaced wholesale on every transition rather than mutated
/// field-by-field, mirroring the immutable-evolution style the Payment
/// Processor's handlers use when moving a session from one `Status` to the
/// next.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionState {
    pub txid: String,
    pub session_id: String,
    pub order: MerchantOrderRequest,
    pub ack: AckMessage,
    /// The signed quote last offered to a Wallet on this session, if any.
    /// Its `supported_cryptos` is what a reported payment is checked
    /// against before the payments handler advances the ack.
    pub payment_request: Option<PaymentRequest>,
}

impl TransactionState {
    #[must_use]
    pub fn new(txid: impl Into<String>, session_id: impl Into<String>, order: MerchantOrderRequest) -> Self {
        let txid = txid.into();
        let ack = AckMessage::new(txid.clone(), Status::New);
        Self {
            txid,
            session_id: session_id.into(),
            order,
            ack,
            payment_request: None,
        }
    }

    /// Returns a copy of this state with `ack` replaced.
    #[must_use]
    pub fn with_ack(&self, ack: AckMessage) -> Self {
        Self {
            ack,
            ..self.clone()
        }
    }

    /// Returns a copy of this state with `payment_request` replaced.
    #[must_use]
    pub fn with_payment_request(&self, payment_request: PaymentRequest) -> Self {
        Self {
            payment_request: Some(payment_request),
            ..self.clone()
        }
    }
}
