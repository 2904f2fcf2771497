use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single payable destination quoted inside a `PaymentRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub amount: Decimal,
    pub destination_address: String,
    pub crypto_currency: String,
}

impl Destination {
    #[must_use]
    pub fn new(
        amount: Decimal,
        destination_address: impl Into<String>,
        crypto_currency: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            destination_address: destination_address.into(),
            crypto_currency: crypto_currency.into(),
        }
    }
}
