use async_trait::async_trait;
use manta_types::{Destination, Merchant};
use rust_decimal::Decimal;

use crate::PayProcError;

/// Where the Payment Processor learns which merchant it is quoting for and
/// which crypto destinations to offer.
///
/// This is the seam a real deployment fills in with exchange-rate lookups
/// and merchant-account configuration; `manta_node`'s binary wires in a
/// minimal implementation, and tests use an in-memory one.
#[async_trait]
pub trait MerchantDirectory: Send + Sync {
    /// The merchant identity to attach to quoted `PaymentRequest`s.
    fn merchant(&self) -> Merchant;

    /// Crypto-currency destinations worth `fiat_amount` of `fiat_currency`.
    ///
    /// When `crypto_currency` is `Some`, only that currency's destination is
    /// returned (legacy mode); `None` returns every currency the directory
    /// currently supports (Manta mode).
    async fn destinations_for(
        &self,
        fiat_amount: Decimal,
        fiat_currency: &str,
        crypto_currency: Option<&str>,
    ) -> Result<Vec<Destination>, PayProcError>;
}
