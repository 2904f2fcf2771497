use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::destination::Destination;
use crate::merchant::Merchant;
use crate::status::Status;
use crate::{TypesError, PROTOCOL_VERSION};

fn default_version() -> String {
    PROTOCOL_VERSION.to_string()
}

/// The order a POS places with the Payment Processor.
///
/// `crypto_currency` being unset or empty selects Manta mode (the PP mints
/// a `manta://` URL and negotiates destinations over the protocol); a
/// non-empty value selects legacy single-crypto mode (the PP replies with a
/// currency-specific URI immediately).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantOrderRequest {
    pub amount: Decimal,
    pub fiat_currency: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_currency: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

impl MerchantOrderRequest {
    #[must_use]
    pub fn new(
        amount: Decimal,
        fiat_currency: impl Into<String>,
        session_id: impl Into<String>,
        crypto_currency: Option<String>,
    ) -> Self {
        Self {
            amount,
            fiat_currency: fiat_currency.into(),
            session_id: session_id.into(),
            crypto_currency,
            version: default_version(),
        }
    }

    /// Manta mode is active when `crypto_currency` is absent or empty.
    #[must_use]
    pub fn is_manta_mode(&self) -> bool {
        self.crypto_currency
            .as_deref()
            .map(str::is_empty)
            .unwrap_or(true)
    }
}

/// The signed quote the Payment Processor sends back to a Wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub merchant: Merchant,
    pub amount: Decimal,
    pub fiat_currency: String,
    pub destinations: Vec<Destination>,
    pub supported_cryptos: BTreeSet<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

impl PaymentRequest {
    /// Canonical UTF-8 JSON bytes of this request. Both signer and verifier
    /// must treat this as opaque — never re-derive it by re-serializing a
    /// parsed `PaymentRequest`.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, TypesError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// A `PaymentRequest` paired with its RSA-PKCS#1v1.5-SHA256 signature.
///
/// `message` is the exact byte sequence that was signed; it must never be
/// re-serialized before verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequestEnvelope {
    pub message: String,
    pub signature: String,
    #[serde(default = "default_version")]
    pub version: String,
}

impl PaymentRequestEnvelope {
    #[must_use]
    pub fn new(message: String, signature: String) -> Self {
        Self {
            message,
            signature,
            version: default_version(),
        }
    }

    /// Deserializes the carried message back into a `PaymentRequest`.
    ///
    /// Callers must verify the envelope's signature before trusting the
    /// result of this call.
    pub fn unpack(&self) -> Result<PaymentRequest, TypesError> {
        Ok(serde_json::from_str(&self.message)?)
    }
}

/// The Wallet's report of the on-chain transaction it broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMessage {
    pub crypto_currency: String,
    pub transaction_hash: String,
    #[serde(default = "default_version")]
    pub version: String,
}

impl PaymentMessage {
    #[must_use]
    pub fn new(crypto_currency: impl Into<String>, transaction_hash: impl Into<String>) -> Self {
        Self {
            crypto_currency: crypto_currency.into(),
            transaction_hash: transaction_hash.into(),
            version: default_version(),
        }
    }
}

/// The Payment Processor's progress signal for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckMessage {
    pub txid: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

impl AckMessage {
    #[must_use]
    pub fn new(txid: impl Into<String>, status: Status) -> Self {
        Self {
            txid: txid.into(),
            status,
            url: None,
            amount: None,
            transaction_hash: None,
            transaction_currency: None,
            memo: None,
            version: default_version(),
        }
    }
}

/// Common JSON (de)serialization for the wire messages above.
pub trait WireMessage: Sized + Serialize + for<'de> Deserialize<'de> {
    fn to_json(&self) -> Result<String, TypesError> {
        Ok(serde_json::to_string(self)?)
    }

    fn from_json(json: &str) -> Result<Self, TypesError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl WireMessage for MerchantOrderRequest {}
impl WireMessage for PaymentRequest {}
impl WireMessage for PaymentRequestEnvelope {}
impl WireMessage for PaymentMessage {}
impl WireMessage for AckMessage {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_ack() -> AckMessage {
        let mut ack = AckMessage::new("0", Status::Pending);
        ack.transaction_hash = Some("h1".to_string());
        ack.transaction_currency = Some("NANO".to_string());
        ack.amount = Some(Decimal::from_str("0.01").unwrap());
        ack
    }

    #[test]
    fn ack_json_roundtrip() {
        let ack = sample_ack();
        let json = ack.to_json().unwrap();
        let back = AckMessage::from_json(&json).unwrap();
        assert_eq!(ack, back);
    }

    #[test]
    fn decimal_serializes_as_string() {
        let ack = sample_ack();
        let json = ack.to_json().unwrap();
        assert!(json.contains("\"amount\":\"0.01\""));
    }

    #[test]
    fn unknown_fields_are_ignored_on_decode() {
        let json = r#"{"txid":"1","status":"new","unexpected_field":true}"#;
        let ack = AckMessage::from_json(json).unwrap();
        assert_eq!(ack.status, Status::New);
    }

    #[test]
    fn version_defaults_when_absent() {
        let json = r#"{"txid":"1","status":"new"}"#;
        let ack = AckMessage::from_json(json).unwrap();
        assert_eq!(ack.version, PROTOCOL_VERSION);
    }

    #[test]
    fn manta_mode_detection() {
        let manta = MerchantOrderRequest::new(Decimal::from(10), "EUR", "sid", None);
        assert!(manta.is_manta_mode());

        let legacy =
            MerchantOrderRequest::new(Decimal::from(10), "EUR", "sid", Some("btc".to_string()));
        assert!(!legacy.is_manta_mode());

        let empty =
            MerchantOrderRequest::new(Decimal::from(10), "EUR", "sid", Some(String::new()));
        assert!(empty.is_manta_mode());
    }

    #[test]
    fn envelope_unpack_roundtrip() {
        let request = PaymentRequest {
            merchant: Merchant::new("Merchant 1", Some("5th Avenue".to_string())),
            amount: Decimal::from(10),
            fiat_currency: "EUR".to_string(),
            destinations: vec![Destination::new(
                Decimal::from_str("0.01").unwrap(),
                "nano_daddress",
                "NANO",
            )],
            supported_cryptos: BTreeSet::from(["NANO".to_string()]),
            version: default_version(),
        };
        let message = serde_json::to_string(&request).unwrap();
        let envelope = PaymentRequestEnvelope::new(message, "sig".to_string());
        let unpacked = envelope.unpack().unwrap();
        assert_eq!(unpacked, request);
    }
}
