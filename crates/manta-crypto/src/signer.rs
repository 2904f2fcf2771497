use base64::Engine;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::sha2::Sha256;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::RsaPrivateKey;

use crate::CryptoError;

/// Signs payment-request bytes with RSA-PKCS#1v1.5-SHA256.
///
/// PSS is deliberately not used: the wire format is PKCS#1 v1.5, matching
/// every deployed wallet that verifies a Payment Processor's signature.
pub struct PayProcSigner {
    key: SigningKey<Sha256>,
}

impl PayProcSigner {
    /// Loads a PKCS#8 PEM-encoded RSA private key.
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self, CryptoError> {
        let private_key =
            RsaPrivateKey::from_pkcs8_pem(pem).map_err(|e| CryptoError::KeyLoad(e.to_string()))?;
        Ok(Self {
            key: SigningKey::<Sha256>::new(private_key),
        })
    }

    /// Signs `message`, returning the base64-encoded signature carried in a
    /// `PaymentRequestEnvelope`.
    pub fn sign(&self, message: &[u8]) -> Result<String, CryptoError> {
        let signature = self
            .key
            .try_sign_with_rng(&mut rand::thread_rng(), message)
            .map_err(|_| CryptoError::Sign)?;
        Ok(base64::engine::general_purpose::STANDARD.encode(signature.to_bytes()))
    }
}
