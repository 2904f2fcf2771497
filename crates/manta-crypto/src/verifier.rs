use base64::Engine;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::sha2::Sha256;
use rsa::signature::Verifier as _;
use rsa::RsaPublicKey;

use crate::CryptoError;

/// Verifies RSA-PKCS#1v1.5-SHA256 signatures against a certificate's public key.
pub struct Verifier {
    key: VerifyingKey<Sha256>,
}

impl Verifier {
    /// Builds a verifier from a DER-encoded `SubjectPublicKeyInfo`, as
    /// extracted from a leaf certificate.
    pub fn from_public_key_der(spki_der: &[u8]) -> Result<Self, CryptoError> {
        let public_key = RsaPublicKey::from_public_key_der(spki_der)
            .map_err(|e| CryptoError::CertParse(e.to_string()))?;
        Ok(Self {
            key: VerifyingKey::<Sha256>::new(public_key),
        })
    }

    /// Verifies a base64-encoded signature over `message`.
    ///
    /// Returns `false` rather than an error on malformed or mismatched
    /// signatures: verification failure is an expected outcome, not an
    /// exceptional one.
    #[must_use]
    pub fn verify(&self, message: &[u8], signature_b64: &str) -> bool {
        let Ok(raw) = base64::engine::general_purpose::STANDARD.decode(signature_b64) else {
            return false;
        };
        let Ok(signature) = Signature::try_from(raw.as_slice()) else {
            return false;
        };
        self.key.verify(message, &signature).is_ok()
    }
}
