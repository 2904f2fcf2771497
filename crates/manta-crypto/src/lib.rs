//! Signing, verification and certificate-chain validation for the Manta
//! protocol.
//!
//! Signatures are RSA-PKCS#1v1.5 over SHA-256 exclusively. PSS is not
//! offered: every deployed counterpart verifies PKCS#1 v1.5, and mixing
//! schemes on the wire is not a goal of this protocol.

mod chain;
mod error;
mod signer;
mod verifier;

pub use chain::{leaf_public_key_der, verify_chain};
pub use error::CryptoError;
pub use signer::PayProcSigner;
pub use verifier::Verifier;
