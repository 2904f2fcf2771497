use thiserror::Error;

/// Errors raised by signing, verification and certificate-chain validation.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("failed to load private key: {0}")]
    KeyLoad(String),

    #[error("failed to sign message")]
    Sign,

    #[error("failed to parse certificate: {0}")]
    CertParse(String),

    #[error("certificate chain is empty")]
    EmptyChain,

    #[error("certificate chain validation failed: {0}")]
    ChainInvalid(String),

    #[error("leaf certificate does not permit digital signatures")]
    KeyUsageNotPermitted,

    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
}
