use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::ParsedExtension;
use x509_parser::prelude::FromDer;

use crate::CryptoError;

/// Validates a leaf-to-root certificate chain and enforces that the leaf
/// certificate is authorized to make digital signatures.
///
/// `chain` must be ordered leaf-first; `trusted_roots` holds the DER bytes
/// of certificates this node trusts as issuers of last resort.
pub fn verify_chain(chain: &[Vec<u8>], trusted_roots: &[Vec<u8>]) -> Result<(), CryptoError> {
    if chain.is_empty() {
        return Err(CryptoError::EmptyChain);
    }

    let parsed: Vec<X509Certificate<'_>> = chain
        .iter()
        .map(|der| {
            X509Certificate::from_der(der)
                .map(|(_, cert)| cert)
                .map_err(|e| CryptoError::CertParse(e.to_string()))
        })
        .collect::<Result<_, _>>()?;

    let leaf = &parsed[0];
    if !leaf_permits_digital_signature(leaf) {
        return Err(CryptoError::KeyUsageNotPermitted);
    }

    for window in parsed.windows(2) {
        let (subject, issuer) = (&window[0], &window[1]);
        let issuer_spki = &issuer.tbs_certificate.subject_pki;
        subject
            .verify_signature(Some(issuer_spki))
            .map_err(|e| CryptoError::ChainInvalid(e.to_string()))?;
    }

    let root = parsed.last().expect("chain is non-empty");
    let root_der = chain.last().expect("chain is non-empty");
    let root_is_trusted = trusted_roots.iter().any(|trusted| trusted == root_der);
    let root_is_self_signed = root.verify_signature(Some(&root.tbs_certificate.subject_pki));

    if !root_is_trusted && root_is_self_signed.is_err() {
        return Err(CryptoError::ChainInvalid(
            "root certificate is neither trusted nor self-signed".to_string(),
        ));
    }

    Ok(())
}

/// Extracts the leaf certificate's `SubjectPublicKeyInfo` as DER bytes, for
/// handing to [`crate::Verifier::from_public_key_der`].
pub fn leaf_public_key_der(leaf_der: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let (_, cert) =
        X509Certificate::from_der(leaf_der).map_err(|e| CryptoError::CertParse(e.to_string()))?;
    Ok(cert.tbs_certificate.subject_pki.raw.to_vec())
}

fn leaf_permits_digital_signature(cert: &X509Certificate<'_>) -> bool {
    for ext in cert.extensions() {
        if let ParsedExtension::KeyUsage(key_usage) = ext.parsed_extension() {
            return key_usage.digital_signature();
        }
    }
    // No KeyUsage extension present: treat as unrestricted, matching the
    // reference validator's behavior for certificates that omit it.
    true
}
