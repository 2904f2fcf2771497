use base64::Engine;
use rand::RngCore;

/// Generates a 128-bit URL-safe session identifier.
///
/// Mirrors the Python original's `base64.b64encode(uuid.uuid4().bytes, b"-_")`:
/// 16 random bytes, base64 with `+`/`/` swapped for `-`/`_`. We skip the UUID
/// layer itself since only the 128 bits of randomness carry over the wire.
#[must_use]
pub fn generate_session_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_url_safe_ids() {
        let id = generate_session_id();
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn generates_unique_ids() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert_ne!(a, b);
    }
}
