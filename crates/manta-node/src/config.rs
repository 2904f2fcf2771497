use std::env;

/// Runtime configuration for a Payment Processor node, read from the
/// environment so deployments don't require a rebuild to retarget a broker
/// or rotate a signing key.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Host advertised inside minted `manta://` URLs.
    pub advertised_host: String,
    /// Port advertised inside minted `manta://` URLs.
    pub advertised_port: u16,
    /// Host of the MQTT broker to connect to.
    pub mqtt_host: String,
    /// Port of the MQTT broker to connect to.
    pub mqtt_port: u16,
    /// Path to a PKCS#8 PEM-encoded RSA private key used to sign `PaymentRequest`s.
    pub signing_key_path: String,
    /// First transaction id this node will hand out.
    pub starting_txid: u64,
    /// Merchant name attached to every `PaymentRequest`.
    pub merchant_name: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            advertised_host: "127.0.0.1".to_string(),
            advertised_port: manta_types::DEFAULT_PORT,
            mqtt_host: "127.0.0.1".to_string(),
            mqtt_port: manta_types::DEFAULT_PORT,
            signing_key_path: "payproc_key.pem".to_string(),
            starting_txid: 0,
            merchant_name: "Manta Demo Merchant".to_string(),
        }
    }
}

impl NodeConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            advertised_host: env::var("MANTA_HOST").unwrap_or(defaults.advertised_host),
            advertised_port: env::var("MANTA_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.advertised_port),
            mqtt_host: env::var("MANTA_MQTT_HOST").unwrap_or(defaults.mqtt_host),
            mqtt_port: env::var("MANTA_MQTT_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.mqtt_port),
            signing_key_path: env::var("MANTA_KEY_FILE").unwrap_or(defaults.signing_key_path),
            starting_txid: env::var("MANTA_STARTING_TXID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.starting_txid),
            merchant_name: env::var("MANTA_MERCHANT_NAME").unwrap_or(defaults.merchant_name),
        }
    }
}
