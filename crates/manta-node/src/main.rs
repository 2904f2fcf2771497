mod config;
mod directory;

use anyhow::Context;
use manta_broker::MqttBrokerClient;
use manta_crypto::PayProcSigner;
use manta_payproc::PayProc;
use manta_storage::InMemoryTransactionStorage;
use manta_telemetry::TelemetryConfig;

use config::NodeConfig;
use directory::DemoDirectory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NodeConfig::from_env();
    manta_telemetry::init_tracing(&TelemetryConfig::from_env());
    tracing::info!(
        advertised_host = %config.advertised_host,
        advertised_port = config.advertised_port,
        mqtt_host = %config.mqtt_host,
        mqtt_port = config.mqtt_port,
        "starting manta payproc node"
    );

    let key_pem = tokio::fs::read_to_string(&config.signing_key_path)
        .await
        .with_context(|| format!("reading signing key from {}", config.signing_key_path))?;
    let signer = PayProcSigner::from_pkcs8_pem(&key_pem).context("loading signing key")?;

    let broker = MqttBrokerClient::new("manta-payproc", &config.mqtt_host, config.mqtt_port);
    let storage = InMemoryTransactionStorage::new();
    let directory = DemoDirectory::new(config.merchant_name.clone());

    let payproc = PayProc::new(
        config.advertised_host.clone(),
        config.advertised_port,
        config.starting_txid,
        directory,
        storage,
        broker,
        signer,
    );

    let run_handle = payproc.clone();
    let run_task = tokio::spawn(async move { run_handle.run().await });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
        result = run_task => {
            match result {
                Ok(Err(err)) => tracing::error!(error = %err, "payproc run loop exited with an error"),
                Err(join_err) => tracing::error!(error = %join_err, "payproc run task panicked"),
                Ok(Ok(())) => {}
            }
        }
    }

    Ok(())
}
