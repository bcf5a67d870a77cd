//! Examination event watcher.
//!
//! Connects to the configured node, subscribes to this hospital's
//! StartExamination events and prints them until interrupted.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hospital_chain::{Config, EthereumClient, ManagementClient, Passphrase, WalletManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!("Starting examination event watcher");

    let client = Arc::new(EthereumClient::connect(&config.rpc_url).await?);
    let wallet = WalletManager::from_private_key(&config.private_key)?;
    let management_address = config
        .management_address
        .parse()
        .map_err(|_| hospital_chain::AppError::InvalidAddress(config.management_address.clone()))?;

    let management = ManagementClient::new(
        client,
        wallet,
        Passphrase::new(config.passphrase),
        management_address,
    );

    let subscription = management
        .subscribe_event(|event| {
            println!("{}: {}", event.name(), serde_json::to_string(&event).unwrap_or_default());
        })
        .await?;

    tracing::info!(
        hospital = %management.hospital_address(),
        random = management.random(),
        "Watching for StartExamination events, press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c().await?;

    subscription.unsubscribe();
    tracing::info!("Watcher stopped");

    Ok(())
}
