//! Common utilities for integration tests.

use std::sync::Arc;

use hospital_chain::{EthereumClient, ManagementClient, Passphrase, WalletManager};

/// Helper to create a test management client from environment variables.
pub async fn create_test_management() -> Option<ManagementClient> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Check if required environment variables are set
    let rpc_url = std::env::var("ETHEREUM_RPC_URL").ok()?;
    let private_key = std::env::var("ETHEREUM_PRIVATE_KEY").ok()?;
    let passphrase = std::env::var("HOSPITAL_PASSPHRASE").ok()?;
    let management_address = std::env::var("MANAGEMENT_CONTRACT_ADDRESS").ok()?;

    if rpc_url.is_empty() || private_key.is_empty() {
        return None;
    }

    let client = EthereumClient::connect(&rpc_url).await.ok()?;
    let wallet = WalletManager::from_private_key(&private_key).ok()?;
    let address = management_address.parse().ok()?;

    Some(ManagementClient::new(Arc::new(client), wallet, Passphrase::new(passphrase), address))
}

/// Skip test if the client cannot be created (missing env vars / no node).
#[macro_export]
macro_rules! skip_if_no_node {
    () => {
        match common::create_test_management().await {
            Some(management) => management,
            None => {
                eprintln!("Skipping test: Ethereum test environment not configured");
                return;
            }
        }
    };
}
