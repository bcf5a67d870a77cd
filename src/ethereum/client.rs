//! Ethereum RPC client.

use alloy::{
    network::{Ethereum, EthereumWallet, TransactionBuilder},
    providers::{Provider, ProviderBuilder, RootProvider, WsConnect},
    pubsub::Subscription,
    rpc::types::{Filter, Log, TransactionReceipt, TransactionRequest},
};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::{AppError, Result};
use crate::ethereum::constants::GAS_LIMIT_MARGIN;
use crate::ethereum::wallet::WalletManager;

/// Type alias for the WebSocket provider.
pub type WsProvider = RootProvider<Ethereum>;

/// Ethereum RPC client wrapper over one persistent WebSocket connection.
///
/// The same connection serves contract calls, gas estimation, transaction
/// submission and event subscriptions.
#[derive(Clone)]
pub struct EthereumClient {
    /// The underlying provider.
    provider: Arc<WsProvider>,
    /// RPC URL for logging.
    rpc_url: String,
    /// Lazily initialized chain ID.
    chain_id: Arc<OnceCell<u64>>,
}

impl EthereumClient {
    /// Connect to an Ethereum node over WebSocket.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        let ws = WsConnect::new(rpc_url);
        let provider = ProviderBuilder::new()
            .connect_ws(ws)
            .await
            .map_err(|e| AppError::Transport(format!("WebSocket connect failed: {}", e)))?
            .root()
            .clone();

        tracing::info!(rpc_url = %rpc_url, "Connected to Ethereum node");

        Ok(Self {
            provider: Arc::new(provider),
            rpc_url: rpc_url.to_string(),
            chain_id: Arc::new(OnceCell::new()),
        })
    }

    /// Get the chain ID (fetches from network on first call).
    pub async fn chain_id(&self) -> Result<u64> {
        self.chain_id
            .get_or_try_init(|| async {
                let chain_id = self.provider.get_chain_id().await?;
                tracing::info!(chain_id = chain_id, rpc_url = %self.rpc_url, "Resolved chain ID");
                Ok(chain_id)
            })
            .await
            .copied()
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &WsProvider {
        &self.provider
    }

    /// Estimate gas for a transaction.
    pub async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64> {
        let gas = self.provider.estimate_gas(tx.clone()).await?;
        Ok(gas)
    }

    /// Open a log subscription for the given filter.
    pub async fn subscribe_logs(&self, filter: &Filter) -> Result<Subscription<Log>> {
        let subscription = self.provider.subscribe_logs(filter).await?;
        Ok(subscription)
    }

    /// Sign and submit a transaction, returning the mined receipt.
    ///
    /// Gas is estimated first and padded with [`GAS_LIMIT_MARGIN`], then the
    /// transaction is signed locally and submitted as raw bytes. Submission
    /// failures propagate to the caller; no retry is performed.
    pub async fn send_transaction(
        &self,
        tx: TransactionRequest,
        wallet: &WalletManager,
    ) -> Result<TransactionReceipt> {
        let from = wallet.address();
        let tx = tx.with_from(from);

        let gas = self.estimate_gas(&tx).await? + GAS_LIMIT_MARGIN;
        let nonce = self.provider.get_transaction_count(from).await?;
        let gas_price = self.provider.get_gas_price().await?;
        let chain_id = self.chain_id().await?;

        let tx = tx
            .with_nonce(nonce)
            .with_gas_limit(gas)
            .with_gas_price(gas_price)
            .with_chain_id(chain_id);

        let signer = EthereumWallet::from(wallet.signer().clone());
        let envelope = tx
            .build(&signer)
            .await
            .map_err(|e| AppError::Wallet(format!("transaction signing failed: {}", e)))?;

        tracing::debug!(gas = gas, nonce = nonce, "Submitting signed transaction");

        let pending = self.provider.send_tx_envelope(envelope).await?;
        let receipt = pending.get_receipt().await?;

        tracing::info!(tx_hash = %receipt.transaction_hash, "Transaction mined");

        Ok(receipt)
    }
}
