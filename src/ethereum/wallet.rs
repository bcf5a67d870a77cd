//! Wallet management.

use alloy::{
    primitives::{Address, Signature},
    signers::{local::PrivateKeySigner, SignerSync},
};

use crate::error::{AppError, Result};

/// Wallet manager for transaction and message signing.
#[derive(Clone)]
pub struct WalletManager {
    /// The local signer.
    signer: PrivateKeySigner,
    /// Wallet address.
    address: Address,
}

impl WalletManager {
    /// Create a wallet manager from a private key string.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        // Remove 0x prefix if present
        let key = private_key.strip_prefix("0x").unwrap_or(private_key);

        let signer: PrivateKeySigner =
            key.parse().map_err(|e: alloy::signers::local::LocalSignerError| {
                AppError::Wallet(e.to_string())
            })?;

        let address = signer.address();

        tracing::info!(address = %address, "Wallet initialized");

        Ok(Self { signer, address })
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the signer for transaction signing.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Sign an arbitrary message with the held private key (EIP-191).
    pub fn sign_message(&self, message: &str) -> Result<Signature> {
        let signature = self.signer.sign_message_sync(message.as_bytes())?;
        Ok(signature)
    }

    /// Parse a 65-byte hex signature string.
    pub fn parse_signature(signature: &str) -> Result<Signature> {
        signature
            .parse::<Signature>()
            .map_err(|e| AppError::Parse(format!("invalid signature: {}", e)))
    }

    /// Recover the address that signed `message` (EIP-191).
    pub fn recover_signer(message: &str, signature: &Signature) -> Result<Address> {
        signature
            .recover_address_from_msg(message)
            .map_err(|e| AppError::Parse(format!("signature recovery failed: {}", e)))
    }
}

impl std::fmt::Debug for WalletManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletManager").field("address", &self.address).finish()
    }
}
