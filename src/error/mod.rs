//! Error types and handling module.
//!
//! Defines all application-specific error types and conversions.

use alloy::primitives::Address;
use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ethereum RPC errors.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid Ethereum address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Wallet-related errors.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A signature was produced by someone other than the expected signer.
    #[error("Unauthorized signature: expected {expected}, recovered {recovered}")]
    Unauthorized { expected: Address, recovered: Address },

    /// Payload encryption failure.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Authenticated decryption failed: wrong passphrase or tampered blob.
    #[error("Decryption failed: wrong passphrase or corrupted data")]
    DecryptionFailed,

    /// Pending transaction error.
    #[error("Pending transaction error: {0}")]
    PendingTransaction(String),
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<alloy::contract::Error> for AppError {
    fn from(err: alloy::contract::Error) -> Self {
        AppError::Rpc(err.to_string())
    }
}

impl From<alloy::signers::Error> for AppError {
    fn from(err: alloy::signers::Error) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<alloy::providers::PendingTransactionError> for AppError {
    fn from(err: alloy::providers::PendingTransactionError) -> Self {
        AppError::PendingTransaction(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
