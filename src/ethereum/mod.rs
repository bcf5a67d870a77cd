//! Ethereum interaction module.
//!
//! Contains the Ethereum client, wallet management, contract bindings and
//! event subscription plumbing.

pub mod client;
pub mod constants;
pub mod contracts;
pub mod subscription;
pub mod wallet;

pub use client::{EthereumClient, WsProvider};
pub use subscription::EventSubscription;
pub use wallet::WalletManager;
