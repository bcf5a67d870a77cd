//! Client wrappers for the Management / Examination medical-escrow contracts.
//!
//! Two cooperating clients front the on-chain contracts:
//!
//! - **[`ManagementClient`]**: deploys new Examination contracts through the
//!   Management registry, signs messages, and provides passphrase-keyed
//!   encryption of patient data.
//! - **[`ExaminationClient`]**: binds one deployed Examination contract and
//!   its ERC-20 payment token; typed reads, cost/withdraw/note transactions
//!   and a merged event stream.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hospital_chain::{Config, EthereumClient, ManagementClient, WalletManager};
//! use hospital_chain::crypto::Passphrase;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = Arc::new(EthereumClient::connect(&config.rpc_url).await?);
//!     let wallet = WalletManager::from_private_key(&config.private_key)?;
//!     let management = ManagementClient::new(
//!         client,
//!         wallet,
//!         Passphrase::new(config.passphrase),
//!         config.management_address.parse()?,
//!     );
//!     let subscription = management
//!         .subscribe_event(|event| println!("{}", event.name()))
//!         .await?;
//!     // ... deploy, then bind an ExaminationClient to the new address
//!     subscription.unsubscribe();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod ethereum;
pub mod services;
pub mod types;

pub use config::Config;
pub use crypto::Passphrase;
pub use error::{AppError, Result};
pub use ethereum::{EthereumClient, EventSubscription, WalletManager};
pub use services::{ExaminationClient, ManagementClient};
pub use types::{
    ExaminationEvent, ExaminationInfo, MedicalNote, PatientInfo, PatientKey, PaymentStatus,
    TokenData,
};
