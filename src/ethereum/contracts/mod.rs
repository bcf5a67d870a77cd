//! Smart contract bindings.
//!
//! Fixed ABI descriptors for the Management registry, the Examination
//! contract and the generic ERC-20 token.

pub mod erc20;
pub mod examination;
pub mod management;
