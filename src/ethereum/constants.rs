//! Ethereum network constants.

/// Fixed safety margin added to every gas estimate before signing.
pub const GAS_LIMIT_MARGIN: u64 = 10_000;
