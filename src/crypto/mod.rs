//! Passphrase-keyed encryption for on-chain payloads.
//!
//! Patient data, patient passphrases and medical notes are stored on-chain as
//! opaque strings. Each blob is produced from a passphrase with:
//! 1. Argon2id derives a 32-byte encryption key from the passphrase + random salt
//! 2. AES-256-GCM encrypts the payload with a random nonce
//! 3. The result is hex-encoded as `version || salt || nonce || ciphertext`
//!
//! Decryption is authenticated: a wrong passphrase or a tampered blob yields
//! [`AppError::DecryptionFailed`] instead of garbage output.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

use crate::error::{AppError, Result};

/// Argon2id parameters: 19 MiB memory, 2 iterations, 1 lane of parallelism.
const ARGON2_MEMORY_KIB: u32 = 19456;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;
const ARGON2_OUTPUT_LEN: usize = 32;

/// Blob layout version.
const BLOB_VERSION: u8 = 1;
/// Salt length in bytes.
const SALT_LEN: usize = 16;
/// AES-GCM nonce length in bytes (96 bits).
const NONCE_LEN: usize = 12;
/// version(1) || salt || nonce
const HEADER_LEN: usize = 1 + SALT_LEN + NONCE_LEN;

/// A symmetric encryption passphrase.
///
/// Wrapped so the secret never appears in Debug output.
#[derive(Clone)]
pub struct Passphrase(String);

impl Passphrase {
    /// Wrap a passphrase string.
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(passphrase.into())
    }

    /// Borrow the raw passphrase.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}

/// Encrypt a payload under a passphrase, returning an opaque hex blob.
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String> {
    let mut rng = rand::thread_rng();

    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce_bytes);

    let derived_key = derive_key(passphrase, &salt)?;

    let cipher = Aes256Gcm::new_from_slice(&derived_key)
        .map_err(|e| AppError::Encryption(format!("AES key init failed: {}", e)))?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| AppError::Encryption(format!("encryption failed: {}", e)))?;

    let mut blob = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    blob.push(BLOB_VERSION);
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);

    Ok(alloy::hex::encode(blob))
}

/// Decrypt a blob produced by [`encrypt`] under the same passphrase.
///
/// # Errors
///
/// Returns [`AppError::Parse`] for a structurally invalid blob and
/// [`AppError::DecryptionFailed`] when authentication fails (wrong
/// passphrase or tampered ciphertext).
pub fn decrypt(blob: &str, passphrase: &str) -> Result<String> {
    let raw = alloy::hex::decode(blob)
        .map_err(|_| AppError::Parse("encrypted blob is not valid hex".into()))?;

    if raw.len() < HEADER_LEN {
        return Err(AppError::Parse("encrypted blob is truncated".into()));
    }
    if raw[0] != BLOB_VERSION {
        return Err(AppError::Parse(format!("unsupported blob version: {}", raw[0])));
    }

    let salt = &raw[1..1 + SALT_LEN];
    let nonce_bytes = &raw[1 + SALT_LEN..HEADER_LEN];
    let ciphertext = &raw[HEADER_LEN..];

    let derived_key = derive_key(passphrase, salt)?;

    let cipher = Aes256Gcm::new_from_slice(&derived_key)
        .map_err(|e| AppError::Encryption(format!("AES key init failed: {}", e)))?;

    let nonce = Nonce::from_slice(nonce_bytes);
    let plaintext = cipher.decrypt(nonce, ciphertext).map_err(|_| AppError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| AppError::DecryptionFailed)
}

/// Derive a 32-byte key from a passphrase and salt using Argon2id.
fn derive_key(passphrase: &str, salt: &[u8]) -> Result<[u8; 32]> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        Some(ARGON2_OUTPUT_LEN),
    )
    .map_err(|e| AppError::Encryption(format!("Argon2 params error: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = [0u8; 32];
    argon2
        .hash_password_into(passphrase.as_bytes(), salt, &mut output)
        .map_err(|e| AppError::Encryption(format!("Argon2 hashing failed: {}", e)))?;

    Ok(output)
}
