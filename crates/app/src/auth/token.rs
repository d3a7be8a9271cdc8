//! API token generation, parsing and hashing.
//!
//! Tokens look like `sf_<64 hex chars>`. Only the SHA-256 digest of the full
//! token string is stored.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroize;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "sf";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    ApiTokenSecret::from_bytes(secret)
}

#[must_use]
pub fn format_api_token(secret: &ApiTokenSecret) -> String {
    let mut token = String::with_capacity(API_TOKEN_PREFIX.len() + 1 + API_TOKEN_SECRET_HEX_CHARS);

    token.push_str(API_TOKEN_PREFIX);
    token.push('_');

    for byte in secret.as_bytes() {
        token.push_str(&format!("{byte:02x}"));
    }

    token
}

/// Check that `token` has the shape of an issued token before it is hashed
/// and looked up.
pub fn parse_api_token(token: &str) -> Result<ApiTokenSecret, ApiTokenError> {
    let secret_hex = token
        .strip_prefix(API_TOKEN_PREFIX)
        .and_then(|rest| rest.strip_prefix('_'))
        .ok_or(ApiTokenError::InvalidFormat)?;

    if secret_hex.len() != API_TOKEN_SECRET_HEX_CHARS {
        return Err(ApiTokenError::InvalidSecretEncoding);
    }

    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let pair = std::str::from_utf8(pair).map_err(|_| ApiTokenError::InvalidSecretEncoding)?;

        *byte = u8::from_str_radix(pair, 16).map_err(|_| ApiTokenError::InvalidSecretEncoding)?;
    }

    Ok(ApiTokenSecret::from_bytes(secret))
}

/// Hex-encoded SHA-256 digest of the raw token, as stored in `api_tokens`.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_token_parses_back_to_secret() -> Result<(), ApiTokenError> {
        let secret = ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(&secret);

        assert!(token.starts_with("sf_abab"));
        assert_eq!(token.len(), 3 + API_TOKEN_SECRET_HEX_CHARS);
        assert_eq!(parse_api_token(&token)?.as_bytes(), secret.as_bytes());

        Ok(())
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        assert_eq!(
            parse_api_token(&format!("xx_{}", "ab".repeat(32))).err(),
            Some(ApiTokenError::InvalidFormat)
        );
    }

    #[test]
    fn parse_rejects_bad_hex() {
        assert_eq!(
            parse_api_token(&format!("sf_{}", "zz".repeat(32))).err(),
            Some(ApiTokenError::InvalidSecretEncoding)
        );
        assert_eq!(
            parse_api_token("sf_abcd").err(),
            Some(ApiTokenError::InvalidSecretEncoding)
        );
    }

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            hash_api_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn generated_secrets_differ() {
        let a = generate_api_token_secret();
        let b = generate_api_token_secret();

        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
