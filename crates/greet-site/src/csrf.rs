//! CSRF Token Signing
//!
//! Stateless anti-forgery tokens: a random nonce signed with HMAC-SHA256
//! under the process-wide secret. The token a GET embeds in the form is
//! verified on the following POST without any session store.

use std::fmt::Write as _;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Nonce length in bytes before hex encoding.
const NONCE_LEN: usize = 16;

/// Errors from CSRF token verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsrfError {
    #[error("csrf token missing")]
    Missing,
    #[error("csrf token malformed")]
    Malformed,
    #[error("csrf token invalid")]
    Invalid,
}

/// Mints and verifies CSRF tokens for one signing secret.
#[derive(Clone)]
pub struct CsrfSigner {
    key: Vec<u8>,
}

impl CsrfSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    /// Mint a fresh token: `{nonce_hex}.{mac_hex}`.
    pub fn mint(&self) -> String {
        let nonce: [u8; NONCE_LEN] = rand::random();
        let nonce_hex = hex_encode(&nonce);
        let mac_hex = self.mac_hex(&nonce_hex);
        format!("{nonce_hex}.{mac_hex}")
    }

    /// Verify a submitted token against this signer's secret.
    ///
    /// # Errors
    ///
    /// Returns [`CsrfError::Missing`] for an empty token, [`CsrfError::Malformed`]
    /// when the token does not have the nonce.mac shape, and [`CsrfError::Invalid`]
    /// when the signature does not match.
    pub fn verify(&self, token: &str) -> Result<(), CsrfError> {
        if token.is_empty() {
            return Err(CsrfError::Missing);
        }

        let (nonce_hex, mac_hex) = token.split_once('.').ok_or(CsrfError::Malformed)?;
        if nonce_hex.len() != NONCE_LEN * 2 || mac_hex.is_empty() {
            return Err(CsrfError::Malformed);
        }

        let expected = self.mac_hex(nonce_hex);

        // Constant-time comparison to prevent timing attacks
        if constant_time_eq(expected.as_bytes(), mac_hex.as_bytes()) {
            Ok(())
        } else {
            Err(CsrfError::Invalid)
        }
    }

    /// Compute the hex-encoded HMAC-SHA256 of a nonce under the secret.
    fn mac_hex(&self, nonce_hex: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length");
        mac.update(nonce_hex.as_bytes());
        hex_encode(&mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for CsrfSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The key never appears in logs.
        f.debug_struct("CsrfSigner").finish_non_exhaustive()
    }
}

/// Lowercase hex encoding.
fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Constant-time byte slice comparison to prevent timing side-channels.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_token_verifies() {
        let signer = CsrfSigner::new("secret");
        let token = signer.mint();
        assert_eq!(signer.verify(&token), Ok(()));
    }

    #[test]
    fn test_each_mint_is_unique() {
        let signer = CsrfSigner::new("secret");
        assert_ne!(signer.mint(), signer.mint());
    }

    #[test]
    fn test_empty_token_is_missing() {
        let signer = CsrfSigner::new("secret");
        assert_eq!(signer.verify(""), Err(CsrfError::Missing));
    }

    #[test]
    fn test_token_without_separator_is_malformed() {
        let signer = CsrfSigner::new("secret");
        assert_eq!(signer.verify("deadbeef"), Err(CsrfError::Malformed));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let signer = CsrfSigner::new("secret");
        let token = signer.mint();
        let mut tampered = token[..token.len() - 1].to_string();
        tampered.push(if token.ends_with('0') { '1' } else { '0' });
        assert_eq!(signer.verify(&tampered), Err(CsrfError::Invalid));
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let minter = CsrfSigner::new("secret-a");
        let verifier = CsrfSigner::new("secret-b");
        assert_eq!(verifier.verify(&minter.mint()), Err(CsrfError::Invalid));
    }

    #[test]
    fn test_hex_encode() {
        assert_eq!(hex_encode(&[0x00, 0xff, 0x0a]), "00ff0a");
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
