//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Encoded form: `$pbkdf2-sha256$<iterations>$<salt>$<hash>`, salt and hash in
//! unpadded standard base64.

use base64::{engine::general_purpose::STANDARD_NO_PAD as Base64, Engine as _};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
pub const PBKDF2_ITERATIONS: u32 = 29_000;

#[derive(Debug, Error, PartialEq)]
pub enum PasswordError {
    #[error("stored password hash is malformed")]
    Malformed,
    #[error("unsupported password hash scheme '{0}'")]
    UnsupportedScheme(String),
}

pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    hash_with_salt(password, &salt, PBKDF2_ITERATIONS)
}

fn hash_with_salt(password: &str, salt: &[u8], iterations: u32) -> String {
    let key = derive_key(password, salt, iterations);
    format!(
        "${SCHEME}${iterations}${}${}",
        Base64.encode(salt),
        Base64.encode(key)
    )
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

/// Returns `Ok(false)` for a wrong password and `Err` only when `encoded`
/// is not a hash this module produced.
pub fn verify_password(password: &str, encoded: &str) -> Result<bool, PasswordError> {
    let mut parts = encoded.split('$');
    let (Some(""), Some(scheme), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(PasswordError::Malformed);
    };

    if scheme != SCHEME {
        return Err(PasswordError::UnsupportedScheme(scheme.to_string()));
    }

    let iterations: u32 = iterations.parse().map_err(|_| PasswordError::Malformed)?;
    let salt = Base64.decode(salt).map_err(|_| PasswordError::Malformed)?;
    let expected = Base64.decode(hash).map_err(|_| PasswordError::Malformed)?;
    if expected.len() != KEY_LEN {
        return Err(PasswordError::Malformed);
    }

    let actual = derive_key(password, &salt, iterations);
    Ok(constant_time_eq(&actual, &expected))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
