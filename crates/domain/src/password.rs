use rand::RngCore;
use sha2::{Digest, Sha256};

/// Encoded digest layout: `<salt-hex>$<sha256-hex>`.
const SALT_LEN: usize = 16;

/// Hash a plaintext password with a fresh random salt.
pub fn hash(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    format!("{}${}", hex::encode(salt), digest(&salt, password))
}

/// Constant-shape verification against an encoded digest.
pub fn verify(password: &str, encoded: &str) -> bool {
    let Some((salt_hex, expected)) = encoded.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    digest(&salt, password) == expected
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
