//! API key hashing. Only the SHA-256 of the client key is ever configured.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// SHA-256 of a key, lowercase hex
pub fn hash_api_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Check a provided key against the configured hash.
///
/// Compares every byte regardless of where the first mismatch is.
pub fn verify_api_key(provided: &str, expected_hash: &str) -> bool {
    let actual = hash_api_key(provided);
    let expected = expected_hash.trim().to_lowercase();

    if actual.len() != expected.len() {
        return false;
    }

    actual
        .bytes()
        .zip(expected.bytes())
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// New random key (32 bytes, hex) and its hash
pub fn generate_api_key_and_hash() -> (String, String) {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);

    let key = hex::encode(bytes);
    let hash = hash_api_key(&key);
    (key, hash)
}
