use sha2::{Digest, Sha256};

/// Unsalted SHA-256 hex digest. The demo seed and the mock-OAuth
/// placeholder hashes depend on this being deterministic; it is not
/// suitable for production credential storage.
pub fn hash_password(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}

pub fn verify_password(plain: &str, hash: &str) -> bool {
    hash_password(plain) == hash
}
