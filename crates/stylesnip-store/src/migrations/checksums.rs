//! Content hashes of migration SQL
//!
//! A stored hash that no longer matches the embedded SQL means a migration
//! was edited after it ran; the runner refuses to continue.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `sql`
pub fn compute_checksum(sql: &str) -> String {
    hex::encode(Sha256::digest(sql.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_hex_sha256() {
        let checksum = compute_checksum("SELECT 1");
        assert_eq!(checksum.len(), 64);
        assert!(checksum.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_checksum_differs_on_edit() {
        assert_ne!(compute_checksum("SELECT 1"), compute_checksum("SELECT 2"));
    }
}
