//! BLAKE3 content fingerprinting
//!
//! Fingerprints are computed over the exact bytes retrieved from a source and
//! hex-encoded. They are used for change detection between syncs, not for
//! transport integrity.

/// Calculate the hex-encoded BLAKE3 fingerprint of content bytes
pub fn fingerprint(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}

/// Shorten a fingerprint for display (first 8 hex characters)
pub fn short(sha: &str) -> &str {
    if sha.len() >= 8 { &sha[..8] } else { sha }
}
