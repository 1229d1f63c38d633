//! Content fingerprints for change detection
//!
//! The OpenAPI document served by the host is fingerprinted with SHA-256 and
//! the digest is stored base64-encoded next to the generated SDKs. A changed
//! fingerprint is the only thing that invalidates the SDK cache.
//!
//! # Examples
//!
//! ```
//! use scalar_kiota_core::hash::compute_hash;
//!
//! let fingerprint = compute_hash("");
//! assert_eq!(fingerprint, "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

/// Length of a base64-encoded SHA-256 digest (with padding)
pub const FINGERPRINT_LEN: usize = 44;

/// Compute the base64-encoded SHA-256 digest of `content`
///
/// Total over every input, including the empty string. The same content
/// always yields the same fingerprint across runs and processes.
pub fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    STANDARD.encode(hasher.finalize())
}

/// Check whether `fingerprint` looks like a value produced by [`compute_hash`]
///
/// Used to tell a truncated or hand-edited hash file apart from a real
/// fingerprint when logging cache misses.
pub fn is_valid_fingerprint(fingerprint: &str) -> bool {
    fingerprint.len() == FINGERPRINT_LEN
        && STANDARD
            .decode(fingerprint)
            .map(|bytes| bytes.len() == 32)
            .unwrap_or(false)
}
