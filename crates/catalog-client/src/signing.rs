//! Request signing.

use md5::{Digest, Md5};

/// Computes the request hash: lowercase hex of `md5(ts + private_key + public_key)`.
#[must_use]
pub fn sign(ts: &str, private_key: &str, public_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(ts.as_bytes());
    hasher.update(private_key.as_bytes());
    hasher.update(public_key.as_bytes());
    hex::encode(hasher.finalize())
}
