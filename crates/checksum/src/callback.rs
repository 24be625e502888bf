//! Callback checksums for inbound notifications.

use std::io::{self, Read};

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::Result;

/// Build the conventional callback payload: the raw body followed by the secret.
pub fn callback_payload(body: &str, secret: &str) -> String {
    let mut payload = String::with_capacity(body.len() + secret.len());
    payload.push_str(body);
    payload.push_str(secret);
    payload
}

/// Compute the callback checksum of `payload`.
///
/// The payload is hashed as-is; building it (usually with
/// [`callback_payload`]) is the caller's job.
///
/// # Returns
/// SHA-256 of the payload as padded URL-safe base64 (44 characters)
pub fn build_callback_checksum(payload: &str) -> Result<String> {
    callback_checksum_from_reader(payload.as_bytes())
}

/// Compute the callback checksum of everything `reader` yields.
///
/// # Errors
/// Returns [`ChecksumError::Encoding`](crate::ChecksumError::Encoding) if the
/// reader fails before reaching end of input.
pub fn callback_checksum_from_reader<R: Read>(mut reader: R) -> Result<String> {
    let mut hasher = Sha256::new();
    let hashed = io::copy(&mut reader, &mut hasher)?;
    tracing::debug!(bytes = hashed, "computed callback checksum");
    Ok(URL_SAFE.encode(hasher.finalize()))
}
