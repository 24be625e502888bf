//! Checksums for the SOFA wallet API.
//!
//! This crate provides:
//! - Request checksums (sorted `key=value` parameters, timestamp, nonce and
//!   secret, hashed with SHA-256 and rendered as hex)
//! - Callback checksums (SHA-256 of body and secret, rendered as URL-safe base64)
//!
//! Both are plain functions over in-memory input. Timestamp and nonce
//! generation, transport and verification are left to the caller.
//!
//! # Example
//!
//! ```rust
//! use sofa_checksum::{build_callback_checksum, build_request_checksum, callback_payload};
//!
//! let params = ["from_time=1561651200", "to_time=1562255999", "type=2"];
//! let checksum = build_request_checksum(&params, "API_SECRET", 1629346605, "RANDOM_STRING");
//! assert_eq!(checksum.len(), 64);
//!
//! let payload = callback_payload("{}", "API_SECRET");
//! let callback = build_callback_checksum(&payload).unwrap();
//! assert_eq!(callback, "UnYre6oBsL7B_AKDmvQMnHileDAJZ53zs4IsT86Wt5c=");
//! ```

#![warn(missing_docs)]

mod callback;
mod error;
mod request;

#[cfg(feature = "wasm")]
mod wasm;

pub use callback::{build_callback_checksum, callback_checksum_from_reader, callback_payload};
pub use error::{ChecksumError, Result};
pub use request::{build_request_checksum, canonical_request_string, RequestChecksumBuilder};
