//! WASM bindings for checksum utilities.

use wasm_bindgen::prelude::*;

/// Compute a request checksum and return it as a hex string.
///
/// # Arguments
/// * `params` - Formatted `key=value` parameters and body fragments
/// * `secret` - API secret
/// * `timestamp` - Unix time in seconds
/// * `nonce` - Random string sent as `r`
#[wasm_bindgen(js_name = requestChecksum)]
pub fn request_checksum(params: Vec<String>, secret: &str, timestamp: i64, nonce: &str) -> String {
    crate::build_request_checksum(&params, secret, timestamp, nonce)
}

/// Compute a callback checksum over an already built payload.
#[wasm_bindgen(js_name = callbackChecksum)]
pub fn callback_checksum(payload: &str) -> Result<String, JsError> {
    crate::build_callback_checksum(payload).map_err(|e| JsError::new(&e.to_string()))
}

/// Compute a callback checksum over `body` followed by `secret`.
#[wasm_bindgen(js_name = callbackChecksumWithSecret)]
pub fn callback_checksum_with_secret(body: &str, secret: &str) -> Result<String, JsError> {
    callback_checksum(&crate::callback_payload(body, secret))
}
