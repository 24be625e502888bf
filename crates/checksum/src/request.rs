//! Request checksums for outbound API calls.
//!
//! The canonical string is built from every query parameter and body
//! fragment, plus `t=<timestamp>` and `r=<nonce>`, sorted by byte order and
//! joined with `&`. `secret=<secret>` is appended after sorting so it is
//! always the last entry. The checksum is the lowercase hex SHA-256 of that
//! string.

use std::fmt;

use sha2::{Digest, Sha256};

/// Build the canonical string hashed by [`build_request_checksum`].
///
/// `params` is copied; the caller's slice is left untouched.
///
/// The result contains the secret in clear text. Do not log it.
pub fn canonical_request_string<S: AsRef<str>>(
    params: &[S],
    secret: &str,
    timestamp: i64,
    nonce: &str,
) -> String {
    let mut entries: Vec<String> = Vec::with_capacity(params.len() + 3);
    entries.extend(params.iter().map(|p| p.as_ref().to_owned()));
    entries.push(format!("t={timestamp}"));
    entries.push(format!("r={nonce}"));
    entries.sort_unstable();
    entries.push(format!("secret={secret}"));
    entries.join("&")
}

/// Compute the request checksum.
///
/// # Arguments
/// * `params` - Query parameters and body fragments, each already formatted
/// * `secret` - API secret shared with the server
/// * `timestamp` - Unix time in seconds, sent as `t`
/// * `nonce` - Random string, sent as `r`
///
/// # Returns
/// SHA-256 of the canonical string as 64 lowercase hex characters
pub fn build_request_checksum<S: AsRef<str>>(
    params: &[S],
    secret: &str,
    timestamp: i64,
    nonce: &str,
) -> String {
    let canonical = canonical_request_string(params, secret, timestamp, nonce);
    tracing::debug!(
        params = params.len(),
        timestamp,
        "computing request checksum"
    );
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// Chainable form of [`build_request_checksum`].
///
/// Keeps query parameters apart from body fragments so it can also render
/// the query string the request has to carry.
///
/// ```
/// use sofa_checksum::RequestChecksumBuilder;
///
/// let request = RequestChecksumBuilder::new("API_SECRET")
///     .param("from_time", 1561651200)
///     .param("to_time", 1562255999)
///     .param("type", 2)
///     .timestamp(1629346605)
///     .nonce("RANDOM_STRING");
///
/// assert_eq!(
///     request.query_string(),
///     "from_time=1561651200&to_time=1562255999&type=2&t=1629346605&r=RANDOM_STRING"
/// );
/// assert_eq!(
///     request.build(),
///     "d30ac1bc916e44feaf224f3905b4a41a084fa7149f92cba1b5cfdfa63e3da330"
/// );
/// ```
#[derive(Clone, Default)]
pub struct RequestChecksumBuilder {
    secret: String,
    query: Vec<String>,
    body: Vec<String>,
    timestamp: i64,
    nonce: String,
}

impl RequestChecksumBuilder {
    /// Start a request signed with `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// Add a `key=value` query parameter.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.query.push(format!("{key}={value}"));
        self
    }

    /// Add an already formatted `key=value` query parameter.
    #[must_use]
    pub fn query(mut self, fragment: impl Into<String>) -> Self {
        self.query.push(fragment.into());
        self
    }

    /// Add several already formatted query parameters.
    #[must_use]
    pub fn queries<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.extend(fragments.into_iter().map(Into::into));
        self
    }

    /// Add the serialized request body.
    ///
    /// Body fragments take part in the checksum but not in the query string.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body.push(body.into());
        self
    }

    /// Set the Unix timestamp sent as `t`. Defaults to `0`.
    #[must_use]
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the nonce sent as `r`. Defaults to the empty string.
    #[must_use]
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = nonce.into();
        self
    }

    /// Every entry that goes into the checksum, in insertion order.
    fn entries(&self) -> Vec<&str> {
        self.query
            .iter()
            .chain(self.body.iter())
            .map(String::as_str)
            .collect()
    }

    /// The canonical string for this request. Contains the secret.
    pub fn canonical_string(&self) -> String {
        canonical_request_string(&self.entries(), &self.secret, self.timestamp, &self.nonce)
    }

    /// Query string to append to the request URL.
    ///
    /// Parameters keep their insertion order and are followed by `t` and
    /// `r`. Values are emitted as given; percent-encoding is up to the
    /// caller.
    pub fn query_string(&self) -> String {
        let mut parts: Vec<String> = self.query.clone();
        parts.push(format!("t={}", self.timestamp));
        parts.push(format!("r={}", self.nonce));
        parts.join("&")
    }

    /// Compute the checksum.
    pub fn build(&self) -> String {
        build_request_checksum(&self.entries(), &self.secret, self.timestamp, &self.nonce)
    }
}

impl fmt::Debug for RequestChecksumBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestChecksumBuilder")
            .field("secret", &"<redacted>")
            .field("query", &self.query)
            .field("body", &self.body)
            .field("timestamp", &self.timestamp)
            .field("nonce", &self.nonce)
            .finish()
    }
}
