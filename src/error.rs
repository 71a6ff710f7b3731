//
//  cpanel-publicapi
//  error.rs
//

//! # Error Types
//!
//! Unified error type for the client library. Failures inside the four call
//! operations are folded into the uniform [`ApiResult`](crate::ApiResult)
//! failure shape before they reach the caller; `Error` itself surfaces from
//! construction ([`PublicApi::new`](crate::PublicApi::new)) and from the raw
//! request path, where there is no result envelope to fold into.

use thiserror::Error;

/// Errors produced by the client library.
///
/// # Variants
///
/// | Variant | Meaning |
/// |---------|---------|
/// | `AuthenticationUnavailable` | No usable credential after the fallback chain |
/// | `MissingRequiredField` | A call was missing a field its dialect requires |
/// | `Transport` | Network, DNS, or timeout failure |
/// | `Decode` | Malformed body for an explicitly requested format |
/// | `Configuration` | The environment cannot support the request at all |
/// | `Io` | Local I/O failure (debug sink, access-hash file) |
/// | `Http` | The underlying HTTP client could not be built |
///
/// # Example
///
/// ```rust
/// use cpanel_publicapi::Error;
///
/// fn require_user(user: Option<&str>) -> Result<&str, Error> {
///     user.ok_or_else(|| Error::MissingRequiredField("user".to_string()))
/// }
///
/// assert!(require_user(None).is_err());
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// No usable credential could be resolved.
    ///
    /// Raised at construction time when neither `pass` nor `accesshash` was
    /// supplied and the fallback chain (access-hash file, then the
    /// `REMOTE_PASSWORD` environment variable) produced nothing.
    #[error("no usable credential: supply a password or access hash, create ~/.accesshash, or set REMOTE_PASSWORD")]
    AuthenticationUnavailable,

    /// A required call field was absent.
    ///
    /// The account-API encoders require a target `user` when the call is
    /// routed through the administrative service.
    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    /// The request never completed: connection failure, DNS failure, or the
    /// configured timeout elapsed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body could not be parsed in the requested format.
    #[error("decode failure: {0}")]
    Decode(String),

    /// The process environment cannot satisfy the request, e.g. no JSON
    /// decoder backend is registered. Unlike the other variants this is not
    /// a per-call condition.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Local I/O failure while opening the debug sink or reading the
    /// access-hash file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
