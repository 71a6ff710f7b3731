//
//  cpanel-publicapi
//  auth/mod.rs
//

//! # Authentication Module
//!
//! Credential modeling and resolution for the client session.
//!
//! A session holds exactly zero or one secret at a time. That invariant is
//! structural: [`Credential`] is a tagged variant rather than a pair of
//! nullable fields, so setting a password necessarily discards any stored
//! access hash and vice versa.
//!
//! ## Supported Credentials
//!
//! - **Password**: sent as an HTTP `Basic` Authorization header.
//! - **Access hash**: a long-lived secret usable in place of a password,
//!   sent with the panel's `WHM`/`cPanel` Authorization schemes. Hashes are
//!   stored on disk with embedded line breaks; those are stripped before
//!   the hash is held or sent.
//!
//! ## Resolution
//!
//! When the constructor receives neither a password nor an access hash,
//! [`resolve`] walks a fallback chain: the per-user access-hash file, then
//! the `REMOTE_PASSWORD` environment variable. The chain reads the
//! filesystem and environment through the [`CredentialSource`] trait so
//! tests can substitute fixtures.

mod resolver;

pub use resolver::{resolve, CredentialSource, SystemSource, ACCESS_HASH_FILE, PASSWORD_ENV_VAR};

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::api::Service;

/// The authentication material held by a session.
///
/// # Variants
///
/// - `Password`: plain password, sent via HTTP Basic auth.
/// - `AccessHash`: access hash, sent via the panel's own header schemes.
/// - `Unset`: no credential held. A constructed session never carries
///   `Unset` (construction fails instead), but the variant keeps the
///   zero-or-one-secret state representable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credential {
    /// A password, for HTTP Basic authentication.
    Password(String),
    /// An access hash, stripped of line breaks.
    AccessHash(String),
    /// No credential held.
    #[default]
    Unset,
}

impl Credential {
    /// Wraps a password.
    pub fn password(pass: impl Into<String>) -> Self {
        Self::Password(pass.into())
    }

    /// Wraps an access hash, stripping all embedded line breaks first.
    ///
    /// Hashes read from their on-disk storage wrap at fixed column widths;
    /// the wire format requires a single unbroken token.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cpanel_publicapi::Credential;
    ///
    /// let cred = Credential::access_hash("abcd\nefgh\r\nijkl\n");
    /// assert_eq!(cred, Credential::AccessHash("abcdefghijkl".to_string()));
    /// ```
    pub fn access_hash(hash: impl AsRef<str>) -> Self {
        Self::AccessHash(strip_line_breaks(hash.as_ref()))
    }

    /// Whether a secret is currently held.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Builds the `Authorization` header value for `user` against `service`.
    ///
    /// Passwords use the standard `Basic` scheme. Access hashes use the
    /// panel's own schemes: `WHM user:hash` for the administrative service
    /// and `cPanel user:hash` for the account and webmail services.
    /// Returns `None` when no credential is held.
    pub fn authorization(&self, user: &str, service: Service) -> Option<String> {
        match self {
            Self::Password(pass) => {
                let encoded = STANDARD.encode(format!("{}:{}", user, pass));
                Some(format!("Basic {}", encoded))
            }
            Self::AccessHash(hash) => {
                let scheme = if service.is_whostmgr() { "WHM" } else { "cPanel" };
                Some(format!("{} {}:{}", scheme, user, hash))
            }
            Self::Unset => None,
        }
    }
}

/// Removes every CR and LF from a string.
pub(crate) fn strip_line_breaks(s: &str) -> String {
    s.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}
