//
//  cpanel-publicapi
//  config.rs
//

//! # Session Configuration
//!
//! Constructor configuration for [`PublicApi`](crate::PublicApi). The
//! struct mirrors the recognized constructor keys of the remote panel's
//! historical clients and deserializes from any serde format, so callers
//! holding configuration as JSON or TOML mappings can feed it straight in.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration accepted by [`PublicApi::new`](crate::PublicApi::new).
///
/// # Defaults
///
/// | Field | Default |
/// |-------|---------|
/// | `user` | `root` |
/// | `pass` / `accesshash` | unset; the resolver fallback chain runs |
/// | `timeout` | 300 seconds |
/// | `ip` | `127.0.0.1` |
/// | `host` | unset; overrides `ip` when present |
/// | `usessl` | `true` |
/// | `error_log` | unset; diagnostics go to standard error |
/// | `debug` | `false` |
///
/// When both `pass` and `accesshash` are supplied, the access hash wins;
/// when both `host` and `ip` are supplied, the host wins. Both precedences
/// are fixed and tested rather than left ambiguous.
///
/// # Example
///
/// ```rust
/// use cpanel_publicapi::Config;
///
/// let config = Config::default()
///     .user("root")
///     .accesshash("deadbeef")
///     .host("cp.example.com");
/// assert_eq!(config.timeout, 300);
/// assert!(config.usessl);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Account to authenticate as.
    pub user: Option<String>,
    /// Password, used for HTTP Basic authentication.
    pub pass: Option<String>,
    /// Access hash, used for the panel's own authentication schemes.
    /// Takes precedence over `pass` when both are set.
    pub accesshash: Option<String>,
    /// Whole-request timeout in seconds.
    pub timeout: u64,
    /// Target address when no `host` is given.
    pub ip: String,
    /// Target hostname; overrides `ip` when set.
    pub host: Option<String>,
    /// Whether to use TLS (selects the services' TLS ports).
    pub usessl: bool,
    /// Path for diagnostic output; standard error when unset.
    pub error_log: Option<PathBuf>,
    /// Whether to write wire diagnostics to the sink.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: None,
            pass: None,
            accesshash: None,
            timeout: 300,
            ip: "127.0.0.1".to_string(),
            host: None,
            usessl: true,
            error_log: None,
            debug: false,
        }
    }
}

impl Config {
    /// Sets the account name.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Sets the password.
    pub fn pass(mut self, pass: impl Into<String>) -> Self {
        self.pass = Some(pass.into());
        self
    }

    /// Sets the access hash.
    pub fn accesshash(mut self, hash: impl Into<String>) -> Self {
        self.accesshash = Some(hash.into());
        self
    }

    /// Sets the target hostname.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the target address used when no hostname is given.
    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = ip.into();
        self
    }

    /// Sets the whole-request timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Selects TLS or plaintext transport.
    pub fn usessl(mut self, usessl: bool) -> Self {
        self.usessl = usessl;
        self
    }

    /// Routes diagnostics to a file instead of standard error.
    pub fn error_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.error_log = Some(path.into());
        self
    }

    /// Enables wire diagnostics.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The resolved target: `host` when set, otherwise `ip`.
    pub(crate) fn target(&self) -> String {
        self.host.clone().unwrap_or_else(|| self.ip.clone())
    }
}
