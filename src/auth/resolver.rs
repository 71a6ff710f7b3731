//
//  cpanel-publicapi
//  auth/resolver.rs
//

//! # Credential Resolver
//!
//! Fallback resolution for sessions constructed without explicit
//! authentication material. The chain mirrors what operators expect on a
//! panel host: a per-user access-hash file first, then a well-known
//! environment variable holding a password.
//!
//! All environment and filesystem access goes through [`CredentialSource`],
//! so the chain can be exercised against fixtures without touching real
//! process state.

use std::path::{Path, PathBuf};

use directories::UserDirs;

use crate::auth::{strip_line_breaks, Credential};
use crate::error::{Error, Result};

/// File name of the per-user access-hash file, relative to the home
/// directory.
pub const ACCESS_HASH_FILE: &str = ".accesshash";

/// Environment variable consulted for a password when no access hash is
/// found.
pub const PASSWORD_ENV_VAR: &str = "REMOTE_PASSWORD";

/// Access to the environment and filesystem used during resolution.
///
/// The default implementation, [`SystemSource`], reads the real process
/// environment and home directory. Tests provide fixture implementations
/// backed by temporary directories.
pub trait CredentialSource {
    /// The home directory of the invoking user, if known.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Reads an environment variable, `None` when unset or not unicode.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Reads a file to a string.
    fn read_file(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// The real process environment and filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSource;

impl CredentialSource for SystemSource {
    fn home_dir(&self) -> Option<PathBuf> {
        UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Resolves a credential from the fallback chain.
///
/// 1. `<home>/.accesshash`, line breaks stripped;
/// 2. the `REMOTE_PASSWORD` environment variable;
/// 3. otherwise [`Error::AuthenticationUnavailable`].
///
/// Empty files and empty variables are skipped rather than resolved, so a
/// truncated hash file does not mask a usable password in the environment.
///
/// # Example
///
/// ```rust
/// use std::path::PathBuf;
/// use cpanel_publicapi::auth::{resolve, CredentialSource};
///
/// struct NoSource;
///
/// impl CredentialSource for NoSource {
///     fn home_dir(&self) -> Option<PathBuf> {
///         None
///     }
///     fn env_var(&self, _name: &str) -> Option<String> {
///         None
///     }
/// }
///
/// assert!(resolve(&NoSource).is_err());
/// ```
pub fn resolve(source: &dyn CredentialSource) -> Result<Credential> {
    if let Some(home) = source.home_dir() {
        let path = home.join(ACCESS_HASH_FILE);
        if let Ok(contents) = source.read_file(&path) {
            let hash = strip_line_breaks(&contents);
            if !hash.is_empty() {
                tracing::debug!(path = %path.display(), "resolved access hash from file");
                return Ok(Credential::AccessHash(hash));
            }
        }
    }

    if let Some(pass) = source.env_var(PASSWORD_ENV_VAR) {
        if !pass.is_empty() {
            tracing::debug!(var = PASSWORD_ENV_VAR, "resolved password from environment");
            return Ok(Credential::Password(pass));
        }
    }

    Err(Error::AuthenticationUnavailable)
}
