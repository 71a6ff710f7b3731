//
//  cpanel-publicapi
//  client.rs
//

//! # Session Facade
//!
//! [`PublicApi`] is the object-level entry point. It ties the pieces
//! together for each of the four call operations: resolve credentials
//! once at construction, encode the call for its dialect, hand the result
//! to the transport with the right authorization header, and normalize
//! the response into the uniform [`ApiResult`] shape.
//!
//! ## Creating a session
//!
//! ```rust,no_run
//! use cpanel_publicapi::{Config, PublicApi, ResponseFormat};
//!
//! let client = PublicApi::new(
//!     Config::default()
//!         .user("root")
//!         .accesshash("deadbeef")
//!         .host("cp.example.com"),
//! )?;
//!
//! let result = client.whm_api("version", &[], ResponseFormat::Json);
//! if result.ok {
//!     println!("remote version: {}", result.data["version"]);
//! }
//! # Ok::<(), cpanel_publicapi::Error>(())
//! ```
//!
//! ## Error surface
//!
//! The three dialect operations never return `Err`: every failure —
//! missing field, transport, decode — is folded into
//! `ApiResult { ok: false, error }`, so callers branch on one flag. The
//! raw operation returns a plain `Result` instead, because its callers
//! have opted out of normalization entirely.

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use crate::api::{api1, api2, whm, Encoded, ResponseFormat, Service};
use crate::auth::{self, Credential, CredentialSource, SystemSource};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{format_query, HeaderInput};
use crate::response::{self, ApiResult};
use crate::transport::{Method, RawResponse, Transport};

/// A long-lived session against one panel host.
///
/// Holds the resolved identity and credential, the target host and TLS
/// selection, the transport, and the diagnostic sink. Credential state is
/// mutable through the setters, which enforce the zero-or-one-secret
/// invariant; calls themselves take `&self` and are safe to issue from
/// multiple threads as long as configuration is not mutated concurrently.
pub struct PublicApi {
    user: String,
    credential: Credential,
    host: String,
    usessl: bool,
    debug: bool,
    transport: Transport,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for PublicApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicApi")
            .field("user", &self.user)
            .field("host", &self.host)
            .field("usessl", &self.usessl)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl PublicApi {
    /// Creates a session from `config`, resolving credentials against the
    /// real environment and filesystem.
    ///
    /// When `config` carries neither `pass` nor `accesshash`, the
    /// resolver fallback chain runs (access-hash file, then the
    /// `REMOTE_PASSWORD` environment variable). Failure to resolve any
    /// credential is an error here, at construction, not at first call.
    ///
    /// # Errors
    ///
    /// [`Error::AuthenticationUnavailable`] when no credential resolves;
    /// [`Error::Io`] when the configured `error_log` cannot be opened;
    /// [`Error::Http`] when the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_source(config, &SystemSource)
    }

    /// Creates a session resolving credentials through `source`.
    ///
    /// This is [`PublicApi::new`] with the environment/filesystem
    /// accessor made explicit, so tests can construct sessions against
    /// fixtures.
    pub fn with_source(config: Config, source: &dyn CredentialSource) -> Result<Self> {
        // Access hash wins over password when both are configured.
        let credential = if let Some(hash) = config.accesshash.as_deref() {
            Credential::access_hash(hash)
        } else if let Some(pass) = config.pass.clone() {
            Credential::Password(pass)
        } else {
            auth::resolve(source)?
        };

        let sink: Box<dyn Write + Send> = match &config.error_log {
            Some(path) => Box::new(OpenOptions::new().create(true).append(true).open(path)?),
            None => Box::new(std::io::stderr()),
        };

        let transport = Transport::new(config.usessl, Duration::from_secs(config.timeout))?;

        Ok(Self {
            user: config.user.clone().unwrap_or_else(|| "root".to_string()),
            credential,
            host: config.target(),
            usessl: config.usessl,
            debug: config.debug,
            transport,
            sink: Mutex::new(sink),
        })
    }

    /// Replaces the account name.
    pub fn set_user(&mut self, user: impl Into<String>) {
        self.user = user.into();
    }

    /// Stores a password, discarding any held access hash.
    pub fn set_password(&mut self, pass: impl Into<String>) {
        self.credential = Credential::Password(pass.into());
    }

    /// Stores an access hash (line breaks stripped), discarding any held
    /// password.
    pub fn set_accesshash(&mut self, hash: impl AsRef<str>) {
        self.credential = Credential::access_hash(hash);
    }

    /// Toggles wire diagnostics.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// The currently held credential.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Calls the administrative (WHM) API.
    ///
    /// `function` names the remote call; `params` is its flat named
    /// parameter set. Every failure is reported through the returned
    /// result's `ok`/`error` fields.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use cpanel_publicapi::{Config, PublicApi, ResponseFormat};
    /// # let client = PublicApi::new(Config::default().user("root").accesshash("ff"))?;
    /// let result = client.whm_api("suspendacct", &[("user", "bob")], ResponseFormat::Native);
    /// assert!(result.ok || result.error.is_some());
    /// # Ok::<(), cpanel_publicapi::Error>(())
    /// ```
    pub fn whm_api(
        &self,
        function: &str,
        params: &[(&str, &str)],
        format: ResponseFormat,
    ) -> ApiResult {
        self.whm_api_on(Service::Whostmgr, function, params, format)
    }

    /// Calls the administrative API through an explicit service.
    ///
    /// [`PublicApi::whm_api`] targets the well-known administrative ports;
    /// this variant accepts a [`Service`] (typically [`Service::Port`])
    /// for deployments whose administrative listener sits behind a
    /// nonstandard port or proxy.
    pub fn whm_api_on(
        &self,
        service: Service,
        function: &str,
        params: &[(&str, &str)],
        format: ResponseFormat,
    ) -> ApiResult {
        ApiResult::from_outcome(
            whm::encode(function, params, format)
                .and_then(|encoded| self.dispatch(service, encoded, format)),
        )
    }

    /// Calls the first-generation account API.
    ///
    /// Arguments are positional and end up numbered (`arg-0`, `arg-1`, …)
    /// on the wire. `user` is required when `service` is the
    /// administrative one.
    pub fn cpanel_api1(
        &self,
        service: Service,
        module: &str,
        function: &str,
        user: Option<&str>,
        args: &[&str],
        format: ResponseFormat,
    ) -> ApiResult {
        ApiResult::from_outcome(
            api1::encode(service, module, function, user, args, format)
                .and_then(|encoded| self.dispatch(service, encoded, format)),
        )
    }

    /// Calls the second-generation account API.
    ///
    /// Parameters are named and merged with the module/function
    /// identifiers. `user` is required when `service` is the
    /// administrative one.
    pub fn cpanel_api2(
        &self,
        service: Service,
        module: &str,
        function: &str,
        user: Option<&str>,
        params: &[(&str, &str)],
        format: ResponseFormat,
    ) -> ApiResult {
        ApiResult::from_outcome(
            api2::encode(service, module, function, user, params, format)
                .and_then(|encoded| self.dispatch(service, encoded, format)),
        )
    }

    /// Issues a direct request against an arbitrary URI on `service`.
    ///
    /// No dialect encoding and no response decoding happen: `params` are
    /// serialized as a query/body, the authorization header is added, and
    /// the response body comes back verbatim. Callers of this path have
    /// opted out of normalization.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] on network failure and
    /// [`Error::AuthenticationUnavailable`] when the session holds no
    /// credential.
    pub fn api_request(
        &self,
        service: Service,
        uri: &str,
        method: Method,
        params: &[(&str, &str)],
        headers: Option<HeaderInput>,
    ) -> Result<String> {
        let body = format_query(params);
        let extra = headers.map(HeaderInput::into_pairs).unwrap_or_default();
        let raw = self.perform(service, uri, method, &body, extra)?;
        Ok(raw.body)
    }

    /// Shared tail of the three dialect operations: send, then decode.
    ///
    /// A non-2xx status is a failure in its own right. When the body
    /// decodes to a failure envelope its message is kept; any other body
    /// (an error page, or a payload with no envelope) is replaced by the
    /// status line, so an HTTP error never surfaces as `ok: true`.
    fn dispatch(
        &self,
        service: Service,
        encoded: Encoded,
        format: ResponseFormat,
    ) -> Result<ApiResult> {
        let raw = self.perform(service, &encoded.path, Method::Post, &encoded.query, vec![])?;
        let decoded = response::decode(&raw.body, raw.content_type.as_deref(), format);
        if !raw.success {
            return Ok(match decoded {
                Ok(result) if !result.ok => result,
                _ => ApiResult::failure(http_failure(&raw)),
            });
        }
        decoded
    }

    /// Builds authorization, logs, and performs one round-trip.
    fn perform(
        &self,
        service: Service,
        path: &str,
        method: Method,
        body: &str,
        extra_headers: Vec<(String, String)>,
    ) -> Result<RawResponse> {
        let authorization = self
            .credential
            .authorization(&self.user, service)
            .ok_or(Error::AuthenticationUnavailable)?;

        let mut headers = vec![("Authorization".to_string(), authorization)];
        headers.extend(extra_headers);

        let port = service.port(self.usessl);
        self.debug_log(format_args!(
            "request {}:{}{} body={}",
            self.host, port, path, body
        ));

        let raw = self.transport.send(&self.host, port, path, method, body, &headers)?;

        self.debug_log(format_args!(
            "response status={} bytes={}",
            raw.status,
            raw.body.len()
        ));
        self.debug_log(format_args!("response body: {}", raw.body));

        Ok(raw)
    }

    /// Writes one diagnostic line to the configured sink when debug mode
    /// is on. Attempted URLs and bodies are logged; the Authorization
    /// header never is.
    fn debug_log(&self, message: std::fmt::Arguments<'_>) {
        if !self.debug {
            return;
        }
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "[cpanel-publicapi] {}", message);
        }
    }
}

/// Error message for a non-2xx response without a failure envelope.
/// Long bodies (error pages) are truncated to keep the message readable.
fn http_failure(raw: &RawResponse) -> String {
    let body = raw.body.trim();
    match body.chars().count() {
        0 => format!("HTTP {}", raw.status),
        n if n > 200 => format!(
            "HTTP {}: {}...",
            raw.status,
            body.chars().take(200).collect::<String>()
        ),
        _ => format!("HTTP {}: {}", raw.status, body),
    }
}
