//
//  cpanel-publicapi
//  api/mod.rs
//

//! # API Dialect Layer
//!
//! This module models the three API dialects the remote panel exposes over
//! one HTTP transport, and the services those dialects are routed through.
//!
//! ## Dialects
//!
//! - [`whm`]: the administrative (WHM) API — flat named parameters against
//!   `/xml-api/<function>`.
//! - [`api1`]: the first-generation account API — positional parameters
//!   encoded as `arg-0`, `arg-1`, ….
//! - [`api2`]: the second-generation account API — named parameters merged
//!   with the module/function identifiers.
//!
//! Each encoder turns a logical call into an [`Encoded`] value: the request
//! path plus the serialized query for that dialect. Encoders never touch
//! the network; the session facade hands their output to the transport.
//!
//! ## Services
//!
//! A [`Service`] selects the listener a call targets. Each named service
//! maps to a well-known port pair (TLS / plaintext); an explicit
//! [`Service::Port`] bypasses the mapping for nonstandard deployments.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub mod api1;
pub mod api2;
pub mod whm;

/// The logical target of a call.
///
/// Each named service listens on a distinct default port; the
/// administrative service additionally changes how account-API calls are
/// encoded (they must name the account to operate on).
///
/// # Example
///
/// ```rust
/// use cpanel_publicapi::Service;
///
/// assert_eq!(Service::Cpanel.port(true), 2083);
/// assert_eq!(Service::Whostmgr.port(true), 2087);
/// assert_eq!(Service::Webmail.port(false), 2095);
/// assert_eq!(Service::Port(8443).port(true), 8443);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// The per-account service.
    Cpanel,
    /// The administrative service.
    Whostmgr,
    /// The webmail service.
    Webmail,
    /// A literal port, for deployments behind nonstandard listeners.
    Port(u16),
}

impl Service {
    /// Returns the port this service listens on.
    ///
    /// The `ssl` flag selects between the TLS and plaintext listener of the
    /// named services; explicit ports are returned unchanged.
    pub fn port(&self, ssl: bool) -> u16 {
        match (self, ssl) {
            (Self::Cpanel, true) => 2083,
            (Self::Cpanel, false) => 2082,
            (Self::Whostmgr, true) => 2087,
            (Self::Whostmgr, false) => 2086,
            (Self::Webmail, true) => 2096,
            (Self::Webmail, false) => 2095,
            (Self::Port(port), _) => *port,
        }
    }

    /// Whether this service is the administrative one.
    ///
    /// Explicit ports matching the well-known administrative listeners are
    /// treated as administrative too, so port-targeted calls keep the same
    /// encoding and authorization rules.
    pub fn is_whostmgr(&self) -> bool {
        matches!(self, Self::Whostmgr | Self::Port(2086) | Self::Port(2087))
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpanel => write!(f, "cpanel"),
            Self::Whostmgr => write!(f, "whostmgr"),
            Self::Webmail => write!(f, "webmail"),
            Self::Port(port) => write!(f, "{}", port),
        }
    }
}

impl FromStr for Service {
    type Err = Error;

    /// Parses a service name (`cpanel`, `whostmgr`, `whm`, `webmail`) or a
    /// literal port number.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpanel" => Ok(Self::Cpanel),
            "whostmgr" | "whm" => Ok(Self::Whostmgr),
            "webmail" => Ok(Self::Webmail),
            other => other
                .parse::<u16>()
                .map(Self::Port)
                .map_err(|_| Error::Configuration(format!("unknown service: {}", s))),
        }
    }
}

/// The response encoding a caller asks the remote host for.
///
/// `Native` (the default) leaves the choice to the host, which answers in
/// its hash-like default representation; the decoder then treats the body
/// as JSON-compatible. `Xml` and `Json` request that encoding explicitly
/// and make malformed bodies a hard decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Request an XML body.
    Xml,
    /// Request a JSON body.
    Json,
    /// Accept the host's default representation.
    #[default]
    Native,
}

impl ResponseFormat {
    /// The value of the `api.output` request parameter, if this format
    /// needs one. `Native` omits the parameter entirely.
    pub(crate) fn output_param(&self) -> Option<&'static str> {
        match self {
            Self::Xml => Some("xml"),
            Self::Json => Some("json"),
            Self::Native => None,
        }
    }
}

/// An encoded request: the path and the serialized parameter set.
///
/// Produced by the dialect encoders and consumed by the session facade,
/// which sends `query` as the POST body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Request path, e.g. `/xml-api/version`.
    pub path: String,
    /// URL-encoded parameter set.
    pub query: String,
}

/// Builds the identifier parameters shared by the two account-API dialects.
///
/// Administrative-service calls act on behalf of an account and therefore
/// must name one; omitting it is a [`Error::MissingRequiredField`]. For the
/// other services the target user is optional and passed through when
/// present.
pub(crate) fn account_identifiers(
    service: Service,
    module: &str,
    function: &str,
    user: Option<&str>,
    api_version: &str,
) -> Result<Vec<(String, String)>> {
    let mut pairs = vec![
        (
            "cpanel_xmlapi_apiversion".to_string(),
            api_version.to_string(),
        ),
        ("cpanel_xmlapi_module".to_string(), module.to_string()),
        ("cpanel_xmlapi_func".to_string(), function.to_string()),
    ];

    match user {
        Some(user) if !user.is_empty() => {
            pairs.push(("user".to_string(), user.to_string()));
        }
        _ if service.is_whostmgr() => {
            return Err(Error::MissingRequiredField("user".to_string()));
        }
        _ => {}
    }

    Ok(pairs)
}
