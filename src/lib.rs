//
//  cpanel-publicapi
//  lib.rs
//

//! # cPanel & WHM API Client Library
//!
//! A synchronous client for the administrative and account-level HTTP APIs
//! of cPanel & WHM hosts. The library authenticates against a remote
//! panel, builds correctly-formed requests for its three API dialects, and
//! normalizes the heterogeneous responses (JSON, XML, or the panel's
//! hash-like default) into one uniform result shape.
//!
//! ## Overview
//!
//! The three dialects share one transport but differ in parameter
//! conventions:
//!
//! | Operation | Dialect | Parameters |
//! |-----------|---------|------------|
//! | [`PublicApi::whm_api`] | administrative (WHM) | flat named mapping |
//! | [`PublicApi::cpanel_api1`] | account API 1 | ordered list (`arg-0`, `arg-1`, …) |
//! | [`PublicApi::cpanel_api2`] | account API 2 | named mapping |
//! | [`PublicApi::api_request`] | none (raw) | pre-encoded, body returned verbatim |
//!
//! ## Module Structure
//!
//! - [`client`]: the session facade tying everything together
//! - [`config`]: constructor configuration and defaults
//! - [`auth`]: credential model and the resolution fallback chain
//! - [`api`]: services and the three dialect encoders
//! - [`transport`]: the synchronous HTTP adapter
//! - [`response`]: response decoding and the uniform result shape
//! - [`format`]: pure query/header formatting helpers
//! - [`error`]: the library error type
//!
//! ## Example
//!
//! ```rust,no_run
//! use cpanel_publicapi::{Config, PublicApi, ResponseFormat, Service};
//!
//! let client = PublicApi::new(
//!     Config::default()
//!         .user("root")
//!         .accesshash("deadbeef")
//!         .host("cp.example.com"),
//! )?;
//!
//! // Administrative call.
//! let version = client.whm_api("version", &[], ResponseFormat::Json);
//!
//! // Account call on behalf of a user, through the administrative service.
//! let dbs = client.cpanel_api2(
//!     Service::Whostmgr,
//!     "Mysql",
//!     "listdbs",
//!     Some("bob"),
//!     &[],
//!     ResponseFormat::Native,
//! );
//!
//! for result in [version, dbs] {
//!     if !result.ok {
//!         eprintln!("call failed: {}", result.error.unwrap_or_default());
//!     }
//! }
//! # Ok::<(), cpanel_publicapi::Error>(())
//! ```
//!
//! ## Concurrency
//!
//! Sessions are synchronous: each operation performs at most one blocking
//! round-trip, bounded by the configured timeout. Calls take `&self`;
//! credential mutation through the setters must be serialized externally
//! when a session is shared between threads.

/// Services and the three dialect encoders.
pub mod api;

/// Credential model and the resolution fallback chain.
pub mod auth;

/// The session facade: constructor, setters, and the four call operations.
pub mod client;

/// Constructor configuration.
pub mod config;

/// The library error type.
pub mod error;

/// Pure query/header formatting helpers, usable without a session.
pub mod format;

/// Response decoding into the uniform result shape.
pub mod response;

/// The synchronous HTTP adapter.
pub mod transport;

pub use api::{Encoded, ResponseFormat, Service};
pub use auth::{Credential, CredentialSource, SystemSource};
pub use client::PublicApi;
pub use config::Config;
pub use error::{Error, Result};
pub use format::{format_headers, format_query, HeaderInput};
pub use response::{ApiResult, JsonBackend};
pub use transport::{Method, RawResponse};

/// Library version, from the package manifest at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
