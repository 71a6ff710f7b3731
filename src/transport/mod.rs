//
//  cpanel-publicapi
//  transport/mod.rs
//

//! # HTTP Transport Adapter
//!
//! A thin synchronous wrapper around the HTTP client. It knows nothing
//! about dialects or credentials: it takes a host, port, path, method,
//! pre-encoded body, and pre-built headers, performs one round-trip, and
//! reports the outcome.
//!
//! Every network-level failure (connection, DNS, timeout) is returned as
//! [`Error::Transport`] with a human-readable message; nothing panics
//! across this boundary. The configured timeout is a hard deadline on the
//! whole request/response cycle.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{Error, Result};

/// HTTP method for a request.
///
/// The remote APIs only use GET and POST, so the adapter models just
/// those two rather than re-exporting the HTTP client's open-ended type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET; a non-empty body is appended to the path as a query string.
    Get,
    /// POST; the body is sent as a form-encoded request entity.
    Post,
}

impl Method {
    /// Parses `GET`/`POST`, case-insensitively.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            other => Err(Error::Configuration(format!(
                "unsupported HTTP method: {}",
                other
            ))),
        }
    }
}

/// The raw outcome of one round-trip.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Whether the status was in the 2xx range.
    pub success: bool,
    /// Response body, decoded to text.
    pub body: String,
    /// The `Content-Type` header, when the host sent one.
    pub content_type: Option<String>,
}

/// Issues single HTTP(S) requests against a panel host.
pub struct Transport {
    http: Client,
    ssl: bool,
}

impl Transport {
    /// Builds a transport with the given TLS selection and whole-request
    /// timeout.
    ///
    /// Certificate verification is disabled: panel hosts overwhelmingly
    /// serve self-signed certificates on their service ports, and the
    /// original client accepted them.
    pub fn new(ssl: bool, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("cpanel-publicapi/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self { http, ssl })
    }

    /// Performs one request and returns the raw response.
    ///
    /// For [`Method::Get`] a non-empty `body` is appended to `path` as a
    /// query string; for [`Method::Post`] it is sent as a form-encoded
    /// entity. `headers` are applied as-is — the caller is responsible for
    /// authorization.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] on connection failure, DNS failure, or when
    /// the configured timeout elapses.
    pub fn send(
        &self,
        host: &str,
        port: u16,
        path: &str,
        method: Method,
        body: &str,
        headers: &[(String, String)],
    ) -> Result<RawResponse> {
        let scheme = if self.ssl { "https" } else { "http" };
        let url = match method {
            Method::Get if !body.is_empty() => {
                let separator = if path.contains('?') { "&" } else { "?" };
                format!("{}://{}:{}{}{}{}", scheme, host, port, path, separator, body)
            }
            _ => format!("{}://{}:{}{}", scheme, host, port, path),
        };

        let mut request = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self
                .http
                .post(&url)
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(body.to_string()),
        };

        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        tracing::debug!(%url, ?method, "sending request");

        let response = request
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let body = response
            .text()
            .map_err(|e| Error::Transport(e.to_string()))?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");

        Ok(RawResponse {
            status: status.as_u16(),
            success: status.is_success(),
            body,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!(Method::parse("get").unwrap(), Method::Get);
        assert_eq!(Method::parse("POST").unwrap(), Method::Post);
        assert_eq!(Method::parse(" Get ").unwrap(), Method::Get);
        assert!(Method::parse("DELETE").is_err());
    }

    #[test]
    fn connection_failure_is_a_transport_error() {
        // Port 1 on localhost is never listening.
        let transport = Transport::new(false, Duration::from_secs(2)).unwrap();
        let err = transport
            .send("127.0.0.1", 1, "/xml-api/version", Method::Get, "", &[])
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
