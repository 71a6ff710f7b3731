//
//  cpanel-publicapi
//  response/mod.rs
//

//! # Response Decoding
//!
//! The remote panel answers in three encodings — JSON, XML, or its own
//! hash-like default — depending on the dialect and the requested format.
//! This module normalizes all of them into one uniform [`ApiResult`] so
//! callers never branch on wire representation.
//!
//! ## Decoding rules
//!
//! - An explicitly requested format uses the matching parser, and a
//!   malformed body is a hard [`Error::Decode`](crate::Error::Decode) —
//!   surfaced, never swallowed.
//! - The native/default format is decoded as JSON first (the
//!   administrative service defaults to a JSON-compatible representation),
//!   with XML attempted when the body or content type says otherwise.
//! - JSON parsing goes through an ordered backend registry, fixed for the
//!   process lifetime. An environment with no backend at all is a
//!   configuration error, not a per-call one.
//!
//! ## Envelope unwrapping
//!
//! Successful decodes are unwrapped one level: when the value carries a
//! status/data envelope, the inner `data` becomes the payload and the
//! status and error fields drive [`ApiResult::ok`] and
//! [`ApiResult::error`]. Values without a recognized envelope are passed
//! through whole.

mod xml;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::api::ResponseFormat;
use crate::error::{Error, Result};

/// The uniform return value of every non-raw call operation.
///
/// Regardless of which dialect answered and in which encoding, callers
/// receive this one shape: a success flag, the caller-relevant payload,
/// and an error message on failure.
///
/// # Example
///
/// ```rust
/// use cpanel_publicapi::ApiResult;
///
/// fn report(result: ApiResult) {
///     if result.ok {
///         println!("payload: {}", result.data);
///     } else {
///         eprintln!("call failed: {}", result.error.as_deref().unwrap_or("unknown"));
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    /// Whether the call succeeded end to end.
    pub ok: bool,
    /// The decoded payload: the `data` portion of enveloped responses, or
    /// the whole decoded body when no envelope was present.
    pub data: Value,
    /// Human-readable message, present exactly when `ok` is false.
    pub error: Option<String>,
}

impl ApiResult {
    /// A failed result carrying `message` and no payload.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: Value::Null,
            error: Some(message.into()),
        }
    }

    /// Folds an internal pipeline outcome into the uniform shape.
    ///
    /// Call operations report every failure — encoding, transport,
    /// decoding — through `ok: false` rather than a separate error
    /// channel, so callers handle one shape everywhere.
    pub(crate) fn from_outcome(outcome: Result<ApiResult>) -> ApiResult {
        outcome.unwrap_or_else(|e| ApiResult::failure(e.to_string()))
    }
}

/// A JSON decoding strategy.
///
/// Backends are interchangeable; the registry tries them in preference
/// order and memoizes the first available one for the process lifetime.
/// This is a strategy seam rather than dynamic loading: adding a backend
/// means adding a registry entry.
pub trait JsonBackend: Send + Sync {
    /// Short backend name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Parses a body into a structured value.
    fn parse(&self, body: &str) -> std::result::Result<Value, String>;
}

struct SerdeJsonBackend;

impl JsonBackend for SerdeJsonBackend {
    fn name(&self) -> &'static str {
        "serde_json"
    }

    fn parse(&self, body: &str) -> std::result::Result<Value, String> {
        serde_json::from_str(body).map_err(|e| e.to_string())
    }
}

/// Candidate backends in fixed preference order.
static JSON_BACKENDS: Lazy<Vec<Box<dyn JsonBackend>>> =
    Lazy::new(|| vec![Box::new(SerdeJsonBackend)]);

/// The active JSON backend, or [`Error::Configuration`] when the registry
/// is empty.
fn json_backend() -> Result<&'static dyn JsonBackend> {
    JSON_BACKENDS
        .first()
        .map(|backend| backend.as_ref())
        .ok_or_else(|| Error::Configuration("no JSON decoder backend available".to_string()))
}

/// Decodes a raw body into the uniform result shape.
///
/// `content_type` is the transport's hint and only consulted in native
/// mode, where it breaks the tie between JSON and XML bodies.
///
/// # Errors
///
/// [`Error::Decode`] when an explicitly requested format does not parse,
/// or when a native body parses as neither JSON nor XML;
/// [`Error::Configuration`] when no JSON backend is registered.
pub fn decode(
    body: &str,
    content_type: Option<&str>,
    format: ResponseFormat,
) -> Result<ApiResult> {
    let value = match format {
        ResponseFormat::Json => {
            let backend = json_backend()?;
            backend
                .parse(body)
                .map_err(|e| Error::Decode(format!("{}: {}", backend.name(), e)))?
        }
        ResponseFormat::Xml => xml::to_value(body)?,
        ResponseFormat::Native => {
            let backend = json_backend()?;
            match backend.parse(body) {
                Ok(value) => value,
                Err(json_err) => {
                    let looks_like_xml = content_type.is_some_and(|t| t.contains("xml"))
                        || body.trim_start().starts_with('<');
                    if looks_like_xml {
                        xml::to_value(body)?
                    } else {
                        return Err(Error::Decode(format!(
                            "{}: {}",
                            backend.name(),
                            json_err
                        )));
                    }
                }
            }
        }
    };

    Ok(unwrap_envelope(value))
}

/// Unwraps one level of status/data envelope, when present.
///
/// Recognized shapes, tried in order:
/// - the `cpanelresult` wrapper the account dialects put around their
///   whole response;
/// - the account envelope `{ status, data, error }`;
/// - the administrative envelope `{ metadata: { result, reason }, data }`.
///
/// Anything else is passed through whole as a successful payload.
fn unwrap_envelope(value: Value) -> ApiResult {
    let value = match value {
        Value::Object(mut map) if map.contains_key("cpanelresult") => {
            map.remove("cpanelresult").unwrap_or(Value::Null)
        }
        other => other,
    };

    if let Value::Object(map) = &value {
        if map.contains_key("data") && (map.contains_key("status") || map.contains_key("error")) {
            let status_ok = map.get("status").is_none_or(is_truthy);
            let error = map.get("error").and_then(nonempty_string);
            let ok = status_ok && error.is_none();
            return ApiResult {
                ok,
                data: map.get("data").cloned().unwrap_or(Value::Null),
                error: if ok {
                    None
                } else {
                    Some(error.unwrap_or_else(|| "remote call reported failure".to_string()))
                },
            };
        }

        if let Some(Value::Object(metadata)) = map.get("metadata") {
            let ok = metadata.get("result").is_none_or(is_truthy);
            let reason = metadata.get("reason").and_then(nonempty_string);
            return ApiResult {
                ok,
                data: map.get("data").cloned().unwrap_or(Value::Null),
                error: if ok {
                    None
                } else {
                    Some(reason.unwrap_or_else(|| "remote call reported failure".to_string()))
                },
            };
        }
    }

    ApiResult {
        ok: true,
        data: value,
        error: None,
    }
}

/// Status truthiness across the encodings: XML delivers `"1"`/`"0"` as
/// strings where JSON delivers numbers.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Bool(b) => *b,
        Value::Null => false,
        _ => true,
    }
}

fn nonempty_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_envelope_is_unwrapped() {
        let result = decode(
            r#"{"status": 1, "data": {"db": "mydb"}, "error": ""}"#,
            None,
            ResponseFormat::Native,
        )
        .unwrap();
        assert!(result.ok);
        assert_eq!(result.data, json!({"db": "mydb"}));
        assert_eq!(result.error, None);
    }

    #[test]
    fn falsy_status_is_a_failure() {
        let result = decode(
            r#"{"status": 0, "data": null, "error": "no such database"}"#,
            None,
            ResponseFormat::Native,
        )
        .unwrap();
        assert!(!result.ok);
        assert_eq!(result.error.as_deref(), Some("no such database"));
    }

    #[test]
    fn nonempty_error_overrides_truthy_status() {
        let result = decode(
            r#"{"status": 1, "data": null, "error": "partial failure"}"#,
            None,
            ResponseFormat::Native,
        )
        .unwrap();
        assert!(!result.ok);
        assert_eq!(result.error.as_deref(), Some("partial failure"));
    }

    #[test]
    fn metadata_envelope_is_unwrapped() {
        let result = decode(
            r#"{"metadata": {"result": 1, "reason": "OK"}, "data": {"acct": []}}"#,
            None,
            ResponseFormat::Native,
        )
        .unwrap();
        assert!(result.ok);
        assert_eq!(result.data, json!({"acct": []}));

        let result = decode(
            r#"{"metadata": {"result": 0, "reason": "Access denied"}, "data": null}"#,
            None,
            ResponseFormat::Native,
        )
        .unwrap();
        assert!(!result.ok);
        assert_eq!(result.error.as_deref(), Some("Access denied"));
    }

    #[test]
    fn cpanelresult_wrapper_is_removed_first() {
        let result = decode(
            r#"{"cpanelresult": {"status": 1, "data": [{"db": "mydb"}], "error": ""}}"#,
            None,
            ResponseFormat::Native,
        )
        .unwrap();
        assert!(result.ok);
        assert_eq!(result.data, json!([{"db": "mydb"}]));
    }

    #[test]
    fn unenveloped_body_passes_through_whole() {
        let result = decode(r#"{"version": "100"}"#, None, ResponseFormat::Json).unwrap();
        assert!(result.ok);
        assert_eq!(result.data, json!({"version": "100"}));
    }

    #[test]
    fn malformed_json_is_a_decode_error_not_partial_success() {
        let err = decode("{not json", None, ResponseFormat::Json).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn malformed_xml_is_a_decode_error() {
        let err = decode("<open><mismatch></open>", None, ResponseFormat::Xml).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn native_falls_back_to_xml_on_xmlish_bodies() {
        let result = decode(
            "<result><status>1</status><data><db>mydb</db></data><error></error></result>",
            Some("text/xml"),
            ResponseFormat::Native,
        )
        .unwrap();
        assert!(result.ok);
        assert_eq!(result.data, json!({"db": "mydb"}));
    }

    #[test]
    fn native_nonsense_is_a_decode_error() {
        let err = decode("plain text, nothing here", None, ResponseFormat::Native).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn string_statuses_from_xml_are_truthy() {
        assert!(is_truthy(&json!("1")));
        assert!(!is_truthy(&json!("0")));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(1)));
        assert!(!is_truthy(&json!(0)));
    }
}
