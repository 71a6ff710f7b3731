//
//  cpanel-publicapi
//  api/whm.rs
//

//! # Administrative (WHM) API Encoder
//!
//! The administrative dialect is the simplest of the three: the function
//! name is the path and the parameters are already a flat named mapping.
//! Unlike the account dialects it has no target-user requirement, because
//! administrative calls act on the server itself.

use crate::api::{Encoded, ResponseFormat};
use crate::error::Result;
use crate::format::format_query;

/// Encodes an administrative API call.
///
/// The path is `/xml-api/<function>` and the query is the caller's named
/// parameters. When an explicit response format was requested, an
/// `api.output` parameter is appended; the default (native) format omits
/// it and accepts the host's hash-like default representation.
///
/// # Example
///
/// ```rust
/// use cpanel_publicapi::api::whm;
/// use cpanel_publicapi::ResponseFormat;
///
/// let encoded = whm::encode("suspendacct", &[("user", "bob")], ResponseFormat::Json).unwrap();
/// assert_eq!(encoded.path, "/xml-api/suspendacct");
/// assert_eq!(encoded.query, "user=bob&api.output=json");
/// ```
pub fn encode(
    function: &str,
    params: &[(&str, &str)],
    format: ResponseFormat,
) -> Result<Encoded> {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    if let Some(output) = format.output_param() {
        pairs.push(("api.output".to_string(), output.to_string()));
    }

    Ok(Encoded {
        path: format!("/xml-api/{}", function),
        query: format_query(&pairs),
    })
}
