//
//  cpanel-publicapi
//  api/api2.rs
//

//! # Second-Generation Account API Encoder
//!
//! The second-generation dialect takes named parameters, which are merged
//! with the module/function identifiers into one flat key/value set. Path
//! and service rules are identical to the first-generation encoder.

use crate::api::{account_identifiers, Encoded, ResponseFormat, Service};
use crate::error::Result;
use crate::format::format_query;

/// Encodes a second-generation account API call.
///
/// Named parameters are appended after the identifier set. Calls routed
/// through the administrative service must name the account to act on.
///
/// # Example
///
/// ```rust
/// use cpanel_publicapi::api::api2;
/// use cpanel_publicapi::{ResponseFormat, Service};
///
/// let encoded = api2::encode(
///     Service::Cpanel,
///     "Email",
///     "listpopswithdisk",
///     None,
///     &[("domain", "example.com")],
///     ResponseFormat::Json,
/// )
/// .unwrap();
/// assert_eq!(encoded.path, "/xml-api/cpanel");
/// assert!(encoded.query.contains("cpanel_xmlapi_apiversion=2"));
/// assert!(encoded.query.contains("domain=example.com"));
/// ```
pub fn encode(
    service: Service,
    module: &str,
    function: &str,
    user: Option<&str>,
    params: &[(&str, &str)],
    format: ResponseFormat,
) -> Result<Encoded> {
    let mut pairs = account_identifiers(service, module, function, user, "2")?;

    for (key, value) in params {
        pairs.push((key.to_string(), value.to_string()));
    }

    if let Some(output) = format.output_param() {
        pairs.push(("api.output".to_string(), output.to_string()));
    }

    Ok(Encoded {
        path: "/xml-api/cpanel".to_string(),
        query: format_query(&pairs),
    })
}
