//
//  cpanel-publicapi
//  api/api1.rs
//

//! # First-Generation Account API Encoder
//!
//! The first-generation dialect takes an ordered argument list rather than
//! named fields, so arguments are serialized as a numbered parameter set
//! (`arg-0`, `arg-1`, …) alongside the module/function identifiers.

use crate::api::{account_identifiers, Encoded, ResponseFormat, Service};
use crate::error::Result;
use crate::format::format_query;

/// Encodes a first-generation account API call.
///
/// Positional arguments become `arg-N` parameters in order. Calls routed
/// through the administrative service must name the account to act on;
/// see [`account_identifiers`] for the shared identifier rules.
///
/// # Example
///
/// ```rust
/// use cpanel_publicapi::api::api1;
/// use cpanel_publicapi::{ResponseFormat, Service};
///
/// let encoded = api1::encode(
///     Service::Cpanel,
///     "Mysql",
///     "adduserdb",
///     None,
///     &["somedb", "somedbuser", "ALL"],
///     ResponseFormat::Native,
/// )
/// .unwrap();
/// assert_eq!(encoded.path, "/xml-api/cpanel");
/// assert!(encoded.query.contains("arg-0=somedb&arg-1=somedbuser&arg-2=ALL"));
/// ```
pub fn encode(
    service: Service,
    module: &str,
    function: &str,
    user: Option<&str>,
    args: &[&str],
    format: ResponseFormat,
) -> Result<Encoded> {
    let mut pairs = account_identifiers(service, module, function, user, "1")?;

    for (index, arg) in args.iter().enumerate() {
        pairs.push((format!("arg-{}", index), (*arg).to_string()));
    }

    if let Some(output) = format.output_param() {
        pairs.push(("api.output".to_string(), output.to_string()));
    }

    Ok(Encoded {
        path: "/xml-api/cpanel".to_string(),
        query: format_query(&pairs),
    })
}
