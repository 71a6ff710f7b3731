//
//  cpanel-publicapi
//  format/mod.rs
//

//! # Query and Header Formatting
//!
//! Pure helpers that turn parameter and header mappings into their wire
//! representations. Both are usable without a session and have no side
//! effects, which makes them convenient for building requests by hand or
//! for asserting on request shapes in tests.
//!
//! ## Example
//!
//! ```rust
//! use cpanel_publicapi::format::{format_query, format_headers, HeaderInput};
//!
//! let query = format_query(&[("db", "mydb"), ("privileges", "ALL")]);
//! assert_eq!(query, "db=mydb&privileges=ALL");
//!
//! let headers = format_headers(HeaderInput::Map(vec![
//!     ("Host".to_string(), "cp.example.com".to_string()),
//! ]));
//! assert_eq!(headers, "Host: cp.example.com\r\n");
//! ```

/// Header input accepted by [`format_headers`].
///
/// The remote panels historically accepted headers either as a
/// pre-formatted block or as a name/value mapping, so the formatter models
/// both explicitly instead of guessing from content.
///
/// # Variants
///
/// - `Raw`: an already-formatted header block, passed through verbatim.
/// - `Map`: ordered name/value pairs, rendered one `Name: Value` line each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderInput {
    /// A pre-formatted header block. Returned unchanged by the formatter.
    Raw(String),
    /// Ordered header name/value pairs.
    Map(Vec<(String, String)>),
}

impl HeaderInput {
    /// Converts either representation into name/value pairs.
    ///
    /// Raw blocks are split on line boundaries and each line on the first
    /// `:`; lines without a colon are dropped. Used internally to feed the
    /// structured header API of the HTTP client.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        match self {
            Self::Map(pairs) => pairs,
            Self::Raw(block) => block
                .lines()
                .filter_map(|line| {
                    let line = line.trim_end_matches('\r');
                    let (name, value) = line.split_once(':')?;
                    Some((name.trim().to_string(), value.trim().to_string()))
                })
                .collect(),
        }
    }
}

impl From<&str> for HeaderInput {
    fn from(block: &str) -> Self {
        Self::Raw(block.to_string())
    }
}

impl From<Vec<(String, String)>> for HeaderInput {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Map(pairs)
    }
}

/// Formats a parameter mapping as a URL-encoded query string.
///
/// Keys and values are percent-encoded and joined as `key=value` pairs with
/// `&`. Pair order follows the input slice; an empty slice produces an
/// empty string.
///
/// # Example
///
/// ```rust
/// use cpanel_publicapi::format_query;
///
/// assert_eq!(format_query(&[("a", "1"), ("b", "two words")]), "a=1&b=two%20words");
/// assert_eq!(format_query::<&str, &str>(&[]), "");
/// ```
pub fn format_query<K: AsRef<str>, V: AsRef<str>>(params: &[(K, V)]) -> String {
    params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k.as_ref()),
                urlencoding::encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Formats headers as a wire-ready block.
///
/// A [`HeaderInput::Raw`] value is returned verbatim (it is assumed to be
/// formatted already); a [`HeaderInput::Map`] renders one `Name: Value`
/// line per entry, each terminated by CRLF.
///
/// # Example
///
/// ```rust
/// use cpanel_publicapi::{format_headers, HeaderInput};
///
/// let block = format_headers(HeaderInput::Map(vec![
///     ("Authorization".to_string(), "Basic Zm9vOmJhcg==".to_string()),
///     ("Host".to_string(), "cp.example.com".to_string()),
/// ]));
/// assert_eq!(block, "Authorization: Basic Zm9vOmJhcg==\r\nHost: cp.example.com\r\n");
///
/// assert_eq!(format_headers(HeaderInput::Raw("X-Done: yes\r\n".to_string())), "X-Done: yes\r\n");
/// ```
pub fn format_headers(input: HeaderInput) -> String {
    match input {
        HeaderInput::Raw(block) => block,
        HeaderInput::Map(pairs) => pairs
            .iter()
            .map(|(name, value)| format!("{}: {}\r\n", name, value))
            .collect(),
    }
}
