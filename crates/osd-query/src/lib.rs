//! Query string decoding for site widgets.
//!
//! Widgets read their state (selected tag, filter, ...) from the page URL.
//! [`decode`] turns the query part of such a URL into [`QueryParams`].
//!
//! Decoding is deliberately literal:
//!
//! - the query is the text between the first `?` and the next `?` (or end)
//! - parameters are separated by `&` and split on their first `=`
//! - a parameter without `=` gets an empty value
//! - a repeated name keeps the last value
//! - values are not percent-decoded and the `#fragment` is not stripped
//!
//! # Example
//!
//! ```
//! use osd_query::decode;
//!
//! let params = decode("https://onestep.code05.com/tags?tag=redis&page=2").unwrap();
//! assert_eq!(params.get("tag"), Some("redis"));
//! assert_eq!(params.get("page"), Some("2"));
//!
//! assert!(decode("https://onestep.code05.com/tags").is_err());
//! ```

use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

/// Query decoding error.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The URL has no `?` and therefore no query component.
    #[error("URL has no query component: {url}")]
    MissingQuery {
        /// The rejected URL.
        url: String,
    },
}

/// Decoded query parameters.
///
/// Parameters keep the position of their first occurrence. Equality ignores
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(IndexMap<String, String>);

impl QueryParams {
    /// Value of parameter `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether parameter `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters were decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameters in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = IndexMap::new();
        for (name, value) in iter {
            params.insert(name.into(), value.into());
        }
        Self(params)
    }
}

impl FromStr for QueryParams {
    type Err = QueryError;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        decode(url)
    }
}

/// Decode the query component of `url`.
///
/// # Errors
///
/// Returns [`QueryError::MissingQuery`] if `url` contains no `?`.
pub fn decode(url: &str) -> Result<QueryParams, QueryError> {
    let Some(query) = url.split('?').nth(1) else {
        return Err(QueryError::MissingQuery {
            url: url.to_owned(),
        });
    };

    let params: QueryParams = query
        .split('&')
        .map(|segment| segment.split_once('=').unwrap_or((segment, "")))
        .collect();

    tracing::trace!(url, count = params.len(), "Decoded query string");

    Ok(params)
}
