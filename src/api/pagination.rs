//! List response normalization
//!
//! List endpoints answer either with a bare JSON array or with a paginated
//! envelope `{count, next, previous, results}`. This is the only place that
//! tells the two apart; everything above it sees a plain `Vec<T>`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::error::{TrackerError, TrackerResult};

/// One page of a paginated list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Either shape a list endpoint may return
#[derive(Debug, Clone, PartialEq)]
pub enum ListResponse<T> {
    Paginated(Page<T>),
    Plain(Vec<T>),
}

impl<T: DeserializeOwned> ListResponse<T> {
    pub fn from_value(value: Value) -> TrackerResult<Self> {
        match value {
            Value::Array(_) => Ok(Self::Plain(serde_json::from_value(value)?)),
            Value::Object(ref map) if map.contains_key("results") => {
                Ok(Self::Paginated(serde_json::from_value(value)?))
            }
            other => Err(TrackerError::Json(format!(
                "expected a list or a paginated object, got {}",
                kind_of(&other)
            ))),
        }
    }
}

impl<T> ListResponse<T> {
    /// Items on this page and the link to the next one, if any
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        match self {
            Self::Paginated(page) => (page.results, page.next.filter(|n| !n.is_empty())),
            Self::Plain(items) => (items, None),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without results",
    }
}

/// Concatenate every page, following `next` links until there are none
///
/// A link seen twice ends the walk instead of looping forever.
pub fn collect_pages<T, F>(first: Value, mut fetch_next: F) -> TrackerResult<Vec<T>>
where
    T: DeserializeOwned,
    F: FnMut(&str) -> TrackerResult<Value>,
{
    let (mut items, mut next) = ListResponse::<T>::from_value(first)?.into_parts();
    let mut seen = HashSet::new();

    while let Some(url) = next.take() {
        if !seen.insert(url.clone()) {
            tracing::warn!(url = %url, "pagination cycle detected, stopping");
            break;
        }
        let (page, following) = ListResponse::<T>::from_value(fetch_next(&url)?)?.into_parts();
        items.extend(page);
        next = following;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_array() {
        let items: Vec<u32> = collect_pages(json!([1, 2, 3]), |_| unreachable!()).unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_single_page() {
        let first = json!({"count": 2, "next": null, "previous": null, "results": [1, 2]});
        let items: Vec<u32> = collect_pages(first, |_| unreachable!()).unwrap();
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn test_follows_next_links() {
        let first = json!({"count": 4, "next": "http://x/api/items/?page=2", "results": [1, 2]});
        let mut requested = Vec::new();
        let items: Vec<u32> = collect_pages(first, |url| {
            requested.push(url.to_string());
            Ok(json!({"count": 4, "next": null, "previous": "http://x/api/items/", "results": [3, 4]}))
        })
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(requested, vec!["http://x/api/items/?page=2"]);
    }

    #[test]
    fn test_cycle_stops() {
        let first = json!({"next": "http://x/p2", "results": [1]});
        let items: Vec<u32> =
            collect_pages(first, |_| Ok(json!({"next": "http://x/p2", "results": [2]}))).unwrap();
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn test_rejects_other_shapes() {
        let err = ListResponse::<u32>::from_value(json!({"detail": "nope"})).unwrap_err();
        assert!(matches!(err, TrackerError::Json(_)));
        assert!(ListResponse::<u32>::from_value(json!(null)).is_err());
    }
}
