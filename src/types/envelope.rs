//! Response envelope and pagination wrappers
//!
//! Most backend responses are wrapped as `{ "message": ..., "errorCode": ..., "data": ... }`,
//! but some endpoints return the payload bare. [`unwrap_envelope`] accepts both.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic `{message, errorCode, data}` wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Machine-readable error code, set on failures
    #[serde(default)]
    pub error_code: Option<String>,
    /// Wrapped payload
    pub data: T,
}

/// Unwrap at most one envelope layer.
///
/// If `value` is an object with a non-null `data` field, that field is returned;
/// otherwise `value` is returned untouched.
#[must_use]
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                map.insert("data".to_string(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Spring-style page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub content: Vec<T>,
    /// Zero-based page index
    pub page: u32,
    /// Requested page size
    pub size: u32,
    /// Total matching items
    pub total_elements: u64,
    /// Total number of pages
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Whether another page follows this one
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwraps_one_layer() {
        let wrapped = json!({"message": "ok", "data": {"accessToken": "T2"}});
        assert_eq!(unwrap_envelope(wrapped), json!({"accessToken": "T2"}));
    }

    #[test]
    fn test_only_one_layer() {
        let nested = json!({"data": {"data": {"accessToken": "T2"}}});
        assert_eq!(
            unwrap_envelope(nested),
            json!({"data": {"accessToken": "T2"}})
        );
    }

    #[test]
    fn test_bare_payload_untouched() {
        let bare = json!({"accessToken": "T2"});
        assert_eq!(unwrap_envelope(bare.clone()), bare);
        assert_eq!(unwrap_envelope(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn test_null_data_keeps_envelope() {
        let empty = json!({"message": "nothing", "data": null});
        assert_eq!(unwrap_envelope(empty.clone()), empty);
    }

    #[test]
    fn test_page_has_next() {
        let page: Page<u32> = serde_json::from_value(json!({
            "content": [1, 2],
            "page": 0,
            "size": 2,
            "totalElements": 3,
            "totalPages": 2
        }))
        .unwrap();
        assert!(page.has_next());
        assert_eq!(page.content.len(), 2);
    }

    #[test]
    fn test_page_has_next_at_last_index() {
        let page: Page<u32> = Page {
            content: Vec::new(),
            page: u32::MAX,
            size: 20,
            total_elements: 0,
            total_pages: u32::MAX,
        };
        assert!(!page.has_next());
    }
}
