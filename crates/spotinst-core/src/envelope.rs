//! Decoding of the uniform response envelope.
//!
//! Successful list and read responses share one wrapper:
//!
//! ```json
//! { "request": { "id": "..." }, "response": { "items": [ ... ] } }
//! ```
//!
//! Decoding happens in two phases. [`decode_items`] unwraps the envelope into
//! raw JSON values without knowing their schema, and the service that made the
//! call decodes each value into its own resource type.

use crate::error::{ApiError, ApiErrorDetail, Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse the envelope and return its raw items.
///
/// A missing or empty `response.items` yields an empty vector.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the body is not JSON, is not an object, or if
/// `response` or `response.items` have the wrong shape.
pub fn decode_items(body: &[u8]) -> Result<Vec<Value>> {
    let root: Value = serde_json::from_slice(body)
        .map_err(|err| Error::Decode(format!("malformed response envelope: {err}")))?;

    let Value::Object(mut root) = root else {
        return Err(Error::Decode(
            "response envelope is not a JSON object".to_string(),
        ));
    };

    let mut response = match root.remove("response") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(response)) => response,
        Some(other) => {
            return Err(Error::Decode(format!(
                "`response` is not an object: {other}"
            )))
        }
    };

    match response.remove("items") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(Error::Decode(format!(
            "`response.items` is not an array: {other}"
        ))),
    }
}

/// Decode one raw item into `T`.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the item does not match `T`.
pub fn decode_item<T>(item: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(item).map_err(|err| {
        Error::Decode(format!(
            "failed to decode {}: {err}",
            std::any::type_name::<T>()
        ))
    })
}

/// Unwrap the envelope and decode every item into `T`.
///
/// The whole batch fails if any single item fails.
///
/// # Errors
///
/// Returns [`Error::Decode`] for a malformed envelope or item.
pub fn decode_items_as<T>(body: &[u8]) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    decode_items(body)?.into_iter().map(decode_item).collect()
}

/// Unwrap the envelope and decode only its first item, if any.
///
/// # Errors
///
/// Returns [`Error::Decode`] for a malformed envelope or first item.
pub fn decode_first<T>(body: &[u8]) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    decode_items(body)?.into_iter().next().map(decode_item).transpose()
}

/// Decode a body that carries a single JSON object rather than an envelope.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the body does not match `T`.
pub fn decode_single<T>(body: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|err| {
        Error::Decode(format!(
            "failed to decode {}: {err}",
            std::any::type_name::<T>()
        ))
    })
}

/// Build an [`ApiError`] from an error response body.
///
/// Falls back to a single detail holding the raw body when the body is not a
/// structured error envelope.
#[must_use]
pub fn decode_error(status: u16, body: &[u8]) -> ApiError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    let request_id = parsed
        .as_ref()
        .and_then(|v| v.pointer("/request/id"))
        .and_then(Value::as_str)
        .map(ToString::to_string);

    let errors: Vec<ApiErrorDetail> = parsed
        .as_ref()
        .and_then(|v| v.pointer("/response/errors"))
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();

    let errors = if errors.is_empty() {
        vec![ApiErrorDetail {
            code: status.to_string(),
            message: String::from_utf8_lossy(body).trim().to_string(),
            field: None,
        }]
    } else {
        errors
    };

    ApiError {
        status,
        request_id,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Cost {
        #[serde(default)]
        total_cost: Option<f64>,
        #[serde(default)]
        headroom_cost: Option<f64>,
    }

    #[test]
    fn empty_items_is_empty_vec() {
        let items = decode_items(br#"{"response":{"items":[]}}"#).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn missing_items_is_empty_vec() {
        assert!(decode_items(br#"{"response":{}}"#).unwrap().is_empty());
        assert!(decode_items(br#"{"request":{"id":"r-1"}}"#).unwrap().is_empty());
        assert!(decode_items(br#"{"response":{"items":null}}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn items_are_decoded_independently() {
        let body = br#"{"response":{"items":[{"totalCost":12.5}]}}"#;
        let costs: Vec<Cost> = decode_items_as(body).unwrap();
        assert_eq!(
            costs,
            vec![Cost {
                total_cost: Some(12.5),
                headroom_cost: None,
            }]
        );
    }

    #[test]
    fn malformed_envelope_is_an_error() {
        assert!(matches!(decode_items(b"not json"), Err(Error::Decode(_))));
        assert!(matches!(decode_items(b"[]"), Err(Error::Decode(_))));
        assert!(matches!(
            decode_items(br#"{"response":[]}"#),
            Err(Error::Decode(_))
        ));
        assert!(matches!(
            decode_items(br#"{"response":{"items":{}}}"#),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn one_bad_item_fails_the_batch() {
        let body = br#"{"response":{"items":[{"totalCost":1.0},{"totalCost":"lots"}]}}"#;
        let result: Result<Vec<Cost>> = decode_items_as(body);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn decode_first_item() {
        let body = br#"{"response":{"items":[{"totalCost":1.0},{"totalCost":2.0}]}}"#;
        let first: Option<Cost> = decode_first(body).unwrap();
        assert_eq!(first.and_then(|c| c.total_cost), Some(1.0));

        let none: Option<Cost> = decode_first(br#"{"response":{"items":[]}}"#).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn decode_single_object() {
        let cost: Cost = decode_single(br#"{"totalCost":3.0,"headroomCost":1.0}"#).unwrap();
        assert_eq!(cost.headroom_cost, Some(1.0));
    }

    #[test]
    fn decode_structured_error() {
        let body = br#"{
            "request": {"id": "9a8b-1", "url": "/aws/ec2/group/sig-1", "method": "GET"},
            "response": {
                "status": {"code": 404, "message": "Not Found"},
                "errors": [{"code": "GROUP_DOESNT_EXIST", "message": "Group sig-1 not found", "field": "groupId"}]
            }
        }"#;
        let api = decode_error(404, body);
        assert_eq!(api.status, 404);
        assert_eq!(api.request_id.as_deref(), Some("9a8b-1"));
        assert_eq!(api.code(), Some("GROUP_DOESNT_EXIST"));
        assert_eq!(api.errors[0].field.as_deref(), Some("groupId"));
    }

    #[test]
    fn decode_unstructured_error() {
        let api = decode_error(502, b"Bad Gateway\n");
        assert_eq!(api.request_id, None);
        assert_eq!(api.code(), Some("502"));
        assert_eq!(api.message(), Some("Bad Gateway"));
    }
}
