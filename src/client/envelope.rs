//! Decoding of the backend's collection and member responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::errors::{ClientError, ClientResult};

/// Server-side pagination block some collection endpoints attach.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePagination {
    #[serde(default)]
    pub current_page: usize,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub total_pages: usize,
}

/// Records of one collection fetch plus optional pagination metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Envelope {
    pub records: Vec<Value>,
    pub pagination: Option<RemotePagination>,
}

impl Envelope {
    /// Accepts `{ <collection>: [...] }`, a bare array, or an object holding
    /// exactly one array.
    pub fn from_value(value: Value, collection: &str) -> ClientResult<Self> {
        match value {
            Value::Array(records) => Ok(Self {
                records,
                pagination: None,
            }),
            Value::Object(mut map) => {
                let pagination = match map.remove("pagination") {
                    Some(raw) => Some(serde_json::from_value(raw)?),
                    None => None,
                };

                let records = match map.remove(collection) {
                    Some(Value::Array(records)) => records,
                    Some(Value::Null) => Vec::new(),
                    Some(_) => {
                        return Err(ClientError::Decode(format!(
                            "`{collection}` is not an array"
                        )));
                    }
                    None => {
                        let mut arrays = map.into_iter().filter_map(|(_, v)| match v {
                            Value::Array(records) => Some(records),
                            _ => None,
                        });
                        match (arrays.next(), arrays.next()) {
                            (Some(records), None) => records,
                            _ => {
                                return Err(ClientError::Decode(format!(
                                    "response has no `{collection}` array"
                                )));
                            }
                        }
                    }
                };

                Ok(Self {
                    records,
                    pagination,
                })
            }
            other => Err(ClientError::Decode(format!(
                "expected an array or object, got {other}"
            ))),
        }
    }
}

/// Interprets the body of an update response.
///
/// Empty and non-JSON bodies carry no entity. An object wrapped in
/// `{ <member>: {...} }` is unwrapped.
pub fn member_from_body(body: &[u8], member: &str) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            log::debug!("Ignoring non-JSON update response: {err}");
            return None;
        }
    };

    match value {
        Value::Object(mut map) => match map.remove(member) {
            Some(inner @ Value::Object(_)) => Some(inner),
            Some(other) => {
                map.insert(member.to_string(), other);
                Some(Value::Object(map))
            }
            None => Some(Value::Object(map)),
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keyed_collection_with_pagination() {
        let envelope = Envelope::from_value(
            json!({
                "banners": [{ "id": 1 }, { "id": 2 }],
                "pagination": { "current_page": 1, "total_count": 2, "total_pages": 1 },
            }),
            "banners",
        )
        .expect("valid envelope");

        assert_eq!(envelope.records.len(), 2);
        assert_eq!(
            envelope.pagination,
            Some(RemotePagination {
                current_page: 1,
                total_count: 2,
                total_pages: 1,
            })
        );
    }

    #[test]
    fn bare_array() {
        let envelope = Envelope::from_value(json!([{ "id": 1 }]), "faqs").expect("valid");
        assert_eq!(envelope.records.len(), 1);
        assert!(envelope.pagination.is_none());
    }

    #[test]
    fn single_differently_named_array() {
        let envelope =
            Envelope::from_value(json!({ "noticeboard": [{ "id": 1 }], "count": 1 }), "noticeboards")
                .expect("valid");
        assert_eq!(envelope.records.len(), 1);
    }

    #[test]
    fn ambiguous_object_is_rejected() {
        let result = Envelope::from_value(json!({ "a": [], "b": [] }), "banners");
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[test]
    fn member_body_is_unwrapped() {
        let body = br#"{"banner":{"id":3,"active":false}}"#;
        assert_eq!(
            member_from_body(body, "banner"),
            Some(json!({ "id": 3, "active": false }))
        );
    }

    #[test]
    fn empty_or_plain_text_bodies_carry_nothing() {
        assert_eq!(member_from_body(b"", "banner"), None);
        assert_eq!(member_from_body(b"  \n", "banner"), None);
        assert_eq!(member_from_body(b"OK", "banner"), None);
    }
}
