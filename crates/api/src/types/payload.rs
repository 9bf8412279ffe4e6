//! Shape detection for remote response bodies.
//!
//! Endpoints answer with a bare array, an envelope of the form
//! `{ "data": [...], "nextPage": ... }`, or a single object. [`ApiPayload`] detects
//! which one it got so list extraction lives in one place.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A decoded response body whose shape has been classified.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    /// A bare JSON array.
    List(Vec<Value>),
    /// An object with a `data` array; the remaining fields are kept alongside.
    Envelope {
        data: Vec<Value>,
        extra: Map<String, Value>,
    },
    /// Any other object.
    Object(Map<String, Value>),
    /// A scalar or null.
    Scalar(Value),
}

impl ApiPayload {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => ApiPayload::List(items),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(data)) => ApiPayload::Envelope { data, extra: map },
                Some(other) => {
                    map.insert("data".to_string(), other);
                    ApiPayload::Object(map)
                }
                None => ApiPayload::Object(map),
            },
            other => ApiPayload::Scalar(other),
        }
    }

    /// Number of list items, or `None` for non-list shapes.
    pub fn item_count(&self) -> Option<usize> {
        match self {
            ApiPayload::List(items) | ApiPayload::Envelope { data: items, .. } => Some(items.len()),
            _ => None,
        }
    }

    /// Top-level property names for object shapes.
    pub fn property_names(&self) -> Vec<&str> {
        match self {
            ApiPayload::Object(map) => map.keys().map(String::as_str).collect(),
            ApiPayload::Envelope { extra, .. } => std::iter::once("data")
                .chain(extra.keys().map(String::as_str))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Side field of an envelope, such as `nextPage`.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        match self {
            ApiPayload::Envelope { extra, .. } => extra.get(key),
            _ => None,
        }
    }

    /// Next page number advertised by an envelope.
    pub fn next_page(&self) -> Option<u32> {
        self.extra("nextPage")
            .or_else(|| self.extra("next_page"))
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }

    /// Decode the list items. Fails for non-list shapes.
    pub fn into_items<T: DeserializeOwned>(self) -> Result<Vec<T>, String> {
        match self {
            ApiPayload::List(items) | ApiPayload::Envelope { data: items, .. } => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(|e| e.to_string()))
                .collect(),
            ApiPayload::Object(_) => Err("expected a list, got an object".to_string()),
            ApiPayload::Scalar(v) => Err(format!("expected a list, got {}", v)),
        }
    }

    /// Decode a single object. Fails for list shapes.
    pub fn into_object<T: DeserializeOwned>(self) -> Result<T, String> {
        match self {
            ApiPayload::Object(map) => {
                serde_json::from_value(Value::Object(map)).map_err(|e| e.to_string())
            }
            ApiPayload::Envelope { .. } | ApiPayload::List(_) => {
                Err("expected an object, got a list".to_string())
            }
            ApiPayload::Scalar(v) => Err(format!("expected an object, got {}", v)),
        }
    }

    /// The payload as it was received.
    pub fn into_value(self) -> Value {
        match self {
            ApiPayload::List(items) => Value::Array(items),
            ApiPayload::Envelope { data, mut extra } => {
                extra.insert("data".to_string(), Value::Array(data));
                Value::Object(extra)
            }
            ApiPayload::Object(map) => Value::Object(map),
            ApiPayload::Scalar(v) => v,
        }
    }
}

impl Serialize for ApiPayload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.clone().into_value().serialize(serializer)
    }
}
