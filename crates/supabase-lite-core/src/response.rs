use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::SupabaseResult;
use crate::value::Row;

/// How the body of a table response was turned into [`SupabaseResponse::data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decode {
    /// The body was valid JSON.
    Parsed,
    /// 204, or a success status with an empty body.
    NoContent,
    /// A success body that was not valid JSON. `data` is an empty object.
    ///
    /// Table calls deliberately degrade instead of failing here so callers
    /// only ever branch on "rows or no rows".
    Lenient,
}

/// Normalized result of one table call.
#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseResponse {
    /// Parsed JSON body, or an empty object when there was nothing to parse.
    pub data: JsonValue,
    /// HTTP status of the reply.
    pub status: u16,
    /// Which decode path produced `data`.
    pub decode: Decode,
}

impl SupabaseResponse {
    pub fn parsed(status: u16, data: JsonValue) -> Self {
        Self {
            data,
            status,
            decode: Decode::Parsed,
        }
    }

    pub fn no_content(status: u16) -> Self {
        Self {
            data: empty(),
            status,
            decode: Decode::NoContent,
        }
    }

    pub fn lenient(status: u16) -> Self {
        Self {
            data: empty(),
            status,
            decode: Decode::Lenient,
        }
    }

    /// Decode a raw body under the lenient policy.
    pub fn from_body(status: u16, body: &str) -> Self {
        if status == 204 || body.trim().is_empty() {
            return Self::no_content(status);
        }
        match serde_json::from_str::<JsonValue>(body) {
            Ok(data) => Self::parsed(status, data),
            Err(e) => {
                tracing::warn!(status, error = %e, "Unparseable response body, using empty result");
                Self::lenient(status)
            }
        }
    }

    /// True when the lenient fallback produced this response.
    pub fn is_lenient(&self) -> bool {
        self.decode == Decode::Lenient
    }

    /// True when there are no rows: an empty array, an empty object, or null.
    pub fn is_empty(&self) -> bool {
        match &self.data {
            JsonValue::Array(a) => a.is_empty(),
            JsonValue::Object(o) => o.is_empty(),
            JsonValue::Null => true,
            _ => false,
        }
    }

    /// Rows in the body. An array yields its object elements; a non-empty
    /// object yields itself as a single row.
    pub fn rows(&self) -> Vec<Row> {
        match &self.data {
            JsonValue::Array(items) => items.iter().filter_map(as_row).collect(),
            JsonValue::Object(o) if !o.is_empty() => as_row(&self.data).into_iter().collect(),
            _ => Vec::new(),
        }
    }

    /// The first row, if any.
    pub fn first(&self) -> Option<Row> {
        self.rows().into_iter().next()
    }

    /// Deserialize the first row into a caller type.
    pub fn first_as<T: DeserializeOwned>(&self) -> SupabaseResult<Option<T>> {
        let first = match &self.data {
            JsonValue::Array(items) => items.first(),
            JsonValue::Object(o) if !o.is_empty() => Some(&self.data),
            _ => None,
        };
        match first {
            Some(value) => Ok(Some(T::deserialize(value)?)),
            None => Ok(None),
        }
    }

    /// Deserialize `data` into a caller type.
    pub fn into_typed<T: DeserializeOwned>(self) -> SupabaseResult<T> {
        Ok(serde_json::from_value(self.data)?)
    }
}

fn empty() -> JsonValue {
    JsonValue::Object(Map::new())
}

fn as_row(value: &JsonValue) -> Option<Row> {
    value.as_object().cloned().map(Row::from_object)
}
