use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// One row of a table response, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(Map<String, JsonValue>);

impl Row {
    pub(crate) fn from_object(columns: Map<String, JsonValue>) -> Self {
        Self(columns)
    }

    /// Raw JSON value of a column.
    pub fn get_value(&self, column: &str) -> Option<&JsonValue> {
        self.0.get(column)
    }

    /// Column value decoded into `T`; `None` when missing or of another type.
    pub fn get_as<T: DeserializeOwned>(&self, column: &str) -> Option<T> {
        self.get_value(column)
            .and_then(|v| T::deserialize(v).ok())
    }
}
