use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::{ProvisionError, ProvisionResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(Map<String, Value>),
    Failure(String),
}

impl Response {
    /// Serializes `payload` into the success envelope. Non-object payloads land under `result`.
    pub fn ok<T: Serialize>(payload: &T) -> Self {
        let mut fields = Map::new();
        fields.insert("success".to_string(), Value::Bool(true));
        match serde_json::to_value(payload) {
            Ok(Value::Object(payload)) => {
                for (key, value) in payload {
                    if key != "success" {
                        fields.insert(key, value);
                    }
                }
            }
            Ok(other) => {
                fields.insert("result".to_string(), other);
            }
            Err(err) => return Response::Failure(format!("Failed to encode result: {err}")),
        }
        Response::Success(fields)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Failure(message.into())
    }

    pub fn from_result<T: Serialize>(result: ProvisionResult<T>) -> Self {
        match result {
            Ok(payload) => Response::ok(&payload),
            Err(err) => Response::from(err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Failure(message) => Some(message),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Response::Success(fields) => fields.get(key),
            Response::Failure(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Response::Success(fields) => Value::Object(fields.clone()),
            Response::Failure(message) => {
                let mut fields = Map::new();
                fields.insert("error".to_string(), Value::String(message.clone()));
                Value::Object(fields)
            }
        }
    }
}

impl From<ProvisionError> for Response {
    fn from(err: ProvisionError) -> Self {
        Response::Failure(err.to_string())
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Response::Success(fields) => fields.serialize(serializer),
            Response::Failure(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
        }
    }
}
