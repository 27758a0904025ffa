use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::args::ArgValue;

/// Provider-agnostic tool description handed to the model.
///
/// `parameters` is a JSON-Schema object and is forwarded verbatim; nothing in
/// this workspace validates or rewrites it. Registries that speak the
/// `input_schema` dialect deserialize into the same field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(alias = "input_schema")]
    pub parameters: Value,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// A tool call requested by the model, arguments still in provider-native form.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocationRequest {
    pub tool_name: String,
    pub raw_arguments: BTreeMap<String, ArgValue>,
}

impl ToolInvocationRequest {
    pub fn new(tool_name: impl Into<String>, raw_arguments: BTreeMap<String, ArgValue>) -> Self {
        Self {
            tool_name: tool_name.into(),
            raw_arguments,
        }
    }

    /// Build a request from a JSON `args` payload. Anything other than an
    /// object yields an empty argument map.
    pub fn from_json(tool_name: impl Into<String>, args: &Value) -> Self {
        let raw_arguments = match args {
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| (key.clone(), ArgValue::from(value)))
                .collect(),
            _ => BTreeMap::new(),
        };
        Self::new(tool_name, raw_arguments)
    }
}
