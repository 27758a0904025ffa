//! Tool-call argument values.
//!
//! The model hands arguments over as a loosely typed tree ([`ArgValue`]).
//! Tool executors only ever see flat scalars and string lists
//! ([`PlainValue`]); [`marshal_arguments`] is the total conversion between
//! the two and never drops a key.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Provider-native argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Null,
    String(String),
    Number(f64),
    Bool(bool),
    List(Vec<ArgValue>),
    Struct(BTreeMap<String, ArgValue>),
}

/// Marshaled argument value as passed to a tool executor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlainValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
}

pub type ToolArguments = BTreeMap<String, PlainValue>;

impl From<&Value> for ArgValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => ArgValue::Null,
            Value::Bool(b) => ArgValue::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map(ArgValue::Number)
                .unwrap_or_else(|| ArgValue::String(n.to_string())),
            Value::String(s) => ArgValue::String(s.clone()),
            Value::Array(items) => ArgValue::List(items.iter().map(ArgValue::from).collect()),
            Value::Object(map) => ArgValue::Struct(
                map.iter()
                    .map(|(key, value)| (key.clone(), ArgValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl ArgValue {
    pub fn to_json(&self) -> Value {
        match self {
            ArgValue::Null => Value::Null,
            ArgValue::String(s) => Value::String(s.clone()),
            ArgValue::Number(n) => integral(*n)
                .map(Value::from)
                .or_else(|| serde_json::Number::from_f64(*n).map(Value::Number))
                .unwrap_or(Value::Null),
            ArgValue::Bool(b) => Value::Bool(*b),
            ArgValue::List(items) => Value::Array(items.iter().map(ArgValue::to_json).collect()),
            ArgValue::Struct(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Flatten a list element to text.
    fn to_list_item(&self) -> String {
        match self {
            ArgValue::String(s) => s.clone(),
            ArgValue::Number(n) => match integral(*n) {
                Some(i) => i.to_string(),
                None => n.to_string(),
            },
            ArgValue::Bool(b) => b.to_string(),
            other => other.to_string(),
        }
    }

    pub fn marshal(&self) -> PlainValue {
        match self {
            ArgValue::String(s) => PlainValue::Str(s.clone()),
            ArgValue::Number(n) => match integral(*n) {
                Some(i) => PlainValue::Int(i),
                None => PlainValue::Float(*n),
            },
            ArgValue::Bool(b) => PlainValue::Bool(*b),
            ArgValue::List(items) => {
                PlainValue::List(items.iter().map(ArgValue::to_list_item).collect())
            }
            // Last resort: keep the value, as text.
            ArgValue::Null | ArgValue::Struct(_) => PlainValue::Str(self.to_string()),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl PlainValue {
    pub fn to_json(&self) -> Value {
        match self {
            PlainValue::Str(s) => Value::String(s.clone()),
            PlainValue::Int(i) => Value::from(*i),
            PlainValue::Float(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            PlainValue::Bool(b) => Value::Bool(*b),
            PlainValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Convert every raw argument to its plain form. Keys absent from `raw` stay
/// absent; nothing is defaulted.
pub fn marshal_arguments(raw: &BTreeMap<String, ArgValue>) -> ToolArguments {
    raw.iter()
        .map(|(key, value)| (key.clone(), value.marshal()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(value: Value) -> BTreeMap<String, ArgValue> {
        match ArgValue::from(&value) {
            ArgValue::Struct(fields) => fields,
            other => panic!("expected struct, got {other:?}"),
        }
    }

    #[test]
    fn strings_and_bools_pass_through() {
        let args = marshal_arguments(&raw(json!({"query": "MCP", "exact": true})));
        assert_eq!(args["query"], PlainValue::Str("MCP".to_string()));
        assert_eq!(args["exact"], PlainValue::Bool(true));
    }

    #[test]
    fn whole_numbers_become_integers() {
        let args = marshal_arguments(&raw(json!({"lesson_number": 4.0, "limit": 10})));
        assert_eq!(args["lesson_number"], PlainValue::Int(4));
        assert_eq!(args["limit"], PlainValue::Int(10));
    }

    #[test]
    fn fractional_numbers_stay_floating() {
        let args = marshal_arguments(&raw(json!({"threshold": 0.75})));
        assert_eq!(args["threshold"], PlainValue::Float(0.75));
    }

    #[test]
    fn lists_flatten_to_strings() {
        let args = marshal_arguments(&raw(json!({"tags": ["mcp", 2, true, 1.5, null]})));
        assert_eq!(
            args["tags"],
            PlainValue::List(vec![
                "mcp".to_string(),
                "2".to_string(),
                "true".to_string(),
                "1.5".to_string(),
                "null".to_string(),
            ])
        );
    }

    #[test]
    fn nested_struct_is_stringified_not_dropped() {
        let args = marshal_arguments(&raw(json!({"filter": {"course": "MCP", "lesson": 2}})));
        assert_eq!(
            args["filter"],
            PlainValue::Str(r#"{"course":"MCP","lesson":2}"#.to_string())
        );
    }

    #[test]
    fn null_is_stringified() {
        let args = marshal_arguments(&raw(json!({"course_name": null})));
        assert_eq!(args["course_name"], PlainValue::Str("null".to_string()));
    }

    #[test]
    fn missing_fields_are_not_fabricated() {
        let args = marshal_arguments(&raw(json!({"query": "retrieval"})));
        assert_eq!(args.len(), 1);
        assert!(!args.contains_key("course_name"));
        assert!(!args.contains_key("lesson_number"));
    }

    #[test]
    fn huge_whole_number_stays_float() {
        let args = marshal_arguments(&raw(json!({"big": 1e300})));
        assert_eq!(args["big"], PlainValue::Float(1e300));
    }

    #[test]
    fn plain_values_serialize_untagged() {
        let args = marshal_arguments(&raw(json!({
            "query": "MCP",
            "lesson_number": 2,
            "tags": ["a"]
        })));
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({"query": "MCP", "lesson_number": 2, "tags": ["a"]})
        );
    }
}
