use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use serde_json::Value;
use thiserror::Error;

use super::args::ToolArguments;
use super::executor::{ToolError, ToolExecutor, ToolOutput};
use super::types::ToolDescriptor;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    async fn execute(&self, args: Value) -> Result<ToolOutput, ToolError>;

    fn to_descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(self.name(), self.description(), self.parameters_schema())
    }
}

pub type SharedTool = Arc<dyn Tool>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool with name '{0}' already registered")]
    DuplicateTool(String),

    #[error("invalid tool: {0}")]
    InvalidTool(String),
}

/// Named tools, listed back in registration order.
pub struct ToolRegistry {
    tools: DashMap<String, SharedTool>,
    order: RwLock<Vec<String>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: DashMap::new(),
            order: RwLock::new(Vec::new()),
        }
    }

    pub fn register<T>(&self, tool: T) -> Result<(), RegistryError>
    where
        T: Tool + 'static,
    {
        self.register_shared(Arc::new(tool))
    }

    pub fn register_shared(&self, tool: SharedTool) -> Result<(), RegistryError> {
        let name = tool.name().trim();

        if name.is_empty() {
            return Err(RegistryError::InvalidTool(
                "tool name cannot be empty".to_string(),
            ));
        }

        match self.tools.entry(name.to_string()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateTool(name.to_string())),
            Entry::Vacant(entry) => {
                let name = name.to_string();
                entry.insert(tool);
                match self.order.write() {
                    Ok(mut order) => order.push(name),
                    Err(poisoned) => poisoned.into_inner().push(name),
                }
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<SharedTool> {
        self.tools.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Descriptors of every registered tool, in registration order.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        let order = match self.order.read() {
            Ok(order) => order.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        order
            .iter()
            .filter_map(|name| self.get(name))
            .map(|tool| tool.to_descriptor())
            .collect()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute(&self, tool_name: &str, args: &ToolArguments) -> Result<ToolOutput, ToolError> {
        let tool = self
            .get(tool_name)
            .ok_or_else(|| ToolError::NotFound(tool_name.to_string()))?;

        let args = Value::Object(
            args.iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        );

        log::debug!("executing tool '{}' with {}", tool_name, args);
        tool.execute(args).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tools::PlainValue;

    struct EchoTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "echoes its arguments"
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": { "query": { "type": "string" } }
            })
        }

        async fn execute(&self, args: Value) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::Json(args))
        }
    }

    #[test]
    fn rejects_duplicate_and_empty_names() {
        let registry = ToolRegistry::new();
        registry.register(EchoTool { name: "search" }).unwrap();

        assert_eq!(
            registry.register(EchoTool { name: "search" }),
            Err(RegistryError::DuplicateTool("search".to_string()))
        );
        assert!(matches!(
            registry.register(EchoTool { name: "  " }),
            Err(RegistryError::InvalidTool(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn descriptors_follow_registration_order() {
        let registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(EchoTool { name }).unwrap();
        }

        let names: Vec<String> = registry
            .descriptors()
            .into_iter()
            .map(|descriptor| descriptor.name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn executes_registered_tool_with_json_arguments() {
        let registry = ToolRegistry::new();
        registry.register(EchoTool { name: "search" }).unwrap();

        let mut args = ToolArguments::new();
        args.insert("query".to_string(), PlainValue::Str("MCP".to_string()));
        args.insert("lesson_number".to_string(), PlainValue::Int(2));

        let output = registry.execute("search", &args).await.unwrap();
        assert_eq!(
            output,
            ToolOutput::Json(json!({"query": "MCP", "lesson_number": 2}))
        );
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute("missing", &ToolArguments::new())
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::NotFound("missing".to_string()));
    }
}
