pub mod config;
pub mod encoding;
pub mod tools;

pub use config::{Config, ConfigError};
pub use encoding::repair_bytes;
pub use tools::{
    marshal_arguments, ArgValue, PlainValue, RegistryError, SharedTool, Tool, ToolArguments,
    ToolDescriptor, ToolError, ToolExecutor, ToolInvocationRequest, ToolOutput, ToolRegistry,
};
