pub mod args;
pub mod executor;
pub mod registry;
pub mod types;

pub use args::{marshal_arguments, ArgValue, PlainValue, ToolArguments};
pub use executor::{ToolError, ToolExecutor, ToolOutput};
pub use registry::{RegistryError, SharedTool, Tool, ToolRegistry};
pub use types::{ToolDescriptor, ToolInvocationRequest};
