//! The functions every agent ships with.

use tracing::debug;

use crate::application::tasks::task_tools;
use crate::application::tooling::{RegistryError, ToolRegistry, get_time_tool};
use crate::application::world::world_tools;

/// Registry holding the clock, the task list tools and the world tools.
/// Fails on the first duplicate name.
pub fn builtin_registry() -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(get_time_tool())?;
    registry.register_all(task_tools())?;
    registry.register_all(world_tools())?;
    debug!(functions = registry.len(), "Built-in functions registered");
    Ok(registry)
}
