use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::RegistryError;
use super::handler::ToolHandler;
use super::schema::ParameterSchema;

/// A capability the model may call.
#[derive(Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
    /// Tag gating availability, e.g. `combat`.
    pub group: Option<String>,
    /// Runtime mode the tool is limited to, e.g. `creative`.
    pub mode: Option<String>,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: ParameterSchema::new(),
            group: None,
            mode: None,
            handler: Arc::new(handler),
        }
    }

    pub fn with_parameters(mut self, parameters: ParameterSchema) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Which tools are offered on a given turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolFilter {
    pub groups: BTreeSet<String>,
    pub mode: Option<String>,
}

impl ToolFilter {
    pub fn new<I, S>(groups: I, mode: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    pub fn allows(&self, definition: &ToolDefinition) -> bool {
        let group_ok = definition
            .group
            .as_ref()
            .is_none_or(|group| self.groups.contains(group));
        let mode_ok = definition
            .mode
            .as_ref()
            .is_none_or(|mode| self.mode.as_ref() == Some(mode));
        group_ok && mode_ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Model-facing tool entry, `{"type": "function", "function": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionSchema,
}

#[derive(Default)]
pub struct ToolRegistry {
    definitions: Vec<Arc<ToolDefinition>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: ToolDefinition) -> Result<(), RegistryError> {
        if self.index.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateName(definition.name));
        }
        debug!(tool = %definition.name, "registering tool");
        self.index
            .insert(definition.name.clone(), self.definitions.len());
        self.definitions.push(Arc::new(definition));
        Ok(())
    }

    pub fn register_all<I>(&mut self, definitions: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = ToolDefinition>,
    {
        definitions
            .into_iter()
            .try_for_each(|definition| self.register(definition))
    }

    pub fn get(&self, name: &str) -> Option<Arc<ToolDefinition>> {
        self.index
            .get(name)
            .map(|&position| Arc::clone(&self.definitions[position]))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions available under `filter`, in registration order.
    pub fn list<'a>(&'a self, filter: &'a ToolFilter) -> impl Iterator<Item = &'a ToolDefinition> {
        self.definitions
            .iter()
            .map(AsRef::as_ref)
            .filter(move |definition| filter.allows(definition))
    }

    pub fn describe(definition: &ToolDefinition) -> ToolSchema {
        ToolSchema {
            kind: "function",
            function: FunctionSchema {
                name: definition.name.clone(),
                description: definition.description.clone(),
                parameters: definition.parameters.to_json_schema(),
            },
        }
    }

    pub fn schemas(&self, filter: &ToolFilter) -> Vec<ToolSchema> {
        self.list(filter).map(Self::describe).collect()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.definitions.iter().map(|d| &d.name))
            .finish()
    }
}
