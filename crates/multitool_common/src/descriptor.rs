//! Tool descriptors - the normalized record shown for every discovered unit

use std::fmt;
use std::sync::Arc;

/// Description shown when a manifest does not provide one
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Something the launcher can hand the terminal to
///
/// `run` is called with the terminal in its normal line-oriented mode and
/// blocks until the tool is finished. Returning an error (or panicking) is
/// reported to the operator by the session; it never ends the launcher.
pub trait Tool: Send + Sync {
    fn run(&self) -> anyhow::Result<()>;
}

impl<F> Tool for F
where
    F: Fn() -> anyhow::Result<()> + Send + Sync,
{
    fn run(&self) -> anyhow::Result<()> {
        self()
    }
}

/// One entry of a category's tool list
#[derive(Clone)]
pub enum ToolDescriptor {
    /// Manifest resolved; the action may still be absent
    Loaded {
        /// Unit identifier (manifest file stem)
        id: String,
        name: String,
        description: String,
        action: Option<Arc<dyn Tool>>,
    },
    /// Manifest could not be resolved
    Failed { id: String, error: String },
}

impl ToolDescriptor {
    pub fn loaded(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        action: Option<Arc<dyn Tool>>,
    ) -> Self {
        Self::Loaded {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            action,
        }
    }

    pub fn failed(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failed {
            id: id.into(),
            error: error.into(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Loaded { id, .. } | Self::Failed { id, .. } => id,
        }
    }

    /// Display name; a failed unit is shown under its raw identifier
    pub fn name(&self) -> &str {
        match self {
            Self::Loaded { name, .. } => name,
            Self::Failed { id, .. } => id,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::Loaded { description, .. } => description.clone(),
            Self::Failed { error, .. } => format!("Error loading: {}", error),
        }
    }

    pub fn action(&self) -> Option<&Arc<dyn Tool>> {
        match self {
            Self::Loaded { action, .. } => action.as_ref(),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded {
                id,
                name,
                description,
                action,
            } => f
                .debug_struct("Loaded")
                .field("id", id)
                .field("name", name)
                .field("description", description)
                .field("action", &action.is_some())
                .finish(),
            Self::Failed { id, error } => f
                .debug_struct("Failed")
                .field("id", id)
                .field("error", error)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_descriptor_surfaces_error_in_description() {
        let tool = ToolDescriptor::failed("broken", "missing field `tool`");
        assert_eq!(tool.name(), "broken");
        assert_eq!(tool.description(), "Error loading: missing field `tool`");
        assert!(tool.action().is_none());
        assert!(tool.is_failed());
    }

    #[test]
    fn test_closures_are_tools() {
        let action: Arc<dyn Tool> = Arc::new(|| -> anyhow::Result<()> { Ok(()) });
        let tool = ToolDescriptor::loaded("hello", "Hello", DEFAULT_DESCRIPTION, Some(action));
        assert!(tool.action().is_some());
        assert!(tool.action().unwrap().run().is_ok());
        assert_eq!(tool.id(), "hello");
    }
}
