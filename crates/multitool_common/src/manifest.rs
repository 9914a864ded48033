//! Tool manifests - one TOML file per tool inside a category folder

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Why a single unit could not be turned into a usable descriptor
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("{0}")]
    Read(#[from] std::io::Error),

    #[error("{0}")]
    Parse(#[from] toml::de::Error),

    #[error("declares both `tool` and `command`")]
    ConflictingActions,

    #[error("`command` is empty")]
    EmptyCommand,

    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("tool '{tool}' rejected its options: {message}")]
    Construct { tool: String, message: String },
}

/// Parsed manifest. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolManifest {
    /// Display name; the file stem is used when absent
    pub name: Option<String>,

    pub description: Option<String>,

    /// Registry id of a built-in tool
    pub tool: Option<String>,

    /// External program and its arguments
    pub command: Option<Vec<String>>,

    /// Wait for Enter after an external command exits
    #[serde(default)]
    pub pause: bool,

    /// Passed verbatim to the registry constructor
    #[serde(default)]
    pub options: toml::Table,
}

/// What a manifest asks the launcher to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionSpec<'a> {
    None,
    Registered(&'a str),
    Command(&'a [String]),
}

impl ToolManifest {
    pub fn from_path(path: &Path) -> Result<Self, UnitError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, UnitError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn action_spec(&self) -> Result<ActionSpec<'_>, UnitError> {
        match (&self.tool, &self.command) {
            (Some(_), Some(_)) => Err(UnitError::ConflictingActions),
            (Some(id), None) => Ok(ActionSpec::Registered(id.as_str())),
            (None, Some(argv)) if argv.is_empty() || argv[0].trim().is_empty() => {
                Err(UnitError::EmptyCommand)
            }
            (None, Some(argv)) => Ok(ActionSpec::Command(argv.as_slice())),
            (None, None) => Ok(ActionSpec::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_manifest_has_no_action() {
        let manifest = ToolManifest::parse("").unwrap();
        assert_eq!(manifest, ToolManifest::default());
        assert_eq!(manifest.action_spec().unwrap(), ActionSpec::None);
    }

    #[test]
    fn test_registered_tool_with_options() {
        let manifest = ToolManifest::parse(
            "name = \"Ping Tool\"\ntool = \"ping\"\n[options]\ncount = 2\n",
        )
        .unwrap();
        assert_eq!(manifest.name.as_deref(), Some("Ping Tool"));
        assert_eq!(manifest.action_spec().unwrap(), ActionSpec::Registered("ping"));
        assert_eq!(manifest.options.get("count").and_then(|v| v.as_integer()), Some(2));
    }

    #[test]
    fn test_command_manifest() {
        let manifest = ToolManifest::parse("command = [\"df\", \"-h\"]\npause = true\n").unwrap();
        assert!(manifest.pause);
        match manifest.action_spec().unwrap() {
            ActionSpec::Command(argv) => assert_eq!(argv, ["df", "-h"]),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_conflicting_and_empty_actions() {
        let both = ToolManifest::parse("tool = \"ping\"\ncommand = [\"ping\"]\n").unwrap();
        assert!(matches!(both.action_spec(), Err(UnitError::ConflictingActions)));

        let empty = ToolManifest::parse("command = []\n").unwrap();
        assert!(matches!(empty.action_spec(), Err(UnitError::EmptyCommand)));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let err = ToolManifest::parse("nmae = \"typo\"\n").unwrap_err();
        assert!(matches!(err, UnitError::Parse(_)));
    }
}
