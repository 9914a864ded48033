//! Catalog - discovers the tools of a category and memoizes them
//!
//! A category folder holds one `*.toml` manifest per tool. Each manifest is
//! resolved on its own: a broken one turns into a `Failed` descriptor and the
//! rest of the folder still loads. Resolved lists are cached per folder for the
//! lifetime of the catalog.

use crate::command_tool::CommandTool;
use crate::config::Category;
use crate::descriptor::{Tool, ToolDescriptor, DEFAULT_DESCRIPTION};
use crate::manifest::{ActionSpec, ToolManifest, UnitError};
use crate::registry::ToolRegistry;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

const MANIFEST_EXTENSION: &str = "toml";

/// Folder-level failure. Unit failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to load tools from {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct Catalog {
    modules_dir: PathBuf,
    registry: ToolRegistry,
    cache: HashMap<String, Arc<[ToolDescriptor]>>,
}

impl Catalog {
    pub fn new(modules_dir: impl Into<PathBuf>, registry: ToolRegistry) -> Self {
        Self {
            modules_dir: modules_dir.into(),
            registry,
            cache: HashMap::new(),
        }
    }

    /// Cached list for a folder, if it was loaded successfully before
    pub fn cached(&self, storage_key: &str) -> Option<Arc<[ToolDescriptor]>> {
        self.cache.get(storage_key).cloned()
    }

    /// Tools of a category, scanning its folder on first use.
    ///
    /// A missing folder is an empty category. A folder that exists but cannot
    /// be read is an error and is not cached, so the next call scans again.
    pub fn load(&mut self, category: &Category) -> Result<Arc<[ToolDescriptor]>, CatalogError> {
        if let Some(tools) = self.cache.get(&category.storage_key) {
            return Ok(Arc::clone(tools));
        }

        let folder = self.modules_dir.join(&category.storage_key);
        let tools: Arc<[ToolDescriptor]> = match fs::metadata(&folder) {
            Ok(_) => self.scan(&folder)?.into(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(folder = %folder.display(), "category folder missing, treating as empty");
                Arc::from(Vec::new())
            }
            Err(source) => {
                return Err(CatalogError::Scan {
                    path: folder,
                    source,
                })
            }
        };

        info!(
            category = %category.display_name,
            tools = tools.len(),
            failed = tools.iter().filter(|tool| tool.is_failed()).count(),
            "loaded category"
        );

        self.cache
            .insert(category.storage_key.clone(), Arc::clone(&tools));
        Ok(tools)
    }

    fn scan(&self, folder: &Path) -> Result<Vec<ToolDescriptor>, CatalogError> {
        let scan_error = |source| CatalogError::Scan {
            path: folder.to_path_buf(),
            source,
        };

        let mut units = Vec::new();
        for entry in fs::read_dir(folder).map_err(scan_error)? {
            let path = entry.map_err(scan_error)?.path();
            if is_manifest(&path) {
                units.push(path);
            }
        }
        units.sort();

        Ok(units
            .iter()
            .map(|path| {
                let id = unit_id(path);
                self.resolve(&id, path).unwrap_or_else(|err| {
                    warn!(unit = %path.display(), error = %err, "failed to load tool");
                    ToolDescriptor::failed(id, err.to_string())
                })
            })
            .collect())
    }

    fn resolve(&self, id: &str, path: &Path) -> Result<ToolDescriptor, UnitError> {
        let manifest = ToolManifest::from_path(path)?;

        let action: Option<Arc<dyn Tool>> = match manifest.action_spec()? {
            ActionSpec::None => None,
            ActionSpec::Registered(tool) => {
                let constructor = self
                    .registry
                    .get(tool)
                    .ok_or_else(|| UnitError::UnknownTool(tool.to_string()))?;
                let built = constructor(&manifest.options).map_err(|err| UnitError::Construct {
                    tool: tool.to_string(),
                    message: format!("{:#}", err),
                })?;
                Some(built)
            }
            ActionSpec::Command(argv) => CommandTool::new(argv, manifest.pause)
                .map(|tool| Arc::new(tool) as Arc<dyn Tool>),
        };

        let name = non_blank(manifest.name).unwrap_or_else(|| id.to_string());
        let description =
            non_blank(manifest.description).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

        Ok(ToolDescriptor::loaded(id, name, description, action))
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("modules_dir", &self.modules_dir)
            .field("registry", &self.registry)
            .field("cached", &self.cache.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn is_manifest(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.') || name.starts_with('_'))
        .unwrap_or(true);

    !hidden
        && path.is_file()
        && path.extension().and_then(|ext| ext.to_str()) == Some(MANIFEST_EXTENSION)
}

fn unit_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_skips_non_manifests_and_hidden_files() {
        let root = TempDir::new().unwrap();
        let folder = root.path().join("misc");
        write(&folder, "a.toml", "name = \"A\"\n");
        write(&folder, "README.md", "not a tool");
        write(&folder, ".hidden.toml", "name = \"Hidden\"\n");
        write(&folder, "__init__.toml", "name = \"Init\"\n");
        fs::create_dir_all(folder.join("nested.toml")).unwrap();

        let mut catalog = Catalog::new(root.path(), ToolRegistry::new());
        let tools = catalog.load(&Category::new("Misc", "misc")).unwrap();
        let names: Vec<_> = tools.iter().map(|tool| tool.name().to_string()).collect();
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let root = TempDir::new().unwrap();
        write(&root.path().join("misc"), "bare.toml", "");

        let mut catalog = Catalog::new(root.path(), ToolRegistry::new());
        let tools = catalog.load(&Category::new("Misc", "misc")).unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name(), "bare");
        assert_eq!(tools[0].description(), DEFAULT_DESCRIPTION);
        assert!(tools[0].action().is_none());
        assert!(!tools[0].is_failed());
    }

    #[test]
    fn test_unknown_tool_and_rejected_options_fail_the_unit() {
        let root = TempDir::new().unwrap();
        let folder = root.path().join("net");
        write(&folder, "a_unknown.toml", "tool = \"warp-drive\"\n");
        write(&folder, "b_picky.toml", "tool = \"picky\"\n");

        let mut registry = ToolRegistry::new();
        registry.register("picky", |_options| anyhow::bail!("needs a host"));

        let mut catalog = Catalog::new(root.path(), registry);
        let tools = catalog.load(&Category::new("Net", "net")).unwrap();
        assert_eq!(tools.len(), 2);
        assert!(tools[0].description().contains("unknown tool 'warp-drive'"));
        assert!(tools[1].description().contains("needs a host"));
        assert!(tools.iter().all(|tool| tool.action().is_none()));
    }

    #[test]
    fn test_command_manifest_gets_an_action() {
        let root = TempDir::new().unwrap();
        write(&root.path().join("sys"), "df.toml", "command = [\"df\", \"-h\"]\n");

        let mut catalog = Catalog::new(root.path(), ToolRegistry::new());
        let tools = catalog.load(&Category::new("System", "sys")).unwrap();
        assert!(tools[0].action().is_some());
    }

    #[test]
    fn test_folder_that_is_a_file_is_a_scan_error_and_not_cached() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("oops"), "not a folder").unwrap();

        let mut catalog = Catalog::new(root.path(), ToolRegistry::new());
        let category = Category::new("Oops", "oops");
        assert!(matches!(catalog.load(&category), Err(CatalogError::Scan { .. })));
        assert!(catalog.cached("oops").is_none());

        // Fixed on disk: the next selection retries the scan
        fs::remove_file(root.path().join("oops")).unwrap();
        write(&root.path().join("oops"), "t.toml", "name = \"T\"\n");
        assert_eq!(catalog.load(&category).unwrap().len(), 1);
    }

    #[test]
    fn test_unstatable_folder_is_a_scan_error_not_an_empty_category() {
        let root = TempDir::new().unwrap();
        // modules_dir is a plain file, so stat on any category below it fails
        // with something other than NotFound
        let modules = root.path().join("modules");
        fs::write(&modules, "not a folder").unwrap();

        let mut catalog = Catalog::new(&modules, ToolRegistry::new());
        let category = Category::new("Net", "net");
        assert!(matches!(catalog.load(&category), Err(CatalogError::Scan { .. })));
        assert!(catalog.cached("net").is_none());

        fs::remove_file(&modules).unwrap();
        write(&modules.join("net"), "ping.toml", "name = \"Ping\"\n");
        assert_eq!(catalog.load(&category).unwrap().len(), 1);
    }
}
