//! Multitool Common - catalog, configuration and tool contract
//!
//! Everything the launcher needs to know about tools without touching the
//! terminal: the category configuration, manifest parsing, the tool registry
//! and the per-category discovery cache.

pub mod catalog;
pub mod command_tool;
pub mod config;
pub mod descriptor;
pub mod manifest;
pub mod registry;

pub use catalog::{Catalog, CatalogError};
pub use config::{BannerConfig, Category, ConfigError, LauncherConfig};
pub use descriptor::{Tool, ToolDescriptor};
pub use manifest::{ToolManifest, UnitError};
pub use registry::{ToolConstructor, ToolRegistry};
