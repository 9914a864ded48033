//! Plain-text catalog listing for `--list`
//!
//! Walks every category through the same catalog the menu uses, so a listing
//! shows exactly what the menu would offer, failures included.

use multitool_common::{Catalog, Category, ToolDescriptor};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Write every category and its tools to `out`
pub fn write_catalog(
    out: &mut impl Write,
    categories: &[Category],
    catalog: &mut Catalog,
    color: bool,
) -> io::Result<()> {
    for (idx, category) in categories.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }

        let title = format!("{} ({}/)", category.display_name, category.storage_key);
        if color {
            writeln!(out, "{}", title.bold().cyan())?;
        } else {
            writeln!(out, "{}", title)?;
        }

        let tools = match catalog.load(category) {
            Ok(tools) => tools,
            Err(err) => {
                let line = format!("  {}", err);
                if color {
                    writeln!(out, "{}", line.red())?;
                } else {
                    writeln!(out, "{}", line)?;
                }
                continue;
            }
        };

        if tools.is_empty() {
            writeln!(out, "  (no tools)")?;
            continue;
        }

        for tool in tools.iter() {
            write_tool(out, tool, color)?;
        }
    }

    Ok(())
}

fn write_tool(out: &mut impl Write, tool: &ToolDescriptor, color: bool) -> io::Result<()> {
    let line = format!("  {:<20} {}", tool.name(), tool.description());

    if tool.is_failed() {
        return if color {
            writeln!(out, "{}", line.red())
        } else {
            writeln!(out, "{}", line)
        };
    }

    if tool.action().is_none() {
        return if color {
            writeln!(out, "{} {}", line, "(no action)".dimmed())
        } else {
            writeln!(out, "{} (no action)", line)
        };
    }

    writeln!(out, "{}", line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin_registry;
    use std::fs;
    use tempfile::TempDir;

    fn render(categories: &[Category], catalog: &mut Catalog) -> String {
        let mut out = Vec::new();
        write_catalog(&mut out, categories, catalog, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_lists_tools_and_failures() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("example");
        fs::create_dir(&folder).unwrap();
        fs::write(
            folder.join("hello.toml"),
            "name = \"Hello\"\ndescription = \"Says hello\"\ntool = \"hello\"\n",
        )
        .unwrap();
        fs::write(folder.join("notes.toml"), "name = \"Notes\"\n").unwrap();
        fs::write(folder.join("broken.toml"), "name = [\n").unwrap();

        let categories = vec![
            Category::new("Example", "example"),
            Category::new("Nothing", "nothing"),
        ];
        let mut catalog = Catalog::new(dir.path(), builtin_registry());
        let text = render(&categories, &mut catalog);

        assert!(text.starts_with("Example (example/)\n"));
        assert!(text.contains("Says hello"));
        assert!(text.contains("Error loading:"));
        assert!(text.contains("(no action)"));
        assert!(text.contains("Nothing (nothing/)\n  (no tools)\n"));
        // the listing warms the same cache the menu reads
        assert!(catalog.cached("example").is_some());
    }
}
