//! Menu state - navigation over categories and their tools
//!
//! The navigation state is just `(category, row)`. `Menu` couples it with the
//! catalog so a category change can load the new tool list before the next
//! render, and so row bounds always come from the list actually on screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use multitool_common::{Catalog, CatalogError, Category, ToolDescriptor};
use std::sync::Arc;
use tracing::{debug, warn};

/// Selected column and row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub category: usize,
    pub row: usize,
}

impl NavigationState {
    pub fn new(category: usize, row: usize) -> Self {
        Self { category, row }
    }

    /// Returns true if the row moved
    pub fn move_down(&mut self, tool_count: usize) -> bool {
        let last_row = tool_count.saturating_sub(1);
        if self.row < last_row {
            self.row += 1;
            true
        } else {
            false
        }
    }

    /// Returns true if the row moved
    pub fn move_up(&mut self) -> bool {
        if self.row > 0 {
            self.row -= 1;
            true
        } else {
            false
        }
    }

    /// Returns true if the category changed; the row is reset on change
    pub fn move_left(&mut self) -> bool {
        if self.category > 0 {
            self.category -= 1;
            self.row = 0;
            true
        } else {
            false
        }
    }

    /// Returns true if the category changed; the row is reset on change
    pub fn move_right(&mut self, category_count: usize) -> bool {
        if self.category + 1 < category_count {
            self.category += 1;
            self.row = 0;
            true
        } else {
            false
        }
    }

    /// Keep the row inside a list of `tool_count` entries
    pub fn clamp_row(&mut self, tool_count: usize) {
        self.row = self.row.min(tool_count.saturating_sub(1));
    }
}

/// Inputs the menu understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Up,
    Down,
    Left,
    Right,
    Activate,
    Quit,
}

impl MenuInput {
    /// Map a key press; anything unbound (and key releases) map to `None`
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        match key.code {
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::Left => Some(Self::Left),
            KeyCode::Right => Some(Self::Right),
            KeyCode::Enter => Some(Self::Activate),
            KeyCode::Char('q')
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Self::Quit)
            }
            _ => None,
        }
    }
}

/// What happened after applying an input
#[derive(Debug)]
pub enum Transition {
    Unchanged,
    Moved,
    CategoryChanged,
    /// Category changed but its folder could not be read
    ScanFailed(String),
    Activate(ToolDescriptor),
    NoToolSelected,
    Quit,
}

pub struct Menu {
    categories: Vec<Category>,
    catalog: Catalog,
    nav: NavigationState,
    tools: Arc<[ToolDescriptor]>,
}

impl Menu {
    /// Nothing is loaded yet; call `load_current` before the first render
    pub fn new(categories: Vec<Category>, catalog: Catalog) -> Self {
        Self {
            categories,
            catalog,
            nav: NavigationState::default(),
            tools: Arc::from(Vec::new()),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn nav(&self) -> NavigationState {
        self.nav
    }

    /// Tools of the active category
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn selected_tool(&self) -> Option<&ToolDescriptor> {
        self.tools.get(self.nav.row)
    }

    /// Load the active category's tools.
    ///
    /// On a scan failure the category is shown empty and the error is
    /// returned for display; the next visit retries.
    pub fn load_current(&mut self) -> Result<(), CatalogError> {
        let Some(category) = self.categories.get(self.nav.category) else {
            return Ok(());
        };

        let result = match self.catalog.load(category) {
            Ok(tools) => {
                self.tools = tools;
                Ok(())
            }
            Err(err) => {
                warn!(category = %category.display_name, error = %err, "category scan failed");
                self.tools = Arc::from(Vec::new());
                Err(err)
            }
        };

        self.nav.clamp_row(self.tools.len());
        result
    }

    pub fn apply(&mut self, input: MenuInput) -> Transition {
        let transition = match input {
            MenuInput::Down => moved(self.nav.move_down(self.tools.len())),
            MenuInput::Up => moved(self.nav.move_up()),
            MenuInput::Left => {
                if self.nav.move_left() {
                    self.category_changed()
                } else {
                    Transition::Unchanged
                }
            }
            MenuInput::Right => {
                if self.nav.move_right(self.categories.len()) {
                    self.category_changed()
                } else {
                    Transition::Unchanged
                }
            }
            MenuInput::Activate => match self.selected_tool() {
                Some(tool) => Transition::Activate(tool.clone()),
                None => Transition::NoToolSelected,
            },
            MenuInput::Quit => Transition::Quit,
        };

        debug!(?input, category = self.nav.category, row = self.nav.row, "menu input");
        transition
    }

    fn category_changed(&mut self) -> Transition {
        match self.load_current() {
            Ok(()) => Transition::CategoryChanged,
            Err(err) => Transition::ScanFailed(err.to_string()),
        }
    }
}

fn moved(changed: bool) -> Transition {
    if changed {
        Transition::Moved
    } else {
        Transition::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use multitool_common::ToolRegistry;
    use std::fs;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn menu_with(root: &TempDir, layout: &[(&str, &[&str])]) -> Menu {
        let mut categories = Vec::new();
        for (folder, tools) in layout {
            let dir = root.path().join(folder);
            fs::create_dir_all(&dir).unwrap();
            for tool in *tools {
                fs::write(dir.join(format!("{}.toml", tool)), "").unwrap();
            }
            categories.push(Category::new(folder.to_uppercase(), *folder));
        }
        let catalog = Catalog::new(root.path(), ToolRegistry::new());
        let mut menu = Menu::new(categories, catalog);
        menu.load_current().unwrap();
        menu
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(MenuInput::from_key(&key(KeyCode::Up)), Some(MenuInput::Up));
        assert_eq!(MenuInput::from_key(&key(KeyCode::Enter)), Some(MenuInput::Activate));
        assert_eq!(MenuInput::from_key(&key(KeyCode::Char('q'))), Some(MenuInput::Quit));
        assert_eq!(MenuInput::from_key(&key(KeyCode::Char('x'))), None);
        assert_eq!(MenuInput::from_key(&key(KeyCode::Esc)), None);
        assert_eq!(
            MenuInput::from_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            None
        );

        let release = KeyEvent {
            code: KeyCode::Down,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(MenuInput::from_key(&release), None);
    }

    #[test]
    fn test_rows_stay_in_bounds() {
        let mut nav = NavigationState::default();
        assert!(!nav.move_up());
        assert!(nav.move_down(3));
        assert!(nav.move_down(3));
        assert!(!nav.move_down(3));
        assert_eq!(nav.row, 2);

        let mut empty = NavigationState::default();
        assert!(!empty.move_down(0));
        assert_eq!(empty.row, 0);
    }

    #[test]
    fn test_category_change_resets_row() {
        let mut nav = NavigationState::new(0, 4);
        assert!(nav.move_right(2));
        assert_eq!(nav, NavigationState::new(1, 0));
        assert!(!nav.move_right(2));

        nav.row = 3;
        assert!(nav.move_left());
        assert_eq!(nav, NavigationState::new(0, 0));
        assert!(!nav.move_left());
    }

    #[test]
    fn test_clamp_row() {
        let mut nav = NavigationState::new(0, 5);
        nav.clamp_row(2);
        assert_eq!(nav.row, 1);
        nav.clamp_row(0);
        assert_eq!(nav.row, 0);
    }

    #[test]
    fn test_activate_returns_selected_descriptor() {
        let root = TempDir::new().unwrap();
        let mut menu = menu_with(&root, &[("a", &["t1", "t2"][..])]);

        menu.apply(MenuInput::Down);
        match menu.apply(MenuInput::Activate) {
            Transition::Activate(tool) => assert_eq!(tool.name(), "t2"),
            other => panic!("unexpected transition {:?}", other),
        }
        assert_eq!(menu.nav(), NavigationState::new(0, 1));
    }

    #[test]
    fn test_activate_in_empty_category() {
        let root = TempDir::new().unwrap();
        let mut menu = menu_with(&root, &[("a", &[][..])]);
        assert!(matches!(menu.apply(MenuInput::Activate), Transition::NoToolSelected));
    }

    #[test]
    fn test_right_loads_the_new_category_eagerly() {
        let root = TempDir::new().unwrap();
        let mut menu = menu_with(&root, &[("a", &["t1"][..]), ("b", &["u1", "u2", "u3"][..])]);
        assert!(menu.catalog().cached("b").is_none());

        assert!(matches!(menu.apply(MenuInput::Right), Transition::CategoryChanged));
        assert!(menu.catalog().cached("b").is_some());
        assert_eq!(menu.tools().len(), 3);
        assert_eq!(menu.selected_tool().unwrap().name(), "u1");
    }

    #[test]
    fn test_unreadable_category_reports_and_shows_empty() {
        let root = TempDir::new().unwrap();
        let mut menu = menu_with(&root, &[("a", &["t1"][..])]);
        fs::write(root.path().join("broken"), "file, not folder").unwrap();

        let mut categories = menu.categories().to_vec();
        categories.push(Category::new("Broken", "broken"));
        menu = Menu::new(categories, Catalog::new(root.path(), ToolRegistry::new()));
        menu.load_current().unwrap();

        match menu.apply(MenuInput::Right) {
            Transition::ScanFailed(message) => assert!(message.contains("Failed to load tools")),
            other => panic!("unexpected transition {:?}", other),
        }
        assert!(menu.tools().is_empty());
        assert_eq!(menu.nav(), NavigationState::new(1, 0));
    }
}
