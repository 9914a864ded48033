//! Layout - absolute positions for every piece of the menu screen
//!
//! The screen is laid out top to bottom in fixed bands: banner, two info lines,
//! a divider, the wrapped description of the selected tool, a second divider,
//! then one column per category with the active column listing its tools.
//! The footer is pinned to the last row.
//!
//! Everything here is pure: `compute_layout` turns dimensions and state into a
//! list of regions, and regions that do not fit are clipped or dropped so the
//! renderer can write them blindly.

use super::utils::{truncate, wrap_text};
use crate::menu::NavigationState;
use multitool_common::{BannerConfig, Category, ToolDescriptor};

const BANNER_ROW: usize = 2;
const BANNER_HEIGHT: usize = 6;
const INFO_ROW: usize = BANNER_ROW + BANNER_HEIGHT + 1;
const INFO_LINES: usize = 2;
const DESC_DIVIDER_ROW: usize = INFO_ROW + 4;
const DESC_TITLE_ROW: usize = DESC_DIVIDER_ROW + 1;
const DESC_FIRST_ROW: usize = DESC_DIVIDER_ROW + 2;
/// Rows kept free under the description block
const DESC_BOTTOM_RESERVE: usize = 6;
/// Rows kept free under the tool list
const MENU_BOTTOM_RESERVE: usize = 2;
const NOTICE_FROM_BOTTOM: usize = 3;
const LEFT_MARGIN: usize = 2;

pub const DESC_TITLE: &str = "DESC:";
pub const EMPTY_CATEGORY: &str = " No tools available ";
pub const FOOTER: &str = "↑/↓: Navigate | ←/→: Switch columns | ENTER: Select | q: Quit";
pub const DIVIDER_CHAR: char = '─';

/// How a region is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStyle {
    Banner,
    Info,
    InfoDim,
    Divider,
    Heading,
    Description,
    Label,
    Highlight,
    Footer,
    Notice,
    Alert,
}

/// A run of text at an absolute position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub row: u16,
    pub col: u16,
    pub text: String,
    pub style: RegionStyle,
}

/// Everything that fits on a `height` x `width` screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuLayout {
    pub height: u16,
    pub width: u16,
    pub regions: Vec<Region>,
}

impl MenuLayout {
    fn new(height: u16, width: u16) -> Self {
        Self {
            height,
            width,
            regions: Vec::new(),
        }
    }

    /// Add a region, dropping or truncating whatever falls off screen
    fn put(&mut self, row: usize, col: usize, text: &str, style: RegionStyle) {
        let (height, width) = (self.height as usize, self.width as usize);
        if row >= height || col >= width || text.is_empty() {
            return;
        }

        self.regions.push(Region {
            row: row as u16,
            col: col as u16,
            text: truncate(text, width - col),
            style,
        });
    }

    fn put_centered(&mut self, row: usize, text: &str, style: RegionStyle) {
        let col = (self.width as usize).saturating_sub(text.chars().count()) / 2;
        self.put(row, col, text, style);
    }

    /// Regions starting on `row`, left to right
    pub fn row(&self, row: u16) -> Vec<&Region> {
        let mut regions: Vec<_> = self.regions.iter().filter(|r| r.row == row).collect();
        regions.sort_by_key(|r| r.col);
        regions
    }

    /// First region whose text contains `needle`
    pub fn find(&self, needle: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.text.contains(needle))
    }

    pub fn with_style(&self, style: RegionStyle) -> Vec<&Region> {
        self.regions.iter().filter(|r| r.style == style).collect()
    }
}

/// Inputs to the menu layout
#[derive(Debug, Clone, Copy)]
pub struct MenuView<'a> {
    pub banner: &'a BannerConfig,
    pub categories: &'a [Category],
    pub nav: NavigationState,
    /// Tools of the active category
    pub tools: &'a [ToolDescriptor],
    /// Transient message drawn above the footer
    pub notice: Option<&'a str>,
}

/// Rows the description block occupies for a given description.
///
/// The second divider and the category columns are positioned from this
/// count, so it is computed once and shared.
pub fn description_lines(description: Option<&str>, width: u16) -> Vec<String> {
    match description {
        Some(text) => wrap_text(text, (width as usize).saturating_sub(4)),
        None => Vec::new(),
    }
}

pub fn compute_layout(height: u16, width: u16, view: &MenuView<'_>) -> MenuLayout {
    let mut layout = MenuLayout::new(height, width);
    let h = height as usize;

    for (i, line) in view.banner.art.iter().take(BANNER_HEIGHT).enumerate() {
        layout.put_centered(BANNER_ROW + i, line, RegionStyle::Banner);
    }

    for (i, line) in view.banner.info.iter().take(INFO_LINES).enumerate() {
        let style = if i == 0 {
            RegionStyle::Info
        } else {
            RegionStyle::InfoDim
        };
        layout.put_centered(INFO_ROW + i, line, style);
    }

    let divider: String = std::iter::repeat(DIVIDER_CHAR).take(width as usize).collect();
    layout.put(DESC_DIVIDER_ROW, 0, &divider, RegionStyle::Divider);
    layout.put(DESC_TITLE_ROW, LEFT_MARGIN, DESC_TITLE, RegionStyle::Heading);

    let description = view.tools.get(view.nav.row).map(|tool| tool.description());
    let desc_lines = description_lines(description.as_deref(), width);
    for (i, line) in desc_lines.iter().enumerate() {
        let row = DESC_FIRST_ROW + i;
        if row + DESC_BOTTOM_RESERVE >= h {
            break;
        }
        layout.put(row, LEFT_MARGIN, line, RegionStyle::Description);
    }

    let second_divider_row = DESC_FIRST_ROW + 1 + desc_lines.len();
    if second_divider_row + DESC_BOTTOM_RESERVE < h {
        layout.put(second_divider_row, 0, &divider, RegionStyle::Divider);
    }

    let menu_row = second_divider_row + 2;
    let column_width = width as usize / view.categories.len().max(1);
    for (index, category) in view.categories.iter().enumerate() {
        let col = index * column_width + LEFT_MARGIN;
        let active = index == view.nav.category;
        let style = if active {
            RegionStyle::Highlight
        } else {
            RegionStyle::Label
        };
        layout.put(menu_row, col, &category.display_name, style);

        if !active {
            continue;
        }

        if view.tools.is_empty() {
            if menu_row + 2 + MENU_BOTTOM_RESERVE < h {
                layout.put(menu_row + 2, col, EMPTY_CATEGORY, RegionStyle::Highlight);
            }
            continue;
        }

        for (i, tool) in view.tools.iter().enumerate() {
            let row = menu_row + 2 + i;
            if row + MENU_BOTTOM_RESERVE >= h {
                break;
            }
            let style = if i == view.nav.row {
                RegionStyle::Highlight
            } else {
                RegionStyle::Label
            };
            layout.put(row, col, &format!(" {} ", tool.name()), style);
        }
    }

    if let Some(notice) = view.notice {
        if h >= NOTICE_FROM_BOTTOM {
            layout.put(h - NOTICE_FROM_BOTTOM, 0, notice, RegionStyle::Notice);
        }
    }

    if h > 0 {
        let footer = truncate(FOOTER, (width as usize).saturating_sub(1));
        layout.put(h - 1, 0, &footer, RegionStyle::Footer);
    }

    layout
}

/// Full-screen message: headline at the top, prompt two rows under it
pub fn alert_layout(height: u16, width: u16, headline: &str, prompt: &str) -> MenuLayout {
    let mut layout = MenuLayout::new(height, width);

    let lines = wrap_text(headline, width as usize);
    for (i, line) in lines.iter().enumerate() {
        layout.put(i, 0, line, RegionStyle::Alert);
    }
    layout.put(lines.len() + 1, 0, prompt, RegionStyle::Label);

    layout
}
