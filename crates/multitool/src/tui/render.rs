//! Rendering - writes computed regions into a ratatui frame

use super::layout::{MenuLayout, RegionStyle};
use ratatui::{
    style::{Color, Modifier, Style},
    Frame,
};

pub fn style_for(style: RegionStyle) -> Style {
    let inverted = Style::default().fg(Color::Black).bg(Color::White);
    match style {
        RegionStyle::Banner => Style::default().fg(Color::Cyan),
        RegionStyle::Info | RegionStyle::Divider => {
            Style::default().add_modifier(Modifier::BOLD)
        }
        RegionStyle::InfoDim | RegionStyle::Footer => {
            Style::default().add_modifier(Modifier::DIM)
        }
        RegionStyle::Heading => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        RegionStyle::Description => Style::default().fg(Color::Yellow),
        RegionStyle::Label => Style::default(),
        RegionStyle::Highlight => inverted,
        RegionStyle::Notice | RegionStyle::Alert => inverted.add_modifier(Modifier::BOLD),
    }
}

/// Draw every region that lands inside the frame
pub fn draw_layout(f: &mut Frame, layout: &MenuLayout) {
    let area = f.size();
    let buf = f.buffer_mut();

    for region in &layout.regions {
        if region.row >= area.height || region.col >= area.width {
            continue;
        }
        let max_width = (area.width - region.col) as usize;
        buf.set_stringn(
            area.x + region.col,
            area.y + region.row,
            &region.text,
            max_width,
            style_for(region.style),
        );
    }
}
