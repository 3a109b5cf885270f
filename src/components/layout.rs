//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main view areas
pub struct ViewLayout {
    pub header: Rect,
    pub list: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the main view layout.
///
/// `full_page` stretches the view across the whole terminal; otherwise
/// the content sits in a centered column, like a settings panel.
pub fn calculate_view_layout(area: Rect, full_page: bool, has_description: bool) -> ViewLayout {
    let content_area = if full_page {
        area
    } else {
        let width = area.width.min(100);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y,
            width,
            area.height,
        )
    };

    let header_height = if has_description { 4 } else { 3 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(content_area);

    ViewLayout {
        header: chunks[0],
        list: chunks[1],
        status: chunks[2],
        help: chunks[3],
    }
}
