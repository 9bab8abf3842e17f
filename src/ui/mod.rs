//! UI rendering.
//!
//! The catalog fills the screen; the network debug panel overlays its lower
//! part when open.

mod catalog;
mod debug_panel;
mod theme;

pub use catalog::{render_catalog, tool_line};
pub use debug_panel::{
    entry_lines, panel_lines, render_debug_panel, render_toggle_hint, PANEL_KEY_HINTS,
};
pub use theme::*;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::App;

/// Share of the screen height the open panel covers.
const PANEL_HEIGHT_PERCENT: u16 = 60;

/// Render the whole UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    render_catalog(frame, chunks[0], app);
    render_toggle_hint(frame, chunks[1], &app.panel);
    render_debug_panel(frame, panel_area(chunks[0]), &app.panel);
}

/// The bottom part of `area` used by the debug panel overlay.
pub fn panel_area(area: Rect) -> Rect {
    let height = (area.height as u32 * PANEL_HEIGHT_PERCENT as u32 / 100) as u16;
    Rect {
        x: area.x,
        y: area.y + area.height - height,
        width: area.width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_area_is_bottom_aligned() {
        let area = Rect::new(0, 0, 80, 20);
        let panel = panel_area(area);
        assert_eq!(panel.height, 12);
        assert_eq!(panel.y + panel.height, 20);
        assert_eq!(panel.width, 80);
    }
}
