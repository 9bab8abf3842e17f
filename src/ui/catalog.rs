//! Tool catalog list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_CATEGORY, COLOR_DIM, COLOR_SELECTED_BG};
use crate::app::App;
use crate::catalog::Tool;

/// One line per tool: name, short description and category tags.
pub fn tool_line(tool: &Tool, selected: bool) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            if selected { "▸ " } else { "  " },
            Style::default().fg(COLOR_ACCENT),
        ),
        Span::styled(
            tool.name.clone(),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
    ];
    if !tool.short_description.is_empty() {
        spans.push(Span::styled(
            format!("  {}", tool.short_description),
            Style::default().fg(COLOR_DIM),
        ));
    }
    for category in &tool.categories {
        spans.push(Span::styled(
            format!("  [{}]", category),
            Style::default().fg(COLOR_CATEGORY),
        ));
    }

    let line = Line::from(spans);
    if selected {
        line.style(Style::default().bg(COLOR_SELECTED_BG))
    } else {
        line
    }
}

fn detail_lines(tool: &Tool) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        tool.link.clone(),
        Style::default().fg(COLOR_CATEGORY),
    ))];
    for text in [&tool.detailed_description, &tool.contact_info].into_iter().flatten() {
        lines.push(Line::from(text.clone()));
    }
    lines
}

/// Render the tool list, the selected tool's details and the status line.
pub fn render_catalog(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4), Constraint::Length(1)])
        .split(area);

    let title = format!(
        " Tools ({}) · {} categories ",
        app.tools.len(),
        app.categories.len()
    );
    let body: Vec<Line> = if app.tools.is_empty() {
        let hint = if app.is_loading() {
            "Loading..."
        } else {
            "No tools. Press r to reload."
        };
        vec![Line::from(Span::styled(hint, Style::default().fg(COLOR_DIM)))]
    } else {
        app.tools
            .iter()
            .enumerate()
            .map(|(i, tool)| tool_line(tool, i == app.selected))
            .collect()
    };

    // keep the selection on screen
    let visible_rows = chunks[0].height.saturating_sub(2) as usize;
    let scroll = app.selected.saturating_sub(visible_rows.saturating_sub(1)) as u16;

    let list = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(title),
        )
        .scroll((scroll, 0));
    frame.render_widget(list, chunks[0]);

    let details = Paragraph::new(app.selected_tool().map(detail_lines).unwrap_or_default())
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(details, chunks[1]);

    let status = Paragraph::new(Line::from(Span::styled(
        app.status.clone().unwrap_or_default(),
        Style::default().fg(COLOR_DIM),
    )));
    frame.render_widget(status, chunks[2]);
}
