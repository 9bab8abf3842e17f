//! Network debug panel rendering.
//!
//! Draws a mounted [`DebugPanel`] as a bordered overlay: one block of lines
//! per entry, most recent first.

use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_FAILED, COLOR_OK, COLOR_SNIPPET};
use crate::debug::{DebugPanel, LogEntry};

/// Snippet lines shown per entry.
const SNIPPET_PREVIEW_LINES: usize = 3;

/// Key hints shown in the panel footer.
pub const PANEL_KEY_HINTS: &str = "e errors-only  c clear  x export  p persist  o close";

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// The lines describing one entry.
pub fn entry_lines(entry: &LogEntry) -> Vec<Line<'static>> {
    let failed = entry.is_failure();
    let badge_color = if failed { COLOR_FAILED } else { COLOR_OK };

    let outcome = match entry.status {
        Some(status) => format!("→ {}", status),
        None => "→ FAILED".to_string(),
    };
    let started = entry.started_at.with_timezone(&Local).format("%H:%M:%S");

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!(" {} ", entry.method),
            Style::default()
                .fg(badge_color)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(" "),
        Span::styled(entry.url.clone(), Style::default().fg(COLOR_ACCENT)),
        Span::raw(" "),
        Span::styled(outcome, Style::default().fg(badge_color)),
        Span::styled(
            format!("  {}ms  {}", entry.duration_ms, started),
            Style::default().fg(COLOR_DIM),
        ),
    ])];

    if let Some(snippet) = &entry.response_snippet {
        for text in snippet.lines().take(SNIPPET_PREVIEW_LINES) {
            lines.push(Line::from(Span::styled(
                format!("   {}", text),
                Style::default().fg(COLOR_SNIPPET),
            )));
        }
    }

    if let Some(error) = &entry.error {
        lines.push(Line::from(Span::styled(
            format!("   {}: {}", error.name, error.message),
            Style::default().fg(COLOR_FAILED),
        )));
    }

    lines
}

/// All lines for the panel body.
pub fn panel_lines(panel: &DebugPanel) -> Vec<Line<'static>> {
    let visible = panel.visible();
    if visible.is_empty() {
        return vec![Line::from(Span::styled(
            "No logs yet.",
            Style::default().fg(COLOR_DIM),
        ))];
    }
    visible.into_iter().flat_map(entry_lines).collect()
}

/// Render the panel into `area`. Draws nothing while the panel is closed.
pub fn render_debug_panel(frame: &mut Frame, area: Rect, panel: &DebugPanel) {
    if !panel.is_open() {
        return;
    }

    let title = format!(
        " Network Debug ({}) · errors only: {} · persist: {} ",
        panel.visible().len(),
        on_off(panel.errors_only()),
        on_off(panel.debug_enabled()),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            title,
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", PANEL_KEY_HINTS),
            Style::default().fg(COLOR_DIM),
        )));

    let body = Paragraph::new(panel_lines(panel))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}

/// Render the one-line open/close button.
pub fn render_toggle_hint(frame: &mut Frame, area: Rect, panel: &DebugPanel) {
    let label = if panel.is_open() {
        "[o] Close Debug"
    } else {
        "[o] Open Debug"
    };
    let hint = Paragraph::new(Line::from(Span::styled(label, Style::default().fg(COLOR_DIM))))
        .alignment(Alignment::Right);
    frame.render_widget(hint, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::entry::{CallTiming, ErrorInfo};
    use crate::traits::{Headers, Response};
    use bytes::Bytes;
    use chrono::Utc;

    fn timing() -> CallTiming {
        let now = Utc::now();
        CallTiming {
            id: "1-abcdef".to_string(),
            method: "GET".to_string(),
            url: "/tools?dbg=1-abcdef".to_string(),
            started_at: now,
            finished_at: now,
            duration_ms: 42,
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_completed_entry_lines() {
        let mut headers = Headers::new();
        headers.insert("content-type".into(), "text/plain".into());
        let response = Response::with_headers(404, headers, Bytes::from("not found"));
        let entry = LogEntry::completed(timing(), &response, Some("not found".into()));

        let lines = entry_lines(&entry);
        let first = line_text(&lines[0]);
        assert!(first.contains(" GET "));
        assert!(first.contains("/tools?dbg=1-abcdef"));
        assert!(first.contains("→ 404"));
        assert!(first.contains("42ms"));
        assert_eq!(line_text(&lines[1]).trim(), "not found");
    }

    #[test]
    fn test_failed_entry_lines() {
        let entry = LogEntry::failed(
            timing(),
            ErrorInfo {
                name: "ConnectionFailed".into(),
                message: "network down".into(),
                stack: None,
            },
            None,
        );

        let lines = entry_lines(&entry);
        assert!(line_text(&lines[0]).contains("→ FAILED"));
        assert_eq!(line_text(&lines[1]).trim(), "ConnectionFailed: network down");
    }

    #[test]
    fn test_snippet_preview_is_capped() {
        let body = "a\nb\nc\nd\ne";
        let response = Response::new(500, Bytes::from(body));
        let entry = LogEntry::completed(timing(), &response, Some(body.into()));
        assert_eq!(entry_lines(&entry).len(), 1 + SNIPPET_PREVIEW_LINES);
    }
}
