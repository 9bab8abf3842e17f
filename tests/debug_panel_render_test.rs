//! Rendering tests for the catalog screen and debug panel.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use toolcat::adapters::mock::InMemoryPreferences;
use toolcat::app::{App, AppMessage};
use toolcat::catalog::Tool;
use toolcat::debug::entry::{CallTiming, ErrorInfo};
use toolcat::debug::{LogEntry, NetworkDebug};
use toolcat::traits::Response;
use toolcat::ui;

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn timing(id: &str, url: &str) -> CallTiming {
    let now = Utc::now();
    CallTiming {
        id: id.to_string(),
        method: "GET".to_string(),
        url: url.to_string(),
        started_at: now,
        finished_at: now,
        duration_ms: 12,
    }
}

fn tool(name: &str, category: &str) -> Tool {
    Tool {
        id: name.to_string(),
        name: name.to_string(),
        short_description: format!("{} tool", name),
        detailed_description: None,
        target_audience: None,
        documentation: None,
        contact_info: None,
        icon: None,
        link: format!("https://{}.example", name.to_lowercase()),
        categories: vec![category.to_string()],
        tags: Vec::new(),
    }
}

fn draw(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| ui::render(f, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn setup() -> (NetworkDebug, App) {
    let ctx = NetworkDebug::from_parts(false, Arc::new(InMemoryPreferences::new()), 0);
    let app = App::new(&ctx, std::env::temp_dir());
    (ctx, app)
}

#[test]
fn test_catalog_lists_tools() {
    let (_ctx, mut app) = setup();
    app.handle_message(AppMessage::ToolsLoaded(vec![
        tool("Email", "Kommunikation"),
        tool("Backup", "Drift"),
    ]));

    let text = draw(&app);
    assert!(text.contains("Tools (2)"));
    assert!(text.contains("Email"));
    assert!(text.contains("[Drift]"));
    assert!(text.contains("[o] Open Debug"));
    assert!(!text.contains("Network Debug"));
}

#[test]
fn test_open_panel_shows_empty_state() {
    let (_ctx, mut app) = setup();
    app.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE));

    let text = draw(&app);
    assert!(text.contains("Network Debug (0)"));
    assert!(text.contains("No logs yet."));
    assert!(text.contains("[o] Close Debug"));
}

#[test]
fn test_open_panel_shows_entries() {
    let (ctx, mut app) = setup();
    let response = Response::new(404, Bytes::from("not found"));
    ctx.log.record(LogEntry::completed(
        timing("1-aaaaaa", "/tools/missing"),
        &response,
        Some("not found".into()),
    ));
    ctx.log.record(LogEntry::failed(
        timing("2-bbbbbb", "/kategorier"),
        ErrorInfo {
            name: "ConnectionFailed".into(),
            message: "network down".into(),
            stack: None,
        },
        None,
    ));

    app.tick();
    app.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE));

    let text = draw(&app);
    assert!(text.contains("Network Debug (2)"));
    assert!(text.contains("/tools/missing"));
    assert!(text.contains("→ 404"));
    assert!(text.contains("→ FAILED"));
    assert!(text.contains("ConnectionFailed: network down"));

    // failed call is newest, so it is drawn above the 404
    let failed_at = text.find("/kategorier").unwrap();
    let missing_at = text.find("/tools/missing").unwrap();
    assert!(failed_at < missing_at);
}

#[test]
fn test_errors_only_title() {
    let (_ctx, mut app) = setup();
    app.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE));
    app.handle_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE));

    let text = draw(&app);
    assert!(text.contains("errors only: on"));
}
