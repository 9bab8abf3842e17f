//! Key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    /// Reload tools and categories
    Refresh,
    Quit,
}

impl App {
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.tools.len() {
            self.selected += 1;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handle a key press.
    ///
    /// `o` opens and closes the debug panel at any time. The panel's own
    /// commands only apply while it is open.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return AppAction::Quit;
        }

        if self.panel.is_open() {
            match key.code {
                KeyCode::Char('e') => {
                    self.panel.toggle_errors_only();
                    return AppAction::None;
                }
                KeyCode::Char('c') => {
                    self.panel.clear();
                    self.status = Some("Network log cleared".to_string());
                    return AppAction::None;
                }
                KeyCode::Char('x') => {
                    self.export_logs();
                    return AppAction::None;
                }
                KeyCode::Char('p') => {
                    let enabled = self.panel.toggle_persistence();
                    self.status = Some(if enabled {
                        "Debug logging will stay on across restarts".to_string()
                    } else {
                        "Debug logging persistence off".to_string()
                    });
                    return AppAction::None;
                }
                KeyCode::Esc => {
                    self.panel.toggle_open();
                    return AppAction::None;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                AppAction::Quit
            }
            KeyCode::Char('o') => {
                self.panel.toggle_open();
                AppAction::None
            }
            KeyCode::Char('r') => AppAction::Refresh,
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_up();
                AppAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_down();
                AppAction::None
            }
            _ => AppAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryPreferences;
    use crate::debug::{NetworkDebug, DEBUG_PREFERENCE_KEY};
    use crate::traits::PreferenceStore;
    use std::sync::Arc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> (InMemoryPreferences, NetworkDebug, App) {
        let prefs = InMemoryPreferences::new();
        let ctx = NetworkDebug::from_parts(false, Arc::new(prefs.clone()), 0);
        let dir = std::env::temp_dir();
        let app = App::new(&ctx, dir);
        (prefs, ctx, app)
    }

    #[test]
    fn test_quit_keys() {
        let (_p, _c, mut app) = setup();
        assert_eq!(app.handle_key(press(KeyCode::Char('q'))), AppAction::Quit);
        assert!(app.should_quit);

        let (_p, _c, mut app) = setup();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), AppAction::Quit);
    }

    #[test]
    fn test_refresh_key() {
        let (_p, _c, mut app) = setup();
        assert_eq!(app.handle_key(press(KeyCode::Char('r'))), AppAction::Refresh);
    }

    #[test]
    fn test_panel_toggle_and_commands() {
        let (_p, _c, mut app) = setup();
        assert!(!app.panel.is_open());

        // panel commands are inert while closed
        app.handle_key(press(KeyCode::Char('e')));
        assert!(!app.panel.errors_only());

        app.handle_key(press(KeyCode::Char('o')));
        assert!(app.panel.is_open());
        app.handle_key(press(KeyCode::Char('e')));
        assert!(app.panel.errors_only());

        app.handle_key(press(KeyCode::Esc));
        assert!(!app.panel.is_open());
    }

    #[test]
    fn test_persist_key_writes_preference() {
        let (prefs, ctx, mut app) = setup();
        app.handle_key(press(KeyCode::Char('o')));
        app.handle_key(press(KeyCode::Char('p')));

        assert_eq!(prefs.get(DEBUG_PREFERENCE_KEY).unwrap().as_deref(), Some("1"));
        assert!(ctx.state.is_active());
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let (_p, _c, mut app) = setup();
        app.move_down();
        assert_eq!(app.selected, 0);
        app.handle_key(press(KeyCode::Char('k')));
        assert_eq!(app.selected, 0);
    }
}
