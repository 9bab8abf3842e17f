//! Color theme constants.

use ratatui::style::Color;

/// Border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Highlights and titles
pub const COLOR_ACCENT: Color = Color::White;

/// Less important text
pub const COLOR_DIM: Color = Color::DarkGray;

/// Successful requests
pub const COLOR_OK: Color = Color::Rgb(4, 181, 117);

/// Failed requests
pub const COLOR_FAILED: Color = Color::Red;

/// Response snippets
pub const COLOR_SNIPPET: Color = Color::Gray;

/// Category tags
pub const COLOR_CATEGORY: Color = Color::Rgb(0, 122, 204);

/// Selected row background
pub const COLOR_SELECTED_BG: Color = Color::Rgb(40, 40, 55);
