//! Terminal output through termimad, with a plain-text fallback.

use std::fmt::Display;

use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled or verbatim.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Renders any markdown-producing value.
    pub fn render(&self, content: &impl Display) {
        self.render_markdown(&content.to_string());
    }

    pub fn render_markdown(&self, markdown: &str) {
        if !self.rich_enabled {
            print!("{markdown}");
            return;
        }

        // Headers keep their hashes; termimad would strip them inline
        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[36m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }
}
