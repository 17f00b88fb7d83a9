//! Terminal styles for component trees and lookup results.
//!
//! Colors are used only when stdout is a terminal and `console` reports colors
//! enabled, which covers `NO_COLOR` and `CLICOLOR_FORCE`.

use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    /// Component declarations in tree output
    pub component: Style,
    /// Keys in binding lines
    pub key: Style,
}

impl Theme {
    pub fn detect() -> Self {
        let term = console::Term::stdout();
        Self::for_terminal(term.is_term() && console::colors_enabled())
    }

    pub fn for_terminal(colored: bool) -> Self {
        if !colored {
            let plain = Style::new();
            return Self {
                header: plain,
                success: plain,
                error: plain,
                warn: plain,
                info: plain,
                dim: plain,
                component: plain,
                key: plain,
            };
        }

        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().magenta(),
            dim: Style::new().dimmed(),
            component: Style::new().blue().bold(),
            key: Style::new().yellow(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
