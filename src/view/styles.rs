//! Terminal styling for row elements.

use crate::model::TextRole;
use crate::row::ImageSlot;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether colors are enabled.
///
/// Disabled by `--no-color` or any value of the `NO_COLOR` environment
/// variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== RowStyles =====

/// Terminal style per row element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyles {
    username: Style,
    body: Style,
    created: Style,
    show_more: Style,
    counter: Style,
    rating: Style,
    image_loaded: Style,
    image_placeholder: Style,
    status: Style,
}

impl RowStyles {
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Without colors only modifiers remain, so the affordance still reads
    /// as interactive.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);
        let underlined = Style::default().add_modifier(Modifier::UNDERLINED);

        if config.colors_enabled() {
            Self {
                username: bold,
                body: Style::default(),
                created: dim.fg(Color::Gray),
                show_more: underlined.fg(Color::Blue),
                counter: dim.fg(Color::Gray),
                rating: Style::default().fg(Color::Yellow),
                image_loaded: Style::default().fg(Color::Green),
                image_placeholder: dim.fg(Color::DarkGray),
                status: Style::default().fg(Color::Black).bg(Color::Gray),
            }
        } else {
            Self {
                username: bold,
                body: Style::default(),
                created: dim,
                show_more: underlined,
                counter: dim,
                rating: Style::default(),
                image_loaded: Style::default(),
                image_placeholder: dim,
                status: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }

    pub fn text(&self, role: TextRole) -> Style {
        match role {
            TextRole::Username => self.username,
            TextRole::Body => self.body,
            TextRole::Created => self.created,
            TextRole::ShowMore => self.show_more,
            TextRole::Counter => self.counter,
        }
    }

    pub fn rating(&self) -> Style {
        self.rating
    }

    /// Style of an image box, by slot and load state.
    pub fn image(&self, _slot: ImageSlot, loaded: bool) -> Style {
        if loaded {
            self.image_loaded
        } else {
            self.image_placeholder
        }
    }

    pub fn status(&self) -> Style {
        self.status
    }
}

impl Default for RowStyles {
    fn default() -> Self {
        Self::new()
    }
}
