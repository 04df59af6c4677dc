//! Styled text blocks.
//!
//! A [`StyledText`] pairs content with the metrics of the font it is drawn
//! in. Layout only needs a font's advance width and line height; colors and
//! faces belong to the renderer.

/// Font metrics consumed by text measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Advance width of one single-width character.
    pub char_width: f64,
    /// Height of one line, including leading.
    pub line_height: f64,
}

impl FontMetrics {
    /// Create metrics from an advance width and a line height.
    pub const fn new(char_width: f64, line_height: f64) -> Self {
        Self {
            char_width,
            line_height,
        }
    }

    /// One terminal cell per character, one row per line.
    pub const CELL: Self = Self::new(1.0, 1.0);
}

/// What a text block is used for. Renderers key styling off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// Reviewer display name.
    Username,
    /// Review body.
    Body,
    /// Creation timestamp.
    Created,
    /// "Show more" affordance label.
    ShowMore,
    /// Counter row label.
    Counter,
}

/// Role plus metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub role: TextRole,
    pub font: FontMetrics,
}

/// Immutable text content with its style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledText {
    text: String,
    style: TextStyle,
}

impl StyledText {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn role(&self) -> TextRole {
        self.style.role
    }

    /// Line height of the font this text is set in.
    pub fn line_height(&self) -> f64 {
        self.style.font.line_height
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Fonts for every text role in a review row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewStyles {
    pub username: FontMetrics,
    pub body: FontMetrics,
    pub created: FontMetrics,
    pub show_more: FontMetrics,
    pub counter: FontMetrics,
}

impl ReviewStyles {
    /// Point-based fonts for pixel displays.
    pub fn points() -> Self {
        Self {
            username: FontMetrics::new(8.5, 20.0),
            body: FontMetrics::new(8.0, 19.0),
            created: FontMetrics::new(6.5, 14.0),
            show_more: FontMetrics::new(8.0, 18.0),
            counter: FontMetrics::new(7.5, 17.0),
        }
    }

    /// Monospace cells for terminal rendering.
    pub fn cells() -> Self {
        Self {
            username: FontMetrics::CELL,
            body: FontMetrics::CELL,
            created: FontMetrics::CELL,
            show_more: FontMetrics::CELL,
            counter: FontMetrics::CELL,
        }
    }

    /// Style a piece of text for the given role.
    pub fn style(&self, role: TextRole) -> TextStyle {
        let font = match role {
            TextRole::Username => self.username,
            TextRole::Body => self.body,
            TextRole::Created => self.created,
            TextRole::ShowMore => self.show_more,
            TextRole::Counter => self.counter,
        };
        TextStyle { role, font }
    }

    pub fn styled(&self, text: impl Into<String>, role: TextRole) -> StyledText {
        StyledText::new(text, self.style(role))
    }
}

impl Default for ReviewStyles {
    fn default() -> Self {
        Self::points()
    }
}
