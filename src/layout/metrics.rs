//! Text measurement.
//!
//! [`TextMetrics`] is the only capability the layout engine consumes.
//! [`MonospaceMetrics`] implements it with greedy word wrapping over
//! Unicode display widths, which is exact for terminal cells and a stable
//! approximation for proportional fonts.

use super::geometry::Size;
use crate::model::StyledText;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Measures styled text.
///
/// Implementations must be pure: identical inputs give identical sizes.
/// `Send + Sync` so rows can be measured from several threads at once.
pub trait TextMetrics: Send + Sync {
    /// Rendered size of `text` wrapped at `max_width`.
    ///
    /// With `max_height`, only whole lines that fit are counted.
    fn measure(&self, text: &StyledText, max_width: f64, max_height: Option<f64>) -> Size;
}

/// Word-wrapping measurement over fixed advance widths.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMetrics;

impl MonospaceMetrics {
    pub fn new() -> Self {
        Self
    }
}

/// Number of whole columns of `char_width` that fit in `max_width`.
///
/// Never less than one so every character lands somewhere.
pub fn columns_for(max_width: f64, char_width: f64) -> usize {
    if !max_width.is_finite() {
        return usize::MAX;
    }
    if char_width <= 0.0 {
        return usize::MAX;
    }
    // Tolerate float noise at exact multiples.
    ((max_width / char_width) + 1e-9).floor().max(1.0) as usize
}

/// Number of whole lines of `line_height` that fit in `max_height`.
pub fn lines_for(max_height: f64, line_height: f64) -> usize {
    if line_height <= 0.0 {
        return usize::MAX;
    }
    ((max_height / line_height) + 1e-9).floor().max(0.0) as usize
}

/// Greedy word wrap at `columns` display columns.
///
/// Explicit newlines start new lines; empty paragraphs produce empty
/// lines. Words wider than a line are broken by character.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);

            if word_width > columns {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                for ch in word.chars() {
                    let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                    if current_width + ch_width > columns && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += ch_width;
                }
            } else if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + 1 + word_width <= columns {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_width;
            }
        }

        lines.push(current);
    }

    lines
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &StyledText, max_width: f64, max_height: Option<f64>) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }

        let font = text.style().font;
        let columns = columns_for(max_width, font.char_width);
        let mut lines = wrap_text(text.text(), columns);

        if let Some(max_height) = max_height {
            lines.truncate(lines_for(max_height, font.line_height));
        }

        let widest = lines
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_str()))
            .max()
            .unwrap_or(0);

        Size::new(
            widest as f64 * font.char_width,
            lines.len() as f64 * font.line_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontMetrics, TextRole, TextStyle};

    fn styled(text: &str, font: FontMetrics) -> StyledText {
        StyledText::new(
            text,
            TextStyle {
                role: TextRole::Body,
                font,
            },
        )
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        let lines = wrap_text("the quick brown fox", 10);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn wrap_keeps_explicit_newlines() {
        let lines = wrap_text("one\n\ntwo", 10);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn wrap_hard_breaks_long_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_counts_wide_characters_as_two_columns() {
        let lines = wrap_text("日本語", 4);
        assert_eq!(lines, vec!["日本", "語"]);
    }

    #[test]
    fn wrap_places_wide_char_even_in_one_column() {
        let lines = wrap_text("日本", 1);
        assert_eq!(lines, vec!["日", "本"]);
    }

    #[test]
    fn measure_empty_is_zero() {
        let size = MonospaceMetrics.measure(&styled("", FontMetrics::CELL), 10.0, None);
        assert_eq!(size, Size::ZERO);
    }

    #[test]
    fn measure_scales_by_font() {
        let font = FontMetrics::new(8.0, 19.0);
        let size = MonospaceMetrics.measure(&styled("hello world", font), 80.0, None);
        // 10 columns: "hello" / "world"
        assert_eq!(size, Size::new(40.0, 38.0));
    }

    #[test]
    fn measure_caps_to_whole_lines() {
        let text = styled("a b c d e f", FontMetrics::CELL);
        let capped = MonospaceMetrics.measure(&text, 1.0, Some(3.0));
        assert_eq!(capped.height, 3.0);
        let partial = MonospaceMetrics.measure(&text, 1.0, Some(2.5));
        assert_eq!(partial.height, 2.0);
        let unconstrained = MonospaceMetrics.measure(&text, 1.0, None);
        assert_eq!(unconstrained.height, 6.0);
    }

    #[test]
    fn measure_with_infinite_width_is_one_line_per_paragraph() {
        let size = MonospaceMetrics.measure(
            &styled("show more", FontMetrics::CELL),
            f64::INFINITY,
            None,
        );
        assert_eq!(size, Size::new(9.0, 1.0));
    }

    #[test]
    fn columns_tolerate_float_noise() {
        assert_eq!(columns_for(0.3 * 10.0, 0.3), 10);
        assert_eq!(lines_for(19.0 * 3.0, 19.0), 3);
    }
}
