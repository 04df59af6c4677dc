//! [`RowView`] over a ratatui buffer.
//!
//! Row geometry arrives in row-local cell coordinates. The view shifts it
//! by the row's position in the list viewport and clips to the viewport,
//! so partly scrolled rows draw only their visible lines.

use super::styles::RowStyles;
use crate::image::ImageLoader;
use crate::layout::{columns_for, lines_for, wrap_text, Rect};
use crate::model::{RatingGlyph, StyledText};
use crate::row::{ImageSlot, RowView};
use ratatui::buffer::Buffer;
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

const IMAGE_LOADED: &str = "▓";
const IMAGE_PLACEHOLDER: &str = "░";

/// Draws one row into a buffer region.
pub struct BufferRowView<'a> {
    buf: &'a mut Buffer,
    area: ratatui::layout::Rect,
    /// Row top relative to `area.y`; negative when scrolled partly off.
    top: i32,
    styles: &'a RowStyles,
    images: Option<&'a ImageLoader>,
}

impl<'a> BufferRowView<'a> {
    pub fn new(
        buf: &'a mut Buffer,
        area: ratatui::layout::Rect,
        top: i32,
        styles: &'a RowStyles,
    ) -> Self {
        Self {
            buf,
            area,
            top,
            styles,
            images: None,
        }
    }

    /// Resolve image boxes through `images`, starting loads as needed.
    pub fn with_images(mut self, images: &'a ImageLoader) -> Self {
        self.images = Some(images);
        self
    }

    /// Screen row for row-local line `y`, if inside the area.
    fn screen_y(&self, y: i32) -> Option<u16> {
        let y = i32::from(self.area.y) + self.top + y;
        let bottom = i32::from(self.area.y) + i32::from(self.area.height);
        (y >= i32::from(self.area.y) && y < bottom).then(|| y as u16)
    }

    /// Columns available from row-local `x` to the right edge of the area.
    fn span(&self, x: i32, width: i32) -> Option<(u16, usize)> {
        if x < 0 || x >= i32::from(self.area.width) || width <= 0 {
            return None;
        }
        let available = i32::from(self.area.width) - x;
        Some((self.area.x + x as u16, width.min(available) as usize))
    }

    fn put(&mut self, x: i32, y: i32, text: &str, width: i32, style: Style) {
        let (Some(screen_y), Some((screen_x, max_width))) = (self.screen_y(y), self.span(x, width))
        else {
            return;
        };
        self.buf.set_stringn(screen_x, screen_y, text, max_width, style);
    }

    fn fill(&mut self, rect: Rect, symbol: &str, style: Style) {
        let (x, y) = (rect.min_x() as i32, rect.min_y() as i32);
        let (width, height) = (rect.width() as i32, rect.height() as i32);
        let line = symbol.repeat(width.max(0) as usize);
        for dy in 0..height {
            self.put(x, y + dy, &line, width, style);
        }
    }
}

impl RowView for BufferRowView<'_> {
    fn draw_text(&mut self, rect: Rect, text: &StyledText, max_lines: Option<u32>) {
        let font = text.style().font;
        let columns = columns_for(rect.width(), font.char_width);
        let mut lines = wrap_text(text.text(), columns);
        lines.truncate(lines_for(rect.height(), font.line_height));
        if let Some(max_lines) = max_lines {
            lines.truncate(max_lines as usize);
        }

        let style = self.styles.text(text.role());
        let (x, y) = (rect.min_x() as i32, rect.min_y() as i32);
        for (dy, line) in lines.iter().enumerate() {
            let width = UnicodeWidthStr::width(line.as_str()) as i32;
            self.put(x, y + dy as i32, line, width, style);
        }
    }

    fn draw_rating(&mut self, rect: Rect, glyph: &RatingGlyph) {
        let stars = glyph.drawable.to_text();
        let width = UnicodeWidthStr::width(stars.as_str()) as i32;
        let style = self.styles.rating();
        self.put(rect.min_x() as i32, rect.min_y() as i32, &stars, width, style);
    }

    fn draw_image(&mut self, rect: Rect, url: Option<&str>, slot: ImageSlot) {
        let loaded = match (self.images, url) {
            (Some(images), Some(url)) => {
                let cached = images.cached(url).is_some();
                if !cached {
                    images.prefetch(url);
                }
                cached
            }
            _ => false,
        };
        let symbol = if loaded { IMAGE_LOADED } else { IMAGE_PLACEHOLDER };
        let style = self.styles.image(slot, loaded);
        self.fill(rect, symbol, style);
    }

    fn draw_show_more(&mut self, rect: Rect, text: &StyledText) {
        self.draw_text(rect, text, Some(1));
    }
}
