//! Terminal shell (impure).
//!
//! Owns the terminal and the list controller, turns crossterm events into
//! controller calls, and draws visible rows through [`BufferRowView`].

mod row_view;
pub mod styles;

pub use row_view::BufferRowView;
pub use styles::{ColorConfig, RowStyles};

use crate::controller::ListController;
use crate::image::{FileImageSource, ImageLoader};
use crate::layout::{LayoutEngine, LayoutParams, MonospaceMetrics, Point, Size};
use crate::model::{reviews_label, AppError, ReviewStyles};
use crate::pagination::{PaginationStore, ReviewFetcher};
use crate::row::RowBuilder;
use crate::worker::{ThreadWorker, Worker};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Fetch completions and image loads are picked up at this interval.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Lines scrolled per mouse wheel notch.
const WHEEL_LINES: f64 = 3.0;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Knobs the shell passes down to the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub page_size: usize,
    pub prefetch_screens: f64,
    pub truncation_lines: u32,
    pub image_cache_capacity: NonZeroUsize,
    pub colors: ColorConfig,
}

/// Main TUI application
///
/// Generic over backend so tests can drive it with `TestBackend`.
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    list: ListController<MonospaceMetrics>,
    images: ImageLoader,
    styles: RowStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Enter raw mode and the alternate screen, then build the app.
    pub fn new(fetcher: Arc<dyn ReviewFetcher>, options: ViewOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let worker: Arc<dyn Worker> = Arc::new(ThreadWorker::default());
        Self::with_terminal(terminal, fetcher, worker, options)
    }

    /// Run the event loop until the user quits (q, Esc or Ctrl+C).
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.list.start();
        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => continue,
                }
                self.draw()?;
            } else if self.tick() {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the app over an existing terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        fetcher: Arc<dyn ReviewFetcher>,
        worker: Arc<dyn Worker>,
        options: ViewOptions,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let viewport = list_viewport(size.width, size.height);

        let builder = RowBuilder::cells().with_max_lines(options.truncation_lines);
        let store = PaginationStore::new(fetcher, Arc::clone(&worker), builder, options.page_size);
        let engine = LayoutEngine::new(MonospaceMetrics, LayoutParams::cells(), ReviewStyles::cells());
        let list = ListController::new(store, engine, viewport)
            .with_prefetch_screens(options.prefetch_screens);
        let images = ImageLoader::with_capacity(
            Arc::new(FileImageSource),
            worker,
            options.image_cache_capacity,
        );

        Ok(Self {
            terminal,
            list,
            images,
            styles: RowStyles::with_color_config(options.colors),
        })
    }

    pub fn list(&self) -> &ListController<MonospaceMetrics> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<MonospaceMetrics> {
        &mut self.list
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Timer tick. Returns whether a redraw is due.
    pub fn tick(&mut self) -> bool {
        let changed = self.list.poll();
        changed || self.images.in_flight() > 0
    }

    /// Handle a key press. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let page = (self.list.viewport().height - 1.0).max(1.0);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Down | KeyCode::Char('j') => {
                self.list.scroll_by(1.0);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.scroll_by(-1.0);
            }
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.list.scroll_by(page);
            }
            KeyCode::PageUp => {
                self.list.scroll_by(-page);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.list.scroll_to(0.0);
            }
            KeyCode::End | KeyCode::Char('G') => {
                let bottom = self.list.max_scroll();
                self.list.scroll_to(bottom);
            }
            KeyCode::Enter => {
                if let Some(id) = self.list.expand_first_visible() {
                    debug!(%id, "Expanded from keyboard");
                }
            }
            _ => {}
        }
        false
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.list.scroll_by(WHEEL_LINES);
            }
            MouseEventKind::ScrollUp => {
                self.list.scroll_by(-WHEEL_LINES);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let point = Point::new(f64::from(mouse.column), f64::from(mouse.row));
                if let Some(id) = self.list.tap(point) {
                    debug!(%id, "Expanded from click");
                }
            }
            _ => {}
        }
    }

    /// Re-measure for the new terminal size.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        self.list.set_viewport(list_viewport(width, height));
    }

    /// Render the current frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let Self {
            terminal,
            list,
            images,
            styles,
        } = self;
        terminal.draw(|frame| render_frame(frame, list, images, styles))?;
        Ok(())
    }
}

/// List area for a terminal of `width` x `height`: everything above the
/// status line. Zero width falls back to 80 columns.
fn list_viewport(width: u16, height: u16) -> Size {
    let width = if width > 0 { width } else { 80 };
    Size::new(f64::from(width), f64::from(height.saturating_sub(1)))
}

fn render_frame(
    frame: &mut Frame,
    list: &ListController<MonospaceMetrics>,
    images: &ImageLoader,
    styles: &RowStyles,
) {
    let [list_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let width = list.width();
    for visible in list.visible_rows() {
        let Some(row) = list.row(visible.index) else {
            continue;
        };
        let mut view = BufferRowView::new(frame.buffer_mut(), list_area, visible.top as i32, styles)
            .with_images(images);
        row.render(list.engine(), width, &mut view);
    }

    frame.render_widget(
        Paragraph::new(Line::from(status_text(list))).style(styles.status()),
        status_area,
    );
}

fn status_text(list: &ListController<MonospaceMetrics>) -> String {
    let state = list.store().state();
    if state.is_loading() {
        return format!(" Загрузка… {}", state.review_count());
    }
    let loaded = reviews_label(state.review_count());
    if state.has_counter() {
        format!(" {loaded} · q выход · Enter развернуть")
    } else {
        format!(" {loaded} из {} · q выход · Enter развернуть", state.total_count())
    }
}

/// Build the app, run it, and restore the terminal even on error.
///
/// Logging must be initialized by the caller.
pub fn run_with_fetcher(
    fetcher: Arc<dyn ReviewFetcher>,
    options: ViewOptions,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(fetcher, options)?;
    let result = app.run();
    restore_terminal()?;
    result
}

/// Disables raw mode, mouse capture, and leaves the alternate screen.
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
