//! When to ask for the next page.

/// Screens of remaining content below which the next page is requested.
pub const DEFAULT_THRESHOLD_SCREENS: f64 = 2.5;

/// Whether the caller should request the next page.
///
/// True iff the content still below the viewport once scrolling settles at
/// `target_offset` is at most `threshold_screens` viewports tall.
pub fn should_load_next_page(
    viewport_height: f64,
    content_height: f64,
    target_offset: f64,
    threshold_screens: f64,
) -> bool {
    let remaining = content_height - viewport_height - target_offset;
    let trigger = viewport_height * threshold_screens;
    remaining <= trigger
}
