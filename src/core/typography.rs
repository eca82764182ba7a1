/// Base font size for containers at most this wide.
pub const SMALL_CONTAINER_MAX_WIDTH: f64 = 400.0;
/// Containers at least this wide use the large base font size.
pub const LARGE_CONTAINER_MIN_WIDTH: f64 = 1080.0;

pub const SMALL_BASE_FONT_SIZE: f64 = 14.0;
pub const MEDIUM_BASE_FONT_SIZE: f64 = 16.0;
pub const LARGE_BASE_FONT_SIZE: f64 = 18.0;

/// Maps a container width onto one of three base font sizes.
///
/// `(-inf, 400]` → 14, `(400, 1080)` → 16, `[1080, inf)` → 18.
#[must_use]
pub fn base_font_size_for_width(width: f64) -> f64 {
    if width <= SMALL_CONTAINER_MAX_WIDTH {
        SMALL_BASE_FONT_SIZE
    } else if width < LARGE_CONTAINER_MIN_WIDTH {
        MEDIUM_BASE_FONT_SIZE
    } else {
        LARGE_BASE_FONT_SIZE
    }
}
