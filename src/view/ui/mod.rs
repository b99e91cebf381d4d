//! UI rendering modules
//!
//! Renderers draw into a ratatui `Frame` and return a layout describing
//! where clickable things ended up, which the app uses for mouse hit
//! testing on the next event.
//! - `browser` - path header, toolbar, listing table and status line
//! - `prompt` - create file/folder dialog
//! - `picker` - destination folder dialog

pub mod browser;
pub mod picker;
pub mod prompt;

pub use browser::{BrowserLayout, BrowserRenderer, StatusLine, ToolbarButton};
pub use picker::{PickerLayout, PickerRenderer};
pub use prompt::{PromptLayout, PromptRenderer};

use ratatui::layout::Rect;

/// Rect of `width` x `height` centred in `area`, clamped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Whether the cell at (`column`, `row`) lies inside `rect`
pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
