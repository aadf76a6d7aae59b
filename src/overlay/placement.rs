use ratatui::layout::{Rect, Size};

/// Places a widget of `size` next to `anchor`, kept inside `viewport`.
///
/// The widget goes below the anchor and flips above it when it would overflow
/// the bottom edge and there is room above. Horizontally it starts at the
/// anchor's leading edge (the right edge for RTL blocks) and is shifted back
/// into the viewport when it would overflow.
pub fn position_with_anchor(viewport: Rect, anchor: Rect, size: Size, rtl: bool) -> Rect {
    let width = size.width.min(viewport.width);
    let height = size.height.min(viewport.height);
    let x = horizontal_start(viewport, anchor, width, rtl);
    let y = vertical_start(viewport, anchor, height);
    Rect::new(x, y, width, height)
}

fn horizontal_start(viewport: Rect, anchor: Rect, width: u16, rtl: bool) -> u16 {
    let preferred = if rtl {
        anchor.right().saturating_sub(width)
    } else {
        anchor.left()
    };
    let max_start = viewport.right().saturating_sub(width);
    preferred.min(max_start).max(viewport.left())
}

fn vertical_start(viewport: Rect, anchor: Rect, height: u16) -> u16 {
    let below = anchor.bottom();
    if below.saturating_add(height) <= viewport.bottom() {
        return below;
    }
    let room_above = anchor.top().saturating_sub(viewport.top());
    if room_above >= height {
        return anchor.top() - height;
    }
    viewport
        .bottom()
        .saturating_sub(height)
        .max(viewport.top())
}
