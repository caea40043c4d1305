use crate::window::{FloatRect, Limits, SizeConstraints};

/// Which side (or corner) of a window a resize gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

/// Rect produced by dragging `edge` of `start` by `(dx, dy)`.
///
/// Width and height are held to `constraints`; the grabbed edge never
/// crosses `limits`. Left/top edges keep the opposite edge fixed, so the
/// origin moves by whatever the size actually changed. When the minimum size
/// does not fit between the fixed edge and the limit, the origin stays on the
/// limit and the fixed edge gives way instead.
pub fn apply_resize_drag(
    start: FloatRect,
    edge: ResizeEdge,
    dx: f64,
    dy: f64,
    constraints: &SizeConstraints,
    limits: &Limits,
) -> FloatRect {
    let mut x = start.x;
    let mut y = start.y;
    let mut width = start.width;
    let mut height = start.height;

    if edge.moves_right() {
        let max = constraints.max_width.min(limits.right - start.x);
        width = clamp_size(start.width + dx, constraints.min_width, max);
    } else if edge.moves_left() {
        let right = start.right();
        let max = constraints.max_width.min(right - limits.left);
        width = clamp_size(start.width - dx, constraints.min_width, max);
        x = (right - width).max(limits.left);
    }

    if edge.moves_bottom() {
        let max = constraints.max_height.min(limits.bottom - start.y);
        height = clamp_size(start.height + dy, constraints.min_height, max);
    } else if edge.moves_top() {
        let bottom = start.bottom();
        let max = constraints.max_height.min(bottom - limits.top);
        height = clamp_size(start.height - dy, constraints.min_height, max);
        y = (bottom - height).max(limits.top);
    }

    FloatRect::new(x, y, width, height)
}

// Minimum wins over a limit-derived maximum that would collapse the window.
fn clamp_size(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min).max(0.0)
}
