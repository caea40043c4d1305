//! Per-window geometry and the drag/resize/minimize state machine.
//!
//! `Gesture` is `Idle`, `Dragging` or `Resizing`; minimized/expanded is an
//! orthogonal flag. Positions are clamped into [`Limits`] on every pointer
//! move, and pointer input only has an effect while a gesture is active.

use crate::constants::MINIMIZED_HEIGHT;
use crate::layout::floating::{ResizeEdge, apply_resize_drag};

use super::{FloatRect, Limits, SizeConstraints};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// `start_x`/`start_y` are the pointer's offset from the window origin.
    Dragging { start_x: f64, start_y: f64 },
    /// `start_x`/`start_y` are the pointer position when the gesture began.
    Resizing {
        edge: ResizeEdge,
        start_x: f64,
        start_y: f64,
        start_rect: FloatRect,
    },
}

/// Per-window affordances. Gestures on a disabled affordance are inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCapabilities {
    pub enable_drag: bool,
    pub enable_resize: bool,
}

impl Default for WindowCapabilities {
    fn default() -> Self {
        Self {
            enable_drag: true,
            enable_resize: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingWindowGeometry {
    rect: FloatRect,
    minimized: bool,
    original_height: Option<f64>,
    gesture: Gesture,
    limits: Limits,
    constraints: SizeConstraints,
    capabilities: WindowCapabilities,
}

impl FloatingWindowGeometry {
    pub fn new(rect: FloatRect, limits: Limits) -> Self {
        let mut geometry = Self {
            rect,
            minimized: false,
            original_height: None,
            gesture: Gesture::Idle,
            limits,
            constraints: SizeConstraints::default(),
            capabilities: WindowCapabilities::default(),
        };
        geometry.clamp_origin();
        geometry
    }

    pub fn with_capabilities(mut self, capabilities: WindowCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_constraints(mut self, constraints: SizeConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn rect(&self) -> FloatRect {
        self.rect
    }

    pub fn x(&self) -> f64 {
        self.rect.x
    }

    pub fn y(&self) -> f64 {
        self.rect.y
    }

    pub fn width(&self) -> f64 {
        self.rect.width
    }

    pub fn height(&self) -> f64 {
        self.rect.height
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Height restored by [`FloatingWindowGeometry::toggle_maximize`].
    pub fn original_height(&self) -> Option<f64> {
        self.original_height
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture, Gesture::Resizing { .. })
    }

    pub fn drag_start(&self) -> Option<(f64, f64)> {
        match self.gesture {
            Gesture::Dragging { start_x, start_y } => Some((start_x, start_y)),
            _ => None,
        }
    }

    pub fn resize_start(&self) -> Option<(f64, f64)> {
        match self.gesture {
            Gesture::Resizing {
                start_x, start_y, ..
            } => Some((start_x, start_y)),
            _ => None,
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn capabilities(&self) -> WindowCapabilities {
        self.capabilities
    }

    pub fn constraints(&self) -> SizeConstraints {
        self.constraints
    }

    /// Replace the clamp rectangle (host container resized) and pull the
    /// window back inside it.
    pub fn set_limits(&mut self, limits: Limits) {
        self.limits = limits;
        self.clamp_origin();
    }

    pub fn start_drag(&mut self, pointer_x: f64, pointer_y: f64) -> bool {
        if !self.capabilities.enable_drag || self.gesture != Gesture::Idle {
            return false;
        }
        self.gesture = Gesture::Dragging {
            start_x: pointer_x - self.rect.x,
            start_y: pointer_y - self.rect.y,
        };
        tracing::trace!(x = self.rect.x, y = self.rect.y, "drag started");
        true
    }

    pub fn start_resize(&mut self, edge: ResizeEdge, pointer_x: f64, pointer_y: f64) -> bool {
        if !self.capabilities.enable_resize || self.minimized || self.gesture != Gesture::Idle {
            return false;
        }
        self.gesture = Gesture::Resizing {
            edge,
            start_x: pointer_x,
            start_y: pointer_y,
            start_rect: self.rect,
        };
        tracing::trace!(?edge, "resize started");
        true
    }

    /// Apply a pointer position to the active gesture. Returns whether the
    /// geometry changed.
    pub fn pointer_move(&mut self, pointer_x: f64, pointer_y: f64) -> bool {
        let before = self.rect;
        match self.gesture {
            Gesture::Idle => return false,
            Gesture::Dragging { start_x, start_y } => {
                self.rect.x = self.limits.clamp_x(pointer_x - start_x, self.rect.width);
                self.rect.y = self.limits.clamp_y(pointer_y - start_y, self.rect.height);
            }
            Gesture::Resizing {
                edge,
                start_x,
                start_y,
                start_rect,
            } => {
                self.rect = apply_resize_drag(
                    start_rect,
                    edge,
                    pointer_x - start_x,
                    pointer_y - start_y,
                    &self.constraints,
                    &self.limits,
                );
            }
        }
        self.rect != before
    }

    /// End the active gesture, keeping the last computed geometry. Returns
    /// whether a gesture was active.
    pub fn stop(&mut self) -> bool {
        if self.gesture == Gesture::Idle {
            return false;
        }
        self.gesture = Gesture::Idle;
        tracing::trace!(x = self.rect.x, y = self.rect.y, "gesture stopped");
        true
    }

    /// Collapse to header height. No-op when already minimized.
    pub fn toggle_minimize(&mut self) -> bool {
        if self.minimized {
            return false;
        }
        if self.is_resizing() {
            self.gesture = Gesture::Idle;
        }
        self.original_height = Some(self.rect.height);
        self.rect.height = MINIMIZED_HEIGHT;
        self.minimized = true;
        true
    }

    /// Restore the pre-minimize height. No-op when not minimized.
    pub fn toggle_maximize(&mut self) -> bool {
        if !self.minimized {
            return false;
        }
        let height = self.original_height.take().unwrap_or(self.rect.height);
        self.rect.height = height;
        self.minimized = false;
        if self.rect.y + height > self.limits.bottom {
            self.rect.y = (self.limits.bottom - height).max(self.limits.top);
        }
        true
    }

    pub fn toggle(&mut self) -> bool {
        if self.minimized {
            self.toggle_maximize()
        } else {
            self.toggle_minimize()
        }
    }

    fn clamp_origin(&mut self) {
        self.rect.x = self.limits.clamp_x(self.rect.x, self.rect.width);
        self.rect.y = self.limits.clamp_y(self.rect.y, self.rect.height);
    }
}
