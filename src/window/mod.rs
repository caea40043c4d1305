pub mod geometry;
pub mod stacking;

mod window_manager;

use crate::constants::{
    FLOATING_MIN_HEIGHT, FLOATING_MIN_WIDTH, SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH,
};
use crate::registry::WidgetDescriptor;

pub use geometry::{FloatingWindowGeometry, Gesture, WindowCapabilities};
pub use window_manager::{WindowEvent, WindowManager, WindowSnapshot};

/// Window origin and size in host-container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FloatRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Rectangle a window's origin is clamped into while dragging. Any edge may
/// be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            right: f64::INFINITY,
            bottom: f64::INFINITY,
        }
    }
}

impl Limits {
    pub fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Limits covering a `width` x `height` container anchored at the origin.
    pub fn container(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn unbounded() -> Self {
        Self::new(
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::INFINITY,
        )
    }

    pub fn clamp_x(&self, x: f64, width: f64) -> f64 {
        clamp_axis(x, self.left, self.right - width)
    }

    pub fn clamp_y(&self, y: f64, height: f64) -> f64 {
        clamp_axis(y, self.top, self.bottom - height)
    }
}

/// Clamp with the lower bound winning when the range is inverted (window
/// larger than the limits), keeping the header reachable.
pub(crate) fn clamp_axis(value: f64, low: f64, high: f64) -> f64 {
    value.min(high).max(low)
}

/// Inclusive size bounds applied while resizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeConstraints {
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl Default for SizeConstraints {
    fn default() -> Self {
        Self {
            min_width: FLOATING_MIN_WIDTH,
            max_width: f64::INFINITY,
            min_height: FLOATING_MIN_HEIGHT,
            max_height: f64::INFINITY,
        }
    }
}

impl SizeConstraints {
    /// Generic floating window: no bound beyond the widget's configured max.
    pub fn for_widget(descriptor: &WidgetDescriptor) -> Self {
        Self {
            max_width: descriptor.max_width.unwrap_or(f64::INFINITY),
            max_height: descriptor.max_height.unwrap_or(f64::INFINITY),
            ..Self::default()
        }
    }

    /// Fixed-width-range sidebar.
    pub fn sidebar() -> Self {
        Self {
            min_width: SIDEBAR_MIN_WIDTH,
            max_width: SIDEBAR_MAX_WIDTH,
            ..Self::default()
        }
    }

    pub fn clamp_width(&self, width: f64) -> f64 {
        clamp_axis(width, self.min_width, self.max_width)
    }

    pub fn clamp_height(&self, height: f64) -> f64 {
        clamp_axis(height, self.min_height, self.max_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_clamp_inside_and_outside() {
        let limits = Limits::container(400.0, 400.0);
        assert_eq!(limits.clamp_x(50.0, 300.0), 50.0);
        assert_eq!(limits.clamp_x(950.0, 300.0), 100.0);
        assert_eq!(limits.clamp_y(-20.0, 200.0), 0.0);
    }

    #[test]
    fn oversized_window_pins_to_the_top_left_limit() {
        let limits = Limits::container(200.0, 100.0);
        assert_eq!(limits.clamp_x(30.0, 500.0), 0.0);
        assert_eq!(limits.clamp_y(30.0, 500.0), 0.0);
    }

    #[test]
    fn infinite_limits_leave_positions_alone() {
        let limits = Limits::unbounded();
        assert_eq!(limits.clamp_x(-5000.0, 300.0), -5000.0);
        assert_eq!(Limits::default().clamp_y(1.0e6, 300.0), 1.0e6);
    }

    #[test]
    fn sidebar_width_range() {
        let sidebar = SizeConstraints::sidebar();
        assert_eq!(sidebar.clamp_width(100.0), 385.0);
        assert_eq!(sidebar.clamp_width(1200.0), 800.0);
        assert_eq!(sidebar.clamp_width(500.0), 500.0);
    }

    #[test]
    fn widget_constraints_use_descriptor_max() {
        let descriptor = WidgetDescriptor::new("Buffer", "Buffer", 300.0, 200.0)
            .with_max_size(Some(450.0), None);
        let constraints = SizeConstraints::for_widget(&descriptor);
        assert_eq!(constraints.clamp_width(900.0), 450.0);
        assert_eq!(constraints.clamp_height(900.0), 900.0);
    }
}
