//! Shared crate-wide constants.

/// Paint order assigned to the most recently focused floating window.
///
/// Each step down the recency list subtracts one, so the value only has to
/// exceed any plausible stack depth. Windows that were never focused paint
/// at `0`.
pub const Z_INDEX_BASE: i32 = 1000;

/// Height (in pixels) a floating window collapses to when minimized. Large
/// enough to keep the header and its restore button visible.
pub const MINIMIZED_HEIGHT: f64 = 40.0;

/// Lower width bound for the resizable sidebar variant.
pub const SIDEBAR_MIN_WIDTH: f64 = 385.0;

/// Upper width bound for the resizable sidebar variant.
pub const SIDEBAR_MAX_WIDTH: f64 = 800.0;

/// Smallest width a generic floating window can be resized down to.
pub const FLOATING_MIN_WIDTH: f64 = 120.0;

/// Smallest height a generic floating window can be resized down to.
pub const FLOATING_MIN_HEIGHT: f64 = MINIMIZED_HEIGHT;

/// Offset (in pixels, both axes) between successive cascaded windows when the
/// host does not supply an explicit origin.
pub const CASCADE_STEP: f64 = 24.0;

/// Number of cascade steps before placement wraps back to the container
/// origin.
pub const CASCADE_WRAP: usize = 10;
