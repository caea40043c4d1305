//! Widget orchestration and floating-window stacking for map viewer shells.
//!
//! The host page owns rendering; this crate owns the state behind it:
//! which widgets are open, how their UI modules are lazily resolved, the
//! paint order and geometry of floating windows, and the map-view
//! back/forward history.

pub mod actions;
pub mod constants;
pub mod history;
pub mod layout;
pub mod log_buffer;
pub mod registry;
pub mod session;
pub mod state;
pub mod tracing_sub;
pub mod window;
