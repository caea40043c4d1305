pub mod floating;

pub use floating::{ResizeEdge, apply_resize_drag};
