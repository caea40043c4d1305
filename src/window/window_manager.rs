use std::collections::BTreeMap;

use crate::actions::UiAction;
use crate::constants::{CASCADE_STEP, CASCADE_WRAP};
use crate::layout::floating::ResizeEdge;
use crate::state::{UiState, UiStore};

use super::geometry::FloatingWindowGeometry;
use super::{FloatRect, Limits, SizeConstraints, stacking};

/// Host input routed to the window manager.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Focus { id: String },
    HeaderPointerDown { id: String, x: f64, y: f64 },
    ResizePointerDown {
        id: String,
        edge: ResizeEdge,
        x: f64,
        y: f64,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    ToggleMinimize { id: String },
    Close { id: String },
}

/// Render-ready view of one floating window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSnapshot {
    pub id: String,
    pub widget: String,
    pub rect: FloatRect,
    pub minimized: bool,
    pub z_index: i32,
}

#[derive(Debug, Clone)]
struct ManagedWindow {
    widget: String,
    geometry: FloatingWindowGeometry,
}

/// Ties the UI store to per-window geometry.
///
/// Focus goes through the store's recency order. Pointer moves only reach
/// a window while it holds the pointer capture, which is taken when a drag
/// or resize starts and released when it stops or the window closes.
#[derive(Debug, Clone)]
pub struct WindowManager {
    store: UiStore,
    windows: BTreeMap<String, ManagedWindow>,
    pointer_capture: Option<String>,
    container: Limits,
    cascade_seq: usize,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl WindowManager {
    pub fn new(container: Limits) -> Self {
        Self::with_store(UiStore::new(), container)
    }

    pub fn with_store(store: UiStore, container: Limits) -> Self {
        Self {
            store,
            windows: BTreeMap::new(),
            pointer_capture: None,
            container,
            cascade_seq: 0,
        }
    }

    pub fn store(&self) -> &UiStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut UiStore {
        &mut self.store
    }

    pub fn state(&self) -> &UiState {
        self.store.current()
    }

    pub fn dispatch(&mut self, action: UiAction) -> bool {
        self.store.dispatch(action)
    }

    pub fn open_widget(&mut self, name: &str) -> bool {
        let changed = self.store.dispatch(UiAction::open(name));
        if changed {
            tracing::debug!(widget = name, "opened widget");
        }
        changed
    }

    /// Mark `name` closed and close every window showing it.
    pub fn close_widget(&mut self, name: &str) -> bool {
        let ids: Vec<String> = self
            .windows
            .iter()
            .filter(|(_, window)| window.widget == name)
            .map(|(id, _)| id.clone())
            .collect();
        let mut changed = false;
        for id in ids {
            changed |= self.close_window(&id);
        }
        if self.store.dispatch(UiAction::close(name)) {
            tracing::debug!(widget = name, "closed widget");
            changed = true;
        }
        changed
    }

    /// Show `widget` in a floating window `id`, sized from its descriptor.
    /// Without an explicit `origin` the window is cascaded from the
    /// container's top-left. An already-shown id is just focused.
    pub fn show_window(&mut self, id: &str, widget: &str, origin: Option<(f64, f64)>) -> bool {
        if self.windows.contains_key(id) {
            return self.focus_window(id);
        }
        let state = self.store.current();
        let Some(descriptor) = state
            .widget(widget)
            .or_else(|| state.overlay_widget(widget))
            .cloned()
        else {
            tracing::warn!(window_id = id, widget, "cannot show window for unknown widget");
            return false;
        };
        let (x, y) = origin.unwrap_or_else(|| self.next_cascade_origin());
        let geometry = FloatingWindowGeometry::new(
            FloatRect::new(x, y, descriptor.width, descriptor.height),
            self.container,
        )
        .with_constraints(SizeConstraints::for_widget(&descriptor));
        self.insert_window(id, widget, geometry)
    }

    /// Show a window with caller-built geometry (e.g. a sidebar preset).
    pub fn show_window_with(
        &mut self,
        id: &str,
        widget: &str,
        geometry: FloatingWindowGeometry,
    ) -> bool {
        if self.windows.contains_key(id) {
            return self.focus_window(id);
        }
        self.insert_window(id, widget, geometry)
    }

    fn insert_window(&mut self, id: &str, widget: &str, geometry: FloatingWindowGeometry) -> bool {
        tracing::debug!(window_id = id, widget, rect = ?geometry.rect(), "showing window");
        self.windows.insert(
            id.to_owned(),
            ManagedWindow {
                widget: widget.to_owned(),
                geometry,
            },
        );
        self.store.dispatch(UiAction::BringToFront(id.to_owned()));
        true
    }

    pub fn close_window(&mut self, id: &str) -> bool {
        let Some(mut window) = self.windows.remove(id) else {
            return false;
        };
        tracing::debug!(window_id = id, widget = %window.widget, "closing window");
        if self.pointer_capture.as_deref() == Some(id) {
            window.geometry.stop();
            self.pointer_capture = None;
        }
        self.store.dispatch(UiAction::RemoveFromOrder(id.to_owned()));
        true
    }

    pub fn focus_window(&mut self, id: &str) -> bool {
        if !self.windows.contains_key(id) {
            return false;
        }
        if self.store.dispatch(UiAction::BringToFront(id.to_owned())) {
            tracing::trace!(window_id = id, "focused window");
        }
        true
    }

    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Focus { id } => self.focus_window(id),
            WindowEvent::HeaderPointerDown { id, x, y } => {
                if !self.focus_window(id) {
                    return false;
                }
                self.release_capture();
                let started = self
                    .windows
                    .get_mut(id)
                    .is_some_and(|window| window.geometry.start_drag(*x, *y));
                if started {
                    self.pointer_capture = Some(id.clone());
                }
                true
            }
            WindowEvent::ResizePointerDown { id, edge, x, y } => {
                if !self.focus_window(id) {
                    return false;
                }
                self.release_capture();
                let started = self
                    .windows
                    .get_mut(id)
                    .is_some_and(|window| window.geometry.start_resize(*edge, *x, *y));
                if started {
                    self.pointer_capture = Some(id.clone());
                }
                true
            }
            WindowEvent::PointerMove { x, y } => {
                let Some(id) = self.pointer_capture.as_deref() else {
                    return false;
                };
                self.windows
                    .get_mut(id)
                    .is_some_and(|window| window.geometry.pointer_move(*x, *y))
            }
            WindowEvent::PointerUp => self.release_capture(),
            WindowEvent::ToggleMinimize { id } => {
                if self.pointer_capture.as_deref() == Some(id.as_str()) {
                    self.release_capture();
                }
                self.windows
                    .get_mut(id)
                    .is_some_and(|window| window.geometry.toggle())
            }
            WindowEvent::Close { id } => self.close_window(id),
        }
    }

    fn release_capture(&mut self) -> bool {
        let Some(id) = self.pointer_capture.take() else {
            return false;
        };
        self.windows
            .get_mut(&id)
            .is_some_and(|window| window.geometry.stop())
    }

    /// Window currently receiving pointer moves.
    pub fn pointer_capture(&self) -> Option<&str> {
        self.pointer_capture.as_deref()
    }

    pub fn geometry(&self, id: &str) -> Option<&FloatingWindowGeometry> {
        self.windows.get(id).map(|window| &window.geometry)
    }

    pub fn z_index(&self, id: &str) -> i32 {
        self.state().z_index_for(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.windows.contains_key(id)
    }

    /// Shown windows back-to-front; windows never focused paint first.
    pub fn windows(&self) -> Vec<WindowSnapshot> {
        let order = self.state().floating_windows_order();
        let mut unstacked: Vec<&str> = self
            .windows
            .keys()
            .map(String::as_str)
            .filter(|id| !order.iter().any(|entry| entry == id))
            .collect();
        unstacked.extend(stacking::paint_order(order).filter(|id| self.windows.contains_key(*id)));
        unstacked
            .into_iter()
            .filter_map(|id| self.snapshot(id))
            .collect()
    }

    pub fn snapshot(&self, id: &str) -> Option<WindowSnapshot> {
        let window = self.windows.get(id)?;
        Some(WindowSnapshot {
            id: id.to_owned(),
            widget: window.widget.clone(),
            rect: window.geometry.rect(),
            minimized: window.geometry.is_minimized(),
            z_index: self.z_index(id),
        })
    }

    pub fn container(&self) -> Limits {
        self.container
    }

    pub fn set_container_limits(&mut self, limits: Limits) {
        self.container = limits;
        for window in self.windows.values_mut() {
            window.geometry.set_limits(limits);
        }
    }

    fn next_cascade_origin(&mut self) -> (f64, f64) {
        let step = (self.cascade_seq % CASCADE_WRAP) as f64 * CASCADE_STEP;
        self.cascade_seq = self.cascade_seq.wrapping_add(1);
        let left = if self.container.left.is_finite() {
            self.container.left
        } else {
            0.0
        };
        let top = if self.container.top.is_finite() {
            self.container.top
        } else {
            0.0
        };
        (left + step, top + step)
    }
}
