//! UI state store: widget open flags, the single-render target, overlay
//! widgets and the floating-window recency order.
//!
//! Every transition takes a snapshot by reference and returns a new one.
//! Descriptors are shared behind `Arc`, so entries a transition does not
//! touch keep their identity across snapshots.

use std::sync::Arc;

use crate::actions::UiAction;
use crate::registry::WidgetDescriptor;
use crate::window::stacking;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    widgets: Vec<Arc<WidgetDescriptor>>,
    overlay_widgets: Vec<Arc<WidgetDescriptor>>,
    single_render_name: Option<String>,
    floating_windows_order: Vec<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_initial_widgets(&self, list: Vec<WidgetDescriptor>) -> Self {
        Self {
            widgets: list.into_iter().map(Arc::new).collect(),
            ..self.clone()
        }
    }

    /// Unknown names and already-matching flags leave the snapshot as is.
    pub fn set_widget_open(&self, name: &str, open: bool) -> Self {
        match with_open_flag(&self.widgets, name, open) {
            Some(widgets) => Self {
                widgets,
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    /// Stored verbatim; a name with no matching widget reads back as no
    /// selection from [`UiState::single_render_widget`].
    pub fn set_single_render(&self, name: Option<String>) -> Self {
        Self {
            single_render_name: name,
            ..self.clone()
        }
    }

    pub fn set_overlay_widgets(&self, list: Vec<WidgetDescriptor>) -> Self {
        Self {
            overlay_widgets: list.into_iter().map(Arc::new).collect(),
            ..self.clone()
        }
    }

    pub fn set_overlay_open(&self, name: &str, open: bool) -> Self {
        match with_open_flag(&self.overlay_widgets, name, open) {
            Some(overlay_widgets) => Self {
                overlay_widgets,
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    pub fn bring_to_front(&self, id: &str) -> Self {
        Self {
            floating_windows_order: stacking::bring_to_front(&self.floating_windows_order, id),
            ..self.clone()
        }
    }

    pub fn remove_from_order(&self, id: &str) -> Self {
        Self {
            floating_windows_order: stacking::remove_from_order(&self.floating_windows_order, id),
            ..self.clone()
        }
    }

    // Selectors

    pub fn widgets(&self) -> &[Arc<WidgetDescriptor>] {
        &self.widgets
    }

    pub fn open_widgets(&self) -> impl Iterator<Item = &WidgetDescriptor> {
        self.widgets.iter().map(Arc::as_ref).filter(|w| w.open)
    }

    pub fn widget(&self, name: &str) -> Option<&WidgetDescriptor> {
        find(&self.widgets, name)
    }

    pub fn widget_arc(&self, name: &str) -> Option<&Arc<WidgetDescriptor>> {
        self.widgets.iter().find(|w| w.name == name)
    }

    pub fn is_widget_open(&self, name: &str) -> bool {
        self.widget(name).is_some_and(|w| w.open)
    }

    pub fn open_widget_names(&self) -> Vec<String> {
        self.open_widgets().map(|w| w.name.clone()).collect()
    }

    pub fn single_render_name(&self) -> Option<&str> {
        self.single_render_name.as_deref()
    }

    pub fn single_render_widget(&self) -> Option<&WidgetDescriptor> {
        self.single_render_name().and_then(|name| self.widget(name))
    }

    pub fn overlay_widgets(&self) -> &[Arc<WidgetDescriptor>] {
        &self.overlay_widgets
    }

    pub fn open_overlay_widgets(&self) -> impl Iterator<Item = &WidgetDescriptor> {
        self.overlay_widgets
            .iter()
            .map(Arc::as_ref)
            .filter(|w| w.open)
    }

    pub fn overlay_widget(&self, name: &str) -> Option<&WidgetDescriptor> {
        find(&self.overlay_widgets, name)
    }

    pub fn floating_windows_order(&self) -> &[String] {
        &self.floating_windows_order
    }

    pub fn z_index_for(&self, id: &str) -> i32 {
        stacking::z_index_for(&self.floating_windows_order, id)
    }
}

fn find<'a>(list: &'a [Arc<WidgetDescriptor>], name: &str) -> Option<&'a WidgetDescriptor> {
    list.iter().map(Arc::as_ref).find(|w| w.name == name)
}

/// New list with the `open` flag of `name` replaced, or `None` when no entry
/// would change.
fn with_open_flag(
    list: &[Arc<WidgetDescriptor>],
    name: &str,
    open: bool,
) -> Option<Vec<Arc<WidgetDescriptor>>> {
    let pos = list.iter().position(|w| w.name == name && w.open != open)?;
    let mut next = list.to_vec();
    next[pos] = Arc::new(list[pos].with_open(open));
    Some(next)
}

/// Apply one action to a snapshot.
pub fn reduce(state: &UiState, action: UiAction) -> UiState {
    match action {
        UiAction::SetInitialWidgets(list) => state.set_initial_widgets(list),
        UiAction::SetWidgetOpen { name, open } => state.set_widget_open(&name, open),
        UiAction::SetSingleRender(name) => state.set_single_render(name),
        UiAction::SetOverlayWidgets(list) => state.set_overlay_widgets(list),
        UiAction::SetOverlayOpen { name, open } => state.set_overlay_open(&name, open),
        UiAction::BringToFront(id) => state.bring_to_front(&id),
        UiAction::RemoveFromOrder(id) => state.remove_from_order(&id),
    }
}

/// Owner of the current [`UiState`] snapshot.
///
/// Actions are applied in dispatch order. Readers hold on to the `Arc` they
/// got from [`UiStore::state`]; later dispatches never mutate it.
#[derive(Debug, Clone, Default)]
pub struct UiStore {
    state: Arc<UiState>,
    revision: u64,
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: UiState) -> Self {
        Self {
            state: Arc::new(state),
            revision: 0,
        }
    }

    pub fn state(&self) -> Arc<UiState> {
        Arc::clone(&self.state)
    }

    pub fn current(&self) -> &UiState {
        &self.state
    }

    /// Bumped once per dispatch that changed the snapshot.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply `action`, returning whether the snapshot changed.
    pub fn dispatch(&mut self, action: UiAction) -> bool {
        if let UiAction::SetSingleRender(Some(name)) = &action
            && self.state.widget(name).is_none()
        {
            tracing::warn!(widget = %name, "single-render target is not a known widget");
        }
        tracing::trace!(action = %action, "dispatch");
        let next = reduce(&self.state, action);
        if next == *self.state {
            return false;
        }
        self.state = Arc::new(next);
        self.revision = self.revision.wrapping_add(1);
        true
    }
}
