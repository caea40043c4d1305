use std::fmt;

use crate::registry::WidgetDescriptor;

/// Discrete state-transition request accepted by [`crate::state::UiStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SetInitialWidgets(Vec<WidgetDescriptor>),
    SetWidgetOpen { name: String, open: bool },
    SetSingleRender(Option<String>),
    // Overlay widgets
    SetOverlayWidgets(Vec<WidgetDescriptor>),
    SetOverlayOpen { name: String, open: bool },
    // Floating window stacking
    BringToFront(String),
    RemoveFromOrder(String),
}

impl UiAction {
    pub fn open(name: impl Into<String>) -> Self {
        UiAction::SetWidgetOpen {
            name: name.into(),
            open: true,
        }
    }

    pub fn close(name: impl Into<String>) -> Self {
        UiAction::SetWidgetOpen {
            name: name.into(),
            open: false,
        }
    }
}

impl fmt::Display for UiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiAction::SetInitialWidgets(list) => write!(f, "Set initial widgets ({})", list.len()),
            UiAction::SetWidgetOpen { name, open: true } => write!(f, "Open widget {name}"),
            UiAction::SetWidgetOpen { name, open: false } => write!(f, "Close widget {name}"),
            UiAction::SetSingleRender(Some(name)) => write!(f, "Single-render {name}"),
            UiAction::SetSingleRender(None) => write!(f, "Clear single-render"),
            UiAction::SetOverlayWidgets(list) => write!(f, "Set overlay widgets ({})", list.len()),
            UiAction::SetOverlayOpen { name, open: true } => write!(f, "Open overlay {name}"),
            UiAction::SetOverlayOpen { name, open: false } => write!(f, "Close overlay {name}"),
            UiAction::BringToFront(id) => write!(f, "Bring {id} to front"),
            UiAction::RemoveFromOrder(id) => write!(f, "Unstack {id}"),
        }
    }
}
