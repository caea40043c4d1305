//! Persisted "which widgets were open" snapshot.
//!
//! The host decides where the JSON lives; this module only captures it from
//! a [`UiState`] and replays it into a [`UiStore`] at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actions::UiAction;
use crate::state::{UiState, UiStore};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session snapshot io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(rename = "widgetsActivos", default)]
    pub active_widgets: Vec<String>,
}

impl SessionSnapshot {
    pub fn capture(state: &UiState) -> Self {
        Self {
            active_widgets: state.open_widget_names(),
        }
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Missing file reads as an empty snapshot.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Self::from_json(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, self.to_json()?)?;
        std::fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Issue an open for every recorded name. Names the store does not know
    /// are ignored by the store itself. Returns how many widgets opened.
    pub fn replay(&self, store: &mut UiStore) -> usize {
        let opened = self
            .active_widgets
            .iter()
            .filter(|name| store.dispatch(UiAction::open(name.as_str())))
            .count();
        tracing::debug!(
            recorded = self.active_widgets.len(),
            opened,
            "replayed session snapshot"
        );
        opened
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WidgetDescriptor;

    fn store() -> UiStore {
        let mut store = UiStore::new();
        store.dispatch(UiAction::SetInitialWidgets(vec![
            WidgetDescriptor::new("Buffer", "Buffer", 300.0, 200.0),
            WidgetDescriptor::new("Legend", "Legend", 250.0, 300.0),
        ]));
        store
    }

    #[test]
    fn json_uses_the_host_key() {
        let snapshot = SessionSnapshot {
            active_widgets: vec!["Legend".into()],
        };
        assert_eq!(snapshot.to_json().unwrap(), r#"{"widgetsActivos":["Legend"]}"#);
    }

    #[test]
    fn replay_opens_known_widgets_only() {
        let mut store = store();
        let snapshot = SessionSnapshot::from_json(r#"{"widgetsActivos":["Legend","Identify"]}"#)
            .expect("valid snapshot");
        assert_eq!(snapshot.replay(&mut store), 1);
        assert!(store.current().is_widget_open("Legend"));
        assert_eq!(SessionSnapshot::capture(store.current()), SessionSnapshot {
            active_widgets: vec!["Legend".into()],
        });
    }

    #[test]
    fn save_and_load_through_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session").join("widgets.json");
        let snapshot = SessionSnapshot {
            active_widgets: vec!["Buffer".into(), "Legend".into()],
        };
        snapshot.save(&path).expect("save");
        assert_eq!(SessionSnapshot::load(&path).expect("load"), snapshot);
    }

    #[test]
    fn missing_file_is_an_empty_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = SessionSnapshot::load(dir.path().join("absent.json")).expect("load");
        assert!(loaded.active_widgets.is_empty());
    }
}
