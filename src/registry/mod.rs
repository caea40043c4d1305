//! Widget catalog and registry.
//!
//! The catalog is the serializable half of a widget definition (title,
//! default geometry, menu grouping). The registry pairs each catalog entry
//! with a loader that produces the widget's UI module on demand. Loaders are
//! never invoked here; see [`resolver::WidgetResolver`].

pub mod resolver;

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use resolver::{ResolveError, WidgetResolver};

/// Opaque failure reported by a widget loader.
pub type LoadError = Box<dyn StdError + Send + Sync>;

/// Boxed future returned by [`WidgetLoader::load`].
pub type LoadFuture<M> = Pin<Box<dyn Future<Output = Result<M, LoadError>> + Send + 'static>>;

/// Deferred factory for a widget's UI module.
///
/// Implemented for any `Fn() -> impl Future<Output = Result<M, LoadError>>`
/// so plain async closures can be registered directly.
pub trait WidgetLoader<M>: Send + Sync {
    fn load(&self) -> LoadFuture<M>;
}

impl<M, F, Fut> WidgetLoader<M> for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<M, LoadError>> + Send + 'static,
{
    fn load(&self) -> LoadFuture<M> {
        Box::pin(self())
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("widget `{0}` is already registered")]
    DuplicateName(String),
    #[error("invalid widget catalog: {0}")]
    Catalog(#[from] serde_json::Error),
    #[error("failed to read widget catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Static description of a widget, as found in the catalog.
///
/// `open` is the only field that changes at runtime, and only through
/// [`crate::state::UiState`] transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDescriptor {
    pub name: String,
    pub title: String,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub open: bool,
}

impl WidgetDescriptor {
    pub fn new(name: impl Into<String>, title: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            width,
            height,
            max_width: None,
            max_height: None,
            category: None,
            subcategory: None,
            open: false,
        }
    }

    pub fn with_max_size(mut self, max_width: Option<f64>, max_height: Option<f64>) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    pub fn with_category(
        mut self,
        category: impl Into<String>,
        subcategory: Option<&str>,
    ) -> Self {
        self.category = Some(category.into());
        self.subcategory = subcategory.map(str::to_owned);
        self
    }

    /// Copy of this descriptor with `open` set. Used by store transitions,
    /// which never mutate a shared descriptor in place.
    pub fn with_open(&self, open: bool) -> Self {
        Self {
            open,
            ..self.clone()
        }
    }
}

/// Serialized widget configuration for one deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetCatalog {
    #[serde(default)]
    pub widgets: Vec<WidgetDescriptor>,
    #[serde(default)]
    pub overlay_widgets: Vec<WidgetDescriptor>,
}

impl WidgetCatalog {
    pub fn from_json(text: &str) -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

struct RegistryEntry<M> {
    descriptor: WidgetDescriptor,
    loader: Arc<dyn WidgetLoader<M>>,
}

/// Name-keyed lookup of widget descriptors and their loaders.
pub struct WidgetRegistry<M> {
    entries: BTreeMap<String, RegistryEntry<M>>,
}

impl<M> Default for WidgetRegistry<M> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<M> fmt::Debug for WidgetRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<M> WidgetRegistry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<L>(&mut self, descriptor: WidgetDescriptor, loader: L) -> Result<(), RegistryError>
    where
        L: WidgetLoader<M> + 'static,
    {
        self.register_shared(descriptor, Arc::new(loader))
    }

    pub fn register_shared(
        &mut self,
        descriptor: WidgetDescriptor,
        loader: Arc<dyn WidgetLoader<M>>,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateName(descriptor.name));
        }
        tracing::trace!(widget = %descriptor.name, "registered widget");
        self.entries.insert(
            descriptor.name.clone(),
            RegistryEntry { descriptor, loader },
        );
        Ok(())
    }

    /// Build a registry from a catalog, binding each widget to the loader
    /// returned by `bind`. Widgets without a loader are left out of the
    /// registry.
    ///
    /// Loaders are keyed by name only. An overlay widget sharing a name with
    /// a main widget reuses the main widget's entry; a repeated name within
    /// one list is still a [`RegistryError::DuplicateName`].
    pub fn from_catalog<F>(catalog: &WidgetCatalog, mut bind: F) -> Result<Self, RegistryError>
    where
        F: FnMut(&str) -> Option<Arc<dyn WidgetLoader<M>>>,
    {
        let mut registry = Self::new();
        registry.bind_all(&catalog.widgets, &mut bind)?;
        let main_names: Vec<&str> = catalog.widgets.iter().map(|w| w.name.as_str()).collect();
        let overlays: Vec<WidgetDescriptor> = catalog
            .overlay_widgets
            .iter()
            .filter(|descriptor| {
                let shared = main_names.contains(&descriptor.name.as_str());
                if shared {
                    tracing::warn!(
                        widget = %descriptor.name,
                        "overlay widget shares a name with a main widget; reusing its loader"
                    );
                }
                !shared
            })
            .cloned()
            .collect();
        registry.bind_all(&overlays, &mut bind)?;
        Ok(registry)
    }

    fn bind_all<F>(&mut self, descriptors: &[WidgetDescriptor], bind: &mut F) -> Result<(), RegistryError>
    where
        F: FnMut(&str) -> Option<Arc<dyn WidgetLoader<M>>>,
    {
        for descriptor in descriptors {
            let Some(loader) = bind(&descriptor.name) else {
                tracing::warn!(widget = %descriptor.name, "no loader bound; skipping widget");
                continue;
            };
            self.register_shared(descriptor.clone(), loader)?;
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn descriptor(&self, name: &str) -> Option<&WidgetDescriptor> {
        self.entries.get(name).map(|entry| &entry.descriptor)
    }

    /// All registered descriptors in name order, overlay widgets included.
    pub fn descriptors(&self) -> Vec<WidgetDescriptor> {
        self.entries
            .values()
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn loader(&self, name: &str) -> Option<Arc<dyn WidgetLoader<M>>> {
        self.entries.get(name).map(|entry| Arc::clone(&entry.loader))
    }
}
