use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::OnceCell;

use super::{LoadError, WidgetRegistry};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("widget `{0}` is not registered")]
    NotFound(String),
    #[error("widget `{name}` failed to load: {source}")]
    LoadFailure {
        name: String,
        #[source]
        source: LoadError,
    },
}

impl ResolveError {
    pub fn widget_name(&self) -> &str {
        match self {
            ResolveError::NotFound(name) | ResolveError::LoadFailure { name, .. } => name,
        }
    }
}

type ModuleSlot<M> = Arc<OnceCell<Arc<M>>>;

/// Resolves widget names to their UI modules, invoking each loader at most
/// once per successful load.
///
/// Concurrent resolves of the same name share one slot: the first caller
/// runs the loader and the others wait on it. A failed load leaves the slot
/// empty, so the next resolve retries the loader.
///
/// Loads run on a spawned tokio task, so dropping a pending `resolve` does
/// not cancel the load; it still fills the cache for later callers. Resolving
/// therefore requires a tokio runtime.
pub struct WidgetResolver<M> {
    registry: Arc<WidgetRegistry<M>>,
    modules: Mutex<HashMap<String, ModuleSlot<M>>>,
}

impl<M> WidgetResolver<M>
where
    M: Send + Sync + 'static,
{
    pub fn new(registry: Arc<WidgetRegistry<M>>) -> Self {
        Self {
            registry,
            modules: Mutex::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &WidgetRegistry<M> {
        &self.registry
    }

    pub async fn resolve(&self, name: &str) -> Result<Arc<M>, ResolveError> {
        let Some(loader) = self.registry.loader(name) else {
            tracing::warn!(widget = name, "resolve requested for unknown widget");
            return Err(ResolveError::NotFound(name.to_owned()));
        };
        let slot = self.slot(name);
        if let Some(module) = slot.get() {
            return Ok(Arc::clone(module));
        }

        let widget = name.to_owned();
        let task = tokio::spawn(async move {
            let module = slot
                .get_or_try_init(|| async {
                    tracing::debug!(widget = %widget, "loading widget module");
                    match loader.load().await {
                        Ok(module) => Ok(Arc::new(module)),
                        Err(source) => {
                            tracing::warn!(widget = %widget, error = %source, "widget module failed to load");
                            Err(ResolveError::LoadFailure {
                                name: widget.clone(),
                                source,
                            })
                        }
                    }
                })
                .await?;
            Ok::<_, ResolveError>(Arc::clone(module))
        });

        match task.await {
            Ok(result) => result,
            Err(join_err) => {
                tracing::error!(widget = name, error = %join_err, "widget load task did not finish");
                Err(ResolveError::LoadFailure {
                    name: name.to_owned(),
                    source: Box::new(join_err),
                })
            }
        }
    }

    /// Already-loaded module for `name`, without starting a load.
    pub fn cached(&self, name: &str) -> Option<Arc<M>> {
        let modules = self.modules.lock().unwrap_or_else(|err| err.into_inner());
        modules.get(name).and_then(|slot| slot.get().cloned())
    }

    pub fn is_resolved(&self, name: &str) -> bool {
        self.cached(name).is_some()
    }

    fn slot(&self, name: &str) -> ModuleSlot<M> {
        let mut modules = self.modules.lock().unwrap_or_else(|err| err.into_inner());
        Arc::clone(modules.entry(name.to_owned()).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{LoadError, WidgetDescriptor};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    struct Module(&'static str);

    fn counting_registry(calls: Arc<AtomicUsize>) -> Arc<WidgetRegistry<Module>> {
        counting_registry_with_delay(calls, Duration::from_millis(10))
    }

    fn counting_registry_with_delay(
        calls: Arc<AtomicUsize>,
        delay: Duration,
    ) -> Arc<WidgetRegistry<Module>> {
        let mut registry = WidgetRegistry::new();
        registry
            .register(
                WidgetDescriptor::new("Buffer", "Buffer", 300.0, 200.0),
                move || {
                    let calls = Arc::clone(&calls);
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(delay).await;
                        Ok::<_, LoadError>(Module("buffer"))
                    }
                },
            )
            .expect("register buffer");
        Arc::new(registry)
    }

    #[tokio::test]
    async fn sequential_resolves_hit_the_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = WidgetResolver::new(counting_registry(Arc::clone(&calls)));

        assert!(resolver.cached("Buffer").is_none());
        let first = resolver.resolve("Buffer").await.expect("first resolve");
        let second = resolver.resolve("Buffer").await.expect("second resolve");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, Module("buffer"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(resolver.is_resolved("Buffer"));
    }

    #[tokio::test]
    async fn concurrent_resolves_share_one_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = WidgetResolver::new(counting_registry(Arc::clone(&calls)));

        let (a, b) = tokio::join!(resolver.resolve("Buffer"), resolver.resolve("Buffer"));
        let (a, b) = (a.expect("a"), b.expect("b"));

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn abandoned_resolve_still_fills_the_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = WidgetResolver::new(counting_registry_with_delay(
            Arc::clone(&calls),
            Duration::from_millis(50),
        ));

        let abandoned =
            tokio::time::timeout(Duration::from_millis(5), resolver.resolve("Buffer")).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(resolver.is_resolved("Buffer"));

        let module = resolver.resolve("Buffer").await.expect("cached resolve");
        assert_eq!(*module, Module("buffer"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_name_is_not_found() {
        let resolver = WidgetResolver::new(counting_registry(Arc::new(AtomicUsize::new(0))));
        let err = resolver.resolve("Identify").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(ref name) if name == "Identify"));
        assert_eq!(err.widget_name(), "Identify");
    }

    #[tokio::test]
    async fn failed_load_is_retried_on_next_resolve() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut registry = WidgetRegistry::new();
        registry
            .register(
                WidgetDescriptor::new("Legend", "Legend", 200.0, 200.0),
                move || {
                    let attempt = counter.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if attempt == 0 {
                            Err::<Module, LoadError>("bundle fetch failed".into())
                        } else {
                            Ok(Module("legend"))
                        }
                    }
                },
            )
            .expect("register legend");
        let resolver = WidgetResolver::new(Arc::new(registry));

        let err = resolver.resolve("Legend").await.unwrap_err();
        assert!(matches!(err, ResolveError::LoadFailure { .. }));
        assert!(!resolver.is_resolved("Legend"));

        let module = resolver.resolve("Legend").await.expect("retry succeeds");
        assert_eq!(*module, Module("legend"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
