use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use geoview_wm::registry::{
    LoadError, ResolveError, WidgetDescriptor, WidgetRegistry, WidgetResolver,
};

#[derive(Debug)]
struct BufferPanel;

#[tokio::test]
async fn resolve_invokes_loader_once_per_name() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut registry = WidgetRegistry::new();
    registry
        .register(
            WidgetDescriptor::new("Buffer", "Buffer", 300.0, 200.0),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, LoadError>(BufferPanel) }
            },
        )
        .expect("register");
    let resolver = Arc::new(WidgetResolver::new(Arc::new(registry)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve("Buffer").await })
        })
        .collect();
    for handle in handles {
        handle.await.expect("task").expect("resolves");
    }
    resolver.resolve("Buffer").await.expect("cached");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(
        resolver.resolve("Search").await,
        Err(ResolveError::NotFound(_))
    ));
}
