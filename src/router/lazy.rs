//! Memoized lazy page resolution.
//!
//! Route nodes carry a [`LazyRef`]; the page behind it is produced by an
//! asynchronous factory registered under the same identifier. Each
//! identifier is resolved at most once: the first caller runs the factory,
//! concurrent callers wait for that run, and every later lookup returns the
//! cached outcome, success or failure, without touching the factory again.
//! The cache only grows; it lives as long as the resolver.

use super::route_tree::LazyRef;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

/// Future produced by a page factory.
pub type PageFuture<P> = Pin<Box<dyn Future<Output = Result<P, String>> + Send>>;

/// One-shot asynchronous page constructor.
pub type PageFactory<P> = Arc<dyn Fn() -> PageFuture<P> + Send + Sync>;

/// Why a page could not be resolved. Fatal for the route that needed it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no page registered for '{0}'")]
    UnknownPage(String),

    #[error("page '{identifier}' failed to load: {message}")]
    LoadFailed { identifier: String, message: String },
}

/// Identifier → factory table.
pub struct PageRegistry<P> {
    factories: HashMap<String, PageFactory<P>>,
}

impl<P> Default for PageRegistry<P> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<P> std::fmt::Debug for PageRegistry<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&String> = self.factories.keys().collect();
        ids.sort();
        f.debug_struct("PageRegistry").field("pages", &ids).finish()
    }
}

impl<P: Send + 'static> PageRegistry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an async factory for `identifier` (normalized like [`LazyRef`]).
    /// A second registration for the same identifier replaces the first.
    pub fn register<F, Fut>(&mut self, identifier: &str, factory: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<P, String>> + Send + 'static,
    {
        let key = LazyRef::new(identifier).identifier().to_string();
        let factory: PageFactory<P> = Arc::new(move || -> PageFuture<P> { Box::pin(factory()) });
        if self.factories.insert(key.clone(), factory).is_some() {
            log::warn!("Page factory for '{}' replaced", key);
        }
        self
    }

    /// Register a page that is available immediately.
    pub fn register_ready(&mut self, identifier: &str, page: P) -> &mut Self
    where
        P: Clone + Sync,
    {
        self.register(identifier, move || {
            let page = page.clone();
            async move { Ok(page) }
        })
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.factories
            .contains_key(LazyRef::new(identifier).identifier())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    fn get(&self, identifier: &str) -> Option<PageFactory<P>> {
        self.factories.get(identifier).cloned()
    }
}

type Slot<P> = Arc<OnceCell<Result<Arc<P>, ResolveError>>>;

/// Resolves [`LazyRef`]s through a [`PageRegistry`], memoizing per identifier.
pub struct LazyResolver<P> {
    registry: PageRegistry<P>,
    slots: Mutex<HashMap<String, Slot<P>>>,
}

impl<P> std::fmt::Debug for LazyResolver<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyResolver")
            .field("registry", &self.registry)
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}

impl<P: Send + Sync + 'static> LazyResolver<P> {
    pub fn new(registry: PageRegistry<P>) -> Self {
        Self {
            registry,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, identifier: &str) -> Slot<P> {
        let mut slots = self.slots.lock();
        Arc::clone(
            slots
                .entry(identifier.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new())),
        )
    }

    /// Record identifiers up front. No factory runs; this only reserves
    /// cache slots so [`Self::pending`] can report unresolved pages.
    pub fn register_refs<'r>(&self, refs: impl IntoIterator<Item = &'r LazyRef>) {
        let mut slots = self.slots.lock();
        for lazy in refs {
            slots
                .entry(lazy.identifier().to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()));
        }
    }

    /// Resolve the page behind `lazy`, running its factory at most once.
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnknownPage`] when nothing is registered under the
    /// identifier, [`ResolveError::LoadFailed`] when the factory failed. Both
    /// are cached; there is no automatic retry.
    pub async fn resolve(&self, lazy: &LazyRef) -> Result<Arc<P>, ResolveError> {
        let identifier = lazy.identifier();
        let slot = self.slot(identifier);
        slot.get_or_init(|| async {
            let outcome = match self.registry.get(identifier) {
                None => Err(ResolveError::UnknownPage(identifier.to_string())),
                Some(factory) => {
                    log::debug!("Resolving page '{}'", identifier);
                    factory()
                        .await
                        .map(Arc::new)
                        .map_err(|message| ResolveError::LoadFailed {
                            identifier: identifier.to_string(),
                            message,
                        })
                }
            };
            if let Err(e) = &outcome {
                log::error!("{e}");
            }
            outcome
        })
        .await
        .clone()
    }

    /// Cached outcome for `lazy`, without resolving.
    pub fn cached(&self, lazy: &LazyRef) -> Option<Result<Arc<P>, ResolveError>> {
        self.slots
            .lock()
            .get(lazy.identifier())
            .and_then(|slot| slot.get().cloned())
    }

    pub fn is_resolved(&self, lazy: &LazyRef) -> bool {
        self.cached(lazy).is_some()
    }

    /// Identifiers with a reserved slot but no outcome yet, sorted.
    pub fn pending(&self) -> Vec<String> {
        let mut pending: Vec<String> = self
            .slots
            .lock()
            .iter()
            .filter(|(_, slot)| !slot.initialized())
            .map(|(id, _)| id.clone())
            .collect();
        pending.sort();
        pending
    }

    pub fn registry(&self) -> &PageRegistry<P> {
        &self.registry
    }

    /// Start resolving `lazy` on the current tokio runtime without waiting.
    ///
    /// The outcome lands in the cache even if nobody awaits the handle.
    /// Must be called from within a tokio runtime.
    pub fn prefetch(self: &Arc<Self>, lazy: LazyRef) -> tokio::task::JoinHandle<()> {
        let resolver = Arc::clone(self);
        tokio::spawn(async move {
            let _ = resolver.resolve(&lazy).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    struct Page(&'static str);

    fn counting_registry(calls: Arc<AtomicUsize>) -> PageRegistry<Page> {
        let mut registry = PageRegistry::new();
        registry.register("/system/user", move || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                Ok(Page("user"))
            }
        });
        registry
    }

    #[tokio::test]
    async fn resolves_once_and_caches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = LazyResolver::new(counting_registry(Arc::clone(&calls)));
        let lazy = LazyRef::new("system/user");

        assert!(!resolver.is_resolved(&lazy));
        let first = resolver.resolve(&lazy).await.unwrap();
        let second = resolver.resolve(&lazy).await.unwrap();
        assert_eq!(*first, Page("user"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(resolver.is_resolved(&lazy));
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = Arc::new(LazyResolver::new(counting_registry(Arc::clone(&calls))));
        let lazy = LazyRef::new("/system/user");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                let lazy = lazy.clone();
                tokio::spawn(async move { resolver.resolve(&lazy).await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_page_is_a_cached_error() {
        let resolver: LazyResolver<Page> = LazyResolver::new(PageRegistry::new());
        let lazy = LazyRef::new("/missing");
        let err = resolver.resolve(&lazy).await.unwrap_err();
        assert_eq!(err, ResolveError::UnknownPage("/missing".to_string()));
        assert_eq!(resolver.cached(&lazy), Some(Err(err)));
    }

    #[tokio::test]
    async fn failed_factory_is_not_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry: PageRegistry<Page> = PageRegistry::new();
        let counter = Arc::clone(&calls);
        registry.register("/broken", move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err("chunk load error".to_string())
            }
        });
        let resolver = LazyResolver::new(registry);
        let lazy = LazyRef::new("/broken");

        for _ in 0..3 {
            assert!(matches!(
                resolver.resolve(&lazy).await,
                Err(ResolveError::LoadFailed { .. })
            ));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn registered_refs_are_pending_until_resolved() {
        let mut registry = PageRegistry::new();
        registry
            .register_ready("/a", Page("a"))
            .register_ready("/b", Page("b"));
        let resolver = Arc::new(LazyResolver::new(registry));
        let a = LazyRef::new("/a");
        let b = LazyRef::new("/b");
        resolver.register_refs([&a, &b]);
        assert_eq!(resolver.pending(), vec!["/a".to_string(), "/b".to_string()]);

        resolver.prefetch(a.clone()).await.unwrap();
        assert_eq!(resolver.pending(), vec!["/b".to_string()]);
        assert_eq!(resolver.cached(&a).unwrap().unwrap().as_ref(), &Page("a"));
    }

    #[test]
    fn registry_normalizes_identifiers() {
        let mut registry = PageRegistry::new();
        registry.register_ready("home", Page("home"));
        assert!(registry.contains("/home"));
        assert!(registry.contains("home/"));
        assert_eq!(registry.len(), 1);
    }
}
