//! Route resolution and navigation.
//!
//! # Responsibilities
//! - Resolve requested paths against the compiled table
//! - Drive deferred view loading on activation
//! - Commit navigations: history entry + current-route snapshot
//! - Programmatic navigation by route name
//!
//! # Design Decisions
//! - Immutable table, lock-free current-route reads (arc-swap)
//! - A navigation commits only after its view finished loading
//! - Latest navigation wins: a load that finishes late never commits
//! - Unmatched paths commit a blank state (no catch-all route exists)
//! - Load failures leave the previous route active and history untouched

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use thiserror::Error;

use crate::history::{History, HistoryError, MemoryHistory};
use crate::routing::matcher::{join_base, normalize_path, strip_base};
use crate::routing::table::{Route, RouteTable};
use crate::views::LoadError;

/// Errors surfaced to navigation callers.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Programmatic navigation referenced a name absent from the table.
    #[error("unknown route name {0:?}")]
    UnknownRouteName(String),

    /// The route matched but its view failed to load.
    #[error("view for route {name:?} failed to load")]
    LoadFailed {
        name: String,
        #[source]
        source: LoadError,
    },

    /// The navigation strategy could not be constructed.
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Result of a pure path lookup. No loading is triggered here.
#[derive(Debug)]
pub enum Resolution<V> {
    /// The path matched a declared route.
    Match(Arc<Route<V>>),
    /// No declared route matched; `full_path` is the normalized request.
    NotFound { full_path: String },
}

/// Route activated by a committed navigation.
#[derive(Debug)]
pub struct ActiveRoute<V> {
    /// Symbolic route name.
    pub name: String,
    /// Application-relative path.
    pub path: String,
    /// Path as shown in the address bar (base prefix included).
    pub full_path: String,
    /// The resolved view module.
    pub view: Arc<V>,
}

/// Outcome of a navigation that did not error.
#[derive(Debug)]
pub enum NavigationOutcome<V> {
    /// The route's view is loaded and the route is now current.
    Activated(Arc<ActiveRoute<V>>),
    /// Nothing matched; the current view was cleared.
    Blank { full_path: String },
    /// A newer navigation started before this one could commit.
    Superseded,
}

/// How a committing navigation touches the history stack.
#[derive(Debug, Clone, Copy)]
enum Commit {
    Push,
    Replace,
    /// back()/forward() re-activations: the cursor already moved.
    Keep,
}

/// History-mode navigation router over an immutable route table.
pub struct Router<V> {
    table: Arc<RouteTable<V>>,
    history: Arc<dyn History>,
    current: ArcSwapOption<ActiveRoute<V>>,
    nav_seq: AtomicU64,
}

impl<V> Router<V> {
    /// Create a router over an explicit navigation strategy.
    pub fn new(table: RouteTable<V>, history: Arc<dyn History>) -> Self {
        Self {
            table: Arc::new(table),
            history,
            current: ArcSwapOption::empty(),
            nav_seq: AtomicU64::new(0),
        }
    }

    /// Create a router with an in-memory history rooted at `base`.
    ///
    /// This is the only fallible construction step: an invalid base prefix
    /// is fatal, there is no degraded mode.
    pub fn with_base(table: RouteTable<V>, base: &str) -> Result<Self, RouterError> {
        let history = MemoryHistory::with_base(base)?;
        Ok(Self::new(table, Arc::new(history)))
    }

    /// The compiled route table.
    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    /// The navigation strategy in use.
    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    /// Normalized base prefix ("" when served from the root).
    pub fn base(&self) -> &str {
        self.history.base()
    }

    /// Route activated by the last committed navigation, if any.
    pub fn current(&self) -> Option<Arc<ActiveRoute<V>>> {
        self.current.load_full()
    }

    /// Pure lookup: normalize, strip the base prefix, match literally.
    pub fn resolve(&self, raw: &str) -> Resolution<V> {
        let full = normalize_path(raw);
        let Some(rel) = strip_base(self.base(), &full) else {
            return Resolution::NotFound { full_path: full };
        };
        match self.table.lookup_path(rel) {
            Some(route) => Resolution::Match(route),
            None => Resolution::NotFound { full_path: full },
        }
    }

    /// Full path (base included) for a declared route name.
    pub fn href(&self, name: &str) -> Result<String, RouterError> {
        let route = self
            .table
            .lookup_name(name)
            .ok_or_else(|| RouterError::UnknownRouteName(name.to_string()))?;
        Ok(join_base(self.base(), route.path()))
    }

    /// Navigate to a requested path, pushing a history entry on commit.
    pub async fn navigate_to_path(&self, raw: &str) -> Result<NavigationOutcome<V>, RouterError> {
        self.navigate_path_with(raw, Commit::Push).await
    }

    /// Navigate to a requested path, replacing the current history entry.
    pub async fn replace_path(&self, raw: &str) -> Result<NavigationOutcome<V>, RouterError> {
        self.navigate_path_with(raw, Commit::Replace).await
    }

    /// Programmatic navigation by route name.
    pub async fn navigate_by_name(&self, name: &str) -> Result<NavigationOutcome<V>, RouterError> {
        let route = self
            .table
            .lookup_name(name)
            .ok_or_else(|| RouterError::UnknownRouteName(name.to_string()))?;
        let seq = self.next_seq();
        self.activate(route, seq, Commit::Push).await
    }

    /// Move one entry back and re-activate it.
    ///
    /// Returns `None` when there is no older entry.
    pub async fn back(&self) -> Result<Option<NavigationOutcome<V>>, RouterError> {
        let Some(entry) = self.history.back() else {
            return Ok(None);
        };
        self.reactivate(&entry).await.map(Some)
    }

    /// Move one entry forward and re-activate it.
    ///
    /// Returns `None` when there is no newer entry.
    pub async fn forward(&self) -> Result<Option<NavigationOutcome<V>>, RouterError> {
        let Some(entry) = self.history.forward() else {
            return Ok(None);
        };
        self.reactivate(&entry).await.map(Some)
    }

    async fn navigate_path_with(
        &self,
        raw: &str,
        commit: Commit,
    ) -> Result<NavigationOutcome<V>, RouterError> {
        let seq = self.next_seq();
        match self.resolve(raw) {
            Resolution::Match(route) => self.activate(route, seq, commit).await,
            Resolution::NotFound { full_path } => Ok(self.commit_blank(full_path, seq, commit)),
        }
    }

    async fn reactivate(&self, entry: &str) -> Result<NavigationOutcome<V>, RouterError> {
        let seq = self.next_seq();
        match self.resolve(entry) {
            Resolution::Match(route) => self.activate(route, seq, Commit::Keep).await,
            Resolution::NotFound { full_path } => {
                Ok(self.commit_blank(full_path, seq, Commit::Keep))
            }
        }
    }

    async fn activate(
        &self,
        route: Arc<Route<V>>,
        seq: u64,
        commit: Commit,
    ) -> Result<NavigationOutcome<V>, RouterError> {
        tracing::debug!(name = %route.name(), path = %route.path(), seq, "navigation started");

        let view = route.view().get_or_load().await.map_err(|source| {
            tracing::warn!(
                name = %route.name(),
                error = %source,
                seq,
                "view load failed, navigation aborted"
            );
            RouterError::LoadFailed {
                name: route.name().to_string(),
                source,
            }
        })?;

        if self.is_stale(seq) {
            tracing::debug!(name = %route.name(), seq, "navigation superseded");
            return Ok(NavigationOutcome::Superseded);
        }

        let full_path = join_base(self.base(), route.path());
        match commit {
            Commit::Push => self.history.push(&full_path),
            Commit::Replace => self.history.replace(&full_path),
            Commit::Keep => {}
        }

        let active = Arc::new(ActiveRoute {
            name: route.name().to_string(),
            path: route.path().to_string(),
            full_path,
            view,
        });
        self.current.store(Some(Arc::clone(&active)));
        tracing::info!(name = %active.name, path = %active.full_path, seq, "navigation committed");
        Ok(NavigationOutcome::Activated(active))
    }

    fn commit_blank(&self, full_path: String, seq: u64, commit: Commit) -> NavigationOutcome<V> {
        if self.is_stale(seq) {
            return NavigationOutcome::Superseded;
        }
        tracing::warn!(path = %full_path, seq, "no route matched, blank navigation state");
        match commit {
            Commit::Push => self.history.push(&full_path),
            Commit::Replace => self.history.replace(&full_path),
            Commit::Keep => {}
        }
        self.current.store(None);
        NavigationOutcome::Blank { full_path }
    }

    fn next_seq(&self) -> u64 {
        self.nav_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_stale(&self, seq: u64) -> bool {
        self.nav_seq.load(Ordering::SeqCst) != seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::ViewFuture;

    #[derive(Debug)]
    struct Page(&'static str);

    fn page(title: &'static str) -> impl Fn() -> ViewFuture<Page> + Send + Sync + 'static {
        move || {
            let fut: ViewFuture<Page> = Box::pin(async move { Ok(Arc::new(Page(title))) });
            fut
        }
    }

    fn demo_table() -> RouteTable<Page> {
        RouteTable::builder()
            .route("/", "home", page("Home"))
            .route("/face-landmarks", "faceLandmarks", page("FaceLandmarksDetection"))
            .build()
            .expect("demo table is valid")
    }

    #[test]
    fn test_resolve_is_pure_lookup() {
        let router = Router::with_base(demo_table(), "/").unwrap();

        match router.resolve("/face-landmarks") {
            Resolution::Match(route) => {
                assert_eq!(route.name(), "faceLandmarks");
                // resolve alone must not trigger the load
                assert!(!route.view().is_loaded());
            }
            other => panic!("expected match, got {other:?}"),
        }

        assert!(matches!(
            router.resolve("/does-not-exist"),
            Resolution::NotFound { .. }
        ));
    }

    #[test]
    fn test_resolve_under_base_prefix() {
        let router = Router::with_base(demo_table(), "/app/").unwrap();

        assert!(matches!(
            router.resolve("/app/face-landmarks"),
            Resolution::Match(_)
        ));
        // The bare path lives outside the base and must not match.
        assert!(matches!(
            router.resolve("/face-landmarks"),
            Resolution::NotFound { .. }
        ));
    }

    #[test]
    fn test_href() {
        let router = Router::with_base(demo_table(), "/app/").unwrap();
        assert_eq!(router.href("home").unwrap(), "/app/");
        assert_eq!(router.href("faceLandmarks").unwrap(), "/app/face-landmarks");
        assert!(matches!(
            router.href("nope"),
            Err(RouterError::UnknownRouteName(_))
        ));
    }

    #[tokio::test]
    async fn test_navigate_commits_current_and_history() {
        let router = Router::with_base(demo_table(), "/").unwrap();

        let outcome = router.navigate_to_path("/face-landmarks").await.unwrap();
        assert!(matches!(outcome, NavigationOutcome::Activated(_)));

        let current = router.current().expect("route is active");
        assert_eq!(current.name, "faceLandmarks");
        assert_eq!(router.history().current().as_deref(), Some("/face-landmarks"));
    }
}
