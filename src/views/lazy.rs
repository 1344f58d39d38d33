//! Lazy view cell and load lifecycle.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use thiserror::Error;
use tokio::sync::OnceCell;

/// Future produced by a view factory.
pub type ViewFuture<V> = BoxFuture<'static, Result<Arc<V>, LoadError>>;

/// Factory invoked the first time its route is activated.
///
/// Stored on the route instead of the view itself so that unvisited views
/// never cost anything.
pub type ViewFactory<V> = Arc<dyn Fn() -> ViewFuture<V> + Send + Sync>;

/// Errors that can occur while loading a view module.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The module chunk could not be fetched.
    #[error("chunk fetch failed: {0}")]
    Fetch(String),

    /// The module was fetched but failed to initialize.
    #[error("module evaluation failed: {0}")]
    Evaluation(String),
}

/// Load lifecycle of a single view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Factory has never run (or its last run failed).
    Unresolved,
    /// A load is in flight.
    Loading,
    /// The view is resolved and cached.
    Active,
}

const STATE_UNRESOLVED: u8 = 0;
const STATE_LOADING: u8 = 1;
const STATE_ACTIVE: u8 = 2;

/// A view resolved on first activation and cached for the process lifetime.
pub struct LazyView<V> {
    factory: ViewFactory<V>,
    cell: OnceCell<Arc<V>>,
    state: AtomicU8,
}

impl<V> LazyView<V> {
    /// Create a lazy view from a boxed-future factory.
    pub fn new(factory: ViewFactory<V>) -> Self {
        Self {
            factory,
            cell: OnceCell::new(),
            state: AtomicU8::new(STATE_UNRESOLVED),
        }
    }

    /// Create a lazy view from an async constructor closure.
    pub fn from_future<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<V>, LoadError>> + Send + 'static,
    {
        let factory: ViewFactory<V> = Arc::new(move || {
            let fut: ViewFuture<V> = Box::pin(f());
            fut
        });
        Self::new(factory)
    }

    /// Current point in the load lifecycle.
    pub fn state(&self) -> LoadState {
        match self.state.load(Ordering::SeqCst) {
            STATE_LOADING => LoadState::Loading,
            STATE_ACTIVE => LoadState::Active,
            _ => LoadState::Unresolved,
        }
    }

    /// True once the view has been resolved.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Resolve the view, running the factory if this is the first activation.
    ///
    /// Callers racing on an unresolved view share one in-flight load. On
    /// failure the cell stays empty, so a later activation runs the factory
    /// again.
    pub async fn get_or_load(&self) -> Result<Arc<V>, LoadError> {
        if let Some(view) = self.cell.get() {
            return Ok(Arc::clone(view));
        }

        self.state
            .compare_exchange(
                STATE_UNRESOLVED,
                STATE_LOADING,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .ok();

        match self.cell.get_or_try_init(|| (self.factory)()).await {
            Ok(view) => {
                self.state.store(STATE_ACTIVE, Ordering::SeqCst);
                Ok(Arc::clone(view))
            }
            Err(err) => {
                // Another activation may have succeeded in the meantime.
                if self.cell.get().is_none() {
                    self.state.store(STATE_UNRESOLVED, Ordering::SeqCst);
                }
                Err(err)
            }
        }
    }
}

impl<V> fmt::Debug for LazyView<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("state", &self.state())
            .finish()
    }
}
