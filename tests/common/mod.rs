//! Shared utilities for navigation integration tests.

use std::sync::{Arc, Mutex};

use view_router::routing::RouteTable;
use view_router::views::{LoadError, ViewFuture};

/// Stand-in view module carrying only its title.
#[derive(Debug, PartialEq, Eq)]
pub struct TestView {
    pub title: &'static str,
}

/// Records every factory invocation, so tests can assert that loading
/// happened at most once per route.
#[derive(Debug, Default)]
pub struct LoadLog {
    loads: Mutex<Vec<&'static str>>,
}

impl LoadLog {
    pub fn record(&self, name: &'static str) {
        self.loads.lock().unwrap().push(name);
    }

    /// Number of loads recorded for one route name.
    pub fn count(&self, name: &str) -> usize {
        self.loads.lock().unwrap().iter().filter(|n| **n == name).count()
    }

    /// Total number of loads across all routes.
    pub fn total(&self) -> usize {
        self.loads.lock().unwrap().len()
    }
}

/// View factory that records its invocations in the log.
pub fn view(
    log: &Arc<LoadLog>,
    name: &'static str,
    title: &'static str,
) -> impl Fn() -> ViewFuture<TestView> + Send + Sync + 'static {
    let log = Arc::clone(log);
    move || {
        let log = Arc::clone(&log);
        let fut: ViewFuture<TestView> = Box::pin(async move {
            log.record(name);
            Ok(Arc::new(TestView { title }))
        });
        fut
    }
}

/// The five demo routes, instrumented with the load log.
pub fn demo_table(log: &Arc<LoadLog>) -> RouteTable<TestView> {
    RouteTable::builder()
        .route("/", "home", view(log, "home", "Home"))
        .route(
            "/image-segmentation1",
            "imageSegment1",
            view(log, "imageSegment1", "ImageSegmentation1"),
        )
        .route(
            "/image-segmentation2",
            "imageSegment2",
            view(log, "imageSegment2", "ImageSegmentation2"),
        )
        .route(
            "/devide-to-pieces",
            "devideToPieces",
            view(log, "devideToPieces", "DevideToPieces"),
        )
        .route(
            "/face-landmarks",
            "faceLandmarks",
            view(log, "faceLandmarks", "FaceLandmarksDetection"),
        )
        .build()
        .expect("demo table is valid")
}

/// Factory whose load always fails with a fetch error.
pub fn broken_view(
    reason: &'static str,
) -> impl Fn() -> ViewFuture<TestView> + Send + Sync + 'static {
    move || {
        let fut: ViewFuture<TestView> =
            Box::pin(async move { Err(LoadError::Fetch(reason.to_string())) });
        fut
    }
}
