//! Immutable route table.
//!
//! # Responsibilities
//! - Hold the declared routes (path, name, lazy view)
//! - Enforce path/name uniqueness and canonical path shape at build time
//! - O(1) lookup by path and by name
//!
//! # Design Decisions
//! - Built once at startup, immutable for the process lifetime
//! - The build reports every violation, not just the first
//! - Declared paths must already be canonical; normalization is for
//!   incoming requests, not for the table itself

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::routing::matcher::normalize_path;
use crate::views::{LazyView, LoadError, ViewFactory};

/// Errors detected while compiling the route table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    /// Two routes declared the same path.
    #[error("duplicate route path {0:?}")]
    DuplicatePath(String),

    /// Two routes declared the same name.
    #[error("duplicate route name {0:?}")]
    DuplicateName(String),

    /// Declared path is not a canonical absolute path.
    #[error("invalid route path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// Route name is empty.
    #[error("route for path {0:?} has an empty name")]
    EmptyName(String),
}

/// One declared route: a path, a symbolic name, and a deferred view.
#[derive(Debug)]
pub struct Route<V> {
    path: String,
    name: String,
    view: LazyView<V>,
}

impl<V> Route<V> {
    /// URL path this route matches, relative to the base prefix.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Symbolic identifier used for programmatic navigation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The route's deferred view.
    pub fn view(&self) -> &LazyView<V> {
        &self.view
    }
}

/// Collects route declarations and compiles them into a [`RouteTable`].
pub struct RouteTableBuilder<V> {
    routes: Vec<Route<V>>,
}

impl<V> RouteTableBuilder<V> {
    /// Declare a route with an async view constructor.
    pub fn route<F, Fut>(self, path: &str, name: &str, load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<V>, LoadError>> + Send + 'static,
    {
        let factory: ViewFactory<V> = Arc::new(move || {
            let fut: crate::views::ViewFuture<V> = Box::pin(load());
            fut
        });
        self.route_factory(path, name, factory)
    }

    /// Declare a route with a prebuilt boxed-future factory.
    pub fn route_factory(mut self, path: &str, name: &str, factory: ViewFactory<V>) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            name: name.to_string(),
            view: LazyView::new(factory),
        });
        self
    }

    /// Compile the declarations into an immutable table.
    ///
    /// Every violation across all declarations is reported.
    pub fn build(self) -> Result<RouteTable<V>, Vec<TableError>> {
        let mut errors = Vec::new();
        let mut by_path = HashMap::new();
        let mut by_name = HashMap::new();

        for (index, route) in self.routes.iter().enumerate() {
            if !route.path.starts_with('/') {
                errors.push(TableError::InvalidPath {
                    path: route.path.clone(),
                    reason: "must begin with '/'".to_string(),
                });
            } else if normalize_path(&route.path) != route.path {
                errors.push(TableError::InvalidPath {
                    path: route.path.clone(),
                    reason: "must be canonical (no trailing slash, query, or fragment)"
                        .to_string(),
                });
            }

            if route.name.is_empty() {
                errors.push(TableError::EmptyName(route.path.clone()));
            }

            if by_path.insert(route.path.clone(), index).is_some() {
                errors.push(TableError::DuplicatePath(route.path.clone()));
            }
            if by_name.insert(route.name.clone(), index).is_some() {
                errors.push(TableError::DuplicateName(route.name.clone()));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RouteTable {
            routes: self.routes.into_iter().map(Arc::new).collect(),
            by_path,
            by_name,
        })
    }
}

/// Compiled, immutable route table.
///
/// Shared freely across tasks; lookups never lock.
#[derive(Debug)]
pub struct RouteTable<V> {
    routes: Vec<Arc<Route<V>>>,
    by_path: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl<V> RouteTable<V> {
    /// Start declaring routes.
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder { routes: Vec::new() }
    }

    /// Exact literal lookup by application-relative path.
    pub fn lookup_path(&self, path: &str) -> Option<Arc<Route<V>>> {
        self.by_path.get(path).map(|&i| Arc::clone(&self.routes[i]))
    }

    /// Lookup by symbolic route name.
    pub fn lookup_name(&self, name: &str) -> Option<Arc<Route<V>>> {
        self.by_name.get(name).map(|&i| Arc::clone(&self.routes[i]))
    }

    /// Routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Route<V>>> {
        self.routes.iter()
    }

    /// Number of declared routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when no routes are declared.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Page;

    fn page() -> impl Future<Output = Result<Arc<Page>, LoadError>> {
        async { Ok(Arc::new(Page)) }
    }

    #[test]
    fn test_lookup_by_path_and_name() {
        let table = RouteTable::builder()
            .route("/", "home", page)
            .route("/face-landmarks", "faceLandmarks", page)
            .build()
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup_path("/").unwrap().name(), "home");
        assert_eq!(
            table.lookup_path("/face-landmarks").unwrap().name(),
            "faceLandmarks"
        );
        assert_eq!(
            table.lookup_name("faceLandmarks").unwrap().path(),
            "/face-landmarks"
        );
        assert!(table.lookup_path("/does-not-exist").is_none());
        assert!(table.lookup_name("missing").is_none());
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let errors = RouteTable::builder()
            .route("/a", "first", page)
            .route("/a", "second", page)
            .route("/b", "first", page)
            .build()
            .unwrap_err();

        assert!(errors.contains(&TableError::DuplicatePath("/a".to_string())));
        assert!(errors.contains(&TableError::DuplicateName("first".to_string())));
    }

    #[test]
    fn test_build_reports_all_violations() {
        let errors = RouteTable::builder()
            .route("relative", "a", page)
            .route("/trailing/", "b", page)
            .route("/ok", "", page)
            .build()
            .unwrap_err();

        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_declared_order_is_preserved() {
        let table = RouteTable::builder()
            .route("/", "home", page)
            .route("/image-segmentation1", "imageSegment1", page)
            .route("/image-segmentation2", "imageSegment2", page)
            .build()
            .unwrap();

        let names: Vec<&str> = table.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["home", "imageSegment1", "imageSegment2"]);
    }
}
