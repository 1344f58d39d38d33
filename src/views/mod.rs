//! Deferred view loading subsystem.
//!
//! # Data Flow
//! ```text
//! Route activation
//!     → lazy.rs (LazyView::get_or_load)
//!     → first activation: run the view factory (async fetch + evaluate)
//!     → later activations: return the cached module
//!
//! Factory registration (at startup):
//!     closure returning a boxed future
//!     → stored on the route, never invoked until first activation
//! ```
//!
//! # Design Decisions
//! - Loading is an explicit async task returning a Result, not a callback
//! - At most one successful load per view per process
//! - Concurrent activations coalesce onto a single in-flight load
//! - A failed load leaves the view unresolved; the next activation retries

pub mod lazy;

pub use lazy::{LazyView, LoadError, LoadState, ViewFactory, ViewFuture};
