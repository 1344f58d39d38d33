//! Navigation history subsystem.
//!
//! # Data Flow
//! ```text
//! Committed navigation (full path, base included)
//!     → History::push / History::replace
//!     → entry stack advances, forward tail discarded
//!
//! back() / forward()
//!     → cursor moves over existing entries
//!     → router re-activates the entry's route
//! ```
//!
//! # Design Decisions
//! - Trait seam: a platform-native strategy can replace the in-memory one
//! - Entries store the full path exactly as shown in the address bar
//! - push discards the forward tail, matching browser stack semantics
//! - Base prefix is fixed at construction, validated once

pub mod memory;

pub use memory::MemoryHistory;

use thiserror::Error;

/// Errors raised while constructing a history strategy.
#[derive(Debug, Clone, Error)]
pub enum HistoryError {
    /// Base prefix did not start with '/'.
    #[error("invalid base path {0:?}: must be empty or begin with '/'")]
    InvalidBase(String),
}

/// Contract between the router and a navigation strategy.
pub trait History: Send + Sync {
    /// Normalized base prefix ("" when the app is served from the root).
    fn base(&self) -> &str;

    /// Entry the cursor currently points at.
    fn current(&self) -> Option<String>;

    /// Append an entry after the cursor, discarding any forward tail.
    fn push(&self, full_path: &str);

    /// Swap the entry at the cursor (or create the first entry).
    fn replace(&self, full_path: &str);

    /// Move the cursor one entry back. Returns the new current entry.
    fn back(&self) -> Option<String>;

    /// Move the cursor one entry forward. Returns the new current entry.
    fn forward(&self) -> Option<String>;

    /// Number of entries on the stack.
    fn len(&self) -> usize;

    /// True when no navigation has been recorded yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
