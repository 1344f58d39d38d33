//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Requested path (query/fragment still attached)
//!     → matcher.rs (normalize, strip base prefix)
//!     → table.rs (exact literal lookup)
//!     → router.rs (trigger deferred view load, commit history + current)
//!
//! Table Compilation (at startup):
//!     declared routes (path, name, view factory)
//!     → uniqueness + shape validation (all violations reported)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table compiled once at startup, immutable at runtime
//! - Exact literal matching only: no parameters, no wildcards, no catch-all
//! - Explicit NotFound rather than silent default
//! - A navigation commits only after its view finished loading

pub mod matcher;
pub mod router;
pub mod table;

pub use router::{ActiveRoute, NavigationOutcome, Resolution, Router, RouterError};
pub use table::{Route, RouteTable, RouteTableBuilder, TableError};
