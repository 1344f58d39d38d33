//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured navigation and load events)
//!
//! Consumers:
//!     → Log aggregation (stdout, file, remote)
//! ```
//!
//! # Design Decisions
//! - Structured fields (route name, path, navigation seq) on every event
//! - Log level configurable via config and environment
//! - Environment (`RUST_LOG`) wins over the config file

pub mod logging;
