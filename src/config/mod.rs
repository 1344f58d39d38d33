//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → seeds the history base and logging at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table never reloads
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::DeploymentConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouterConfig;
