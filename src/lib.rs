//! History-mode navigation router with deferred view loading.

pub mod config;
pub mod history;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::RouterConfig;
pub use history::{History, MemoryHistory};
pub use routing::{NavigationOutcome, Resolution, RouteTable, Router, RouterError};
pub use views::{LazyView, LoadError};
