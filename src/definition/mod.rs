//! # Definition Module
//!
//! Route and group definitions as registered by the application, before any
//! compilation takes place.
//!
//! Routes are registered by name on a [`RouteCollector`], usually from the
//! callback handed to [`Router::new`](crate::router::Router::new). Groups carry
//! a path prefix and a middleware chain that are applied to every member route
//! at compile time. Nothing is validated at registration: a route may name a
//! group that is only added later, or never, in which case compilation fails.
//!
//! ## Example
//!
//! ```rust
//! use routemap::definition::RouteCollector;
//! use serde_json::json;
//!
//! let mut routes = RouteCollector::new();
//! routes.add_group("adm", "/admin", ["auth"]);
//! routes.add_route(
//!     "article",
//!     ["GET"],
//!     r"/articles/{id:\d+}[/{title}]",
//!     ["log"],
//!     json!({"controller": "article"}),
//!     Some("adm"),
//! );
//! assert_eq!(routes.len(), 1);
//! ```
//!
//! Definitions can also be read from a declarative file, see
//! [`load_definitions`].

mod collector;
mod load;

pub use collector::{GroupSpec, RouteCollector, RouteSpec};
pub use load::{load_definitions, DefinitionFile, GroupEntry, RouteEntry};
