//! # routemap
//!
//! **routemap** compiles a set of named HTTP routes into a dispatch table, matches
//! `(method, path)` pairs against it and generates URLs from route names.
//!
//! ## Overview
//!
//! Routes are declared by name with a method list, a pattern, a middleware list
//! and an opaque handler value. Routes may join a group that contributes a path
//! prefix and middlewares that run before the route's own. The compiled table
//! can be persisted to a JSON cache and reused on the next start.
//!
//! ## Architecture
//!
//! - **[`definition`]** - Route and group collection, plus YAML/TOML/JSON definition files
//! - **[`pattern`]** - Pattern grammar: placeholders, custom regexes, trailing optional parts
//! - **[`dispatch`]** - Static map plus anchored regex table, per HTTP method
//! - **[`compiler`]** - Group resolution and dispatch table construction
//! - **[`cache`]** - JSON persistence of the compiled route set
//! - **[`router`]** - Lazy preparation, matching and reverse URL generation
//! - **[`config`]** - Cache settings from code or environment
//! - **[`cli`]** - The `routemap` command-line tool
//!
//! ### Request Flow
//!
//! ```text
//! match_route(method, path)
//!   └─ prepare once: cache::load  or  definitions → compile → cache::save
//!   └─ Dispatcher::dispatch
//!        static[method] → variable[method] → HEAD as GET → "*"
//!   └─ MatchResult { route_name, params, methods, middlewares, handler }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use routemap::{MatchResult, Router};
//! use serde_json::json;
//!
//! let router = Router::new(|r| {
//!     r.add_group("adm", "/admin", ["auth"]);
//!     r.add_route(
//!         "article",
//!         ["GET"],
//!         r"/articles/{id:\d+}[/{title}]",
//!         ["log"],
//!         json!("article_handler"),
//!         Some("adm"),
//!     );
//! });
//!
//! let found = router.match_route("GET", "/admin/articles/10/hello")?;
//! assert_eq!(found.param("title"), Some("hello"));
//! assert_eq!(found.middlewares(), ["auth", "log"]);
//!
//! let denied = router.match_route("POST", "/admin/articles/10")?;
//! assert_eq!(denied, MatchResult::method_not_allowed(vec!["GET".into()]));
//! # Ok::<(), routemap::RouterError>(())
//! ```
//!
//! ## Pattern Syntax
//!
//! | Pattern | Matches |
//! |---------|---------|
//! | `/users` | exactly `/users` |
//! | `/users/{id}` | `/users/` followed by one non-empty segment without `/` |
//! | `/users/{id:\d+}` | `/users/` followed by digits |
//! | `/news[/{year}[/{month}]]` | `/news`, `/news/2024`, `/news/2024/05` |
//!
//! ## Caching
//!
//! With [`RouterConfig::cached`] (or `ROUTEMAP_CACHE=1`), the first preparation
//! writes the compiled table to a JSON file. Later routers load that file and
//! never run their definition callback. The cache is not invalidated when the
//! definitions change; delete the file to rebuild.

pub mod cache;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod definition;
pub mod dispatch;
pub mod error;
pub mod pattern;
pub mod router;

pub use compiler::{compile, CompiledRoute, CompiledRouteSet};
pub use config::RouterConfig;
pub use definition::RouteCollector;
pub use error::{PatternError, Result, RouterError};
pub use router::{MatchResult, Router};
