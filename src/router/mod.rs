//! # Router Module
//!
//! The router owns the compiled route table and answers the three questions
//! an application asks of it: which route handles this request, what is the
//! definition of this named route, and what URL points at this named route.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Preparing the route table once, from the definition callback or the cache
//! - Matching `(method, path)` pairs to routes and extracting path parameters
//! - Attaching route metadata (methods, middlewares, handler) to matches
//! - Generating URIs from route names, parameters and query pairs
//!
//! ## Lifecycle
//!
//! ```text
//! Router::new(callback) ──first use──▶ prepared (compiled or loaded from cache)
//! ```
//!
//! The transition happens at most once. A preparation error is returned to the
//! caller and the router stays unprepared.
//!
//! ## Match outcomes
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | [`MatchResult::Found`] | Route, params, methods, middlewares, handler |
//! | [`MatchResult::MethodNotAllowed`] | Path exists under other methods |
//! | [`MatchResult::NotFound`] | No route for the path |

mod core;
mod result;
mod uri;

pub use core::{RouteDefinitions, Router};
pub use result::{Found, MatchResult};
