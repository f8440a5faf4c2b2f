//! # Dispatch Module
//!
//! Regex-based dispatch table for parsed route patterns.
//!
//! ## Overview
//!
//! The module has two halves:
//!
//! 1. **Building**: [`DispatchTableBuilder`] accumulates
//!    `(method, segments, route name)` entries and produces [`DispatchData`],
//!    a plain serializable table that can be written to the route cache.
//! 2. **Matching**: [`Dispatcher`] compiles the table's regexes once and
//!    answers `dispatch(method, path)` with a [`DispatchOutcome`].
//!
//! ## Matching rules
//!
//! - Static routes (patterns without placeholders) are looked up by exact path
//!   before any regex is tried
//! - Variable routes are tried in registration order; the first one wins
//! - A `HEAD` request with no `HEAD` route falls back to `GET` routes
//! - Routes registered under the `*` method answer any method
//! - When the path matches only under other methods, the outcome is
//!   [`DispatchOutcome::MethodNotAllowed`] with those methods
//!
//! ## Performance
//!
//! Each method's variable routes share one [`regex::RegexSet`], so a lookup
//! scans the path once to find the first candidate and then runs a single
//! capturing regex to extract parameters.

mod builder;
mod core;

pub use builder::{DispatchData, DispatchTableBuilder, VariableRoute};
pub use core::{DispatchOutcome, Dispatcher, ANY_METHOD};
