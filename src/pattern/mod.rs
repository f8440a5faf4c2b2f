//! # Pattern Module
//!
//! Turns a route pattern into one or more concrete segment sequences.
//!
//! ## Syntax
//!
//! - Literal text is matched verbatim: `/users`
//! - `{name}` captures a path segment using the default regex `[^/]+`
//! - `{name:regex}` captures using a custom regex, which may itself contain
//!   balanced braces (`{year:\d{4}}`)
//! - Trailing `[...]` parts are optional and may nest: `/news[/{year}[/{month}]]`
//!
//! A `{` always opens a placeholder. Text such as `/a/{1abc}` or `/a/{id` is
//! rejected with [`PatternError::MalformedPlaceholder`](crate::error::PatternError)
//! rather than matched as literal braces, so a literal `{` cannot appear in a
//! pattern.
//!
//! ## Alternatives
//!
//! Optional parts are expanded eagerly. `/articles/{id}[/{title}]` yields two
//! alternatives, shortest first:
//!
//! ```text
//! 0: "/articles/", {id}
//! 1: "/articles/", {id}, "/", {title}
//! ```
//!
//! The last alternative is the most specific one. Reverse URL generation walks
//! the list from the end so the richest URL that can be filled wins.

mod parser;

pub use parser::{parse, Segment, DEFAULT_PLACEHOLDER_REGEX};
