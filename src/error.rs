//! Error types for route compilation, caching and URL generation.
//!
//! Every failure is surfaced synchronously to the caller; nothing here is
//! retried. A failed match is not an error: absence of a route is reported
//! through [`MatchResult`](crate::router::MatchResult).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while parsing a route pattern or folding it into the
/// dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// `[` and `]` do not pair up
    #[error("number of opening '[' and closing ']' does not match")]
    UnbalancedOptional,
    /// A `]` appears before the end of the pattern
    #[error("optional segments can only occur at the end of a route")]
    OptionalNotAtEnd,
    /// `[]` or `[[...]]` with nothing between the brackets
    #[error("empty optional part")]
    EmptyOptional,
    /// A `{` without a well-formed `name` or closing `}`
    #[error("malformed placeholder at byte {offset}")]
    MalformedPlaceholder {
        /// Byte offset of the opening `{`
        offset: usize,
    },
    /// The same placeholder name appears twice in one alternative
    #[error("cannot use the same placeholder '{name}' twice")]
    DuplicatePlaceholder {
        /// Placeholder name
        name: String,
    },
    /// A placeholder regex introduces its own capture group
    #[error("regex '{regex}' for placeholder '{name}' contains a capturing group")]
    CapturingGroup {
        /// Placeholder name
        name: String,
        /// Offending regex fragment
        regex: String,
    },
    /// A placeholder regex does not compile
    #[error("invalid regex '{regex}' for placeholder '{name}': {reason}")]
    InvalidRegex {
        /// Placeholder name
        name: String,
        /// Offending regex fragment
        regex: String,
        /// Compiler message
        reason: String,
    },
}

/// Errors surfaced by the router and its compile/cache pipeline.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A route references a group that was never registered
    #[error("the route group \"{group}\" referenced by route \"{route}\" is not found")]
    UnknownGroup {
        /// Route that carries the reference
        route: String,
        /// Missing group name
        group: String,
    },
    /// Lookup of an unregistered route name
    #[error("route \"{0}\" does not exist")]
    RouteNotFound(String),
    /// A route pattern could not be parsed or compiled into the dispatch table
    #[error("invalid pattern for route \"{route}\": {source}")]
    InvalidPattern {
        /// Route whose pattern failed
        route: String,
        /// Underlying pattern error
        #[source]
        source: PatternError,
    },
    /// The compiled dispatch table could not be turned into matchers
    #[error("dispatch table failed to compile: {0}")]
    DispatchTable(#[source] regex::Error),
    /// The cache file exists but its content is not a valid compiled route set
    #[error("invalid cache file \"{}\": {reason}", path.display())]
    CacheCorrupt {
        /// Cache file path
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },
    /// The cache file could not be read
    #[error("cannot read cache file \"{}\"", path.display())]
    CacheReadError {
        /// Cache file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
    /// The cache destination is missing or not writable
    #[error("invalid cache directory \"{}\": directory does not exist or not writable", dir.display())]
    CacheWriteError {
        /// Directory the cache file should live in
        dir: PathBuf,
        /// Underlying I/O error, when the write itself failed
        #[source]
        source: Option<io::Error>,
    },
    /// Reverse generation could not satisfy the route's placeholders
    #[error("missing data for URL segment: \"{segment}\"")]
    MissingUrlParameter {
        /// First placeholder that could not be filled
        segment: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = RouterError> = std::result::Result<T, E>;
