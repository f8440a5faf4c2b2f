//! # CLI Module
//!
//! Command-line access to a route definition file: list the compiled table,
//! write the route cache, try a match, or generate a URL.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! List every compiled route in registration order:
//!
//! ```bash
//! routemap routes --routes routes.yaml
//! ```
//!
//! ### `compile`
//!
//! Compile the definitions and write the JSON route cache:
//!
//! ```bash
//! routemap compile --routes routes.yaml --cache data/cache/routes.cache.json
//! ```
//!
//! ### `match`
//!
//! Match a method and path and print the outcome as JSON:
//!
//! ```bash
//! routemap match --routes routes.yaml GET /admin/articles/10/my-story
//! ```
//!
//! Options:
//! - `--cache <FILE>` - Load from (or write) this cache instead of `ROUTEMAP_CACHE*`
//!
//! ### `url`
//!
//! Generate the URI of a named route:
//!
//! ```bash
//! routemap url --routes routes.yaml article --param id=10 --query ref=home
//! ```
//!
//! ## Logging
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `info`). Pass `--json`
//! for one JSON object per line.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use routemap::cli::run_cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     run_cli()
//! }
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands};
