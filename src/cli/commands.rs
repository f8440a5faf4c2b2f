use crate::cache;
use crate::compiler::compile;
use crate::config::RouterConfig;
use crate::definition::{load_definitions, RouteCollector};
use crate::router::{MatchResult, Router};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Command-line interface for routemap
#[derive(Parser)]
#[command(name = "routemap")]
#[command(about = "routemap CLI", long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List compiled routes
    Routes {
        /// Route definition file (YAML, TOML or JSON)
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Compile route definitions and write the route cache
    Compile {
        /// Route definition file (YAML, TOML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// Cache file to write; its directory must exist
        #[arg(short, long, env = "ROUTEMAP_CACHE_FILE")]
        cache: PathBuf,
    },
    /// Match a method and path against the routes
    Match {
        /// Route definition file (YAML, TOML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// HTTP method, e.g. GET
        method: String,

        /// Request path, e.g. /articles/10
        path: String,

        /// Cache file to load from or write to
        #[arg(short, long)]
        cache: Option<PathBuf>,
    },
    /// Generate the URI of a named route
    Url {
        /// Route definition file (YAML, TOML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// Route name
        name: String,

        /// Placeholder value as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,

        /// Query pair as key=value (repeatable, kept in order)
        #[arg(short, long, value_parser = parse_key_val)]
        query: Vec<(String, String)>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value: no `=` found in `{s}`"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Parse arguments, set up logging and run the selected command.
///
/// The command output is printed to stdout.
///
/// # Errors
///
/// Returns an error if:
/// - The route definition file cannot be read or parsed
/// - Route compilation or the cache fails
/// - URL generation is missing a parameter
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json)?;
    let output = execute(&cli.command)?;
    println!("{output}");
    Ok(())
}

/// Run one command and return what it would print.
///
/// # Errors
///
/// Same as [`run_cli`].
pub fn execute(command: &Commands) -> anyhow::Result<String> {
    match command {
        Commands::Routes { routes } => {
            let router = router_for(routes, RouterConfig::default())?;
            let mut out = String::new();
            for (name, route) in router.routes()? {
                writeln!(
                    out,
                    "{:<24} {:<16} {:<40} group={} middlewares=[{}]",
                    name,
                    route.methods.join(","),
                    route.pattern,
                    route.group.as_deref().unwrap_or("-"),
                    route.middlewares.join(", ")
                )?;
            }
            Ok(out.trim_end().to_string())
        }
        Commands::Compile { routes, cache } => {
            let file = load_definitions(routes)?;
            let mut collector = RouteCollector::new();
            file.register(&mut collector);
            let set = compile(&collector)
                .with_context(|| format!("Failed to compile routes from {}", routes.display()))?;
            cache::save(cache, &set)?;
            info!(cache_file = %cache.display(), routes = set.routes.len(), "Route cache written");
            Ok(format!("compiled {} routes into {}", set.routes.len(), cache.display()))
        }
        Commands::Match {
            routes,
            method,
            path,
            cache,
        } => {
            let config = cache
                .as_ref()
                .map_or_else(RouterConfig::from_env, RouterConfig::cached);
            let router = router_for(routes, config)?;
            let result = router.match_route(method, path)?;
            Ok(serde_json::to_string_pretty(&describe(&result))?)
        }
        Commands::Url {
            routes,
            name,
            params,
            query,
        } => {
            let router = router_for(routes, RouterConfig::default())?;
            let params: HashMap<String, String> = params.iter().cloned().collect();
            let uri = router.uri_for(name, &params, query.iter().map(|(k, v)| (k, v)))?;
            Ok(uri)
        }
    }
}

fn router_for(routes: &Path, config: RouterConfig) -> anyhow::Result<Router> {
    let file = load_definitions(routes)?;
    Ok(Router::with_config(move |r| file.register(r), config))
}

fn describe(result: &MatchResult) -> Value {
    match result {
        MatchResult::Found(_) => json!({
            "status": "found",
            "route": result.route_name(),
            "params": result.params(),
            "methods": result.allowed_methods(),
            "middlewares": result.middlewares(),
            "handler": result.handler(),
        }),
        MatchResult::MethodNotAllowed(allowed) => json!({
            "status": "method_not_allowed",
            "allowed_methods": allowed,
        }),
        MatchResult::NotFound => json!({ "status": "not_found" }),
    }
}

fn init_logging(json: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}
