use super::result::MatchResult;
use super::uri::build_uri;
use crate::cache;
use crate::compiler::{compile, CompiledRoute, CompiledRouteSet};
use crate::config::RouterConfig;
use crate::definition::RouteCollector;
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::error::{Result, RouterError};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Callback that registers routes and groups on a fresh collector.
pub type RouteDefinitions = Box<dyn Fn(&mut RouteCollector) + Send + Sync>;

/// Matches above this duration are logged as slow.
const SLOW_MATCH: Duration = Duration::from_millis(1);

/// Compiled state, built at most once per router.
struct Prepared {
    routes: CompiledRouteSet,
    dispatcher: Dispatcher,
}

/// Named-route router with lazy compilation and optional on-disk caching.
///
/// Nothing happens at construction. The first call to any lookup, match or
/// URL operation prepares the route table:
///
/// 1. With caching enabled and the cache file present, the table is loaded
///    from the cache and the definition callback is never called.
/// 2. Otherwise the callback runs once against a fresh [`RouteCollector`], the
///    result is compiled and, with caching enabled, written to the cache.
///
/// A failed preparation leaves the router unprepared, so the next call tries
/// again. Once prepared, every operation is a read over immutable state and
/// the router can be shared freely across threads.
///
/// # Example
///
/// ```rust
/// use routemap::router::Router;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let router = Router::new(|r| {
///     r.add_route("home", ["GET"], "/", Vec::<String>::new(), json!("home"), None);
///     r.add_route("user", ["GET"], r"/users/{id:\d+}", ["auth"], json!("user"), None);
/// });
///
/// let result = router.match_route("GET", "/users/7")?;
/// assert_eq!(result.route_name(), Some("user"));
/// assert_eq!(result.param("id"), Some("7"));
///
/// let params = HashMap::from([("id".to_string(), "7".to_string())]);
/// assert_eq!(router.uri_for("user", &params, [("tab", "posts")])?, "/users/7?tab=posts");
/// # Ok::<(), routemap::RouterError>(())
/// ```
pub struct Router {
    definitions: RouteDefinitions,
    config: RouterConfig,
    prepared: OnceCell<Prepared>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("prepared", &self.is_prepared())
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Create a router with caching disabled.
    pub fn new<F>(definitions: F) -> Self
    where
        F: Fn(&mut RouteCollector) + Send + Sync + 'static,
    {
        Self::with_config(definitions, RouterConfig::default())
    }

    /// Create a router with an explicit cache configuration.
    pub fn with_config<F>(definitions: F, config: RouterConfig) -> Self
    where
        F: Fn(&mut RouteCollector) + Send + Sync + 'static,
    {
        Self {
            definitions: Box::new(definitions),
            config,
            prepared: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Whether the route table has been built or loaded
    #[must_use]
    pub fn is_prepared(&self) -> bool {
        self.prepared.get().is_some()
    }

    /// Build or load the route table now instead of on first use.
    ///
    /// # Errors
    ///
    /// Any compile or cache error; see [`RouterError`].
    pub fn prepare(&self) -> Result<&CompiledRouteSet> {
        self.state().map(|state| &state.routes)
    }

    fn state(&self) -> Result<&Prepared> {
        self.prepared.get_or_try_init(|| self.load_or_compile())
    }

    fn load_or_compile(&self) -> Result<Prepared> {
        let cache_file = &self.config.cache_file;

        if self.config.cache_enabled && cache_file.exists() {
            let routes = cache::load(cache_file)?;
            let dispatcher =
                Dispatcher::new(&routes.dispatch_data).map_err(|e| RouterError::CacheCorrupt {
                    path: cache_file.clone(),
                    reason: format!("dispatch table does not compile: {e}"),
                })?;
            return Ok(Prepared { routes, dispatcher });
        }

        let mut collector = RouteCollector::new();
        (self.definitions)(&mut collector);
        let routes = compile(&collector)?;
        let dispatcher = Dispatcher::new(&routes.dispatch_data).map_err(RouterError::DispatchTable)?;

        if self.config.cache_enabled {
            cache::save(cache_file, &routes)?;
        }

        Ok(Prepared { routes, dispatcher })
    }

    /// Compiled definition of a route.
    ///
    /// # Errors
    ///
    /// [`RouterError::RouteNotFound`] for an unknown name, or a preparation error.
    pub fn get_route_definition(&self, name: &str) -> Result<&CompiledRoute> {
        self.state()?
            .routes
            .get(name)
            .ok_or_else(|| RouterError::RouteNotFound(name.to_string()))
    }

    /// Group a route belongs to, if any.
    ///
    /// # Errors
    ///
    /// Same as [`Router::get_route_definition`].
    pub fn get_route_group_name(&self, name: &str) -> Result<Option<&str>> {
        Ok(self.get_route_definition(name)?.group.as_deref())
    }

    /// All compiled routes in registration order.
    ///
    /// # Errors
    ///
    /// A preparation error.
    pub fn routes(&self) -> Result<impl Iterator<Item = (&str, &CompiledRoute)>> {
        Ok(self
            .state()?
            .routes
            .routes
            .iter()
            .map(|(name, route)| (name.as_str(), route)))
    }

    /// Match a method and URL path.
    ///
    /// Leading slashes are normalized to exactly one. Absence of a route is a
    /// [`MatchResult`] variant, not an error.
    ///
    /// # Errors
    ///
    /// Only preparation errors.
    pub fn match_route(&self, method: &str, path: &str) -> Result<MatchResult> {
        let state = self.state()?;
        let path = format!("/{}", path.trim_start_matches('/'));

        debug!(method = %method, path = %path, "Route match attempt");
        let match_start = Instant::now();
        let outcome = state.dispatcher.dispatch(method, &path);
        let match_duration = match_start.elapsed();

        let result = match outcome {
            DispatchOutcome::Found { route_name, params } => {
                let route = state
                    .routes
                    .get(&route_name)
                    .ok_or_else(|| RouterError::RouteNotFound(route_name.clone()))?;
                if match_duration > SLOW_MATCH {
                    warn!(
                        method = %method,
                        path = %path,
                        route_name = %route_name,
                        route_pattern = %route.pattern,
                        duration_us = match_duration.as_micros(),
                        "Slow route matching detected"
                    );
                } else {
                    info!(
                        method = %method,
                        path = %path,
                        route_name = %route_name,
                        route_pattern = %route.pattern,
                        path_params = ?params,
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );
                }
                MatchResult::found(
                    route_name,
                    params,
                    route.methods.clone(),
                    route.middlewares.clone(),
                    route.handler.clone(),
                )
            }
            DispatchOutcome::MethodNotAllowed { allowed_methods } => {
                debug!(
                    method = %method,
                    path = %path,
                    allowed_methods = ?allowed_methods,
                    "Method not allowed"
                );
                MatchResult::method_not_allowed(allowed_methods)
            }
            DispatchOutcome::NotFound => {
                debug!(method = %method, path = %path, "No route matched");
                MatchResult::not_found()
            }
        };
        Ok(result)
    }

    /// Match an [`http::Request`] by its method and URI path.
    ///
    /// # Errors
    ///
    /// Only preparation errors.
    pub fn match_request<B>(&self, request: &http::Request<B>) -> Result<MatchResult> {
        self.match_route(request.method().as_str(), request.uri().path())
    }

    /// Generate the URI of a named route.
    ///
    /// The richest pattern alternative whose placeholders are all present in
    /// `params` is used; extra entries in `params` are ignored. A non-empty
    /// `query` is appended form-encoded in iteration order.
    ///
    /// # Errors
    ///
    /// - [`RouterError::RouteNotFound`] for an unknown name
    /// - [`RouterError::MissingUrlParameter`] when no alternative can be filled
    pub fn uri_for<Q, K, V>(&self, name: &str, params: &HashMap<String, String>, query: Q) -> Result<String>
    where
        Q: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let route = self.get_route_definition(name)?;
        build_uri(route, params, query)
    }
}
