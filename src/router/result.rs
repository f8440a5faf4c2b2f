use serde_json::Value;
use std::collections::HashMap;

/// Payload of a successful match.
#[derive(Debug, Clone, PartialEq)]
pub struct Found {
    route_name: String,
    params: HashMap<String, String>,
    allowed_methods: Vec<String>,
    middlewares: Vec<String>,
    handler: Value,
}

/// Outcome of matching a `(method, path)` pair.
///
/// A `Found` value can only come from [`MatchResult::found`], since its
/// payload fields are private. The two failure variants carry no invariant
/// and may also be built directly; [`MatchResult::not_found`] and
/// [`MatchResult::method_not_allowed`] exist for symmetry.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    /// A route matched the method and path
    Found(Found),
    /// No route matches the path under any method
    NotFound,
    /// The path matches, but only under other methods
    MethodNotAllowed(Vec<String>),
}

impl MatchResult {
    #[must_use]
    pub fn found(
        route_name: impl Into<String>,
        params: HashMap<String, String>,
        allowed_methods: Vec<String>,
        middlewares: Vec<String>,
        handler: Value,
    ) -> Self {
        MatchResult::Found(Found {
            route_name: route_name.into(),
            params,
            allowed_methods,
            middlewares,
            handler,
        })
    }

    #[must_use]
    pub fn not_found() -> Self {
        MatchResult::NotFound
    }

    #[must_use]
    pub fn method_not_allowed(allowed_methods: Vec<String>) -> Self {
        MatchResult::MethodNotAllowed(allowed_methods)
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found(_))
    }

    /// True for both failure variants; a 405 is also "not found" for callers
    /// that only branch on success.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        !self.is_found()
    }

    #[must_use]
    pub fn is_method_not_allowed(&self) -> bool {
        matches!(self, MatchResult::MethodNotAllowed(_))
    }

    /// Matched route name
    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        self.as_found().map(|f| f.route_name.as_str())
    }

    /// Path parameters; empty unless found
    #[must_use]
    pub fn params(&self) -> &HashMap<String, String> {
        static EMPTY: once_cell::sync::Lazy<HashMap<String, String>> =
            once_cell::sync::Lazy::new(HashMap::new);
        self.as_found().map_or(&*EMPTY, |f| &f.params)
    }

    /// Single path parameter by name
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.as_found()?.params.get(name).map(String::as_str)
    }

    /// Methods of the matched route, or the methods the path would accept
    #[must_use]
    pub fn allowed_methods(&self) -> &[String] {
        match self {
            MatchResult::Found(f) => &f.allowed_methods,
            MatchResult::MethodNotAllowed(methods) => methods,
            MatchResult::NotFound => &[],
        }
    }

    /// Effective middlewares of the matched route; empty unless found
    #[must_use]
    pub fn middlewares(&self) -> &[String] {
        match self.as_found() {
            Some(found) => &found.middlewares,
            None => &[],
        }
    }

    /// Handler payload of the matched route
    #[must_use]
    pub fn handler(&self) -> Option<&Value> {
        self.as_found().map(|f| &f.handler)
    }

    fn as_found(&self) -> Option<&Found> {
        match self {
            MatchResult::Found(found) => Some(found),
            _ => None,
        }
    }
}
