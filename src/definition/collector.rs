use serde_json::Value;
use std::collections::HashMap;

/// A named route as registered by the application.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSpec {
    /// Unique route name
    pub name: String,
    /// HTTP method tokens (`GET`, `POST`, ... or `*` for any method)
    pub methods: Vec<String>,
    /// Path template, e.g. `/articles/{id:\d+}[/{title}]`
    pub pattern: String,
    /// Middleware identifiers, in execution order
    pub middlewares: Vec<String>,
    /// Opaque handler payload handed back on a successful match
    pub handler: Value,
    /// Optional group this route belongs to
    pub group: Option<String>,
}

/// A named prefix and middleware chain shared by member routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    /// Unique group name
    pub name: String,
    /// Prepended to the pattern of every member route
    pub prefix: String,
    /// Prepended to the middlewares of every member route
    pub middlewares: Vec<String>,
}

/// Store of route and group definitions.
///
/// Routes keep their first insertion position; re-registering a name replaces
/// the definition in place (last write wins).
#[derive(Debug, Clone, Default)]
pub struct RouteCollector {
    routes: Vec<RouteSpec>,
    index: HashMap<String, usize>,
    groups: HashMap<String, GroupSpec>,
}

impl RouteCollector {
    /// Create an empty collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route, replacing any previous route with the same name.
    pub fn add_route<M, W>(
        &mut self,
        name: impl Into<String>,
        methods: M,
        pattern: impl Into<String>,
        middlewares: W,
        handler: Value,
        group: Option<&str>,
    ) where
        M: IntoIterator,
        M::Item: Into<String>,
        W: IntoIterator,
        W::Item: Into<String>,
    {
        let spec = RouteSpec {
            name: name.into(),
            methods: methods.into_iter().map(Into::into).collect(),
            pattern: pattern.into(),
            middlewares: middlewares.into_iter().map(Into::into).collect(),
            handler,
            group: group.map(str::to_string),
        };
        self.insert_route(spec);
    }

    /// Register an already built [`RouteSpec`].
    pub fn insert_route(&mut self, spec: RouteSpec) {
        match self.index.get(&spec.name) {
            Some(&position) => self.routes[position] = spec,
            None => {
                self.index.insert(spec.name.clone(), self.routes.len());
                self.routes.push(spec);
            }
        }
    }

    /// Register a group, replacing any previous group with the same name.
    pub fn add_group<W>(&mut self, name: impl Into<String>, prefix: impl Into<String>, middlewares: W)
    where
        W: IntoIterator,
        W::Item: Into<String>,
    {
        let name = name.into();
        let group = GroupSpec {
            name: name.clone(),
            prefix: prefix.into(),
            middlewares: middlewares.into_iter().map(Into::into).collect(),
        };
        self.groups.insert(name, group);
    }

    /// Routes in registration order
    pub fn routes(&self) -> impl Iterator<Item = &RouteSpec> {
        self.routes.iter()
    }

    /// Look up a route by name
    #[must_use]
    pub fn route(&self, name: &str) -> Option<&RouteSpec> {
        self.index.get(name).map(|&i| &self.routes[i])
    }

    /// Look up a group by name
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&GroupSpec> {
        self.groups.get(name)
    }

    /// Number of registered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
