use super::builder::DispatchData;
use regex::{Regex, RegexSet};
use std::collections::HashMap;

/// Method token that registers a route for every method.
pub const ANY_METHOD: &str = "*";

/// Raw outcome of a dispatch, before route metadata is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Found {
        route_name: String,
        params: HashMap<String, String>,
    },
    NotFound,
    MethodNotAllowed {
        allowed_methods: Vec<String>,
    },
}

/// Variable routes of one method with their regexes compiled.
#[derive(Debug, Clone)]
struct VariableTable {
    set: RegexSet,
    routes: Vec<(Regex, String, Vec<String>)>,
}

impl VariableTable {
    fn lookup(&self, path: &str) -> Option<(String, HashMap<String, String>)> {
        let index = self.set.matches(path).iter().next()?;
        let (regex, route_name, variables) = &self.routes[index];
        let captures = regex.captures(path)?;
        let params = variables
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = captures.get(i + 1).map_or("", |m| m.as_str());
                (name.clone(), value.to_string())
            })
            .collect();
        Some((route_name.clone(), params))
    }

    fn is_match(&self, path: &str) -> bool {
        self.set.is_match(path)
    }
}

/// Matches `(method, path)` pairs against a compiled [`DispatchData`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    methods: Vec<String>,
    static_routes: HashMap<String, HashMap<String, String>>,
    variable_routes: HashMap<String, VariableTable>,
}

impl Dispatcher {
    /// Compile the regexes of a dispatch table.
    ///
    /// # Errors
    ///
    /// Returns the regex error if any stored route regex does not compile,
    /// which only happens for tables that did not come from
    /// [`DispatchTableBuilder`](super::DispatchTableBuilder).
    pub fn new(data: &DispatchData) -> Result<Self, regex::Error> {
        let mut variable_routes = HashMap::with_capacity(data.variable_routes.len());
        for (method, routes) in &data.variable_routes {
            let set = RegexSet::new(routes.iter().map(|r| r.regex.as_str()))?;
            let routes = routes
                .iter()
                .map(|r| Ok((Regex::new(&r.regex)?, r.route_name.clone(), r.variables.clone())))
                .collect::<Result<Vec<_>, regex::Error>>()?;
            variable_routes.insert(method.clone(), VariableTable { set, routes });
        }

        Ok(Self {
            methods: data.methods.clone(),
            static_routes: data.static_routes.clone(),
            variable_routes,
        })
    }

    /// Dispatch a request path. `path` is matched verbatim.
    #[must_use]
    pub fn dispatch(&self, method: &str, path: &str) -> DispatchOutcome {
        if let Some((route_name, params)) = self.lookup(method, path) {
            return DispatchOutcome::Found { route_name, params };
        }
        if method == "HEAD" {
            if let Some((route_name, params)) = self.lookup("GET", path) {
                return DispatchOutcome::Found { route_name, params };
            }
        }
        if let Some((route_name, params)) = self.lookup(ANY_METHOD, path) {
            return DispatchOutcome::Found { route_name, params };
        }

        let allowed_methods = self.allowed_methods(method, path);
        if allowed_methods.is_empty() {
            DispatchOutcome::NotFound
        } else {
            DispatchOutcome::MethodNotAllowed { allowed_methods }
        }
    }

    fn lookup(&self, method: &str, path: &str) -> Option<(String, HashMap<String, String>)> {
        if let Some(route_name) = self.static_routes.get(method).and_then(|r| r.get(path)) {
            return Some((route_name.clone(), HashMap::new()));
        }
        self.variable_routes.get(method)?.lookup(path)
    }

    /// Methods other than `method` under which `path` would match, static
    /// tables first, without duplicates.
    fn allowed_methods(&self, method: &str, path: &str) -> Vec<String> {
        let others = || self.methods.iter().filter(move |m| m.as_str() != method);

        let statics = others().filter(|m| {
            self.static_routes
                .get(m.as_str())
                .is_some_and(|routes| routes.contains_key(path))
        });
        let variables = others().filter(|m| {
            self.variable_routes
                .get(m.as_str())
                .is_some_and(|table| table.is_match(path))
        });

        let mut allowed: Vec<String> = Vec::new();
        for m in statics.chain(variables) {
            if !allowed.contains(m) {
                allowed.push(m.clone());
            }
        }
        allowed
    }
}
