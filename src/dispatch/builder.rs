use crate::error::PatternError;
use crate::pattern::Segment;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// A route whose pattern contains placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRoute {
    /// Anchored regex with one capture group per placeholder
    pub regex: String,
    /// Route the regex belongs to
    pub route_name: String,
    /// Placeholder names in capture-group order
    pub variables: Vec<String>,
}

/// Serializable dispatch table.
///
/// Method tokens keep their first-seen order in `methods` so that
/// "method not allowed" answers list methods in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchData {
    pub methods: Vec<String>,
    /// method → literal path → route name
    pub static_routes: HashMap<String, HashMap<String, String>>,
    /// method → variable routes in registration order
    pub variable_routes: HashMap<String, Vec<VariableRoute>>,
}

impl DispatchData {
    /// Total number of entries across all methods
    #[must_use]
    pub fn len(&self) -> usize {
        self.static_routes.values().map(HashMap::len).sum::<usize>()
            + self.variable_routes.values().map(Vec::len).sum::<usize>()
    }

    /// Whether the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Accumulates route entries into a [`DispatchData`].
///
/// Conflicting entries resolve to the first registration: a later route that
/// can never be reached under the same method is dropped with a warning.
#[derive(Debug, Default)]
pub struct DispatchTableBuilder {
    data: DispatchData,
    /// Compiled variable regexes per method, parallel to `data.variable_routes`
    compiled: HashMap<String, Vec<Regex>>,
}

impl DispatchTableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one parsed alternative of a route under `method`.
    ///
    /// # Errors
    ///
    /// Fails when a placeholder name repeats within `segments`, or a
    /// placeholder regex is invalid or contains a capturing group.
    pub fn add_entry(
        &mut self,
        method: &str,
        segments: &[Segment],
        route_name: &str,
    ) -> Result<(), PatternError> {
        if !self.data.methods.iter().any(|m| m == method) {
            self.data.methods.push(method.to_string());
        }

        match segments {
            [Segment::Literal(path)] => {
                self.add_static(method, path, route_name);
                Ok(())
            }
            _ => self.add_variable(method, segments, route_name),
        }
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> DispatchData {
        self.data
    }

    fn add_static(&mut self, method: &str, path: &str, route_name: &str) {
        if let Some(shadow) = self
            .compiled
            .get(method)
            .and_then(|regexes| regexes.iter().position(|re| re.is_match(path)))
        {
            let earlier = &self.data.variable_routes[method][shadow].route_name;
            warn!(
                method = %method,
                path = %path,
                route_name = %route_name,
                shadowed_by = %earlier,
                "Static route shadowed by earlier variable route, ignoring"
            );
            return;
        }

        let routes = self.data.static_routes.entry(method.to_string()).or_default();
        if let Some(existing) = routes.get(path) {
            if existing != route_name {
                warn!(
                    method = %method,
                    path = %path,
                    route_name = %route_name,
                    registered = %existing,
                    "Duplicate static route, keeping first registration"
                );
            }
            return;
        }
        routes.insert(path.to_string(), route_name.to_string());
    }

    fn add_variable(
        &mut self,
        method: &str,
        segments: &[Segment],
        route_name: &str,
    ) -> Result<(), PatternError> {
        let route = variable_route(segments, route_name)?;
        let routes = self.data.variable_routes.entry(method.to_string()).or_default();
        if let Some(existing) = routes.iter().find(|r| r.regex == route.regex) {
            if existing.route_name != route_name {
                warn!(
                    method = %method,
                    regex = %route.regex,
                    route_name = %route_name,
                    registered = %existing.route_name,
                    "Duplicate variable route, keeping first registration"
                );
            }
            return Ok(());
        }

        let compiled = Regex::new(&route.regex).map_err(|e| PatternError::InvalidRegex {
            name: route_name.to_string(),
            regex: route.regex.clone(),
            reason: e.to_string(),
        })?;
        self.compiled.entry(method.to_string()).or_default().push(compiled);
        routes.push(route);
        Ok(())
    }
}

/// Build the anchored regex for a parsed alternative.
fn variable_route(segments: &[Segment], route_name: &str) -> Result<VariableRoute, PatternError> {
    let mut regex = String::from("^");
    let mut variables: Vec<String> = Vec::new();

    for segment in segments {
        match segment {
            Segment::Literal(text) => regex.push_str(&regex::escape(text)),
            Segment::Placeholder { name, regex: fragment } => {
                if variables.iter().any(|v| v == name) {
                    return Err(PatternError::DuplicatePlaceholder { name: name.clone() });
                }
                check_fragment(name, fragment)?;
                regex.push('(');
                regex.push_str(fragment);
                regex.push(')');
                variables.push(name.clone());
            }
        }
    }
    regex.push('$');

    Ok(VariableRoute {
        regex,
        route_name: route_name.to_string(),
        variables,
    })
}

fn check_fragment(name: &str, fragment: &str) -> Result<(), PatternError> {
    let compiled = Regex::new(fragment).map_err(|e| PatternError::InvalidRegex {
        name: name.to_string(),
        regex: fragment.to_string(),
        reason: e.to_string(),
    })?;
    // Group 0 is the implicit whole-match group.
    if compiled.captures_len() > 1 {
        return Err(PatternError::CapturingGroup {
            name: name.to_string(),
            regex: fragment.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parse;

    fn first(pattern: &str) -> Vec<Segment> {
        parse(pattern).unwrap().remove(0)
    }

    #[test]
    fn test_static_and_variable_entries() {
        let mut b = DispatchTableBuilder::new();
        b.add_entry("GET", &first("/foo"), "foo").unwrap();
        b.add_entry("POST", &first("/foo"), "foo").unwrap();
        b.add_entry("GET", &first(r"/users/{id:\d+}"), "user").unwrap();
        let data = b.build();

        assert_eq!(data.methods, vec!["GET", "POST"]);
        assert_eq!(data.static_routes["GET"]["/foo"], "foo");
        let user = &data.variable_routes["GET"][0];
        assert_eq!(user.regex, r"^/users/(\d+)$");
        assert_eq!(user.variables, vec!["id"]);
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_literals_are_escaped() {
        let mut b = DispatchTableBuilder::new();
        b.add_entry("GET", &first("/v1.0/{x}"), "x").unwrap();
        let data = b.build();
        assert_eq!(data.variable_routes["GET"][0].regex, r"^/v1\.0/([^/]+)$");
    }

    #[test]
    fn test_first_registration_wins() {
        let mut b = DispatchTableBuilder::new();
        b.add_entry("GET", &first("/same"), "first").unwrap();
        b.add_entry("GET", &first("/same"), "second").unwrap();
        b.add_entry("GET", &first("/p/{a}"), "var_first").unwrap();
        b.add_entry("GET", &first("/p/{b}"), "var_second").unwrap();
        let data = b.build();

        assert_eq!(data.static_routes["GET"]["/same"], "first");
        // Different names, same regex: the second route is unreachable.
        assert_eq!(data.variable_routes["GET"].len(), 1);
        assert_eq!(data.variable_routes["GET"][0].route_name, "var_first");
    }

    #[test]
    fn test_static_shadowed_by_earlier_variable_route() {
        let mut b = DispatchTableBuilder::new();
        b.add_entry("GET", &first("/users/{name}"), "by_name").unwrap();
        b.add_entry("GET", &first("/users/me"), "me").unwrap();
        let data = b.build();
        assert!(data.static_routes.get("GET").map_or(true, HashMap::is_empty));
    }

    #[test]
    fn test_invalid_placeholders() {
        let mut b = DispatchTableBuilder::new();
        assert_eq!(
            b.add_entry("GET", &first("/{a}/{a}"), "dup"),
            Err(PatternError::DuplicatePlaceholder { name: "a".into() })
        );
        assert_eq!(
            b.add_entry("GET", &first("/{a:(x|y)}"), "cap"),
            Err(PatternError::CapturingGroup {
                name: "a".into(),
                regex: "(x|y)".into()
            })
        );
        assert!(b.add_entry("GET", &first("/{a:(?:x|y)}"), "noncap").is_ok());
        assert!(matches!(
            b.add_entry("GET", &first("/{a:x(}"), "bad"),
            Err(PatternError::InvalidRegex { .. })
        ));
    }
}
