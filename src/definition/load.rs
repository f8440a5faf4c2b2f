use super::collector::RouteCollector;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk representation of a set of route definitions.
///
/// ```yaml
/// groups:
///   adm:
///     prefix: /admin
///     middlewares: [auth]
/// routes:
///   - name: article
///     methods: [GET]
///     pattern: /articles/{id:\d+}[/{title}]
///     group: adm
///     handler: { controller: article, action: show }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionFile {
    #[serde(default)]
    pub groups: BTreeMap<String, GroupEntry>,
    /// A list rather than a map so registration order survives every format
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupEntry {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub middlewares: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEntry {
    pub name: String,
    pub methods: Vec<String>,
    pub pattern: String,
    #[serde(default)]
    pub middlewares: Vec<String>,
    #[serde(default)]
    pub handler: Value,
    #[serde(default)]
    pub group: Option<String>,
}

impl DefinitionFile {
    /// Parse definitions from text, picking the format from a file extension
    /// (`yaml`/`yml`, `toml`, anything else is JSON).
    pub fn from_str_with_extension(content: &str, extension: &str) -> anyhow::Result<Self> {
        let file = match extension {
            "yaml" | "yml" => serde_yaml::from_str(content)?,
            "toml" => toml::from_str(content)?,
            _ => serde_json::from_str(content)?,
        };
        Ok(file)
    }

    /// Register every group and route on `collector`.
    pub fn register(&self, collector: &mut RouteCollector) {
        for (name, group) in &self.groups {
            collector.add_group(name.as_str(), group.prefix.as_str(), group.middlewares.iter().cloned());
        }
        for route in &self.routes {
            collector.add_route(
                route.name.as_str(),
                route.methods.iter().cloned(),
                route.pattern.as_str(),
                route.middlewares.iter().cloned(),
                route.handler.clone(),
                route.group.as_deref(),
            );
        }
    }
}

/// Read a route definition file from disk.
pub fn load_definitions(path: impl AsRef<Path>) -> anyhow::Result<DefinitionFile> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route definitions {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    DefinitionFile::from_str_with_extension(&content, &extension)
        .with_context(|| format!("failed to parse route definitions {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
groups:
  adm:
    prefix: /admin
    middlewares: [adm_midd1]
routes:
  - name: foo
    methods: [GET, POST]
    pattern: /foo
    handler: { _controller: home }
  - name: article
    methods: [GET]
    pattern: '/articles/{id:\d+}[/{title}]'
    middlewares: [midd1]
    group: adm
"#;

    #[test]
    fn test_yaml_definitions_register_in_order() {
        let file = DefinitionFile::from_str_with_extension(YAML, "yaml").unwrap();
        let mut collector = RouteCollector::new();
        file.register(&mut collector);

        let names: Vec<_> = collector.routes().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "article"]);
        assert_eq!(collector.group("adm").unwrap().prefix, "/admin");
        let article = collector.route("article").unwrap();
        assert_eq!(article.group.as_deref(), Some("adm"));
        assert_eq!(article.pattern, r"/articles/{id:\d+}[/{title}]");
        assert!(article.handler.is_null());
    }

    #[test]
    fn test_toml_definitions() {
        let toml = r#"
[groups.api]
prefix = "/api"

[[routes]]
name = "users"
methods = ["GET"]
pattern = "/users"
group = "api"
"#;
        let file = DefinitionFile::from_str_with_extension(toml, "toml").unwrap();
        assert_eq!(file.routes.len(), 1);
        assert_eq!(file.groups["api"].prefix, "/api");
    }

    #[test]
    fn test_json_definitions_and_missing_file() {
        let json = r#"{"routes": [{"name": "a", "methods": ["GET"], "pattern": "/a", "handler": ["h"]}]}"#;
        let file = DefinitionFile::from_str_with_extension(json, "json").unwrap();
        assert_eq!(file.routes[0].handler, serde_json::json!(["h"]));
        assert!(file.groups.is_empty());

        assert!(load_definitions("/definitely/not/here.yaml").is_err());
    }
}
