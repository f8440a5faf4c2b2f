//! Unit tests for CLI commands

use crate::cli::{execute, Cli, Commands};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

const ROUTES_YAML: &str = r#"
groups:
  adm:
    prefix: /admin
    middlewares: [adm_midd1, adm_midd2]
routes:
  - name: foo
    methods: [GET, POST]
    pattern: /foo
    middlewares: [midd1, midd2]
    handler: { _controller: home, _action: index }
  - name: article
    methods: [GET]
    pattern: /articles/{id:\d+}[/{title}]
    middlewares: [midd1, midd2]
    handler: [article_handler]
    group: adm
"#;

fn write_routes(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("routes.yaml");
    fs::write(&path, ROUTES_YAML).unwrap();
    path
}

#[test]
fn test_routes_command_parses() {
    let cli = Cli::try_parse_from(["routemap", "routes", "--routes", "routes.yaml"]).unwrap();
    assert!(!cli.json);
    match cli.command {
        Commands::Routes { routes } => assert_eq!(routes.to_string_lossy(), "routes.yaml"),
        _ => panic!("Expected Routes command"),
    }
}

#[test]
fn test_match_command_with_flags() {
    let cli = Cli::try_parse_from([
        "routemap",
        "match",
        "--routes",
        "routes.yaml",
        "GET",
        "/foo",
        "--cache",
        "routes.cache.json",
        "--json",
    ])
    .unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Match {
            routes,
            method,
            path,
            cache,
        } => {
            assert_eq!(routes.to_string_lossy(), "routes.yaml");
            assert_eq!(method, "GET");
            assert_eq!(path, "/foo");
            assert_eq!(cache, Some(PathBuf::from("routes.cache.json")));
        }
        _ => panic!("Expected Match command"),
    }
}

#[test]
fn test_url_command_collects_pairs_in_order() {
    let cli = Cli::try_parse_from([
        "routemap", "url", "-r", "routes.yaml", "article", "-p", "id=10", "-q", "x=100", "-q", "y=z",
    ])
    .unwrap();

    match cli.command {
        Commands::Url {
            name,
            params,
            query,
            ..
        } => {
            assert_eq!(name, "article");
            assert_eq!(params, vec![("id".to_string(), "10".to_string())]);
            assert_eq!(
                query,
                vec![
                    ("x".to_string(), "100".to_string()),
                    ("y".to_string(), "z".to_string())
                ]
            );
        }
        _ => panic!("Expected Url command"),
    }
}

#[test]
fn test_bad_key_value_rejected() {
    assert!(Cli::try_parse_from(["routemap", "url", "-r", "r.yaml", "foo", "-p", "novalue"]).is_err());
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["routemap", "routes", "--routes", "r.yaml"],
        vec!["routemap", "compile", "--routes", "r.yaml", "--cache", "c.json"],
        vec!["routemap", "match", "--routes", "r.yaml", "GET", "/"],
        vec!["routemap", "url", "--routes", "r.yaml", "foo"],
    ];
    for args in commands {
        assert!(Cli::try_parse_from(&args).is_ok(), "Failed to parse: {args:?}");
    }
}

#[test]
fn test_execute_routes_lists_in_registration_order() {
    let dir = tempfile::tempdir().unwrap();
    let routes = write_routes(&dir);
    let out = execute(&Commands::Routes { routes }).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("foo"));
    assert!(lines[1].starts_with("article"));
    assert!(lines[1].contains(r"/admin/articles/{id:\d+}[/{title}]"));
    assert!(lines[1].contains("group=adm"));
}

#[test]
fn test_execute_match_and_url() {
    let dir = tempfile::tempdir().unwrap();
    let routes = write_routes(&dir);

    let out = execute(&Commands::Match {
        routes: routes.clone(),
        method: "GET".into(),
        path: "/admin/articles/10/my-story".into(),
        cache: None,
    })
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["status"], "found");
    assert_eq!(value["route"], "article");
    assert_eq!(value["params"]["title"], "my-story");

    let out = execute(&Commands::Match {
        routes: routes.clone(),
        method: "DELETE".into(),
        path: "/foo".into(),
        cache: None,
    })
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["status"], "method_not_allowed");
    assert_eq!(value["allowed_methods"], serde_json::json!(["GET", "POST"]));

    let out = execute(&Commands::Url {
        routes,
        name: "article".into(),
        params: vec![("id".into(), "10".into())],
        query: vec![("x".into(), "100".into())],
    })
    .unwrap();
    assert_eq!(out, "/admin/articles/10?x=100");
}

#[test]
fn test_execute_compile_writes_cache() {
    let dir = tempfile::tempdir().unwrap();
    let routes = write_routes(&dir);
    let cache = dir.path().join("routes.cache.json");

    let out = execute(&Commands::Compile {
        routes: routes.clone(),
        cache: cache.clone(),
    })
    .unwrap();
    assert!(out.contains("compiled 2 routes"));
    assert!(cache.exists());

    // A match served from the cache sees the same table.
    let out = execute(&Commands::Match {
        routes,
        method: "POST".into(),
        path: "/foo".into(),
        cache: Some(cache),
    })
    .unwrap();
    assert!(out.contains("\"route\": \"foo\""));
}

#[test]
fn test_execute_missing_definitions_file() {
    let err = execute(&Commands::Routes {
        routes: PathBuf::from("/nonexistent/routes.yaml"),
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/routes.yaml"));
}
