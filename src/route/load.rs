use super::{Route, RouteTable};
use anyhow::Context;
use http::Method;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// On-disk routing file: an ordered list of route definitions.
///
/// ```yaml
/// routes:
///   - name: default
///     path: /default
///     defaults: { controller: hello, action: default }
///   - name: user-posts
///     path: /users/{id}/posts/{page}
///     defaults: { controller: users, action: posts, page: 1 }
///     requirements: { id: "[0-9]+" }
///     methods: [GET]
/// ```
#[derive(Debug, Deserialize)]
struct RouteFile {
    routes: Vec<RouteConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteConfig {
    name: String,
    path: String,
    #[serde(default)]
    defaults: HashMap<String, Value>,
    #[serde(default)]
    requirements: HashMap<String, String>,
    #[serde(default)]
    methods: Vec<String>,
}

/// Load a routing table from a YAML routing file.
///
/// List order in the file becomes match precedence in the table.
pub fn load_routes(path: impl AsRef<Path>) -> anyhow::Result<RouteTable> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading route file {}", path.display()))?;
    let table = routes_from_yaml(&content)?;
    info!(
        route_count = table.len(),
        file = %path.display(),
        "routing table loaded"
    );
    Ok(table)
}

/// Build a routing table from YAML routing-file content.
pub fn routes_from_yaml(content: &str) -> anyhow::Result<RouteTable> {
    let file: RouteFile = serde_yaml::from_str(content)?;
    let mut table = RouteTable::new();
    for cfg in file.routes {
        let mut builder = Route::build(&cfg.name, &cfg.path);
        for (name, value) in cfg.defaults {
            builder = builder.default(name, value);
        }
        for (name, fragment) in cfg.requirements {
            builder = builder.requirement(name, fragment);
        }
        for raw in &cfg.methods {
            let method: Method = raw
                .to_ascii_uppercase()
                .parse()
                .with_context(|| format!("invalid method [{raw}] on route [{}]", cfg.name))?;
            builder = builder.method(method);
        }
        let route = builder
            .finish()
            .with_context(|| format!("compiling route [{}]", cfg.name))?;
        table.add(route);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    const ROUTING: &str = r#"
routes:
  - name: default
    path: /default
    defaults: { controller: hello, action: default }
  - name: with-args
    path: /with-args/{foo}/{bar}
    defaults: { controller: hello, action: hello_world }
    requirements: { foo: "[a-z]+" }
    methods: [get, POST]
"#;

    #[test]
    fn test_routes_from_yaml() {
        let table = routes_from_yaml(ROUTING).unwrap();
        assert_eq!(table.len(), 2);

        let default = table.get("default").unwrap();
        assert_eq!(default.path(), "/default");
        assert_eq!(default.defaults()["controller"], "hello");

        let with_args = table.get("with-args").unwrap();
        assert_eq!(with_args.requirements()["foo"], "[a-z]+");
        assert!(with_args.allows(&Method::GET));
        assert!(with_args.allows(&Method::POST));
        assert!(!with_args.allows(&Method::DELETE));
    }

    #[test]
    fn test_file_order_is_precedence() {
        let table = routes_from_yaml(ROUTING).unwrap();
        let names: Vec<&str> = table.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["default", "with-args"]);
    }

    #[test]
    fn test_invalid_method_is_rejected() {
        let content = r#"
routes:
  - name: broken
    path: /broken
    methods: ["NOT A METHOD"]
"#;
        let err = routes_from_yaml(content).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_invalid_requirement_is_rejected() {
        let content = r#"
routes:
  - name: broken
    path: /broken/{id}
    requirements: { id: "[unclosed" }
"#;
        let err = routes_from_yaml(content).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_load_routes_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routing.yaml");
        std::fs::write(&path, ROUTING).unwrap();

        let table = load_routes(&path).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_routes("/nonexistent/routing.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/routing.yaml"));
    }
}
