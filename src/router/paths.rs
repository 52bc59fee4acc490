use crate::route::{param_str, RouteTable, PARAM_ACTION, PARAM_CONTROLLER};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

/// Matches a trailing run of `/{placeholder}` groups left unfilled after
/// substitution.
static TRAILING_PLACEHOLDERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(/\{[^}]+\})+$").expect("failed to compile strip regex"));

/// Retrieve a route's raw template path by name.
///
/// Returns the empty string when the name is unknown, and `/` when the
/// route's template is empty.
#[must_use]
pub fn route_path(routes: &RouteTable, name: &str) -> String {
    match routes.get(name) {
        None => String::new(),
        Some(route) => {
            let path = route.path();
            if path.is_empty() {
                "/".to_string()
            } else {
                path.to_string()
            }
        }
    }
}

/// Build a concrete path from a route name and named arguments.
///
/// Route defaults (other than `controller`/`action`) fill in names the
/// caller omitted. Every `{name}` token with a value substitutes to its
/// literal string form; a trailing run of unfilled tokens is stripped, so
/// an optional tail with no supplied value does not leak placeholder syntax
/// into the result. Unfilled *interior* tokens stay literal — a caller
/// error surfaces as a visible token, not as a thrown error.
///
/// Returns the empty string when the route name is unknown.
#[must_use]
pub fn build_path(routes: &RouteTable, name: &str, named_args: &HashMap<String, Value>) -> String {
    let Some(route) = routes.get(name) else {
        return String::new();
    };

    let mut args: HashMap<&str, String> = named_args
        .iter()
        .map(|(key, value)| (key.as_str(), param_str(value)))
        .collect();

    // add omitted args having defaults in the route's definition
    for (key, value) in route.defaults() {
        if key == PARAM_CONTROLLER || key == PARAM_ACTION {
            continue;
        }
        args.entry(key.as_str())
            .or_insert_with(|| param_str(value));
    }

    // fill-in args in the route's path
    let mut path = route.path().to_string();
    for (key, value) in &args {
        path = path.replace(&format!("{{{key}}}"), value);
    }

    // strip unfilled args from the end of the path
    // e.g. /something/foo/{bar}
    let path = TRAILING_PLACEHOLDERS.replace(&path, "").to_string();

    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}
