use crate::route::{RouteTable, MAX_INLINE_PARAMS, PARAM_ACTION, PARAM_CONTROLLER, PARAM_ROUTE};
use crate::server::Request;
use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Stack-allocated storage for matched parameters.
///
/// Names use `Arc<str>` cloned from the route definition; values are
/// per-request data.
pub type ParamVec = SmallVec<[(Arc<str>, Value); MAX_INLINE_PARAMS]>;

/// Context a request is matched against: the path, the HTTP method and the
/// host it was addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Request path without the query string
    pub path: String,
    /// HTTP method
    pub method: Method,
    /// Host the request was addressed to, empty when unknown
    pub host: String,
}

impl RequestContext {
    /// Build a context from a method and path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            host: String::new(),
        }
    }

    /// Build a context from any [`Request`] implementation.
    #[must_use]
    pub fn from_request(request: &dyn Request) -> Self {
        Self {
            path: request.path().to_string(),
            method: request.method().clone(),
            host: request.host().to_string(),
        }
    }
}

/// Parameters extracted by a successful match.
///
/// Always contains the `controller` and `action` defaults plus the matched
/// route's name under `_route`; placeholder captures override defaults of
/// the same name.
#[derive(Debug, Clone, Default)]
pub struct MatchedParams {
    params: ParamVec,
}

impl MatchedParams {
    pub(crate) fn insert(&mut self, name: Arc<str>, value: Value) {
        if let Some(slot) = self.params.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.params.push((name, value));
        }
    }

    /// Get a parameter value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Whether a parameter with the given name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Name of the matched route. Guaranteed present on any value produced
    /// by [`UrlMatcher`].
    #[must_use]
    pub fn route_name(&self) -> &str {
        self.get(PARAM_ROUTE).and_then(Value::as_str).unwrap_or("")
    }

    /// The controller class identifier. Guaranteed present and non-empty on
    /// a complete match.
    #[must_use]
    pub fn controller(&self) -> &str {
        self.get(PARAM_CONTROLLER)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// The action name. Guaranteed present and non-empty on a complete
    /// match.
    #[must_use]
    pub fn action(&self) -> &str {
        self.get(PARAM_ACTION).and_then(Value::as_str).unwrap_or("")
    }

    /// Iterate all parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl PartialEq for MatchedParams {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

/// Matches request contexts against a route table.
///
/// Routes are tested in table order; the first whose method restriction and
/// compiled pattern both fit wins. Ties are not arbitrated further.
#[derive(Debug, Clone, Copy)]
pub struct UrlMatcher<'a> {
    routes: &'a RouteTable,
}

impl<'a> UrlMatcher<'a> {
    /// Create a matcher over the given table.
    #[must_use]
    pub fn new(routes: &'a RouteTable) -> Self {
        Self { routes }
    }

    /// Match a context against the table.
    ///
    /// Returns `Ok(None)` when no route fits — an ordinary outcome, not an
    /// error. A fitting route that lacks a `controller` or `action` default
    /// fails with [`IncompleteRouteError`] naming the missing key.
    pub fn match_context(
        &self,
        context: &RequestContext,
    ) -> Result<Option<MatchedParams>, IncompleteRouteError> {
        debug!(
            method = %context.method,
            path = %context.path,
            route_count = self.routes.len(),
            "route match attempt"
        );

        for route in self.routes.iter() {
            if !route.allows(&context.method) {
                continue;
            }
            let Some(captures) = route.capture(&context.path) else {
                continue;
            };

            let mut params = MatchedParams::default();
            for (name, value) in route.defaults() {
                params.insert(Arc::from(name.as_str()), value.clone());
            }
            for (name, value) in captures {
                params.insert(name, Value::String(value));
            }
            params.insert(
                Arc::from(PARAM_ROUTE),
                Value::String(route.name().to_string()),
            );

            for key in [PARAM_CONTROLLER, PARAM_ACTION] {
                let complete = params
                    .get(key)
                    .and_then(Value::as_str)
                    .is_some_and(|v| !v.is_empty());
                if !complete {
                    error!(route = %route.name(), missing = key, "incomplete route matched");
                    return Err(IncompleteRouteError {
                        route: route.name().to_string(),
                        missing: key,
                    });
                }
            }

            info!(
                method = %context.method,
                path = %context.path,
                route = %route.name(),
                controller = %params.controller(),
                action = %params.action(),
                "route matched"
            );
            return Ok(Some(params));
        }

        warn!(method = %context.method, path = %context.path, "no route matched");
        Ok(None)
    }
}

/// A structurally matched route lacks a `controller` or `action` default.
///
/// This is a configuration defect, distinct from "no route found", and is
/// propagated as-is so it surfaces loudly during development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteRouteError {
    /// Name of the matched route
    pub route: String,
    /// The missing default key, `controller` or `action`
    pub missing: &'static str,
}

impl fmt::Display for IncompleteRouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} param missing from route [{}]",
            self.missing, self.route
        )
    }
}

impl std::error::Error for IncompleteRouteError {}
