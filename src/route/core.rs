use http::Method;
use regex::Regex;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Route default naming the controller class identifier.
pub const PARAM_CONTROLLER: &str = "controller";

/// Route default naming the action to invoke on the controller.
pub const PARAM_ACTION: &str = "action";

/// Key under which the matched route's name is reported in matched parameters.
pub const PARAM_ROUTE: &str = "_route";

/// Maximum number of path parameters before heap allocation.
///
/// Most route templates have well under 8 placeholders, so captured values
/// stay on the stack for the common case.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated storage for values captured out of a request path.
///
/// Placeholder names use `Arc<str>`: they come from the route definition and
/// are cloned into every match, so an O(1) refcount bump beats a string copy.
/// Values are per-request data and stay `String`.
pub(crate) type CaptureVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Render a parameter value as the literal string used in paths and
/// controller identifiers. Strings render bare, everything else through
/// its JSON form.
pub(crate) fn param_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// An immutable route definition.
///
/// Compiled once at construction: the path template is translated into a
/// regex plus the ordered placeholder list. A trailing run of placeholders
/// whose names carry defaults is optional in the match, so
/// `/archive/{year}/{month}` with a default for `month` also matches
/// `/archive/2024`.
#[derive(Debug, Clone)]
pub struct Route {
    name: Arc<str>,
    path: String,
    defaults: HashMap<String, Value>,
    requirements: HashMap<String, String>,
    methods: Vec<Method>,
    pattern: Regex,
    placeholders: Vec<Arc<str>>,
}

impl Route {
    /// Start building a route with the given unique name and path template.
    pub fn build(name: impl Into<String>, path: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            name: name.into(),
            path: path.into(),
            defaults: HashMap::new(),
            requirements: HashMap::new(),
            methods: Vec::new(),
        }
    }

    /// The route's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw path template, placeholders included.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Default parameter values, including the `controller`/`action`
    /// pseudo-keys when the route is dispatchable.
    #[must_use]
    pub fn defaults(&self) -> &HashMap<String, Value> {
        &self.defaults
    }

    /// Per-placeholder regex constraint fragments.
    #[must_use]
    pub fn requirements(&self) -> &HashMap<String, String> {
        &self.requirements
    }

    /// Whether the given HTTP method is accepted. An empty restriction
    /// list accepts every method.
    #[must_use]
    pub fn allows(&self, method: &Method) -> bool {
        self.methods.is_empty() || self.methods.contains(method)
    }

    /// Match a request path against the compiled pattern.
    ///
    /// Returns the captured placeholder values in declaration order, or
    /// `None` when the path does not fit the template. Optional trailing
    /// placeholders that went unfilled are simply absent from the result.
    pub(crate) fn capture(&self, path: &str) -> Option<CaptureVec> {
        let caps = self.pattern.captures(path)?;
        let mut out = CaptureVec::new();
        for (i, name) in self.placeholders.iter().enumerate() {
            if let Some(m) = caps.get(i + 1) {
                out.push((Arc::clone(name), m.as_str().to_string()));
            }
        }
        Some(out)
    }
}

/// Builder for [`Route`] definitions.
///
/// `finish` compiles the path template and fails with [`PatternError`] when
/// a requirement fragment does not form a valid regex.
#[derive(Debug)]
pub struct RouteBuilder {
    name: String,
    path: String,
    defaults: HashMap<String, Value>,
    requirements: HashMap<String, String>,
    methods: Vec<Method>,
}

impl RouteBuilder {
    /// Declare a default parameter value, injected into matched parameters
    /// and into reverse-routed paths when the caller omits the name.
    #[must_use]
    pub fn default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Constrain a placeholder to a regex fragment instead of the `[^/]+`
    /// segment default.
    #[must_use]
    pub fn requirement(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.requirements.insert(name.into(), pattern.into());
        self
    }

    /// Restrict the route to an HTTP method. May be called repeatedly;
    /// no restriction means every method is accepted.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Compile the template and produce the immutable [`Route`].
    pub fn finish(self) -> Result<Route, PatternError> {
        let (pattern, placeholders) =
            compile_pattern(&self.path, &self.defaults, &self.requirements).map_err(|source| {
                PatternError {
                    route: self.name.clone(),
                    source,
                }
            })?;
        Ok(Route {
            name: Arc::from(self.name.as_str()),
            path: self.path,
            defaults: self.defaults,
            requirements: self.requirements,
            methods: self.methods,
            pattern,
            placeholders,
        })
    }
}

/// Convert a path template into a regex and extract placeholder names.
///
/// `/users/{id}` becomes `^/users/([^/]+)$` with placeholders `["id"]`.
/// A trailing run of placeholders that have defaults compiles to optional
/// groups, so the template also matches paths that omit them.
fn compile_pattern(
    path: &str,
    defaults: &HashMap<String, Value>,
    requirements: &HashMap<String, String>,
) -> Result<(Regex, Vec<Arc<str>>), regex::Error> {
    if path.is_empty() || path == "/" {
        return Ok((Regex::new(r"^/$")?, Vec::new()));
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    // index of the first segment in the optional trailing run
    let mut optional_from = segments.len();
    for (i, segment) in segments.iter().enumerate().rev() {
        match placeholder_name(segment) {
            Some(name) if defaults.contains_key(name) => optional_from = i,
            _ => break,
        }
    }

    let mut pattern = String::with_capacity(path.len() + 16);
    pattern.push('^');
    let mut placeholders = Vec::with_capacity(path.matches('{').count());

    for (i, segment) in segments.iter().enumerate() {
        if let Some(name) = placeholder_name(segment) {
            let fragment = requirements.get(name).map(String::as_str).unwrap_or("[^/]+");
            if i >= optional_from {
                pattern.push_str("(?:/(");
                pattern.push_str(fragment);
                pattern.push_str("))?");
            } else {
                pattern.push_str("/(");
                pattern.push_str(fragment);
                pattern.push(')');
            }
            placeholders.push(Arc::from(name));
        } else {
            pattern.push('/');
            pattern.push_str(segment);
        }
    }

    pattern.push('$');
    Ok((Regex::new(&pattern)?, placeholders))
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Ordered collection of routes, unique by name.
///
/// Insertion order determines match precedence: the first structurally
/// compatible route wins. Re-adding a name replaces the earlier definition
/// in place, keeping its position in the precedence order.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    index: HashMap<Arc<str>, usize>,
}

impl RouteTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route, replacing any earlier definition with the same name.
    pub fn add(&mut self, route: Route) {
        let name = Arc::clone(&route.name);
        if let Some(&pos) = self.index.get(name.as_ref()) {
            warn!(route = %name, "replacing existing route definition");
            self.routes[pos] = route;
        } else {
            self.index.insert(name, self.routes.len());
            self.routes.push(route);
        }
    }

    /// Look up a route by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.index.get(name).map(|&pos| &self.routes[pos])
    }

    /// Iterate routes in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of routes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// A route template failed to compile.
///
/// Carries the offending route name; the underlying regex error is kept as
/// the source.
#[derive(Debug)]
pub struct PatternError {
    /// Name of the route whose template failed to compile
    pub route: String,
    source: regex::Error,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid pattern for route [{}]: {}", self.route, self.source)
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
