use http::Method;
use std::collections::HashMap;

/// Minimal request surface consumed by route matching and dispatch.
///
/// The dispatcher never inspects a request beyond these accessors, so any
/// transport's request type can participate by implementing this trait.
pub trait Request {
    /// Request path without the query string (e.g. `/users/123`).
    fn path(&self) -> &str;

    /// HTTP method.
    fn method(&self) -> &Method;

    /// Host the request was addressed to. Empty when unknown.
    fn host(&self) -> &str;

    /// Parsed query string parameters.
    fn query_params(&self) -> &HashMap<String, String>;
}

/// Plain request value implementing [`Request`].
///
/// Splits the query string off the URI at construction and URL-decodes the
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    method: Method,
    path: String,
    host: String,
    query_params: HashMap<String, String>,
}

impl HttpRequest {
    /// Build a request from a method and a URI that may carry a query string.
    #[must_use]
    pub fn new(method: Method, uri: &str) -> Self {
        let path = uri.split('?').next().unwrap_or("/").to_string();
        let query_params = parse_query_params(uri);
        Self {
            method,
            path,
            host: String::new(),
            query_params,
        }
    }

    /// Shorthand for a GET request.
    #[must_use]
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Attach the host the request was addressed to.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }
}

impl Request for HttpRequest {
    fn path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> &Method {
        &self.method
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }
}

/// Parse query string parameters from a URI.
///
/// Extracts everything after the `?` character and URL-decodes parameter
/// names and values.
pub fn parse_query_params(uri: &str) -> HashMap<String, String> {
    if let Some(pos) = uri.find('?') {
        let query_str = &uri[pos + 1..];
        url::form_urlencoded::parse(query_str.as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    } else {
        HashMap::new()
    }
}
