//! # Server Module
//!
//! Request and response representations at the dispatch boundary.
//!
//! The core treats requests as opaque beyond the [`Request`] trait: a path,
//! an HTTP method, a host and query parameters are all route matching needs.
//! [`HttpRequest`] is the in-crate implementation used by tests and embedders
//! that do not bring their own request type.
//!
//! Responses carry a status code, headers and a JSON body; controller
//! actions produce them directly.

mod request;
mod response;

pub use request::{HttpRequest, Request};
pub use response::{HeaderVec, Response, MAX_INLINE_HEADERS};
