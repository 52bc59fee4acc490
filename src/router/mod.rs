//! # Router Module
//!
//! Path matching and reverse routing over a [`crate::route::RouteTable`].
//!
//! ## Overview
//!
//! Matching is a two-phase affair:
//!
//! 1. **Compilation**: route templates were compiled into regex patterns
//!    when their [`crate::route::Route`]s were built.
//! 2. **Matching**: [`UrlMatcher`] tests a [`RequestContext`] against the
//!    table in precedence order until a route fits, then merges the route's
//!    defaults with the captured path segments into [`MatchedParams`].
//!
//! A structural match that lacks a `controller` or `action` default is a
//! configuration defect and fails with [`IncompleteRouteError`] — a
//! distinct outcome from "no route fits", which is the ordinary `None`.
//!
//! Reverse routing lives here too: [`route_path`] returns a route's raw
//! template and [`build_path`] substitutes named arguments into it,
//! stripping unfilled trailing placeholders.

mod core;
mod paths;

pub use core::{IncompleteRouteError, MatchedParams, ParamVec, RequestContext, UrlMatcher};
pub use paths::{build_path, route_path};
