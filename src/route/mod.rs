//! # Route Module
//!
//! Route definitions and the ordered route table they live in.
//!
//! ## Overview
//!
//! A [`Route`] maps a path template such as `/users/{id}` to a target
//! controller/action pair via its `defaults`, with optional per-placeholder
//! `requirements` (regex fragments) and an optional HTTP method restriction.
//! Templates are compiled into regex patterns at construction time; matching
//! itself happens in the [`crate::router`] module.
//!
//! A [`RouteTable`] is an ordered, name-unique collection of routes. Order is
//! significant: the first structurally compatible route wins a match.
//!
//! Tables can be built in code through [`Route::build`] or loaded from a YAML
//! routing file via [`load_routes`].

mod core;
mod load;

pub use core::{
    PatternError, Route, RouteBuilder, RouteTable, MAX_INLINE_PARAMS, PARAM_ACTION,
    PARAM_CONTROLLER, PARAM_ROUTE,
};
pub use load::{load_routes, routes_from_yaml};

pub(crate) use core::param_str;
