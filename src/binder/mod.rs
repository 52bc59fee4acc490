//! # Binder Module
//!
//! Declared-parameter binding for controller actions.
//!
//! ## Overview
//!
//! Every action declares its parameters as [`ParamSpec`]s: a name and an
//! optional default (no default means required). At call time the binder
//! walks the declaration in order and produces the positional argument list
//! the action is invoked with.
//!
//! Two lookup strategies feed the same algorithm:
//!
//! - [`NamedLookup`] resolves values by parameter name — the routed dispatch
//!   path, where arguments come from matched route parameters.
//! - [`PositionalLookup`] resolves values by declaration index — the forward
//!   path, where a caller supplies arguments in order.
//!
//! Inspection ([`inspect_action`]) resolves and validates an action's
//! declaration before binding; its failures are kept distinct from
//! missing-argument failures so callers can tell a broken target from a
//! wrong call.

mod core;

pub use core::{
    bind_args, inspect_action, ArgLookup, BindError, InspectionError, NamedLookup, ParamSpec,
    PositionalLookup,
};
