//! # Controller Module
//!
//! The handler seam: controllers, their action tables and the factory that
//! resolves class identifiers to fresh instances.
//!
//! ## Overview
//!
//! A [`Controller`] exposes a table of named [`Action`]s. Each action pairs
//! a declared parameter list ([`crate::binder::ParamSpec`]) with the closure
//! that runs it — the declaration is supplied at registration time, so no
//! runtime reflection is needed to discover what an action accepts.
//!
//! The [`ControllerFactory`] maps class identifiers (the `controller` route
//! default) to construction closures. Instances are built fresh on every
//! resolution; nothing is pooled or cached.

mod core;
mod factory;

pub use core::{Action, ActionFn, ActionTable, Controller};
pub use factory::{ClassNotFoundError, ControllerFactory};
