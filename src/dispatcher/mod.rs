//! # Dispatcher Module
//!
//! The front controller and the forwarder — the two entry points into
//! action invocation.
//!
//! ## Overview
//!
//! [`FrontController::dispatch`] drives one request through the full
//! lifecycle: fire the pre-dispatch event, match the route table, resolve
//! the controller through the factory, extract and bind the route-derived
//! arguments by name, fire the post-route event, invoke the action, fire
//! the post-dispatch event, return the response.
//!
//! [`Forwarder::forward`] is the internal sibling: one controller action
//! invoking another directly, with caller-supplied arguments bound by
//! position. No routing, no post-dispatch event.
//!
//! ## Error Handling
//!
//! The two paths translate failures differently, on purpose:
//!
//! - Dispatch is driven by user input, so unresolvable controllers,
//!   unresolvable actions and missing route-bound arguments all narrow to
//!   [`ResourceNotFoundError`] — externally these are all "not found",
//!   while the original cause is preserved as the error source. Only
//!   [`crate::router::IncompleteRouteError`] passes through unmodified: a
//!   misconfigured route is a build defect and should fail loudly.
//! - Forwarding is trusted code, so its failures surface as-is: factory
//!   misses propagate unmodified and bad calls are [`ArgumentError`]s,
//!   never "not found".
//!
//! Event subscriber failures abort either pipeline; the core does not
//! suppress them.

mod core;
mod error;
mod forward;

pub use core::{FrontController, RESERVED_ROUTE_PARAMS};
pub use error::{ArgumentError, DispatchError, ForwardError, ResourceNotFoundError};
pub use forward::{ForwardTarget, Forwarder};
