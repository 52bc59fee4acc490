//! # frontroute
//!
//! **frontroute** is a request-routing and action-dispatch core for
//! server-side MVC applications: given an inbound request it locates a
//! matching route, resolves the designated controller action, binds
//! request-derived values to the action's declared parameters, invokes it
//! and returns the response — emitting lifecycle events at defined points
//! so external code can observe or abort the pipeline.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`route`]** - Route definitions, the ordered route table and YAML
//!   route-file loading
//! - **[`router`]** - Path matching against the table and reverse routing
//!   (path building)
//! - **[`binder`]** - Declared-parameter binding, name-keyed for routed
//!   dispatch and position-keyed for forwards
//! - **[`controller`]** - The `Controller` trait, action tables and the
//!   factory registry resolving class identifiers
//! - **[`dispatcher`]** - The front controller driving the dispatch
//!   lifecycle, and the forwarder for internal controller-to-controller
//!   calls
//! - **[`events`]** - Lifecycle events and the injected publish/subscribe
//!   broker
//! - **[`server`]** - Request/response representations at the dispatch
//!   boundary
//!
//! ## Request Flow
//!
//! 1. `FrontController::dispatch` fires the pre-dispatch event
//! 2. The matcher tests routes in table order; first structural fit wins
//! 3. The matched `controller` default is resolved to a fresh instance
//!    through the `ControllerFactory`
//! 4. Reserved keys are stripped and the remaining parameters are bound to
//!    the action's declared parameter list by name
//! 5. The post-route event fires, the action runs, the post-dispatch event
//!    fires, and the response is returned unchanged
//!
//! A controller action can hand the request off to another action with
//! `Forwarder::forward`, which binds caller-supplied arguments by position
//! instead and skips routing entirely.
//!
//! ## Quick Start
//!
//! ```no_run
//! use frontroute::{
//!     ActionTable, Controller, ControllerFactory, EventBroker, FrontController, ParamSpec,
//!     Response, Route, RouteTable, HttpRequest,
//! };
//! use std::sync::Arc;
//!
//! struct Hello {
//!     actions: ActionTable,
//! }
//!
//! impl Hello {
//!     fn new() -> Self {
//!         let actions = ActionTable::new().action("greet", vec![ParamSpec::required("name")], |args| {
//!             Response::text(200, &format!("hello {}", args[0].as_str().unwrap_or("")))
//!         });
//!         Self { actions }
//!     }
//! }
//!
//! impl Controller for Hello {
//!     fn identifier(&self) -> &str {
//!         "hello"
//!     }
//!     fn actions(&self) -> &ActionTable {
//!         &self.actions
//!     }
//! }
//!
//! let mut routes = RouteTable::new();
//! routes.add(
//!     Route::build("greet", "/greet/{name}")
//!         .default("controller", "hello")
//!         .default("action", "greet")
//!         .finish()
//!         .unwrap(),
//! );
//!
//! let mut factory = ControllerFactory::new();
//! factory.register("hello", || Box::new(Hello::new()));
//!
//! let front = FrontController::new(routes, Arc::new(factory), Arc::new(EventBroker::new()));
//! let response = front.dispatch(&HttpRequest::get("/greet/world")).unwrap();
//! assert_eq!(response.content(), "hello world");
//! ```

pub mod binder;
pub mod controller;
pub mod dispatcher;
pub mod events;
pub mod ids;
pub mod route;
pub mod router;
pub mod server;

pub use binder::{BindError, InspectionError, ParamSpec};
pub use controller::{Action, ActionTable, ClassNotFoundError, Controller, ControllerFactory};
pub use dispatcher::{
    ArgumentError, DispatchError, ForwardError, ForwardTarget, Forwarder, FrontController,
    ResourceNotFoundError, RESERVED_ROUTE_PARAMS,
};
pub use events::{Event, EventBroker, EventKind, SubscriberError};
pub use route::{load_routes, routes_from_yaml, PatternError, Route, RouteTable};
pub use router::{IncompleteRouteError, MatchedParams, RequestContext, UrlMatcher};
pub use server::{HttpRequest, Request, Response};
