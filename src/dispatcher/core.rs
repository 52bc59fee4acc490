use crate::binder::{bind_args, inspect_action, BindError, NamedLookup};
use crate::controller::ControllerFactory;
use crate::events::{Event, EventBroker};
use crate::ids::DispatchId;
use crate::route::{RouteTable, PARAM_ACTION, PARAM_CONTROLLER, PARAM_ROUTE};
use crate::router::{build_path, route_path, IncompleteRouteError, MatchedParams, RequestContext, UrlMatcher};
use crate::server::{Request, Response};
use arc_swap::ArcSwap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::error::{DispatchError, ResourceNotFoundError};

/// Route parameter keys consumed by the dispatcher itself and never passed
/// to actions as arguments.
pub const RESERVED_ROUTE_PARAMS: [&str; 3] = [PARAM_CONTROLLER, PARAM_ACTION, PARAM_ROUTE];

/// The front controller: matches requests against the route table, resolves
/// the target controller, binds route-derived arguments by name, invokes the
/// action and emits lifecycle events along the way.
///
/// Stateless across requests. The route table sits behind an [`ArcSwap`]:
/// concurrent dispatches read it lock-free and [`set_routes`](Self::set_routes)
/// replaces it as a whole value.
pub struct FrontController {
    routes: ArcSwap<RouteTable>,
    factory: Arc<ControllerFactory>,
    events: Arc<EventBroker>,
}

impl FrontController {
    /// Create a front controller over a route table and its collaborators.
    #[must_use]
    pub fn new(
        routes: RouteTable,
        factory: Arc<ControllerFactory>,
        events: Arc<EventBroker>,
    ) -> Self {
        Self {
            routes: ArcSwap::from_pointee(routes),
            factory,
            events,
        }
    }

    /// The current route table.
    #[must_use]
    pub fn routes(&self) -> Arc<RouteTable> {
        self.routes.load_full()
    }

    /// Replace the route table as a whole value. In-flight dispatches keep
    /// the table they started with.
    pub fn set_routes(&self, routes: RouteTable) {
        self.routes.store(Arc::new(routes));
    }

    /// Retrieve a route's raw template path by name; empty when unknown.
    #[must_use]
    pub fn route_path(&self, name: &str) -> String {
        let routes = self.routes.load();
        route_path(&routes, name)
    }

    /// Build a concrete path from a route name and named arguments; empty
    /// when the name is unknown. See [`crate::router::build_path`].
    #[must_use]
    pub fn build_path(&self, name: &str, named_args: &HashMap<String, Value>) -> String {
        let routes = self.routes.load();
        build_path(&routes, name, named_args)
    }

    /// Match a request against the route table.
    ///
    /// `Ok(None)` means no route fits — an ordinary outcome. A fitting
    /// route without a `controller`/`action` default fails with
    /// [`IncompleteRouteError`].
    pub fn match_request(
        &self,
        request: &dyn Request,
    ) -> Result<Option<MatchedParams>, IncompleteRouteError> {
        let context = RequestContext::from_request(request);
        let routes = self.routes.load();
        UrlMatcher::new(&routes).match_context(&context)
    }

    /// Dispatch a request to its routed controller action.
    ///
    /// Runs the full lifecycle — pre-dispatch event, match, controller
    /// resolution, name-keyed argument binding, post-route event,
    /// invocation, post-dispatch event — and returns the action's response
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Unserveable requests fail with [`DispatchError::ResourceNotFound`];
    /// misconfigured routes propagate as
    /// [`DispatchError::IncompleteRoute`]; a failing event subscriber
    /// aborts with [`DispatchError::Subscriber`].
    pub fn dispatch(&self, request: &dyn Request) -> Result<Response, DispatchError> {
        let dispatch_id = DispatchId::new();
        let start = Instant::now();
        info!(
            dispatch_id = %dispatch_id,
            method = %request.method(),
            path = %request.path(),
            "dispatch started"
        );

        self.events.fire(&Event::PreDispatch { request })?;

        let Some(params) = self.match_request(request)? else {
            warn!(dispatch_id = %dispatch_id, path = %request.path(), "resource not found");
            return Err(ResourceNotFoundError::Route {
                path: request.path().to_string(),
            }
            .into());
        };

        let controller_id = params.controller().to_string();
        let action = params.action().to_string();

        let controller = self.factory.create(&controller_id).map_err(|source| {
            error!(
                dispatch_id = %dispatch_id,
                controller = %controller_id,
                "controller not registered"
            );
            ResourceNotFoundError::Controller {
                controller: controller_id.clone(),
                source,
            }
        })?;

        let args = extract_args(&params);
        debug!(
            dispatch_id = %dispatch_id,
            controller = %controller_id,
            action = %action,
            arg_count = args.len(),
            "action arguments extracted"
        );

        let target = inspect_action(controller.as_ref(), &action).map_err(|source| {
            error!(
                dispatch_id = %dispatch_id,
                controller = %controller_id,
                action = %action,
                error = %source,
                "action inspection failed"
            );
            ResourceNotFoundError::Action {
                action: action.clone(),
                controller: controller_id.clone(),
                source,
            }
        })?;

        let bound = bind_args(target.params(), &NamedLookup(&args)).map_err(|err| match err {
            BindError::MissingArgument { name } => {
                error!(
                    dispatch_id = %dispatch_id,
                    controller = %controller_id,
                    action = %action,
                    argument = %name,
                    "required action argument missing"
                );
                ResourceNotFoundError::Argument {
                    name,
                    action: action.clone(),
                    controller: controller_id.clone(),
                }
            }
        })?;

        self.events.fire(&Event::PostRoute {
            request,
            controller: controller.as_ref(),
            action: &action,
            args: &args,
        })?;

        let response = target.invoke(&bound);

        self.events.fire(&Event::PostDispatch {
            response: &response,
            controller: controller.as_ref(),
            action: &action,
            args: &bound,
        })?;

        info!(
            dispatch_id = %dispatch_id,
            controller = %controller_id,
            action = %action,
            status = response.status,
            latency_ms = start.elapsed().as_millis() as u64,
            "dispatch complete"
        );
        Ok(response)
    }
}

impl std::fmt::Debug for FrontController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrontController")
            .field("route_count", &self.routes.load().len())
            .finish_non_exhaustive()
    }
}

/// Extract the action arguments from matched parameters by removing the
/// reserved keys.
fn extract_args(params: &MatchedParams) -> HashMap<String, Value> {
    params
        .iter()
        .filter(|(name, _)| !RESERVED_ROUTE_PARAMS.contains(name))
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}
